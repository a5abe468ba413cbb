pub mod error;
pub mod extract;
pub mod normalizer;
pub mod response;
