pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod view;

pub use api::{ApiClient, UserSummary};
pub use config::ClientConfig;
pub use error::ClientError;
pub use state::FetchState;
pub use view::Dashboard;
