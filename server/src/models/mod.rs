pub mod user;

pub use user::{
    CreateUserRequest, CreatedUserResponse, NewUser, User, UserResponse, UsersResponse,
};
