pub mod guard;
pub mod model;
pub mod service;

pub use guard::UserCredentialGuard;
pub use model::{ChangePasswordDto, CreateUserDto};
pub use service::UserService;
