//! Customer and administrator accounts

pub mod model;
pub mod repository;

mod dto_create;
mod dto_get;
mod dto_update;

pub use dto_create::CreateUserDto;
pub use dto_get::GetUserDto;
pub use dto_update::UpdateUserDto;
pub use model::{User, UserRole};
pub use repository::UserRepositoryInterface;
