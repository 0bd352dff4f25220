//! Database entities module

pub mod payment;
pub mod rental;
pub mod review;
pub mod user;
pub mod vehicle;

pub use payment::Entity as Payment;
pub use rental::Entity as Rental;
pub use review::Entity as Review;
pub use user::Entity as User;
pub use vehicle::Entity as Vehicle;
