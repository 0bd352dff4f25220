pub mod payment;
pub mod rental;
pub mod repositories;
pub mod review;
pub mod user;
pub mod vehicle;

pub use payment::{Payment, PaymentStatus};
pub use rental::{
    calculate_rental_quote, PricingSchedule, Rental, RentalQuote, RentalStatus, RentalTier,
};
pub use repositories::{DomainResult, RepositoryProvider};
pub use review::Review;
pub use user::{User, UserRole};
pub use vehicle::{Vehicle, VehicleStatus};

pub use crate::shared::errors::DomainError;
