//! Rental aggregate
//!
//! Contains the Rental entity, the quote calculator and the repository
//! interface.

pub mod model;
pub mod quote;
pub mod repository;

pub use model::{CreateRentalDto, Rental, RentalFilter, RentalStatus, UpdateRentalDto};
pub use quote::{calculate_rental_quote, PricingSchedule, RentalQuote, RentalTier};
pub use repository::RentalRepository;
