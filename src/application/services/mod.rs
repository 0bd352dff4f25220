//! Application services

mod billing;
mod booking;
mod payment;
mod rental;
mod review;
mod vehicle;

pub use billing::{BillingItem, BillingService};
pub use booking::{BookingOutcome, BookingRequest, BookingService};
pub use payment::PaymentService;
pub use rental::RentalService;
pub use review::ReviewService;
pub use vehicle::VehicleService;
