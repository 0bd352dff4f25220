pub mod auth;
pub mod billings;
pub mod health;
pub mod metrics;
pub mod payments;
pub mod rentals;
pub mod request_id;
pub mod reviews;
pub mod users;
pub mod vehicles;
