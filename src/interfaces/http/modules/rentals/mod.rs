//! Rentals module: booking plus rental administration

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
