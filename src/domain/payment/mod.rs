//! Payment aggregate

pub mod model;
pub mod repository;

pub use model::{CreatePaymentDto, Payment, PaymentFilter, PaymentStatus, UpdatePaymentDto};
pub use repository::PaymentRepository;
