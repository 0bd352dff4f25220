//! # Car Rental Service
//!
//! REST backend for a vehicle rental business: user accounts, the vehicle
//! fleet, rental price quotes, bookings, payments, reviews and billing history.
//!
//! ## Architecture
//!
//! - **domain**: entities, the rental quote calculator, repository traits
//! - **application**: services implementing the use cases (identity,
//!   fleet, booking, rentals, payments, reviews, billing)
//! - **infrastructure**: SeaORM/SQLite and in-memory repositories, JWT and
//!   password hashing
//! - **interfaces**: axum REST API with Swagger documentation
//! - **server**: runtime wiring and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};

pub use interfaces::http::{create_api_router, ApiDependencies};

pub use shared::errors::{AppError, DomainError};
