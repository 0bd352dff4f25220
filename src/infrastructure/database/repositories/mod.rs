//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod payment_repository;
pub mod rental_repository;
pub mod repository_provider;
pub mod review_repository;
pub mod user_repository;
pub mod vehicle_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

/// Map unique-constraint violations to `Conflict`, everything else to `Storage`.
pub(crate) fn unique_err(message: &str) -> impl Fn(sea_orm::DbErr) -> DomainError + '_ {
    move |e| {
        let text = e.to_string();
        if text.contains("UNIQUE") || text.contains("duplicate") {
            DomainError::Conflict(message.to_string())
        } else {
            db_err(e)
        }
    }
}
