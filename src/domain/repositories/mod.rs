//! Repository access for the domain layer
//!
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::payment::PaymentRepository;
use super::rental::RentalRepository;
use super::review::ReviewRepository;
use super::user::UserRepositoryInterface;
use super::vehicle::VehicleRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let vehicle = repos.vehicles().find_by_id(1).await?;
///     let rentals = repos.rentals().find_by_user(7).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepositoryInterface;
    fn vehicles(&self) -> &dyn VehicleRepository;
    fn rentals(&self) -> &dyn RentalRepository;
    fn payments(&self) -> &dyn PaymentRepository;
    fn reviews(&self) -> &dyn ReviewRepository;
}
