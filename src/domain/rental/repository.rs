//! Rental repository interface

use async_trait::async_trait;

use super::model::{CreateRentalDto, Rental, RentalFilter, UpdateRentalDto};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait RentalRepository: Send + Sync {
    async fn create(&self, dto: CreateRentalDto) -> DomainResult<Rental>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Rental>>;

    /// Filtered page, newest first
    async fn list(&self, filter: RentalFilter) -> DomainResult<PaginatedResult<Rental>>;

    /// All rentals of a user, newest first
    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<Rental>>;

    async fn update(&self, id: i32, dto: UpdateRentalDto) -> DomainResult<Option<Rental>>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: i32) -> DomainResult<bool>;
}
