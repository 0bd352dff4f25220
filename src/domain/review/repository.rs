use async_trait::async_trait;

use super::model::{CreateReviewDto, Review, ReviewFilter, UpdateReviewDto};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, dto: CreateReviewDto) -> DomainResult<Review>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Review>>;
    async fn list(&self, filter: ReviewFilter) -> DomainResult<PaginatedResult<Review>>;
    async fn update(&self, id: i32, dto: UpdateReviewDto) -> DomainResult<Option<Review>>;
    async fn delete(&self, id: i32) -> DomainResult<bool>;
}
