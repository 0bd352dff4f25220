use async_trait::async_trait;

use super::model::{CreatePaymentDto, Payment, PaymentFilter, UpdatePaymentDto};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, dto: CreatePaymentDto) -> DomainResult<Payment>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Payment>>;

    /// Payments of a rental, oldest first
    async fn find_by_rental(&self, rental_id: i32) -> DomainResult<Vec<Payment>>;

    async fn list(&self, filter: PaymentFilter) -> DomainResult<PaginatedResult<Payment>>;

    async fn update(&self, id: i32, dto: UpdatePaymentDto) -> DomainResult<Option<Payment>>;
    async fn delete(&self, id: i32) -> DomainResult<bool>;
}
