use std::sync::Arc;

use log::info;

use crate::application::Actor;
use crate::domain::payment::{CreatePaymentDto, Payment, PaymentFilter, UpdatePaymentDto};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::{validate_price, PaginatedResult};

pub struct PaymentService {
    repos: Arc<dyn RepositoryProvider>,
}

impl PaymentService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(
        &self,
        actor: Actor,
        mut filter: PaymentFilter,
    ) -> DomainResult<PaginatedResult<Payment>> {
        if !actor.is_admin() {
            filter.user_id = Some(actor.user_id);
        }
        self.repos.payments().list(filter).await
    }

    pub async fn get(&self, actor: Actor, id: i32) -> DomainResult<Payment> {
        let payment = self
            .repos
            .payments()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Payment", id))?;
        actor.ensure_can_access(payment.user_id)?;
        Ok(payment)
    }

    pub async fn create(&self, dto: CreatePaymentDto) -> DomainResult<Payment> {
        check_amount(Some(dto.amount))?;
        self.ensure_rental_exists(dto.rental_id).await?;

        let payment = self.repos.payments().create(dto).await?;
        info!(
            "Payment {} recorded for rental {}",
            payment.id, payment.rental_id
        );
        Ok(payment)
    }

    pub async fn update(&self, id: i32, dto: UpdatePaymentDto) -> DomainResult<Payment> {
        check_amount(dto.amount)?;
        if let Some(rental_id) = dto.rental_id {
            self.ensure_rental_exists(rental_id).await?;
        }
        self.repos
            .payments()
            .update(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("Payment", id))
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        if !self.repos.payments().delete(id).await? {
            return Err(DomainError::not_found("Payment", id));
        }
        Ok(())
    }

    async fn ensure_rental_exists(&self, rental_id: i32) -> DomainResult<()> {
        self.repos
            .rentals()
            .find_by_id(rental_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Rental", rental_id))
    }
}

fn check_amount(amount: Option<i64>) -> DomainResult<()> {
    match amount {
        Some(amount) => validate_price(amount)
            .map_err(|_| DomainError::Validation("amount must not be negative".into())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{in_memory_repos, rental_dto};
    use crate::domain::{PaymentStatus, UserRole};
    use chrono::Utc;

    fn payment_dto(rental_id: i32, user_id: i32) -> CreatePaymentDto {
        CreatePaymentDto {
            rental_id,
            user_id,
            amount: 650_000,
            payment_method: "Cash".into(),
            payment_date: Utc::now(),
            status: PaymentStatus::Paid,
        }
    }

    #[tokio::test]
    async fn create_requires_existing_rental() {
        let svc = PaymentService::new(in_memory_repos());
        assert!(matches!(
            svc.create(payment_dto(5, 1)).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn negative_amount_is_rejected() {
        let repos = in_memory_repos();
        let rental = repos.rentals().create(rental_dto(1, 1)).await.unwrap();
        let svc = PaymentService::new(repos);
        let dto = CreatePaymentDto {
            amount: -10,
            ..payment_dto(rental.id, 1)
        };
        assert!(matches!(
            svc.create(dto).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn owner_or_admin_can_read() {
        let repos = in_memory_repos();
        let rental = repos.rentals().create(rental_dto(3, 1)).await.unwrap();
        let svc = PaymentService::new(repos);
        let payment = svc.create(payment_dto(rental.id, 3)).await.unwrap();

        assert!(svc.get(Actor::new(3, UserRole::User), payment.id).await.is_ok());
        assert!(svc.get(Actor::new(1, UserRole::Admin), payment.id).await.is_ok());
        assert!(matches!(
            svc.get(Actor::new(4, UserRole::User), payment.id).await,
            Err(DomainError::Forbidden(_))
        ));

        let listed = svc
            .list(Actor::new(4, UserRole::User), PaymentFilter::default())
            .await
            .unwrap();
        assert_eq!(listed.total, 0);
    }
}
