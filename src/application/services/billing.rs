//! Billing history: each rental of a user with its first payment

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::warn;

use crate::application::Actor;
use crate::domain::{DomainResult, Payment, Rental, RepositoryProvider};

#[derive(Debug, Clone)]
pub struct BillingItem {
    pub rental: Rental,
    pub payment: Option<Payment>,
}

pub struct BillingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl BillingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Rentals of `user_id`, newest first, each joined with its first payment.
    ///
    /// Payment lookups run concurrently. A failed lookup yields an item
    /// without payment rather than failing the whole history.
    pub async fn billing_for_user(&self, actor: Actor, user_id: i32) -> DomainResult<Vec<BillingItem>> {
        actor.ensure_can_access(user_id)?;

        let rentals = self.repos.rentals().find_by_user(user_id).await?;

        let lookups = rentals.iter().map(|rental| {
            let payments = self.repos.payments();
            async move { payments.find_by_rental(rental.id).await }
        });
        let results = join_all(lookups).await;

        Ok(rentals
            .into_iter()
            .zip(results)
            .map(|(rental, result)| {
                let payment = match result {
                    Ok(payments) => payments.into_iter().next(),
                    Err(e) => {
                        warn!(rental_id = rental.id, error = %e, "Payment lookup failed");
                        None
                    }
                };
                BillingItem { rental, payment }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{in_memory_repos, rental_dto, FailingPaymentsProvider};
    use crate::domain::payment::CreatePaymentDto;
    use crate::domain::{DomainError, PaymentStatus, UserRole};
    use chrono::Utc;

    fn payment(rental_id: i32, amount: i64) -> CreatePaymentDto {
        CreatePaymentDto {
            rental_id,
            user_id: 1,
            amount,
            payment_method: "Credit Card".into(),
            payment_date: Utc::now(),
            status: PaymentStatus::Pending,
        }
    }

    #[tokio::test]
    async fn joins_first_payment_per_rental() {
        let repos = in_memory_repos();
        let paid = repos.rentals().create(rental_dto(1, 10)).await.unwrap();
        let unpaid = repos.rentals().create(rental_dto(1, 11)).await.unwrap();
        repos.rentals().create(rental_dto(2, 10)).await.unwrap();
        repos.payments().create(payment(paid.id, 100)).await.unwrap();
        repos.payments().create(payment(paid.id, 200)).await.unwrap();

        let svc = BillingService::new(repos);
        let items = svc
            .billing_for_user(Actor::new(1, UserRole::User), 1)
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        // newest first
        assert_eq!(items[0].rental.id, unpaid.id);
        assert!(items[0].payment.is_none());
        assert_eq!(items[1].rental.id, paid.id);
        assert_eq!(items[1].payment.as_ref().map(|p| p.amount), Some(100));
    }

    #[tokio::test]
    async fn no_rentals_is_empty() {
        let svc = BillingService::new(in_memory_repos());
        let items = svc
            .billing_for_user(Actor::new(5, UserRole::User), 5)
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn failed_payment_lookup_degrades_to_rental_only() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(FailingPaymentsProvider::new());
        repos.rentals().create(rental_dto(1, 10)).await.unwrap();

        let svc = BillingService::new(repos);
        let items = svc
            .billing_for_user(Actor::new(1, UserRole::User), 1)
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].payment.is_none());
    }

    #[tokio::test]
    async fn other_users_history_is_forbidden() {
        let svc = BillingService::new(in_memory_repos());
        assert!(matches!(
            svc.billing_for_user(Actor::new(1, UserRole::User), 2).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(svc
            .billing_for_user(Actor::new(1, UserRole::Admin), 2)
            .await
            .is_ok());
    }
}
