use std::sync::Arc;

use log::info;

use crate::application::Actor;
use crate::domain::rental::{Rental, RentalFilter, UpdateRentalDto};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::{validate_price, PaginatedResult};

pub struct RentalService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RentalService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Non-admin callers only ever see their own rentals.
    pub async fn list(
        &self,
        actor: Actor,
        mut filter: RentalFilter,
    ) -> DomainResult<PaginatedResult<Rental>> {
        if !actor.is_admin() {
            filter.user_id = Some(actor.user_id);
        }
        self.repos.rentals().list(filter).await
    }

    pub async fn get(&self, actor: Actor, id: i32) -> DomainResult<Rental> {
        let rental = self
            .repos
            .rentals()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Rental", id))?;
        actor.ensure_can_access(rental.user_id)?;
        Ok(rental)
    }

    pub async fn update(&self, id: i32, dto: UpdateRentalDto) -> DomainResult<Rental> {
        if let Some(price) = dto.total_price {
            validate_price(price)
                .map_err(|_| DomainError::Validation("total_price must not be negative".into()))?;
        }
        if let Some(end_time) = dto.end_time {
            let current = self
                .repos
                .rentals()
                .find_by_id(id)
                .await?
                .ok_or_else(|| DomainError::not_found("Rental", id))?;
            if end_time <= current.start_time {
                return Err(DomainError::Validation(
                    "end_time must be after start_time".into(),
                ));
            }
        }
        let status = dto.status;
        let rental = self
            .repos
            .rentals()
            .update(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("Rental", id))?;
        if let Some(status) = status {
            info!("Rental {} status set to {}", id, status);
        }
        Ok(rental)
    }

    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        if !self.repos.rentals().delete(id).await? {
            return Err(DomainError::not_found("Rental", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{in_memory_repos, rental_dto};
    use crate::domain::{RentalStatus, UserRole};

    #[tokio::test]
    async fn users_only_list_their_own_rentals() {
        let repos = in_memory_repos();
        repos.rentals().create(rental_dto(1, 10)).await.unwrap();
        repos.rentals().create(rental_dto(2, 10)).await.unwrap();
        let svc = RentalService::new(repos);

        let mine = svc
            .list(
                Actor::new(1, UserRole::User),
                RentalFilter {
                    user_id: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(mine.total, 1);
        assert_eq!(mine.items[0].user_id, 1);

        let all = svc
            .list(Actor::new(99, UserRole::Admin), RentalFilter::default())
            .await
            .unwrap();
        assert_eq!(all.total, 2);
    }

    #[tokio::test]
    async fn foreign_rental_is_forbidden() {
        let repos = in_memory_repos();
        let rental = repos.rentals().create(rental_dto(1, 10)).await.unwrap();
        let svc = RentalService::new(repos);

        assert!(matches!(
            svc.get(Actor::new(2, UserRole::User), rental.id).await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(svc.get(Actor::new(1, UserRole::User), rental.id).await.is_ok());
    }

    #[tokio::test]
    async fn update_changes_status() {
        let repos = in_memory_repos();
        let rental = repos.rentals().create(rental_dto(1, 10)).await.unwrap();
        let svc = RentalService::new(repos);

        let updated = svc
            .update(
                rental.id,
                UpdateRentalDto {
                    status: Some(RentalStatus::Confirmed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, RentalStatus::Confirmed);
    }

    #[tokio::test]
    async fn end_time_cannot_precede_start() {
        let repos = in_memory_repos();
        let rental = repos.rentals().create(rental_dto(1, 10)).await.unwrap();
        let svc = RentalService::new(repos.clone());

        let err = svc
            .update(
                rental.id,
                UpdateRentalDto {
                    end_time: Some(rental.start_time - chrono::Duration::hours(2)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let stored = repos.rentals().find_by_id(rental.id).await.unwrap().unwrap();
        assert_eq!(stored.end_time, rental.end_time);

        let extended = svc
            .update(
                rental.id,
                UpdateRentalDto {
                    end_time: Some(rental.end_time + chrono::Duration::days(1)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(extended.end_time, rental.end_time + chrono::Duration::days(1));
    }
}
