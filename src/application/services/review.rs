use std::sync::Arc;

use log::info;

use crate::application::Actor;
use crate::domain::review::{
    validate_review, CreateReviewDto, Review, ReviewFilter, UpdateReviewDto,
};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::PaginatedResult;

pub struct ReviewService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ReviewService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self, filter: ReviewFilter) -> DomainResult<PaginatedResult<Review>> {
        self.repos.reviews().list(filter).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Review> {
        self.repos
            .reviews()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Review", id))
    }

    /// Review a rental. Only the renter (or an admin) may review it.
    pub async fn create(
        &self,
        actor: Actor,
        rental_id: i32,
        rating: i32,
        comment: String,
    ) -> DomainResult<Review> {
        validate_review(Some(rating), Some(&comment))?;

        let rental = self
            .repos
            .rentals()
            .find_by_id(rental_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Rental", rental_id))?;
        actor.ensure_can_access(rental.user_id)?;

        let review = self
            .repos
            .reviews()
            .create(CreateReviewDto {
                rental_id,
                user_id: rental.user_id,
                vehicle_id: rental.vehicle_id,
                rating,
                comment: comment.trim().to_string(),
            })
            .await?;
        info!("Review {} added for rental {}", review.id, rental_id);
        Ok(review)
    }

    pub async fn update(&self, actor: Actor, id: i32, dto: UpdateReviewDto) -> DomainResult<Review> {
        validate_review(dto.rating, dto.comment.as_deref())?;
        let existing = self.get(id).await?;
        actor.ensure_can_access(existing.user_id)?;

        self.repos
            .reviews()
            .update(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("Review", id))
    }

    pub async fn delete(&self, actor: Actor, id: i32) -> DomainResult<()> {
        let existing = self.get(id).await?;
        actor.ensure_can_access(existing.user_id)?;
        self.repos.reviews().delete(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{in_memory_repos, rental_dto};
    use crate::domain::UserRole;

    const COMMENT: &str = "Xe sạch sẽ, chạy êm";

    #[tokio::test]
    async fn renter_can_review_and_vehicle_is_recorded() {
        let repos = in_memory_repos();
        let rental = repos.rentals().create(rental_dto(1, 42)).await.unwrap();
        let svc = ReviewService::new(repos);

        let review = svc
            .create(Actor::new(1, UserRole::User), rental.id, 5, COMMENT.into())
            .await
            .unwrap();
        assert_eq!(review.vehicle_id, 42);

        let by_vehicle = svc
            .list(ReviewFilter {
                vehicle_id: Some(42),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_vehicle.total, 1);
    }

    #[tokio::test]
    async fn other_users_cannot_review_or_edit() {
        let repos = in_memory_repos();
        let rental = repos.rentals().create(rental_dto(1, 42)).await.unwrap();
        let svc = ReviewService::new(repos);

        assert!(matches!(
            svc.create(Actor::new(2, UserRole::User), rental.id, 4, COMMENT.into())
                .await,
            Err(DomainError::Forbidden(_))
        ));

        let review = svc
            .create(Actor::new(1, UserRole::User), rental.id, 4, COMMENT.into())
            .await
            .unwrap();
        assert!(matches!(
            svc.delete(Actor::new(2, UserRole::User), review.id).await,
            Err(DomainError::Forbidden(_))
        ));
        svc.delete(Actor::new(9, UserRole::Admin), review.id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn invalid_rating_or_comment_is_rejected() {
        let repos = in_memory_repos();
        let rental = repos.rentals().create(rental_dto(1, 42)).await.unwrap();
        let svc = ReviewService::new(repos);
        let actor = Actor::new(1, UserRole::User);

        assert!(matches!(
            svc.create(actor, rental.id, 6, COMMENT.into()).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            svc.create(actor, rental.id, 3, "ok".into()).await,
            Err(DomainError::Validation(_))
        ));
    }
}
