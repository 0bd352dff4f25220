//! SeaORM implementation of ReviewRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::db_err;
use crate::domain::review::{
    CreateReviewDto, Review, ReviewFilter, ReviewRepository, UpdateReviewDto,
};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::review;
use crate::shared::PaginatedResult;

pub struct SeaOrmReviewRepository {
    db: DatabaseConnection,
}

impl SeaOrmReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: review::Model) -> Review {
    Review {
        id: m.id,
        rental_id: m.rental_id,
        user_id: m.user_id,
        vehicle_id: m.vehicle_id,
        rating: m.rating,
        comment: m.comment,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl ReviewRepository for SeaOrmReviewRepository {
    async fn create(&self, dto: CreateReviewDto) -> DomainResult<Review> {
        let now = Utc::now();
        let model = review::ActiveModel {
            rental_id: Set(dto.rental_id),
            user_id: Set(dto.user_id),
            vehicle_id: Set(dto.vehicle_id),
            rating: Set(dto.rating),
            comment: Set(dto.comment),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok(model_to_domain(model))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Review>> {
        let model = review::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(&self, filter: ReviewFilter) -> DomainResult<PaginatedResult<Review>> {
        let page = filter.page;
        let mut query = review::Entity::find();

        if let Some(rental_id) = filter.rental_id {
            query = query.filter(review::Column::RentalId.eq(rental_id));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(review::Column::UserId.eq(user_id));
        }
        if let Some(vehicle_id) = filter.vehicle_id {
            query = query.filter(review::Column::VehicleId.eq(vehicle_id));
        }

        let query = query.order_by_desc(review::Column::Id);
        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let models = query
            .offset(page.offset())
            .limit(page.limit as u64)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(PaginatedResult::new(
            models.into_iter().map(model_to_domain).collect(),
            total,
            page.page,
            page.limit,
        ))
    }

    async fn update(&self, id: i32, dto: UpdateReviewDto) -> DomainResult<Option<Review>> {
        let Some(existing) = review::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active: review::ActiveModel = existing.into();
        if let Some(rating) = dto.rating {
            active.rating = Set(rating);
        }
        if let Some(comment) = dto.comment {
            active.comment = Set(comment);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(model_to_domain(updated)))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let result = review::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
