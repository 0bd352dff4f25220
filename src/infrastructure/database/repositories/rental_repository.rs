//! SeaORM implementation of RentalRepository

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use super::db_err;
use crate::domain::rental::{
    CreateRentalDto, Rental, RentalFilter, RentalRepository, RentalStatus, UpdateRentalDto,
};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::rental;
use crate::shared::PaginatedResult;

pub struct SeaOrmRentalRepository {
    db: DatabaseConnection,
}

impl SeaOrmRentalRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: rental::Model) -> Rental {
    Rental {
        id: m.id,
        user_id: m.user_id,
        vehicle_id: m.vehicle_id,
        start_time: m.start_time,
        end_time: m.end_time,
        total_price: m.total_price,
        status: RentalStatus::from_str(&m.status),
        pickup_location: m.pickup_location,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

#[async_trait]
impl RentalRepository for SeaOrmRentalRepository {
    async fn create(&self, dto: CreateRentalDto) -> DomainResult<Rental> {
        debug!(
            "Creating rental: user={} vehicle={}",
            dto.user_id, dto.vehicle_id
        );
        let now = Utc::now();

        let model = rental::ActiveModel {
            user_id: Set(dto.user_id),
            vehicle_id: Set(dto.vehicle_id),
            start_time: Set(dto.start_time),
            end_time: Set(dto.end_time),
            total_price: Set(dto.total_price),
            status: Set(dto.status.as_str().to_string()),
            pickup_location: Set(dto.pickup_location),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        Ok(model_to_domain(model))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Rental>> {
        let model = rental::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(&self, filter: RentalFilter) -> DomainResult<PaginatedResult<Rental>> {
        let page = filter.page;
        let mut query = rental::Entity::find();

        if let Some(user_id) = filter.user_id {
            query = query.filter(rental::Column::UserId.eq(user_id));
        }
        if let Some(vehicle_id) = filter.vehicle_id {
            query = query.filter(rental::Column::VehicleId.eq(vehicle_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(rental::Column::Status.eq(status.as_str()));
        }

        let query = query.order_by_desc(rental::Column::Id);
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

    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<Rental>> {
        let models = rental::Entity::find()
            .filter(rental::Column::UserId.eq(user_id))
            .order_by_desc(rental::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, id: i32, dto: UpdateRentalDto) -> DomainResult<Option<Rental>> {
        debug!("Updating rental: {}", id);

        let Some(existing) = rental::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active: rental::ActiveModel = existing.into();
        if let Some(status) = dto.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(end_time) = dto.end_time {
            active.end_time = Set(end_time);
        }
        if let Some(total_price) = dto.total_price {
            active.total_price = Set(total_price);
        }
        if let Some(pickup_location) = dto.pickup_location {
            active.pickup_location = Set(Some(pickup_location));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(Some(model_to_domain(updated)))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let result = rental::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
