//! SeaORM implementation of VehicleRepository

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{db_err, unique_err};
use crate::domain::vehicle::{
    CreateVehicleDto, UpdateVehicleDto, Vehicle, VehicleFilter, VehicleRepository, VehicleSort,
    VehicleStatus,
};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::vehicle;
use crate::shared::PaginatedResult;

pub struct SeaOrmVehicleRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: vehicle::Model) -> Vehicle {
    Vehicle {
        id: m.id,
        name: m.name,
        brand: m.brand,
        vehicle_type: m.vehicle_type,
        license_plate: m.license_plate,
        status: VehicleStatus::from_str(&m.status),
        location_id: m.location_id,
        price_per_day: m.price_per_day,
        price_per_month: m.price_per_month,
        price_per_year: m.price_per_year,
        image: m.image,
        pickup_location: m.pickup_location,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

const DUPLICATE_PLATE: &str = "License plate already registered";

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn create(&self, dto: CreateVehicleDto) -> DomainResult<Vehicle> {
        debug!("Creating vehicle: {}", dto.license_plate);
        let now = Utc::now();

        let model = vehicle::ActiveModel {
            name: Set(dto.name),
            brand: Set(dto.brand),
            vehicle_type: Set(dto.vehicle_type),
            license_plate: Set(dto.license_plate),
            status: Set(dto.status.as_str().to_string()),
            location_id: Set(dto.location_id),
            price_per_day: Set(dto.price_per_day),
            price_per_month: Set(dto.price_per_month),
            price_per_year: Set(dto.price_per_year),
            image: Set(dto.image),
            pickup_location: Set(dto.pickup_location),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(unique_err(DUPLICATE_PLATE))?;

        info!("Vehicle {} created ({})", model.id, model.license_plate);
        Ok(model_to_domain(model))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_license_plate(&self, plate: &str) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find()
            .filter(vehicle::Column::LicensePlate.eq(plate))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn list(&self, filter: VehicleFilter) -> DomainResult<PaginatedResult<Vehicle>> {
        let page = filter.page;
        let mut query = vehicle::Entity::find();

        if let Some(ref search) = filter.search {
            query = query.filter(
                Condition::any()
                    .add(vehicle::Column::Name.contains(search))
                    .add(vehicle::Column::Brand.contains(search))
                    .add(vehicle::Column::LicensePlate.contains(search)),
            );
        }
        if let Some(status) = filter.status {
            query = query.filter(vehicle::Column::Status.eq(status.as_str()));
        }
        if let Some(ref vehicle_type) = filter.vehicle_type {
            query = query.filter(vehicle::Column::VehicleType.eq(vehicle_type.as_str()));
        }

        query = match filter.sort {
            VehicleSort::Name => query.order_by_asc(vehicle::Column::Name),
            VehicleSort::PriceAsc => query.order_by_asc(vehicle::Column::PricePerDay),
            VehicleSort::PriceDesc => query.order_by_desc(vehicle::Column::PricePerDay),
            VehicleSort::Newest => query.order_by_desc(vehicle::Column::Id),
        };

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

    async fn update(&self, id: i32, dto: UpdateVehicleDto) -> DomainResult<Option<Vehicle>> {
        debug!("Updating vehicle: {}", id);

        let Some(existing) = vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut domain = model_to_domain(existing.clone());
        dto.apply(&mut domain);

        let mut active: vehicle::ActiveModel = existing.into();
        active.name = Set(domain.name);
        active.brand = Set(domain.brand);
        active.vehicle_type = Set(domain.vehicle_type);
        active.license_plate = Set(domain.license_plate);
        active.status = Set(domain.status.as_str().to_string());
        active.location_id = Set(domain.location_id);
        active.price_per_day = Set(domain.price_per_day);
        active.price_per_month = Set(domain.price_per_month);
        active.price_per_year = Set(domain.price_per_year);
        active.image = Set(domain.image);
        active.pickup_location = Set(domain.pickup_location);
        active.updated_at = Set(domain.updated_at);

        let updated = active
            .update(&self.db)
            .await
            .map_err(unique_err(DUPLICATE_PLATE))?;
        Ok(Some(model_to_domain(updated)))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let result = vehicle::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}
