use async_trait::async_trait;

use super::model::{CreateVehicleDto, UpdateVehicleDto, Vehicle, VehicleFilter};
use crate::domain::DomainResult;
use crate::shared::PaginatedResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, dto: CreateVehicleDto) -> DomainResult<Vehicle>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>>;
    async fn find_by_license_plate(&self, plate: &str) -> DomainResult<Option<Vehicle>>;

    async fn list(&self, filter: VehicleFilter) -> DomainResult<PaginatedResult<Vehicle>>;

    async fn update(&self, id: i32, dto: UpdateVehicleDto) -> DomainResult<Option<Vehicle>>;
    async fn delete(&self, id: i32) -> DomainResult<bool>;
}
