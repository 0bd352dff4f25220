//! Fleet management and public quotes

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::info;

use crate::domain::rental::{calculate_rental_quote, RentalFilter, RentalQuote, RentalTier};
use crate::domain::vehicle::{CreateVehicleDto, UpdateVehicleDto, Vehicle, VehicleFilter};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::{validate_price, Money, PageRequest, PaginatedResult};

pub struct VehicleService {
    repos: Arc<dyn RepositoryProvider>,
}

impl VehicleService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn list(&self, filter: VehicleFilter) -> DomainResult<PaginatedResult<Vehicle>> {
        self.repos.vehicles().list(filter).await
    }

    pub async fn get(&self, id: i32) -> DomainResult<Vehicle> {
        self.repos
            .vehicles()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", id))
    }

    pub async fn create(&self, dto: CreateVehicleDto) -> DomainResult<Vehicle> {
        if dto.name.trim().is_empty() || dto.license_plate.trim().is_empty() {
            return Err(DomainError::Validation(
                "Name and license plate are required".into(),
            ));
        }
        check_prices(
            [Some(dto.price_per_day), dto.price_per_month, dto.price_per_year]
                .into_iter()
                .flatten(),
        )?;

        let vehicle = self.repos.vehicles().create(dto).await?;
        info!("Vehicle {} added to fleet", vehicle.id);
        Ok(vehicle)
    }

    pub async fn update(&self, id: i32, dto: UpdateVehicleDto) -> DomainResult<Vehicle> {
        check_prices(dto.prices())?;
        self.repos
            .vehicles()
            .update(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", id))
    }

    /// Vehicles with rental history cannot be removed; retire them through
    /// their status instead.
    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        let rentals = self
            .repos
            .rentals()
            .list(RentalFilter {
                vehicle_id: Some(id),
                page: PageRequest::new(Some(1), Some(1)),
                ..Default::default()
            })
            .await?;
        if rentals.total > 0 {
            return Err(DomainError::Conflict(format!(
                "Vehicle {} has {} rental(s) and cannot be deleted",
                id, rentals.total
            )));
        }
        if !self.repos.vehicles().delete(id).await? {
            return Err(DomainError::not_found("Vehicle", id));
        }
        info!("Vehicle {} removed from fleet", id);
        Ok(())
    }

    /// Price preview for renting `id` on `tier`
    pub async fn quote(
        &self,
        id: i32,
        tier: RentalTier,
        start: Option<DateTime<Utc>>,
    ) -> DomainResult<(Vehicle, RentalQuote)> {
        let vehicle = self.get(id).await?;
        let quote = calculate_rental_quote(&vehicle.pricing_schedule(), tier, start);
        Ok((vehicle, quote))
    }
}

fn check_prices(prices: impl IntoIterator<Item = Money>) -> DomainResult<()> {
    for price in prices {
        validate_price(price)
            .map_err(|_| DomainError::Validation("Prices must not be negative".into()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{in_memory_repos, rental_dto, vehicle_dto};
    use chrono::TimeZone;

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let svc = VehicleService::new(in_memory_repos());
        let dto = CreateVehicleDto {
            price_per_month: Some(-1),
            ..vehicle_dto("51F-000.01")
        };
        assert!(matches!(
            svc.create(dto).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn update_rejects_negative_price() {
        let svc = VehicleService::new(in_memory_repos());
        let v = svc.create(vehicle_dto("51F-000.02")).await.unwrap();
        let err = svc
            .update(
                v.id,
                UpdateVehicleDto {
                    price_per_day: Some(-5),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn quote_uses_stored_schedule() {
        let svc = VehicleService::new(in_memory_repos());
        let v = svc.create(vehicle_dto("51F-000.03")).await.unwrap();
        let start = Utc.with_ymd_and_hms(2025, 1, 31, 10, 0, 0).unwrap();

        let (_, quote) = svc.quote(v.id, RentalTier::Monthly, Some(start)).await.unwrap();
        assert_eq!(quote.total_price, Some(15_000_000));
        assert_eq!(
            quote.end_time,
            Utc.with_ymd_and_hms(2025, 2, 28, 10, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn quote_for_missing_vehicle_is_not_found() {
        let svc = VehicleService::new(in_memory_repos());
        assert!(matches!(
            svc.quote(404, RentalTier::Daily, None).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let svc = VehicleService::new(in_memory_repos());
        let v = svc.create(vehicle_dto("51F-000.04")).await.unwrap();
        svc.delete(v.id).await.unwrap();
        assert!(matches!(
            svc.delete(v.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn vehicle_with_rentals_is_kept() {
        let repos = in_memory_repos();
        let svc = VehicleService::new(repos.clone());
        let rented = svc.create(vehicle_dto("51F-777.01")).await.unwrap();
        let idle = svc.create(vehicle_dto("51F-777.02")).await.unwrap();
        repos.rentals().create(rental_dto(1, rented.id)).await.unwrap();

        assert!(matches!(
            svc.delete(rented.id).await,
            Err(DomainError::Conflict(_))
        ));
        assert!(svc.get(rented.id).await.is_ok());

        svc.delete(idle.id).await.unwrap();
        assert!(matches!(
            svc.delete(idle.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
