//! Fixtures shared by the service tests

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};

use crate::domain::payment::{CreatePaymentDto, Payment, PaymentFilter, PaymentRepository, UpdatePaymentDto};
use crate::domain::rental::{CreateRentalDto, RentalRepository, RentalStatus};
use crate::domain::review::ReviewRepository;
use crate::domain::user::{CreateUserDto, UserRepositoryInterface};
use crate::domain::vehicle::{CreateVehicleDto, VehicleRepository, VehicleStatus};
use crate::domain::{DomainError, DomainResult, RepositoryProvider, UserRole};
use crate::infrastructure::crypto::jwt::{JwtConfig, TOKEN_ISSUER};
use crate::infrastructure::InMemoryRepositoryProvider;
use crate::shared::PaginatedResult;

pub fn in_memory_repos() -> Arc<dyn RepositoryProvider> {
    Arc::new(InMemoryRepositoryProvider::new())
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".into(),
        expiration_hours: 1,
        issuer: TOKEN_ISSUER.into(),
    }
}

pub fn vehicle_dto(plate: &str) -> CreateVehicleDto {
    CreateVehicleDto {
        name: "VinFast VF8".into(),
        brand: "VinFast".into(),
        vehicle_type: "SUV".into(),
        license_plate: plate.into(),
        status: VehicleStatus::Available,
        location_id: 1,
        price_per_day: 650_000,
        price_per_month: Some(15_000_000),
        price_per_year: Some(150_000_000),
        image: None,
        pickup_location: None,
    }
}

/// Regular customer account with a placeholder password hash.
pub fn customer_dto(username: &str) -> CreateUserDto {
    CreateUserDto {
        username: username.into(),
        email: format!("{}@example.com", username),
        full_name: username.into(),
        phone_number: None,
        password_hash: "not-a-real-hash".into(),
        role: UserRole::User,
    }
}

/// A one-day pending rental, not tied to any stored vehicle.
pub fn rental_dto(user_id: i32, vehicle_id: i32) -> CreateRentalDto {
    let start = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
    CreateRentalDto {
        user_id,
        vehicle_id,
        start_time: start,
        end_time: start + Duration::days(1),
        total_price: 650_000,
        status: RentalStatus::Pending,
        pickup_location: Some("Hà Nội".into()),
    }
}

/// In-memory provider whose payment store is always down.
pub struct FailingPaymentsProvider {
    inner: InMemoryRepositoryProvider,
    payments: FailingPayments,
}

impl FailingPaymentsProvider {
    pub fn new() -> Self {
        Self {
            inner: InMemoryRepositoryProvider::new(),
            payments: FailingPayments,
        }
    }
}

impl RepositoryProvider for FailingPaymentsProvider {
    fn users(&self) -> &dyn UserRepositoryInterface {
        self.inner.users()
    }

    fn vehicles(&self) -> &dyn VehicleRepository {
        self.inner.vehicles()
    }

    fn rentals(&self) -> &dyn RentalRepository {
        self.inner.rentals()
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }

    fn reviews(&self) -> &dyn ReviewRepository {
        self.inner.reviews()
    }
}

struct FailingPayments;

fn down<T>() -> DomainResult<T> {
    Err(DomainError::Storage("payments table unavailable".into()))
}

#[async_trait]
impl PaymentRepository for FailingPayments {
    async fn create(&self, _dto: CreatePaymentDto) -> DomainResult<Payment> {
        down()
    }

    async fn find_by_id(&self, _id: i32) -> DomainResult<Option<Payment>> {
        down()
    }

    async fn find_by_rental(&self, _rental_id: i32) -> DomainResult<Vec<Payment>> {
        down()
    }

    async fn list(&self, _filter: PaymentFilter) -> DomainResult<PaginatedResult<Payment>> {
        down()
    }

    async fn update(&self, _id: i32, _dto: UpdatePaymentDto) -> DomainResult<Option<Payment>> {
        down()
    }

    async fn delete(&self, _id: i32) -> DomainResult<bool> {
        down()
    }
}
