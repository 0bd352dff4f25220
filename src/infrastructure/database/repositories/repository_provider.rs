//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::payment::PaymentRepository;
use crate::domain::rental::RentalRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::review::ReviewRepository;
use crate::domain::user::UserRepositoryInterface;
use crate::domain::vehicle::VehicleRepository;

use super::payment_repository::SeaOrmPaymentRepository;
use super::rental_repository::SeaOrmRentalRepository;
use super::review_repository::SeaOrmReviewRepository;
use super::user_repository::SeaOrmUserRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    vehicles: SeaOrmVehicleRepository,
    rentals: SeaOrmRentalRepository,
    payments: SeaOrmPaymentRepository,
    reviews: SeaOrmReviewRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            rentals: SeaOrmRentalRepository::new(db.clone()),
            payments: SeaOrmPaymentRepository::new(db.clone()),
            reviews: SeaOrmReviewRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepositoryInterface {
        &self.users
    }

    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn rentals(&self) -> &dyn RentalRepository {
        &self.rentals
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }

    fn reviews(&self) -> &dyn ReviewRepository {
        &self.reviews
    }
}
