//! In-memory repositories for development and testing
//!
//! Each aggregate lives in a `DashMap` keyed by id, with an `AtomicI32`
//! handing out ids the way an auto-increment column would.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::payment::{
    CreatePaymentDto, Payment, PaymentFilter, PaymentRepository, UpdatePaymentDto,
};
use crate::domain::rental::{
    CreateRentalDto, Rental, RentalFilter, RentalRepository, UpdateRentalDto,
};
use crate::domain::review::{
    CreateReviewDto, Review, ReviewFilter, ReviewRepository, UpdateReviewDto,
};
use crate::domain::user::{
    CreateUserDto, GetUserDto, UpdateUserDto, User, UserRepositoryInterface,
};
use crate::domain::vehicle::{
    CreateVehicleDto, UpdateVehicleDto, Vehicle, VehicleFilter, VehicleRepository, VehicleSort,
};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::PaginatedResult;

struct Table<T> {
    rows: DashMap<i32, T>,
    counter: AtomicI32,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: DashMap::new(),
            counter: AtomicI32::new(1),
        }
    }

    fn next_id(&self) -> i32 {
        self.counter.fetch_add(1, Ordering::SeqCst)
    }

    fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).map(|r| r.value().clone())
    }

    /// Rows matching `pred`, ordered by id descending.
    fn select(&self, pred: impl Fn(&T) -> bool) -> Vec<(i32, T)> {
        let mut rows: Vec<(i32, T)> = self
            .rows
            .iter()
            .filter(|e| pred(e.value()))
            .map(|e| (*e.key(), e.value().clone()))
            .collect();
        rows.sort_by(|a, b| b.0.cmp(&a.0));
        rows
    }

    fn remove(&self, id: i32) -> bool {
        self.rows.remove(&id).is_some()
    }
}

fn values<T>(rows: Vec<(i32, T)>) -> Vec<T> {
    rows.into_iter().map(|(_, v)| v).collect()
}

// ── Users ───────────────────────────────────────────────────────

pub struct InMemoryUserRepository {
    table: Table<User>,
}

impl InMemoryUserRepository {
    fn is_taken(&self, username: Option<&str>, email: &str, except: Option<i32>) -> bool {
        self.table.rows.iter().any(|u| {
            Some(u.id) != except
                && (u.email == email || username.map_or(false, |name| u.username == name))
        })
    }
}

#[async_trait]
impl UserRepositoryInterface for InMemoryUserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        if self.is_taken(Some(&dto.username), &dto.email, None) {
            return Err(DomainError::Conflict(
                "Username or email already exists".to_string(),
            ));
        }
        let now = Utc::now();
        let user = User {
            id: self.table.next_id(),
            username: dto.username,
            email: dto.email,
            full_name: dto.full_name,
            phone_number: dto.phone_number,
            password_hash: dto.password_hash,
            role: dto.role,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        };
        self.table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list_users(&self, dto: GetUserDto) -> DomainResult<PaginatedResult<User>> {
        let search = dto.search.as_deref().map(str::to_lowercase);
        let mut users = values(self.table.select(|u| {
            let search_ok = search.as_deref().map_or(true, |q| {
                u.username.to_lowercase().contains(q)
                    || u.email.to_lowercase().contains(q)
                    || u.full_name.to_lowercase().contains(q)
            });
            search_ok && dto.role.map_or(true, |r| u.role == r)
        }));

        match dto.sort_by.as_deref() {
            Some("username") => users.sort_by(|a, b| a.username.cmp(&b.username)),
            Some("email") => users.sort_by(|a, b| a.email.cmp(&b.email)),
            Some("full_name") => users.sort_by(|a, b| a.full_name.cmp(&b.full_name)),
            _ => {}
        }

        Ok(dto.page.slice(users))
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        Ok(self
            .table
            .rows
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.value().clone()))
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .table
            .rows
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.value().clone()))
    }

    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        Ok(self.table.get(id))
    }

    async fn count_users(&self) -> DomainResult<u64> {
        Ok(self.table.rows.len() as u64)
    }

    async fn update_user(&self, id: i32, dto: UpdateUserDto) -> DomainResult<Option<User>> {
        let Some(mut user) = self.table.get(id) else {
            return Ok(None);
        };
        if let Some(ref email) = dto.email {
            if self.is_taken(None, email, Some(id)) {
                return Err(DomainError::Conflict(
                    "Username or email already exists".to_string(),
                ));
            }
        }
        dto.apply(&mut user);
        self.table.rows.insert(id, user.clone());
        Ok(Some(user))
    }

    async fn update_user_password(&self, id: i32, new_password_hash: &str) -> DomainResult<()> {
        let mut user = self
            .table
            .rows
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("User", id))?;
        user.password_hash = new_password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn touch_last_login(&self, id: i32) -> DomainResult<()> {
        let mut user = self
            .table
            .rows
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("User", id))?;
        user.last_login_at = Some(Utc::now());
        Ok(())
    }

    async fn delete_user(&self, id: i32) -> DomainResult<bool> {
        Ok(self.table.remove(id))
    }
}

// ── Vehicles ────────────────────────────────────────────────────

pub struct InMemoryVehicleRepository {
    table: Table<Vehicle>,
}

impl InMemoryVehicleRepository {
    fn plate_taken(&self, plate: &str, except: Option<i32>) -> bool {
        self.table
            .rows
            .iter()
            .any(|v| Some(v.id) != except && v.license_plate == plate)
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn create(&self, dto: CreateVehicleDto) -> DomainResult<Vehicle> {
        if self.plate_taken(&dto.license_plate, None) {
            return Err(DomainError::Conflict(
                "License plate already registered".to_string(),
            ));
        }
        let now = Utc::now();
        let vehicle = Vehicle {
            id: self.table.next_id(),
            name: dto.name,
            brand: dto.brand,
            vehicle_type: dto.vehicle_type,
            license_plate: dto.license_plate,
            status: dto.status,
            location_id: dto.location_id,
            price_per_day: dto.price_per_day,
            price_per_month: dto.price_per_month,
            price_per_year: dto.price_per_year,
            image: dto.image,
            pickup_location: dto.pickup_location,
            created_at: now,
            updated_at: now,
        };
        self.table.rows.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>> {
        Ok(self.table.get(id))
    }

    async fn find_by_license_plate(&self, plate: &str) -> DomainResult<Option<Vehicle>> {
        Ok(self
            .table
            .rows
            .iter()
            .find(|v| v.license_plate == plate)
            .map(|v| v.value().clone()))
    }

    async fn list(&self, filter: VehicleFilter) -> DomainResult<PaginatedResult<Vehicle>> {
        let mut vehicles = values(self.table.select(|v| filter.matches(v)));
        match filter.sort {
            VehicleSort::Name => vehicles.sort_by(|a, b| a.name.cmp(&b.name)),
            VehicleSort::PriceAsc => vehicles.sort_by_key(|v| v.price_per_day),
            VehicleSort::PriceDesc => vehicles.sort_by_key(|v| std::cmp::Reverse(v.price_per_day)),
            VehicleSort::Newest => {}
        }
        Ok(filter.page.slice(vehicles))
    }

    async fn update(&self, id: i32, dto: UpdateVehicleDto) -> DomainResult<Option<Vehicle>> {
        let Some(mut vehicle) = self.table.get(id) else {
            return Ok(None);
        };
        if let Some(ref plate) = dto.license_plate {
            if self.plate_taken(plate, Some(id)) {
                return Err(DomainError::Conflict(
                    "License plate already registered".to_string(),
                ));
            }
        }
        dto.apply(&mut vehicle);
        self.table.rows.insert(id, vehicle.clone());
        Ok(Some(vehicle))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        Ok(self.table.remove(id))
    }
}

// ── Rentals ─────────────────────────────────────────────────────

pub struct InMemoryRentalRepository {
    table: Table<Rental>,
}

#[async_trait]
impl RentalRepository for InMemoryRentalRepository {
    async fn create(&self, dto: CreateRentalDto) -> DomainResult<Rental> {
        let now = Utc::now();
        let rental = Rental {
            id: self.table.next_id(),
            user_id: dto.user_id,
            vehicle_id: dto.vehicle_id,
            start_time: dto.start_time,
            end_time: dto.end_time,
            total_price: dto.total_price,
            status: dto.status,
            pickup_location: dto.pickup_location,
            created_at: now,
            updated_at: now,
        };
        self.table.rows.insert(rental.id, rental.clone());
        Ok(rental)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Rental>> {
        Ok(self.table.get(id))
    }

    async fn list(&self, filter: RentalFilter) -> DomainResult<PaginatedResult<Rental>> {
        Ok(filter
            .page
            .slice(values(self.table.select(|r| filter.matches(r)))))
    }

    async fn find_by_user(&self, user_id: i32) -> DomainResult<Vec<Rental>> {
        Ok(values(self.table.select(|r| r.user_id == user_id)))
    }

    async fn update(&self, id: i32, dto: UpdateRentalDto) -> DomainResult<Option<Rental>> {
        let Some(mut rental) = self.table.get(id) else {
            return Ok(None);
        };
        dto.apply(&mut rental);
        self.table.rows.insert(id, rental.clone());
        Ok(Some(rental))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        Ok(self.table.remove(id))
    }
}

// ── Payments ────────────────────────────────────────────────────

pub struct InMemoryPaymentRepository {
    table: Table<Payment>,
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn create(&self, dto: CreatePaymentDto) -> DomainResult<Payment> {
        let now = Utc::now();
        let payment = Payment {
            id: self.table.next_id(),
            rental_id: dto.rental_id,
            user_id: dto.user_id,
            amount: dto.amount,
            payment_method: dto.payment_method,
            payment_date: dto.payment_date,
            status: dto.status,
            created_at: now,
            updated_at: now,
        };
        self.table.rows.insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Payment>> {
        Ok(self.table.get(id))
    }

    async fn find_by_rental(&self, rental_id: i32) -> DomainResult<Vec<Payment>> {
        let mut payments = values(self.table.select(|p| p.rental_id == rental_id));
        payments.reverse();
        Ok(payments)
    }

    async fn list(&self, filter: PaymentFilter) -> DomainResult<PaginatedResult<Payment>> {
        Ok(filter
            .page
            .slice(values(self.table.select(|p| filter.matches(p)))))
    }

    async fn update(&self, id: i32, dto: UpdatePaymentDto) -> DomainResult<Option<Payment>> {
        let Some(mut payment) = self.table.get(id) else {
            return Ok(None);
        };
        dto.apply(&mut payment);
        self.table.rows.insert(id, payment.clone());
        Ok(Some(payment))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        Ok(self.table.remove(id))
    }
}

// ── Reviews ─────────────────────────────────────────────────────

pub struct InMemoryReviewRepository {
    table: Table<Review>,
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn create(&self, dto: CreateReviewDto) -> DomainResult<Review> {
        let now = Utc::now();
        let review = Review {
            id: self.table.next_id(),
            rental_id: dto.rental_id,
            user_id: dto.user_id,
            vehicle_id: dto.vehicle_id,
            rating: dto.rating,
            comment: dto.comment,
            created_at: now,
            updated_at: now,
        };
        self.table.rows.insert(review.id, review.clone());
        Ok(review)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Review>> {
        Ok(self.table.get(id))
    }

    async fn list(&self, filter: ReviewFilter) -> DomainResult<PaginatedResult<Review>> {
        Ok(filter
            .page
            .slice(values(self.table.select(|r| filter.matches(r)))))
    }

    async fn update(&self, id: i32, dto: UpdateReviewDto) -> DomainResult<Option<Review>> {
        let Some(mut review) = self.table.get(id) else {
            return Ok(None);
        };
        dto.apply(&mut review);
        self.table.rows.insert(id, review.clone());
        Ok(Some(review))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        Ok(self.table.remove(id))
    }
}

// ── Provider ────────────────────────────────────────────────────

/// In-memory `RepositoryProvider`. Data is lost when dropped.
pub struct InMemoryRepositoryProvider {
    users: InMemoryUserRepository,
    vehicles: InMemoryVehicleRepository,
    rentals: InMemoryRentalRepository,
    payments: InMemoryPaymentRepository,
    reviews: InMemoryReviewRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            users: InMemoryUserRepository {
                table: Table::new(),
            },
            vehicles: InMemoryVehicleRepository {
                table: Table::new(),
            },
            rentals: InMemoryRentalRepository {
                table: Table::new(),
            },
            payments: InMemoryPaymentRepository {
                table: Table::new(),
            },
            reviews: InMemoryReviewRepository {
                table: Table::new(),
            },
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{UserRole, VehicleStatus};
    use crate::shared::PageRequest;

    fn vehicle(plate: &str, price: i64) -> CreateVehicleDto {
        CreateVehicleDto {
            name: format!("Car {}", plate),
            brand: "Toyota".into(),
            vehicle_type: "Sedan".into(),
            license_plate: plate.into(),
            status: VehicleStatus::Available,
            location_id: 1,
            price_per_day: price,
            price_per_month: None,
            price_per_year: None,
            image: None,
            pickup_location: None,
        }
    }

    #[tokio::test]
    async fn ids_are_sequential() {
        let repos = InMemoryRepositoryProvider::new();
        let a = repos.vehicles().create(vehicle("A", 1)).await.unwrap();
        let b = repos.vehicles().create(vehicle("B", 2)).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn duplicate_plate_is_conflict() {
        let repos = InMemoryRepositoryProvider::new();
        repos.vehicles().create(vehicle("X", 1)).await.unwrap();
        let err = repos.vehicles().create(vehicle("X", 2)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn vehicle_list_sorts_and_paginates() {
        let repos = InMemoryRepositoryProvider::new();
        for (plate, price) in [("A", 300), ("B", 100), ("C", 200)] {
            repos.vehicles().create(vehicle(plate, price)).await.unwrap();
        }
        let page = repos
            .vehicles()
            .list(VehicleFilter {
                sort: VehicleSort::PriceAsc,
                page: PageRequest::new(Some(1), Some(2)),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
        let prices: Vec<i64> = page.items.iter().map(|v| v.price_per_day).collect();
        assert_eq!(prices, vec![100, 200]);
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let repos = InMemoryRepositoryProvider::new();
        let dto = CreateUserDto {
            username: "an".into(),
            email: "an@example.com".into(),
            full_name: "Nguyễn Văn An".into(),
            phone_number: None,
            password_hash: "x".into(),
            role: UserRole::User,
        };
        repos.users().create_user(dto.clone()).await.unwrap();
        let err = repos
            .users()
            .create_user(CreateUserDto {
                username: "an2".into(),
                ..dto
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
