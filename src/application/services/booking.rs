//! Booking: turn a quote into a rental plus its pending payment
//!
//! The rental is created first, then the payment. If the payment cannot be
//! recorded the rental is kept as-is and the outcome carries a warning
//! instead of a payment; nothing is rolled back or retried.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::BookingConfig;
use crate::domain::payment::{CreatePaymentDto, Payment, PaymentStatus};
use crate::domain::rental::{
    calculate_rental_quote, CreateRentalDto, Rental, RentalQuote, RentalStatus, RentalTier,
};
use crate::domain::user::UserRepositoryInterface;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub user_id: i32,
    pub vehicle_id: i32,
    pub tier: RentalTier,
    pub start_time: Option<DateTime<Utc>>,
    pub pickup_city: Option<String>,
    pub pickup_detail: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BookingOutcome {
    pub quote: RentalQuote,
    pub rental: Rental,
    /// `None` when recording the payment failed
    pub payment: Option<Payment>,
    pub warning: Option<String>,
}

pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    config: BookingConfig,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, config: BookingConfig) -> Self {
        Self { repos, config }
    }

    pub async fn book(&self, req: BookingRequest) -> DomainResult<BookingOutcome> {
        self.repos
            .users()
            .get_user_by_id(req.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", req.user_id))?;

        let vehicle = self
            .repos
            .vehicles()
            .find_by_id(req.vehicle_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", req.vehicle_id))?;

        let quote = calculate_rental_quote(&vehicle.pricing_schedule(), req.tier, req.start_time);
        let total_price = quote.total_price.ok_or_else(|| {
            DomainError::Validation(format!(
                "Vehicle {} has no {} price",
                vehicle.id, quote.tier
            ))
        })?;

        let pickup_location = self.pickup_location(req.pickup_city, req.pickup_detail);

        let rental = self
            .repos
            .rentals()
            .create(CreateRentalDto {
                user_id: req.user_id,
                vehicle_id: vehicle.id,
                start_time: quote.start_time,
                end_time: quote.end_time,
                total_price,
                status: RentalStatus::Pending,
                pickup_location: Some(pickup_location),
            })
            .await?;

        metrics::counter!("rentals_booked_total", "tier" => quote.tier.as_str()).increment(1);
        info!(
            rental_id = rental.id,
            user_id = rental.user_id,
            vehicle_id = rental.vehicle_id,
            tier = %quote.tier,
            total_price,
            "Rental booked"
        );

        let payment = self
            .repos
            .payments()
            .create(CreatePaymentDto {
                rental_id: rental.id,
                user_id: rental.user_id,
                amount: total_price,
                payment_method: self.config.default_payment_method.clone(),
                payment_date: Utc::now(),
                status: PaymentStatus::Pending,
            })
            .await;

        let (payment, warning) = match payment {
            Ok(payment) => (Some(payment), None),
            Err(e) => {
                metrics::counter!("booking_payment_failures_total").increment(1);
                warn!(rental_id = rental.id, error = %e, "Rental created but payment could not be recorded");
                (
                    None,
                    Some("Rental created, but the payment could not be recorded".to_string()),
                )
            }
        };

        Ok(BookingOutcome {
            quote,
            rental,
            payment,
            warning,
        })
    }

    /// `"{city} - {detail}"`, or just the city when there is no detail.
    fn pickup_location(&self, city: Option<String>, detail: Option<String>) -> String {
        let city = city
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| self.config.default_pickup_city.clone());
        match detail.filter(|d| !d.trim().is_empty()) {
            Some(detail) => format!("{} - {}", city, detail.trim()),
            None => city,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        customer_dto, in_memory_repos, vehicle_dto, FailingPaymentsProvider,
    };
    use crate::domain::vehicle::CreateVehicleDto;
    use chrono::TimeZone;

    /// Stores a customer and a vehicle; returns `(user_id, vehicle_id)`.
    async fn setup(repos: &Arc<dyn RepositoryProvider>, dto: CreateVehicleDto) -> (i32, i32) {
        let plate = dto.license_plate.clone();
        let user = repos
            .users()
            .create_user(customer_dto(&format!("khach-{}", plate)))
            .await
            .unwrap();
        (user.id, repos.vehicles().create(dto).await.unwrap().id)
    }

    fn request((user_id, vehicle_id): (i32, i32), tier: RentalTier) -> BookingRequest {
        BookingRequest {
            user_id,
            vehicle_id,
            tier,
            start_time: Some(Utc.with_ymd_and_hms(2025, 1, 31, 10, 0, 0).unwrap()),
            pickup_city: None,
            pickup_detail: Some("123 Trần Duy Hưng".into()),
        }
    }

    #[tokio::test]
    async fn books_rental_then_pending_payment() {
        let repos = in_memory_repos();
        let ids = setup(&repos, vehicle_dto("30A-111.11")).await;
        let svc = BookingService::new(repos.clone(), BookingConfig::default());

        let outcome = svc.book(request(ids, RentalTier::Monthly)).await.unwrap();

        assert_eq!(outcome.rental.status, RentalStatus::Pending);
        assert_eq!(outcome.rental.total_price, 15_000_000);
        assert_eq!(
            outcome.rental.end_time,
            Utc.with_ymd_and_hms(2025, 2, 28, 10, 0, 0).unwrap()
        );
        assert_eq!(
            outcome.rental.pickup_location.as_deref(),
            Some("Hà Nội - 123 Trần Duy Hưng")
        );

        let payment = outcome.payment.expect("payment recorded");
        assert_eq!(payment.rental_id, outcome.rental.id);
        assert_eq!(payment.amount, outcome.rental.total_price);
        assert_eq!(payment.payment_method, "Credit Card");
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert!(outcome.warning.is_none());
    }

    #[tokio::test]
    async fn payment_failure_keeps_rental() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(FailingPaymentsProvider::new());
        let ids = setup(&repos, vehicle_dto("30A-222.22")).await;
        let svc = BookingService::new(repos.clone(), BookingConfig::default());

        let outcome = svc.book(request(ids, RentalTier::Daily)).await.unwrap();

        assert!(outcome.payment.is_none());
        assert!(outcome.warning.is_some());
        let stored = repos.rentals().find_by_id(outcome.rental.id).await.unwrap();
        assert_eq!(stored, Some(outcome.rental));
    }

    #[tokio::test]
    async fn missing_tier_price_is_validation_error() {
        let repos = in_memory_repos();
        let ids = setup(
            &repos,
            CreateVehicleDto {
                price_per_year: None,
                ..vehicle_dto("30A-333.33")
            },
        )
        .await;
        let svc = BookingService::new(repos.clone(), BookingConfig::default());

        let err = svc
            .book(request(ids, RentalTier::Yearly))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(repos.rentals().find_by_user(ids.0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_vehicle_is_not_found() {
        let repos = in_memory_repos();
        let (user_id, _) = setup(&repos, vehicle_dto("30A-555.55")).await;
        let svc = BookingService::new(repos, BookingConfig::default());
        assert!(matches!(
            svc.book(request((user_id, 99), RentalTier::Daily)).await,
            Err(DomainError::NotFound { entity: "Vehicle", .. })
        ));
    }

    #[tokio::test]
    async fn unknown_renter_is_not_found_and_books_nothing() {
        let repos = in_memory_repos();
        let (_, vehicle_id) = setup(&repos, vehicle_dto("30A-666.66")).await;
        let svc = BookingService::new(repos.clone(), BookingConfig::default());

        let err = svc
            .book(request((9999, vehicle_id), RentalTier::Daily))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "User", .. }));
        assert!(repos.rentals().find_by_user(9999).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn pickup_defaults_to_city_only() {
        let repos = in_memory_repos();
        let ids = setup(&repos, vehicle_dto("30A-444.44")).await;
        let svc = BookingService::new(repos, BookingConfig::default());

        let outcome = svc
            .book(BookingRequest {
                pickup_city: Some("Đà Nẵng".into()),
                pickup_detail: None,
                ..request(ids, RentalTier::Daily)
            })
            .await
            .unwrap();
        assert_eq!(outcome.rental.pickup_location.as_deref(), Some("Đà Nẵng"));
    }
}
