//! Rental DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::BookingOutcome;
use crate::domain::rental::{RentalFilter, UpdateRentalDto};
use crate::domain::{DomainError, DomainResult, Rental, RentalStatus};
use crate::interfaces::http::modules::payments::PaymentDto;
use crate::interfaces::http::modules::vehicles::QuoteResponse;
use crate::shared::PageRequest;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RentalDto {
    pub id: i32,
    pub user_id: i32,
    pub vehicle_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_price: i64,
    /// pending, confirmed, active, completed, cancelled
    pub status: String,
    pub pickup_location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Rental> for RentalDto {
    fn from(r: Rental) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            vehicle_id: r.vehicle_id,
            start_time: r.start_time,
            end_time: r.end_time,
            total_price: r.total_price,
            status: r.status.as_str().to_string(),
            pickup_location: r.pickup_location,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

fn parse_status(s: &str) -> DomainResult<RentalStatus> {
    RentalStatus::parse(s)
        .ok_or_else(|| DomainError::Validation(format!("Unknown rental status '{}'", s)))
}

/// Booking request. The renter is the caller; admins may book on behalf of `user_id`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRentalRequest {
    pub vehicle_id: i32,
    /// daily (default), monthly or yearly. Unknown values are booked as daily.
    pub tier: Option<String>,
    /// Defaults to now
    pub start_time: Option<DateTime<Utc>>,
    #[validate(length(max = 100))]
    pub pickup_city: Option<String>,
    #[validate(length(max = 255))]
    pub pickup_detail: Option<String>,
    pub user_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub rental: RentalDto,
    /// `null` when the payment could not be recorded
    pub payment: Option<PaymentDto>,
    pub quote: QuoteResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<BookingOutcome> for BookingResponse {
    fn from(outcome: BookingOutcome) -> Self {
        Self {
            quote: QuoteResponse::new(outcome.rental.vehicle_id, outcome.quote),
            rental: outcome.rental.into(),
            payment: outcome.payment.map(PaymentDto::from),
            warning: outcome.warning,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRentalRequest {
    pub status: Option<String>,
    pub end_time: Option<DateTime<Utc>>,
    #[validate(range(min = 0, message = "total_price must not be negative"))]
    pub total_price: Option<i64>,
    #[validate(length(max = 255))]
    pub pickup_location: Option<String>,
}

impl UpdateRentalRequest {
    pub fn into_dto(self) -> DomainResult<UpdateRentalDto> {
        Ok(UpdateRentalDto {
            status: self.status.as_deref().map(parse_status).transpose()?,
            end_time: self.end_time,
            total_price: self.total_price,
            pickup_location: self.pickup_location,
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListRentalsParams {
    /// Ignored for non-admin callers
    pub user_id: Option<i32>,
    pub vehicle_id: Option<i32>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListRentalsParams {
    pub fn into_filter(self) -> DomainResult<RentalFilter> {
        Ok(RentalFilter {
            user_id: self.user_id,
            vehicle_id: self.vehicle_id,
            status: self.status.as_deref().map(parse_status).transpose()?,
            page: PageRequest::new(self.page, self.limit),
        })
    }
}
