//! Payment DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::payment::{CreatePaymentDto, PaymentFilter, UpdatePaymentDto};
use crate::domain::{DomainError, DomainResult, Payment, PaymentStatus};
use crate::shared::PageRequest;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentDto {
    pub id: i32,
    pub rental_id: i32,
    pub user_id: i32,
    pub amount: i64,
    pub payment_method: String,
    pub payment_date: DateTime<Utc>,
    /// pending, paid, cancelled
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Payment> for PaymentDto {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            rental_id: p.rental_id,
            user_id: p.user_id,
            amount: p.amount,
            payment_method: p.payment_method,
            payment_date: p.payment_date,
            status: p.status.as_str().to_string(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

fn parse_status(s: &str) -> DomainResult<PaymentStatus> {
    PaymentStatus::parse(s)
        .ok_or_else(|| DomainError::Validation(format!("Unknown payment status '{}'", s)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentRequest {
    pub rental_id: i32,
    pub user_id: i32,
    #[validate(range(min = 0, message = "amount must not be negative"))]
    pub amount: i64,
    #[validate(length(min = 1, max = 50, message = "payment_method is required"))]
    pub payment_method: String,
    /// Defaults to now
    pub payment_date: Option<DateTime<Utc>>,
    /// Defaults to `pending`
    pub status: Option<String>,
}

impl CreatePaymentRequest {
    pub fn into_dto(self) -> DomainResult<CreatePaymentDto> {
        Ok(CreatePaymentDto {
            status: match self.status.as_deref() {
                Some(s) => parse_status(s)?,
                None => PaymentStatus::default(),
            },
            rental_id: self.rental_id,
            user_id: self.user_id,
            amount: self.amount,
            payment_method: self.payment_method,
            payment_date: self.payment_date.unwrap_or_else(Utc::now),
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePaymentRequest {
    pub rental_id: Option<i32>,
    pub user_id: Option<i32>,
    #[validate(range(min = 0, message = "amount must not be negative"))]
    pub amount: Option<i64>,
    #[validate(length(min = 1, max = 50))]
    pub payment_method: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

impl UpdatePaymentRequest {
    pub fn into_dto(self) -> DomainResult<UpdatePaymentDto> {
        Ok(UpdatePaymentDto {
            status: self.status.as_deref().map(parse_status).transpose()?,
            rental_id: self.rental_id,
            user_id: self.user_id,
            amount: self.amount,
            payment_method: self.payment_method,
            payment_date: self.payment_date,
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListPaymentsParams {
    pub rental_id: Option<i32>,
    /// Ignored for non-admin callers
    pub user_id: Option<i32>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListPaymentsParams {
    pub fn into_filter(self) -> DomainResult<PaymentFilter> {
        Ok(PaymentFilter {
            rental_id: self.rental_id,
            user_id: self.user_id,
            status: self.status.as_deref().map(parse_status).transpose()?,
            page: PageRequest::new(self.page, self.limit),
        })
    }
}
