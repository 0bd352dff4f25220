use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::BillingItem;
use crate::interfaces::http::modules::payments::PaymentDto;
use crate::interfaces::http::modules::rentals::RentalDto;

/// A rental and the first payment recorded for it
#[derive(Debug, Serialize, ToSchema)]
pub struct BillingItemDto {
    pub rental: RentalDto,
    pub payment: Option<PaymentDto>,
}

impl From<BillingItem> for BillingItemDto {
    fn from(item: BillingItem) -> Self {
        Self {
            rental: item.rental.into(),
            payment: item.payment.map(PaymentDto::from),
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BillingParams {
    /// Defaults to the caller
    pub user_id: Option<i32>,
}
