//! Payment domain entity

use chrono::{DateTime, Utc};

use crate::shared::{Money, PageRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Cancelled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i32,
    pub rental_id: i32,
    pub user_id: i32,
    pub amount: Money,
    pub payment_method: String,
    pub payment_date: DateTime<Utc>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreatePaymentDto {
    pub rental_id: i32,
    pub user_id: i32,
    pub amount: Money,
    pub payment_method: String,
    pub payment_date: DateTime<Utc>,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePaymentDto {
    pub rental_id: Option<i32>,
    pub user_id: Option<i32>,
    pub amount: Option<Money>,
    pub payment_method: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub status: Option<PaymentStatus>,
}

impl UpdatePaymentDto {
    pub fn apply(self, p: &mut Payment) {
        if let Some(rental_id) = self.rental_id {
            p.rental_id = rental_id;
        }
        if let Some(user_id) = self.user_id {
            p.user_id = user_id;
        }
        if let Some(amount) = self.amount {
            p.amount = amount;
        }
        if let Some(method) = self.payment_method {
            p.payment_method = method;
        }
        if let Some(date) = self.payment_date {
            p.payment_date = date;
        }
        if let Some(status) = self.status {
            p.status = status;
        }
        p.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Default)]
pub struct PaymentFilter {
    pub rental_id: Option<i32>,
    pub user_id: Option<i32>,
    pub status: Option<PaymentStatus>,
    pub page: PageRequest,
}

impl PaymentFilter {
    pub fn matches(&self, p: &Payment) -> bool {
        self.rental_id.map_or(true, |id| p.rental_id == id)
            && self.user_id.map_or(true, |id| p.user_id == id)
            && self.status.map_or(true, |s| p.status == s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_defaults_to_pending() {
        assert_eq!(PaymentStatus::from_str("refunded"), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::from_str("paid"), PaymentStatus::Paid);
    }

    #[test]
    fn update_marks_paid() {
        let now = Utc::now();
        let mut payment = Payment {
            id: 1,
            rental_id: 2,
            user_id: 3,
            amount: 650_000,
            payment_method: "Credit Card".into(),
            payment_date: now,
            status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        UpdatePaymentDto {
            status: Some(PaymentStatus::Paid),
            ..Default::default()
        }
        .apply(&mut payment);
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.amount, 650_000);
    }
}
