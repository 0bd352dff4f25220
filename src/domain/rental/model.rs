//! Rental domain entity

use chrono::{DateTime, Utc};

use crate::shared::{Money, PageRequest};

/// Rental lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RentalStatus {
    /// Created by a booking, awaiting confirmation
    #[default]
    Pending,
    Confirmed,
    /// Vehicle picked up
    Active,
    Completed,
    Cancelled,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Lossy parse for values read back from storage.
    pub fn from_str(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Completed or cancelled rentals no longer change.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl std::fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rental {
    pub id: i32,
    pub user_id: i32,
    pub vehicle_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_price: Money,
    pub status: RentalStatus,
    pub pickup_location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Rental {
    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }
}

#[derive(Debug, Clone)]
pub struct CreateRentalDto {
    pub user_id: i32,
    pub vehicle_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_price: Money,
    pub status: RentalStatus,
    pub pickup_location: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRentalDto {
    pub status: Option<RentalStatus>,
    pub end_time: Option<DateTime<Utc>>,
    pub total_price: Option<Money>,
    pub pickup_location: Option<String>,
}

impl UpdateRentalDto {
    pub fn apply(self, rental: &mut Rental) {
        if let Some(status) = self.status {
            rental.status = status;
        }
        if let Some(end_time) = self.end_time {
            rental.end_time = end_time;
        }
        if let Some(total_price) = self.total_price {
            rental.total_price = total_price;
        }
        if let Some(pickup_location) = self.pickup_location {
            rental.pickup_location = Some(pickup_location);
        }
        rental.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Default)]
pub struct RentalFilter {
    pub user_id: Option<i32>,
    pub vehicle_id: Option<i32>,
    pub status: Option<RentalStatus>,
    pub page: PageRequest,
}

impl RentalFilter {
    pub fn matches(&self, rental: &Rental) -> bool {
        self.user_id.map_or(true, |id| rental.user_id == id)
            && self.vehicle_id.map_or(true, |id| rental.vehicle_id == id)
            && self.status.map_or(true, |s| rental.status == s)
    }
}
