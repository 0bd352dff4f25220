//! Vehicle domain entity

use chrono::{DateTime, Utc};

use crate::domain::rental::PricingSchedule;
use crate::shared::{Money, PageRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VehicleStatus {
    #[default]
    Available,
    Unavailable,
    Maintenance,
    Rented,
    /// Registration or insurance lapsed
    Expired,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
            Self::Maintenance => "maintenance",
            Self::Rented => "rented",
            Self::Expired => "expired",
        }
    }

    pub fn from_str(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(Self::Available),
            "unavailable" => Some(Self::Unavailable),
            "maintenance" => Some(Self::Maintenance),
            "rented" => Some(Self::Rented),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: i32,
    pub name: String,
    pub brand: String,
    /// Free-form category, e.g. "SUV", "Sedan"
    pub vehicle_type: String,
    pub license_plate: String,
    pub status: VehicleStatus,
    pub location_id: i32,
    pub price_per_day: Money,
    pub price_per_month: Option<Money>,
    pub price_per_year: Option<Money>,
    pub image: Option<String>,
    pub pickup_location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn pricing_schedule(&self) -> PricingSchedule {
        PricingSchedule {
            price_per_day: self.price_per_day,
            price_per_month: self.price_per_month,
            price_per_year: self.price_per_year,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateVehicleDto {
    pub name: String,
    pub brand: String,
    pub vehicle_type: String,
    pub license_plate: String,
    pub status: VehicleStatus,
    pub location_id: i32,
    pub price_per_day: Money,
    pub price_per_month: Option<Money>,
    pub price_per_year: Option<Money>,
    pub image: Option<String>,
    pub pickup_location: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateVehicleDto {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub vehicle_type: Option<String>,
    pub license_plate: Option<String>,
    pub status: Option<VehicleStatus>,
    pub location_id: Option<i32>,
    pub price_per_day: Option<Money>,
    pub price_per_month: Option<Money>,
    pub price_per_year: Option<Money>,
    pub image: Option<String>,
    pub pickup_location: Option<String>,
}

impl UpdateVehicleDto {
    pub fn apply(self, v: &mut Vehicle) {
        if let Some(name) = self.name {
            v.name = name;
        }
        if let Some(brand) = self.brand {
            v.brand = brand;
        }
        if let Some(vehicle_type) = self.vehicle_type {
            v.vehicle_type = vehicle_type;
        }
        if let Some(plate) = self.license_plate {
            v.license_plate = plate;
        }
        if let Some(status) = self.status {
            v.status = status;
        }
        if let Some(location_id) = self.location_id {
            v.location_id = location_id;
        }
        if let Some(price) = self.price_per_day {
            v.price_per_day = price;
        }
        if let Some(price) = self.price_per_month {
            v.price_per_month = Some(price);
        }
        if let Some(price) = self.price_per_year {
            v.price_per_year = Some(price);
        }
        if let Some(image) = self.image {
            v.image = Some(image);
        }
        if let Some(pickup) = self.pickup_location {
            v.pickup_location = Some(pickup);
        }
        v.updated_at = Utc::now();
    }

    /// Prices present in this update
    pub fn prices(&self) -> impl Iterator<Item = Money> + '_ {
        [self.price_per_day, self.price_per_month, self.price_per_year]
            .into_iter()
            .flatten()
    }
}

/// Vehicle sort keys accepted by list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VehicleSort {
    #[default]
    Newest,
    Name,
    PriceAsc,
    PriceDesc,
}

impl VehicleSort {
    pub fn from_str(s: &str) -> Self {
        match s {
            "name" => Self::Name,
            "price_asc" | "price" => Self::PriceAsc,
            "price_desc" => Self::PriceDesc,
            _ => Self::Newest,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VehicleFilter {
    /// Case-insensitive match on name, brand or license plate
    pub search: Option<String>,
    pub status: Option<VehicleStatus>,
    pub vehicle_type: Option<String>,
    pub sort: VehicleSort,
    pub page: PageRequest,
}

impl VehicleFilter {
    pub fn matches(&self, v: &Vehicle) -> bool {
        let search_ok = self.search.as_deref().map_or(true, |q| {
            let q = q.to_lowercase();
            v.name.to_lowercase().contains(&q)
                || v.brand.to_lowercase().contains(&q)
                || v.license_plate.to_lowercase().contains(&q)
        });
        let type_ok = self
            .vehicle_type
            .as_deref()
            .map_or(true, |t| v.vehicle_type == t);

        search_ok && type_ok && self.status.map_or(true, |s| v.status == s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vehicle {
        let now = Utc::now();
        Vehicle {
            id: 1,
            name: "VinFast VF8".into(),
            brand: "VinFast".into(),
            vehicle_type: "SUV".into(),
            license_plate: "30A-123.45".into(),
            status: VehicleStatus::Available,
            location_id: 1,
            price_per_day: 650_000,
            price_per_month: Some(15_000_000),
            price_per_year: None,
            image: None,
            pickup_location: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn unknown_status_defaults_to_available() {
        assert_eq!(VehicleStatus::from_str("scrapped"), VehicleStatus::Available);
        assert_eq!(VehicleStatus::from_str("maintenance"), VehicleStatus::Maintenance);
    }

    #[test]
    fn pricing_schedule_mirrors_vehicle_prices() {
        let schedule = sample().pricing_schedule();
        assert_eq!(schedule.price_per_day, 650_000);
        assert_eq!(schedule.price_per_month, Some(15_000_000));
        assert_eq!(schedule.price_per_year, None);
    }

    #[test]
    fn search_matches_brand_and_plate() {
        let v = sample();
        let by_brand = VehicleFilter {
            search: Some("vinfast".into()),
            ..Default::default()
        };
        let by_plate = VehicleFilter {
            search: Some("30a".into()),
            ..Default::default()
        };
        let miss = VehicleFilter {
            search: Some("toyota".into()),
            ..Default::default()
        };
        assert!(by_brand.matches(&v));
        assert!(by_plate.matches(&v));
        assert!(!miss.matches(&v));
    }

    #[test]
    fn update_keeps_unset_prices() {
        let mut v = sample();
        UpdateVehicleDto {
            price_per_year: Some(150_000_000),
            ..Default::default()
        }
        .apply(&mut v);
        assert_eq!(v.price_per_year, Some(150_000_000));
        assert_eq!(v.price_per_month, Some(15_000_000));
    }
}
