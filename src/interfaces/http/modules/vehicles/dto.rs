//! Vehicle DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::vehicle::{CreateVehicleDto, UpdateVehicleDto, VehicleFilter, VehicleSort};
use crate::domain::{DomainError, DomainResult, RentalQuote, Vehicle, VehicleStatus};
use crate::shared::{format_vnd, PageRequest};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VehicleDto {
    pub id: i32,
    pub name: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
    pub license_plate: String,
    /// available, unavailable, maintenance, rented, expired
    pub status: String,
    pub location_id: i32,
    pub price_per_day: i64,
    pub price_per_month: Option<i64>,
    pub price_per_year: Option<i64>,
    pub image: Option<String>,
    pub pickup_location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            name: v.name,
            brand: v.brand,
            vehicle_type: v.vehicle_type,
            license_plate: v.license_plate,
            status: v.status.as_str().to_string(),
            location_id: v.location_id,
            price_per_day: v.price_per_day,
            price_per_month: v.price_per_month,
            price_per_year: v.price_per_year,
            image: v.image,
            pickup_location: v.pickup_location,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

fn parse_status(s: &str) -> DomainResult<VehicleStatus> {
    VehicleStatus::parse(s)
        .ok_or_else(|| DomainError::Validation(format!("Unknown vehicle status '{}'", s)))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "brand is required"))]
    pub brand: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50, message = "type is required"))]
    pub vehicle_type: String,
    #[validate(length(min = 1, max = 20, message = "license_plate is required"))]
    pub license_plate: String,
    /// Defaults to `available`
    pub status: Option<String>,
    pub location_id: i32,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price_per_day: i64,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price_per_month: Option<i64>,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price_per_year: Option<i64>,
    pub image: Option<String>,
    pub pickup_location: Option<String>,
}

impl CreateVehicleRequest {
    pub fn into_dto(self) -> DomainResult<CreateVehicleDto> {
        let status = match self.status.as_deref() {
            Some(s) => parse_status(s)?,
            None => VehicleStatus::default(),
        };
        Ok(CreateVehicleDto {
            name: self.name,
            brand: self.brand,
            vehicle_type: self.vehicle_type,
            license_plate: self.license_plate,
            status,
            location_id: self.location_id,
            price_per_day: self.price_per_day,
            price_per_month: self.price_per_month,
            price_per_year: self.price_per_year,
            image: self.image,
            pickup_location: self.pickup_location,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50))]
    pub vehicle_type: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub license_plate: Option<String>,
    pub status: Option<String>,
    pub location_id: Option<i32>,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price_per_day: Option<i64>,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price_per_month: Option<i64>,
    #[validate(range(min = 0, message = "price must not be negative"))]
    pub price_per_year: Option<i64>,
    pub image: Option<String>,
    pub pickup_location: Option<String>,
}

impl UpdateVehicleRequest {
    pub fn into_dto(self) -> DomainResult<UpdateVehicleDto> {
        Ok(UpdateVehicleDto {
            status: self.status.as_deref().map(parse_status).transpose()?,
            name: self.name,
            brand: self.brand,
            vehicle_type: self.vehicle_type,
            license_plate: self.license_plate,
            location_id: self.location_id,
            price_per_day: self.price_per_day,
            price_per_month: self.price_per_month,
            price_per_year: self.price_per_year,
            image: self.image,
            pickup_location: self.pickup_location,
        })
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListVehiclesParams {
    /// Matches name, brand or license plate
    pub search: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    /// newest (default), name, price_asc, price_desc
    pub sort_by: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListVehiclesParams {
    pub fn into_filter(self) -> DomainResult<VehicleFilter> {
        Ok(VehicleFilter {
            status: self.status.as_deref().map(parse_status).transpose()?,
            search: self.search.filter(|s| !s.trim().is_empty()),
            vehicle_type: self.vehicle_type,
            sort: self
                .sort_by
                .as_deref()
                .map(VehicleSort::from_str)
                .unwrap_or_default(),
            page: PageRequest::new(self.page, self.limit),
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct QuoteRequest {
    /// daily (default), monthly or yearly. Unknown values are quoted as daily.
    pub tier: Option<String>,
    /// Defaults to now
    pub start_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteResponse {
    pub vehicle_id: i32,
    pub tier: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// `null` when the vehicle has no price for the tier
    pub total_price: Option<i64>,
    /// e.g. `650.000 ₫`
    pub formatted_price: Option<String>,
}

impl QuoteResponse {
    pub fn new(vehicle_id: i32, quote: RentalQuote) -> Self {
        Self {
            vehicle_id,
            tier: quote.tier.as_str().to_string(),
            start_time: quote.start_time,
            end_time: quote.end_time,
            total_price: quote.total_price,
            formatted_price: quote.total_price.map(format_vnd),
        }
    }
}
