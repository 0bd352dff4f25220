//! Rental quote calculation
//!
//! Maps a rental tier to a rental period and its price. The calculation is
//! pure: given the same schedule, tier and explicit start it always returns
//! the same quote.
//!
//! # Calendar arithmetic
//!
//! Monthly and yearly tiers add whole calendar months. When the target month
//! is shorter than the start day, the end date is clamped to the last day of
//! that month (Jan 31 + 1 month = Feb 28 or 29, Feb 29 + 1 year = Feb 28).
//! The time of day is kept.

use chrono::{DateTime, Days, Months, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::shared::Money;

/// Billing granularity of a rental
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalTier {
    #[default]
    Daily,
    Monthly,
    Yearly,
}

impl RentalTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Strict parse, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }

    /// Lossy parse used at the API boundary: anything unrecognised is
    /// treated as a daily rental.
    pub fn parse_or_daily(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            warn!(tier = s, "Unknown rental tier, falling back to daily");
            Self::Daily
        })
    }

    /// End of a rental period starting at `start`.
    /// Saturates at the largest representable timestamp.
    pub fn end_time(&self, start: DateTime<Utc>) -> DateTime<Utc> {
        let end = match self {
            Self::Daily => start.checked_add_days(Days::new(1)),
            Self::Monthly => start.checked_add_months(Months::new(1)),
            Self::Yearly => start.checked_add_months(Months::new(12)),
        };
        end.unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

impl std::fmt::Display for RentalTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-tier prices of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSchedule {
    pub price_per_day: Money,
    pub price_per_month: Option<Money>,
    pub price_per_year: Option<Money>,
}

impl PricingSchedule {
    pub fn price_for(&self, tier: RentalTier) -> Option<Money> {
        match tier {
            RentalTier::Daily => Some(self.price_per_day),
            RentalTier::Monthly => self.price_per_month,
            RentalTier::Yearly => self.price_per_year,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RentalQuote {
    pub tier: RentalTier,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// `None` when the schedule has no price for the tier
    pub total_price: Option<Money>,
}

/// Compute the rental period and price for `tier`.
///
/// `start` defaults to the current time. Prices are taken as-is from the
/// schedule: no proration, tax or discount is applied.
pub fn calculate_rental_quote(
    schedule: &PricingSchedule,
    tier: RentalTier,
    start: Option<DateTime<Utc>>,
) -> RentalQuote {
    let start_time = start.unwrap_or_else(Utc::now);

    RentalQuote {
        tier,
        start_time,
        end_time: tier.end_time(start_time),
        total_price: schedule.price_for(tier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn schedule() -> PricingSchedule {
        PricingSchedule {
            price_per_day: 650_000,
            price_per_month: Some(15_000_000),
            price_per_year: Some(150_000_000),
        }
    }

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn daily_adds_one_day() {
        let start = utc(2025, 3, 10, 9);
        let quote = calculate_rental_quote(&schedule(), RentalTier::Daily, Some(start));
        assert_eq!(quote.start_time, start);
        assert_eq!(quote.end_time, utc(2025, 3, 11, 9));
        assert_eq!(quote.total_price, Some(650_000));
    }

    #[test]
    fn monthly_from_month_end_clamps() {
        let start = utc(2025, 1, 31, 10);
        let quote = calculate_rental_quote(&schedule(), RentalTier::Monthly, Some(start));
        assert_eq!(quote.end_time, utc(2025, 2, 28, 10));
        assert_eq!(quote.end_time.to_rfc3339(), "2025-02-28T10:00:00+00:00");
        assert_eq!(quote.total_price, Some(15_000_000));
    }

    #[test]
    fn monthly_into_leap_february() {
        let quote =
            calculate_rental_quote(&schedule(), RentalTier::Monthly, Some(utc(2024, 1, 31, 0)));
        assert_eq!(quote.end_time, utc(2024, 2, 29, 0));
    }

    #[test]
    fn yearly_from_leap_day_clamps() {
        let quote =
            calculate_rental_quote(&schedule(), RentalTier::Yearly, Some(utc(2024, 2, 29, 8)));
        assert_eq!(quote.end_time, utc(2025, 2, 28, 8));
        assert_eq!(quote.total_price, Some(150_000_000));
    }

    #[test]
    fn daily_across_year_boundary() {
        let quote =
            calculate_rental_quote(&schedule(), RentalTier::Daily, Some(utc(2024, 12, 31, 23)));
        assert_eq!(quote.end_time, utc(2025, 1, 1, 23));
    }

    #[test]
    fn unknown_tier_is_daily() {
        let tier = RentalTier::parse_or_daily("weekly");
        assert_eq!(tier, RentalTier::Daily);

        let start = utc(2025, 6, 1, 12);
        let quote = calculate_rental_quote(&schedule(), tier, Some(start));
        assert_eq!(quote.end_time, utc(2025, 6, 2, 12));
        assert_eq!(quote.total_price, Some(650_000));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(RentalTier::parse("Monthly"), Some(RentalTier::Monthly));
        assert_eq!(RentalTier::parse(" YEARLY "), Some(RentalTier::Yearly));
        assert_eq!(RentalTier::parse(""), None);
    }

    #[test]
    fn explicit_start_is_deterministic() {
        let start = utc(2025, 5, 5, 5);
        let a = calculate_rental_quote(&schedule(), RentalTier::Yearly, Some(start));
        let b = calculate_rental_quote(&schedule(), RentalTier::Yearly, Some(start));
        assert_eq!(a, b);
    }

    #[test]
    fn missing_price_is_passed_through() {
        let schedule = PricingSchedule {
            price_per_day: 500_000,
            price_per_month: None,
            price_per_year: None,
        };
        let quote = calculate_rental_quote(&schedule, RentalTier::Monthly, Some(utc(2025, 1, 1, 0)));
        assert_eq!(quote.total_price, None);
        assert_eq!(quote.end_time, utc(2025, 2, 1, 0));
    }

    #[test]
    fn default_start_is_now() {
        let before = Utc::now();
        let quote = calculate_rental_quote(&schedule(), RentalTier::Daily, None);
        let after = Utc::now();
        assert!(quote.start_time >= before && quote.start_time <= after);
        assert_eq!(quote.end_time, quote.start_time + chrono::Duration::days(1));
    }

    #[test]
    fn overflow_saturates() {
        let quote = calculate_rental_quote(
            &schedule(),
            RentalTier::Yearly,
            Some(DateTime::<Utc>::MAX_UTC),
        );
        assert_eq!(quote.end_time, DateTime::<Utc>::MAX_UTC);
    }
}
