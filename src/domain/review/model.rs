//! Review domain entity

use chrono::{DateTime, Utc};

use crate::domain::DomainError;
use crate::shared::PageRequest;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;
pub const MIN_COMMENT_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i32,
    pub rental_id: i32,
    pub user_id: i32,
    /// Vehicle of the reviewed rental, copied at creation for filtering
    pub vehicle_id: i32,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn is_authored_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }
}

/// Rating must be 1..=5 and the comment at least 10 characters.
pub fn validate_review(rating: Option<i32>, comment: Option<&str>) -> Result<(), DomainError> {
    if let Some(rating) = rating {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(DomainError::Validation(format!(
                "rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }
    }
    if let Some(comment) = comment {
        if comment.trim().chars().count() < MIN_COMMENT_CHARS {
            return Err(DomainError::Validation(format!(
                "comment must be at least {} characters",
                MIN_COMMENT_CHARS
            )));
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct CreateReviewDto {
    pub rental_id: i32,
    pub user_id: i32,
    pub vehicle_id: i32,
    pub rating: i32,
    pub comment: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateReviewDto {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

impl UpdateReviewDto {
    pub fn apply(self, r: &mut Review) {
        if let Some(rating) = self.rating {
            r.rating = rating;
        }
        if let Some(comment) = self.comment {
            r.comment = comment;
        }
        r.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub rental_id: Option<i32>,
    pub user_id: Option<i32>,
    pub vehicle_id: Option<i32>,
    pub page: PageRequest,
}

impl ReviewFilter {
    pub fn matches(&self, r: &Review) -> bool {
        self.rental_id.map_or(true, |id| r.rental_id == id)
            && self.user_id.map_or(true, |id| r.user_id == id)
            && self.vehicle_id.map_or(true, |id| r.vehicle_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds() {
        assert!(validate_review(Some(1), None).is_ok());
        assert!(validate_review(Some(5), None).is_ok());
        assert!(validate_review(Some(0), None).is_err());
        assert!(validate_review(Some(6), None).is_err());
    }

    #[test]
    fn comment_counts_characters_not_bytes() {
        // 10 characters, more than 10 bytes
        assert!(validate_review(None, Some("Xe rất tốt!")).is_ok());
        assert!(validate_review(None, Some("quá tốt")).is_err());
        assert!(validate_review(None, Some("          short")).is_err());
    }
}
