//! Review aggregate

pub mod model;
pub mod repository;

pub use model::{validate_review, CreateReviewDto, Review, ReviewFilter, UpdateReviewDto};
pub use repository::ReviewRepository;
