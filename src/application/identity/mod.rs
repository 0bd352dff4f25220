//! Identity module: user management & authentication
//!
//! Contains the `UserService` which orchestrates all user-related
//! use-cases: login, registration, profile updates, password changes
//! and admin account management.

pub mod service;

pub use service::{AuthResult, NewAccount, ProfileUpdate, UserService};
