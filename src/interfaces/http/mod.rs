//! HTTP REST API
//!
//! - `common`: response envelopes, `ValidatedJson`, error mapping
//! - `middleware`: JWT authentication and admin guard
//! - `modules`: per-resource DTOs and handlers
//! - `router`: route table, shared state and Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDependencies, ApiDoc, ApiState};
