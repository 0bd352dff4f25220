//! Fleet module: vehicle catalogue and price quotes

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
