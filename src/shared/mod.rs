pub mod currency;
pub mod shutdown;
pub mod types;
pub mod validations;

pub use currency::*;
pub use shutdown::*;
pub use types::*;
pub use validations::*;
