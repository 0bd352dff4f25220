//! Vehicle aggregate

pub mod model;
pub mod repository;

pub use model::{
    CreateVehicleDto, UpdateVehicleDto, Vehicle, VehicleFilter, VehicleSort, VehicleStatus,
};
pub use repository::VehicleRepository;
