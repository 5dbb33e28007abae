//! Parking spot aggregate
//!
//! Contains the ParkingSpot entity and repository interface.

pub mod model;
pub mod repository;

pub use model::{ParkingSpot, SpotStatus};
pub use repository::SpotRepository;
