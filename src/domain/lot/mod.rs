//! Parking lot aggregate
//!
//! Contains the ParkingLot entity, billing helpers and the
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{billable_hours, ParkingLot};
pub use repository::{LotRepository, LotUpdate, NewLot};
