pub mod lot;
pub mod repositories;
pub mod reservation;
pub mod spot;
pub mod user;

// Re-export commonly used types
pub use lot::{billable_hours, LotRepository, LotUpdate, NewLot, ParkingLot};
pub use repositories::{DomainResult, RepositoryProvider};
pub use reservation::{Reservation, ReservationRepository, ReservationStatus};
pub use spot::{ParkingSpot, SpotRepository, SpotStatus};
pub use user::{NewUser, User, UserRepository, UserRole};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
