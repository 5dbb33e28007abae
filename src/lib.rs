//! # Parklot
//!
//! Parking-lot reservation management core: administrators create lots
//! and spots, users book and release spots, the system tracks occupancy
//! and computes cost on release.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Business services (allocation, reservation
//!   lifecycle, lot administration, identity, statistics)
//! - **infrastructure**: External concerns (database, password hashing)
//!
//! The web/UI layer is an external collaborator; it drives the crate
//! through the application services.

pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export services
pub use application::services::{
    IdentityService, LotService, ReservationService, SpotAllocator, StatsService,
};
