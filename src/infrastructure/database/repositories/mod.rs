//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod lot_repository;
pub mod repository_provider;
pub mod reservation_repository;
pub mod spot_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
