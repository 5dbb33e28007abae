//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_users;
mod m20250101_000002_create_parking_lots;
mod m20250101_000003_create_parking_spots;
mod m20250101_000004_create_reservations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users::Migration),
            Box::new(m20250101_000002_create_parking_lots::Migration),
            Box::new(m20250101_000003_create_parking_spots::Migration),
            Box::new(m20250101_000004_create_reservations::Migration),
        ]
    }
}
