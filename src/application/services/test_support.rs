//! Shared fixtures for service tests

use std::sync::Arc;

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, EntityTrait, Set};
use sea_orm_migration::MigratorTrait;

use crate::domain::{NewLot, NewUser, ParkingLot, RepositoryProvider, User, UserRole};
use crate::infrastructure::database::entities::reservation;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;

/// Fresh in-memory database with all migrations applied
pub async fn memory_repos() -> (DatabaseConnection, Arc<dyn RepositoryProvider>) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    (db, repos)
}

/// Insert a plain user account; password hashing is covered by
/// the identity tests
pub async fn driver(repos: &Arc<dyn RepositoryProvider>, username: &str) -> User {
    repos
        .users()
        .create(NewUser {
            username: username.into(),
            email: format!("{}@example.com", username),
            password_hash: "not-a-real-hash".into(),
            role: UserRole::User,
        })
        .await
        .unwrap()
}

/// Insert a lot with `spots` Available spots
pub async fn lot(repos: &Arc<dyn RepositoryProvider>, price: f64, spots: i32) -> ParkingLot {
    repos
        .lots()
        .create_with_spots(NewLot {
            prime_location_name: "Central Garage".into(),
            price_per_hour: price,
            address: "12 Main Street".into(),
            pin_code: "560001".into(),
            number_of_spots: spots,
        })
        .await
        .unwrap()
}

/// Shift a reservation's parking timestamp into the past to simulate
/// a stay of `minutes`
pub async fn backdate_reservation(db: &DatabaseConnection, id: i32, minutes: i64) {
    let existing = reservation::Entity::find_by_id(id)
        .one(db)
        .await
        .unwrap()
        .unwrap();
    let mut active: reservation::ActiveModel = existing.into();
    active.parking_timestamp = Set(Utc::now() - Duration::minutes(minutes));
    active.update(db).await.unwrap();
}
