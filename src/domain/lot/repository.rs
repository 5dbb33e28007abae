//! Parking lot repository interface

use async_trait::async_trait;

use super::model::ParkingLot;
use crate::domain::DomainResult;

/// Fields required to persist a new lot
#[derive(Debug, Clone)]
pub struct NewLot {
    pub prime_location_name: String,
    pub price_per_hour: f64,
    pub address: String,
    pub pin_code: String,
    pub number_of_spots: i32,
}

/// Editable lot fields; capacity is fixed at creation
#[derive(Debug, Clone)]
pub struct LotUpdate {
    pub prime_location_name: String,
    pub price_per_hour: f64,
    pub address: String,
    pub pin_code: String,
}

#[async_trait]
pub trait LotRepository: Send + Sync {
    /// Insert the lot and its spots as one unit; every spot starts Available
    async fn create_with_spots(&self, lot: NewLot) -> DomainResult<ParkingLot>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ParkingLot>>;

    async fn find_all(&self) -> DomainResult<Vec<ParkingLot>>;

    /// Substring search over location name and pin code
    async fn search(&self, keyword: &str) -> DomainResult<Vec<ParkingLot>>;

    async fn update(&self, id: i32, update: LotUpdate) -> DomainResult<ParkingLot>;

    /// Delete the lot, its spots and their reservations as one unit
    async fn delete_cascade(&self, id: i32) -> DomainResult<()>;
}
