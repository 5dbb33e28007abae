//! Parking spot repository interface

use async_trait::async_trait;

use super::model::{ParkingSpot, SpotStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait SpotRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ParkingSpot>>;

    async fn find_by_lot(&self, lot_id: i32) -> DomainResult<Vec<ParkingSpot>>;

    /// Lowest-id Available spot in the lot, if any
    async fn first_available(&self, lot_id: i32) -> DomainResult<Option<ParkingSpot>>;

    async fn count_available_in_lot(&self, lot_id: i32) -> DomainResult<u64>;

    async fn count_all(&self) -> DomainResult<u64>;

    async fn count_by_status(&self, status: SpotStatus) -> DomainResult<u64>;

    /// Reassign status and owning lot
    async fn update(&self, id: i32, status: SpotStatus, lot_id: i32) -> DomainResult<ParkingSpot>;

    /// Delete the spot together with its reservations
    async fn delete_cascade(&self, id: i32) -> DomainResult<()>;
}
