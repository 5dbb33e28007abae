//! Reservation repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Reservation, ReservationStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Claim the spot and open an active reservation as one unit.
    ///
    /// The claim only succeeds if the spot is still Available; `None`
    /// means another booking took it first.
    async fn open(&self, spot_id: i32, user_id: &str) -> DomainResult<Option<Reservation>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>>;

    async fn find_active_for_spot(&self, spot_id: i32) -> DomainResult<Option<Reservation>>;

    /// All reservations of a user, newest first
    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<Reservation>>;

    async fn count_for_user(
        &self,
        user_id: &str,
        status: ReservationStatus,
    ) -> DomainResult<u64>;

    /// Close the reservation and free its spot as one unit
    async fn complete(
        &self,
        id: i32,
        leaving_timestamp: DateTime<Utc>,
        parking_cost: f64,
    ) -> DomainResult<()>;
}
