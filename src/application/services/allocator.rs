//! Spot allocation

use std::sync::Arc;

use crate::domain::{DomainError, DomainResult, ParkingSpot, RepositoryProvider};

/// Finds a free spot in a lot without claiming it.
///
/// Read-only: the actual claim happens together with the reservation
/// insert in `ReservationService::book`, so the scan and the claim
/// cannot diverge.
pub struct SpotAllocator {
    repos: Arc<dyn RepositoryProvider>,
}

impl SpotAllocator {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Pick an Available spot in the lot
    pub async fn allocate(&self, lot_id: i32) -> DomainResult<ParkingSpot> {
        self.repos
            .lots()
            .find_by_id(lot_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "ParkingLot",
                field: "id",
                value: lot_id.to_string(),
            })?;

        self.repos
            .spots()
            .first_available(lot_id)
            .await?
            .ok_or(DomainError::NoSpotAvailable(lot_id))
    }
}

// ── Tests ──────────────────────────────────────────────────────
