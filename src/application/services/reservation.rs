//! Reservation lifecycle
//!
//! Opens and closes reservations, keeping spot status in lockstep
//! with the active reservation.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::allocator::SpotAllocator;
use crate::domain::{DomainError, DomainResult, Reservation, RepositoryProvider};

pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
    allocator: SpotAllocator,
}

impl ReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        let allocator = SpotAllocator::new(repos.clone());
        Self { repos, allocator }
    }

    /// Book a free spot in the lot for the user.
    ///
    /// The claim and the reservation insert run as one unit; if the
    /// picked spot is taken by a concurrent booking first, allocation
    /// retries until the lot runs out of Available spots.
    pub async fn book(&self, lot_id: i32, user_id: &str) -> DomainResult<Reservation> {
        self.repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: user_id.to_string(),
            })?;

        loop {
            let spot = self.allocator.allocate(lot_id).await?;
            match self.repos.reservations().open(spot.id, user_id).await? {
                Some(reservation) => {
                    info!(
                        reservation_id = reservation.id,
                        spot_id = spot.id,
                        user_id,
                        "Spot booked"
                    );
                    return Ok(reservation);
                }
                // Lost the claim to a concurrent booking; pick again
                None => continue,
            }
        }
    }

    /// Release an active reservation owned by the user.
    ///
    /// Returns the computed parking cost. The reservation update and
    /// the spot release are one unit; on a persistence failure nothing
    /// is changed and the reservation stays active.
    pub async fn release(&self, reservation_id: i32, user_id: &str) -> DomainResult<f64> {
        let reservation = self
            .repos
            .reservations()
            .find_by_id(reservation_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: reservation_id.to_string(),
            })?;

        if reservation.user_id != user_id {
            return Err(DomainError::Unauthorized(
                "Reservation belongs to another user".into(),
            ));
        }
        if !reservation.is_active() {
            return Err(DomainError::NotActive(reservation_id));
        }

        let spot = self
            .repos
            .spots()
            .find_by_id(reservation.spot_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "ParkingSpot",
                field: "id",
                value: reservation.spot_id.to_string(),
            })?;
        let lot = self
            .repos
            .lots()
            .find_by_id(spot.lot_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "ParkingLot",
                field: "id",
                value: spot.lot_id.to_string(),
            })?;

        let leaving = Utc::now();
        let cost = lot.cost_for(reservation.duration_until(leaving));

        if let Err(e) = self
            .repos
            .reservations()
            .complete(reservation_id, leaving, cost)
            .await
        {
            warn!(reservation_id, error = %e, "Release rolled back");
            return Err(DomainError::ReleaseFailed(reservation_id));
        }

        info!(reservation_id, cost, "Reservation completed");
        Ok(cost)
    }

    /// Booking history for a user, newest first
    pub async fn reservations_for_user(&self, user_id: &str) -> DomainResult<Vec<Reservation>> {
        self.repos.reservations().find_for_user(user_id).await
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support as support;
    use crate::domain::{ReservationStatus, SpotStatus};

    #[tokio::test]
    async fn book_claims_spot_and_opens_reservation() {
        let (_db, repos) = support::memory_repos().await;
        let user = support::driver(&repos, "alice").await;
        let lot = support::lot(&repos, 100.0, 2).await;

        let service = ReservationService::new(repos.clone());
        let reservation = service.book(lot.id, &user.id).await.unwrap();

        assert_eq!(reservation.status, ReservationStatus::Active);
        assert_eq!(reservation.user_id, user.id);
        assert!(reservation.leaving_timestamp.is_none());
        assert!(reservation.parking_cost.is_none());

        let spot = repos
            .spots()
            .find_by_id(reservation.spot_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(spot.status, SpotStatus::Occupied);
        assert_eq!(repos.spots().count_available_in_lot(lot.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn book_full_lot_fails_without_creating_reservation() {
        let (_db, repos) = support::memory_repos().await;
        let user = support::driver(&repos, "alice").await;
        let lot = support::lot(&repos, 100.0, 1).await;

        let service = ReservationService::new(repos.clone());
        service.book(lot.id, &user.id).await.unwrap();

        let err = service.book(lot.id, &user.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NoSpotAvailable(id) if id == lot.id));
        assert_eq!(
            repos
                .reservations()
                .count_for_user(&user.id, ReservationStatus::Active)
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn book_unknown_user_is_not_found() {
        let (_db, repos) = support::memory_repos().await;
        let lot = support::lot(&repos, 100.0, 1).await;

        let service = ReservationService::new(repos);
        let err = service.book(lot.id, "missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "User", .. }));
    }

    #[tokio::test]
    async fn release_completes_reservation_and_frees_spot() {
        let (_db, repos) = support::memory_repos().await;
        let user = support::driver(&repos, "alice").await;
        let lot = support::lot(&repos, 100.0, 1).await;

        let service = ReservationService::new(repos.clone());
        let reservation = service.book(lot.id, &user.id).await.unwrap();

        // Short stay bills the one-hour minimum
        let cost = service.release(reservation.id, &user.id).await.unwrap();
        assert_eq!(cost, 100.0);

        let closed = repos
            .reservations()
            .find_by_id(reservation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(closed.status, ReservationStatus::Completed);
        assert_eq!(closed.parking_cost, Some(100.0));
        assert!(closed.leaving_timestamp.is_some());

        let spot = repos
            .spots()
            .find_by_id(reservation.spot_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(spot.status, SpotStatus::Available);
    }

    #[tokio::test]
    async fn release_bills_every_started_hour() {
        let (db, repos) = support::memory_repos().await;
        let user = support::driver(&repos, "alice").await;
        let lot = support::lot(&repos, 100.0, 1).await;

        let service = ReservationService::new(repos.clone());
        let reservation = service.book(lot.id, &user.id).await.unwrap();
        support::backdate_reservation(&db, reservation.id, 150).await;

        let cost = service.release(reservation.id, &user.id).await.unwrap();
        assert_eq!(cost, 300.0);
    }

    #[tokio::test]
    async fn release_twice_fails_and_keeps_cost() {
        let (db, repos) = support::memory_repos().await;
        let user = support::driver(&repos, "alice").await;
        let lot = support::lot(&repos, 100.0, 1).await;

        let service = ReservationService::new(repos.clone());
        let reservation = service.book(lot.id, &user.id).await.unwrap();
        support::backdate_reservation(&db, reservation.id, 10).await;
        let cost = service.release(reservation.id, &user.id).await.unwrap();

        let err = service.release(reservation.id, &user.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotActive(id) if id == reservation.id));

        let closed = repos
            .reservations()
            .find_by_id(reservation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(closed.parking_cost, Some(cost));
    }

    #[tokio::test]
    async fn release_by_other_user_is_unauthorized() {
        let (_db, repos) = support::memory_repos().await;
        let owner = support::driver(&repos, "alice").await;
        let other = support::driver(&repos, "bob").await;
        let lot = support::lot(&repos, 100.0, 1).await;

        let service = ReservationService::new(repos.clone());
        let reservation = service.book(lot.id, &owner.id).await.unwrap();

        let err = service.release(reservation.id, &other.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));

        // Untouched: still active, spot still occupied
        let unchanged = repos
            .reservations()
            .find_by_id(reservation.id)
            .await
            .unwrap()
            .unwrap();
        assert!(unchanged.is_active());
    }

    #[tokio::test]
    async fn release_unknown_reservation_is_not_found() {
        let (_db, repos) = support::memory_repos().await;
        let user = support::driver(&repos, "alice").await;

        let service = ReservationService::new(repos);
        let err = service.release(404, &user.id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn available_count_follows_book_and_release() {
        let (_db, repos) = support::memory_repos().await;
        let user = support::driver(&repos, "alice").await;
        let lot = support::lot(&repos, 100.0, 5).await;

        let service = ReservationService::new(repos.clone());
        assert_eq!(repos.spots().count_available_in_lot(lot.id).await.unwrap(), 5);

        let reservation = service.book(lot.id, &user.id).await.unwrap();
        assert_eq!(repos.spots().count_available_in_lot(lot.id).await.unwrap(), 4);

        service.release(reservation.id, &user.id).await.unwrap();
        assert_eq!(repos.spots().count_available_in_lot(lot.id).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn history_is_newest_first() {
        let (db, repos) = support::memory_repos().await;
        let user = support::driver(&repos, "alice").await;
        let lot = support::lot(&repos, 100.0, 2).await;

        let service = ReservationService::new(repos.clone());
        let first = service.book(lot.id, &user.id).await.unwrap();
        support::backdate_reservation(&db, first.id, 90).await;
        let second = service.book(lot.id, &user.id).await.unwrap();

        let history = service.reservations_for_user(&user.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, second.id);
        assert_eq!(history[1].id, first.id);
    }
}
