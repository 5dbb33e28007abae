//! Lot and spot administration
//!
//! Creation, editing and the deletion guards tied to occupancy and
//! active reservations.

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, LotUpdate, NewLot, ParkingLot, ParkingSpot, RepositoryProvider,
    SpotStatus,
};

pub struct LotService {
    repos: Arc<dyn RepositoryProvider>,
}

impl LotService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Create a lot together with its spots, all Available
    pub async fn create_lot(&self, lot: NewLot) -> DomainResult<ParkingLot> {
        if lot.prime_location_name.trim().is_empty() {
            return Err(DomainError::Validation("Location name is required".into()));
        }
        if lot.price_per_hour <= 0.0 {
            return Err(DomainError::Validation(
                "Price per hour must be positive".into(),
            ));
        }
        if lot.number_of_spots < 1 {
            return Err(DomainError::Validation(
                "A lot needs at least one spot".into(),
            ));
        }

        let created = self.repos.lots().create_with_spots(lot).await?;
        info!(
            lot_id = created.id,
            spots = created.number_of_spots,
            "Parking lot created"
        );
        Ok(created)
    }

    /// Edit lot fields; capacity stays fixed.
    ///
    /// A price change only affects reservations released afterwards.
    pub async fn update_lot(&self, id: i32, update: LotUpdate) -> DomainResult<ParkingLot> {
        if update.prime_location_name.trim().is_empty() {
            return Err(DomainError::Validation("Location name is required".into()));
        }
        if update.price_per_hour <= 0.0 {
            return Err(DomainError::Validation(
                "Price per hour must be positive".into(),
            ));
        }

        let updated = self.repos.lots().update(id, update).await?;
        info!(lot_id = id, "Parking lot updated");
        Ok(updated)
    }

    pub async fn list_lots(&self) -> DomainResult<Vec<ParkingLot>> {
        self.repos.lots().find_all().await
    }

    /// Substring search over location name and pin code
    pub async fn search_lots(&self, keyword: &str) -> DomainResult<Vec<ParkingLot>> {
        self.repos.lots().search(keyword).await
    }

    pub async fn spots_for_lot(&self, lot_id: i32) -> DomainResult<Vec<ParkingSpot>> {
        self.lot_or_not_found(lot_id).await?;
        self.repos.spots().find_by_lot(lot_id).await
    }

    pub async fn available_spots_count(&self, lot_id: i32) -> DomainResult<u64> {
        self.lot_or_not_found(lot_id).await?;
        self.repos.spots().count_available_in_lot(lot_id).await
    }

    /// Delete a lot unless any of its spots is occupied or holds an
    /// active reservation
    pub async fn delete_lot(&self, lot_id: i32) -> DomainResult<()> {
        self.lot_or_not_found(lot_id).await?;

        let spots = self.repos.spots().find_by_lot(lot_id).await?;
        for spot in &spots {
            if self
                .repos
                .reservations()
                .find_active_for_spot(spot.id)
                .await?
                .is_some()
            {
                return Err(DomainError::Blocked(
                    "Some spots have active reservations".into(),
                ));
            }
        }
        if spots.iter().any(|s| s.status == SpotStatus::Occupied) {
            return Err(DomainError::Blocked("Some spots are still occupied".into()));
        }

        self.repos.lots().delete_cascade(lot_id).await?;
        info!(lot_id, "Parking lot deleted");
        Ok(())
    }

    /// Delete a spot unless it is currently occupied
    pub async fn delete_spot(&self, spot_id: i32) -> DomainResult<()> {
        let spot = self.spot_or_not_found(spot_id).await?;
        if spot.status == SpotStatus::Occupied {
            return Err(DomainError::Blocked("Spot is currently occupied".into()));
        }

        self.repos.spots().delete_cascade(spot_id).await?;
        info!(spot_id, "Parking spot deleted");
        Ok(())
    }

    /// Reassign a spot's status and owning lot.
    ///
    /// Blocked only while the spot is occupied by an active
    /// reservation; freeing such a spot goes through the release flow.
    pub async fn edit_spot(
        &self,
        spot_id: i32,
        status: SpotStatus,
        lot_id: i32,
    ) -> DomainResult<ParkingSpot> {
        let spot = self.spot_or_not_found(spot_id).await?;
        self.lot_or_not_found(lot_id).await?;

        if spot.status == SpotStatus::Occupied
            && self
                .repos
                .reservations()
                .find_active_for_spot(spot_id)
                .await?
                .is_some()
        {
            return Err(DomainError::Blocked(
                "Spot is occupied by an active reservation".into(),
            ));
        }

        let updated = self.repos.spots().update(spot_id, status, lot_id).await?;
        info!(spot_id, lot_id, status = %status, "Parking spot updated");
        Ok(updated)
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn lot_or_not_found(&self, lot_id: i32) -> DomainResult<ParkingLot> {
        self.repos
            .lots()
            .find_by_id(lot_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "ParkingLot",
                field: "id",
                value: lot_id.to_string(),
            })
    }

    async fn spot_or_not_found(&self, spot_id: i32) -> DomainResult<ParkingSpot> {
        self.repos
            .spots()
            .find_by_id(spot_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "ParkingSpot",
                field: "id",
                value: spot_id.to_string(),
            })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support as support;
    use crate::application::services::ReservationService;
    use crate::domain::ReservationStatus;

    #[tokio::test]
    async fn create_lot_creates_all_spots_available() {
        let (_db, repos) = support::memory_repos().await;

        let service = LotService::new(repos.clone());
        let lot = service
            .create_lot(NewLot {
                prime_location_name: "Airport P3".into(),
                price_per_hour: 80.0,
                address: "1 Runway Road".into(),
                pin_code: "560300".into(),
                number_of_spots: 5,
            })
            .await
            .unwrap();

        let spots = service.spots_for_lot(lot.id).await.unwrap();
        assert_eq!(spots.len(), 5);
        assert!(spots.iter().all(|s| s.status == SpotStatus::Available));
        assert!(spots.iter().all(|s| s.lot_id == lot.id));
        assert_eq!(service.available_spots_count(lot.id).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn create_lot_rejects_bad_input() {
        let (_db, repos) = support::memory_repos().await;
        let service = LotService::new(repos);

        let bad_price = NewLot {
            prime_location_name: "X".into(),
            price_per_hour: 0.0,
            address: "addr".into(),
            pin_code: "1".into(),
            number_of_spots: 1,
        };
        assert!(matches!(
            service.create_lot(bad_price).await.unwrap_err(),
            DomainError::Validation(_)
        ));

        let no_spots = NewLot {
            prime_location_name: "X".into(),
            price_per_hour: 10.0,
            address: "addr".into(),
            pin_code: "1".into(),
            number_of_spots: 0,
        };
        assert!(matches!(
            service.create_lot(no_spots).await.unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn update_lot_changes_fields() {
        let (_db, repos) = support::memory_repos().await;
        let lot = support::lot(&repos, 50.0, 2).await;

        let service = LotService::new(repos);
        let updated = service
            .update_lot(
                lot.id,
                LotUpdate {
                    prime_location_name: "Renamed".into(),
                    price_per_hour: 75.0,
                    address: "New address".into(),
                    pin_code: "999".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.prime_location_name, "Renamed");
        assert_eq!(updated.price_per_hour, 75.0);
        // Capacity untouched
        assert_eq!(updated.number_of_spots, lot.number_of_spots);
    }

    #[tokio::test]
    async fn delete_lot_with_occupied_spot_is_blocked() {
        let (_db, repos) = support::memory_repos().await;
        let user = support::driver(&repos, "alice").await;
        let lot = support::lot(&repos, 50.0, 2).await;

        let reservations = ReservationService::new(repos.clone());
        let reservation = reservations.book(lot.id, &user.id).await.unwrap();

        let service = LotService::new(repos.clone());
        let err = service.delete_lot(lot.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Blocked(_)));

        // Lot, spots and reservation are all untouched
        assert!(repos.lots().find_by_id(lot.id).await.unwrap().is_some());
        assert_eq!(repos.spots().find_by_lot(lot.id).await.unwrap().len(), 2);
        let unchanged = repos
            .reservations()
            .find_by_id(reservation.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.status, ReservationStatus::Active);
    }

    #[tokio::test]
    async fn delete_lot_removes_spots_and_history() {
        let (_db, repos) = support::memory_repos().await;
        let user = support::driver(&repos, "alice").await;
        let lot = support::lot(&repos, 50.0, 2).await;

        let reservations = ReservationService::new(repos.clone());
        let reservation = reservations.book(lot.id, &user.id).await.unwrap();
        reservations.release(reservation.id, &user.id).await.unwrap();

        let service = LotService::new(repos.clone());
        service.delete_lot(lot.id).await.unwrap();

        assert!(repos.lots().find_by_id(lot.id).await.unwrap().is_none());
        assert_eq!(repos.spots().count_all().await.unwrap(), 0);
        assert!(repos
            .reservations()
            .find_by_id(reservation.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn delete_occupied_spot_is_blocked() {
        let (_db, repos) = support::memory_repos().await;
        let user = support::driver(&repos, "alice").await;
        let lot = support::lot(&repos, 50.0, 1).await;

        let reservations = ReservationService::new(repos.clone());
        let reservation = reservations.book(lot.id, &user.id).await.unwrap();

        let service = LotService::new(repos);
        let err = service.delete_spot(reservation.spot_id).await.unwrap_err();
        assert!(matches!(err, DomainError::Blocked(_)));
    }

    #[tokio::test]
    async fn delete_free_spot_removes_its_history() {
        let (_db, repos) = support::memory_repos().await;
        let user = support::driver(&repos, "alice").await;
        let lot = support::lot(&repos, 50.0, 1).await;

        let reservations = ReservationService::new(repos.clone());
        let reservation = reservations.book(lot.id, &user.id).await.unwrap();
        reservations.release(reservation.id, &user.id).await.unwrap();

        let service = LotService::new(repos.clone());
        service.delete_spot(reservation.spot_id).await.unwrap();

        assert!(repos
            .spots()
            .find_by_id(reservation.spot_id)
            .await
            .unwrap()
            .is_none());
        assert!(repos
            .reservations()
            .find_by_id(reservation.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn edit_spot_with_active_reservation_is_blocked() {
        let (_db, repos) = support::memory_repos().await;
        let user = support::driver(&repos, "alice").await;
        let lot = support::lot(&repos, 50.0, 1).await;

        let reservations = ReservationService::new(repos.clone());
        let reservation = reservations.book(lot.id, &user.id).await.unwrap();

        let service = LotService::new(repos);
        let err = service
            .edit_spot(reservation.spot_id, SpotStatus::Available, lot.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Blocked(_)));
    }

    #[tokio::test]
    async fn edit_spot_moves_it_to_another_lot() {
        let (_db, repos) = support::memory_repos().await;
        let first = support::lot(&repos, 50.0, 1).await;
        let second = support::lot(&repos, 80.0, 1).await;

        let service = LotService::new(repos);
        let spot = service.spots_for_lot(first.id).await.unwrap().remove(0);

        let moved = service
            .edit_spot(spot.id, SpotStatus::Available, second.id)
            .await
            .unwrap();
        assert_eq!(moved.lot_id, second.id);
    }

    #[tokio::test]
    async fn edit_spot_rejects_unknown_target_lot() {
        let (_db, repos) = support::memory_repos().await;
        let lot = support::lot(&repos, 50.0, 1).await;

        let service = LotService::new(repos);
        let spot = service.spots_for_lot(lot.id).await.unwrap().remove(0);

        let err = service
            .edit_spot(spot.id, SpotStatus::Available, 999)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn search_matches_name_and_pin_code() {
        let (_db, repos) = support::memory_repos().await;
        support::lot(&repos, 50.0, 1).await; // "Central Garage" / "560001"

        let service = LotService::new(repos);
        assert_eq!(service.search_lots("Central").await.unwrap().len(), 1);
        assert_eq!(service.search_lots("5600").await.unwrap().len(), 1);
        assert!(service.search_lots("Harbor").await.unwrap().is_empty());
    }
}
