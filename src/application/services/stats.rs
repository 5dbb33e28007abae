//! Occupancy and activity statistics

use std::sync::Arc;

use crate::domain::{DomainResult, RepositoryProvider, ReservationStatus, SpotStatus};

/// System-wide occupancy summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotOverview {
    pub total_spots: u64,
    pub available_spots: u64,
    pub occupied_spots: u64,
    pub users_count: u64,
}

/// Per-user booking summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserActivity {
    pub active_reservations: u64,
    pub completed_reservations: u64,
}

pub struct StatsService {
    repos: Arc<dyn RepositoryProvider>,
}

impl StatsService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn lot_overview(&self) -> DomainResult<LotOverview> {
        Ok(LotOverview {
            total_spots: self.repos.spots().count_all().await?,
            available_spots: self.repos.spots().count_by_status(SpotStatus::Available).await?,
            occupied_spots: self.repos.spots().count_by_status(SpotStatus::Occupied).await?,
            users_count: self.repos.users().count().await?,
        })
    }

    pub async fn user_activity(&self, user_id: &str) -> DomainResult<UserActivity> {
        Ok(UserActivity {
            active_reservations: self
                .repos
                .reservations()
                .count_for_user(user_id, ReservationStatus::Active)
                .await?,
            completed_reservations: self
                .repos
                .reservations()
                .count_for_user(user_id, ReservationStatus::Completed)
                .await?,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support as support;
    use crate::application::services::ReservationService;

    #[tokio::test]
    async fn overview_counts_spots_and_users() {
        let (_db, repos) = support::memory_repos().await;
        let user = support::driver(&repos, "alice").await;
        let lot = support::lot(&repos, 50.0, 3).await;
        support::lot(&repos, 80.0, 2).await;

        let reservations = ReservationService::new(repos.clone());
        reservations.book(lot.id, &user.id).await.unwrap();

        let stats = StatsService::new(repos);
        let overview = stats.lot_overview().await.unwrap();
        assert_eq!(
            overview,
            LotOverview {
                total_spots: 5,
                available_spots: 4,
                occupied_spots: 1,
                users_count: 1,
            }
        );
    }

    #[tokio::test]
    async fn user_activity_splits_active_and_completed() {
        let (_db, repos) = support::memory_repos().await;
        let user = support::driver(&repos, "alice").await;
        let lot = support::lot(&repos, 50.0, 2).await;

        let reservations = ReservationService::new(repos.clone());
        let first = reservations.book(lot.id, &user.id).await.unwrap();
        reservations.release(first.id, &user.id).await.unwrap();
        reservations.book(lot.id, &user.id).await.unwrap();

        let stats = StatsService::new(repos);
        let activity = stats.user_activity(&user.id).await.unwrap();
        assert_eq!(
            activity,
            UserActivity {
                active_reservations: 1,
                completed_reservations: 1,
            }
        );
    }
}
