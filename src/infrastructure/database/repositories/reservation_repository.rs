//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::domain::reservation::{Reservation, ReservationRepository, ReservationStatus};
use crate::domain::spot::SpotStatus;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{parking_spot, reservation};

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> Reservation {
    Reservation {
        id: m.id,
        spot_id: m.spot_id,
        user_id: m.user_id,
        parking_timestamp: m.parking_timestamp,
        leaving_timestamp: m.leaving_timestamp,
        parking_cost: m.parking_cost,
        status: ReservationStatus::from_str(&m.status),
        created_at: m.created_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn open(&self, spot_id: i32, user_id: &str) -> DomainResult<Option<Reservation>> {
        let txn = self.db.begin().await.map_err(db_err)?;

        // Conditional claim: only flips Available -> Occupied, so two
        // concurrent bookings cannot both take the same spot.
        let claimed = parking_spot::Entity::update_many()
            .col_expr(
                parking_spot::Column::Status,
                Expr::value(SpotStatus::Occupied.as_str()),
            )
            .filter(parking_spot::Column::Id.eq(spot_id))
            .filter(parking_spot::Column::Status.eq(SpotStatus::Available.as_str()))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if claimed.rows_affected == 0 {
            txn.rollback().await.map_err(db_err)?;
            debug!("Spot {} no longer available", spot_id);
            return Ok(None);
        }

        let now = Utc::now();
        let model = reservation::ActiveModel {
            spot_id: Set(spot_id),
            user_id: Set(user_id.to_string()),
            parking_timestamp: Set(now),
            leaving_timestamp: Set(None),
            parking_cost: Set(None),
            status: Set(ReservationStatus::Active.as_str().to_string()),
            created_at: Set(now),
            ..Default::default()
        };
        let inserted = model.insert(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(Some(model_to_domain(inserted)))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_active_for_spot(&self, spot_id: i32) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find()
            .filter(reservation::Column::SpotId.eq(spot_id))
            .filter(reservation::Column::Status.eq(ReservationStatus::Active.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_for_user(&self, user_id: &str) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::UserId.eq(user_id))
            .order_by_desc(reservation::Column::ParkingTimestamp)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn count_for_user(
        &self,
        user_id: &str,
        status: ReservationStatus,
    ) -> DomainResult<u64> {
        reservation::Entity::find()
            .filter(reservation::Column::UserId.eq(user_id))
            .filter(reservation::Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn complete(
        &self,
        id: i32,
        leaving_timestamp: DateTime<Utc>,
        parking_cost: f64,
    ) -> DomainResult<()> {
        debug!("Completing reservation {}", id);
        let txn = self.db.begin().await.map_err(db_err)?;

        let existing = reservation::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: id.to_string(),
            });
        };

        let spot_id = existing.spot_id;
        let mut active: reservation::ActiveModel = existing.into();
        active.leaving_timestamp = Set(Some(leaving_timestamp));
        active.parking_cost = Set(Some(parking_cost));
        active.status = Set(ReservationStatus::Completed.as_str().to_string());
        active.update(&txn).await.map_err(db_err)?;

        parking_spot::Entity::update_many()
            .col_expr(
                parking_spot::Column::Status,
                Expr::value(SpotStatus::Available.as_str()),
            )
            .filter(parking_spot::Column::Id.eq(spot_id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }
}
