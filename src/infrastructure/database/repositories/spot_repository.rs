//! SeaORM implementation of SpotRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

use crate::domain::spot::{ParkingSpot, SpotRepository, SpotStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{parking_spot, reservation};

pub struct SeaOrmSpotRepository {
    db: DatabaseConnection,
}

impl SeaOrmSpotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: parking_spot::Model) -> ParkingSpot {
    ParkingSpot {
        id: m.id,
        lot_id: m.lot_id,
        status: SpotStatus::from_str(&m.status),
        created_at: m.created_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

// ── SpotRepository impl ─────────────────────────────────────────

#[async_trait]
impl SpotRepository for SeaOrmSpotRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ParkingSpot>> {
        let model = parking_spot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_lot(&self, lot_id: i32) -> DomainResult<Vec<ParkingSpot>> {
        let models = parking_spot::Entity::find()
            .filter(parking_spot::Column::LotId.eq(lot_id))
            .order_by_asc(parking_spot::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn first_available(&self, lot_id: i32) -> DomainResult<Option<ParkingSpot>> {
        let model = parking_spot::Entity::find()
            .filter(parking_spot::Column::LotId.eq(lot_id))
            .filter(parking_spot::Column::Status.eq(SpotStatus::Available.as_str()))
            .order_by_asc(parking_spot::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn count_available_in_lot(&self, lot_id: i32) -> DomainResult<u64> {
        parking_spot::Entity::find()
            .filter(parking_spot::Column::LotId.eq(lot_id))
            .filter(parking_spot::Column::Status.eq(SpotStatus::Available.as_str()))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn count_all(&self) -> DomainResult<u64> {
        parking_spot::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn count_by_status(&self, status: SpotStatus) -> DomainResult<u64> {
        parking_spot::Entity::find()
            .filter(parking_spot::Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn update(&self, id: i32, status: SpotStatus, lot_id: i32) -> DomainResult<ParkingSpot> {
        debug!("Updating spot {}: status={}, lot={}", id, status, lot_id);
        let existing = parking_spot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "ParkingSpot",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: parking_spot::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.lot_id = Set(lot_id);

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }

    async fn delete_cascade(&self, id: i32) -> DomainResult<()> {
        debug!("Deleting spot {} with reservations", id);
        let txn = self.db.begin().await.map_err(db_err)?;

        reservation::Entity::delete_many()
            .filter(reservation::Column::SpotId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        let result = parking_spot::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::NotFound {
                entity: "ParkingSpot",
                field: "id",
                value: id.to_string(),
            });
        }

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }
}
