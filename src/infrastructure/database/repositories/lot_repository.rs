//! SeaORM implementation of LotRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;

use crate::domain::lot::{LotRepository, LotUpdate, NewLot, ParkingLot};
use crate::domain::spot::SpotStatus;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{parking_lot, parking_spot, reservation};

pub struct SeaOrmLotRepository {
    db: DatabaseConnection,
}

impl SeaOrmLotRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: parking_lot::Model) -> ParkingLot {
    ParkingLot {
        id: m.id,
        prime_location_name: m.prime_location_name,
        price_per_hour: m.price_per_hour,
        address: m.address,
        pin_code: m.pin_code,
        number_of_spots: m.number_of_spots,
        created_at: m.created_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

// ── LotRepository impl ──────────────────────────────────────────

#[async_trait]
impl LotRepository for SeaOrmLotRepository {
    async fn create_with_spots(&self, lot: NewLot) -> DomainResult<ParkingLot> {
        debug!(
            "Creating lot {} with {} spots",
            lot.prime_location_name, lot.number_of_spots
        );
        let txn = self.db.begin().await.map_err(db_err)?;
        let now = Utc::now();

        let model = parking_lot::ActiveModel {
            prime_location_name: Set(lot.prime_location_name),
            price_per_hour: Set(lot.price_per_hour),
            address: Set(lot.address),
            pin_code: Set(lot.pin_code),
            number_of_spots: Set(lot.number_of_spots),
            created_at: Set(now),
            ..Default::default()
        };
        let inserted = model.insert(&txn).await.map_err(db_err)?;

        for _ in 0..inserted.number_of_spots {
            let spot = parking_spot::ActiveModel {
                lot_id: Set(inserted.id),
                status: Set(SpotStatus::Available.as_str().to_string()),
                created_at: Set(now),
                ..Default::default()
            };
            spot.insert(&txn).await.map_err(db_err)?;
        }

        txn.commit().await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ParkingLot>> {
        let model = parking_lot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<ParkingLot>> {
        let models = parking_lot::Entity::find()
            .order_by_asc(parking_lot::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn search(&self, keyword: &str) -> DomainResult<Vec<ParkingLot>> {
        let models = parking_lot::Entity::find()
            .filter(
                parking_lot::Column::PrimeLocationName
                    .contains(keyword)
                    .or(parking_lot::Column::PinCode.contains(keyword)),
            )
            .order_by_asc(parking_lot::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, id: i32, update: LotUpdate) -> DomainResult<ParkingLot> {
        let existing = parking_lot::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "ParkingLot",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: parking_lot::ActiveModel = existing.into();
        active.prime_location_name = Set(update.prime_location_name);
        active.price_per_hour = Set(update.price_per_hour);
        active.address = Set(update.address);
        active.pin_code = Set(update.pin_code);

        let updated = active.update(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(updated))
    }

    async fn delete_cascade(&self, id: i32) -> DomainResult<()> {
        debug!("Deleting lot {} with spots and reservations", id);
        let txn = self.db.begin().await.map_err(db_err)?;

        let spot_ids: Vec<i32> = parking_spot::Entity::find()
            .filter(parking_spot::Column::LotId.eq(id))
            .all(&txn)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|s| s.id)
            .collect();

        if !spot_ids.is_empty() {
            reservation::Entity::delete_many()
                .filter(reservation::Column::SpotId.is_in(spot_ids))
                .exec(&txn)
                .await
                .map_err(db_err)?;

            parking_spot::Entity::delete_many()
                .filter(parking_spot::Column::LotId.eq(id))
                .exec(&txn)
                .await
                .map_err(db_err)?;
        }

        let result = parking_lot::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            txn.rollback().await.map_err(db_err)?;
            return Err(DomainError::NotFound {
                entity: "ParkingLot",
                field: "id",
                value: id.to_string(),
            });
        }

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }
}
