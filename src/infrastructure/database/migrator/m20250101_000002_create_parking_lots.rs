//! Create parking_lots table
//!
//! Lots carry the hourly price used when a reservation closes and
//! the spot capacity fixed at creation.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ParkingLots::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ParkingLots::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ParkingLots::PrimeLocationName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParkingLots::PricePerHour)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ParkingLots::Address).text().not_null())
                    .col(ColumnDef::new(ParkingLots::PinCode).string().not_null())
                    .col(
                        ColumnDef::new(ParkingLots::NumberOfSpots)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ParkingLots::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parking_lots_pin_code")
                    .table(ParkingLots::Table)
                    .col(ParkingLots::PinCode)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ParkingLots::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ParkingLots {
    Table,
    Id,
    PrimeLocationName,
    PricePerHour,
    Address,
    PinCode,
    NumberOfSpots,
    CreatedAt,
}
