//! Create vehicles table
//!
//! Prices are whole currency units (VND has no minor unit).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vehicles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Vehicles::Name).string().not_null())
                    .col(ColumnDef::new(Vehicles::Brand).string().not_null())
                    .col(ColumnDef::new(Vehicles::VehicleType).string().not_null())
                    .col(
                        ColumnDef::new(Vehicles::LicensePlate)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Vehicles::Status)
                            .string()
                            .not_null()
                            .default("available"),
                    )
                    .col(ColumnDef::new(Vehicles::LocationId).integer().not_null())
                    .col(ColumnDef::new(Vehicles::PricePerDay).big_integer().not_null())
                    .col(ColumnDef::new(Vehicles::PricePerMonth).big_integer())
                    .col(ColumnDef::new(Vehicles::PricePerYear).big_integer())
                    .col(ColumnDef::new(Vehicles::Image).string())
                    .col(ColumnDef::new(Vehicles::PickupLocation).string())
                    .col(
                        ColumnDef::new(Vehicles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Vehicles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vehicles_status")
                    .table(Vehicles::Table)
                    .col(Vehicles::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Vehicles {
    Table,
    Id,
    Name,
    Brand,
    VehicleType,
    LicensePlate,
    Status,
    LocationId,
    PricePerDay,
    PricePerMonth,
    PricePerYear,
    Image,
    PickupLocation,
    CreatedAt,
    UpdatedAt,
}
