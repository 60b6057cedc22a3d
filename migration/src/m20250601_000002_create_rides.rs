use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20250601_000001_create_users::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(VehicleType::Enum)
                    .values([
                        VehicleType::Bike,
                        VehicleType::Car,
                        VehicleType::Cab,
                        VehicleType::Suv,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_type(
                Type::create()
                    .as_enum(RideStatus::Enum)
                    .values([
                        RideStatus::Available,
                        RideStatus::Active,
                        RideStatus::Completed,
                        RideStatus::Cancelled,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Ride::Table)
                    .if_not_exists()
                    .col(uuid(Ride::Id).primary_key())
                    .col(uuid(Ride::DriverId).not_null())
                    .col(string_len(Ride::PickupAddress, 255).not_null())
                    .col(double_null(Ride::PickupLatitude))
                    .col(double_null(Ride::PickupLongitude))
                    .col(string_len(Ride::DropAddress, 255).not_null())
                    .col(double_null(Ride::DropLatitude))
                    .col(double_null(Ride::DropLongitude))
                    .col(timestamp_with_time_zone(Ride::PickupTime).not_null())
                    .col(timestamp_with_time_zone_null(Ride::ExpectedDropTime))
                    .col(integer(Ride::TotalSeats).not_null())
                    .col(integer(Ride::AvailableSeats).not_null())
                    .col(
                        ColumnDef::new(Ride::VehicleType)
                            .custom(VehicleType::Enum)
                            .not_null(),
                    )
                    .col(double(Ride::PricePerSeat).not_null())
                    .col(text_null(Ride::Description))
                    .col(
                        ColumnDef::new(Ride::Status)
                            .custom(RideStatus::Enum)
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Ride::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Ride::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ride_driver")
                            .from(Ride::Table, Ride::DriverId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_ride_driver")
                    .table(Ride::Table)
                    .col(Ride::DriverId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ride::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(RideStatus::Enum).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(VehicleType::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Ride {
    Table,
    Id,
    DriverId,
    PickupAddress,
    PickupLatitude,
    PickupLongitude,
    DropAddress,
    DropLatitude,
    DropLongitude,
    PickupTime,
    ExpectedDropTime,
    TotalSeats,
    AvailableSeats,
    VehicleType,
    PricePerSeat,
    Description,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum VehicleType {
    #[sea_orm(iden = "vehicle_type")]
    Enum,
    #[sea_orm(iden = "bike")]
    Bike,
    #[sea_orm(iden = "car")]
    Car,
    #[sea_orm(iden = "cab")]
    Cab,
    #[sea_orm(iden = "suv")]
    Suv,
}

#[derive(DeriveIden)]
pub enum RideStatus {
    #[sea_orm(iden = "ride_status")]
    Enum,
    #[sea_orm(iden = "available")]
    Available,
    #[sea_orm(iden = "active")]
    Active,
    #[sea_orm(iden = "completed")]
    Completed,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
}
