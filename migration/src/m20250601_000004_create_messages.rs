use sea_orm_migration::{prelude::*, schema::*, sea_orm::sea_query::extension::postgres::Type};

use super::m20250601_000001_create_users::User;
use super::m20250601_000002_create_rides::Ride;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(MessageType::Enum)
                    .values([MessageType::Text, MessageType::Image, MessageType::Location])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Message::Table)
                    .if_not_exists()
                    .col(uuid(Message::Id).primary_key())
                    .col(uuid(Message::RideId).not_null())
                    .col(uuid(Message::SenderId).not_null())
                    .col(uuid(Message::ReceiverId).not_null())
                    .col(text(Message::Body).not_null())
                    .col(
                        ColumnDef::new(Message::MessageType)
                            .custom(MessageType::Enum)
                            .not_null(),
                    )
                    .col(boolean(Message::IsRead).not_null().default(false))
                    .col(
                        timestamp_with_time_zone(Message::SentAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_message_ride")
                            .from(Message::Table, Message::RideId)
                            .to(Ride::Table, Ride::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_message_sender")
                            .from(Message::Table, Message::SenderId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_message_receiver")
                            .from(Message::Table, Message::ReceiverId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_message_ride_sent_at")
                    .table(Message::Table)
                    .col(Message::RideId)
                    .col(Message::SentAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Message::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(MessageType::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Message {
    Table,
    Id,
    RideId,
    SenderId,
    ReceiverId,
    Body,
    MessageType,
    IsRead,
    SentAt,
}

#[derive(DeriveIden)]
pub enum MessageType {
    #[sea_orm(iden = "message_type")]
    Enum,
    #[sea_orm(iden = "text")]
    Text,
    #[sea_orm(iden = "image")]
    Image,
    #[sea_orm(iden = "location")]
    Location,
}
