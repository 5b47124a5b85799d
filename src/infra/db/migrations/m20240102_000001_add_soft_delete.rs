//! Migration: Soft delete column for users.
//!
//! Listing queries always filter on `deleted_at IS NULL` and search by
//! first or last name, so both are indexed alongside it.

use sea_orm_migration::prelude::*;

const ACTIVE_NAMES_INDEX: &str = "idx_users_deleted_at_names";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Users::Table)
                    .add_column(
                        ColumnDef::new(Users::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(ACTIVE_NAMES_INDEX)
                    .table(Users::Table)
                    .col(Users::DeletedAt)
                    .col(Users::LastName)
                    .col(Users::FirstName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(ACTIVE_NAMES_INDEX)
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .alter_table(
                Table::alter()
                    .table(Users::Table)
                    .drop_column(Users::DeletedAt)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    FirstName,
    LastName,
    DeletedAt,
}
