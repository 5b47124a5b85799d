//! Migration: Create users table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(text_column(Users::FirstName))
                    .col(text_column(Users::LastName))
                    .col(text_column(Users::ProfileImage))
                    .col(text_column(Users::Email))
                    .col(flag_column(Users::IsEmailVerified))
                    .col(text_column(Users::Bio))
                    .col(text_column(Users::PhoneNumber))
                    .col(flag_column(Users::IsPhoneVerified))
                    .col(text_column(Users::Country))
                    .col(text_column(Users::State))
                    .col(text_column(Users::Area))
                    .col(text_column(Users::City))
                    .col(text_column(Users::Address))
                    .col(text_column(Users::PostCode))
                    .col(
                        ColumnDef::new(Users::BirthDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(flag_column(Users::TosAccepted))
                    .col(ColumnDef::new(Users::InvitedByUserId).big_integer().null())
                    .col(flag_column(Users::IsActive))
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

fn text_column(name: Users) -> ColumnDef {
    ColumnDef::new(name)
        .string()
        .not_null()
        .default("")
        .to_owned()
}

fn flag_column(name: Users) -> ColumnDef {
    ColumnDef::new(name)
        .boolean()
        .not_null()
        .default(false)
        .to_owned()
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    FirstName,
    LastName,
    ProfileImage,
    Email,
    IsEmailVerified,
    Bio,
    PhoneNumber,
    IsPhoneVerified,
    Country,
    State,
    Area,
    City,
    Address,
    PostCode,
    BirthDate,
    TosAccepted,
    InvitedByUserId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
