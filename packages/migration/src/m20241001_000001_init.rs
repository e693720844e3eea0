use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    PasswordHash,
    Dob,
    Role,
    Chest,
    Waist,
    Hip,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Credentials {
    Table,
    Id,
    #[iden = "type"]
    Kind,
    Secret,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
    Item,
    Price,
    Stock,
    Pictures,
    Xs,
    S,
    M,
    L,
    Xl,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Orders {
    Table,
    Id,
    Total,
    Status,
    Snapshots,
    UserId,
    CreatedAt,
    UpdatedAt,
}

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

fn timestamp_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

fn text_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).text().not_null().default("").to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(id_col(Users::Id))
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(text_col(Users::Dob))
                    .col(
                        ColumnDef::new(Users::Role)
                            .string()
                            .not_null()
                            .default("customer"),
                    )
                    .col(ColumnDef::new(Users::Chest).double().not_null().default(0.0))
                    .col(ColumnDef::new(Users::Waist).double().not_null().default(0.0))
                    .col(ColumnDef::new(Users::Hip).double().not_null().default(0.0))
                    .col(timestamp_col(Users::CreatedAt))
                    .col(timestamp_col(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_username_unique")
                    .table(Users::Table)
                    .col(Users::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // credentials
        manager
            .create_table(
                Table::create()
                    .table(Credentials::Table)
                    .if_not_exists()
                    .col(id_col(Credentials::Id))
                    .col(ColumnDef::new(Credentials::Kind).string().not_null())
                    .col(ColumnDef::new(Credentials::Secret).text().not_null())
                    .col(timestamp_col(Credentials::CreatedAt))
                    .col(timestamp_col(Credentials::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_credentials_type_unique")
                    .table(Credentials::Table)
                    .col(Credentials::Kind)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // products
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(id_col(Products::Id))
                    .col(ColumnDef::new(Products::Item).string().not_null())
                    .col(
                        ColumnDef::new(Products::Price)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Products::Stock)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(text_col(Products::Pictures))
                    .col(text_col(Products::Xs))
                    .col(text_col(Products::S))
                    .col(text_col(Products::M))
                    .col(text_col(Products::L))
                    .col(text_col(Products::Xl))
                    .col(timestamp_col(Products::CreatedAt))
                    .col(timestamp_col(Products::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // orders
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(id_col(Orders::Id))
                    .col(
                        ColumnDef::new(Orders::Total)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(text_col(Orders::Status))
                    .col(text_col(Orders::Snapshots))
                    .col(ColumnDef::new(Orders::UserId).big_integer().not_null())
                    .col(timestamp_col(Orders::CreatedAt))
                    .col(timestamp_col(Orders::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_user_id")
                            .from(Orders::Table, Orders::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_orders_user_id")
                    .table(Orders::Table)
                    .col(Orders::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ix_orders_user_id")
                    .table(Orders::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_credentials_type_unique")
                    .table(Credentials::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Credentials::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_users_username_unique")
                    .table(Users::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}
