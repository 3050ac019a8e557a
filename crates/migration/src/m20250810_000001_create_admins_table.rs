use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(pk_uuid(Admins::Id))
                    .col(string_uniq(Admins::Email))
                    .col(string(Admins::PasswordHash))
                    .col(string(Admins::Role))
                    .col(timestamp_with_time_zone_null(Admins::LastLogin))
                    .col(
                        timestamp_with_time_zone(Admins::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Admins::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Admins {
    Table,
    Id,
    Email,
    PasswordHash,
    Role,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}
