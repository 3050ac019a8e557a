use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Managers::Table)
                    .if_not_exists()
                    .col(pk_uuid(Managers::Id))
                    .col(string_uniq(Managers::Email))
                    .col(string(Managers::PasswordHash))
                    .col(string(Managers::FirstName))
                    .col(string(Managers::LastName))
                    .col(string(Managers::Phone))
                    .col(string(Managers::Role))
                    .col(boolean(Managers::IsActive).default(true))
                    .col(timestamp_with_time_zone_null(Managers::LastLogin))
                    .col(
                        timestamp_with_time_zone(Managers::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Managers::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Managers::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Managers {
    Table,
    Id,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    Phone,
    Role,
    IsActive,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}
