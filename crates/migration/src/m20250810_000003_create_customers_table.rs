use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customers::Table)
                    .if_not_exists()
                    .col(pk_uuid(Customers::Id))
                    .col(string_uniq(Customers::Email))
                    .col(string(Customers::PasswordHash))
                    .col(string(Customers::FirstName))
                    .col(string(Customers::LastName))
                    .col(string(Customers::Phone))
                    .col(string(Customers::Street))
                    .col(string(Customers::City))
                    .col(string(Customers::State))
                    .col(string(Customers::ZipCode))
                    .col(string(Customers::Country))
                    .col(date(Customers::DateOfBirth))
                    .col(string_uniq(Customers::LicenseNumber))
                    .col(string(Customers::Role))
                    .col(timestamp_with_time_zone_null(Customers::LastLogin))
                    .col(
                        timestamp_with_time_zone(Customers::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Customers::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Customers::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Customers {
    Table,
    Id,
    Email,
    PasswordHash,
    FirstName,
    LastName,
    Phone,
    Street,
    City,
    State,
    ZipCode,
    Country,
    DateOfBirth,
    LicenseNumber,
    Role,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}
