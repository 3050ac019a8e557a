use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Purchases::Table)
                    .if_not_exists()
                    .col(pk_uuid(Purchases::Id))
                    .col(uuid(Purchases::CarId))
                    .col(uuid(Purchases::CustomerId))
                    .col(timestamp_with_time_zone(Purchases::PurchaseDate))
                    .col(double(Purchases::PurchasePrice))
                    .col(string(Purchases::PaymentMethod))
                    .col(
                        timestamp_with_time_zone(Purchases::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Purchases::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_purchases_customer_id")
                    .table(Purchases::Table)
                    .col(Purchases::CustomerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Purchases::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Purchases {
    Table,
    Id,
    CarId,
    CustomerId,
    PurchaseDate,
    PurchasePrice,
    PaymentMethod,
    CreatedAt,
    UpdatedAt,
}
