use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cars::Table)
                    .if_not_exists()
                    .col(pk_uuid(Cars::Id))
                    .col(string(Cars::Make))
                    .col(string(Cars::ModelName))
                    .col(integer(Cars::Year))
                    .col(double(Cars::Price))
                    .col(integer(Cars::Mileage))
                    .col(string(Cars::Color))
                    .col(uuid(Cars::CategoryId))
                    .col(string(Cars::Status))
                    .col(json(Cars::Features))
                    .col(json(Cars::Images))
                    .col(string_uniq(Cars::Vin))
                    .col(uuid(Cars::AddedById))
                    .col(string(Cars::AddedByRole))
                    .col(
                        timestamp_with_time_zone(Cars::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Cars::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_cars_status")
                    .table(Cars::Table)
                    .col(Cars::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_cars_category_id")
                    .table(Cars::Table)
                    .col(Cars::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cars::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Cars {
    Table,
    Id,
    Make,
    ModelName,
    Year,
    Price,
    Mileage,
    Color,
    CategoryId,
    Status,
    Features,
    Images,
    Vin,
    AddedById,
    AddedByRole,
    CreatedAt,
    UpdatedAt,
}
