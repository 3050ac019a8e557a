pub use sea_orm_migration::prelude::*;

mod m20250810_000001_create_admins_table;
mod m20250810_000002_create_managers_table;
mod m20250810_000003_create_customers_table;
mod m20250810_000004_create_categories_table;
mod m20250810_000005_create_cars_table;
mod m20250810_000006_create_purchases_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250810_000001_create_admins_table::Migration),
            Box::new(m20250810_000002_create_managers_table::Migration),
            Box::new(m20250810_000003_create_customers_table::Migration),
            Box::new(m20250810_000004_create_categories_table::Migration),
            Box::new(m20250810_000005_create_cars_table::Migration),
            Box::new(m20250810_000006_create_purchases_table::Migration),
        ]
    }
}

/// Database connection helper for CLI usage
pub async fn connect_to_database(database_url: &str) -> Result<sea_orm::DatabaseConnection, sea_orm::DbErr> {
    sea_orm::Database::connect(database_url).await
}
