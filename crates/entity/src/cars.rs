//! Cars Entity
//!
//! Vehicle inventory records. Feature and image lists are ordered and stored
//! as JSON arrays. The status transitions AVAILABLE -> SOLD exactly once,
//! driven by purchase creation; no reverse transition exists.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::roles::UserRole;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cars")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:            Uuid,
    pub make:          String,
    pub model_name:    String,
    pub year:          i32,
    pub price:         f64,
    pub mileage:       i32,
    pub color:         String,
    pub category_id:   Uuid,
    pub status:        CarStatus,
    #[sea_orm(column_type = "Json")]
    pub features:      Json,
    #[sea_orm(column_type = "Json")]
    pub images:        Json,
    #[sea_orm(unique)]
    pub vin:           String,
    pub added_by_id:   Uuid,
    pub added_by_role: UserRole,
    pub created_at:    chrono::DateTime<chrono::Utc>,
    pub updated_at:    chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::purchases::Entity")]
    Purchases,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl Related<super::purchases::Entity> for Entity {
    fn to() -> RelationDef { Relation::Purchases.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Sale status of a car.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum CarStatus {
    #[sea_orm(string_value = "AVAILABLE")]
    Available,
    #[sea_orm(string_value = "SOLD")]
    Sold,
    #[sea_orm(string_value = "RESERVED")]
    Reserved,
}

impl CarStatus {
    /// Parses the wire representation, returning `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "AVAILABLE" => Some(CarStatus::Available),
            "SOLD" => Some(CarStatus::Sold),
            "RESERVED" => Some(CarStatus::Reserved),
            _ => None,
        }
    }
}

impl std::fmt::Display for CarStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CarStatus::Available => write!(f, "AVAILABLE"),
            CarStatus::Sold => write!(f, "SOLD"),
            CarStatus::Reserved => write!(f, "RESERVED"),
        }
    }
}
