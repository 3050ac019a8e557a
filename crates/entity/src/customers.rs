//! Customers Entity
//!
//! Self-registered customer accounts. The postal address is flattened into
//! columns; registration enforces a minimum age of 18 and a unique driving
//! license number.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::roles::UserRole;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:             Uuid,
    #[sea_orm(unique)]
    pub email:          String,
    pub password_hash:  String,
    pub first_name:     String,
    pub last_name:      String,
    pub phone:          String,
    pub street:         String,
    pub city:           String,
    pub state:          String,
    pub zip_code:       String,
    pub country:        String,
    pub date_of_birth:  chrono::NaiveDate,
    #[sea_orm(unique)]
    pub license_number: String,
    pub role:           UserRole,
    pub last_login:     Option<chrono::DateTime<chrono::Utc>>,
    pub created_at:     chrono::DateTime<chrono::Utc>,
    pub updated_at:     chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchases::Entity")]
    Purchases,
}

impl Related<super::purchases::Entity> for Entity {
    fn to() -> RelationDef { Relation::Purchases.def() }
}

impl ActiveModelBehavior for ActiveModel {}
