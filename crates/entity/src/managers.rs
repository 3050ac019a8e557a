//! Managers Entity
//!
//! Inventory manager accounts. Created by an admin only.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::roles::UserRole;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "managers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:            Uuid,
    #[sea_orm(unique)]
    pub email:         String,
    pub password_hash: String,
    pub first_name:    String,
    pub last_name:     String,
    pub phone:         String,
    pub role:          UserRole,
    pub is_active:     bool,
    pub last_login:    Option<chrono::DateTime<chrono::Utc>>,
    pub created_at:    chrono::DateTime<chrono::Utc>,
    pub updated_at:    chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
