//! # User Service
//!
//! Read-only listings of customer and manager accounts. Every projection is
//! password-stripped before it leaves this module.

use entity::{customers, managers};
use error::{AppError, Result};
use sea_orm::{DbConn, EntityTrait, QueryOrder};
use serde_json::Value;
use uuid::Uuid;

use crate::services::accounts::password_stripped;

#[derive(Clone)]
pub struct UserService {
    db: DbConn,
}

impl UserService {
    #[must_use]
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
        }
    }

    pub async fn get_customers(&self) -> Result<Vec<Value>> {
        let records = customers::Entity::find()
            .order_by_desc(customers::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(records.iter().map(password_stripped).collect())
    }

    pub async fn get_customer(&self, id: Uuid) -> Result<Value> {
        let customer = customers::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Customer not found"))?;
        Ok(password_stripped(&customer))
    }

    pub async fn get_managers(&self) -> Result<Vec<Value>> {
        let records = managers::Entity::find()
            .order_by_desc(managers::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(records.iter().map(password_stripped).collect())
    }

    pub async fn get_manager(&self, id: Uuid) -> Result<Value> {
        let manager = managers::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Manager not found"))?;
        Ok(password_stripped(&manager))
    }
}
