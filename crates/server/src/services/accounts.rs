//! # Account Stores
//!
//! One account collection per role, behind a single polymorphic trait. Auth
//! flows pick the implementation through [`account_store`] instead of
//! branching on the role at every call site.

use async_trait::async_trait;
use auth::password::is_hashed;
use chrono::Utc;
use entity::{admins, customers, managers, UserRole};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, Set};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Credentials and password-stripped projection of one account.
#[derive(Debug, Clone)]
pub struct AccountProfile {
    pub id:            Uuid,
    pub email:         String,
    pub role:          UserRole,
    pub password_hash: String,
    /// Serialized account with the password hash removed.
    pub user:          Value,
}

/// Serializes an account and removes the password hash field.
pub fn password_stripped<T: Serialize>(model: &T) -> Value {
    let mut value = serde_json::to_value(model).unwrap_or(Value::Null);
    if let Value::Object(ref mut map) = value {
        map.remove("password_hash");
    }
    value
}

/// Password columns only ever receive PHC hash strings. A plaintext value
/// reaching a store is a programming error, caught before it persists.
fn reject_unhashed(hash: &str) -> Result<()> {
    if is_hashed(hash) {
        Ok(())
    }
    else {
        Err(AppError::internal("Refusing to persist an unhashed password"))
    }
}

/// Persistence operations every account collection supports.
#[async_trait]
pub trait AccountStore: Send + Sync {
    async fn find_by_email(&self, db: &DbConn, email: &str) -> Result<Option<AccountProfile>>;

    async fn find_by_id(&self, db: &DbConn, id: Uuid) -> Result<Option<AccountProfile>>;

    async fn touch_last_login(&self, db: &DbConn, id: Uuid) -> Result<()>;

    async fn set_password_hash(&self, db: &DbConn, id: Uuid, hash: String) -> Result<()>;
}

/// Role to implementation lookup.
pub fn account_store(role: UserRole) -> &'static dyn AccountStore {
    match role {
        UserRole::Admin => &AdminStore,
        UserRole::Manager => &ManagerStore,
        UserRole::Customer => &CustomerStore,
    }
}

struct AdminStore;

struct ManagerStore;

struct CustomerStore;

fn admin_profile(model: admins::Model) -> AccountProfile {
    let user = password_stripped(&model);
    AccountProfile {
        id: model.id,
        email: model.email,
        role: UserRole::Admin,
        password_hash: model.password_hash,
        user,
    }
}

fn manager_profile(model: managers::Model) -> AccountProfile {
    let user = password_stripped(&model);
    AccountProfile {
        id: model.id,
        email: model.email,
        role: UserRole::Manager,
        password_hash: model.password_hash,
        user,
    }
}

fn customer_profile(model: customers::Model) -> AccountProfile {
    let user = password_stripped(&model);
    AccountProfile {
        id: model.id,
        email: model.email,
        role: UserRole::Customer,
        password_hash: model.password_hash,
        user,
    }
}

#[async_trait]
impl AccountStore for AdminStore {
    async fn find_by_email(&self, db: &DbConn, email: &str) -> Result<Option<AccountProfile>> {
        let found = admins::Entity::find()
            .filter(admins::Column::Email.eq(email))
            .one(db)
            .await?;
        Ok(found.map(admin_profile))
    }

    async fn find_by_id(&self, db: &DbConn, id: Uuid) -> Result<Option<AccountProfile>> {
        let found = admins::Entity::find_by_id(id).one(db).await?;
        Ok(found.map(admin_profile))
    }

    async fn touch_last_login(&self, db: &DbConn, id: Uuid) -> Result<()> {
        let active = admins::ActiveModel {
            id: Set(id),
            last_login: Set(Some(Utc::now())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        active.update(db).await?;
        Ok(())
    }

    async fn set_password_hash(&self, db: &DbConn, id: Uuid, hash: String) -> Result<()> {
        reject_unhashed(&hash)?;
        let active = admins::ActiveModel {
            id: Set(id),
            password_hash: Set(hash),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        active.update(db).await?;
        Ok(())
    }
}

#[async_trait]
impl AccountStore for ManagerStore {
    async fn find_by_email(&self, db: &DbConn, email: &str) -> Result<Option<AccountProfile>> {
        let found = managers::Entity::find()
            .filter(managers::Column::Email.eq(email))
            .one(db)
            .await?;
        Ok(found.map(manager_profile))
    }

    async fn find_by_id(&self, db: &DbConn, id: Uuid) -> Result<Option<AccountProfile>> {
        let found = managers::Entity::find_by_id(id).one(db).await?;
        Ok(found.map(manager_profile))
    }

    async fn touch_last_login(&self, db: &DbConn, id: Uuid) -> Result<()> {
        let active = managers::ActiveModel {
            id: Set(id),
            last_login: Set(Some(Utc::now())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        active.update(db).await?;
        Ok(())
    }

    async fn set_password_hash(&self, db: &DbConn, id: Uuid, hash: String) -> Result<()> {
        reject_unhashed(&hash)?;
        let active = managers::ActiveModel {
            id: Set(id),
            password_hash: Set(hash),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        active.update(db).await?;
        Ok(())
    }
}

#[async_trait]
impl AccountStore for CustomerStore {
    async fn find_by_email(&self, db: &DbConn, email: &str) -> Result<Option<AccountProfile>> {
        let found = customers::Entity::find()
            .filter(customers::Column::Email.eq(email))
            .one(db)
            .await?;
        Ok(found.map(customer_profile))
    }

    async fn find_by_id(&self, db: &DbConn, id: Uuid) -> Result<Option<AccountProfile>> {
        let found = customers::Entity::find_by_id(id).one(db).await?;
        Ok(found.map(customer_profile))
    }

    async fn touch_last_login(&self, db: &DbConn, id: Uuid) -> Result<()> {
        let active = customers::ActiveModel {
            id: Set(id),
            last_login: Set(Some(Utc::now())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        active.update(db).await?;
        Ok(())
    }

    async fn set_password_hash(&self, db: &DbConn, id: Uuid, hash: String) -> Result<()> {
        reject_unhashed(&hash)?;
        let active = customers::ActiveModel {
            id: Set(id),
            password_hash: Set(hash),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        active.update(db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_stripped_removes_hash() {
        let model = admins::Model {
            id:            Uuid::new_v4(),
            email:         "admin@cardealers.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role:          UserRole::Admin,
            last_login:    None,
            created_at:    Utc::now(),
            updated_at:    Utc::now(),
        };

        let value = password_stripped(&model);
        assert!(value.get("password_hash").is_none());
        assert_eq!(
            value.get("email").and_then(Value::as_str),
            Some("admin@cardealers.com")
        );
    }

    #[test]
    fn test_reject_unhashed_blocks_plaintext() {
        assert!(reject_unhashed("Password1@").is_err());
        assert!(
            reject_unhashed("$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g").is_ok()
        );
    }

    #[test]
    fn test_account_store_lookup_covers_all_roles() {
        for role in [UserRole::Admin, UserRole::Manager, UserRole::Customer] {
            let _store = account_store(role);
        }
    }
}
