//! # Auth Service
//!
//! Registration, login, profile lookup and password changes for all three
//! account tiers, plus the idempotent administrator seed.

use auth::{
    jwt::create_token,
    password::{hash_password, verify_password},
    secrecy::SecretString,
    JwtConfig,
};
use chrono::Utc;
use entity::{admins, customers, managers, UserRole};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, Set};
use tracing::info;
use uuid::Uuid;

use crate::{
    dto::auth::{AuthResponse, ChangePasswordRequest, LoginRequest, RegisterCustomerRequest, RegisterManagerRequest},
    services::accounts::{account_store, password_stripped},
};

#[derive(Clone)]
pub struct AuthService {
    db:  DbConn,
    jwt: JwtConfig,
}

impl AuthService {
    #[must_use]
    pub fn new(db: DbConn, jwt: JwtConfig) -> Self {
        Self {
            db,
            jwt,
        }
    }

    fn issue_token(&self, id: Uuid, email: &str, role: UserRole) -> Result<String> {
        create_token(&self.jwt, &id.to_string(), email, role.as_str())
            .map_err(|e| AppError::internal(format!("Failed to issue token: {}", e)))
    }

    fn hash(&self, plaintext: String) -> Result<String> {
        hash_password(&SecretString::from(plaintext)).map_err(|e| AppError::internal(e.to_string()))
    }

    /// Registers a customer account and logs it in.
    ///
    /// # Errors
    ///
    /// Fails with a field-named conflict when the email or license number is
    /// already taken.
    pub async fn register_customer(&self, req: RegisterCustomerRequest) -> Result<AuthResponse> {
        let email_taken = customers::Entity::find()
            .filter(customers::Column::Email.eq(&req.email))
            .one(&self.db)
            .await?;
        if email_taken.is_some() {
            return Err(AppError::conflict(
                "email",
                "Customer with this email already exists",
            ));
        }

        let license_taken = customers::Entity::find()
            .filter(customers::Column::LicenseNumber.eq(&req.license_number))
            .one(&self.db)
            .await?;
        if license_taken.is_some() {
            return Err(AppError::conflict(
                "license_number",
                "Customer with this license number already exists",
            ));
        }

        let now = Utc::now();
        let customer = customers::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(req.email),
            password_hash: Set(self.hash(req.password)?),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            phone: Set(req.phone),
            street: Set(req.address.street),
            city: Set(req.address.city),
            state: Set(req.address.state),
            zip_code: Set(req.address.zip_code),
            country: Set(req.address.country),
            date_of_birth: Set(req.date_of_birth),
            license_number: Set(req.license_number),
            role: Set(UserRole::Customer),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(customer_id = %customer.id, "Customer registered");

        let token = self.issue_token(customer.id, &customer.email, UserRole::Customer)?;
        Ok(AuthResponse {
            user: password_stripped(&customer),
            token,
        })
    }

    /// Registers a manager account. Reachable by administrators only.
    pub async fn register_manager(&self, req: RegisterManagerRequest) -> Result<AuthResponse> {
        let email_taken = managers::Entity::find()
            .filter(managers::Column::Email.eq(&req.email))
            .one(&self.db)
            .await?;
        if email_taken.is_some() {
            return Err(AppError::conflict(
                "email",
                "Manager with this email already exists",
            ));
        }

        let now = Utc::now();
        let manager = managers::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(req.email),
            password_hash: Set(self.hash(req.password)?),
            first_name: Set(req.first_name),
            last_name: Set(req.last_name),
            phone: Set(req.phone),
            role: Set(UserRole::Manager),
            is_active: Set(true),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(manager_id = %manager.id, "Manager registered");

        let token = self.issue_token(manager.id, &manager.email, UserRole::Manager)?;
        Ok(AuthResponse {
            user: password_stripped(&manager),
            token,
        })
    }

    /// Logs an account in against the collection selected by `role`.
    ///
    /// Absent email and wrong password produce the identical error so the
    /// response does not leak which check failed.
    pub async fn login(&self, role: UserRole, req: LoginRequest) -> Result<AuthResponse> {
        let store = account_store(role);

        let profile = store
            .find_by_email(&self.db, &req.email)
            .await?
            .ok_or_else(|| AppError::bad_request("Invalid credentials"))?;

        verify_password(&SecretString::from(req.password), &profile.password_hash)
            .map_err(|_| AppError::bad_request("Invalid credentials"))?;

        store.touch_last_login(&self.db, profile.id).await?;

        info!(account_id = %profile.id, role = %role, "Login successful");

        let token = self.issue_token(profile.id, &profile.email, role)?;
        Ok(AuthResponse {
            user: profile.user,
            token,
        })
    }

    /// Password-stripped projection of the authenticated account.
    pub async fn profile(&self, id: Uuid, role: UserRole) -> Result<serde_json::Value> {
        let profile = account_store(role)
            .find_by_id(&self.db, id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        Ok(profile.user)
    }

    /// Re-hashes and stores a new password after checking the current one.
    pub async fn change_password(&self, id: Uuid, role: UserRole, req: ChangePasswordRequest) -> Result<()> {
        let store = account_store(role);

        let profile = store
            .find_by_id(&self.db, id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        verify_password(
            &SecretString::from(req.current_password),
            &profile.password_hash,
        )
        .map_err(|_| AppError::bad_request("Current password is incorrect"))?;

        let hash = self.hash(req.new_password)?;
        store.set_password_hash(&self.db, id, hash).await?;

        info!(account_id = %id, role = %role, "Password changed");
        Ok(())
    }

    /// Seeds the administrator account if it does not exist yet. Safe to run
    /// on every startup.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<()> {
        let existing = admins::Entity::find()
            .filter(admins::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Ok(());
        }

        let now = Utc::now();
        let admin = admins::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            password_hash: Set(self.hash(password.to_string())?),
            role: Set(UserRole::Admin),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(admin_id = %admin.id, "Administrator account seeded");
        Ok(())
    }
}
