//! Account role enumeration shared by every account collection.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role tier of an authenticated account.
///
/// There is no implicit hierarchy between roles; every route declares its
/// own allow-list explicitly.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    #[sea_orm(string_value = "MANAGER")]
    Manager,
    #[sea_orm(string_value = "CUSTOMER")]
    Customer,
}

impl UserRole {
    /// The canonical wire representation, as carried in token claims.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Manager => "MANAGER",
            UserRole::Customer => "CUSTOMER",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.as_str()) }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(UserRole::Admin),
            "MANAGER" => Ok(UserRole::Manager),
            "CUSTOMER" => Ok(UserRole::Customer),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}
