//! Purchases Entity
//!
//! Sales records. A purchase is created exactly once per successful buy and
//! is immutable afterwards; no update or delete path is exposed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:             Uuid,
    pub car_id:         Uuid,
    pub customer_id:    Uuid,
    pub purchase_date:  chrono::DateTime<chrono::Utc>,
    pub purchase_price: f64,
    pub payment_method: PaymentMethod,
    pub created_at:     chrono::DateTime<chrono::Utc>,
    pub updated_at:     chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cars::Entity",
        from = "Column::CarId",
        to = "super::cars::Column::Id"
    )]
    Car,
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id"
    )]
    Customer,
}

impl Related<super::cars::Entity> for Entity {
    fn to() -> RelationDef { Relation::Car.def() }
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef { Relation::Customer.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Payment method tag stored with a purchase. No payment processing happens;
/// this is a label only.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "CASH")]
    Cash,
    #[sea_orm(string_value = "CREDIT_CARD")]
    CreditCard,
    #[sea_orm(string_value = "BANK_TRANSFER")]
    BankTransfer,
    #[sea_orm(string_value = "FINANCING")]
    Financing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_serde() {
        let json = serde_json::to_string(&PaymentMethod::CreditCard).unwrap();
        assert_eq!(json, "\"CREDIT_CARD\"");

        let parsed: PaymentMethod = serde_json::from_str("\"BANK_TRANSFER\"").unwrap();
        assert_eq!(parsed, PaymentMethod::BankTransfer);
    }

    #[test]
    fn test_payment_method_rejects_unknown() {
        let parsed: Result<PaymentMethod, _> = serde_json::from_str("\"BARTER\"");
        assert!(parsed.is_err());
    }
}
