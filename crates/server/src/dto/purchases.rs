//! # Purchase Data Transfer Objects

use chrono::{DateTime, Utc};
use entity::PaymentMethod;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request body for a purchase. The customer identity comes from the bearer
/// token, never from the body.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct CreatePurchaseRequest {
    pub car_id: Uuid,

    #[validate(range(min = 0.0, message = "Purchase price must be a positive number"))]
    pub purchase_price: f64,

    pub payment_method: PaymentMethod,
}

/// Short car projection embedded in purchase responses.
#[derive(Debug, Clone, Serialize)]
pub struct CarSummary {
    pub id:         Uuid,
    pub make:       String,
    pub model_name: String,
    pub year:       i32,
    pub vin:        String,
    pub price:      f64,
}

impl From<entity::cars::Model> for CarSummary {
    fn from(car: entity::cars::Model) -> Self {
        Self {
            id:         car.id,
            make:       car.make,
            model_name: car.model_name,
            year:       car.year,
            vin:        car.vin,
            price:      car.price,
        }
    }
}

/// Short customer projection embedded in purchase responses.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerSummary {
    pub id:         Uuid,
    pub first_name: String,
    pub last_name:  String,
    pub email:      String,
}

impl From<entity::customers::Model> for CustomerSummary {
    fn from(customer: entity::customers::Model) -> Self {
        Self {
            id:         customer.id,
            first_name: customer.first_name,
            last_name:  customer.last_name,
            email:      customer.email,
        }
    }
}

/// Purchase record with its car and customer summaries resolved.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseDetail {
    pub id:             Uuid,
    pub car_id:         Uuid,
    pub customer_id:    Uuid,
    pub purchase_date:  DateTime<Utc>,
    pub purchase_price: f64,
    pub payment_method: PaymentMethod,
    pub created_at:     DateTime<Utc>,
    pub car:            Option<CarSummary>,
    pub customer:       Option<CustomerSummary>,
}

impl PurchaseDetail {
    pub fn new(
        purchase: entity::purchases::Model,
        car: Option<entity::cars::Model>,
        customer: Option<entity::customers::Model>,
    ) -> Self {
        Self {
            id:             purchase.id,
            car_id:         purchase.car_id,
            customer_id:    purchase.customer_id,
            purchase_date:  purchase.purchase_date,
            purchase_price: purchase.purchase_price,
            payment_method: purchase.payment_method,
            created_at:     purchase.created_at,
            car:            car.map(CarSummary::from),
            customer:       customer.map(CustomerSummary::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_purchase_rejects_negative_price() {
        let req = CreatePurchaseRequest {
            car_id:         Uuid::new_v4(),
            purchase_price: -100.0,
            payment_method: PaymentMethod::Cash,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_purchase_accepts_zero_price() {
        let req = CreatePurchaseRequest {
            car_id:         Uuid::new_v4(),
            purchase_price: 0.0,
            payment_method: PaymentMethod::Cash,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_purchase_deserializes_payment_method() {
        let req: CreatePurchaseRequest = serde_json::from_value(serde_json::json!({
            "car_id": Uuid::new_v4(),
            "purchase_price": 21500.0,
            "payment_method": "FINANCING",
        }))
        .unwrap();
        assert_eq!(req.payment_method, PaymentMethod::Financing);
    }
}
