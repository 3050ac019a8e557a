//! # Purchase Service
//!
//! Purchase creation flips the car's status AVAILABLE -> SOLD through an
//! atomic conditional update inside a transaction, so two concurrent buys of
//! the same car cannot both succeed.

use chrono::Utc;
use entity::{cars, customers, purchases, CarStatus};
use error::{AppError, Result};
use sea_orm::{
    sea_query::Expr,
    ActiveModelTrait,
    ColumnTrait,
    ConnectionTrait,
    DbConn,
    EntityTrait,
    QueryFilter,
    QueryOrder,
    Set,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::dto::purchases::{CreatePurchaseRequest, PurchaseDetail};

#[derive(Clone)]
pub struct PurchaseService {
    db: DbConn,
}

impl PurchaseService {
    #[must_use]
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
        }
    }

    /// Records a purchase and marks the car SOLD.
    ///
    /// # Errors
    ///
    /// Fails when the car is absent, not AVAILABLE, or priced differently
    /// from the offered amount. A failed attempt leaves the car untouched.
    pub async fn create_purchase(&self, customer_id: Uuid, req: CreatePurchaseRequest) -> Result<PurchaseDetail> {
        let txn = self.db.begin().await?;

        let car = cars::Entity::find_by_id(req.car_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::bad_request("Car not found"))?;

        if car.status != CarStatus::Available {
            return Err(AppError::bad_request("Car is not available for purchase"));
        }

        if req.purchase_price != car.price {
            return Err(AppError::bad_request("Purchase price does not match car price"));
        }

        let customer = customers::Entity::find_by_id(customer_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::bad_request("Customer not found"))?;

        // Conditional update closes the window between the status read above
        // and the write: a concurrent purchase that got there first leaves
        // zero rows to update here.
        let flipped = cars::Entity::update_many()
            .col_expr(cars::Column::Status, Expr::value(CarStatus::Sold))
            .col_expr(cars::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(cars::Column::Id.eq(req.car_id))
            .filter(cars::Column::Status.eq(CarStatus::Available))
            .exec(&txn)
            .await?;
        if flipped.rows_affected == 0 {
            return Err(AppError::bad_request("Car is not available for purchase"));
        }

        let now = Utc::now();
        let purchase = purchases::ActiveModel {
            id: Set(Uuid::new_v4()),
            car_id: Set(req.car_id),
            customer_id: Set(customer_id),
            purchase_date: Set(now),
            purchase_price: Set(req.purchase_price),
            payment_method: Set(req.payment_method),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(purchase_id = %purchase.id, car_id = %req.car_id, "Purchase completed");

        Ok(PurchaseDetail::new(purchase, Some(car), Some(customer)))
    }

    pub async fn get_purchase(&self, id: Uuid) -> Result<PurchaseDetail> {
        let purchase = purchases::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Purchase not found"))?;
        self.with_summaries(&self.db, purchase).await
    }

    /// Purchases of one customer, newest first.
    pub async fn get_customer_purchases(&self, customer_id: Uuid) -> Result<Vec<PurchaseDetail>> {
        let records = purchases::Entity::find()
            .filter(purchases::Column::CustomerId.eq(customer_id))
            .order_by_desc(purchases::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let mut details = Vec::with_capacity(records.len());
        for purchase in records {
            details.push(self.with_summaries(&self.db, purchase).await?);
        }
        Ok(details)
    }

    /// Every purchase on record, newest first.
    pub async fn get_all_purchases(&self) -> Result<Vec<PurchaseDetail>> {
        let records = purchases::Entity::find()
            .order_by_desc(purchases::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let mut details = Vec::with_capacity(records.len());
        for purchase in records {
            details.push(self.with_summaries(&self.db, purchase).await?);
        }
        Ok(details)
    }

    async fn with_summaries<C: ConnectionTrait>(&self, conn: &C, purchase: purchases::Model) -> Result<PurchaseDetail> {
        let car = cars::Entity::find_by_id(purchase.car_id).one(conn).await?;
        let customer = customers::Entity::find_by_id(purchase.customer_id)
            .one(conn)
            .await?;
        Ok(PurchaseDetail::new(purchase, car, customer))
    }
}
