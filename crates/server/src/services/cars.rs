//! # Car Service
//!
//! Inventory CRUD with filtered, sorted and paginated listings.

use chrono::Utc;
use entity::{cars, categories, CarStatus, UserRole};
use error::{AppError, Pagination, Result};
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait,
    ColumnTrait,
    Condition,
    DbConn,
    EntityTrait,
    ModelTrait,
    Order,
    PaginatorTrait,
    QueryFilter,
    QueryOrder,
    Set,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::dto::cars::{CarListResponse, CarQuery, CreateCarRequest, UpdateCarRequest};

#[derive(Clone)]
pub struct CarService {
    db: DbConn,
}

impl CarService {
    #[must_use]
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
        }
    }

    /// Persists a new car tagged with the creating account.
    ///
    /// # Errors
    ///
    /// Fails when the referenced category is absent or the VIN is taken.
    pub async fn create_car(&self, req: CreateCarRequest, user_id: Uuid, user_role: UserRole) -> Result<cars::Model> {
        let category = categories::Entity::find_by_id(req.category_id)
            .one(&self.db)
            .await?;
        if category.is_none() {
            return Err(AppError::bad_request("Category not found"));
        }

        let vin_taken = cars::Entity::find()
            .filter(cars::Column::Vin.eq(&req.vin))
            .one(&self.db)
            .await?;
        if vin_taken.is_some() {
            return Err(AppError::conflict("vin", "Car with this VIN already exists"));
        }

        let now = Utc::now();
        let car = cars::ActiveModel {
            id: Set(Uuid::new_v4()),
            make: Set(req.make),
            model_name: Set(req.model_name),
            year: Set(req.year),
            price: Set(req.price),
            mileage: Set(req.mileage),
            color: Set(req.color),
            category_id: Set(req.category_id),
            status: Set(req.status.unwrap_or(CarStatus::Available)),
            features: Set(serde_json::json!(req.features)),
            images: Set(serde_json::json!(req.images)),
            vin: Set(req.vin),
            added_by_id: Set(user_id),
            added_by_role: Set(user_role),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(car_id = %car.id, vin = %car.vin, "Car created");
        Ok(car)
    }

    /// Filtered, sorted, paginated listing.
    ///
    /// Unknown status values and sort fields fall back to no filter and
    /// newest-first ordering respectively.
    pub async fn get_cars(&self, query: CarQuery) -> Result<CarListResponse> {
        let mut select = cars::Entity::find();

        if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", search.to_lowercase());
            select = select.filter(
                Condition::any()
                    .add(Expr::expr(Func::lower(Expr::col(cars::Column::Make))).like(pattern.as_str()))
                    .add(Expr::expr(Func::lower(Expr::col(cars::Column::ModelName))).like(pattern.as_str()))
                    .add(Expr::expr(Func::lower(Expr::col(cars::Column::Vin))).like(pattern.as_str())),
            );
        }

        if let Some(category) = query.category {
            select = select.filter(cars::Column::CategoryId.eq(category));
        }

        if let Some(status) = query.status.as_deref().and_then(CarStatus::parse) {
            select = select.filter(cars::Column::Status.eq(status));
        }

        if let Some(min_price) = query.min_price {
            select = select.filter(cars::Column::Price.gte(min_price));
        }

        if let Some(max_price) = query.max_price {
            select = select.filter(cars::Column::Price.lte(max_price));
        }

        let sort_column = match query.sort_by.as_deref() {
            Some("price") => cars::Column::Price,
            Some("year") => cars::Column::Year,
            Some("mileage") => cars::Column::Mileage,
            _ => cars::Column::CreatedAt,
        };
        let sort_order = match query.sort_order.as_deref() {
            Some("asc") => Order::Asc,
            _ => Order::Desc,
        };

        let page = query.page.max(1);
        let limit = query.limit.clamp(1, 100);

        let paginator = select
            .order_by(sort_column, sort_order)
            .paginate(&self.db, limit);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page - 1).await?;

        debug!(total = total, page = page, "Cars listed");

        Ok(CarListResponse {
            cars:       items,
            pagination: Pagination::new(total, page, limit),
        })
    }

    pub async fn get_car(&self, id: Uuid) -> Result<cars::Model> {
        cars::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Car not found"))
    }

    /// Unfiltered listing for one category.
    pub async fn get_cars_by_category(&self, category_id: Uuid) -> Result<Vec<cars::Model>> {
        let category = categories::Entity::find_by_id(category_id)
            .one(&self.db)
            .await?;
        if category.is_none() {
            return Err(AppError::bad_request("Category not found"));
        }

        let items = cars::Entity::find()
            .filter(cars::Column::CategoryId.eq(category_id))
            .order_by_desc(cars::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(items)
    }

    /// Partial merge; unspecified fields preserve the stored value.
    pub async fn update_car(&self, id: Uuid, req: UpdateCarRequest) -> Result<cars::Model> {
        let car = self.get_car(id).await?;

        if let Some(vin) = &req.vin {
            if *vin != car.vin {
                let vin_taken = cars::Entity::find()
                    .filter(cars::Column::Vin.eq(vin))
                    .one(&self.db)
                    .await?;
                if vin_taken.is_some() {
                    return Err(AppError::conflict("vin", "Car with this VIN already exists"));
                }
            }
        }

        if let Some(category_id) = req.category_id {
            let category = categories::Entity::find_by_id(category_id)
                .one(&self.db)
                .await?;
            if category.is_none() {
                return Err(AppError::bad_request("Category not found"));
            }
        }

        let mut active: cars::ActiveModel = car.into();
        if let Some(make) = req.make {
            active.make = Set(make);
        }
        if let Some(model_name) = req.model_name {
            active.model_name = Set(model_name);
        }
        if let Some(year) = req.year {
            active.year = Set(year);
        }
        if let Some(price) = req.price {
            active.price = Set(price);
        }
        if let Some(mileage) = req.mileage {
            active.mileage = Set(mileage);
        }
        if let Some(color) = req.color {
            active.color = Set(color);
        }
        if let Some(category_id) = req.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(status) = req.status {
            active.status = Set(status);
        }
        if let Some(features) = req.features {
            active.features = Set(serde_json::json!(features));
        }
        if let Some(images) = req.images {
            active.images = Set(serde_json::json!(images));
        }
        if let Some(vin) = req.vin {
            active.vin = Set(vin);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await?;
        info!(car_id = %updated.id, "Car updated");
        Ok(updated)
    }

    pub async fn delete_car(&self, id: Uuid) -> Result<()> {
        let car = self.get_car(id).await?;
        car.delete(&self.db).await?;
        info!(car_id = %id, "Car deleted");
        Ok(())
    }
}
