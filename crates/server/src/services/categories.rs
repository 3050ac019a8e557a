//! # Category Service

use chrono::Utc;
use entity::categories;
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;

use crate::dto::categories::{CreateCategoryRequest, UpdateCategoryRequest};

#[derive(Clone)]
pub struct CategoryService {
    db: DbConn,
}

impl CategoryService {
    #[must_use]
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
        }
    }

    /// Persists a new category.
    ///
    /// # Errors
    ///
    /// Fails with a field-named conflict when the name is taken.
    pub async fn create_category(&self, req: CreateCategoryRequest) -> Result<categories::Model> {
        let name_taken = categories::Entity::find()
            .filter(categories::Column::Name.eq(&req.name))
            .one(&self.db)
            .await?;
        if name_taken.is_some() {
            return Err(AppError::conflict(
                "name",
                "Category with this name already exists",
            ));
        }

        let now = Utc::now();
        let category = categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(req.name),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    pub async fn get_categories(&self) -> Result<Vec<categories::Model>> {
        let items = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await?;
        Ok(items)
    }

    pub async fn get_category(&self, id: Uuid) -> Result<categories::Model> {
        categories::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found"))
    }

    /// Partial merge; unspecified fields preserve the stored value.
    pub async fn update_category(&self, id: Uuid, req: UpdateCategoryRequest) -> Result<categories::Model> {
        let category = self.get_category(id).await?;

        if let Some(name) = &req.name {
            if *name != category.name {
                let name_taken = categories::Entity::find()
                    .filter(categories::Column::Name.eq(name))
                    .one(&self.db)
                    .await?;
                if name_taken.is_some() {
                    return Err(AppError::conflict(
                        "name",
                        "Category with this name already exists",
                    ));
                }
            }
        }

        let mut active: categories::ActiveModel = category.into();
        if let Some(name) = req.name {
            active.name = Set(name);
        }
        if let Some(description) = req.description {
            active.description = Set(description);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await?;
        info!(category_id = %updated.id, "Category updated");
        Ok(updated)
    }

    /// Deletes a category. Cars referencing it are left untouched.
    pub async fn delete_category(&self, id: Uuid) -> Result<()> {
        let category = self.get_category(id).await?;
        category.delete(&self.db).await?;
        info!(category_id = %id, "Category deleted");
        Ok(())
    }
}
