use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Meal, MealPatch, NewMeal};
use crate::error::AppError;

/// Meal persistence; every lookup is scoped to the owning user.
#[async_trait]
pub trait MealRepo: Send + Sync {
    async fn insert(&self, new: NewMeal) -> Result<Meal, AppError>;
    /// Oldest first.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Meal>, AppError>;
    async fn find(&self, user_id: Uuid, meal_id: Uuid) -> Result<Option<Meal>, AppError>;
    async fn update(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        patch: MealPatch,
    ) -> Result<Option<Meal>, AppError>;
    async fn delete(&self, user_id: Uuid, meal_id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgMealRepo {
    db: PgPool,
}

impl PgMealRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealRepo for PgMealRepo {
    async fn insert(&self, new: NewMeal) -> Result<Meal, AppError> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            INSERT INTO meals (id, user_id, name, description, is_on_diet)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, name, description, is_on_diet, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.is_on_diet)
        .fetch_one(&self.db)
        .await
        .context("insert meal")?;
        Ok(meal)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Meal>, AppError> {
        let rows = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, user_id, name, description, is_on_diet, created_at
              FROM meals
             WHERE user_id = $1
             ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list meals by user")?;
        Ok(rows)
    }

    async fn find(&self, user_id: Uuid, meal_id: Uuid) -> Result<Option<Meal>, AppError> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, user_id, name, description, is_on_diet, created_at
              FROM meals
             WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(meal_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("find meal")?;
        Ok(meal)
    }

    async fn update(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        patch: MealPatch,
    ) -> Result<Option<Meal>, AppError> {
        let meal = sqlx::query_as::<_, Meal>(
            r#"
            UPDATE meals
               SET name = COALESCE($3, name),
                   description = COALESCE($4, description),
                   is_on_diet = COALESCE($5, is_on_diet)
             WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, description, is_on_diet, created_at
            "#,
        )
        .bind(meal_id)
        .bind(user_id)
        .bind(&patch.name)
        .bind(&patch.description)
        .bind(patch.is_on_diet)
        .fetch_optional(&self.db)
        .await
        .context("update meal")?;
        Ok(meal)
    }

    async fn delete(&self, user_id: Uuid, meal_id: Uuid) -> Result<bool, AppError> {
        let res = sqlx::query("DELETE FROM meals WHERE id = $1 AND user_id = $2")
            .bind(meal_id)
            .bind(user_id)
            .execute(&self.db)
            .await
            .context("delete meal")?;
        Ok(res.rows_affected() > 0)
    }
}
