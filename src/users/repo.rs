use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{NewUser, User, UserPatch};
use crate::error::AppError;

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Inserts a user; a duplicate email yields [`AppError::EmailTaken`].
    async fn create(&self, new: NewUser) -> Result<User, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<Option<User>, AppError>;
    /// Removes the user together with its sessions and meals.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn unique_or_internal(e: sqlx::Error, what: &'static str) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return AppError::EmailTaken;
        }
    }
    AppError::Internal(anyhow::Error::new(e).context(what))
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn create(&self, new: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, name, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(&new.name)
        .fetch_one(&self.db)
        .await
        .map_err(|e| unique_or_internal(e, "insert user"))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, name, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
               SET email = COALESCE($2, email),
                   password_hash = COALESCE($3, password_hash),
                   name = COALESCE($4, name)
             WHERE id = $1
            RETURNING id, email, password_hash, name, created_at
            "#,
        )
        .bind(id)
        .bind(&patch.email)
        .bind(&patch.password_hash)
        .bind(&patch.name)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| unique_or_internal(e, "update user"))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        sqlx::query("DELETE FROM meals WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("delete user meals")?;
        sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("delete user sessions")?;
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("delete user")?;
        tx.commit().await.context("commit tx")?;
        Ok(res.rows_affected() > 0)
    }
}
