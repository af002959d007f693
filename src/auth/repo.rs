use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

use super::repo_types::Session;
use crate::error::AppError;

#[async_trait]
pub trait SessionRepo: Send + Sync {
    /// Stores `session`, dropping sessions that expired before it was created.
    async fn insert(&self, session: Session) -> Result<Session, AppError>;
    /// Returns the session only while it has not expired.
    async fn find_active(
        &self,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<Option<Session>, AppError>;
    async fn delete(&self, token: &str) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgSessionRepo {
    db: PgPool,
}

impl PgSessionRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SessionRepo for PgSessionRepo {
    async fn insert(&self, session: Session) -> Result<Session, AppError> {
        let mut tx = self.db.begin().await.context("begin tx")?;

        sqlx::query("DELETE FROM sessions WHERE expires_at <= $1")
            .bind(session.created_at)
            .execute(&mut *tx)
            .await
            .context("purge expired sessions")?;

        let row = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (token, user_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING token, user_id, created_at, expires_at
            "#,
        )
        .bind(&session.token)
        .bind(session.user_id)
        .bind(session.created_at)
        .bind(session.expires_at)
        .fetch_one(&mut *tx)
        .await
        .context("insert session")?;

        tx.commit().await.context("commit tx")?;
        Ok(row)
    }

    async fn find_active(
        &self,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<Option<Session>, AppError> {
        let row = sqlx::query_as::<_, Session>(
            r#"
            SELECT token, user_id, created_at, expires_at
              FROM sessions
             WHERE token = $1 AND expires_at > $2
            "#,
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.db)
        .await
        .context("find session")?;
        Ok(row)
    }

    async fn delete(&self, token: &str) -> Result<bool, AppError> {
        let res = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.db)
            .await
            .context("delete session")?;
        Ok(res.rows_affected() > 0)
    }
}
