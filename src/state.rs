use std::sync::Arc;

use crate::auth::repo::{PgSessionRepo, SessionRepo};
use crate::config::{AppConfig, DatabaseClient};
use crate::meals::repo::{MealRepo, PgMealRepo};
use crate::memory::MemoryStore;
use crate::users::repo::{PgUserRepo, UserRepo};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepo>,
    pub sessions: Arc<dyn SessionRepo>,
    pub meals: Arc<dyn MealRepo>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        match config.database_client {
            DatabaseClient::Postgres => {
                let db = crate::db::connect(&config).await?;
                crate::db::migrate(&db).await?;
                Ok(Self {
                    users: Arc::new(PgUserRepo::new(db.clone())),
                    sessions: Arc::new(PgSessionRepo::new(db.clone())),
                    meals: Arc::new(PgMealRepo::new(db)),
                    config: Arc::new(config),
                })
            }
            DatabaseClient::Memory => {
                tracing::warn!("using in-memory store; data is lost on restart");
                Ok(Self::with_memory_store(config))
            }
        }
    }

    pub fn with_memory_store(config: AppConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            config: Arc::new(config),
            users: store.clone(),
            sessions: store.clone(),
            meals: store,
        }
    }

    pub fn in_memory() -> Self {
        Self::with_memory_store(AppConfig::in_memory())
    }
}
