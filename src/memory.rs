//! In-process store used when `DATABASE_CLIENT=memory` and by the test suite.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    auth::{repo::SessionRepo, repo_types::Session},
    error::AppError,
    meals::{
        repo::MealRepo,
        repo_types::{Meal, MealPatch, NewMeal},
    },
    users::{
        repo::UserRepo,
        repo_types::{NewUser, User, UserPatch},
    },
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    sessions: HashMap<String, Session>,
    // insertion order == creation order
    meals: Vec<Meal>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn create(&self, new: NewUser) -> Result<User, AppError> {
        let mut t = self.tables.write().await;
        if t.users.iter().any(|u| u.email == new.email) {
            return Err(AppError::EmailTaken);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: new.email,
            password_hash: new.password_hash,
            name: new.name,
            created_at: OffsetDateTime::now_utc(),
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let t = self.tables.read().await;
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let t = self.tables.read().await;
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }

    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<Option<User>, AppError> {
        let mut t = self.tables.write().await;
        if let Some(email) = &patch.email {
            if t.users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(AppError::EmailTaken);
            }
        }
        let Some(user) = t.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(hash) = patch.password_hash {
            user.password_hash = hash;
        }
        if let Some(name) = patch.name {
            user.name = Some(name);
        }
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut t = self.tables.write().await;
        let before = t.users.len();
        t.users.retain(|u| u.id != id);
        t.sessions.retain(|_, s| s.user_id != id);
        t.meals.retain(|m| m.user_id != id);
        Ok(t.users.len() != before)
    }
}

#[async_trait]
impl SessionRepo for MemoryStore {
    async fn insert(&self, session: Session) -> Result<Session, AppError> {
        let mut t = self.tables.write().await;
        let now = session.created_at;
        t.sessions.retain(|_, s| s.is_active(now));
        t.sessions.insert(session.token.clone(), session.clone());
        Ok(session)
    }

    async fn find_active(
        &self,
        token: &str,
        now: OffsetDateTime,
    ) -> Result<Option<Session>, AppError> {
        let t = self.tables.read().await;
        Ok(t.sessions
            .get(token)
            .filter(|s| s.is_active(now))
            .cloned())
    }

    async fn delete(&self, token: &str) -> Result<bool, AppError> {
        let mut t = self.tables.write().await;
        Ok(t.sessions.remove(token).is_some())
    }
}

#[async_trait]
impl MealRepo for MemoryStore {
    async fn insert(&self, new: NewMeal) -> Result<Meal, AppError> {
        let mut t = self.tables.write().await;
        let meal = Meal {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            name: new.name,
            description: new.description,
            is_on_diet: Some(new.is_on_diet),
            created_at: OffsetDateTime::now_utc(),
        };
        t.meals.push(meal.clone());
        Ok(meal)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Meal>, AppError> {
        let t = self.tables.read().await;
        Ok(t.meals
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find(&self, user_id: Uuid, meal_id: Uuid) -> Result<Option<Meal>, AppError> {
        let t = self.tables.read().await;
        Ok(t.meals
            .iter()
            .find(|m| m.id == meal_id && m.user_id == user_id)
            .cloned())
    }

    async fn update(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        patch: MealPatch,
    ) -> Result<Option<Meal>, AppError> {
        let mut t = self.tables.write().await;
        let Some(meal) = t
            .meals
            .iter_mut()
            .find(|m| m.id == meal_id && m.user_id == user_id)
        else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            meal.name = name;
        }
        if let Some(description) = patch.description {
            meal.description = description;
        }
        if let Some(flag) = patch.is_on_diet {
            meal.is_on_diet = Some(flag);
        }
        Ok(Some(meal.clone()))
    }

    async fn delete(&self, user_id: Uuid, meal_id: Uuid) -> Result<bool, AppError> {
        let mut t = self.tables.write().await;
        let before = t.meals.len();
        t.meals
            .retain(|m| !(m.id == meal_id && m.user_id == user_id));
        Ok(t.meals.len() != before)
    }
}
