use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::Meal;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    pub name: String,
    pub description: String,
    pub is_on_diet: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_on_diet: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealView {
    pub meal_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub is_on_diet: Option<bool>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Meal> for MealView {
    fn from(m: Meal) -> Self {
        Self {
            meal_id: m.id,
            user_id: m.user_id,
            name: m.name,
            description: m.description,
            is_on_diet: m.is_on_diet,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub meal: MealView,
}

#[derive(Debug, Serialize)]
pub struct MealListResponse {
    pub meals: Vec<MealView>,
}
