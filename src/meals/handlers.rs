use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CreateMealRequest, MealListResponse, MealResponse, MealView, UpdateMealRequest},
    repo_types::{MealPatch, NewMeal},
};
use crate::{auth::AuthSession, error::AppError, state::AppState, users::dto::MessageResponse};

type MealPath = WithRejection<Path<Uuid>, AppError>;

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route(
            "/meals/:meal_id",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
}

#[instrument(skip_all)]
pub async fn create_meal(
    State(state): State<AppState>,
    session: AuthSession,
    WithRejection(Json(body), _): WithRejection<Json<CreateMealRequest>, AppError>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<MealResponse>), AppError> {
    let user = session.require_user(&state, AppError::Forbidden).await?;
    let meal = state
        .meals
        .insert(NewMeal {
            user_id: user.id,
            name: body.name,
            description: body.description,
            is_on_diet: body.is_on_diet,
        })
        .await?;

    info!(user_id = %user.id, meal_id = %meal.id, on_diet = ?meal.is_on_diet, "meal created");
    let location = format!("/meals/{}", meal.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(MealResponse { meal: meal.into() }),
    ))
}

#[instrument(skip_all)]
pub async fn list_meals(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<MealListResponse>, AppError> {
    let user = session.require_user(&state, AppError::Forbidden).await?;
    let meals = state.meals.list_by_user(user.id).await?;
    Ok(Json(MealListResponse {
        meals: meals.into_iter().map(MealView::from).collect(),
    }))
}

#[instrument(skip_all, fields(%meal_id))]
pub async fn get_meal(
    State(state): State<AppState>,
    session: AuthSession,
    WithRejection(Path(meal_id), _): MealPath,
) -> Result<Json<MealResponse>, AppError> {
    let user = session.require_user(&state, AppError::Forbidden).await?;
    let meal = state
        .meals
        .find(user.id, meal_id)
        .await?
        .ok_or(AppError::MealNotFound)?;
    Ok(Json(MealResponse { meal: meal.into() }))
}

#[instrument(skip_all, fields(%meal_id))]
pub async fn update_meal(
    State(state): State<AppState>,
    session: AuthSession,
    WithRejection(Path(meal_id), _): MealPath,
    WithRejection(Json(body), _): WithRejection<Json<UpdateMealRequest>, AppError>,
) -> Result<Json<MessageResponse>, AppError> {
    let user = session.require_user(&state, AppError::Forbidden).await?;
    let patch = MealPatch {
        name: body.name,
        description: body.description,
        is_on_diet: body.is_on_diet,
    };
    state
        .meals
        .update(user.id, meal_id, patch)
        .await?
        .ok_or(AppError::MealNotFound)?;

    info!(user_id = %user.id, "meal updated");
    Ok(Json(MessageResponse {
        message: "Meal successfully updated",
    }))
}

#[instrument(skip_all, fields(%meal_id))]
pub async fn delete_meal(
    State(state): State<AppState>,
    session: AuthSession,
    WithRejection(Path(meal_id), _): MealPath,
) -> Result<StatusCode, AppError> {
    let user = session.require_user(&state, AppError::Forbidden).await?;
    if !state.meals.delete(user.id, meal_id).await? {
        return Err(AppError::MealNotFound);
    }
    info!(user_id = %user.id, "meal deleted");
    Ok(StatusCode::NO_CONTENT)
}
