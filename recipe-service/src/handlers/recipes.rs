//! HTTP handlers for the `/recipes` resource.
//!
//! Each handler makes exactly one record store call. A miss becomes 404; every
//! other store failure, malformed ids included, becomes an opaque 500, except
//! on create where any failure is reported as 400 "Invalid data".

use crate::dtos::{CreatedRecipeResponse, MessageResponse, RecipeResponse};
use crate::models::RecipeFields;
use crate::services::{record_store_operation, StoreError};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::error::AppError;

pub const NOT_FOUND_MESSAGE: &str = "Recipe not found";
pub const INVALID_DATA_MESSAGE: &str = "Invalid data";
pub const CREATED_MESSAGE: &str = "Recipe created";
pub const DELETED_MESSAGE: &str = "Recipe deleted";

fn not_found(operation: &'static str) -> AppError {
    record_store_operation(operation, "not_found");
    AppError::NotFound(anyhow::anyhow!(NOT_FOUND_MESSAGE))
}

fn store_failure(operation: &'static str, err: StoreError) -> AppError {
    record_store_operation(operation, "error");
    tracing::error!(operation, error = %err, "Record store operation failed");
    AppError::DatabaseError(err.into())
}

fn found<T>(operation: &'static str, value: T) -> T {
    record_store_operation(operation, "ok");
    value
}

fn malformed_payload(rejection: JsonRejection) -> StoreError {
    StoreError::MalformedPayload(rejection.body_text())
}

pub async fn list_recipes(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    const OP: &str = "find_all";

    let recipes = state
        .store
        .find_all()
        .await
        .map_err(|e| store_failure(OP, e))?;

    let recipes: Vec<RecipeResponse> = found(OP, recipes)
        .into_iter()
        .map(RecipeResponse::from)
        .collect();

    Ok(Json(recipes))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    const OP: &str = "find_by_id";

    let recipe = state
        .store
        .find_by_id(&id)
        .await
        .map_err(|e| store_failure(OP, e))?
        .ok_or_else(|| not_found(OP))?;

    Ok(Json(RecipeResponse::from(found(OP, recipe))))
}

pub async fn create_recipe(
    State(state): State<AppState>,
    payload: Result<Json<RecipeFields>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    const OP: &str = "create";

    let result = match payload {
        Ok(Json(fields)) => state.store.create(fields).await,
        Err(rejection) => Err(malformed_payload(rejection)),
    };

    let recipe = result.map_err(|e| {
        record_store_operation(OP, "error");
        tracing::warn!(error = %e, "Rejected recipe creation");
        AppError::BadRequest(anyhow::anyhow!(INVALID_DATA_MESSAGE))
    })?;

    tracing::info!(recipe_id = %recipe.id, "Recipe created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedRecipeResponse {
            message: CREATED_MESSAGE.to_string(),
            recipe: RecipeResponse::from(found(OP, recipe)),
        }),
    ))
}

pub async fn update_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RecipeFields>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    const OP: &str = "find_by_id_and_update";

    let result = match payload {
        Ok(Json(fields)) => state.store.find_by_id_and_update(&id, fields).await,
        Err(rejection) => Err(malformed_payload(rejection)),
    };

    let recipe = result
        .map_err(|e| store_failure(OP, e))?
        .ok_or_else(|| not_found(OP))?;

    tracing::info!(recipe_id = %recipe.id, "Recipe updated");

    Ok(Json(RecipeResponse::from(found(OP, recipe))))
}

pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    const OP: &str = "find_by_id_and_delete";

    let deleted = state
        .store
        .find_by_id_and_delete(&id)
        .await
        .map_err(|e| store_failure(OP, e))?
        .ok_or_else(|| not_found(OP))?;

    let deleted = found(OP, deleted);
    tracing::info!(recipe_id = %deleted.id, "Recipe deleted");

    Ok(Json(MessageResponse::new(DELETED_MESSAGE)))
}
