use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::{errors::JsonApiError, extract::JsonBody, state::AppState};

/// A non-integer id can never name an account, so it is a 404 rather than a 400.
fn account_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, JsonApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| JsonApiError::not_found("account id must be an integer"))
}

fn not_found(id: i32) -> JsonApiError {
    JsonApiError::not_found(format!("Account with id [{id}] not found."))
}

#[utoipa::path(
    get, path = "/accounts", tag = "accounts",
    responses((status = 200, description = "All accounts", body = [crate::openapi::AccountDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Value>>, JsonApiError> {
    info!("request to list accounts");
    let accounts = state.accounts.list().await?;
    info!(count = accounts.len(), "returning accounts");
    Ok(Json(accounts.iter().map(|a| Value::Object(a.serialize())).collect()))
}

#[utoipa::path(
    post, path = "/accounts", tag = "accounts",
    request_body = crate::openapi::AccountInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::AccountDoc),
        (status = 400, description = "Malformed body or validation error"),
        (status = 415, description = "Content-Type is not application/json")
    )
)]
pub async fn create(State(state): State<AppState>, body: JsonBody) -> Result<impl IntoResponse, JsonApiError> {
    info!("request to create an account");
    let payload = body.parse()?;
    let created = state.accounts.create(&payload).await?;

    let location = format!("/accounts/{}", created.id);
    info!(id = created.id, %location, "account created");
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(Value::Object(created.serialize())),
    ))
}

#[utoipa::path(
    get, path = "/accounts/{id}", tag = "accounts",
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::AccountDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn read(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>, JsonApiError> {
    let id = account_id(path)?;
    info!(id, "request to read an account");
    match state.accounts.get(id).await? {
        Some(acct) => Ok(Json(Value::Object(acct.serialize()))),
        None => Err(not_found(id)),
    }
}

#[utoipa::path(
    put, path = "/accounts/{id}", tag = "accounts",
    params(("id" = i32, Path, description = "Account ID")),
    request_body = crate::openapi::AccountInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AccountDoc),
        (status = 400, description = "Malformed body or validation error"),
        (status = 404, description = "Not Found"),
        (status = 415, description = "Content-Type is not application/json")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    body: JsonBody,
) -> Result<Json<Value>, JsonApiError> {
    let id = account_id(path)?;
    info!(id, "request to update an account");
    let Some(current) = state.accounts.get(id).await? else {
        return Err(not_found(id));
    };

    let payload = body.parse()?;
    let updated = state.accounts.update(current, &payload).await?;
    Ok(Json(Value::Object(updated.serialize())))
}

#[utoipa::path(
    delete, path = "/accounts/{id}", tag = "accounts",
    params(("id" = i32, Path, description = "Account ID")),
    responses((status = 204, description = "Deleted, or did not exist"))
)]
pub async fn delete(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let id = account_id(path)?;
    info!(id, "request to delete an account");
    if !state.accounts.delete(id).await? {
        info!(id, "account already absent");
    }
    Ok(StatusCode::NO_CONTENT)
}
