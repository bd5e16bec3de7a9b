use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use userbase_core::{DomainError, ErrorContext};
use uuid::Uuid;

use super::with_deadline;
use crate::AppState;
use crate::api_error::ApiError;
use crate::response_types::{ApiResponse, SaveUserRequest, UserResponse};

pub async fn save_user(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SaveUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let Json(req) = body.map_err(|rejection| {
        DomainError::wrap(rejection, ErrorContext::BadRequest, "request body contains malformed data")
    })?;

    let user =
        with_deadline(state.request_timeout, state.user_service.create_user(req.into())).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user.into()))))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let Path(raw_id) = path.map_err(|rejection| {
        DomainError::wrap(rejection, ErrorContext::BadRequest, "request path is malformed")
    })?;
    let id = Uuid::parse_str(&raw_id).map_err(|e| {
        DomainError::wrap(
            e,
            ErrorContext::BadRequest,
            format!("UUID '{raw_id}' is not formatted correctly."),
        )
    })?;

    let user = with_deadline(state.request_timeout, state.user_service.get_user(id)).await?;
    Ok(Json(ApiResponse::success(user.into())))
}
