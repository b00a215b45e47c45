//! Route handlers.
//!
//! Every collaborator failure is translated into a status code here; nothing
//! below this layer writes a response, and no request path panics. Exactly
//! one terminal response is written per request.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::http::server::AppState;
use crate::orders::attach::AttachError;
use crate::orders::types::OrderFields;
use crate::store::NewUser;

/// Main endpoint.
pub async fn root() -> &'static str {
    "This is our main endpoint"
}

/// GET all users.
pub async fn list_users(State(state): State<AppState>) -> Response {
    match state.store.find_all().await {
        Ok(users) => Json(users).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list users");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET a single user.
pub async fn get_user(State(state): State<AppState>, Path(uid): Path<String>) -> Response {
    match state.store.find(&uid).await {
        Ok(Some(user)) => Json(user).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!(user_id = %uid, error = %e, "Failed to look up user");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET all orders for a user, passed through from the Orders service.
pub async fn list_user_orders(State(state): State<AppState>, Path(uid): Path<String>) -> Response {
    match state.orders.list_orders(&uid).await {
        Ok(orders) => Json(orders).into_response(),
        Err(e) => {
            tracing::warn!(user_id = %uid, error = %e, "Failed to list orders");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Create a new user.
pub async fn create_user(State(state): State<AppState>, Json(user): Json<NewUser>) -> Response {
    match state.store.insert(user).await {
        Ok(user) => {
            tracing::debug!(user_id = %user.id, "User created");
            (StatusCode::CREATED, "User created..").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create user");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Create a new order for a user (the two-step saga).
pub async fn create_order(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Json(fields): Json<OrderFields>,
) -> Response {
    match state.attachment.attach_order(&uid, fields).await {
        Ok(outcome) => (StatusCode::CREATED, outcome.message).into_response(),
        Err(e @ AttachError::RemoteCall(_)) => {
            tracing::warn!(user_id = %uid, error = %e, "Order create call failed");
            (StatusCode::BAD_REQUEST, "Error while creating the order").into_response()
        }
        Err(e @ AttachError::RemoteCreateFailed { .. }) => {
            tracing::warn!(user_id = %uid, error = %e, "Orders service refused the create");
            (StatusCode::BAD_GATEWAY, "Order not created..").into_response()
        }
        // Orphan outcomes: the remote order exists, the local link does not.
        Err(e) => {
            tracing::error!(user_id = %uid, error = %e, "Order attach failed after remote create");
            (StatusCode::NOT_FOUND, "failed to add orderId in user's doc").into_response()
        }
    }
}

/// Delete a user by id.
pub async fn delete_user(State(state): State<AppState>, Path(uid): Path<String>) -> Response {
    match state.store.delete(&uid).await {
        Ok(Some(_)) => "User deleted with success...".into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!(user_id = %uid, error = %e, "Failed to delete user");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Delete all orders for a user on the Orders service.
pub async fn delete_user_orders(State(state): State<AppState>, Path(uid): Path<String>) -> Response {
    match state.orders.delete_orders(&uid).await {
        Ok(()) => (StatusCode::ACCEPTED, "Orders deleted..").into_response(),
        Err(e) => {
            tracing::warn!(user_id = %uid, error = %e, "Failed to delete orders");
            (StatusCode::NOT_FOUND, "Orders not found...").into_response()
        }
    }
}
