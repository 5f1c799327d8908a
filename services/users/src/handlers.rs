//! User CRUD operations
//!
//! Each operation is an error boundary: store failures are logged here and
//! turned into a generic 500, never passed through to the caller.

use serde_json::{Value, json};
use tracing::{error, info};

use crate::error::{ApiError, ApiResult};
use crate::event::ProxyResponse;
use crate::models::{CreateUserRequest, UpdateUserRequest};
use crate::repositories::UserStore;
use crate::response::{json_response, message_response};

/// Create a new user
pub async fn create_user(store: &dyn UserStore, body: Option<&Value>) -> ApiResult<ProxyResponse> {
    let new_user = CreateUserRequest::from_body(body)?.validate()?;

    store.insert(&new_user).await.map_err(|e| {
        error!("Error while creating user: {}", e);
        ApiError::Internal("An error occurred while creating the user.".to_string())
    })?;

    info!("Created user: {}", new_user.email);
    Ok(message_response(201, "User created successfully."))
}

/// Get a user by email
pub async fn read_user(store: &dyn UserStore, email: &str) -> ApiResult<ProxyResponse> {
    let user = store
        .find_by_email(email)
        .await
        .map_err(|e| {
            error!("Error while reading user: {}", e);
            ApiError::Internal("An error occurred while fetching the user.".to_string())
        })?
        .ok_or(ApiError::NotFound("User not found.".to_string()))?;

    Ok(json_response(200, json!({ "user": user })))
}

/// Update first and last name of the user with `email`
pub async fn update_user(
    store: &dyn UserStore,
    email: &str,
    body: Option<&Value>,
) -> ApiResult<ProxyResponse> {
    let change = UpdateUserRequest::from_body(body)?.validate()?;

    let updated = store.update_names(email, &change).await.map_err(|e| {
        error!("Error while updating user: {}", e);
        ApiError::Internal("An error occurred while updating the user.".to_string())
    })?;

    if updated > 0 {
        Ok(message_response(200, "User updated successfully."))
    } else {
        Err(ApiError::NotFound(
            "User not found or no changes made.".to_string(),
        ))
    }
}

/// Delete the user with `email`
pub async fn delete_user(store: &dyn UserStore, email: &str) -> ApiResult<ProxyResponse> {
    let deleted = store.delete_by_email(email).await.map_err(|e| {
        error!("Error while deleting user: {}", e);
        ApiError::Internal("An error occurred while deleting the user.".to_string())
    })?;

    if deleted > 0 {
        Ok(message_response(200, "User deleted successfully."))
    } else {
        Err(ApiError::NotFound("User not found.".to_string()))
    }
}
