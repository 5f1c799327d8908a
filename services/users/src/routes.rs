//! HTTP routes for the long-lived service
//!
//! Real HTTP requests on `/users` are converted into the proxy request shape
//! and go through the same dispatcher as the serverless entry point.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Query, State,
        rejection::{BytesRejection, QueryRejection},
    },
    http::{HeaderName, HeaderValue, Method, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::{any, get},
};
use serde_json::json;
use std::collections::HashMap;
use tracing::{error, warn};

use crate::{
    dispatcher::dispatch,
    event::{ProxyRequest, ProxyResponse},
    error::ApiError,
    response::json_response,
    state::AppState,
};

/// Create the router for the users service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/users", any(users_endpoint))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match common::database::health_check(&state.source).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({"status": "ok", "service": "users-service"})),
        ),
        Err(e) => {
            error!("Database health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"status": "unavailable", "service": "users-service"})),
            )
        }
    }
}

/// Single CRUD endpoint
///
/// Undecodable query strings and bodies are answered here rather than by the
/// extractors, so they get the same envelope and headers as everything else.
pub async fn users_endpoint(
    State(state): State<AppState>,
    method: Method,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> ProxyResponse {
    if method == Method::OPTIONS {
        return json_response(200, json!({}));
    }

    let Ok(Query(params)) = params else {
        warn!("Rejecting request with malformed query string");
        return ApiError::BadRequest("Invalid HTTP method or parameters.".to_string()).into();
    };

    let Some(body) = body
        .ok()
        .and_then(|bytes| String::from_utf8(bytes.to_vec()).ok())
    else {
        warn!("Rejecting request with unreadable or non UTF-8 body");
        return ApiError::BadRequest("Invalid JSON body.".to_string()).into();
    };

    let request = ProxyRequest {
        http_method: method.as_str().to_string(),
        query_string_parameters: Some(params),
        body: Some(body).filter(|body| !body.is_empty()),
    };

    dispatch(state.store.as_ref(), &request).await
}

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (status, self.body).into_response();
        let headers = response.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in self.headers {
            match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => error!("Dropping invalid response header"),
            }
        }

        response
    }
}
