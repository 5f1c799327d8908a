//! Request routing by method and query parameters

use tracing::{info, warn};

use crate::error::{ApiError, ApiResult};
use crate::event::{ProxyRequest, ProxyResponse};
use crate::handlers;
use crate::repositories::UserStore;

/// Route one request to its CRUD operation and build the response
///
/// Never fails: every error becomes an error response.
pub async fn dispatch(store: &dyn UserStore, request: &ProxyRequest) -> ProxyResponse {
    info!(method = %request.http_method, "Processing request");

    route(store, request).await.unwrap_or_else(|e| {
        warn!(status = e.status_code(), "Request failed: {}", e);
        e.into()
    })
}

async fn route(store: &dyn UserStore, request: &ProxyRequest) -> ApiResult<ProxyResponse> {
    let body = request.json_body()?;

    match (request.http_method.as_str(), request.query_param("email")) {
        ("POST", _) => handlers::create_user(store, body.as_ref()).await,
        ("GET", Some(email)) => handlers::read_user(store, email).await,
        ("PUT", Some(email)) => handlers::update_user(store, email, body.as_ref()).await,
        ("DELETE", Some(email)) => handlers::delete_user(store, email).await,
        _ => Err(ApiError::BadRequest(
            "Invalid HTTP method or parameters.".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::InMemoryUserStore;
    use crate::response::cors_headers;
    use serde_json::json;

    const CREATE_BODY: &str =
        r#"{"email":"a@b.com","first_name":"A","last_name":"B","password_hash":"h"}"#;

    async fn seeded_store() -> InMemoryUserStore {
        let store = InMemoryUserStore::new();
        let response = dispatch(&store, &ProxyRequest::new("POST").with_body(CREATE_BODY)).await;
        assert_eq!(response.status_code, 201);
        store
    }

    #[tokio::test]
    async fn test_routes_each_method() {
        let store = seeded_store().await;

        let read = ProxyRequest::new("GET").with_query("email", "a@b.com");
        assert_eq!(dispatch(&store, &read).await.status_code, 200);

        let update = ProxyRequest::new("PUT")
            .with_query("email", "a@b.com")
            .with_body(r#"{"first_name":"C","last_name":"D"}"#);
        assert_eq!(dispatch(&store, &update).await.status_code, 200);

        let delete = ProxyRequest::new("DELETE").with_query("email", "a@b.com");
        assert_eq!(dispatch(&store, &delete).await.status_code, 200);

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_post_ignores_query_parameters() {
        let store = InMemoryUserStore::new();
        let request = ProxyRequest::new("POST")
            .with_query("email", "other@b.com")
            .with_body(CREATE_BODY);

        assert_eq!(dispatch(&store, &request).await.status_code, 201);
        assert!(store.find_by_email("a@b.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_invalid_method_or_parameters() {
        let store = seeded_store().await;
        let invalid = [
            ProxyRequest::new("GET"),
            ProxyRequest::new("PUT").with_body(r#"{"first_name":"C","last_name":"D"}"#),
            ProxyRequest::new("DELETE").with_query("id", "1"),
            ProxyRequest::new("PATCH").with_query("email", "a@b.com"),
            ProxyRequest::new("get").with_query("email", "a@b.com"),
            ProxyRequest::default(),
        ];

        for request in invalid {
            let response = dispatch(&store, &request).await;
            assert_eq!(response.status_code, 400, "{:?}", request);
            assert_eq!(
                response.json().unwrap(),
                json!({"error": "Invalid HTTP method or parameters."})
            );
            assert_eq!(response.headers, cors_headers());
        }

        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let store = InMemoryUserStore::new();
        let response = dispatch(&store, &ProxyRequest::new("POST").with_body("{\"email\":")).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(response.json().unwrap(), json!({"error": "Invalid JSON body."}));
    }

    #[tokio::test]
    async fn test_post_without_body_reports_missing_fields() {
        let store = InMemoryUserStore::new();
        let response = dispatch(&store, &ProxyRequest::new("POST")).await;

        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.json().unwrap()["error"],
            "Missing required fields: email, first_name, last_name, password_hash"
        );
    }
}
