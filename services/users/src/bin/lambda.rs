use common::database::{ConnectionSource, DatabaseConfig};
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use tracing::info;

use users::{
    dispatcher::dispatch,
    event::{ProxyRequest, ProxyResponse},
    repositories::{PgUserStore, UserStore},
    telemetry::init_tracing,
};

/// Handler for AWS Lambda requests
async fn handler(
    store: &dyn UserStore,
    event: LambdaEvent<ProxyRequest>,
) -> Result<ProxyResponse, Error> {
    info!(request_id = %event.context.request_id, "Received event");
    Ok(dispatch(store, &event.payload).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing(false)?;

    info!("Users function starting");

    // One fresh connection per operation, nothing kept between invocations
    let config = DatabaseConfig::from_env()?;
    let store = PgUserStore::new(ConnectionSource::Direct(config));

    run(service_fn(|event| handler(&store, event))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_runtime::Context;
    use serde_json::{Value, json};
    use users::repositories::memory::InMemoryUserStore;

    async fn invoke(store: &InMemoryUserStore, payload: Value) -> ProxyResponse {
        let request: ProxyRequest = serde_json::from_value(payload).unwrap();
        handler(store, LambdaEvent::new(request, Context::default()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_handler_creates_and_reads() {
        let store = InMemoryUserStore::new();

        let created = invoke(
            &store,
            json!({
                "httpMethod": "POST",
                "body": r#"{"email":"a@b.com","first_name":"A","last_name":"B","password_hash":"h"}"#
            }),
        )
        .await;
        assert_eq!(created.status_code, 201);

        let read = invoke(
            &store,
            json!({"httpMethod": "GET", "queryStringParameters": {"email": "a@b.com"}}),
        )
        .await;
        assert_eq!(read.status_code, 200);
        assert_eq!(read.json().unwrap()["user"]["email"], "a@b.com");
    }

    #[tokio::test]
    async fn test_handler_answers_null_method_with_bad_request() {
        let store = InMemoryUserStore::new();

        let response = invoke(
            &store,
            json!({"httpMethod": null, "queryStringParameters": {"email": "a@b.com"}}),
        )
        .await;
        assert_eq!(response.status_code, 400);
        assert_eq!(
            response.json().unwrap(),
            json!({"error": "Invalid HTTP method or parameters."})
        );
        assert_eq!(
            response.headers["Access-Control-Allow-Origin"],
            "*"
        );
    }
}
