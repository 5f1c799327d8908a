//! Response envelope construction

use serde_json::{Value, json};
use std::collections::HashMap;

use crate::event::ProxyResponse;

/// Static CORS headers attached to every response
pub fn cors_headers() -> HashMap<String, String> {
    HashMap::from([
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        (
            "Access-Control-Allow-Methods".to_string(),
            "GET, POST, PUT, DELETE".to_string(),
        ),
        (
            "Access-Control-Allow-Headers".to_string(),
            "Content-Type".to_string(),
        ),
    ])
}

/// Build a response with the given status and JSON body
pub fn json_response(status_code: u16, body: Value) -> ProxyResponse {
    ProxyResponse {
        status_code,
        headers: cors_headers(),
        body: body.to_string(),
    }
}

/// `{"message": ...}` response
pub fn message_response(status_code: u16, message: &str) -> ProxyResponse {
    json_response(status_code, json!({ "message": message }))
}

/// `{"error": ...}` response
pub fn error_response(status_code: u16, message: &str) -> ProxyResponse {
    json_response(status_code, json!({ "error": message }))
}
