//! Application state shared across handlers

use common::database::ConnectionSource;
use std::sync::Arc;

use crate::repositories::UserStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    /// Used by the health check
    pub source: ConnectionSource,
}
