//! Common library for the users service
//!
//! This crate provides the database connectivity and error handling shared
//! by the serverless and long-lived entry points of the users service.

pub mod database;
pub mod error;

/// Example usage of the database module
///
/// ```rust,no_run
/// use common::database::{ConnectionSource, DatabaseConfig, health_check};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig::from_env()?;
///     let source = ConnectionSource::Direct(config);
///     let is_healthy = health_check(&source).await?;
///     println!("Database health check: {}", is_healthy);
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
