//! Users service
//!
//! A single-resource CRUD endpoint over the `users` table. Requests arrive in
//! the API Gateway proxy shape ([`event::ProxyRequest`]), are routed by
//! [`dispatcher::dispatch`] to one of the operations in [`handlers`], and
//! come back as a [`event::ProxyResponse`] carrying the CORS headers.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod response;
pub mod routes;
pub mod state;
pub mod telemetry;
