//! SIMCC back-office API server library.
//!
//! Exposes config, state, error handling, routes and the WebSocket layer so
//! the binary and the integration tests build the same application.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod storage;
pub mod ws;
