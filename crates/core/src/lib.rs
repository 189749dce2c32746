//! Domain building blocks for the SIMCC back-office.
//!
//! Everything here is free of I/O so the repository and HTTP layers can share
//! it and it can be tested in isolation.

pub mod academic;
pub mod api_keys;
pub mod chat;
pub mod error;
pub mod guidance;
pub mod hashing;
pub mod pagination;
pub mod permissions;
pub mod types;
pub mod uploads;
