//! Request handlers, one module per resource.
//!
//! Handlers delegate to the repositories in `simcc_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod auth;
pub mod catalog;
pub mod chat;
pub mod collection;
pub mod contact;
pub mod department;
pub mod graduate_program;
pub mod group;
pub mod guidance;
pub mod institution;
pub mod notification;
pub mod productivity_weight;
pub mod professor;
pub mod rbac;
pub mod researcher;
pub mod star;
pub mod technician;
pub mod uploads;
pub mod users;

use serde::Deserialize;

/// A body that may hold one object or a list of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}
