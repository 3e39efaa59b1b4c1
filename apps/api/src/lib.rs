//! Roster API Library
//!
//! Member and team search over PostgreSQL, built on a small type-safe query
//! builder. Contains the domain model, the query builder, repositories and
//! the HTTP layer.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod query;
