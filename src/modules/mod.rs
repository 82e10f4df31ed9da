//! Modules layer - Infrastructure components behind the feature services
//!
//! Contains the catalog persistence backends (Postgres and in-memory).

pub mod store;
