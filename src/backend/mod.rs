//! Backend communication: HTTP client and wire types

pub mod api;
pub mod types;
