//! Shared UI pieces

pub mod theme;
