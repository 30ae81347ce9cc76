//! Spectrio App Services
//!
//! JSON persistence for station lists and user preferences.
//! Depends on the `spectrio` engine crate.

pub mod config;
pub mod data;
pub mod error;
