//! Core building blocks shared by every stage of release generation
//!
//! - **config**: optional `konflux-release.toml` defaults file
//! - **error**: error categories with contextual help and exit codes
//! - **params**: generation parameters and their validation

pub mod config;
pub mod error;
pub mod params;
