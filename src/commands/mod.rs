//! CLI commands for konflux-release
//!
//! - **generate**: render a Konflux `Release` manifest from a notes template

pub mod generate;

pub use generate::{GenerateOptions, run_generate};
