//! Terminal output: diagnostic logging and the run summary

pub mod logging;
pub mod summary;

pub use logging::init_tracing;
pub use summary::RunSummary;
