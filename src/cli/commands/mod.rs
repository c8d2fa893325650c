//! CLI command implementations

pub mod completions;
pub mod config;
pub mod export;
pub mod name;
pub mod scan;
