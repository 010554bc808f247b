//! Subcommand implementations
//!
//! Each module exposes an `Args` struct for clap and an `execute` function.

pub mod config;
pub mod info;
pub mod list;
pub mod scan;
pub mod search;
