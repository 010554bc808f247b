//! Application framework types and utilities
//!
//! Front-end agnostic settings shared by every binary that embeds the catalog.

pub mod config;

pub use config::Config;
