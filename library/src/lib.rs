//! romshelf library front end
//!
//! Command-line front end over `romshelf-core`. The binary in `main.rs` only
//! parses arguments; everything it runs lives here so it can be tested.
//!
//! - [`context`] - Config, cache location and format reader for one invocation
//! - [`output`] - Text and JSON rendering of catalog entries
//! - [`commands`] - One module per subcommand

pub mod commands;
pub mod context;
pub mod output;
