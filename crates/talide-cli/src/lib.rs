//! Talide CLI library.
//!
//! Terminal styling and output formatting shared by the `talide-cli`
//! subcommands.

pub mod output;
pub mod terminal;
