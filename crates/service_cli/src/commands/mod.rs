//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands build a
//! serialisable report, render it as a table or JSON, and print it.

pub mod black;
pub mod check;
pub mod derive;
