//! Subcommand implementations.

pub mod console;
pub mod demo;
pub mod samples;
