//! # soc2ops CLI library
//!
//! Command definitions and execution for the `soc2ops` binary.

pub mod commands;
pub mod interactive;

pub use commands::*;
pub use interactive::*;
