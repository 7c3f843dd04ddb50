//! Scaffold: interactive project generators
//!
//! Generators for applications, models, properties and data sources, built from a
//! shared set of actions over a JSON workspace store, plus a sandboxed harness for
//! running them end to end in tests.

pub mod actions;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod harness;
pub mod install;
pub mod logging;
pub mod prompt;
pub mod workspace;
