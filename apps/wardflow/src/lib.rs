//! # wardflow
//!
//! Server and CLI for the Wardflow hospital operations dashboard. The flow
//! engine itself lives in `wardflow-core`; this crate adds the HTTP API,
//! configuration loading and the command line.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
