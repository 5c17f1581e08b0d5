//! # skyline-common
//!
//! Shared error taxonomy, identifier types, configuration input, and
//! constants used across the Skyline workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
