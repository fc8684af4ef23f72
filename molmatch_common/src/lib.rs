//! Common types shared across the molmatch workspace.
//!
//! This crate provides the read-only molecule graph view consumed by the
//! matching engine, the chemistry configuration, and a fixture library of
//! small annotated molecules used by tests across the project.

mod config;
mod error;
mod fixtures;
mod molecule;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::fixtures::*;
pub use crate::molecule::*;
