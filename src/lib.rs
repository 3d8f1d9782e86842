#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! capdiff — diff the capability sets reported by the Capslock static
//! analyzer between two git revisions or two published module versions.
//!
//! The crate never analyzes code itself: it materializes each source state
//! into an isolated workspace, shells out to `capslock`, parses the JSON
//! report into a [`snapshot::CapabilitySnapshot`], and reconciles two
//! snapshots into a deterministic gained/lost report.

pub mod analyzer;
pub mod cli;
pub mod commands;
pub mod diff;
pub mod exec;
pub mod snapshot;
