//! Derived views over store snapshots.
//!
//! # Responsibility
//! - Filter, sort and group snapshots for list and timeline displays.
//! - Resolve foreign keys to display names.
//! - Compute summary statistics.
//!
//! # Invariants
//! - Every function is pure: inputs are snapshots, "now" is a parameter.
//! - Dangling references are resolved, never reported as errors.

pub mod filter;
pub mod lookup;
pub mod stats;
pub mod tasks;
pub mod timeline;
