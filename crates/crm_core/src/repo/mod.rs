//! Entity stores: in-memory collections with simulated request latency.
//!
//! # Responsibility
//! - Own one ordered collection per entity kind.
//! - Provide CRUD operations that hand out independent snapshots.
//! - Seed collections from embedded fixtures.
//!
//! # Invariants
//! - `NotFound` is the only error a store operation returns.
//! - New records are inserted at the front (most recent first).
//! - Update and delete keep the relative order of all other records.

use crate::model::{EntityId, EntityKind};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod fixtures;
pub mod memory_store;

pub type RepoResult<T> = Result<T, RepoError>;

/// Store operation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// No record with `id` exists in the `kind` store.
    NotFound { kind: EntityKind, id: EntityId },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
        }
    }
}

impl Error for RepoError {}
