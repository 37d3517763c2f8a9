//! CRM domain model: contacts, deals, tasks and activities.
//!
//! # Responsibility
//! - Define the canonical records owned by the entity stores.
//! - Define typed create drafts and partial update patches per entity.
//!
//! # Invariants
//! - `id` is assigned by a store and never changed afterwards.
//! - Cross-entity references are plain ids; nothing enforces that the
//!   target exists.
//! - Patches cannot touch identity or system timestamps.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub mod activity;
pub mod contact;
pub mod deal;
pub mod task;

/// Store-assigned integer identity shared by every entity kind.
pub type EntityId = u32;

/// Entity category, used for logs, errors and export naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Contact,
    Deal,
    Task,
    Activity,
}

impl EntityKind {
    /// Stable singular name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Deal => "deal",
            Self::Task => "task",
            Self::Activity => "activity",
        }
    }

    /// Plural prefix used by export file names.
    pub fn plural(self) -> &'static str {
        match self {
            Self::Contact => "contacts",
            Self::Deal => "deals",
            Self::Task => "tasks",
            Self::Activity => "activities",
        }
    }

    /// Capitalized plural, used as spreadsheet sheet name.
    pub fn sheet_name(self) -> &'static str {
        match self {
            Self::Contact => "Contacts",
            Self::Deal => "Deals",
            Self::Task => "Tasks",
            Self::Activity => "Activities",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contract between an entity type and the generic in-memory store.
///
/// The store owns id assignment and ordering; the entity owns how a draft
/// becomes a record and how a patch merges into one.
pub trait Record: Clone + Send + Sync + 'static {
    /// Caller-supplied fields for `create`.
    type Draft: Send;
    /// Partial update applied by `update`.
    type Patch: Send;

    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    /// Builds a new record with store-assigned `id` and creation time `now`.
    fn from_draft(id: EntityId, draft: Self::Draft, now: DateTime<Utc>) -> Self;

    /// Merges `patch` into `self`. `now` refreshes update timestamps where
    /// the entity keeps one.
    fn apply_patch(&mut self, patch: Self::Patch, now: DateTime<Utc>);
}

/// Returns a timestamp strictly later than `previous`.
///
/// Uses `now` when the clock has advanced, otherwise `previous + 1ms`.
pub(crate) fn advance_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

/// Replaces `slot` when the patch carries a value.
pub(crate) fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Normalizes an optional free-text field: blank strings become `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|text| {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
