//! Contact domain model.
//!
//! # Responsibility
//! - Define the contact record, its lifecycle status and tag set.
//! - Provide create/update payloads for the contact store.
//!
//! # Invariants
//! - `updated_at` strictly increases on every applied patch.
//! - Tags are trimmed, non-empty and unique.

use crate::model::{advance_timestamp, merge, non_blank, EntityId, EntityKind, Record};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

static TAG_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*,\s*").expect("valid tag separator regex"));

/// Relationship state of a contact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    Active,
    Inactive,
    /// Prospect not yet converted into an active relationship.
    Lead,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 3] = [Self::Active, Self::Inactive, Self::Lead];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Lead => "lead",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "lead" => Some(Self::Lead),
            _ => None,
        }
    }
}

/// Person tracked by the CRM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub status: ContactStatus,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted by `ContactStore::create`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: ContactStatus,
    pub tags: BTreeSet<String>,
    pub notes: Option<String>,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }
}

/// Partial contact update. `None` keeps the current value; for optional
/// fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub company: Option<Option<String>>,
    pub status: Option<ContactStatus>,
    pub tags: Option<BTreeSet<String>>,
    pub notes: Option<Option<String>>,
}

impl Record for Contact {
    type Draft = ContactDraft;
    type Patch = ContactPatch;

    const KIND: EntityKind = EntityKind::Contact;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: ContactDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: non_blank(draft.phone),
            company: non_blank(draft.company),
            status: draft.status,
            tags: normalize_tags(draft.tags),
            notes: non_blank(draft.notes),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: ContactPatch, now: DateTime<Utc>) {
        merge(&mut self.name, patch.name);
        merge(&mut self.email, patch.email);
        merge(&mut self.phone, patch.phone.map(non_blank));
        merge(&mut self.company, patch.company.map(non_blank));
        merge(&mut self.status, patch.status);
        merge(&mut self.tags, patch.tags.map(normalize_tags));
        merge(&mut self.notes, patch.notes.map(non_blank));
        self.updated_at = advance_timestamp(self.updated_at, now);
    }
}

/// Parses comma-separated tag input (`"vip, enterprise"`) into a tag set.
///
/// Empty segments are dropped and duplicates collapse.
pub fn parse_tag_list(input: &str) -> BTreeSet<String> {
    TAG_SEPARATOR_RE
        .split(input.trim())
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn normalize_tags(tags: BTreeSet<String>) -> BTreeSet<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}
