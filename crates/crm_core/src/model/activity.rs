//! Activity (interaction log) domain model.

use crate::model::{merge, EntityId, EntityKind, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Open-ended key/value payload attached to an activity.
pub type ActivityMetadata = BTreeMap<String, Value>;

/// Kind of customer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Call,
    Email,
    Meeting,
    Note,
    Task,
    Deal,
}

impl ActivityType {
    pub const ALL: [ActivityType; 6] = [
        Self::Call,
        Self::Email,
        Self::Meeting,
        Self::Note,
        Self::Task,
        Self::Deal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Email => "email",
            Self::Meeting => "meeting",
            Self::Note => "note",
            Self::Task => "task",
            Self::Deal => "deal",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "call" => Some(Self::Call),
            "email" => Some(Self::Email),
            "meeting" => Some(Self::Meeting),
            "note" => Some(Self::Note),
            "task" => Some(Self::Task),
            "deal" => Some(Self::Deal),
            _ => None,
        }
    }
}

/// One logged interaction. `contact_id = None` marks a system event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: EntityId,
    /// Serialized as `type` to match the fixture schema.
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub description: String,
    #[serde(default)]
    pub contact_id: Option<EntityId>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub metadata: Option<ActivityMetadata>,
}

/// Fields accepted by `ActivityStore::create`. The timestamp is always the
/// creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityDraft {
    pub kind: ActivityType,
    pub description: String,
    pub contact_id: Option<EntityId>,
    pub metadata: Option<ActivityMetadata>,
}

impl ActivityDraft {
    pub fn new(kind: ActivityType, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            contact_id: None,
            metadata: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityPatch {
    pub kind: Option<ActivityType>,
    pub description: Option<String>,
    pub contact_id: Option<Option<EntityId>>,
    pub metadata: Option<Option<ActivityMetadata>>,
}

impl Record for Activity {
    type Draft = ActivityDraft;
    type Patch = ActivityPatch;

    const KIND: EntityKind = EntityKind::Activity;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: ActivityDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: draft.kind,
            description: draft.description,
            contact_id: draft.contact_id,
            timestamp: now,
            metadata: draft.metadata,
        }
    }

    fn apply_patch(&mut self, patch: ActivityPatch, _now: DateTime<Utc>) {
        merge(&mut self.kind, patch.kind);
        merge(&mut self.description, patch.description);
        merge(&mut self.contact_id, patch.contact_id);
        merge(&mut self.metadata, patch.metadata);
    }
}
