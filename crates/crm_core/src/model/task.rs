//! Task domain model.
//!
//! # Responsibility
//! - Define the follow-up task record with priority and lifecycle status.
//! - Provide create/update payloads for the task store.
//!
//! # Invariants
//! - `contact_id` / `deal_id` are optional and may dangle.

use crate::model::{merge, non_blank, EntityId, EntityKind, Record};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Urgency of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Ordering weight; higher is more urgent.
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }

    /// Check-box toggle: completed reopens as pending, anything else completes.
    pub fn toggled(self) -> Self {
        if self.is_completed() {
            Self::Pending
        } else {
            Self::Completed
        }
    }
}

/// Follow-up work item, optionally attached to a contact and/or deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    #[serde(default)]
    pub contact_id: Option<EntityId>,
    #[serde(default)]
    pub deal_id: Option<EntityId>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted by `TaskStore::create`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub contact_id: Option<EntityId>,
    pub deal_id: Option<EntityId>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial task update. `None` keeps the current value; for optional
/// fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub contact_id: Option<Option<EntityId>>,
    pub deal_id: Option<Option<EntityId>>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl Record for Task {
    type Draft = TaskDraft;
    type Patch = TaskPatch;

    const KIND: EntityKind = EntityKind::Task;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: TaskDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: non_blank(draft.description),
            due_date: draft.due_date,
            priority: draft.priority,
            status: draft.status,
            contact_id: draft.contact_id,
            deal_id: draft.deal_id,
            created_at: now,
        }
    }

    fn apply_patch(&mut self, patch: TaskPatch, _now: DateTime<Utc>) {
        merge(&mut self.title, patch.title);
        merge(&mut self.description, patch.description.map(non_blank));
        merge(&mut self.due_date, patch.due_date);
        merge(&mut self.priority, patch.priority);
        merge(&mut self.status, patch.status);
        merge(&mut self.contact_id, patch.contact_id);
        merge(&mut self.deal_id, patch.deal_id);
    }
}
