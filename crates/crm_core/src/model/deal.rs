//! Deal domain model.
//!
//! # Responsibility
//! - Define the deal record and its pipeline stage.
//! - Provide create/update payloads for the deal store.
//!
//! # Invariants
//! - `value` is finite and non-negative.
//! - `probability` is within `0..=100`.
//! - `contact_id` may reference a contact that no longer exists.

use crate::model::{merge, non_blank, EntityId, EntityKind, Record};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Position of a deal in the sales pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStage {
    #[default]
    Lead,
    Qualified,
    Proposal,
    Negotiation,
    ClosedWon,
    ClosedLost,
}

impl DealStage {
    pub const ALL: [DealStage; 6] = [
        Self::Lead,
        Self::Qualified,
        Self::Proposal,
        Self::Negotiation,
        Self::ClosedWon,
        Self::ClosedLost,
    ];

    /// Columns shown on the pipeline board. Lost deals drop off the board.
    pub const BOARD: [DealStage; 5] = [
        Self::Lead,
        Self::Qualified,
        Self::Proposal,
        Self::Negotiation,
        Self::ClosedWon,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Qualified => "qualified",
            Self::Proposal => "proposal",
            Self::Negotiation => "negotiation",
            Self::ClosedWon => "closed_won",
            Self::ClosedLost => "closed_lost",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "lead" => Some(Self::Lead),
            "qualified" => Some(Self::Qualified),
            "proposal" => Some(Self::Proposal),
            "negotiation" => Some(Self::Negotiation),
            "closed_won" => Some(Self::ClosedWon),
            "closed_lost" => Some(Self::ClosedLost),
            _ => None,
        }
    }

    /// Human-readable stage name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Lead => "Lead",
            Self::Qualified => "Qualified",
            Self::Proposal => "Proposal",
            Self::Negotiation => "Negotiation",
            Self::ClosedWon => "Closed Won",
            Self::ClosedLost => "Closed Lost",
        }
    }

    pub fn is_closed(self) -> bool {
        matches!(self, Self::ClosedWon | Self::ClosedLost)
    }
}

/// Sales opportunity linked to a contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: EntityId,
    pub title: String,
    /// Currency amount, whole units.
    pub value: f64,
    pub stage: DealStage,
    /// Close likelihood in percent.
    pub probability: u8,
    pub contact_id: EntityId,
    #[serde(default)]
    pub expected_close: Option<NaiveDate>,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted by `DealStore::create`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealDraft {
    pub title: String,
    pub value: f64,
    pub stage: DealStage,
    pub probability: u8,
    pub contact_id: EntityId,
    pub expected_close: Option<NaiveDate>,
    pub description: Option<String>,
}

impl DealDraft {
    pub fn new(title: impl Into<String>, value: f64, contact_id: EntityId) -> Self {
        Self {
            title: title.into(),
            value,
            contact_id,
            ..Self::default()
        }
    }
}

/// Partial deal update. `None` keeps the current value; for optional
/// fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealPatch {
    pub title: Option<String>,
    pub value: Option<f64>,
    pub stage: Option<DealStage>,
    pub probability: Option<u8>,
    pub contact_id: Option<EntityId>,
    pub expected_close: Option<Option<NaiveDate>>,
    pub description: Option<Option<String>>,
}

impl DealPatch {
    /// Patch that only moves the deal to another stage.
    pub fn stage(stage: DealStage) -> Self {
        Self {
            stage: Some(stage),
            ..Self::default()
        }
    }
}

impl Record for Deal {
    type Draft = DealDraft;
    type Patch = DealPatch;

    const KIND: EntityKind = EntityKind::Deal;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: DealDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            value: sanitize_value(draft.value),
            stage: draft.stage,
            probability: draft.probability.min(100),
            contact_id: draft.contact_id,
            expected_close: draft.expected_close,
            description: non_blank(draft.description),
            created_at: now,
        }
    }

    fn apply_patch(&mut self, patch: DealPatch, _now: DateTime<Utc>) {
        merge(&mut self.title, patch.title);
        merge(&mut self.value, patch.value.map(sanitize_value));
        merge(&mut self.stage, patch.stage);
        merge(&mut self.probability, patch.probability.map(|p| p.min(100)));
        merge(&mut self.contact_id, patch.contact_id);
        merge(&mut self.expected_close, patch.expected_close);
        merge(&mut self.description, patch.description.map(non_blank));
    }
}

fn sanitize_value(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::{sanitize_value, DealStage};

    #[test]
    fn negative_and_nan_values_are_stored_as_zero() {
        assert_eq!(sanitize_value(-10.0), 0.0);
        assert_eq!(sanitize_value(f64::NAN), 0.0);
        assert_eq!(sanitize_value(2500.0), 2500.0);
    }

    #[test]
    fn board_excludes_closed_lost() {
        assert!(!DealStage::BOARD.contains(&DealStage::ClosedLost));
        assert!(DealStage::ClosedLost.is_closed());
        assert!(!DealStage::Negotiation.is_closed());
    }

    #[test]
    fn stage_parse_matches_as_str() {
        for stage in DealStage::ALL {
            assert_eq!(DealStage::parse(stage.as_str()), Some(stage));
        }
    }
}
