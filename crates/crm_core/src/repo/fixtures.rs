//! Embedded seed data for the entity stores.
//!
//! The fixtures are the only persistence: every process starts from them.

use crate::model::activity::Activity;
use crate::model::contact::Contact;
use crate::model::deal::Deal;
use crate::model::task::Task;
use crate::model::EntityKind;
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACTS_JSON: &str = include_str!("fixtures/contacts.json");
const DEALS_JSON: &str = include_str!("fixtures/deals.json");
const TASKS_JSON: &str = include_str!("fixtures/tasks.json");
const ACTIVITIES_JSON: &str = include_str!("fixtures/activities.json");

/// A seed document could not be decoded.
#[derive(Debug)]
pub struct FixtureError {
    pub kind: EntityKind,
    pub source: serde_json::Error,
}

impl Display for FixtureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {} fixture: {}", self.kind, self.source)
    }
}

impl Error for FixtureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

pub fn seed_contacts() -> Result<Vec<Contact>, FixtureError> {
    parse_fixture(EntityKind::Contact, CONTACTS_JSON)
}

pub fn seed_deals() -> Result<Vec<Deal>, FixtureError> {
    parse_fixture(EntityKind::Deal, DEALS_JSON)
}

pub fn seed_tasks() -> Result<Vec<Task>, FixtureError> {
    parse_fixture(EntityKind::Task, TASKS_JSON)
}

pub fn seed_activities() -> Result<Vec<Activity>, FixtureError> {
    parse_fixture(EntityKind::Activity, ACTIVITIES_JSON)
}

fn parse_fixture<T: DeserializeOwned>(kind: EntityKind, json: &str) -> Result<Vec<T>, FixtureError> {
    serde_json::from_str(json).map_err(|source| FixtureError { kind, source })
}
