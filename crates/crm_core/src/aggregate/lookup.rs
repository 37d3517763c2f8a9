//! Foreign-key resolution tolerant of absent and dangling references.
//!
//! # Invariants
//! - Lookups never fail; a missing target is the `Dangling` variant.

use crate::model::contact::Contact;
use crate::model::deal::Deal;
use crate::model::EntityId;

pub const UNKNOWN_CONTACT: &str = "Unknown Contact";
pub const UNKNOWN_DEAL: &str = "Unknown Deal";
/// Display name for records without an owning contact.
pub const SYSTEM_ACTOR: &str = "System";

/// Outcome of resolving an optional foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a, T> {
    /// The foreign key is not set.
    Absent,
    /// The key is set but no record has that id.
    Dangling(EntityId),
    Found(&'a T),
}

impl<'a, T> Lookup<'a, T> {
    pub fn found(self) -> Option<&'a T> {
        match self {
            Self::Found(record) => Some(record),
            _ => None,
        }
    }
}

pub fn lookup_contact(contact_id: Option<EntityId>, contacts: &[Contact]) -> Lookup<'_, Contact> {
    resolve(contact_id, contacts, |contact| contact.id)
}

pub fn lookup_deal(deal_id: Option<EntityId>, deals: &[Deal]) -> Lookup<'_, Deal> {
    resolve(deal_id, deals, |deal| deal.id)
}

/// Contact display name: the name, `"Unknown Contact"` or `"System"`.
pub fn contact_display_name(contact_id: Option<EntityId>, contacts: &[Contact]) -> String {
    match lookup_contact(contact_id, contacts) {
        Lookup::Found(contact) => contact.name.clone(),
        Lookup::Dangling(_) => UNKNOWN_CONTACT.to_string(),
        Lookup::Absent => SYSTEM_ACTOR.to_string(),
    }
}

/// Deal display title: the title, `"Unknown Deal"` or `"System"`.
pub fn deal_display_title(deal_id: Option<EntityId>, deals: &[Deal]) -> String {
    match lookup_deal(deal_id, deals) {
        Lookup::Found(deal) => deal.title.clone(),
        Lookup::Dangling(_) => UNKNOWN_DEAL.to_string(),
        Lookup::Absent => SYSTEM_ACTOR.to_string(),
    }
}

fn resolve<T>(id: Option<EntityId>, records: &[T], id_of: impl Fn(&T) -> EntityId) -> Lookup<'_, T> {
    let Some(id) = id else {
        return Lookup::Absent;
    };
    records
        .iter()
        .find(|record| id_of(record) == id)
        .map_or(Lookup::Dangling(id), Lookup::Found)
}
