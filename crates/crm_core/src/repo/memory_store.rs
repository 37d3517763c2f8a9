//! Generic in-memory store shared by all entity kinds.
//!
//! # Responsibility
//! - Implement get/create/update/delete over a private `Vec<E>`.
//! - Delay every operation by the configured simulated latency.
//!
//! # Invariants
//! - New ids are `max(id) + 1`, or `1` for an empty collection.
//! - The lock is never held across the latency await.
//! - Callers only ever receive clones.

use crate::config::Latency;
use crate::model::activity::Activity;
use crate::model::contact::Contact;
use crate::model::deal::Deal;
use crate::model::task::Task;
use crate::model::{EntityId, Record};
use crate::repo::{RepoError, RepoResult};
use chrono::Utc;
use log::{debug, info, warn};
use tokio::sync::RwLock;

pub type ContactStore = MemoryStore<Contact>;
pub type DealStore = MemoryStore<Deal>;
pub type TaskStore = MemoryStore<Task>;
pub type ActivityStore = MemoryStore<Activity>;

/// Ordered in-memory collection of one entity kind.
pub struct MemoryStore<E: Record> {
    records: RwLock<Vec<E>>,
    latency: Latency,
}

impl<E: Record> MemoryStore<E> {
    /// Creates a store holding `records` in the given order.
    pub fn new(records: Vec<E>, latency: Latency) -> Self {
        Self {
            records: RwLock::new(records),
            latency,
        }
    }

    pub fn empty(latency: Latency) -> Self {
        Self::new(Vec::new(), latency)
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    /// Current record count, without simulated latency.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Returns a snapshot of every record in collection order.
    pub async fn get_all(&self) -> Vec<E> {
        self.latency.wait().await;
        let records = self.records.read().await;
        debug!(
            "event=entity_list module=repo status=ok kind={} count={}",
            E::KIND,
            records.len()
        );
        records.clone()
    }

    /// Returns a snapshot of the record with `id`.
    pub async fn get_by_id(&self, id: EntityId) -> RepoResult<E> {
        self.latency.wait().await;
        let records = self.records.read().await;
        records
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or_else(|| not_found::<E>(id, "get"))
    }

    /// Inserts a new record built from `draft` at the front of the
    /// collection and returns its snapshot.
    pub async fn create(&self, draft: E::Draft) -> E {
        self.latency.wait().await;
        let mut records = self.records.write().await;
        let id = next_id(records.as_slice());
        let record = E::from_draft(id, draft, Utc::now());
        records.insert(0, record.clone());
        info!(
            "event=entity_create module=repo status=ok kind={} id={}",
            E::KIND,
            id
        );
        record
    }

    /// Merges `patch` into the record with `id` and returns the result.
    pub async fn update(&self, id: EntityId, patch: E::Patch) -> RepoResult<E> {
        self.latency.wait().await;
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| not_found::<E>(id, "update"))?;
        record.apply_patch(patch, Utc::now());
        info!(
            "event=entity_update module=repo status=ok kind={} id={}",
            E::KIND,
            id
        );
        Ok(record.clone())
    }

    /// Removes the record with `id`. Returns `true` on success.
    pub async fn delete(&self, id: EntityId) -> RepoResult<bool> {
        self.latency.wait().await;
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| not_found::<E>(id, "delete"))?;
        records.remove(index);
        info!(
            "event=entity_delete module=repo status=ok kind={} id={}",
            E::KIND,
            id
        );
        Ok(true)
    }
}

fn next_id<E: Record>(records: &[E]) -> EntityId {
    records.iter().map(Record::id).max().map_or(1, |max| max + 1)
}

fn not_found<E: Record>(id: EntityId, operation: &str) -> RepoError {
    warn!(
        "event=entity_{operation} module=repo status=not_found kind={} id={}",
        E::KIND,
        id
    );
    RepoError::NotFound { kind: E::KIND, id }
}
