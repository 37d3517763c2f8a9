//! Core domain logic for the CRM: entity stores, derived views and export.
//! This crate is the single source of truth for entity invariants.

pub mod aggregate;
pub mod config;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use aggregate::filter::{search, Searchable, Selection};
pub use aggregate::lookup::{Lookup, SYSTEM_ACTOR, UNKNOWN_CONTACT, UNKNOWN_DEAL};
pub use aggregate::stats::{ContactOverview, DashboardMetrics, PipelineSummary, StageColumn};
pub use aggregate::tasks::{TaskBucket, TaskStats};
pub use aggregate::timeline::{ActivityStats, DayGroup};
pub use config::{ConfigError, CoreConfig, ExportConfig, Latency, LoggingConfig};
pub use export::{ExportArtifact, ExportError, ExportFormat, Exporter};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::activity::{Activity, ActivityDraft, ActivityPatch, ActivityType};
pub use model::contact::{Contact, ContactDraft, ContactPatch, ContactStatus};
pub use model::deal::{Deal, DealDraft, DealPatch, DealStage};
pub use model::task::{Task, TaskDraft, TaskPatch, TaskPriority, TaskStatus};
pub use model::{EntityId, EntityKind, Record};
pub use repo::fixtures::FixtureError;
pub use repo::memory_store::{ActivityStore, ContactStore, DealStore, MemoryStore, TaskStore};
pub use repo::{RepoError, RepoResult};
pub use service::crm_service::{CrmService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
