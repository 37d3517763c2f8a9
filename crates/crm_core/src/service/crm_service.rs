//! CRM use-case service.
//!
//! # Responsibility
//! - Own one store per entity kind plus the exporter for the host process.
//! - Compose cross-store reads into dashboard, pipeline and detail views.
//! - Provide the board move, task toggle and export use cases.
//!
//! # Invariants
//! - Stores are only mutated through their own CRUD operations.
//! - Independent snapshots are loaded concurrently and never cached.

use crate::aggregate::stats::{ContactOverview, DashboardMetrics, PipelineSummary};
use crate::config::CoreConfig;
use crate::export::{
    contact_columns, deal_columns, task_columns, ExportArtifact, ExportError, ExportFormat,
    Exporter,
};
use crate::model::deal::{Deal, DealPatch, DealStage};
use crate::model::task::{Task, TaskPatch};
use crate::model::{EntityId, EntityKind};
use crate::repo::fixtures::{
    seed_activities, seed_contacts, seed_deals, seed_tasks, FixtureError,
};
use crate::repo::memory_store::{ActivityStore, ContactStore, DealStore, TaskStore};
use crate::repo::RepoError;
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for composed use cases.
#[derive(Debug)]
pub enum ServiceError {
    Repo(RepoError),
    Export(ExportError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Export(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ExportError> for ServiceError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Host-owned set of entity stores.
pub struct CrmService {
    contacts: ContactStore,
    deals: DealStore,
    tasks: TaskStore,
    activities: ActivityStore,
    exporter: Exporter,
}

impl CrmService {
    /// Stores seeded from the embedded fixtures.
    pub fn seeded(config: &CoreConfig) -> Result<Self, FixtureError> {
        let service = Self {
            contacts: ContactStore::new(seed_contacts()?, config.latency),
            deals: DealStore::new(seed_deals()?, config.latency),
            tasks: TaskStore::new(seed_tasks()?, config.latency),
            activities: ActivityStore::new(seed_activities()?, config.latency),
            exporter: Exporter::new(config),
        };
        info!("event=service_init module=service status=ok source=fixtures");
        Ok(service)
    }

    /// Stores with no records.
    pub fn empty(config: &CoreConfig) -> Self {
        Self {
            contacts: ContactStore::empty(config.latency),
            deals: DealStore::empty(config.latency),
            tasks: TaskStore::empty(config.latency),
            activities: ActivityStore::empty(config.latency),
            exporter: Exporter::new(config),
        }
    }

    pub fn contacts(&self) -> &ContactStore {
        &self.contacts
    }

    pub fn deals(&self) -> &DealStore {
        &self.deals
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn activities(&self) -> &ActivityStore {
        &self.activities
    }

    /// Loads every collection concurrently and builds the dashboard.
    pub async fn dashboard(&self, today: NaiveDate) -> DashboardMetrics {
        let (contacts, deals, tasks, activities) = tokio::join!(
            self.contacts.get_all(),
            self.deals.get_all(),
            self.tasks.get_all(),
            self.activities.get_all()
        );
        DashboardMetrics::compute(&contacts, &deals, &tasks, &activities, today)
    }

    pub async fn pipeline(&self) -> PipelineSummary {
        PipelineSummary::compute(&self.deals.get_all().await)
    }

    /// Contact with its related deals, tasks and activities.
    pub async fn contact_overview(&self, contact_id: EntityId) -> ServiceResult<ContactOverview> {
        let (contact, deals, tasks, activities) = tokio::join!(
            self.contacts.get_by_id(contact_id),
            self.deals.get_all(),
            self.tasks.get_all(),
            self.activities.get_all()
        );
        Ok(ContactOverview::compute(contact?, &deals, &tasks, &activities))
    }

    /// Moves a deal to `stage` on the pipeline board. A drop onto the
    /// deal's current stage leaves it untouched.
    pub async fn move_deal(&self, deal_id: EntityId, stage: DealStage) -> ServiceResult<Deal> {
        let deal = self.deals.get_by_id(deal_id).await?;
        if deal.stage == stage {
            return Ok(deal);
        }
        let moved = self.deals.update(deal_id, DealPatch::stage(stage)).await?;
        info!(
            "event=deal_move module=service status=ok id={} from={} to={}",
            deal_id,
            deal.stage.as_str(),
            stage.as_str()
        );
        Ok(moved)
    }

    /// Flips a task between completed and pending.
    pub async fn toggle_task(&self, task_id: EntityId) -> ServiceResult<Task> {
        let task = self.tasks.get_by_id(task_id).await?;
        let toggled = self
            .tasks
            .update(task_id, TaskPatch::status(task.status.toggled()))
            .await?;
        Ok(toggled)
    }

    pub async fn export_contacts(
        &self,
        format: ExportFormat,
        date: NaiveDate,
    ) -> ServiceResult<ExportArtifact> {
        let contacts = self.contacts.get_all().await;
        let artifact = self
            .exporter
            .export(format, EntityKind::Contact, &contacts, &contact_columns(), date)
            .await?;
        Ok(artifact)
    }

    /// Deal export with contact names resolved from the current contacts.
    pub async fn export_deals(
        &self,
        format: ExportFormat,
        date: NaiveDate,
    ) -> ServiceResult<ExportArtifact> {
        let (deals, contacts) = tokio::join!(self.deals.get_all(), self.contacts.get_all());
        let artifact = self
            .exporter
            .export(format, EntityKind::Deal, &deals, &deal_columns(&contacts), date)
            .await?;
        Ok(artifact)
    }

    pub async fn export_tasks(
        &self,
        format: ExportFormat,
        date: NaiveDate,
    ) -> ServiceResult<ExportArtifact> {
        let (tasks, contacts, deals) = tokio::join!(
            self.tasks.get_all(),
            self.contacts.get_all(),
            self.deals.get_all()
        );
        let mapping = task_columns(&contacts, &deals);
        let artifact = self
            .exporter
            .export(format, EntityKind::Task, &tasks, &mapping, date)
            .await?;
        Ok(artifact)
    }
}
