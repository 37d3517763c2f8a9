//! Summary statistics for the dashboard, the pipeline board and the
//! contact detail view.

use crate::aggregate::tasks::{is_overdue, upcoming_tasks};
use crate::aggregate::timeline::recent_activities;
use crate::model::activity::Activity;
use crate::model::contact::Contact;
use crate::model::deal::{Deal, DealStage};
use crate::model::task::{Task, TaskStatus};
use crate::model::EntityId;
use chrono::NaiveDate;

const DASHBOARD_LIST_LIMIT: usize = 5;

/// Sum of deal values.
pub fn total_value<'a>(deals: impl IntoIterator<Item = &'a Deal>) -> f64 {
    deals.into_iter().map(|deal| deal.value).sum()
}

/// Value of deals that are still open (neither won nor lost).
pub fn active_pipeline_value(deals: &[Deal]) -> f64 {
    total_value(deals.iter().filter(|deal| !deal.stage.is_closed()))
}

/// Share of won deals among all deals, as a rounded integer percent.
/// Zero deals yield 0.
pub fn win_rate(deals: &[Deal]) -> u32 {
    if deals.is_empty() {
        return 0;
    }
    let won = deals
        .iter()
        .filter(|deal| deal.stage == DealStage::ClosedWon)
        .count();
    (won as f64 / deals.len() as f64 * 100.0).round() as u32
}

/// One pipeline board column.
#[derive(Debug, Clone, PartialEq)]
pub struct StageColumn {
    pub stage: DealStage,
    pub deals: Vec<Deal>,
    pub total_value: f64,
}

/// Pipeline board plus its header counters.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSummary {
    /// One column per `DealStage::BOARD` stage, in board order.
    pub columns: Vec<StageColumn>,
    pub closed_won: usize,
    pub active_value: f64,
    pub win_rate: u32,
}

impl PipelineSummary {
    pub fn compute(deals: &[Deal]) -> Self {
        let columns = DealStage::BOARD
            .iter()
            .map(|&stage| {
                let stage_deals: Vec<Deal> = deals
                    .iter()
                    .filter(|deal| deal.stage == stage)
                    .cloned()
                    .collect();
                StageColumn {
                    stage,
                    total_value: total_value(&stage_deals),
                    deals: stage_deals,
                }
            })
            .collect();

        Self {
            columns,
            closed_won: deals
                .iter()
                .filter(|deal| deal.stage == DealStage::ClosedWon)
                .count(),
            active_value: active_pipeline_value(deals),
            win_rate: win_rate(deals),
        }
    }

    pub fn column(&self, stage: DealStage) -> Option<&StageColumn> {
        self.columns.iter().find(|column| column.stage == stage)
    }
}

/// Dashboard metric cards and short lists.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardMetrics {
    pub total_contacts: usize,
    /// Deals in any non-closed stage.
    pub active_deals: usize,
    /// Value of every deal, closed ones included.
    pub total_deals_value: f64,
    /// Tasks whose status is exactly `pending`.
    pub pending_tasks: usize,
    pub due_today: usize,
    pub overdue_tasks: usize,
    pub upcoming_tasks: Vec<Task>,
    pub recent_activities: Vec<Activity>,
    pub pipeline: PipelineSummary,
}

impl DashboardMetrics {
    pub fn compute(
        contacts: &[Contact],
        deals: &[Deal],
        tasks: &[Task],
        activities: &[Activity],
        today: NaiveDate,
    ) -> Self {
        Self {
            total_contacts: contacts.len(),
            active_deals: deals.iter().filter(|deal| !deal.stage.is_closed()).count(),
            total_deals_value: total_value(deals),
            pending_tasks: tasks
                .iter()
                .filter(|task| task.status == TaskStatus::Pending)
                .count(),
            due_today: tasks
                .iter()
                .filter(|task| task.due_date == Some(today))
                .count(),
            overdue_tasks: tasks.iter().filter(|task| is_overdue(task, today)).count(),
            upcoming_tasks: upcoming_tasks(tasks, DASHBOARD_LIST_LIMIT),
            recent_activities: recent_activities(activities, DASHBOARD_LIST_LIMIT),
            pipeline: PipelineSummary::compute(deals),
        }
    }
}

/// Records attached to one contact.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactOverview {
    pub contact: Contact,
    pub deals: Vec<Deal>,
    pub tasks: Vec<Task>,
    pub activities: Vec<Activity>,
    pub total_deal_value: f64,
}

impl ContactOverview {
    pub fn compute(
        contact: Contact,
        deals: &[Deal],
        tasks: &[Task],
        activities: &[Activity],
    ) -> Self {
        let id: EntityId = contact.id;
        let deals: Vec<Deal> = deals
            .iter()
            .filter(|deal| deal.contact_id == id)
            .cloned()
            .collect();
        Self {
            total_deal_value: total_value(&deals),
            deals,
            tasks: tasks
                .iter()
                .filter(|task| task.contact_id == Some(id))
                .cloned()
                .collect(),
            activities: activities
                .iter()
                .filter(|activity| activity.contact_id == Some(id))
                .cloned()
                .collect(),
            contact,
        }
    }
}
