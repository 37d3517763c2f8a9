//! Task list views: date buckets, priority filter and due-date ordering.
//!
//! # Invariants
//! - "today" is always supplied by the caller; nothing here reads a clock.
//! - Ordering is due date ascending, undated tasks last, then priority
//!   descending. The sort is stable.

use crate::aggregate::filter::Selection;
use crate::model::task::{Task, TaskPriority};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Date/status bucket of the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskBucket {
    #[default]
    All,
    /// Due today.
    Today,
    /// Due after today.
    Upcoming,
    /// Due before today and not completed.
    Overdue,
    /// Anything not completed.
    Pending,
    Completed,
}

impl TaskBucket {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Upcoming => "upcoming",
            Self::Overdue => "overdue",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "all" => Some(Self::All),
            "today" => Some(Self::Today),
            "upcoming" => Some(Self::Upcoming),
            "overdue" => Some(Self::Overdue),
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    pub fn matches(self, task: &Task, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Today => task.due_date == Some(today),
            Self::Upcoming => task.due_date.is_some_and(|due| due > today),
            Self::Overdue => is_overdue(task, today),
            Self::Pending => !task.status.is_completed(),
            Self::Completed => task.status.is_completed(),
        }
    }
}

pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    !task.status.is_completed() && task.due_date.is_some_and(|due| due < today)
}

/// Task list ordering: due date ascending, undated last, then high
/// priority first.
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    let by_date = match (a.due_date, b.due_date) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_date.then_with(|| b.priority.rank().cmp(&a.priority.rank()))
}

pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(compare_tasks);
}

/// Task list view: bucket and priority filters, then `compare_tasks` order.
pub fn task_view(
    tasks: &[Task],
    bucket: TaskBucket,
    priority: &Selection<TaskPriority>,
    today: NaiveDate,
) -> Vec<Task> {
    let mut view: Vec<Task> = tasks
        .iter()
        .filter(|task| bucket.matches(task, today) && priority.matches(&task.priority))
        .cloned()
        .collect();
    sort_tasks(&mut view);
    view
}

/// Open tasks in due order, at most `limit`.
pub fn upcoming_tasks(tasks: &[Task], limit: usize) -> Vec<Task> {
    let mut open: Vec<Task> = tasks
        .iter()
        .filter(|task| !task.status.is_completed())
        .cloned()
        .collect();
    sort_tasks(&mut open);
    open.truncate(limit);
    open
}

/// Header counters of the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub due_today: usize,
    pub overdue: usize,
    pub completed: usize,
}

impl TaskStats {
    pub fn compute(tasks: &[Task], today: NaiveDate) -> Self {
        let count = |bucket: TaskBucket| tasks.iter().filter(|t| bucket.matches(t, today)).count();
        Self {
            total: tasks.len(),
            due_today: count(TaskBucket::Today),
            overdue: count(TaskBucket::Overdue),
            completed: count(TaskBucket::Completed),
        }
    }
}
