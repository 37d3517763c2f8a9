//! Text search, categorical filters and most-recent-first ordering.

use crate::model::activity::{Activity, ActivityType};
use crate::model::contact::{Contact, ContactStatus};
use crate::model::deal::Deal;
use crate::model::task::Task;
use chrono::{DateTime, Utc};

/// Sentinel value that disables a categorical filter.
pub const SELECTION_ALL: &str = "all";

/// Records that can be matched by free-text search.
pub trait Searchable {
    /// Text fields checked by `matches_query`.
    fn search_fields(&self) -> Vec<&str>;

    /// Case-insensitive substring match over `search_fields`. A blank query
    /// matches everything.
    fn matches_query(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl Searchable for Contact {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str()];
        fields.extend(self.company.as_deref());
        fields
    }
}

impl Searchable for Deal {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }
}

impl Searchable for Task {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }
}

impl Searchable for Activity {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.description.as_str()]
    }
}

/// Returns the records matching `query`, keeping input order.
pub fn search<E: Searchable + Clone>(records: &[E], query: &str) -> Vec<E> {
    records
        .iter()
        .filter(|record| record.matches_query(query))
        .cloned()
        .collect()
}

/// Categorical filter choice: everything, or one exact value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Selection<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }

    /// Parses `"all"` or a value accepted by `parse`.
    pub fn parse_with(value: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case(SELECTION_ALL) {
            return Some(Self::All);
        }
        parse(trimmed).map(Self::Only)
    }
}

/// Keeps records whose `field` satisfies `selection`.
pub fn filter_by<E: Clone, T: PartialEq>(
    records: &[E],
    selection: &Selection<T>,
    field: impl Fn(&E) -> T,
) -> Vec<E> {
    records
        .iter()
        .filter(|record| selection.matches(&field(record)))
        .cloned()
        .collect()
}

/// Sorts by `timestamp` descending; equal timestamps keep input order.
pub fn sort_most_recent<E>(records: &mut [E], timestamp: impl Fn(&E) -> DateTime<Utc>) {
    records.sort_by(|a, b| timestamp(b).cmp(&timestamp(a)));
}

/// Contacts view: text search plus status filter.
pub fn filter_contacts(
    contacts: &[Contact],
    query: &str,
    status: &Selection<ContactStatus>,
) -> Vec<Contact> {
    contacts
        .iter()
        .filter(|contact| contact.matches_query(query) && status.matches(&contact.status))
        .cloned()
        .collect()
}

/// Activities view: type filter, newest first.
pub fn filter_activities(
    activities: &[Activity],
    kind: &Selection<ActivityType>,
) -> Vec<Activity> {
    let mut filtered = filter_by(activities, kind, |activity| activity.kind);
    sort_most_recent(&mut filtered, |activity| activity.timestamp);
    filtered
}
