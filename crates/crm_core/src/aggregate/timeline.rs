//! Activity timeline: day grouping and recency counters.

use crate::aggregate::filter::sort_most_recent;
use crate::model::activity::{Activity, ActivityType};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;

/// Activities that happened on one local calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub day: NaiveDate,
    /// Newest first.
    pub activities: Vec<Activity>,
}

/// Groups activities by calendar day in `tz`. Groups and their entries are
/// ordered newest first.
pub fn group_by_day<Tz: TimeZone>(activities: &[Activity], tz: &Tz) -> Vec<DayGroup> {
    let mut days: BTreeMap<NaiveDate, Vec<Activity>> = BTreeMap::new();
    for activity in activities {
        let day = activity.timestamp.with_timezone(tz).date_naive();
        days.entry(day).or_default().push(activity.clone());
    }

    days.into_iter()
        .rev()
        .map(|(day, mut entries)| {
            sort_most_recent(&mut entries, |activity| activity.timestamp);
            DayGroup {
                day,
                activities: entries,
            }
        })
        .collect()
}

/// The `limit` most recent activities.
pub fn recent_activities(activities: &[Activity], limit: usize) -> Vec<Activity> {
    let mut recent = activities.to_vec();
    sort_most_recent(&mut recent, |activity| activity.timestamp);
    recent.truncate(limit);
    recent
}

/// Header counters of the activity timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityStats {
    pub total: usize,
    pub today: usize,
    /// Activities within the seven days before `now`.
    pub this_week: usize,
    /// Only types that occur are present.
    pub by_type: BTreeMap<ActivityType, usize>,
}

impl ActivityStats {
    /// `now` is converted to `tz` to decide which activities are "today".
    pub fn compute<Tz: TimeZone>(activities: &[Activity], now: DateTime<Utc>, tz: &Tz) -> Self {
        let today = now.with_timezone(tz).date_naive();
        let week_start = now - Duration::days(7);
        let mut stats = Self {
            total: activities.len(),
            ..Self::default()
        };
        for activity in activities {
            if activity.timestamp.with_timezone(tz).date_naive() == today {
                stats.today += 1;
            }
            if activity.timestamp >= week_start {
                stats.this_week += 1;
            }
            *stats.by_type.entry(activity.kind).or_insert(0) += 1;
        }
        stats
    }
}
