use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use crm_core::aggregate::filter::{filter_activities, filter_contacts, search};
use crm_core::aggregate::lookup::{contact_display_name, deal_display_title, lookup_contact};
use crm_core::aggregate::stats::{active_pipeline_value, win_rate};
use crm_core::aggregate::tasks::{task_view, upcoming_tasks};
use crm_core::aggregate::timeline::group_by_day;
use crm_core::{
    Activity, ActivityStats, ActivityType, Contact, ContactStatus, ContactStore, Deal, DealStage,
    Latency, Lookup, PipelineSummary, Selection, Task, TaskBucket, TaskPriority, TaskStats,
    TaskStatus, SYSTEM_ACTOR, UNKNOWN_CONTACT, UNKNOWN_DEAL,
};
use std::collections::BTreeSet;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn contact(id: u32, name: &str, company: Option<&str>, status: ContactStatus) -> Contact {
    Contact {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: None,
        company: company.map(str::to_string),
        status,
        tags: BTreeSet::new(),
        notes: None,
        created_at: at(2024, 1, 1, 9, 0),
        updated_at: at(2024, 1, 1, 9, 0),
    }
}

fn deal(id: u32, stage: DealStage, value: f64) -> Deal {
    Deal {
        id,
        title: format!("Deal {id}"),
        value,
        stage,
        probability: 50,
        contact_id: 1,
        expected_close: None,
        description: None,
        created_at: at(2024, 1, 1, 9, 0),
    }
}

fn task(
    id: u32,
    due_date: Option<NaiveDate>,
    priority: TaskPriority,
    status: TaskStatus,
) -> Task {
    Task {
        id,
        title: format!("Task {id}"),
        description: None,
        due_date,
        priority,
        status,
        contact_id: None,
        deal_id: None,
        created_at: at(2024, 1, 1, 9, 0),
    }
}

fn activity(id: u32, kind: ActivityType, timestamp: DateTime<Utc>) -> Activity {
    Activity {
        id,
        kind,
        description: format!("Activity {id}"),
        contact_id: None,
        timestamp,
        metadata: None,
    }
}

#[test]
fn win_rate_is_zero_without_deals() {
    assert_eq!(win_rate(&[]), 0);
    assert_eq!(PipelineSummary::compute(&[]).win_rate, 0);
}

#[test]
fn win_rate_counts_won_share_of_all_deals() {
    let deals = vec![
        deal(1, DealStage::ClosedWon, 1000.0),
        deal(2, DealStage::ClosedLost, 1000.0),
        deal(3, DealStage::Lead, 1000.0),
        deal(4, DealStage::Proposal, 1000.0),
    ];
    assert_eq!(win_rate(&deals), 25);

    let thirds = vec![
        deal(1, DealStage::ClosedWon, 1.0),
        deal(2, DealStage::Lead, 1.0),
        deal(3, DealStage::Lead, 1.0),
    ];
    assert_eq!(win_rate(&thirds), 33);
}

#[test]
fn pipeline_summary_builds_board_columns() {
    let deals = vec![
        deal(1, DealStage::Lead, 1000.0),
        deal(2, DealStage::Lead, 500.0),
        deal(3, DealStage::Negotiation, 2000.0),
        deal(4, DealStage::ClosedWon, 4000.0),
        deal(5, DealStage::ClosedLost, 8000.0),
    ];
    let summary = PipelineSummary::compute(&deals);

    let stages: Vec<DealStage> = summary.columns.iter().map(|c| c.stage).collect();
    assert_eq!(stages, DealStage::BOARD.to_vec());
    assert!(summary.column(DealStage::ClosedLost).is_none());

    let lead = summary.column(DealStage::Lead).unwrap();
    assert_eq!(lead.deals.len(), 2);
    assert_eq!(lead.total_value, 1500.0);
    assert_eq!(summary.closed_won, 1);
    assert_eq!(summary.active_value, 3500.0);
    assert_eq!(active_pipeline_value(&deals), 3500.0);
    assert_eq!(summary.win_rate, 20);
}

#[test]
fn tasks_sort_by_due_date_with_undated_last() {
    let tasks = vec![
        task(1, None, TaskPriority::High, TaskStatus::Pending),
        task(2, Some(date(2024, 3, 5)), TaskPriority::Low, TaskStatus::Pending),
        task(3, Some(date(2024, 3, 1)), TaskPriority::Medium, TaskStatus::Pending),
    ];

    let view = task_view(&tasks, TaskBucket::All, &Selection::All, date(2024, 3, 1));
    let ids: Vec<u32> = view.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn equal_due_dates_order_high_priority_first() {
    let due = Some(date(2024, 3, 5));
    let tasks = vec![
        task(1, due, TaskPriority::Low, TaskStatus::Pending),
        task(2, due, TaskPriority::High, TaskStatus::Pending),
        task(3, due, TaskPriority::Medium, TaskStatus::Pending),
    ];

    let view = task_view(&tasks, TaskBucket::All, &Selection::All, date(2024, 3, 1));
    let ids: Vec<u32> = view.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[test]
fn task_buckets_partition_by_date_and_status() {
    let today = date(2024, 3, 5);
    let tasks = vec![
        task(1, Some(date(2024, 3, 4)), TaskPriority::Medium, TaskStatus::Pending),
        task(2, Some(date(2024, 3, 4)), TaskPriority::Medium, TaskStatus::Completed),
        task(3, Some(today), TaskPriority::High, TaskStatus::InProgress),
        task(4, Some(date(2024, 3, 9)), TaskPriority::Low, TaskStatus::Pending),
        task(5, None, TaskPriority::Low, TaskStatus::Pending),
    ];
    let ids = |bucket: TaskBucket| -> Vec<u32> {
        task_view(&tasks, bucket, &Selection::All, today)
            .iter()
            .map(|t| t.id)
            .collect()
    };

    assert_eq!(ids(TaskBucket::Overdue), vec![1]);
    assert_eq!(ids(TaskBucket::Today), vec![3]);
    assert_eq!(ids(TaskBucket::Upcoming), vec![4]);
    assert_eq!(ids(TaskBucket::Completed), vec![2]);
    assert_eq!(ids(TaskBucket::Pending), vec![1, 3, 4, 5]);
    assert_eq!(ids(TaskBucket::All).len(), 5);

    let high_only = task_view(
        &tasks,
        TaskBucket::All,
        &Selection::Only(TaskPriority::High),
        today,
    );
    assert_eq!(high_only.len(), 1);
    assert_eq!(high_only[0].id, 3);

    assert_eq!(
        TaskStats::compute(&tasks, today),
        TaskStats {
            total: 5,
            due_today: 1,
            overdue: 1,
            completed: 1,
        }
    );
}

#[test]
fn upcoming_tasks_skip_completed_and_respect_limit() {
    let tasks: Vec<Task> = (1..=8)
        .map(|id| {
            let status = if id % 4 == 0 {
                TaskStatus::Completed
            } else {
                TaskStatus::Pending
            };
            task(id, Some(date(2024, 3, id)), TaskPriority::Medium, status)
        })
        .collect();

    let upcoming = upcoming_tasks(&tasks, 5);
    let ids: Vec<u32> = upcoming.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 5, 6]);
}

#[test]
fn activities_group_by_local_day_newest_first() {
    let activities = vec![
        activity(1, ActivityType::Call, at(2024, 3, 4, 9, 0)),
        activity(2, ActivityType::Email, at(2024, 3, 5, 8, 0)),
        activity(3, ActivityType::Note, at(2024, 3, 4, 17, 30)),
        activity(4, ActivityType::Meeting, at(2024, 3, 5, 16, 0)),
    ];

    let groups = group_by_day(&activities, &Utc);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].day, date(2024, 3, 5));
    let first_ids: Vec<u32> = groups[0].activities.iter().map(|a| a.id).collect();
    assert_eq!(first_ids, vec![4, 2]);
    assert_eq!(groups[1].day, date(2024, 3, 4));
    let second_ids: Vec<u32> = groups[1].activities.iter().map(|a| a.id).collect();
    assert_eq!(second_ids, vec![3, 1]);
}

#[test]
fn day_grouping_follows_the_given_time_zone() {
    let late_evening_utc = activity(1, ActivityType::Call, at(2024, 3, 4, 23, 30));
    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

    let groups = group_by_day(&[late_evening_utc], &plus_two);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].day, date(2024, 3, 5));
}

#[test]
fn activity_filter_and_stats() {
    let now = at(2024, 3, 5, 18, 0);
    let activities = vec![
        activity(1, ActivityType::Call, at(2024, 3, 5, 9, 0)),
        activity(2, ActivityType::Call, at(2024, 3, 1, 9, 0)),
        activity(3, ActivityType::Email, at(2024, 2, 1, 9, 0)),
        activity(4, ActivityType::Call, at(2024, 3, 5, 12, 0)),
    ];

    let calls = filter_activities(&activities, &Selection::Only(ActivityType::Call));
    let ids: Vec<u32> = calls.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![4, 1, 2]);
    assert_eq!(filter_activities(&activities, &Selection::All).len(), 4);

    let stats = ActivityStats::compute(&activities, now, &Utc);
    assert_eq!(stats.total, 4);
    assert_eq!(stats.today, 2);
    assert_eq!(stats.this_week, 3);
    assert_eq!(stats.by_type.get(&ActivityType::Call), Some(&3));
    assert_eq!(stats.by_type.get(&ActivityType::Email), Some(&1));
    assert_eq!(stats.by_type.get(&ActivityType::Meeting), None);
}

#[test]
fn contact_search_is_case_insensitive_across_fields() {
    let contacts = vec![
        contact(1, "Sarah Johnson", Some("TechCorp"), ContactStatus::Active),
        contact(2, "Michael Chen", Some("Innovate Labs"), ContactStatus::Lead),
        contact(3, "Emily Rodriguez", None, ContactStatus::Inactive),
    ];

    let by_company = search(&contacts, "techcorp");
    assert_eq!(by_company.len(), 1);
    assert_eq!(by_company[0].id, 1);

    let by_email = search(&contacts, "EMILY.RODRIGUEZ@");
    assert_eq!(by_email.len(), 1);
    assert_eq!(by_email[0].id, 3);

    assert_eq!(search(&contacts, "   ").len(), 3);
    assert!(search(&contacts, "nobody").is_empty());

    let leads = filter_contacts(&contacts, "", &Selection::Only(ContactStatus::Lead));
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].id, 2);

    let none = filter_contacts(&contacts, "sarah", &Selection::Only(ContactStatus::Lead));
    assert!(none.is_empty());
}

#[test]
fn selection_parses_all_sentinel_and_values() {
    assert_eq!(
        Selection::parse_with("all", ContactStatus::parse),
        Some(Selection::All)
    );
    assert_eq!(
        Selection::parse_with("lead", ContactStatus::parse),
        Some(Selection::Only(ContactStatus::Lead))
    );
    assert_eq!(Selection::parse_with("bogus", ContactStatus::parse), None);
}

#[test]
fn absent_and_dangling_references_resolve_to_placeholders() {
    let contacts = vec![contact(1, "Sarah Johnson", None, ContactStatus::Active)];
    let deals = vec![deal(7, DealStage::Lead, 100.0)];

    assert_eq!(contact_display_name(Some(1), &contacts), "Sarah Johnson");
    assert_eq!(contact_display_name(Some(99), &contacts), UNKNOWN_CONTACT);
    assert_eq!(contact_display_name(None, &contacts), SYSTEM_ACTOR);
    assert_eq!(deal_display_title(Some(7), &deals), "Deal 7");
    assert_eq!(deal_display_title(Some(8), &deals), UNKNOWN_DEAL);

    assert!(matches!(lookup_contact(None, &contacts), Lookup::Absent));
    assert!(matches!(lookup_contact(Some(2), &contacts), Lookup::Dangling(2)));
    assert_eq!(
        lookup_contact(Some(1), &contacts).found().map(|c| c.id),
        Some(1)
    );
}

#[tokio::test]
async fn deleted_contact_renders_as_unknown() {
    let store = ContactStore::new(
        vec![contact(1, "Sarah Johnson", None, ContactStatus::Active)],
        Latency::none(),
    );
    let activity = Activity {
        contact_id: Some(1),
        ..activity(1, ActivityType::Call, at(2024, 3, 5, 9, 0))
    };

    let before = store.get_all().await;
    assert_eq!(contact_display_name(activity.contact_id, &before), "Sarah Johnson");

    store.delete(1).await.unwrap();
    let after = store.get_all().await;
    assert_eq!(contact_display_name(activity.contact_id, &after), UNKNOWN_CONTACT);
}

#[test]
fn deal_search_matches_title_only() {
    let renewal = Deal {
        title: "Renewal".to_string(),
        description: Some("zebra migration".to_string()),
        ..deal(1, DealStage::Lead, 100.0)
    };
    let deals = vec![renewal];

    assert!(search(&deals, "zebra").is_empty());
    assert_eq!(search(&deals, "RENEW").len(), 1);
}
