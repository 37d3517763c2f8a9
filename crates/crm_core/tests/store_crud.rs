use crm_core::{
    Activity, ActivityDraft, ActivityPatch, ActivityStore, ActivityType, Contact, ContactDraft,
    ContactPatch, ContactStatus, ContactStore, DealDraft, DealPatch, DealStage, DealStore,
    EntityKind, Latency, RepoError, TaskDraft, TaskPatch, TaskPriority, TaskStatus, TaskStore,
};
use chrono::NaiveDate;
use std::collections::BTreeSet;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn contact_draft(name: &str) -> ContactDraft {
    ContactDraft {
        phone: Some("+1 555 0100".to_string()),
        company: Some("Acme, Inc.".to_string()),
        status: ContactStatus::Lead,
        tags: BTreeSet::from(["vip".to_string()]),
        ..ContactDraft::new(name, format!("{}@example.com", name.to_lowercase()))
    }
}

#[tokio::test]
async fn create_then_get_returns_equal_record() {
    let store = ContactStore::empty(Latency::none());

    let created = store.create(contact_draft("Ada")).await;
    let loaded = store.get_by_id(created.id).await.unwrap();

    assert_eq!(loaded, created);
    assert_eq!(loaded.name, "Ada");
    assert_eq!(loaded.company.as_deref(), Some("Acme, Inc."));
    assert_eq!(loaded.status, ContactStatus::Lead);
    assert_eq!(loaded.created_at, loaded.updated_at);
}

#[tokio::test]
async fn first_id_is_one_and_ids_follow_maximum() {
    let store = TaskStore::empty(Latency::none());
    let first = store.create(TaskDraft::new("first")).await;
    assert_eq!(first.id, 1);

    let second = store.create(TaskDraft::new("second")).await;
    assert_eq!(second.id, 2);

    store.delete(first.id).await.unwrap();
    let third = store.create(TaskDraft::new("third")).await;
    assert_eq!(third.id, 3);
}

#[tokio::test]
async fn ids_continue_after_seeded_maximum() {
    let seed = {
        let store = ContactStore::empty(Latency::none());
        store.create(contact_draft("Seed")).await;
        let mut records = store.get_all().await;
        records[0].id = 41;
        records
    };
    let store = ContactStore::new(seed, Latency::none());

    let created = store.create(contact_draft("Next")).await;
    assert_eq!(created.id, 42);
}

#[tokio::test]
async fn creates_are_listed_most_recent_first() {
    let store = DealStore::empty(Latency::none());
    let before = store.get_all().await.len();

    for title in ["first", "second", "third"] {
        store.create(DealDraft::new(title, 1000.0, 1)).await;
    }

    let all = store.get_all().await;
    assert_eq!(all.len(), before + 3);
    let titles: Vec<&str> = all.iter().map(|deal| deal.title.as_str()).collect();
    assert_eq!(titles, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let store = ContactStore::empty(Latency::none());
    let created = store.create(contact_draft("Gone")).await;

    assert!(store.delete(created.id).await.unwrap());

    let err = store.get_by_id(created.id).await.unwrap_err();
    assert_eq!(
        err,
        RepoError::NotFound {
            kind: EntityKind::Contact,
            id: created.id
        }
    );
    assert_eq!(err.to_string(), format!("contact not found: {}", created.id));
}

#[tokio::test]
async fn update_and_delete_of_missing_id_are_not_found() {
    let store = TaskStore::empty(Latency::none());

    let update_err = store.update(99, TaskPatch::default()).await.unwrap_err();
    assert!(matches!(update_err, RepoError::NotFound { id: 99, .. }));

    let delete_err = store.delete(99).await.unwrap_err();
    assert!(matches!(
        delete_err,
        RepoError::NotFound {
            kind: EntityKind::Task,
            id: 99
        }
    ));
}

#[tokio::test]
async fn contact_patch_preserves_untouched_fields_and_bumps_updated_at() {
    let store = ContactStore::empty(Latency::none());
    let created = store.create(contact_draft("Grace")).await;

    let patch = ContactPatch {
        status: Some(ContactStatus::Active),
        ..ContactPatch::default()
    };
    let first = store.update(created.id, patch.clone()).await.unwrap();
    let second = store.update(created.id, patch).await.unwrap();

    assert_eq!(first.id, created.id);
    assert_eq!(first.status, ContactStatus::Active);
    assert_eq!(first.name, created.name);
    assert_eq!(first.email, created.email);
    assert_eq!(first.phone, created.phone);
    assert_eq!(first.company, created.company);
    assert_eq!(first.tags, created.tags);
    assert_eq!(first.created_at, created.created_at);
    assert!(first.updated_at > created.updated_at);
    assert!(second.updated_at > first.updated_at);
}

#[tokio::test]
async fn nested_none_clears_optional_fields() {
    let store = ContactStore::empty(Latency::none());
    let created = store.create(contact_draft("Linus")).await;

    let patch = ContactPatch {
        company: Some(None),
        ..ContactPatch::default()
    };
    let updated = store.update(created.id, patch).await.unwrap();

    assert_eq!(updated.company, None);
    assert_eq!(updated.phone, created.phone);
}

#[tokio::test]
async fn update_keeps_record_position() {
    let store = TaskStore::empty(Latency::none());
    let oldest = store.create(TaskDraft::new("oldest")).await;
    store.create(TaskDraft::new("middle")).await;
    store.create(TaskDraft::new("newest")).await;

    store
        .update(oldest.id, TaskPatch::status(TaskStatus::Completed))
        .await
        .unwrap();

    let titles: Vec<String> = store
        .get_all()
        .await
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(titles, vec!["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn delete_keeps_order_of_remaining_records() {
    let store = TaskStore::empty(Latency::none());
    store.create(TaskDraft::new("a")).await;
    let middle = store.create(TaskDraft::new("b")).await;
    store.create(TaskDraft::new("c")).await;

    store.delete(middle.id).await.unwrap();

    let titles: Vec<String> = store
        .get_all()
        .await
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(titles, vec!["c", "a"]);
}

#[tokio::test]
async fn snapshots_are_independent_of_store_state() {
    let store = ContactStore::empty(Latency::none());
    let created = store.create(contact_draft("Snap")).await;

    let mut snapshot: Vec<Contact> = store.get_all().await;
    snapshot[0].name = "Mutated".to_string();
    snapshot.clear();

    let reloaded = store.get_by_id(created.id).await.unwrap();
    assert_eq!(reloaded.name, "Snap");
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn deal_patch_merges_fields_and_clamps_input() {
    let store = DealStore::empty(Latency::none());
    let created = store
        .create(DealDraft {
            probability: 150,
            expected_close: Some(date(2024, 4, 1)),
            ..DealDraft::new("Renewal", -5.0, 7)
        })
        .await;
    assert_eq!(created.value, 0.0);
    assert_eq!(created.probability, 100);

    let updated = store
        .update(
            created.id,
            DealPatch {
                value: Some(12_500.0),
                stage: Some(DealStage::Proposal),
                ..DealPatch::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.value, 12_500.0);
    assert_eq!(updated.stage, DealStage::Proposal);
    assert_eq!(updated.title, "Renewal");
    assert_eq!(updated.contact_id, 7);
    assert_eq!(updated.expected_close, Some(date(2024, 4, 1)));
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn task_defaults_and_patch() {
    let store = TaskStore::empty(Latency::none());
    let created = store.create(TaskDraft::new("Call back")).await;
    assert_eq!(created.priority, TaskPriority::Medium);
    assert_eq!(created.status, TaskStatus::Pending);

    let updated = store
        .update(
            created.id,
            TaskPatch {
                due_date: Some(Some(date(2024, 3, 5))),
                deal_id: Some(Some(3)),
                ..TaskPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.due_date, Some(date(2024, 3, 5)));
    assert_eq!(updated.deal_id, Some(3));
    assert_eq!(updated.title, "Call back");
}

#[tokio::test]
async fn activity_timestamp_is_set_on_create_and_kept_on_update() {
    let store = ActivityStore::empty(Latency::none());
    let before = chrono::Utc::now();
    let created: Activity = store
        .create(ActivityDraft {
            contact_id: Some(2),
            ..ActivityDraft::new(ActivityType::Call, "Intro call")
        })
        .await;
    assert!(created.timestamp >= before);

    let updated = store
        .update(
            created.id,
            ActivityPatch {
                description: Some("Intro call, follow-up booked".to_string()),
                ..ActivityPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.timestamp, created.timestamp);
    assert_eq!(updated.kind, ActivityType::Call);
    assert_eq!(updated.contact_id, Some(2));
}
