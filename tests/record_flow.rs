//! End-to-end flows over the public API: intake, derived status, and
//! dashboard aggregation against the in-memory adapters.

use std::sync::Arc;

use chrono::{Duration, FixedOffset, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use taskmind::record::adapters::memory::{InMemoryEventRepository, InMemoryTaskRepository};
use taskmind::record::domain::{EffectiveStatus, StoredStatus, UserId};
use taskmind::record::services::{
    CreateEventRequest, CreateTaskRequest, DashboardService, EventLifecycleService,
    TaskLifecycleService, TaskServiceError,
};
use taskmind::temporal::{DisplayStyle, TemporalNormalizer};

struct App {
    tasks: TaskLifecycleService<InMemoryTaskRepository, DefaultClock>,
    events: EventLifecycleService<InMemoryEventRepository, DefaultClock>,
    dashboard: DashboardService<InMemoryTaskRepository, InMemoryEventRepository, DefaultClock>,
    normalizer: TemporalNormalizer,
    owner: UserId,
}

/// Wires the services the way an embedding application would, running in
/// the UTC-3 zone of the reference deployment.
#[fixture]
fn app() -> App {
    let zone = FixedOffset::west_opt(3 * 3600).expect("valid offset");
    let normalizer = TemporalNormalizer::new(zone);
    let task_repo = Arc::new(InMemoryTaskRepository::new());
    let event_repo = Arc::new(InMemoryEventRepository::new());
    let clock = Arc::new(DefaultClock);

    App {
        tasks: TaskLifecycleService::new(Arc::clone(&task_repo), Arc::clone(&clock), normalizer),
        events: EventLifecycleService::new(
            Arc::clone(&event_repo),
            Arc::clone(&clock),
            normalizer,
        ),
        dashboard: DashboardService::new(task_repo, event_repo, clock, normalizer),
        normalizer,
        owner: UserId::new(),
    }
}

fn days_from_now(days: i64) -> String {
    (Utc::now() + Duration::days(days)).to_rfc3339()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn brazilian_and_iso_inputs_converge_on_one_canonical_instant(app: App) {
    let App {
        tasks, normalizer, owner, ..
    } = app;

    let legacy = tasks
        .create(CreateTaskRequest::new(owner, "Formato antigo").with_due("09/11/2025 14:30"))
        .await
        .expect("legacy format accepted");
    let picker = tasks
        .create(CreateTaskRequest::new(owner, "Seletor de data").with_due("2025-11-09T14:30:00"))
        .await
        .expect("picker format accepted");

    let legacy_due = legacy.due().expect("due set");
    let picker_due = picker.due().expect("due set");

    assert_eq!(legacy_due, picker_due);
    assert_eq!(normalizer.storage_string(legacy_due), "2025-11-09 14:30:00");
    assert_eq!(
        normalizer.display_string(picker_due, DisplayStyle::DateTime),
        "09/11/2025 14:30"
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_task_completes_into_a_terminal_status(app: App) {
    let App {
        tasks,
        dashboard,
        owner,
        ..
    } = app;

    let task = tasks
        .create(CreateTaskRequest::new(owner, "Relatório atrasado").with_due(days_from_now(-30)))
        .await
        .expect("creation succeeds");

    let before = dashboard.summary(owner).await.expect("summary succeeds");
    assert_eq!(before.tally.overdue, 1);
    assert_eq!(before.overdue[0].effective_status, EffectiveStatus::Overdue);

    let completed = tasks
        .change_status(task.id(), "completed", Some("7.5"))
        .await
        .expect("completion succeeds");
    assert_eq!(completed.status(), StoredStatus::Completed);
    assert_eq!(completed.due(), task.due());

    let after = dashboard.summary(owner).await.expect("summary succeeds");
    assert_eq!(after.tally.overdue, 0);
    assert_eq!(after.tally.completed, 1);
    assert_eq!(
        after.average_grade.map(|grade| grade.value_tenths()),
        Some(75)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_due_date_never_reaches_the_store(app: App) {
    let App {
        tasks, dashboard, owner, ..
    } = app;

    let result = tasks
        .create(CreateTaskRequest::new(owner, "Corrompida").with_due("31/02/2025"))
        .await;
    assert!(matches!(result, Err(TaskServiceError::InvalidDueDate(_))));

    let summary = dashboard.summary(owner).await.expect("summary succeeds");
    assert_eq!(summary.tally.total, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn calendar_range_view_spans_tasks_and_events(app: App) {
    let App {
        tasks,
        events,
        dashboard,
        owner,
        ..
    } = app;

    tasks
        .create(CreateTaskRequest::new(owner, "Entrega do projeto").with_due("20/11/2025 23:59"))
        .await
        .expect("creation succeeds");
    events
        .create(
            CreateEventRequest::new(owner, "Prova de estatística", "18/11/2025 10:00")
                .with_kind("exam")
                .with_ends_at("18/11/2025 12:00"),
        )
        .await
        .expect("creation succeeds");

    let entries = dashboard
        .calendar(owner, "2025-11-01", "2025-11-30")
        .await
        .expect("calendar succeeds");

    let titles: Vec<&str> = entries.iter().map(|entry| entry.title.as_str()).collect();
    assert_eq!(titles, vec!["Prova de estatística", "Entrega do projeto"]);
    assert_eq!(entries[0].starts_display, "18/11/2025 10:00");
    assert_eq!(entries[1].starts_display, "20/11/2025 23:59");
}
