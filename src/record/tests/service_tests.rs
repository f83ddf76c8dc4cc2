//! Service orchestration tests for task intake and lifecycle.

use std::sync::Arc;

use crate::record::adapters::memory::InMemoryTaskRepository;
use crate::record::domain::{
    Priority, RecordDomainError, StoredStatus, Task, TaskId, UserId,
};
use crate::record::ports::{
    TaskQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
};
use crate::record::services::{CreateTaskRequest, EditTaskRequest, TaskLifecycleService, TaskServiceError};
use crate::temporal::{TemporalNormalizer, TimePoint};
use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
        TemporalNormalizer::utc(),
    )
}

#[fixture]
fn owner() -> UserId {
    UserId::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_persists_and_is_retrievable(service: TestService, owner: UserId) {
    let request = CreateTaskRequest::new(owner, "Revisar capítulo 4")
        .with_subject("História")
        .with_priority("high")
        .with_due("09/11/2025 14:30");

    let created = service.create(request).await.expect("creation succeeds");
    let fetched = service
        .get(created.id())
        .await
        .expect("lookup succeeds")
        .expect("task exists");

    assert_eq!(fetched, created);
    assert_eq!(fetched.priority(), Priority::High);
    assert_eq!(fetched.status(), StoredStatus::Pending);
    assert!(fetched.due().is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_normalizes_equivalent_date_spellings(service: TestService, owner: UserId) {
    let legacy = service
        .create(CreateTaskRequest::new(owner, "a").with_due("09/11/2025 14:30"))
        .await
        .expect("legacy spelling accepted");
    let picker = service
        .create(CreateTaskRequest::new(owner, "b").with_due("2025-11-09T14:30:00"))
        .await
        .expect("picker spelling accepted");

    assert_eq!(legacy.due(), picker.due());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_without_due_date_is_valid(service: TestService, owner: UserId) {
    let created = service
        .create(CreateTaskRequest::new(owner, "Sem prazo"))
        .await
        .expect("creation succeeds");

    assert_eq!(created.due(), None);
    assert_eq!(created.priority(), Priority::Medium);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_unparseable_due_date_and_stores_nothing(
    service: TestService,
    owner: UserId,
) {
    let request = CreateTaskRequest::new(owner, "Tarefa").with_due("31/02/2025");

    let result = service.create(request).await;

    assert!(matches!(result, Err(TaskServiceError::InvalidDueDate(_))));
    let listed = service
        .list(owner, &TaskQuery::new())
        .await
        .expect("listing succeeds");
    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_unknown_priority(service: TestService, owner: UserId) {
    let request = CreateTaskRequest::new(owner, "Tarefa").with_priority("urgentissima");

    let result = service.create(request).await;

    assert!(matches!(result, Err(TaskServiceError::UnknownPriority(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_blank_title(service: TestService, owner: UserId) {
    let result = service.create(CreateTaskRequest::new(owner, "   ")).await;

    assert!(matches!(
        result,
        Err(TaskServiceError::Domain(RecordDomainError::EmptyTitle))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_reparses_the_due_date_every_time(service: TestService, owner: UserId) {
    let created = service
        .create(CreateTaskRequest::new(owner, "Original").with_due("2025-11-09"))
        .await
        .expect("creation succeeds");

    let edited = service
        .edit(
            created.id(),
            EditTaskRequest::new("Atualizada")
                .with_subject("Química")
                .with_due("10/12/2025 08:00"),
        )
        .await
        .expect("edit succeeds");

    assert_eq!(edited.title(), "Atualizada");
    assert_eq!(edited.subject(), Some("Química"));
    assert_ne!(edited.due(), created.due());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_can_clear_the_due_date(service: TestService, owner: UserId) {
    let created = service
        .create(CreateTaskRequest::new(owner, "Com prazo").with_due("2025-11-09"))
        .await
        .expect("creation succeeds");

    let edited = service
        .edit(created.id(), EditTaskRequest::new("Com prazo"))
        .await
        .expect("edit succeeds");

    assert_eq!(edited.due(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_rejects_bad_due_date_without_touching_the_task(
    service: TestService,
    owner: UserId,
) {
    let created = service
        .create(CreateTaskRequest::new(owner, "Intacta").with_due("2025-11-09"))
        .await
        .expect("creation succeeds");

    let result = service
        .edit(created.id(), EditTaskRequest::new("Nova").with_due("nunca"))
        .await;

    assert!(matches!(result, Err(TaskServiceError::InvalidDueDate(_))));
    let fetched = service
        .get(created.id())
        .await
        .expect("lookup succeeds")
        .expect("task exists");
    assert_eq!(fetched, created);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edit_unknown_task_is_reported(service: TestService) {
    let result = service
        .edit(TaskId::new(), EditTaskRequest::new("Fantasma"))
        .await;

    assert!(matches!(result, Err(TaskServiceError::UnknownTask(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn change_status_completes_with_grade(service: TestService, owner: UserId) {
    let created = service
        .create(CreateTaskRequest::new(owner, "Prova final"))
        .await
        .expect("creation succeeds");

    let completed = service
        .change_status(created.id(), "completed", Some("9.5"))
        .await
        .expect("completion succeeds");

    assert_eq!(completed.status(), StoredStatus::Completed);
    assert!(completed.completed_at().is_some());
    assert_eq!(
        completed.grade().map(|grade| grade.value_tenths()),
        Some(95)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn change_status_rejects_forbidden_transitions(service: TestService, owner: UserId) {
    let created = service
        .create(CreateTaskRequest::new(owner, "Terminada"))
        .await
        .expect("creation succeeds");
    service
        .change_status(created.id(), "completed", None)
        .await
        .expect("completion succeeds");

    let result = service.change_status(created.id(), "pending", None).await;

    assert!(matches!(
        result,
        Err(TaskServiceError::Domain(
            RecordDomainError::InvalidStatusTransition { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn change_status_rejects_unknown_wire_value(service: TestService, owner: UserId) {
    let created = service
        .create(CreateTaskRequest::new(owner, "Tarefa"))
        .await
        .expect("creation succeeds");

    // The derived status is not a storage state and must be refused.
    let result = service.change_status(created.id(), "overdue", None).await;

    assert!(matches!(result, Err(TaskServiceError::UnknownStatus(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_deletes_the_task(service: TestService, owner: UserId) {
    let created = service
        .create(CreateTaskRequest::new(owner, "Descartável"))
        .await
        .expect("creation succeeds");

    service.remove(created.id()).await.expect("removal succeeds");

    let fetched = service.get(created.id()).await.expect("lookup succeeds");
    assert_eq!(fetched, None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_filters_by_subject_and_status(service: TestService, owner: UserId) {
    service
        .create(CreateTaskRequest::new(owner, "Ler artigo").with_subject("Biologia"))
        .await
        .expect("creation succeeds");
    let chemistry = service
        .create(CreateTaskRequest::new(owner, "Relatório").with_subject("Química"))
        .await
        .expect("creation succeeds");
    service
        .change_status(chemistry.id(), "completed", None)
        .await
        .expect("completion succeeds");

    let pending_biology = service
        .list(
            owner,
            &TaskQuery::new()
                .with_subject("Biologia")
                .with_status(StoredStatus::Pending),
        )
        .await
        .expect("listing succeeds");

    assert_eq!(pending_biology.len(), 1);
    assert_eq!(pending_biology[0].subject(), Some("Biologia"));
}

/// Repository double that fails every write, for error-path coverage.
mockall::mock! {
    FailingTaskRepo {}

    #[async_trait]
    impl TaskRepository for FailingTaskRepo {
        async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;
        async fn remove(&self, id: TaskId) -> TaskRepositoryResult<()>;
        async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;
        async fn list_for_owner(
            &self,
            owner: UserId,
            query: &TaskQuery,
        ) -> TaskRepositoryResult<Vec<Task>>;
        async fn due_between(
            &self,
            owner: UserId,
            from: TimePoint,
            to: TimePoint,
        ) -> TaskRepositoryResult<Vec<Task>>;
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repository_failures_surface_as_service_errors(owner: UserId) {
    let mut repository = MockFailingTaskRepo::new();
    repository.expect_store().returning(|_| {
        Err(TaskRepositoryError::persistence(std::io::Error::other(
            "disk gone",
        )))
    });

    let service = TaskLifecycleService::new(
        Arc::new(repository),
        Arc::new(DefaultClock),
        TemporalNormalizer::utc(),
    );

    let result = service
        .create(CreateTaskRequest::new(owner, "Qualquer"))
        .await;

    assert!(matches!(
        result,
        Err(TaskServiceError::Repository(
            TaskRepositoryError::Persistence(_)
        ))
    ));
}
