use std::time::Duration;

use planguard::domain::{Project, Task, TaskPatch};
use planguard::errors::PlanError;
use planguard::guard::{GuardConfig, Scope};
use planguard::service::PlanServices;
use planguard::store::MemoryStore;
use planguard_test_utils::builders::{NewProjectBuilder, NewTaskBuilder};
use planguard_test_utils::slow_store::SlowStore;
use planguard_test_utils::{init_tracing, with_timeout};

type SlowServices = PlanServices<MemoryStore<Project>, SlowStore<MemoryStore<Task>>>;

fn slow_services(delay_ms: u64) -> SlowServices {
    PlanServices::new(
        MemoryStore::new(),
        SlowStore::new(MemoryStore::new(), Duration::from_millis(delay_ms)),
        GuardConfig::default(),
    )
}

fn depend_on(dep: planguard::types::NodeId) -> TaskPatch {
    TaskPatch {
        dependencies: Some(vec![dep]),
        ..TaskPatch::default()
    }
}

#[tokio::test]
async fn conflicting_concurrent_updates_commit_exactly_one() {
    init_tracing();
    let svc = slow_services(50);

    let project = svc
        .projects
        .create(NewProjectBuilder::new("P").build())
        .await
        .unwrap()
        .id;
    let a = svc
        .tasks
        .create(NewTaskBuilder::new(project, "A").build())
        .await
        .unwrap()
        .id;
    let b = svc
        .tasks
        .create(NewTaskBuilder::new(project, "B").build())
        .await
        .unwrap()
        .id;

    // Each update is acyclic against the snapshot the other one started from.
    let (first, second) = with_timeout(async {
        tokio::join!(
            svc.tasks.update(a, depend_on(b)),
            svc.tasks.update(b, depend_on(a)),
        )
    })
    .await;

    let outcomes = [first.is_ok(), second.is_ok()];
    assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1, "{outcomes:?}");

    let rejected = first.err().or(second.err()).unwrap();
    assert!(matches!(rejected, PlanError::CycleDetected { .. }));

    svc.guard()
        .audit_scope(&Scope::Tasks { project })
        .await
        .unwrap();
}

#[tokio::test]
async fn held_scope_blocks_only_its_own_project() {
    init_tracing();
    let svc = slow_services(0);

    let p1 = svc
        .projects
        .create(NewProjectBuilder::new("P1").build())
        .await
        .unwrap()
        .id;
    let p2 = svc
        .projects
        .create(NewProjectBuilder::new("P2").build())
        .await
        .unwrap()
        .id;

    let permit = svc.guard().lock(&Scope::Tasks { project: p1 }).await;

    with_timeout(svc.tasks.create(NewTaskBuilder::new(p2, "free").build()))
        .await
        .unwrap();

    let blocked = tokio::time::timeout(
        Duration::from_millis(50),
        svc.tasks.create(NewTaskBuilder::new(p1, "waits").build()),
    )
    .await;
    assert!(blocked.is_err(), "create in a held scope must wait");
    assert!(svc.tasks.list_by_project(p1).await.unwrap().is_empty());

    drop(permit);
    with_timeout(svc.tasks.create(NewTaskBuilder::new(p1, "after").build()))
        .await
        .unwrap();
}
