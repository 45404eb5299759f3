//! Task poller behavior with scripted task sources

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::eq;
use s2ctl_core::{
    CoreError, DOMAIN_CREATE_TIMEOUT, ProgressEvent, Sleeper, TaskPoller, TaskSource, TokioSleeper,
};
use ssclient::{ApiError, Task};

mock! {
    Source {}

    #[async_trait]
    impl TaskSource for Source {
        async fn fetch_task(&self, task_id: &str) -> ssclient::Result<Task>;
    }
}

/// Records requested pauses without sleeping
#[derive(Clone, Default)]
struct RecordingSleeper {
    pauses: Arc<Mutex<Vec<Duration>>>,
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.pauses.lock().unwrap().push(duration);
    }
}

fn task(id: &str, status: &str) -> Task {
    Task {
        id: id.to_string(),
        is_completed: Some(status.to_string()),
        server_id: Some("l1s11".to_string()),
        ..Task::default()
    }
}

fn scripted(statuses: &'static [&'static str]) -> MockSource {
    let mut source = MockSource::new();
    let mut step = 0;
    source
        .expect_fetch_task()
        .with(eq("lt1"))
        .times(statuses.len())
        .returning(move |id| {
            let status = statuses[step];
            step += 1;
            Ok(task(id, status))
        });
    source
}

#[tokio::test]
async fn completes_after_two_sleeps() {
    let source = scripted(&["InProgress", "InProgress", "Completed"]);
    let sleeper = RecordingSleeper::default();
    let poller = TaskPoller::new().with_sleeper(sleeper.clone());

    let task = poller.wait(&source, "lt1").await.unwrap();

    assert_eq!(task.server_id.as_deref(), Some("l1s11"));
    assert_eq!(
        *sleeper.pauses.lock().unwrap(),
        vec![Duration::from_secs(1), Duration::from_secs(1)]
    );
}

#[tokio::test]
async fn failed_task_reports_its_id() {
    let source = scripted(&["InProgress", "Failed"]);
    let poller = TaskPoller::new().with_sleeper(RecordingSleeper::default());

    let err = poller.wait(&source, "lt1").await.unwrap_err();

    assert!(matches!(err, CoreError::TaskFailed { ref task_id } if task_id == "lt1"));
    assert_eq!(err.to_string(), "task 'lt1' failed");
}

#[tokio::test]
async fn unknown_status_is_treated_as_pending() {
    let source = scripted(&["", "queued", "Completed"]);
    let sleeper = RecordingSleeper::default();
    let poller = TaskPoller::new().with_sleeper(sleeper.clone());

    poller.wait(&source, "lt1").await.unwrap();
    assert_eq!(sleeper.pauses.lock().unwrap().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn pending_forever_times_out() {
    let mut source = MockSource::new();
    source
        .expect_fetch_task()
        .returning(|id| Ok(task(id, "InProgress")));
    let poller = TaskPoller::new()
        .with_sleeper(TokioSleeper)
        .with_timeout(Duration::from_secs(5));

    let err = poller.wait(&source, "lt1").await.unwrap_err();

    match err {
        CoreError::TaskTimeout { task_id, elapsed } => {
            assert_eq!(task_id, "lt1");
            assert!(elapsed >= Duration::from_secs(5));
        }
        other => panic!("expected timeout, got {other:?}"),
    }
}

/// Returns at once without yielding to the runtime
struct NoSleep;

#[async_trait]
impl Sleeper for NoSleep {
    async fn sleep(&self, _duration: Duration) {}
}

#[tokio::test]
async fn deadline_holds_when_the_sleeper_never_yields() {
    let mut source = MockSource::new();
    source
        .expect_fetch_task()
        .returning(|id| Ok(task(id, "InProgress")));
    let poller = TaskPoller::new()
        .with_sleeper(NoSleep)
        .with_timeout(Duration::from_millis(50));

    let started = std::time::Instant::now();
    let err = poller.wait(&source, "lt1").await.unwrap_err();

    assert!(matches!(err, CoreError::TaskTimeout { ref task_id, .. } if task_id == "lt1"));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn operation_default_applies_without_override() {
    let mut source = MockSource::new();
    source
        .expect_fetch_task()
        .returning(|id| Ok(task(id, "InProgress")));
    let poller = TaskPoller::new();

    let err = poller
        .wait_within(&source, "lt1", Duration::from_secs(180))
        .await
        .unwrap_err();

    match err {
        CoreError::TaskTimeout { elapsed, .. } => {
            assert!(elapsed >= Duration::from_secs(180));
            assert!(elapsed < Duration::from_secs(182));
        }
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn domain_deadline_outlasts_a_task_pending_at_sixty_seconds() {
    let mut source = MockSource::new();
    let mut polls = 0;
    source.expect_fetch_task().returning(move |id| {
        polls += 1;
        Ok(task(id, if polls <= 90 { "InProgress" } else { "Completed" }))
    });
    let poller = TaskPoller::new();

    let started = tokio::time::Instant::now();
    let task = poller
        .wait_within(&source, "lt1", DOMAIN_CREATE_TIMEOUT)
        .await
        .unwrap();

    assert_eq!(task.id, "lt1");
    assert!(started.elapsed() >= Duration::from_secs(90));
    assert!(started.elapsed() < DOMAIN_CREATE_TIMEOUT);
}

#[tokio::test]
async fn fetch_errors_propagate_unchanged() {
    let mut source = MockSource::new();
    source.expect_fetch_task().times(1).returning(|_| {
        Err(ApiError::Response {
            status: 404,
            message: "Task not found".to_string(),
        })
    });
    let poller = TaskPoller::new().with_sleeper(RecordingSleeper::default());

    let err = poller.wait(&source, "lt1").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn progress_events_in_order() {
    let source = scripted(&["InProgress", "Completed"]);
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let poller = TaskPoller::new()
        .with_sleeper(RecordingSleeper::default())
        .on_progress(Box::new(move |event| sink.lock().unwrap().push(event)));

    poller.wait(&source, "lt1").await.unwrap();

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 4);
    assert_eq!(
        events[0],
        ProgressEvent::Started {
            task_id: "lt1".to_string()
        }
    );
    assert!(matches!(&events[1], ProgressEvent::Polling { status, .. } if status == "InProgress"));
    assert!(matches!(&events[2], ProgressEvent::Polling { status, .. } if status == "Completed"));
    assert_eq!(
        events[3],
        ProgressEvent::Completed {
            task_id: "lt1".to_string()
        }
    );
}
