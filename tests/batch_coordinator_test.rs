//! Integration tests for sequential batch export

mod common;

use common::{count, job, last_position, position, repeat, Event, Harness};
use onexport::core::export::{expected_output_path, BatchCoordinator, ExportJobRunner};
use onexport::domain::JobStatus;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

fn coordinator(h: &Harness) -> Arc<BatchCoordinator> {
    let runner = ExportJobRunner::new(h.automation.clone(), h.fs.clone());
    Arc::new(BatchCoordinator::new(Arc::new(runner)))
}

#[tokio::test(start_paused = true)]
async fn test_batch_aggregates_outcomes_in_order() {
    let h = Harness::new();
    let (_tx, rx) = watch::channel(false);
    h.automation.on_publish("Work", repeat(1000, 1));
    h.automation.fail_open("Locked", 1, "notebook is password protected");
    h.automation.on_publish("Recipes", repeat(3000, 1));

    let summary = coordinator(&h)
        .run_all(vec![job("Work"), job("Locked"), job("Recipes")], &rx)
        .await;

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.cancelled, 0);
    assert_eq!(summary.total(), 3);
    assert!(!summary.interrupted);
    assert!(!summary.overall_success());
    assert_eq!(
        summary.per_job_messages,
        vec![
            "✓ Work".to_string(),
            "✗ Locked: Failed to open notebook: notebook is password protected".to_string(),
            "✓ Recipes".to_string(),
        ]
    );

    let statuses: Vec<JobStatus> = summary.outcomes.iter().map(|o| o.status()).collect();
    assert_eq!(
        statuses,
        vec![JobStatus::Success, JobStatus::TriggerFailed, JobStatus::Success]
    );
}

#[tokio::test(start_paused = true)]
async fn test_next_trigger_waits_for_previous_terminal_state() {
    let h = Harness::new();
    let (_tx, rx) = watch::channel(false);
    let mut slow = vec![None, None, Some(100), Some(900)];
    slow.extend(repeat(900, 6));
    h.automation.on_publish("Slow", slow);
    h.automation.on_publish("Fast", repeat(50, 1));

    let first = job("Slow");
    let summary = coordinator(&h).run_all(vec![first.clone(), job("Fast")], &rx).await;
    assert!(summary.overall_success());

    let events = h.events();
    let last_slow_poll = last_position(&events, &Event::Poll(expected_output_path(&first))).unwrap();
    let fast_open = position(&events, &Event::Open("Fast".to_string())).unwrap();
    assert!(last_slow_poll < fast_open);
}

#[tokio::test(start_paused = true)]
async fn test_failed_job_does_not_stop_batch() {
    let h = Harness::new();
    let (_tx, rx) = watch::channel(false);
    h.automation.on_publish("Empty", repeat(0, 1));
    h.automation.on_publish("Work", repeat(10, 1));

    let summary = coordinator(&h)
        .run_all(vec![job("Empty"), job("Work")], &rx)
        .await;

    assert_eq!(summary.outcomes[0].status(), JobStatus::EmptyFile);
    assert_eq!(summary.outcomes[1].status(), JobStatus::Success);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.succeeded, 1);
}

#[tokio::test(start_paused = true)]
async fn test_empty_batch() {
    let h = Harness::new();
    let (_tx, rx) = watch::channel(false);

    let summary = coordinator(&h).run_all(Vec::new(), &rx).await;

    assert_eq!(summary.total(), 0);
    assert!(summary.overall_success());
    assert!(!summary.interrupted);
    assert!(h.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_stops_remaining_jobs() {
    let h = Harness::new();
    let (tx, rx) = watch::channel(false);
    h.automation.on_publish("Work", repeat(10, 1));
    // never appears, so the second job is still polling when cancelled
    h.automation.on_publish("Stuck", vec![None]);
    h.automation.on_publish("Never", repeat(10, 1));

    let coordinator = coordinator(&h);
    let handle = coordinator
        .clone()
        .spawn(vec![job("Work"), job("Stuck"), job("Never")], rx);

    tokio::time::sleep(Duration::from_secs(60)).await;
    tx.send(true).unwrap();
    let summary = handle.await.unwrap();

    assert!(summary.interrupted);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.cancelled, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.outcomes.len(), 2);
    assert_eq!(summary.outcomes[1].target_name(), "Stuck");
    assert_eq!(summary.outcomes[1].status(), JobStatus::Cancelled);
    assert!(summary.overall_success());

    assert_eq!(
        count(&h.events(), |e| *e == Event::Open("Never".to_string())),
        0
    );
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_before_start_runs_nothing() {
    let h = Harness::new();
    let (tx, rx) = watch::channel(false);
    tx.send(true).unwrap();

    let summary = coordinator(&h)
        .run_all(vec![job("Work"), job("Personal")], &rx)
        .await;

    assert!(summary.interrupted);
    assert_eq!(summary.total(), 0);
    assert!(summary.outcomes.is_empty());
    assert!(h.events().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_colliding_names_overwrite_earlier_export() {
    let h = Harness::new();
    let (_tx, rx) = watch::channel(false);

    // both notebooks sanitize to the same file name
    let first = job("Notes:");
    let second = job("Notes?");
    let path = expected_output_path(&first);
    assert_eq!(path, expected_output_path(&second));

    h.automation.on_publish("Notes:", repeat(1000, 1));
    h.automation.on_publish("Notes?", vec![None, Some(2500)]);

    let summary = coordinator(&h).run_all(vec![first, second], &rx).await;

    assert_eq!(summary.succeeded, 2);
    assert_eq!(h.fs.file(&path), Some(2500));

    let events = h.events();
    let first_publish = position(
        &events,
        &Event::Publish("Notes:".to_string(), path.clone(), 1),
    )
    .unwrap();
    let removal = position(&events, &Event::Remove(path.clone())).unwrap();
    let second_publish = position(
        &events,
        &Event::Publish("Notes?".to_string(), path.clone(), 1),
    )
    .unwrap();
    assert!(first_publish < removal);
    assert!(removal < second_publish);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_batches_are_serialized() {
    let h = Harness::new();
    let (_tx, rx) = watch::channel(false);
    let mut script = vec![None, Some(100)];
    script.extend(repeat(500, 6));
    h.automation.on_publish("First", script.clone());
    h.automation.on_publish("Second", script);

    let coordinator = coordinator(&h);
    let first = coordinator.clone().spawn(vec![job("First")], rx.clone());
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(coordinator.is_running());

    let second = coordinator.clone().spawn(vec![job("Second")], rx.clone());

    let first = first.await.unwrap();
    let second = second.await.unwrap();
    assert!(first.overall_success());
    assert!(second.overall_success());
    assert_ne!(first.run_id, second.run_id);
    assert!(!coordinator.is_running());

    let events = h.events();
    let last_first_poll = last_position(
        &events,
        &Event::Poll(expected_output_path(&job("First"))),
    )
    .unwrap();
    let second_open = position(&events, &Event::Open("Second".to_string())).unwrap();
    assert!(last_first_poll < second_open);
}

#[tokio::test(start_paused = true)]
async fn test_summary_duration_covers_all_jobs() {
    let h = Harness::new();
    let (_tx, rx) = watch::channel(false);
    h.automation.on_publish("A", repeat(10, 1));
    h.automation.on_publish("B", repeat(10, 1));

    let summary = coordinator(&h).run_all(vec![job("A"), job("B")], &rx).await;

    // six ticks each, five sleeps between them
    assert_eq!(summary.duration, Duration::from_secs(20));
    assert_eq!(summary.outcomes[0].duration(), Duration::from_secs(10));
}
