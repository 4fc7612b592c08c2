use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use wf_core::{Job, JobConfig, JobStatus, PublisherConfig};
use wf_memory::{InMemoryQueue, InMemoryStateStore};

use super::*;

fn fast_config() -> PublisherConfig {
    PublisherConfig { name: "publisher".to_string(), poll_interval: Duration::from_millis(15), batch_size: 10 }
}

#[tokio::test]
async fn fetch_and_queue_publishes_due_jobs_and_transitions_them() {
    let queue = Arc::new(InMemoryQueue::new());
    let store = Arc::new(InMemoryStateStore::new());
    let job = Job::new(JobConfig::builder("wf").build());
    store.create(job.clone()).await.unwrap();

    let runner = PublisherRunner::new(queue.clone(), store.clone(), fast_config());
    let cancel = CancellationToken::new();
    runner.fetch_and_queue(&cancel).await.unwrap();

    assert_eq!(queue.len(), 1);
    let persisted = store.get(job.id).await.unwrap();
    assert_eq!(persisted.status, JobStatus::Queued);
    assert!(!cancel.is_cancelled());
}

#[tokio::test]
async fn fetch_and_queue_is_a_no_op_when_nothing_is_due() {
    let queue = Arc::new(InMemoryQueue::new());
    let store = Arc::new(InMemoryStateStore::new());
    let runner = PublisherRunner::new(queue.clone(), store, fast_config());

    let cancel = CancellationToken::new();
    runner.fetch_and_queue(&cancel).await.unwrap();
    assert!(queue.is_empty());
}

#[tokio::test]
async fn run_loop_stops_right_after_the_in_flight_batch_when_pre_cancelled() {
    let queue = Arc::new(InMemoryQueue::new());
    let store = Arc::new(InMemoryStateStore::new());
    let runner = PublisherRunner::new(queue, store, fast_config());

    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = tokio::time::timeout(Duration::from_millis(200), runner.run_loop(&cancel)).await;
    assert!(result.expect("run_loop should not hang").is_ok());
}

#[tokio::test]
async fn run_loop_publishes_jobs_created_after_a_later_poll() {
    let queue = Arc::new(InMemoryQueue::new());
    let store = Arc::new(InMemoryStateStore::new());
    let runner = Arc::new(PublisherRunner::new(queue.clone(), store.clone(), fast_config()));

    let cancel = CancellationToken::new();
    let cancel_for_task = cancel.clone();
    let runner_for_task = runner.clone();
    let handle = tokio::spawn(async move { runner_for_task.run_loop(&cancel_for_task).await });

    // Created after the first (empty) poll cycle; should be picked up by a later one.
    tokio::time::sleep(Duration::from_millis(5)).await;
    let job = Job::new(JobConfig::builder("wf").build());
    store.create(job.clone()).await.unwrap();

    tokio::time::sleep(Duration::from_millis(60)).await;
    cancel.cancel();
    handle.await.unwrap().unwrap();

    assert_eq!(queue.len(), 1);
}
