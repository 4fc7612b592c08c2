use super::*;
use serde_json::json;
use yare::parameterized;

#[test]
fn new_job_without_schedule_starts_pending() {
    let job = Job::new(JobConfig::builder("wf").build());
    assert_eq!(job.status, JobStatus::Pending);
    assert_eq!(job.steps_completed, 0);
}

#[test]
fn new_job_with_requested_start_time_starts_scheduled() {
    let job = Job::new(JobConfig::builder("wf").requested_start_time(1_000u64).build());
    assert_eq!(job.status, JobStatus::Scheduled);
}

#[test]
fn current_input_value_is_initial_before_any_step() {
    let job = Job::new(JobConfig::builder("wf").initial_input_value(json!(7)).build());
    assert_eq!(job.current_input_value(), &json!(7));
}

#[test]
fn current_input_value_is_last_return_after_a_step() {
    let mut job = Job::new(JobConfig::builder("wf").initial_input_value(json!(7)).build());
    job.mark_step_n_completed(1, json!("first"), 3);
    assert_eq!(job.current_input_value(), &json!("first"));
}

#[parameterized(
    zero_of_four = { 0, 4, 0.0 },
    one_of_four = { 1, 4, 25.0 },
    two_of_three = { 2, 3, 67.0 },
    all_done = { 4, 4, 100.0 },
    empty_workflow = { 0, 0, 100.0 },
)]
fn percent_completed_matches_formula(steps_completed: usize, total: usize, expected: f64) {
    let job = Job::builder().steps_completed(steps_completed).build();
    assert_eq!(job.percent_completed(total), expected);
}

#[test]
fn mark_step_n_completed_requeues_when_below_total() {
    let mut job = Job::builder().build();
    job.mark_running("a");
    job.mark_step_n_completed(1, json!(1), 2);
    assert_eq!(job.status, JobStatus::Queued);
    assert_eq!(job.steps_completed, 1);
    assert_eq!(job.last_return_value, Some(json!(1)));
    assert!(job.step_name.is_none());
}

#[test]
fn mark_step_n_completed_completes_at_total() {
    let mut job = Job::builder().build();
    job.mark_step_n_completed(2, json!(2), 2);
    assert_eq!(job.status, JobStatus::Completed);
    assert!(job.is_terminal());
}

#[test]
fn mark_aborted_sets_message_not_traceback() {
    let mut job = Job::builder().build();
    job.mark_aborted("nope");
    assert_eq!(job.status, JobStatus::Aborted);
    assert_eq!(job.abort_message.as_deref(), Some("nope"));
    assert!(job.exception_traceback.is_none());
}

#[test]
fn mark_failed_sets_traceback() {
    let mut job = Job::builder().build();
    job.mark_failed("boom: RuntimeError");
    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.exception_traceback.is_some());
}

#[test]
fn terminal_statuses_are_never_requeued() {
    for status in [
        JobStatus::Completed,
        JobStatus::Failed,
        JobStatus::Aborted,
        JobStatus::Cancelled,
    ] {
        let job = Job::builder().status(status).build();
        assert!(!job.should_be_requeued(), "{status} should not be requeued");
    }
}

#[test]
fn non_terminal_statuses_are_requeued() {
    for status in [JobStatus::Pending, JobStatus::Scheduled, JobStatus::Queued, JobStatus::Running] {
        let job = Job::builder().status(status).build();
        assert!(job.should_be_requeued());
    }
}

#[test]
fn request_cancellation_is_a_noop_on_terminal_jobs() {
    let mut job = Job::builder().status(JobStatus::Completed).build();
    job.request_cancellation();
    assert_eq!(job.status, JobStatus::Completed);
}

#[test]
fn request_cancellation_transitions_non_terminal_jobs() {
    let mut job = Job::builder().status(JobStatus::Running).build();
    job.request_cancellation();
    assert!(job.is_cancelling());
}

#[test]
fn validate_rejects_steps_completed_over_workflow_len() {
    let job = Job::builder().steps_completed(5).build();
    assert!(job.validate(3).is_err());
}

#[test]
fn validate_rejects_traceback_without_failed_status() {
    let job = Job::builder()
        .status(JobStatus::Running)
        .exception_traceback("oops")
        .build();
    assert!(job.validate(3).is_err());
}

#[test]
fn validate_accepts_consistent_failed_job() {
    let job = Job::builder()
        .status(JobStatus::Failed)
        .exception_traceback("oops")
        .build();
    assert!(job.validate(3).is_ok());
}
