use super::*;
use serde_json::json;

fn noop_fn() -> StepFn {
    Arc::new(|_args| Ok(json!(null)))
}

#[test]
fn non_void_step_with_no_declared_paths_gets_implied_next_step() {
    let def = StepDef::new("a", noop_fn()).with_implied_next_step();
    assert_eq!(def.paths, vec![WorkflowPath::NextStep]);
}

#[test]
fn void_step_with_no_declared_paths_stays_empty() {
    let def = StepDef::new("a", noop_fn()).void().with_implied_next_step();
    assert!(def.paths.is_empty());
}

#[test]
fn non_void_step_with_explicit_goto_end_does_not_gain_next_step() {
    let def = StepDef::new("a", noop_fn())
        .paths(vec![WorkflowPath::GoToEnd])
        .with_implied_next_step();
    assert_eq!(def.paths, vec![WorkflowPath::GoToEnd]);
}

#[test]
fn invoke_calls_through_to_the_underlying_closure() {
    let step = WorkflowStep::new(
        "a".to_string(),
        0,
        vec![],
        vec![WorkflowPath::NextStep],
        Arc::new(|_args| Ok(json!(42))),
    );
    let args = crate::di::resolve(
        &[],
        &json!(null),
        &json!(null),
        &crate::di::DependencyRegistry::new(),
        &mut crate::di::DependsCache::new(),
        &mut crate::di::ScopeStack::new(),
    )
    .unwrap();
    assert_eq!(step.invoke(&args).unwrap(), json!(42));
}

#[test]
fn step_error_converts_into_failure_signal() {
    let signal: StepSignal = StepError::new("boom").into();
    assert!(matches!(signal, StepSignal::Failure(_)));
}
