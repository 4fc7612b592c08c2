use super::*;
use crate::workflow_step::StepDef;
use serde_json::json;
use std::sync::Arc;

fn value_fn(v: serde_json::Value) -> crate::workflow_step::StepFn {
    Arc::new(move |_args| Ok(v.clone()))
}

#[test]
fn duplicate_step_names_are_rejected_at_seal() {
    let wf = WorkflowBuilder::new("w")
        .step(StepDef::new("a", value_fn(json!(1))))
        .step(StepDef::new("a", value_fn(json!(2))))
        .seal();
    assert!(matches!(
        wf.unwrap_err(),
        WorkflowSealError::InvalidDefinition(InvalidDefinitionError::DuplicateStepName { .. })
    ));
}

#[test]
fn non_void_step_gains_implied_next_step_path() {
    let wf = WorkflowBuilder::new("w")
        .step(StepDef::new("a", value_fn(json!(1))))
        .step(StepDef::new("b", value_fn(json!(2))).void())
        .seal()
        .expect("seal");
    let a = wf.step_by_name("a").unwrap();
    assert_eq!(a.paths, vec![WorkflowPath::NextStep]);
}

#[test]
fn step_lookup_by_index_and_name_agree() {
    let wf = WorkflowBuilder::new("w")
        .step(StepDef::new("a", value_fn(json!(1))))
        .step(StepDef::new("b", value_fn(json!(2))).void())
        .seal()
        .expect("seal");
    assert_eq!(wf.step_by_index(1).unwrap().name, "b");
    assert_eq!(wf.step_by_name("b").unwrap().index, 1);
}

#[test]
fn unknown_index_and_name_are_lookup_errors() {
    let wf = WorkflowBuilder::new("w")
        .step(StepDef::new("a", value_fn(json!(1))).void())
        .seal()
        .expect("seal");
    assert!(wf.step_by_index(5).is_err());
    assert!(wf.step_by_name("ghost").is_err());
}

#[test]
fn backward_goto_step_declaration_is_rejected_at_seal() {
    let wf = WorkflowBuilder::new("w")
        .step(StepDef::new("a", value_fn(json!(1))).void())
        .step(
            StepDef::new("b", value_fn(json!(2)))
                .paths(vec![WorkflowPath::GoToStep(StepTarget::Index(0))])
                .void(),
        )
        .seal();
    assert!(matches!(
        wf.unwrap_err(),
        WorkflowSealError::InvalidDefinition(InvalidDefinitionError::BackwardJumpDeclared { .. })
    ));
}

#[test]
fn remaining_steps_picks_longest_matching_continuation() {
    // step0: NextStep (-> step1 -> end, len 2) or GoToEnd (len 1)
    let wf = WorkflowBuilder::new("w")
        .step(
            StepDef::new("a", value_fn(json!(1)))
                .paths(vec![WorkflowPath::NextStep, WorkflowPath::GoToEnd]),
        )
        .step(StepDef::new("b", value_fn(json!(2))).void())
        .seal()
        .expect("seal");

    assert_eq!(wf.remaining_steps(0, PathKind::NextStep, None), 2);
    assert_eq!(wf.remaining_steps(0, PathKind::GoToEnd, None), 1);
}

#[test]
fn remaining_steps_falls_back_to_len_minus_current_when_unmatched() {
    let wf = WorkflowBuilder::new("w")
        .step(StepDef::new("a", value_fn(json!(1))))
        .step(StepDef::new("b", value_fn(json!(2))).void())
        .seal()
        .expect("seal");
    // step 0 never declares GoToEnd, so asking for it should fall back
    assert_eq!(wf.remaining_steps(0, PathKind::GoToEnd, None), 2);
}

#[test]
fn depth_cap_override_is_honored_over_the_default() {
    // Three forward steps easily fit the default cap (max(5*3, 100) = 100),
    // but a tight override of 1 can't reach the end from step 0.
    let wf = WorkflowBuilder::new("w")
        .step(StepDef::new("a", value_fn(json!(1))))
        .step(StepDef::new("b", value_fn(json!(2))))
        .step(StepDef::new("c", value_fn(json!(3))).void())
        .seal_with_depth_cap(Some(1));
    assert!(matches!(
        wf.unwrap_err(),
        WorkflowSealError::InvalidDefinition(InvalidDefinitionError::ContinuationDepthExceeded { .. })
    ));
}

#[test]
fn seal_with_depth_cap_none_matches_plain_seal() {
    let wf = WorkflowBuilder::new("w")
        .step(StepDef::new("a", value_fn(json!(1))).void())
        .seal_with_depth_cap(None)
        .expect("seal");
    assert_eq!(wf.len(), 1);
}

#[test]
fn resolve_target_handles_index_and_name() {
    let wf = WorkflowBuilder::new("w")
        .step(StepDef::new("a", value_fn(json!(1))).void())
        .step(StepDef::new("b", value_fn(json!(2))).void())
        .seal()
        .expect("seal");
    assert_eq!(wf.resolve_target(&StepTarget::Index(1)).unwrap(), 1);
    assert_eq!(wf.resolve_target(&StepTarget::Name("b".to_string())).unwrap(), 1);
    assert!(wf.resolve_target(&StepTarget::Index(99)).is_err());
}
