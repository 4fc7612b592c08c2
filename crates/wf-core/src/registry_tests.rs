use super::*;
use crate::workflow::WorkflowBuilder;
use crate::workflow_step::StepDef;
use serde_json::json;
use std::sync::Arc;

fn sample_workflow(name: &str) -> Workflow {
    WorkflowBuilder::new(name)
        .step(StepDef::new("a", Arc::new(|_args| Ok(json!(1)))).void())
        .seal()
        .expect("seal")
}

#[test]
fn registered_workflow_is_retrievable_by_name() {
    let mut registry = WorkflowRegistry::new();
    registry.register(sample_workflow("w"));
    assert!(registry.get("w").is_ok());
    assert_eq!(registry.len(), 1);
}

#[test]
fn unregistered_name_is_an_unknown_workflow_error() {
    let registry = WorkflowRegistry::new();
    assert!(matches!(
        registry.get("missing").unwrap_err(),
        LookupError::UnknownWorkflow { .. }
    ));
}
