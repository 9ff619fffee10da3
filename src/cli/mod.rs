//! Command-line workflow

pub mod orchestration;

pub use orchestration::{plan_publish, run_publish_workflow, PublishWorkflowArgs, WorkflowResult};
