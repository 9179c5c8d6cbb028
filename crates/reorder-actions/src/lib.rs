//! Action Planner, Action Representation, and the `plan_reordering`
//! orchestrator (spec.md §4.4, §4.5, §4.6).

mod action;
mod orchestrator;
mod planner;

pub use action::{Action, EmittedArg, EmittedCall, EmittedStatement};
pub use orchestrator::plan_reordering;
pub use planner::{plan_actions, preamble, reordering_call, reverse_reordering_call, REORDERING_STATUS_VAR};
