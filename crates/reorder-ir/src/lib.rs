//! External interfaces the planner consumes (spec.md §6): the expression
//! sum type, the IR/liveness/type oracle traits, the call-site table, and
//! the names the planner emits into the output IR. Nothing in this crate
//! builds or colours a graph — that is `reorder-graph`'s job.

mod call_sites;
mod expr;
mod oracles;
mod runtime_names;

#[cfg(feature = "testkit")]
pub mod testkit;

pub use call_sites::CallSites;
pub use expr::{BasicBlockId, ExprKind, ExprNode, LambdaDescriptor, NodeId, Statement};
pub use oracles::{ArrayType, LivenessOracle, RegionIr, TypeOracle};
pub use runtime_names::*;
