//! Reordering analysis and transformation planner for sparse-linear-algebra
//! loop kernels.
//!
//! This crate is a thin facade over the workspace's component crates,
//! mirroring spec.md §2's data flow: `reorder-registry` (Function
//! Descriptor Registry) + the host's IR feed `reorder-graph`'s Builder and
//! Propagator, whose coloured graph `reorder-actions`'s Planner turns into
//! an action list via [`plan_reordering`].

pub use reorder_actions::{
    plan_actions, plan_reordering, preamble, reordering_call, reverse_reordering_call, Action,
    EmittedArg, EmittedCall, EmittedStatement, REORDERING_STATUS_VAR,
};
pub use reorder_graph::{propagate, Builder, Idg, Vertex, VertexId};
pub use reorder_ir::{
    BasicBlockId, CallSites, ExprKind, ExprNode, LambdaDescriptor, LivenessOracle, NodeId,
    RegionIr, Statement, TypeOracle,
};
pub use reorder_model::error::{Diagnostic, Diagnostics, PlannerError, TracingDiagnostics};
pub use reorder_model::{
    ArgIndex, ArrayType, Axis, DistributivityEdge, DistributivityRecord, OpaqueSlot, PermColor,
    RelationTag, ReorderingStatus, Symbol, SymbolMap,
};
pub use reorder_registry::{FunctionRegistry, LookupResult};
