//! Error and diagnostic types for the planner (spec.md §7).
//!
//! `PlannerError` covers the five fatal dispositions that abort a planner
//! invocation. `ConflictingColor` is deliberately *not* one of its variants:
//! per spec.md §7 it is not fatal, it is a discovery that two permutation
//! vectors are constrained to be equal, surfaced instead as a `Diagnostic`.

use crate::{Axis, PermColor, Symbol};

/// Fatal error kinds. Every one of these aborts the current
/// `plan_reordering` invocation and leaves the caller's action list
/// untouched (spec.md §7, §4.5 step 8).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlannerError {
    #[error("call's callee is empty after resolution")]
    UnresolvedFunction,

    #[error("no registry entry for {module}.{name}")]
    UndescribedFunction { module: String, name: String },

    #[error("{module}.{name} is marked non-distributive")]
    NonDistributiveFunction { module: String, name: String },

    #[error("call expression has an unexpected head")]
    UnhandledExpr,

    #[error("AST node is of an unanticipated shape")]
    UnknownAstDistributivity,
}

/// A non-fatal observation raised during colour propagation: two
/// permutation vertices are constrained to be equal (or inverse-equal)
/// even though one of them was already coloured differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub symbol: Symbol,
    pub axis: Axis,
    pub existing: PermColor,
    pub required: PermColor,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "permutation constraint: {}.{:?} ({}) must equal {}",
            self.symbol, self.axis, self.existing, self.required
        )
    }
}

/// Sink for diagnostics raised during a planner invocation. Kept as a
/// trait, not a hardcoded `Vec`, so production callers can route
/// diagnostics through `tracing` while tests can assert on a plain `Vec`.
pub trait Diagnostics {
    fn record(&mut self, diagnostic: Diagnostic);
}

impl Diagnostics for Vec<Diagnostic> {
    fn record(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// A `Diagnostics` sink that logs through `tracing` instead of
/// accumulating. Useful for hosts that only want the log line, not the
/// structured value.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn record(&mut self, diagnostic: Diagnostic) {
        tracing::info!(
            target: "reorder.propagate",
            symbol = %diagnostic.symbol,
            axis = ?diagnostic.axis,
            existing = %diagnostic.existing,
            required = %diagnostic.required,
            "{diagnostic}"
        );
    }
}
