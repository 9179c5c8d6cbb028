//! `plan_reordering` (spec.md §4.5): the one total entry point. Every
//! internal failure is swallowed here — the caller's action list either
//! grows by the actions this invocation synthesised, or is left exactly
//! as it was at entry.

use reorder_graph::{propagate, Builder, Idg};
use reorder_ir::{CallSites, LivenessOracle, NodeId, RegionIr, TypeOracle};
use reorder_model::error::{Diagnostics, PlannerError};
use reorder_registry::FunctionRegistry;

use crate::action::Action;
use crate::planner::plan_actions;

/// Total: always returns. On any internal failure the caller's `actions`
/// is left exactly as it was at entry (spec.md §7, §8 P8).
pub fn plan_reordering(
    actions: &mut Vec<Action>,
    region: &dyn RegionIr,
    types: &dyn TypeOracle,
    liveness: &dyn LivenessOracle,
    registry: &FunctionRegistry,
    call_sites: &CallSites,
    diagnostics: &mut dyn Diagnostics,
) {
    let Some(decider) = call_sites.reordering_decider else {
        return;
    };

    let snapshot = actions.clone();
    if let Err(err) = try_plan(actions, region, types, liveness, registry, call_sites, decider, diagnostics) {
        tracing::warn!(target: "reorder.plan", error = %err, "Sparse Accelerator skips reordering the loop.");
        *actions = snapshot;
    }
}

fn try_plan(
    actions: &mut Vec<Action>,
    region: &dyn RegionIr,
    types: &dyn TypeOracle,
    liveness: &dyn LivenessOracle,
    registry: &FunctionRegistry,
    call_sites: &CallSites,
    decider: NodeId,
    diagnostics: &mut dyn Diagnostics,
) -> Result<(), PlannerError> {
    let seed = call_sites.seed().ok_or(PlannerError::UnhandledExpr)?.clone();
    let fknob = call_sites
        .fknob_for(decider)
        .ok_or(PlannerError::UnhandledExpr)?
        .clone();

    let mut idg = Idg::new();
    let (seed_row, seed_col) = idg.seed(&seed);

    let decider_location = Builder::new(&mut idg, registry, types).build_locating_decider(region, decider)?;
    // The builder records the decider's location exactly once, on the
    // pass that just ran; a caller-supplied `decider` that the traversal
    // never actually reaches is a call-site/region mismatch, not any of
    // the five disposition-table error kinds, but it aborts the same way.
    let (decider_bb, decider_stmt_idx) = decider_location.ok_or(PlannerError::UnhandledExpr)?;

    propagate(&mut idg, seed_row, seed_col, diagnostics);

    let new_actions = plan_actions(
        &idg,
        types,
        liveness,
        region,
        call_sites,
        &fknob,
        decider_bb,
        decider_stmt_idx,
    );
    actions.extend(new_actions);
    Ok(())
}
