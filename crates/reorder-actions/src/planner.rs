//! Action Planner (spec.md §4.4): given a coloured IDG and liveness
//! information, synthesises the before-loop preamble, the post-decider
//! reorder, and the per-exit inverse-reorder calls.

use std::collections::BTreeSet;

use reorder_graph::Idg;
use reorder_ir::{
    ArrayType, BasicBlockId, CallSites, LivenessOracle, RegionIr, TypeOracle, REORDERING,
    REVERSE_REORDERING, SET_REORDERING_DECISION_MAKER,
};
use reorder_model::{Axis, PermColor, Symbol};

use crate::action::{Action, EmittedArg, EmittedCall, EmittedStatement};

/// Local variable name the preamble binds the fresh `reordering_status`
/// tuple to, and that every later `reordering`/`reverse_reordering` call
/// references by name.
pub const REORDERING_STATUS_VAR: &str = "reordering_status";

fn row_color(idg: &Idg, symbol: &Symbol) -> PermColor {
    idg.color_of_symbol(symbol, Axis::Row).unwrap_or(PermColor::NoPerm)
}

fn col_color(idg: &Idg, symbol: &Symbol) -> PermColor {
    idg.color_of_symbol(symbol, Axis::Column).unwrap_or(PermColor::NoPerm)
}

/// `(a) set_reordering_decision_maker(fknob); (b) reordering_status =
/// (false, NULL, NULL, NULL, NULL, 0.0)` (spec.md §4.4).
pub fn preamble(fknob: &Symbol) -> Vec<EmittedStatement> {
    vec![
        EmittedStatement(EmittedCall::new(
            SET_REORDERING_DECISION_MAKER,
            vec![EmittedArg::Symbol(fknob.clone())],
        )),
        EmittedStatement(EmittedCall::new(
            REORDERING_STATUS_VAR,
            vec![
                EmittedArg::Bool(false),
                EmittedArg::Null,
                EmittedArg::Null,
                EmittedArg::Null,
                EmittedArg::Null,
                EmittedArg::Number(0.0),
            ],
        )),
    ]
}

/// Splits `candidates` into the matrix section (symbol, row colour,
/// column colour) and the vector section (symbol, row colour), dropping
/// any symbol whose relevant colour(s) are all `NoPerm` and iterating in
/// the symbols' natural (lexicographic) order, since `candidates` is a
/// `BTreeSet`.
fn sections(idg: &Idg, types: &dyn TypeOracle, candidates: &BTreeSet<Symbol>) -> (Vec<(Symbol, PermColor, PermColor)>, Vec<(Symbol, PermColor)>) {
    let mut matrices = Vec::new();
    let mut vectors = Vec::new();
    for symbol in candidates {
        match types.type_of_symbol(symbol) {
            ArrayType::SparseMatrix => {
                let (r, c) = (row_color(idg, symbol), col_color(idg, symbol));
                if r.is_colored() || c.is_colored() {
                    matrices.push((symbol.clone(), r, c));
                }
            }
            ArrayType::Vector => {
                let r = row_color(idg, symbol);
                if r.is_colored() {
                    vectors.push((symbol.clone(), r));
                }
            }
            ArrayType::Number | ArrayType::Other => {}
        }
    }
    (matrices, vectors)
}

fn push_sections(args: &mut Vec<EmittedArg>, matrices: Vec<(Symbol, PermColor, PermColor)>, vectors: Vec<(Symbol, PermColor)>) {
    for (symbol, row, col) in matrices {
        args.push(EmittedArg::Symbol(symbol));
        args.push(EmittedArg::Color(row));
        args.push(EmittedArg::Color(col));
    }
    args.push(EmittedArg::Delimiter);
    for (symbol, row) in vectors {
        args.push(EmittedArg::Symbol(symbol));
        args.push(EmittedArg::Color(row));
    }
}

/// `reordering(fknob, reordering_status, …matrices…, __delimitor__,
/// …vectors…)` (spec.md §4.4), restricted to `candidates` — which the
/// caller has already reduced to `live_out(decider_stmt) \ FAR`.
pub fn reordering_call(
    fknob: &Symbol,
    idg: &Idg,
    types: &dyn TypeOracle,
    candidates: &BTreeSet<Symbol>,
) -> EmittedStatement {
    let mut args = vec![
        EmittedArg::Symbol(fknob.clone()),
        EmittedArg::Symbol(Symbol::new(REORDERING_STATUS_VAR)),
    ];
    let (matrices, vectors) = sections(idg, types, candidates);
    push_sections(&mut args, matrices, vectors);
    EmittedStatement(EmittedCall::new(REORDERING, args))
}

/// `reverse_reordering(reordering_status, …matrices…, __delimitor__,
/// …vectors…)` (spec.md §4.4), restricted to `candidates` — which the
/// caller has already reduced to `live_out(from-bb) ∩ live_in(to-bb)`.
pub fn reverse_reordering_call(
    idg: &Idg,
    types: &dyn TypeOracle,
    candidates: &BTreeSet<Symbol>,
) -> EmittedStatement {
    let mut args = vec![EmittedArg::Symbol(Symbol::new(REORDERING_STATUS_VAR))];
    let (matrices, vectors) = sections(idg, types, candidates);
    push_sections(&mut args, matrices, vectors);
    EmittedStatement(EmittedCall::new(REVERSE_REORDERING, args))
}

/// Synthesises the full action list for an already-coloured IDG: the
/// preamble, the post-decider reorder, and one `InsertOnEdge` per loop
/// exit (spec.md §4.4, §4.5 step 7).
pub fn plan_actions(
    idg: &Idg,
    types: &dyn TypeOracle,
    liveness: &dyn LivenessOracle,
    region: &dyn RegionIr,
    call_sites: &CallSites,
    fknob: &Symbol,
    decider_bb: BasicBlockId,
    decider_stmt_idx: usize,
) -> Vec<Action> {
    let mut actions = Vec::new();

    actions.push(Action::InsertBeforeLoopHead {
        statements: preamble(fknob),
    });

    let far: BTreeSet<Symbol> = call_sites.reordering_far.iter().cloned().collect();
    let live_out_decider = liveness.live_out_stmt(decider_bb, decider_stmt_idx);
    let candidates: BTreeSet<Symbol> = live_out_decider.difference(&far).cloned().collect();
    actions.push(Action::InsertBeforeOrAfterStatement {
        before: false,
        bb: decider_bb,
        stmt_idx: decider_stmt_idx,
        statements: vec![reordering_call(fknob, idg, types, &candidates)],
    });

    for &(from, to) in region.exits() {
        let candidates: BTreeSet<Symbol> = liveness
            .live_out(from)
            .intersection(liveness.live_in(to))
            .cloned()
            .collect();
        actions.push(Action::InsertOnEdge {
            from,
            to,
            statements: vec![reverse_reordering_call(idg, types, &candidates)],
        });
    }

    actions
}
