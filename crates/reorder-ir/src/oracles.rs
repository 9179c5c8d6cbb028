//! Traits for the host-side collaborators the planner consumes but never
//! implements: the IR accessors, the liveness oracle, and the type oracle
//! (spec.md §6).

use std::collections::BTreeSet;

pub use reorder_model::ArrayType;
use reorder_model::Symbol;

use crate::expr::{BasicBlockId, ExprNode, Statement};

/// Read-only view of one loop region's control-flow graph and statement
/// lists.
pub trait RegionIr {
    fn loop_head(&self) -> BasicBlockId;
    fn loop_members(&self) -> &[BasicBlockId];
    /// `(from, to)` pairs for every edge leaving the loop.
    fn exits(&self) -> &[(BasicBlockId, BasicBlockId)];
    fn statements(&self, bb: BasicBlockId) -> &[Statement];
}

/// Liveness facts, computed elsewhere and handed to the planner.
///
/// Results are `BTreeSet`s rather than `HashSet`s: the spec requires a
/// fixed total order (lexicographic on the symbol) wherever a symbol set
/// is turned into emitted call arguments, and a `BTreeSet` gives that for
/// free at every read site instead of requiring a sort step at each one.
pub trait LivenessOracle {
    fn def(&self, bb: BasicBlockId, stmt_idx: usize) -> &BTreeSet<Symbol>;
    fn use_(&self, bb: BasicBlockId, stmt_idx: usize) -> &BTreeSet<Symbol>;
    fn live_in(&self, bb: BasicBlockId) -> &BTreeSet<Symbol>;
    fn live_out(&self, bb: BasicBlockId) -> &BTreeSet<Symbol>;
    fn live_out_stmt(&self, bb: BasicBlockId, stmt_idx: usize) -> &BTreeSet<Symbol>;
}

/// Type facts about expression nodes, computed elsewhere (e.g. by a prior
/// type-inference pass). `type_of` answers for *any* node, not just a bare
/// symbol reference — including a nested `Call`, whose result type the
/// planner has no way to derive on its own, since it does not perform type
/// inference itself.
pub trait TypeOracle {
    fn type_of(&self, node: &ExprNode) -> ArrayType;

    fn type_of_symbol(&self, symbol: &Symbol) -> ArrayType {
        let _ = symbol;
        ArrayType::Other
    }

    /// `(all_numbers, some_arrays)` for a call's result type and its
    /// argument types (spec.md §6). The default implementation is the
    /// pure derivation the spec describes; hosts only need to override it
    /// if their type lattice has cases this derivation can't see.
    fn numbers_or_arrays(&self, result: ArrayType, args: &[ArrayType]) -> (bool, bool) {
        let all_numbers =
            result == ArrayType::Number && args.iter().all(|t| *t == ArrayType::Number);
        let some_arrays = result.is_array() || args.iter().any(|t| t.is_array());
        (all_numbers, some_arrays)
    }
}
