//! Names the planner synthesises into the output IR (spec.md §6). The
//! planner only ever references these by name — it has no knowledge of
//! what the downstream emitter does with them.

pub const SET_REORDERING_DECISION_MAKER: &str = "set_reordering_decision_maker";
pub const REORDERING: &str = "reordering";
pub const REVERSE_REORDERING: &str = "reverse_reordering";
/// Sentinel separating the matrix section from the vector section inside
/// a `reordering`/`reverse_reordering` call's argument list.
pub const DELIMITOR: &str = "__delimitor__";

pub const NO_PERM: &str = "NO_PERM";
pub const ROW_PERM: &str = "ROW_PERM";
pub const ROW_INV_PERM: &str = "ROW_INV_PERM";
pub const COL_PERM: &str = "COL_PERM";
pub const COL_INV_PERM: &str = "COL_INV_PERM";

/// The pseudo-function name the registry treats specially: assignment
/// imposes `ROW_ROW` (and `COL_COL` when both sides are matrices) between
/// its two array arguments (spec.md §4.1).
pub const ASSIGN_FN_NAME: &str = ":=";
