//! Shared data model for the sparse-reordering planner: permutation
//! colours, relation tags, and the small value types the rest of the
//! workspace is built on. See `SPEC_FULL.md` §3 for the normative
//! description this module implements.

pub mod error;

use std::collections::BTreeMap;
use std::fmt;

/// An array symbol (matrix or vector name) as it appears in the host IR.
///
/// Wrapped rather than used as a bare `String` so call sites can't
/// accidentally compare a symbol against an unrelated identifier string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Which axis of an array a permutation vertex belongs to.
///
/// Vectors only ever have a `Row` vertex; `Column` is reserved for matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axis {
    Row,
    Column,
}

/// One of the five permutation-vector colours an IDG vertex can carry.
///
/// `NoPerm` never appears on the active propagation frontier: it is the
/// "not yet coloured" state, not a colour any call imposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermColor {
    NoPerm,
    RowPerm,
    RowInvPerm,
    ColPerm,
    ColInvPerm,
}

impl PermColor {
    /// The involution {RowPerm<->RowInvPerm, ColPerm<->ColInvPerm}.
    /// `NoPerm` has no inverse.
    pub fn inverse(self) -> Option<PermColor> {
        match self {
            PermColor::RowPerm => Some(PermColor::RowInvPerm),
            PermColor::RowInvPerm => Some(PermColor::RowPerm),
            PermColor::ColPerm => Some(PermColor::ColInvPerm),
            PermColor::ColInvPerm => Some(PermColor::ColPerm),
            PermColor::NoPerm => None,
        }
    }

    pub fn is_colored(self) -> bool {
        !matches!(self, PermColor::NoPerm)
    }
}

impl fmt::Display for PermColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PermColor::NoPerm => "NO_PERM",
            PermColor::RowPerm => "ROW_PERM",
            PermColor::RowInvPerm => "ROW_INV_PERM",
            PermColor::ColPerm => "COL_PERM",
            PermColor::ColInvPerm => "COL_INV_PERM",
        };
        f.write_str(s)
    }
}

/// The relation a call imposes between two array arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationTag {
    RowRow,
    ColCol,
    ColRowInverse,
}

/// An index into a call's argument list. `0` is the call's own result;
/// positive indices are 1-based argument positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArgIndex(pub usize);

impl ArgIndex {
    pub const RESULT: ArgIndex = ArgIndex(0);

    pub fn is_result(self) -> bool {
        self.0 == 0
    }
}

/// One constraint edge a distributivity record contributes: the relation
/// between the arrays found at `lhs` and `rhs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributivityEdge {
    pub lhs: ArgIndex,
    pub rhs: ArgIndex,
    pub relation: RelationTag,
}

/// A function descriptor: whether the call is distributive at all, and
/// which argument pairs it constrains when it is.
#[derive(Debug, Clone, Default)]
pub struct DistributivityRecord {
    pub distributive: bool,
    pub edges: Vec<DistributivityEdge>,
}

impl DistributivityRecord {
    pub fn distributive(edges: Vec<DistributivityEdge>) -> Self {
        Self {
            distributive: true,
            edges,
        }
    }

    pub fn non_distributive() -> Self {
        Self {
            distributive: false,
            edges: Vec::new(),
        }
    }
}

/// One of the four opaque runtime pointer slots inside `ReorderingStatus`.
/// `Null` before the decider has run; the emitter never inspects `Bound`
/// beyond carrying the symbol it was bound from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpaqueSlot {
    Null,
    Bound(Symbol),
}

impl Default for OpaqueSlot {
    fn default() -> Self {
        OpaqueSlot::Null
    }
}

/// The runtime-side `(done?, p1, p2, p3, p4, time)` tuple threaded through
/// the inserted `reordering`/`reverse_reordering` calls. The planner only
/// ever emits its initial value; it never inspects or mutates one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReorderingStatus {
    pub done: bool,
    pub p1: OpaqueSlot,
    pub p2: OpaqueSlot,
    pub p3: OpaqueSlot,
    pub p4: OpaqueSlot,
    pub time: f64,
}

/// Ordered map used wherever the spec requires a "fixed total order, e.g.
/// lexicographic on the symbol" for reproducible argument emission.
pub type SymbolMap<V> = BTreeMap<Symbol, V>;

/// The element types the type oracle can report for an expression node or
/// an array symbol. Lives here (rather than in `reorder-ir`, which only
/// re-exports it) because the registry's lookup key also needs it and
/// `reorder-registry` should not have to depend on `reorder-ir`'s AST/IR
/// traits just to see this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayType {
    Number,
    SparseMatrix,
    Vector,
    Other,
}

impl ArrayType {
    pub fn is_array(self) -> bool {
        matches!(self, ArrayType::SparseMatrix | ArrayType::Vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_is_an_involution_on_the_four_colored_states() {
        for c in [
            PermColor::RowPerm,
            PermColor::RowInvPerm,
            PermColor::ColPerm,
            PermColor::ColInvPerm,
        ] {
            let inv = c.inverse().unwrap();
            assert_eq!(inv.inverse().unwrap(), c);
            assert_ne!(inv, c);
        }
    }

    #[test]
    fn no_perm_has_no_inverse() {
        assert_eq!(PermColor::NoPerm.inverse(), None);
    }

    #[test]
    fn symbols_sort_lexicographically() {
        let mut symbols: Vec<Symbol> = vec!["p".into(), "A".into(), "Ap".into(), "L".into()];
        symbols.sort();
        let names: Vec<&str> = symbols.iter().map(Symbol::as_str).collect();
        assert_eq!(names, vec!["A", "Ap", "L", "p"]);
    }
}
