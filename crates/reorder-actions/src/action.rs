//! The editing-action representation (spec.md §4.4, §4.6): opaque,
//! host-consumed call fragments plus the four ways they can be spliced
//! into a region's control-flow graph.

use reorder_ir::BasicBlockId;
use reorder_model::{PermColor, Symbol};

/// One positional argument of an emitted call.
#[derive(Debug, Clone, PartialEq)]
pub enum EmittedArg {
    Symbol(Symbol),
    Color(PermColor),
    Bool(bool),
    Number(f64),
    /// One of `ReorderingStatus`'s four opaque pointer slots, emitted as
    /// the literal `NULL` the preamble initialises them to.
    Null,
    /// The literal `__delimitor__` sentinel separating a call's matrix
    /// section from its vector section (spec.md §6).
    Delimiter,
}

/// A single opaque call the downstream emitter materialises into the host
/// IR. The planner never builds real IR nodes for these — spec.md §6
/// lists their names as things the planner only ever *synthesises into*
/// the output.
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedCall {
    pub name: String,
    pub args: Vec<EmittedArg>,
}

impl EmittedCall {
    pub fn new(name: impl Into<String>, args: Vec<EmittedArg>) -> Self {
        Self { name: name.into(), args }
    }
}

/// A host-level IR fragment, opaque to the planner (spec.md §4.4's fourth
/// action variant). Every fragment this crate emits happens to be a call
/// (or, for the `reordering_status` initialiser, a call-shaped stand-in
/// for a tuple literal assignment) — the planner has no other kind of
/// fragment to produce.
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedStatement(pub EmittedCall);

/// One editing action (spec.md §4.4).
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Statements to splice in immediately before the loop's entry block.
    InsertBeforeLoopHead { statements: Vec<EmittedStatement> },
    /// Statements to splice immediately before or after a specific
    /// statement.
    InsertBeforeOrAfterStatement {
        before: bool,
        bb: BasicBlockId,
        stmt_idx: usize,
        statements: Vec<EmittedStatement>,
    },
    /// Statements placed on a control-flow edge; the downstream emitter
    /// may need to materialise a bridge block to host them.
    InsertOnEdge {
        from: BasicBlockId,
        to: BasicBlockId,
        statements: Vec<EmittedStatement>,
    },
    /// A host-level IR fragment with no specific insertion site of its
    /// own — opaque to the planner.
    Statement(EmittedStatement),
}
