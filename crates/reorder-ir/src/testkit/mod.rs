//! In-memory reference implementations of [`RegionIr`], [`LivenessOracle`]
//! and [`TypeOracle`], plus small builders for [`ExprNode`] trees.
//!
//! Gated behind the `testkit` feature so it never ships in a non-test
//! build of a dependent crate, following the teacher's own convention of
//! a shared `tests/common/mod.rs` fixture module (`core-actions` in the
//! reference corpus) — the one difference being that here the fixtures
//! are reused *across* crates, so they live behind a feature flag instead
//! of inside one crate's `tests/` directory.

use std::collections::{BTreeMap, BTreeSet};

use reorder_model::Symbol;

use crate::expr::{BasicBlockId, ExprKind, ExprNode, LambdaDescriptor, NodeId, Statement};
use crate::oracles::{ArrayType, LivenessOracle, RegionIr, TypeOracle};

/// Monotonic `NodeId` allocator for building expression trees in tests.
#[derive(Debug, Default)]
pub struct IdGen(u32);

impl IdGen {
    pub fn next(&mut self) -> NodeId {
        let id = NodeId(self.0);
        self.0 += 1;
        id
    }
}

pub fn sym(ids: &mut IdGen, name: &str) -> ExprNode {
    ExprNode {
        id: ids.next(),
        kind: ExprKind::Symbol(Symbol::new(name)),
    }
}

pub fn num(ids: &mut IdGen, value: f64) -> ExprNode {
    ExprNode {
        id: ids.next(),
        kind: ExprKind::Number(value),
    }
}

pub fn new_var(ids: &mut IdGen, name: &str) -> ExprNode {
    ExprNode {
        id: ids.next(),
        kind: ExprKind::NewVar(Symbol::new(name)),
    }
}

pub fn line(ids: &mut IdGen, n: u32) -> ExprNode {
    ExprNode {
        id: ids.next(),
        kind: ExprKind::Line(n),
    }
}

pub fn tuple(ids: &mut IdGen, elems: Vec<ExprNode>) -> ExprNode {
    ExprNode {
        id: ids.next(),
        kind: ExprKind::Tuple(elems),
    }
}

pub fn lambda(ids: &mut IdGen, descriptor: &str) -> ExprNode {
    ExprNode {
        id: ids.next(),
        kind: ExprKind::Lambda(LambdaDescriptor(descriptor.to_string())),
    }
}

/// Build a `Call` node. `args` excludes the function-knob sentinel; pass
/// `fknob = Some(name)` to append one and mark `has_fknob`.
pub fn call(ids: &mut IdGen, callee: &str, mut args: Vec<ExprNode>, fknob: Option<&str>) -> ExprNode {
    let has_fknob = fknob.is_some();
    if let Some(name) = fknob {
        args.push(sym(ids, name));
    }
    ExprNode {
        id: ids.next(),
        kind: ExprKind::Call {
            callee: Box::new(sym(ids, callee)),
            args,
            has_fknob,
        },
    }
}

pub fn assign(ids: &mut IdGen, lhs: ExprNode, rhs: ExprNode) -> ExprNode {
    ExprNode {
        id: ids.next(),
        kind: ExprKind::Assign {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
    }
}

pub fn stmt(expr: ExprNode) -> Statement {
    Statement { expr }
}

/// A loop region held entirely in memory: one block per `Vec<Statement>`,
/// block `0` is always the loop head.
#[derive(Debug, Default)]
pub struct InMemoryRegion {
    pub blocks: Vec<Vec<Statement>>,
    pub members: Vec<BasicBlockId>,
    pub exits: Vec<(BasicBlockId, BasicBlockId)>,
}

impl InMemoryRegion {
    /// A single-block loop body, which is the shape every worked example
    /// in spec.md §8 uses.
    pub fn single_block(statements: Vec<Statement>, exit_to: BasicBlockId) -> Self {
        let head = BasicBlockId(0);
        Self {
            blocks: vec![statements],
            members: vec![head],
            exits: vec![(head, exit_to)],
        }
    }
}

impl RegionIr for InMemoryRegion {
    fn loop_head(&self) -> BasicBlockId {
        self.members[0]
    }

    fn loop_members(&self) -> &[BasicBlockId] {
        &self.members
    }

    fn exits(&self) -> &[(BasicBlockId, BasicBlockId)] {
        &self.exits
    }

    fn statements(&self, bb: BasicBlockId) -> &[Statement] {
        &self.blocks[bb.0 as usize]
    }
}

/// Liveness facts supplied directly rather than computed, keyed by block
/// and, for per-statement facts, by `(block, stmt_idx)`.
#[derive(Debug, Default)]
pub struct InMemoryLiveness {
    pub def: BTreeMap<(BasicBlockId, usize), BTreeSet<Symbol>>,
    pub use_: BTreeMap<(BasicBlockId, usize), BTreeSet<Symbol>>,
    pub live_in: BTreeMap<BasicBlockId, BTreeSet<Symbol>>,
    pub live_out: BTreeMap<BasicBlockId, BTreeSet<Symbol>>,
    pub live_out_stmt: BTreeMap<(BasicBlockId, usize), BTreeSet<Symbol>>,
}

impl InMemoryLiveness {
    pub fn set_live_out(&mut self, bb: BasicBlockId, symbols: &[&str]) {
        self.live_out
            .insert(bb, symbols.iter().map(|s| Symbol::new(*s)).collect());
    }

    pub fn set_live_in(&mut self, bb: BasicBlockId, symbols: &[&str]) {
        self.live_in
            .insert(bb, symbols.iter().map(|s| Symbol::new(*s)).collect());
    }

    pub fn set_live_out_stmt(&mut self, bb: BasicBlockId, stmt_idx: usize, symbols: &[&str]) {
        self.live_out_stmt
            .insert((bb, stmt_idx), symbols.iter().map(|s| Symbol::new(*s)).collect());
    }
}

static EMPTY: std::sync::OnceLock<BTreeSet<Symbol>> = std::sync::OnceLock::new();

fn empty_set() -> &'static BTreeSet<Symbol> {
    EMPTY.get_or_init(BTreeSet::new)
}

impl LivenessOracle for InMemoryLiveness {
    fn def(&self, bb: BasicBlockId, stmt_idx: usize) -> &BTreeSet<Symbol> {
        self.def.get(&(bb, stmt_idx)).unwrap_or_else(|| empty_set())
    }

    fn use_(&self, bb: BasicBlockId, stmt_idx: usize) -> &BTreeSet<Symbol> {
        self.use_
            .get(&(bb, stmt_idx))
            .unwrap_or_else(|| empty_set())
    }

    fn live_in(&self, bb: BasicBlockId) -> &BTreeSet<Symbol> {
        self.live_in.get(&bb).unwrap_or_else(|| empty_set())
    }

    fn live_out(&self, bb: BasicBlockId) -> &BTreeSet<Symbol> {
        self.live_out.get(&bb).unwrap_or_else(|| empty_set())
    }

    fn live_out_stmt(&self, bb: BasicBlockId, stmt_idx: usize) -> &BTreeSet<Symbol> {
        self.live_out_stmt
            .get(&(bb, stmt_idx))
            .unwrap_or_else(|| empty_set())
    }
}

/// Symbol -> `ArrayType` map, plus a `NodeId` override map for nodes that
/// aren't bare symbol references (chiefly nested `Call`s, whose result
/// type a real host would already know from its own type-inference pass).
#[derive(Debug, Default)]
pub struct InMemoryTypes {
    pub types: BTreeMap<Symbol, ArrayType>,
    pub node_types: BTreeMap<NodeId, ArrayType>,
}

impl InMemoryTypes {
    pub fn with(mut self, name: &str, ty: ArrayType) -> Self {
        self.types.insert(Symbol::new(name), ty);
        self
    }

    /// Record the result type of a non-symbol node (typically a `Call`),
    /// keyed by the `NodeId` the builder assigned it.
    pub fn with_node(mut self, id: NodeId, ty: ArrayType) -> Self {
        self.node_types.insert(id, ty);
        self
    }
}

impl TypeOracle for InMemoryTypes {
    fn type_of(&self, node: &ExprNode) -> ArrayType {
        match &node.kind {
            ExprKind::Symbol(s) => self.types.get(s).copied().unwrap_or(ArrayType::Other),
            ExprKind::Number(_) => ArrayType::Number,
            _ => self
                .node_types
                .get(&node.id)
                .copied()
                .unwrap_or(ArrayType::Other),
        }
    }

    fn type_of_symbol(&self, symbol: &Symbol) -> ArrayType {
        self.types.get(symbol).copied().unwrap_or(ArrayType::Other)
    }
}
