//! Translates a loop region's statements into IDG edges (spec.md §4.2):
//! for each call, recurse into its arguments first, skip calls with no
//! array involvement, resolve the rest against the registry, and add one
//! edge per distributivity entry the registry returns.
//!
//! The host IR this builder consumes is in the flat, three-address form a
//! compiler's earlier passes already produce: every call argument is
//! itself a `Symbol`, a `Number`, or another `Call` (never, say, a raw
//! binary-operator tree) — which is exactly what lets "recurse into
//! arguments first" (spec.md §4.2) mean something precise. When a call is
//! the direct right-hand side of an assignment, distributivity-edge index
//! `0` (the call's own result) binds directly to the assignment's
//! left-hand side — the call's result *is* that symbol, so no separate
//! vertex or `:=` edge is needed to relate them. A call that is *not*
//! assigned to anything named (a nested call used as another call's
//! argument, or a bare-call statement) still needs an identity to serve as
//! index `0`; it gets one from its own `NodeId` instead.

use reorder_ir::{ArrayType, ExprKind, ExprNode, NodeId, RegionIr, Statement, TypeOracle, ASSIGN_FN_NAME};
use reorder_model::error::PlannerError;
use reorder_model::{Axis, RelationTag, Symbol};
use reorder_registry::{FunctionRegistry, LookupResult};

use crate::idg::Idg;

fn call_identity(id: NodeId) -> Symbol {
    Symbol::new(format!("$call{}", id.0))
}

/// The symbol an edge endpoint should bind to: a named symbol directly, or
/// a call's synthetic identity. A number, tuple, or other trivia node has
/// no array identity to bind and yields `None`.
fn node_identity(node: &ExprNode) -> Option<Symbol> {
    match &node.kind {
        ExprKind::Symbol(s) => Some(s.clone()),
        ExprKind::Call { .. } => Some(call_identity(node.id)),
        _ => None,
    }
}

fn add_relation_edge(idg: &mut Idg, lhs: &Symbol, rhs: &Symbol, relation: RelationTag) {
    let (a, b, inverse) = match relation {
        RelationTag::RowRow => (idg.get_or_create(lhs, Axis::Row), idg.get_or_create(rhs, Axis::Row), false),
        RelationTag::ColCol => (
            idg.get_or_create(lhs, Axis::Column),
            idg.get_or_create(rhs, Axis::Column),
            false,
        ),
        RelationTag::ColRowInverse => (
            idg.get_or_create(lhs, Axis::Column),
            idg.get_or_create(rhs, Axis::Row),
            true,
        ),
    };
    idg.add_edge(a, b, inverse);
}

/// Visits one loop region's statements, adding IDG edges as it goes.
/// Created fresh per `plan_reordering` invocation; holds no state beyond
/// borrows of its collaborators.
pub struct Builder<'a> {
    idg: &'a mut Idg,
    registry: &'a FunctionRegistry,
    types: &'a dyn TypeOracle,
    decider: Option<NodeId>,
    decider_location: Option<(reorder_ir::BasicBlockId, usize)>,
    cursor: (reorder_ir::BasicBlockId, usize),
}

impl<'a> Builder<'a> {
    pub fn new(idg: &'a mut Idg, registry: &'a FunctionRegistry, types: &'a dyn TypeOracle) -> Self {
        Self {
            idg,
            registry,
            types,
            decider: None,
            decider_location: None,
            cursor: (reorder_ir::BasicBlockId(0), 0),
        }
    }

    /// Visit every statement in every member block of `region`, in block
    /// order. Stops at the first statement that raises a `PlannerError`
    /// (spec.md §4.5 step 8: the orchestrator aborts the whole invocation,
    /// it does not skip the offending statement and continue).
    pub fn build(&mut self, region: &dyn RegionIr) -> Result<(), PlannerError> {
        for &bb in region.loop_members() {
            for stmt in region.statements(bb) {
                self.visit_statement(stmt)?;
            }
        }
        Ok(())
    }

    /// As `build`, but also records the `(basic-block, statement-index)`
    /// of the statement containing `decider` the first (and, per spec.md
    /// §4.2 step 2, only) time it is reached (spec.md §4.5 step 5/7).
    pub fn build_locating_decider(
        &mut self,
        region: &dyn RegionIr,
        decider: NodeId,
    ) -> Result<Option<(reorder_ir::BasicBlockId, usize)>, PlannerError> {
        self.decider = Some(decider);
        for &bb in region.loop_members() {
            for (idx, stmt) in region.statements(bb).iter().enumerate() {
                self.cursor = (bb, idx);
                self.visit_statement(stmt)?;
            }
        }
        Ok(self.decider_location)
    }

    fn visit_statement(&mut self, stmt: &Statement) -> Result<(), PlannerError> {
        self.visit_expr(&stmt.expr)
    }

    fn visit_expr(&mut self, node: &ExprNode) -> Result<(), PlannerError> {
        match &node.kind {
            ExprKind::Tuple(elems) => {
                for e in elems {
                    self.visit_expr(e)?;
                }
                Ok(())
            }
            ExprKind::Call { .. } => self.visit_call(node, None),
            ExprKind::Assign { lhs, rhs } => self.visit_assign(lhs, rhs),
            ExprKind::Return(Some(inner)) => self.visit_expr(inner),
            ExprKind::Return(None) => Ok(()),
            ExprKind::GotoIfNot { cond, .. } => self.visit_expr(cond),
            ExprKind::Line(_)
            | ExprKind::Label(_)
            | ExprKind::Goto(_)
            | ExprKind::Number(_)
            | ExprKind::Str(_)
            | ExprKind::Symbol(_)
            | ExprKind::Lambda(_)
            | ExprKind::NewVar(_) => Ok(()),
        }
    }

    /// `result_override` is `Some(lhs)` when this call is the direct
    /// right-hand side of `lhs = <call>`: distributivity-edge index `0`
    /// then binds to `lhs` itself rather than to a synthetic identity, so
    /// the result-row/column constraint lands on the real symbol instead
    /// of relaying through a second `:=` edge (see the module doc comment).
    fn visit_call(&mut self, node: &ExprNode, result_override: Option<&Symbol>) -> Result<(), PlannerError> {
        let callee = match &node.kind {
            ExprKind::Call { callee, .. } => callee.as_ref(),
            _ => return Err(PlannerError::UnhandledExpr),
        };
        let args = node.call_args().ok_or(PlannerError::UnhandledExpr)?;

        // Recurse into arguments first, so nested calls contribute before
        // the enclosing one.
        for a in args {
            self.visit_expr(a)?;
        }

        if self.decider == Some(node.id) {
            debug_assert!(
                self.decider_location.is_none(),
                "reordering decider recorded more than once"
            );
            self.decider_location = Some(self.cursor);
        }

        let arg_types: Vec<ArrayType> = args.iter().map(|a| self.types.type_of(a)).collect();
        let result_type = self.types.type_of(node);
        let (all_numbers, some_arrays) = self.types.numbers_or_arrays(result_type, &arg_types);
        if all_numbers || !some_arrays {
            return Ok(());
        }

        let name = callee.as_symbol().ok_or(PlannerError::UnresolvedFunction)?.as_str();

        match self.registry.lookup(None, name, &arg_types) {
            LookupResult::Undescribed => Err(PlannerError::UndescribedFunction {
                module: String::new(),
                name: name.to_string(),
            }),
            LookupResult::NonDistributive => Err(PlannerError::NonDistributiveFunction {
                module: String::new(),
                name: name.to_string(),
            }),
            LookupResult::Resolved(record) => {
                let mut resolved = Vec::with_capacity(args.len() + 1);
                resolved.push(result_override.cloned().or_else(|| Some(call_identity(node.id))));
                resolved.extend(args.iter().map(node_identity));
                let edges = record.edges.clone();
                apply_edges(self.idg, &resolved, &edges)
            }
        }
    }

    fn visit_assign(&mut self, lhs: &ExprNode, rhs: &ExprNode) -> Result<(), PlannerError> {
        self.visit_expr(lhs)?;

        if let (ExprKind::Tuple(ls), ExprKind::Tuple(rs)) = (&lhs.kind, &rhs.kind) {
            if ls.len() == rs.len() {
                for (l, r) in ls.iter().zip(rs.iter()) {
                    self.link_assign_pair(l, r)?;
                }
            }
            return Ok(());
        }
        self.link_assign_pair(lhs, rhs)
    }

    /// Links one `lhs = rhs` pair (or one element of a tuple-destructuring
    /// assignment). When `rhs` is itself a call, its result binds directly
    /// to `lhs`'s identity (see `visit_call`'s `result_override`) instead of
    /// going through the separate `:=` (spec.md §4.1) pseudo-call below,
    /// which exists for the case where `rhs` is not a call at all (e.g.
    /// `z = r`) and there is no call result to bind in the first place.
    fn link_assign_pair(&mut self, lhs: &ExprNode, rhs: &ExprNode) -> Result<(), PlannerError> {
        if matches!(rhs.kind, ExprKind::Call { .. }) {
            return self.visit_call(rhs, node_identity(lhs).as_ref());
        }
        self.visit_expr(rhs)?;

        let lhs_ty = self.types.type_of(lhs);
        let rhs_ty = self.types.type_of(rhs);
        let (all_numbers, some_arrays) = self.types.numbers_or_arrays(lhs_ty, &[rhs_ty]);
        if all_numbers || !some_arrays {
            return Ok(());
        }

        match self.registry.lookup(None, ASSIGN_FN_NAME, &[lhs_ty, rhs_ty]) {
            LookupResult::Undescribed => Err(PlannerError::UndescribedFunction {
                module: String::new(),
                name: ASSIGN_FN_NAME.to_string(),
            }),
            LookupResult::NonDistributive => Err(PlannerError::NonDistributiveFunction {
                module: String::new(),
                name: ASSIGN_FN_NAME.to_string(),
            }),
            LookupResult::Resolved(record) => {
                let resolved = vec![None, node_identity(lhs), node_identity(rhs)];
                let edges = record.edges.clone();
                apply_edges(self.idg, &resolved, &edges)
            }
        }
    }
}

fn apply_edges(
    idg: &mut Idg,
    resolved: &[Option<Symbol>],
    edges: &[reorder_model::DistributivityEdge],
) -> Result<(), PlannerError> {
    for edge in edges {
        let lhs = resolved
            .get(edge.lhs.0)
            .and_then(|o| o.as_ref())
            .ok_or(PlannerError::UnknownAstDistributivity)?;
        let rhs = resolved
            .get(edge.rhs.0)
            .and_then(|o| o.as_ref())
            .ok_or(PlannerError::UnknownAstDistributivity)?;
        add_relation_edge(idg, lhs, rhs, edge.relation);
    }
    Ok(())
}
