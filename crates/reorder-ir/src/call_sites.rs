//! The call-site table (spec.md §6): which call, if any, is the
//! reordering decider, the FAR list it carries, and the function-knob
//! symbol tied to the decider's call site.

use std::collections::BTreeMap;

use reorder_model::Symbol;

use crate::expr::NodeId;

/// Host-supplied facts about the decider call, resolved by whatever pass
/// recognises the decider pattern before the planner runs.
#[derive(Debug, Clone, Default)]
pub struct CallSites {
    /// The decider call node, if the loop has one. Absent means
    /// `plan_reordering` returns the input actions unchanged (spec.md §4.5
    /// step 1).
    pub reordering_decider: Option<NodeId>,
    /// "First-Accessed-and-Reordered": symbols defined or used by the
    /// decider statement. `reordering_far[0]` is the seed.
    pub reordering_far: Vec<Symbol>,
    /// Function-knob symbol for each call expression that has one.
    pub expr2fknob: BTreeMap<NodeId, Symbol>,
}

impl CallSites {
    /// The seed symbol, `FAR[0]` (spec.md §4.5 step 2, glossary "Seed").
    pub fn seed(&self) -> Option<&Symbol> {
        self.reordering_far.first()
    }

    pub fn fknob_for(&self, call: NodeId) -> Option<&Symbol> {
        self.expr2fknob.get(&call)
    }
}
