//! Function Descriptor Registry (spec.md §4.1): maps `(module, name,
//! arg-type tuple)` to a [`DistributivityRecord`]. Arg-type matching is
//! exact on the supplied tuple — the registry never infers covariance.

use std::collections::HashMap;

use reorder_model::{ArgIndex, ArrayType, DistributivityEdge, DistributivityRecord, RelationTag};

/// Outcome of a registry lookup, mirroring spec.md §4.1's four-way
/// contract (`UNRESOLVED` is the builder's concern, raised before a
/// lookup is even attempted — see `reorder-graph`'s `resolve_callee`).
pub enum LookupResult<'a> {
    Resolved(&'a DistributivityRecord),
    Undescribed,
    NonDistributive,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Key {
    module: Option<String>,
    name: String,
    arg_types: Vec<ArrayType>,
}

/// The function descriptor table. Immutable after construction except
/// through `register`, which a host calls once at startup to extend the
/// built-in table — the registry itself never mutates during a planner
/// invocation.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    table: HashMap<Key, DistributivityRecord>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The bundled table, seeded with the pseudo-function `:=` plus the
    /// handful of functions spec.md's worked examples name directly
    /// (`dot`, `*`, `fwdTriSolve!`, `bwdTriSolve!`, `+`, `-`). A host
    /// embedding the planner for a real numerical library is expected to
    /// `register` its own full function set on top of this.
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.register_builtins();
        reg
    }

    pub fn register(
        &mut self,
        module: Option<&str>,
        name: &str,
        arg_types: Vec<ArrayType>,
        record: DistributivityRecord,
    ) {
        self.table.insert(
            Key {
                module: module.map(str::to_string),
                name: name.to_string(),
                arg_types,
            },
            record,
        );
    }

    /// `lookup(module, name, arg-types)` from spec.md §4.1.
    pub fn lookup(&self, module: Option<&str>, name: &str, arg_types: &[ArrayType]) -> LookupResult<'_> {
        let key = Key {
            module: module.map(str::to_string),
            name: name.to_string(),
            arg_types: arg_types.to_vec(),
        };
        match self.table.get(&key) {
            None => LookupResult::Undescribed,
            Some(record) if !record.distributive => LookupResult::NonDistributive,
            Some(record) => LookupResult::Resolved(record),
        }
    }

    fn register_builtins(&mut self) {
        use ArrayType::{SparseMatrix, Vector};
        use RelationTag::{ColCol, ColRowInverse, RowRow};

        let edge = |lhs: usize, rhs: usize, relation: RelationTag| DistributivityEdge {
            lhs: ArgIndex(lhs),
            rhs: ArgIndex(rhs),
            relation,
        };

        // `:=`: spec.md §4.1's special descriptor. Keyed on the two sides
        // of the assignment directly (there is no separate "result" for
        // a plain assignment — the left-hand side *is* the result).
        self.register(
            None,
            reorder_ir::ASSIGN_FN_NAME,
            vec![SparseMatrix, SparseMatrix],
            DistributivityRecord::distributive(vec![edge(1, 2, RowRow), edge(1, 2, ColCol)]),
        );
        self.register(
            None,
            reorder_ir::ASSIGN_FN_NAME,
            vec![Vector, Vector],
            DistributivityRecord::distributive(vec![edge(1, 2, RowRow)]),
        );

        // Matrix-vector product `y = A*x`: the result inherits A's row
        // permutation, and A's columns must be indexed consistently with
        // however x ends up permuted.
        self.register(
            None,
            "*",
            vec![SparseMatrix, Vector],
            DistributivityRecord::distributive(vec![
                edge(0, 1, RowRow),
                edge(1, 2, ColRowInverse),
            ]),
        );
        // Scalar-vector product `y = c*x`: a pure forward of x's row perm.
        self.register(
            None,
            "*",
            vec![ArrayType::Number, Vector],
            DistributivityRecord::distributive(vec![edge(0, 2, RowRow)]),
        );

        // Elementwise vector +/-: result and both operands share one row
        // permutation.
        for op in ["+", "-"] {
            self.register(
                None,
                op,
                vec![Vector, Vector],
                DistributivityRecord::distributive(vec![edge(0, 1, RowRow), edge(1, 2, RowRow)]),
            );
        }

        // Inner product: well-defined only if both vectors share a row
        // permutation.
        self.register(
            None,
            "dot",
            vec![Vector, Vector],
            DistributivityRecord::distributive(vec![edge(1, 2, RowRow)]),
        );

        // In-place triangular solves: the solution overwrites the
        // right-hand side, so the matrix and the vector share one row
        // permutation.
        for name in ["fwdTriSolve!", "bwdTriSolve!"] {
            self.register(
                None,
                name,
                vec![SparseMatrix, Vector],
                DistributivityRecord::distributive(vec![edge(1, 2, RowRow)]),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reorder_model::ArrayType::{Number, SparseMatrix, Vector};

    #[test]
    fn unknown_function_is_undescribed() {
        let reg = FunctionRegistry::with_builtins();
        assert!(matches!(
            reg.lookup(None, "frobnicate", &[Vector, Vector]),
            LookupResult::Undescribed
        ));
    }

    #[test]
    fn non_distributive_entry_is_reported() {
        let mut reg = FunctionRegistry::with_builtins();
        reg.register(None, "weird", vec![Vector], DistributivityRecord::non_distributive());
        assert!(matches!(
            reg.lookup(None, "weird", &[Vector]),
            LookupResult::NonDistributive
        ));
    }

    #[test]
    fn assign_key_is_exact_on_types() {
        let reg = FunctionRegistry::with_builtins();
        assert!(matches!(
            reg.lookup(None, reorder_ir::ASSIGN_FN_NAME, &[Vector, Vector]),
            LookupResult::Resolved(_)
        ));
        assert!(matches!(
            reg.lookup(None, reorder_ir::ASSIGN_FN_NAME, &[SparseMatrix, Vector]),
            LookupResult::Undescribed
        ));
        assert!(matches!(
            reg.lookup(None, reorder_ir::ASSIGN_FN_NAME, &[Number, Number]),
            LookupResult::Undescribed
        ));
    }

    #[test]
    fn matrix_vector_product_has_two_edges() {
        let reg = FunctionRegistry::with_builtins();
        match reg.lookup(None, "*", &[SparseMatrix, Vector]) {
            LookupResult::Resolved(record) => assert_eq!(record.edges.len(), 2),
            _ => panic!("expected a resolved descriptor"),
        }
    }
}
