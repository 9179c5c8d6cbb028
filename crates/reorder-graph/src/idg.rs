//! The Inter-Dependence Graph (spec.md §3): two parallel vertex sets (row
//! and column permutation vectors, one pair per array symbol) joined by
//! symmetric, labelled edges.
//!
//! Vertices live in a flat arena (`Vec<Vertex>` indexed by `VertexId`)
//! rather than behind `Rc<RefCell<_>>` handles — the graph is cyclic by
//! construction (edges are symmetric, and propagation routinely revisits a
//! vertex from more than one neighbour), which an arena sidesteps without
//! runtime borrow checks.

use std::collections::HashMap;

use reorder_model::{Axis, PermColor, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexId(pub usize);

#[derive(Debug, Clone)]
pub struct Vertex {
    pub symbol: Symbol,
    pub axis: Axis,
    pub color: PermColor,
    /// `(other, inverse)` — `inverse` is the relation's inverse flag, the
    /// same on both directions of the edge (spec.md §3 I1).
    pub neighbors: Vec<(VertexId, bool)>,
}

#[derive(Debug, Default)]
pub struct Idg {
    vertices: Vec<Vertex>,
    index: HashMap<(Symbol, Axis), VertexId>,
}

impl Idg {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the vertex for `(symbol, axis)`, creating it (coloured
    /// `NoPerm`) if this is its first mention.
    pub fn get_or_create(&mut self, symbol: &Symbol, axis: Axis) -> VertexId {
        if let Some(&id) = self.index.get(&(symbol.clone(), axis)) {
            return id;
        }
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex {
            symbol: symbol.clone(),
            axis,
            color: PermColor::NoPerm,
            neighbors: Vec::new(),
        });
        self.index.insert((symbol.clone(), axis), id);
        id
    }

    pub fn find(&self, symbol: &Symbol, axis: Axis) -> Option<VertexId> {
        self.index.get(&(symbol.clone(), axis)).copied()
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn color_of(&self, id: VertexId) -> PermColor {
        self.vertices[id.0].color
    }

    pub fn set_color(&mut self, id: VertexId, color: PermColor) {
        self.vertices[id.0].color = color;
    }

    /// A plain symbol/axis lookup, for callers that already know the
    /// vertex exists (e.g. the action planner reading a finished graph).
    pub fn color_of_symbol(&self, symbol: &Symbol, axis: Axis) -> Option<PermColor> {
        self.find(symbol, axis).map(|id| self.color_of(id))
    }

    /// Add a symmetric edge between `a` and `b`. Deduplicated on
    /// `(neighbor, inverse)` (spec.md §3 I2: "no duplicate edges"); a
    /// self-loop (both endpoints resolving to the same vertex — e.g. `x =
    /// x`) is a no-op, since it can carry no new information.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId, inverse: bool) {
        if a == b {
            return;
        }
        if !self.vertices[a.0]
            .neighbors
            .iter()
            .any(|&(n, inv)| n == b && inv == inverse)
        {
            self.vertices[a.0].neighbors.push((b, inverse));
        }
        if !self.vertices[b.0]
            .neighbors
            .iter()
            .any(|&(n, inv)| n == a && inv == inverse)
        {
            self.vertices[b.0].neighbors.push((a, inverse));
        }
    }

    /// Pre-colour the seed's row and column vertices (spec.md §4.3 I2:
    /// "the seed's row vertex is coloured ROW_PERM and its column vertex
    /// COL_PERM before propagation starts").
    pub fn seed(&mut self, symbol: &Symbol) -> (VertexId, VertexId) {
        let row = self.get_or_create(symbol, Axis::Row);
        let col = self.get_or_create(symbol, Axis::Column);
        self.vertices[row.0].color = PermColor::RowPerm;
        self.vertices[col.0].color = PermColor::ColPerm;
        (row, col)
    }
}
