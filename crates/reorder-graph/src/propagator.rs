//! Breadth-first colour propagation from the seed's two vertices (spec.md
//! §4.3). A single shared `visited` set covers both traversals, so a
//! vertex reachable from either the row or the column seed is coloured
//! exactly once and never requeued.
//!
//! A colour collision is recorded as a [`Diagnostic`] and propagation
//! continues past it using the vertex's existing colour — per spec.md §7,
//! "the propagator never treats a conflicting colour as fatal".
//!
//! Every conflicting edge sits in both endpoints' neighbour lists, so the
//! traversal meets it twice: once while the far endpoint is still queued but
//! not yet expanded, and once when that endpoint is itself dequeued and
//! walks the edge back. Only the second visit is reported — gated on
//! `expanded`, a separate tracking array from `visited` — so one conflicting
//! equality constraint yields exactly one diagnostic, and re-running
//! `propagate` over an already-coloured graph raises none at all.

use std::collections::VecDeque;

use reorder_model::error::{Diagnostic, Diagnostics};

use crate::idg::{Idg, VertexId};

pub fn propagate(idg: &mut Idg, seed_row: VertexId, seed_col: VertexId, diagnostics: &mut dyn Diagnostics) {
    let mut visited = vec![false; idg.vertices().len()];
    let mut expanded = vec![false; idg.vertices().len()];
    let mut queue = VecDeque::new();
    for start in [seed_row, seed_col] {
        if !visited[start.0] {
            visited[start.0] = true;
            queue.push_back(start);
        }
    }

    while let Some(v) = queue.pop_front() {
        let color = idg.color_of(v);
        let neighbors = idg.vertex(v).neighbors.clone();
        for (n, inverse) in neighbors {
            debug_assert!(color.is_colored(), "a dequeued vertex must already be coloured");
            let required = if inverse { color.inverse().unwrap_or(color) } else { color };
            let existing = idg.color_of(n);
            if !existing.is_colored() {
                idg.set_color(n, required);
            } else if existing != required && expanded[n.0] {
                let vertex = idg.vertex(n);
                diagnostics.record(Diagnostic {
                    symbol: vertex.symbol.clone(),
                    axis: vertex.axis,
                    existing,
                    required,
                });
            }
            if !visited[n.0] {
                visited[n.0] = true;
                queue.push_back(n);
            }
        }
        expanded[v.0] = true;
    }
}
