//! The Inter-Dependence Graph builder and colour propagator (spec.md §3,
//! §4.2, §4.3): turns a loop region's statements into a coloured IDG,
//! given a seed symbol, a function registry, and the host's type oracle.

mod builder;
mod idg;
mod propagator;

pub use builder::Builder;
pub use idg::{Idg, Vertex, VertexId};
pub use propagator::propagate;
