//! Shape extraction — lifts boxes and lines off a character grid.
//!
//! The pipeline per 4-connected region: trace it into a vertex graph,
//! compactify collinear runs, peel degree-1 tails into LINE components,
//! then walk the remaining faces into BOX components.

pub mod branch;
pub mod compact;
pub mod loops;
pub mod trace;
pub mod types;

pub use types::{Color, Component, ComponentKind, Direction, Text, Vertex, VertexId};

use crate::error::Result;
use crate::grid::{Grid, StatusGrid};

/// Run the full extraction pipeline over one grid.
///
/// Emits, for each traced region, its line tails first (in peel order) and
/// then its boxes (in face-walk order). The status grid comes back with
/// every shape cell marked SEEN, which is what the free-text scanner keys
/// off.
pub fn extract(grid: &Grid, status: &mut StatusGrid) -> Result<Vec<Component>> {
    let mut out = Vec::new();
    for mut c in trace::trace(grid, status) {
        compact::compactify(&mut c);
        branch::extract_branches(&mut c, &mut out);
        loops::extract_loops(&mut c, &mut out)?;
    }
    Ok(out)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
