//! Component tracer — flood-fills the grid into maximal 4-connected
//! components of drawing cells.
//!
//! Every drawing cell becomes a vertex; 4-adjacency becomes an edge. Arrow
//! and diagonal glyphs (`/ \ < > ^ V v *`) connect exactly like `+`; the
//! renderer reinterprets them later.

use std::collections::HashMap;

use tracing::debug;

use crate::grid::{Grid, StatusGrid};
use crate::shapes::types::{Component, Direction, VertexId};

/// True for the segment characters that mark a component as dashed.
fn is_dash_char(ch: char) -> bool {
    ch == '=' || ch == ':'
}

/// Scan the grid in row-major order and trace every untouched drawing cell
/// into a new component. Each traced cell is marked SEEN in the status grid.
pub fn trace(grid: &Grid, status: &mut StatusGrid) -> Vec<Component> {
    let mut components = Vec::new();
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            if grid.is_drawing(y, x) && !status.is_seen(y, x) {
                components.push(trace_component(grid, status, y, x));
            }
        }
    }
    debug!(count = components.len(), "traced components");
    components
}

/// Flood-fill one 4-connected region starting at (y, x).
///
/// Uses an explicit work stack — native recursion would overflow on long
/// snaking inputs. Neighbour slots are visited in fixed E, N, W, S order so
/// vertex insertion order is deterministic.
fn trace_component(grid: &Grid, status: &mut StatusGrid, y: i32, x: i32) -> Component {
    let mut c = Component::new();
    let mut at: HashMap<(i32, i32), VertexId> = HashMap::new();
    let mut stack: Vec<VertexId> = Vec::new();

    let root = c.add_vertex(y, x, grid.get(y, x));
    c.dashed |= is_dash_char(grid.get(y, x));
    status.mark_seen(y, x);
    at.insert((y, x), root);
    stack.push(root);

    while let Some(u) = stack.pop() {
        let (uy, ux) = {
            let v = c.vertex(u);
            (v.y, v.x)
        };
        for d in Direction::ALL {
            let (dy, dx) = d.delta();
            let (ny, nx) = (uy + dy, ux + dx);
            if !grid.is_drawing(ny, nx) {
                continue;
            }
            let v = match at.get(&(ny, nx)) {
                Some(&v) => v,
                None => {
                    let ch = grid.get(ny, nx);
                    let v = c.add_vertex(ny, nx, ch);
                    c.dashed |= is_dash_char(ch);
                    status.mark_seen(ny, nx);
                    at.insert((ny, nx), v);
                    stack.push(v);
                    v
                }
            };
            if c.edge(u, d).is_none() {
                c.connect(u, d, v);
            }
        }
    }
    c
}

// ─── Tests ───────────────────────────────────────────────────────────────────
