//! Loop extractor — walks the faces of the branch-free residual graph and
//! emits every bounded face as a BOX component.
//!
//! One face walk starts per (vertex, direction) pair that still has an
//! outgoing edge. Each walk consumes the *directed* edges it follows and
//! leaves the mirror slots alone, so every undirected edge serves both of
//! its adjacent faces — a wall shared by two boxes shows up in both. The
//! face with the largest area is the unbounded outer face and is discarded.

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::shapes::types::{Component, ComponentKind, Direction, VertexId};

/// Extract every face of `o`, discard the area-maximal one (ties keep the
/// earliest), and append the rest to `out` as BOX components.
pub fn extract_loops(o: &mut Component, out: &mut Vec<Component>) -> Result<()> {
    let mut faces: Vec<Component> = Vec::new();
    for id in o.ids() {
        for d in Direction::ALL {
            if o.edge(id, d).is_some() {
                let mut f = extract_one_loop(o, id, d)?;
                f.area = loop_area(&f)?;
                debug!(area = f.area, "face closed");
                faces.push(f);
            }
        }
    }
    if faces.is_empty() {
        return Ok(());
    }
    let mut outer = 0;
    for (i, f) in faces.iter().enumerate() {
        if f.area > faces[outer].area {
            outer = i;
        }
    }
    for (i, mut f) in faces.into_iter().enumerate() {
        if i != outer {
            f.kind = ComponentKind::Box;
            out.push(f);
        }
    }
    Ok(())
}

/// Walk one face counter-clockwise from `start` heading `dir`, copying the
/// visited vertices into a fresh component and consuming each directed edge
/// behind us. At every step the next direction is the first of left,
/// straight, right that still has an outgoing edge.
fn extract_one_loop(o: &mut Component, start: VertexId, start_dir: Direction) -> Result<Component> {
    let mut f = Component::new();
    f.dashed = o.dashed;

    let sv = o.vertex(start);
    debug!(y = sv.y, x = sv.x, dir = %start_dir, "face walk start");
    let start_copy = f.add_vertex(sv.y, sv.x, sv.ch);

    let mut u = start;
    let mut u_copy = start_copy;
    let mut dir = start_dir;
    loop {
        let Some(v) = o.take_edge(u, dir) else {
            let uv = o.vertex(u);
            return Err(Error::GraphInvariantViolated {
                y: uv.y,
                x: uv.x,
                ch: uv.ch,
            });
        };
        let vv = o.vertex(v);
        trace!(to_y = vv.y, to_x = vv.x, dir = %dir, "face step");
        let closing = v == start;
        let v_copy = if closing {
            start_copy
        } else {
            f.add_vertex(vv.y, vv.x, vv.ch)
        };
        f.connect(u_copy, dir, v_copy);
        if closing {
            return Ok(f);
        }
        let Some(next_dir) = [dir.left(), dir, dir.right()]
            .into_iter()
            .find(|&nd| o.edge(v, nd).is_some())
        else {
            let vv = o.vertex(v);
            return Err(Error::GraphInvariantViolated {
                y: vv.y,
                x: vv.x,
                ch: vv.ch,
            });
        };
        u = v;
        u_copy = v_copy;
        dir = next_dir;
    }
}

/// Area of a closed face in grid-cell units.
///
/// Starts at the top-most of the left-most vertices — a corner that always
/// has an east edge — and walks the cycle with the left/straight/right
/// preference, accumulating `(x₀ - x₁) · y₁` per step. The fixed start and
/// orientation make the sum positive for every simple rectilinear polygon.
fn loop_area(f: &Component) -> Result<i64> {
    let mut min: Option<(VertexId, i32, i32)> = None;
    for (id, v) in f.iter() {
        let better = match min {
            None => true,
            Some((_, my, mx)) => v.x < mx || (v.x == mx && v.y < my),
        };
        if better {
            min = Some((id, v.y, v.x));
        }
    }
    let Some((start, _, _)) = min else {
        return Ok(0);
    };

    let mut area: i64 = 0;
    let mut u = start;
    let mut dir = Direction::East;
    loop {
        let Some(v) = f.edge(u, dir) else {
            let uv = f.vertex(u);
            return Err(Error::GraphInvariantViolated {
                y: uv.y,
                x: uv.x,
                ch: uv.ch,
            });
        };
        let (ux, vv) = (f.vertex(u).x, f.vertex(v));
        area += i64::from(ux - vv.x) * i64::from(vv.y);
        if v == start {
            break;
        }
        let Some(next_dir) = [dir.left(), dir, dir.right()]
            .into_iter()
            .find(|&nd| f.edge(v, nd).is_some())
        else {
            return Err(Error::GraphInvariantViolated {
                y: vv.y,
                x: vv.x,
                ch: vv.ch,
            });
        };
        u = v;
        dir = next_dir;
    }
    Ok(area.abs())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
