//! Branch extractor — peels degree-1 tails off a component.
//!
//! Each maximal tail becomes a LINE component; the consumed edges are
//! removed from the residual graph, so what remains after the fixpoint is
//! either empty or has minimum degree 2 (pure cycles, left for the loop
//! extractor).

use tracing::{debug, trace};

use crate::shapes::types::{Component, ComponentKind, VertexId};

/// Peel leaves until none remain, appending one LINE component per tail to
/// `out`. Isolated vertices are dropped without emitting anything.
///
/// Works in rounds: collect this round's leaves, then process them.
pub fn extract_branches(o: &mut Component, out: &mut Vec<Component>) {
    loop {
        let mut leaves = Vec::new();
        for id in o.ids() {
            match o.degree(id) {
                0 => o.remove_vertex(id),
                1 => leaves.push(id),
                _ => {}
            }
        }
        if leaves.is_empty() {
            return;
        }
        for leaf in leaves {
            // an earlier tail this round may have drained this one's edge
            if o.degree(leaf) != 1 {
                continue;
            }
            let mut line = extract_one_branch(o, leaf);
            line.kind = ComponentKind::Line;
            o.remove_vertex(leaf);
            out.push(line);
        }
    }
}

/// Walk one tail starting at the degree-1 vertex `start`, copying vertices
/// into a fresh component and disconnecting each traversed edge. The walk
/// ends on a junction (remaining degree > 1) or a true dead end; the final
/// vertex is copied but stays in the residual.
fn extract_one_branch(o: &mut Component, start: VertexId) -> Component {
    let mut line = Component::new();
    line.dashed = o.dashed;

    let sv = o.vertex(start);
    debug!(y = sv.y, x = sv.x, ch = %sv.ch, "branch start");
    let mut cur_copy = line.add_vertex(sv.y, sv.x, sv.ch);
    let mut cur = start;

    loop {
        if o.degree(cur) != 1 {
            break;
        }
        let Some((dir, next)) = o.vertex(cur).first_edge() else {
            break;
        };
        let nv = o.vertex(next);
        trace!(to_y = nv.y, to_x = nv.x, dir = %dir, "branch step");
        let next_copy = line.add_vertex(nv.y, nv.x, nv.ch);
        line.connect(cur_copy, dir, next_copy);
        o.disconnect(cur, dir);
        cur = next;
        cur_copy = next_copy;
    }
    line
}

// ─── Tests ───────────────────────────────────────────────────────────────────
