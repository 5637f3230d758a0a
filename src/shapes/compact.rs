//! Compactifier — collapses runs of collinear segment cells.
//!
//! A `-`/`=` vertex with neighbours on both sides (or `|`/`:` with both
//! above and below) carries no geometry beyond its endpoints: the two
//! neighbours are spliced together and the vertex is destroyed. Corners,
//! junctions, arrow heads and point markers survive.

use crate::shapes::types::{Component, Direction};

/// Splice out every interior segment vertex of `c`. A single pass reaches
/// the fixpoint: each splice leaves the remaining candidates eligible.
pub fn compactify(c: &mut Component) {
    for id in c.ids() {
        let v = c.vertex(id);
        let (ahead, behind) = match v.ch {
            '-' | '=' => (Direction::East, Direction::West),
            '|' | ':' => (Direction::South, Direction::North),
            _ => continue,
        };
        let (Some(next), Some(prev)) = (v.edge(ahead), v.edge(behind)) else {
            // terminator or isolated stray: keep it
            continue;
        };
        // a sideways contact makes this a junction; splicing would strand
        // the perpendicular edge
        if v.edge(ahead.left()).is_some() || v.edge(ahead.right()).is_some() {
            continue;
        }
        c.disconnect(id, ahead);
        c.disconnect(id, behind);
        c.connect(prev, ahead, next);
        c.remove_vertex(id);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
