//! Core geometry types: compass directions, vertices, and components.
//!
//! A component owns its vertices in an arena (a growable vector); edges are
//! arena indices, so the cyclic shape graphs need no shared ownership.
//! Removed vertices leave a tombstone behind, keeping the indices of the
//! survivors stable.

use std::fmt;

// ─── Direction ───────────────────────────────────────────────────────────────

pub const N_DIRECTIONS: usize = 4;

/// Compass direction of an edge slot. The y-axis grows downward, so North
/// decreases y and "left of East" is North.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    East = 0,
    North = 1,
    West = 2,
    South = 3,
}

impl Direction {
    /// All directions in slot order — also the tracer's neighbour visitation
    /// order.
    pub const ALL: [Direction; N_DIRECTIONS] = [
        Direction::East,
        Direction::North,
        Direction::West,
        Direction::South,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    fn from_index(i: usize) -> Self {
        Self::ALL[i % N_DIRECTIONS]
    }

    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Quarter turn counter-clockwise on screen (East turns to North).
    pub fn left(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Quarter turn clockwise on screen (East turns to South).
    pub fn right(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// (dy, dx) of one step in this direction.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::East => (0, 1),
            Direction::North => (-1, 0),
            Direction::West => (0, -1),
            Direction::South => (1, 0),
        }
    }

    /// Direction from (y, x) toward (ny, nx), when the two points are
    /// distinct and share a row or column.
    pub fn between(y: i32, x: i32, ny: i32, nx: i32) -> Option<Self> {
        if y == ny && nx > x {
            Some(Direction::East)
        } else if y == ny && nx < x {
            Some(Direction::West)
        } else if x == nx && ny < y {
            Some(Direction::North)
        } else if x == nx && ny > y {
            Some(Direction::South)
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::East => "EAST",
            Direction::North => "NORTH",
            Direction::West => "WEST",
            Direction::South => "SOUTH",
        };
        write!(f, "{name}")
    }
}

// ─── Vertex ──────────────────────────────────────────────────────────────────

pub type VertexId = usize;

/// One grid cell lifted into a component's graph: its coordinates, the
/// character that produced it, and four directional edge slots.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub y: i32,
    pub x: i32,
    pub ch: char,
    edges: [Option<VertexId>; N_DIRECTIONS],
}

impl Vertex {
    fn new(y: i32, x: i32, ch: char) -> Self {
        Self {
            y,
            x,
            ch,
            edges: [None; N_DIRECTIONS],
        }
    }

    pub fn edge(&self, d: Direction) -> Option<VertexId> {
        self.edges[d.index()]
    }

    pub fn degree(&self) -> usize {
        self.edges.iter().filter(|e| e.is_some()).count()
    }

    /// First occupied edge slot in E/N/W/S order.
    pub fn first_edge(&self) -> Option<(Direction, VertexId)> {
        Direction::ALL
            .iter()
            .find_map(|&d| self.edge(d).map(|v| (d, v)))
    }
}

// ─── Annotations ─────────────────────────────────────────────────────────────

/// A run of label characters anchored at its left end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub y: i32,
    pub x: i32,
    pub t: String,
}

/// Background colour, one hex digit per channel (0–15).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Perceived brightness on the 0–15 scale.
    pub fn brightness(self) -> u32 {
        (299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b)) / 1000
    }

    /// Dark backgrounds get white label text.
    pub fn is_dark(self) -> bool {
        self.brightness() < 8
    }
}

// ─── Component ───────────────────────────────────────────────────────────────

/// Classification of an extracted component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComponentKind {
    /// Traced but not yet split into lines and boxes.
    #[default]
    Unknown,
    /// An open poly-line.
    Line,
    /// A closed polygonal region.
    Box,
}

/// A connected set of vertices plus its classification and annotations.
///
/// `connect` and `disconnect` are the only symmetric mutators of the edge
/// table; `take_edge` is the loop extractor's documented one-sided
/// consumption of a directed edge.
#[derive(Debug, Clone, Default)]
pub struct Component {
    pub kind: ComponentKind,
    pub dashed: bool,
    /// Enclosed area in grid-cell units; meaningful only for boxes.
    pub area: i64,
    pub text: Vec<Text>,
    pub background: Option<Color>,
    pub white_text: bool,
    slots: Vec<Option<Vertex>>,
}

impl Component {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live vertices.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }

    pub fn add_vertex(&mut self, y: i32, x: i32, ch: char) -> VertexId {
        self.slots.push(Some(Vertex::new(y, x, ch)));
        self.slots.len() - 1
    }

    /// Tombstone a vertex. Callers must have spliced or disconnected its
    /// edges first; the slot index is never reused.
    pub fn remove_vertex(&mut self, id: VertexId) {
        self.slots[id] = None;
    }

    pub fn is_alive(&self, id: VertexId) -> bool {
        self.slots.get(id).is_some_and(|s| s.is_some())
    }

    pub fn get(&self, id: VertexId) -> Option<&Vertex> {
        self.slots.get(id).and_then(|s| s.as_ref())
    }

    /// Live vertex at `id`. Panics on a stale id — that is a bug in the
    /// caller, not a recoverable condition.
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        self.slots[id].as_ref().expect("stale vertex id")
    }

    fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        self.slots[id].as_mut().expect("stale vertex id")
    }

    pub fn edge(&self, id: VertexId, d: Direction) -> Option<VertexId> {
        self.vertex(id).edge(d)
    }

    pub fn degree(&self, id: VertexId) -> usize {
        self.vertex(id).degree()
    }

    /// Live vertices in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, s)| s.as_ref().map(|v| (id, v)))
    }

    /// Snapshot of live ids, for iterating while mutating.
    pub fn ids(&self) -> Vec<VertexId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// First live vertex at (y, x), in insertion order.
    pub fn find(&self, y: i32, x: i32) -> Option<VertexId> {
        self.iter()
            .find(|(_, v)| v.y == y && v.x == x)
            .map(|(id, _)| id)
    }

    /// Set the edge `a --d--> b` and its mirror `b --opp(d)--> a`.
    pub fn connect(&mut self, a: VertexId, d: Direction, b: VertexId) {
        self.vertex_mut(a).edges[d.index()] = Some(b);
        self.vertex_mut(b).edges[d.opposite().index()] = Some(a);
    }

    /// Connect two vertices that share a row or column, deriving the
    /// direction from their coordinates.
    pub fn connect_aligned(&mut self, a: VertexId, b: VertexId) {
        let (va, vb) = (self.vertex(a), self.vertex(b));
        let d = Direction::between(va.y, va.x, vb.y, vb.x)
            .expect("connect_aligned: vertices share neither row nor column");
        self.connect(a, d, b);
    }

    /// Remove the edge out of `a` in direction `d`, clearing both endpoints.
    pub fn disconnect(&mut self, a: VertexId, d: Direction) {
        if let Some(b) = self.vertex(a).edge(d) {
            self.vertex_mut(a).edges[d.index()] = None;
            let back = d.opposite().index();
            if let Some(vb) = self.slots[b].as_mut() {
                if vb.edges[back] == Some(a) {
                    vb.edges[back] = None;
                }
            }
        }
    }

    /// Consume the directed edge out of `a` in direction `d`, leaving the
    /// mirror slot on the far endpoint in place. Face walks use this so each
    /// undirected edge serves both of its adjacent faces.
    pub fn take_edge(&mut self, a: VertexId, d: Direction) -> Option<VertexId> {
        self.vertex_mut(a).edges[d.index()].take()
    }

    /// Ordered boundary walk of a closed component: start at the first
    /// vertex, follow its first edge, then keep choosing left, straight,
    /// right; stop on returning to the start. Returns None when the walk
    /// dead-ends or fails to close (open lines, corrupt graphs).
    pub fn outline(&self) -> Option<Vec<VertexId>> {
        let (start, sv) = self.iter().next()?;
        let (mut dir, _) = sv.first_edge()?;
        let mut ids = vec![start];
        let mut cur = start;
        for _ in 0..self.slots.len() + 1 {
            let next = self.edge(cur, dir)?;
            if next == start {
                return Some(ids);
            }
            ids.push(next);
            dir = [dir.left(), dir, dir.right()]
                .into_iter()
                .find(|&nd| self.edge(next, nd).is_some())?;
            cur = next;
        }
        None
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
