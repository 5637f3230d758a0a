//! Free-text collection and label attachment.
//!
//! After tracing, every cell the tracer did not consume and that is not
//! blank belongs to text. Per-row runs of such cells become `Text` items
//! (single-blank gaps merge, so `hello world` stays one label). Items that
//! land inside a box either attach to it as labels or, for `cNNN` colour
//! codes, set its background; everything else is free text.

use std::sync::LazyLock;

use regex::Regex;

use crate::grid::{Grid, StatusGrid};
use crate::shapes::{Color, Component, ComponentKind, Text};

/// Background colour code: `c` plus one hex digit per RGB channel.
static COLOR_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^c[0-9A-F]{3}$").expect("colour-code pattern compiles"));

// ─── Collection ──────────────────────────────────────────────────────────────

/// Collect text items in row-major order: maximal runs of unconsumed,
/// non-blank cells, with runs separated by exactly one blank merged.
pub fn collect_text(grid: &Grid, status: &StatusGrid) -> Vec<Text> {
    let is_text =
        |y: i32, x: i32| -> bool { grid.get(y, x) != ' ' && !status.is_seen(y, x) };

    let mut items = Vec::new();
    for y in 0..grid.height() as i32 {
        let mut run: Option<(i32, String)> = None;
        for x in 0..grid.width() as i32 {
            if is_text(y, x) {
                let ch = grid.get(y, x);
                run = match run.take() {
                    Some((sx, mut s)) => {
                        s.push(ch);
                        Some((sx, s))
                    }
                    None => Some((x, ch.to_string())),
                };
            } else if let Some((sx, mut s)) = run.take() {
                if grid.get(y, x) == ' ' && is_text(y, x + 1) {
                    s.push(' ');
                    run = Some((sx, s));
                } else {
                    items.push(Text { y, x: sx, t: s });
                }
            }
        }
        if let Some((sx, s)) = run {
            items.push(Text { y, x: sx, t: s });
        }
    }
    items
}

// ─── Attachment ──────────────────────────────────────────────────────────────

/// Vertical edges of a box outline, for point-in-polygon ray casts.
struct BoxHull {
    index: usize,
    area: i64,
    /// (x, y_top, y_bottom) with y_top < y_bottom.
    vedges: Vec<(i32, i32, i32)>,
}

impl BoxHull {
    fn of(index: usize, c: &Component) -> Option<Self> {
        let ids = c.outline()?;
        let mut vedges = Vec::new();
        for i in 0..ids.len() {
            let a = c.vertex(ids[i]);
            let b = c.vertex(ids[(i + 1) % ids.len()]);
            if a.x == b.x && a.y != b.y {
                vedges.push((a.x, a.y.min(b.y), a.y.max(b.y)));
            }
        }
        Some(Self {
            index,
            area: c.area,
            vedges,
        })
    }

    /// Even-odd test: cast a ray east from the cell centre and count the
    /// vertical edges it crosses.
    fn contains(&self, y: i32, x: i32) -> bool {
        let crossings = self
            .vedges
            .iter()
            .filter(|&&(ex, y0, y1)| ex > x && y0 <= y && y < y1)
            .count();
        crossings % 2 == 1
    }
}

/// Route collected text: colour codes and labels go to the smallest box
/// containing them; the leftovers come back as free text.
pub fn attach_text(components: &mut [Component], items: Vec<Text>) -> Vec<Text> {
    let mut hulls: Vec<BoxHull> = components
        .iter()
        .enumerate()
        .filter(|(_, c)| c.kind == ComponentKind::Box)
        .filter_map(|(i, c)| BoxHull::of(i, c))
        .collect();
    // nested boxes: innermost (smallest) first
    hulls.sort_by_key(|h| h.area);

    let mut free = Vec::new();
    for item in items {
        // midpoint keeps labels that brush a wall attached to the right box
        let mid_x = item.x + (item.t.chars().count() as i32) / 2;
        let owner = hulls.iter().find(|h| h.contains(item.y, mid_x));
        match owner {
            Some(h) => {
                let c = &mut components[h.index];
                match parse_color_code(&item.t) {
                    Some(color) => {
                        c.background = Some(color);
                        c.white_text = color.is_dark();
                    }
                    None => c.text.push(item),
                }
            }
            None => free.push(item),
        }
    }
    free
}

/// Parse a `cNNN` colour code into its 0–15 channels.
fn parse_color_code(t: &str) -> Option<Color> {
    if !COLOR_CODE.is_match(t) {
        return None;
    }
    let mut digits = t.chars().skip(1).map(|ch| {
        ch.to_digit(16).map(|d| d as u8).unwrap_or(0)
    });
    Some(Color {
        r: digits.next()?,
        g: digits.next()?,
        b: digits.next()?,
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
