//! SVG renderer — draws the extracted diagram as an SVG string.
//!
//! Boxes become closed filled paths, lines become polylines with triangular
//! arrow heads, `*` vertices become point-marker circles drawn last over
//! everything else. Geometry comes from `RenderConfig`: one grid cell is
//! `xcell` × `ycell` pixels and shape coordinates sit on cell centres.

use crate::config::RenderConfig;
use crate::shapes::{Component, ComponentKind, Text, Vertex};
use crate::Diagram;

const FONT_SIZE: i32 = 12;
const FONT_FAMILY: &str = "monospace";

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

// ─── Painter ─────────────────────────────────────────────────────────────────

struct Painter<'a> {
    cfg: &'a RenderConfig,
    o_x: f64,
    o_y: f64,
    parts: Vec<String>,
    markers: Vec<(i32, i32)>,
}

impl<'a> Painter<'a> {
    fn new(cfg: &'a RenderConfig) -> Self {
        Self {
            cfg,
            o_x: f64::from(cfg.border_left + cfg.xcell / 2),
            o_y: f64::from(cfg.border_top + cfg.ycell / 2),
            parts: Vec::new(),
            markers: Vec::new(),
        }
    }

    /// Pixel x of grid column `x`.
    fn px(&self, x: i32) -> f64 {
        self.o_x + f64::from(x * self.cfg.xcell) + self.cfg.fuzz_x
    }

    /// Pixel y of grid row `y`.
    fn py(&self, y: i32) -> f64 {
        self.o_y + f64::from(y * self.cfg.ycell) + self.cfg.fuzz_y
    }

    fn dash_attr(&self, dashed: bool) -> String {
        if dashed {
            format!(
                r#" stroke-dasharray="{} {}""#,
                self.cfg.dash_spec[0], self.cfg.dash_spec[1]
            )
        } else {
            String::new()
        }
    }

    fn remember_marker(&mut self, v: &Vertex) {
        if v.ch == '*' && !self.markers.contains(&(v.y, v.x)) {
            self.markers.push((v.y, v.x));
        }
    }

    // ── Boxes ────────────────────────────────────────────────────────────────

    fn paint_box(&mut self, c: &Component) {
        let Some(ids) = c.outline() else {
            return;
        };
        let mut d = String::new();
        for (i, &id) in ids.iter().enumerate() {
            let v = c.vertex(id);
            self.remember_marker(v);
            let cmd = if i == 0 { 'M' } else { 'L' };
            d.push_str(&format!("{cmd} {} {} ", self.px(v.x), self.py(v.y)));
        }
        d.push('Z');

        let fill = match c.background {
            Some(col) => format!(
                "rgb({},{},{})",
                u32::from(col.r) * 17,
                u32::from(col.g) * 17,
                u32::from(col.b) * 17
            ),
            None => "white".to_string(),
        };
        self.parts.push(format!(
            r#"<path d="{d}" fill="{fill}" stroke="black" stroke-width="1" stroke-linecap="round"{}/>"#,
            self.dash_attr(c.dashed)
        ));

        let white = c.background.is_some() && c.white_text;
        self.paint_text(&c.text, white);
    }

    // ── Lines ────────────────────────────────────────────────────────────────

    fn paint_line(&mut self, c: &Component) {
        let Some((start, sv)) = c.iter().find(|(_, v)| v.degree() == 1) else {
            return;
        };
        let Some((mut dir, _)) = sv.first_edge() else {
            return;
        };
        self.remember_marker(sv);

        let mut points = vec![format!("{},{}", self.px(sv.x), self.py(sv.y))];
        let mut cur = start;
        let mut last = start;
        while let Some(next) = c.edge(cur, dir) {
            let v = c.vertex(next);
            self.remember_marker(v);
            points.push(format!("{},{}", self.px(v.x), self.py(v.y)));
            last = next;
            match [dir.left(), dir, dir.right()]
                .into_iter()
                .find(|&nd| c.edge(next, nd).is_some())
            {
                Some(nd) => {
                    dir = nd;
                    cur = next;
                }
                None => break,
            }
        }

        self.parts.push(format!(
            r#"<polyline points="{}" fill="none" stroke="black" stroke-width="1" stroke-linecap="round"{}/>"#,
            points.join(" "),
            self.dash_attr(c.dashed)
        ));

        self.paint_arrow(c.vertex(start));
        if last != start {
            self.paint_arrow(c.vertex(last));
        }
    }

    /// Filled triangle replacing a terminal arrow glyph.
    fn paint_arrow(&mut self, v: &Vertex) {
        if !"<>Vv^".contains(v.ch) {
            return;
        }
        let (x, y) = (self.px(v.x), self.py(v.y));
        let cx = f64::from(self.cfg.xcell) / 2.0;
        let cy = f64::from(self.cfg.ycell) / 2.0;
        let pts = match v.ch {
            '^' => [(x, y - cy), (x - cx, y + cy), (x + cx, y + cy)],
            'V' | 'v' => [(x, y + cy), (x - cx, y - cy), (x + cx, y - cy)],
            '<' => [(x - cx, y), (x + cx, y - cy), (x + cx, y + cy)],
            _ => [(x + cx, y), (x - cx, y - cy), (x - cx, y + cy)],
        };
        let pts: Vec<String> = pts.iter().map(|(px, py)| format!("{px},{py}")).collect();
        self.parts.push(format!(
            r#"<polygon points="{}" fill="black"/>"#,
            pts.join(" ")
        ));
    }

    // ── Text and markers ─────────────────────────────────────────────────────

    fn paint_text(&mut self, items: &[Text], white: bool) {
        let fill = if white { "white" } else { "black" };
        for t in items {
            self.parts.push(format!(
                r#"<text x="{}" y="{}" font-family="{FONT_FAMILY}" font-size="{FONT_SIZE}" font-weight="bold" fill="{fill}">{}</text>"#,
                self.px(t.x),
                self.py(t.y),
                escape(&t.t)
            ));
        }
    }

    fn paint_point_markers(&mut self) {
        for (y, x) in std::mem::take(&mut self.markers) {
            self.parts.push(format!(
                r#"<circle cx="{}" cy="{}" r="{}" fill="white" stroke="black" stroke-width="1"/>"#,
                self.px(x),
                self.py(y),
                self.cfg.point_marker_radius
            ));
        }
    }
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Render a parsed diagram to an SVG document string.
pub fn render(diagram: &Diagram, cfg: &RenderConfig) -> String {
    let o_width = cfg.border_left + diagram.width as i32 * cfg.xcell + cfg.border_right;
    let o_height = cfg.border_top + diagram.height as i32 * cfg.ycell + cfg.border_bottom;

    let mut p = Painter::new(cfg);
    p.parts.push(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{o_width}" height="{o_height}" viewBox="0 0 {o_width} {o_height}">"#
    ));
    p.parts
        .push(format!(r#"<rect width="{o_width}" height="{o_height}" fill="white"/>"#));

    for c in &diagram.components {
        match c.kind {
            ComponentKind::Box => p.paint_box(c),
            ComponentKind::Line => p.paint_line(c),
            ComponentKind::Unknown => {}
        }
    }
    p.paint_text(&diagram.free_text, false);
    p.paint_point_markers();

    p.parts.push("</svg>".to_string());
    p.parts.join("\n")
}

// ─── Tests ───────────────────────────────────────────────────────────────────
