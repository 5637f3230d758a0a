//! End-to-end tests for the extraction pipeline and renderer, driven
//! through the public API.

use asciivec::shapes::{Component, ComponentKind, Direction};
use asciivec::{parse, render_svg, Diagram, RenderConfig};

fn kinds(d: &Diagram) -> Vec<ComponentKind> {
    d.components.iter().map(|c| c.kind).collect()
}

fn vertex_tuples(c: &Component) -> Vec<(i32, i32, char)> {
    c.iter().map(|(_, v)| (v.y, v.x, v.ch)).collect()
}

fn boxes(d: &Diagram) -> Vec<&Component> {
    d.components
        .iter()
        .filter(|c| c.kind == ComponentKind::Box)
        .collect()
}

fn lines(d: &Diagram) -> Vec<&Component> {
    d.components
        .iter()
        .filter(|c| c.kind == ComponentKind::Line)
        .collect()
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn test_simple_box() {
    let d = parse("+----+\n|    |\n|    |\n+----+\n").unwrap();
    assert_eq!(kinds(&d), vec![ComponentKind::Box]);
    let b = &d.components[0];
    assert!(!b.dashed);
    assert_eq!(b.area, 15);
    let vs = vertex_tuples(b);
    assert_eq!(vs.len(), 4);
    for &(_, _, ch) in &vs {
        assert_eq!(ch, '+');
    }
    let mut coords: Vec<(i32, i32)> = vs.iter().map(|&(y, x, _)| (y, x)).collect();
    coords.sort_unstable();
    assert_eq!(coords, vec![(0, 0), (0, 5), (3, 0), (3, 5)]);
}

#[test]
fn test_line_with_arrow_head() {
    let d = parse("+-->\n").unwrap();
    assert_eq!(kinds(&d), vec![ComponentKind::Line]);
    assert_eq!(
        vertex_tuples(&d.components[0]),
        vec![(0, 0, '+'), (0, 3, '>')]
    );
    assert!(!d.components[0].dashed);
}

#[test]
fn test_box_with_tail() {
    let d = parse("+--+\n|  |\n+--+---->\n").unwrap();
    assert_eq!(lines(&d).len(), 1);
    assert_eq!(boxes(&d).len(), 1);
    assert_eq!(boxes(&d)[0].area, 6);
    // the tail runs from the arrow head to the box's bottom-right corner
    let l = lines(&d)[0];
    let vs = vertex_tuples(l);
    assert!(vs.contains(&(2, 8, '>')));
    assert!(vs.contains(&(2, 3, '+')));
}

#[test]
fn test_t_junction_shares_wall() {
    let d = parse("+---+---+\n|   |   |\n+---+---+\n").unwrap();
    let bs = boxes(&d);
    assert_eq!(bs.len(), 2);
    for b in &bs {
        assert_eq!(b.area, 8);
        // each box carries its own copies of the shared wall endpoints
        assert!(b.find(0, 4).is_some());
        assert!(b.find(2, 4).is_some());
    }
    assert!(lines(&d).is_empty());
}

#[test]
fn test_dashed_box() {
    let d = parse("+=-=+\n:   :\n+=-=+\n").unwrap();
    assert_eq!(kinds(&d), vec![ComponentKind::Box]);
    assert!(d.components[0].dashed);
}

#[test]
fn test_isolated_dash_run() {
    let d = parse("---\n").unwrap();
    assert_eq!(kinds(&d), vec![ComponentKind::Line]);
    assert_eq!(
        vertex_tuples(&d.components[0]),
        vec![(0, 0, '-'), (0, 2, '-')]
    );
}

#[test]
fn test_mixed_diagram() {
    let src = "\
+--------+       +--------+
| parser |  -->  | render |
+--------+       +--------+
     free note here
";
    let d = parse(src).unwrap();
    assert_eq!(boxes(&d).len(), 2);
    assert_eq!(lines(&d).len(), 1);
    let labels: Vec<&str> = boxes(&d)
        .iter()
        .flat_map(|b| b.text.iter().map(|t| t.t.as_str()))
        .collect();
    assert_eq!(labels, vec!["parser", "render"]);
    assert_eq!(d.free_text.len(), 1);
    assert_eq!(d.free_text[0].t, "free note here");
}

#[test]
fn test_colored_box() {
    let d = parse("+------+\n| c0AF |\n| data |\n+------+\n").unwrap();
    let b = boxes(&d)[0];
    assert!(b.background.is_some());
    assert_eq!(b.text.len(), 1);
    assert_eq!(b.text[0].t, "data");
}

// ─── Invariants ──────────────────────────────────────────────────────────────

const CORPUS: &[&str] = &[
    "+----+\n|    |\n|    |\n+----+\n",
    "+-->\n",
    "+--+\n|  |\n+--+---->\n",
    "+---+---+\n|   |   |\n+---+---+\n",
    "+=-=+\n:   :\n+=-=+\n",
    "---\n",
    "+--+--+\n|  |  |\n+--+--+\n|  |  |\n+--+--+\n",
    " |\n-+-\n |\n",
    "*--*\n",
    "/--\\\n|  |\n\\--/\n",
];

#[test]
fn test_only_lines_and_boxes_emitted() {
    for src in CORPUS {
        let d = parse(src).unwrap();
        for c in &d.components {
            assert_ne!(c.kind, ComponentKind::Unknown, "input: {src:?}");
        }
    }
}

#[test]
fn test_edge_symmetry_everywhere() {
    for src in CORPUS {
        let d = parse(src).unwrap();
        for c in &d.components {
            for (id, v) in c.iter() {
                for dir in Direction::ALL {
                    if let Some(peer) = v.edge(dir) {
                        assert_eq!(
                            c.edge(peer, dir.opposite()),
                            Some(id),
                            "asymmetric edge in {src:?}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_edges_stay_row_or_column_aligned() {
    for src in CORPUS {
        let d = parse(src).unwrap();
        for c in &d.components {
            for (_, v) in c.iter() {
                for dir in Direction::ALL {
                    if let Some(peer) = v.edge(dir) {
                        let p = c.vertex(peer);
                        match dir {
                            Direction::East | Direction::West => assert_eq!(p.y, v.y),
                            Direction::North | Direction::South => assert_eq!(p.x, v.x),
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_boxes_are_simple_closed_polygons() {
    for src in CORPUS {
        let d = parse(src).unwrap();
        for b in boxes(&d) {
            let ids = b.outline().unwrap_or_else(|| panic!("open box in {src:?}"));
            assert_eq!(ids.len(), b.len(), "outline misses vertices in {src:?}");
            let mut seen = ids.clone();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), ids.len(), "outline revisits a vertex in {src:?}");
        }
    }
}

#[test]
fn test_box_areas_strictly_positive() {
    for src in CORPUS {
        let d = parse(src).unwrap();
        for b in boxes(&d) {
            assert!(b.area > 0, "non-positive area in {src:?}");
        }
    }
}

#[test]
fn test_vertices_carry_input_characters() {
    for src in CORPUS {
        let grid = asciivec::grid::Grid::read(src);
        let d = parse(src).unwrap();
        for c in &d.components {
            for (_, v) in c.iter() {
                assert_eq!(grid.get(v.y, v.x), v.ch, "char mismatch in {src:?}");
            }
        }
    }
}

#[test]
fn test_parse_is_deterministic() {
    for src in CORPUS {
        let a = parse(src).unwrap();
        let b = parse(src).unwrap();
        assert_eq!(kinds(&a), kinds(&b));
        for (ca, cb) in a.components.iter().zip(&b.components) {
            assert_eq!(vertex_tuples(ca), vertex_tuples(cb));
            assert_eq!(ca.dashed, cb.dashed);
            assert_eq!(ca.area, cb.area);
        }
    }
}

// ─── Rendering ───────────────────────────────────────────────────────────────

#[test]
fn test_render_whole_corpus() {
    for src in CORPUS {
        let svg = render_svg(src, &RenderConfig::default()).unwrap();
        assert!(svg.starts_with("<svg "), "bad document for {src:?}");
        assert!(svg.ends_with("</svg>"), "bad document for {src:?}");
    }
}

#[test]
fn test_render_mixed_diagram_has_all_layers() {
    let src = "\
+--------+       +--------+
| cF00   |  -->  | render |
+--------+       +--------+
     *--*  note
";
    let svg = render_svg(src, &RenderConfig::default()).unwrap();
    assert!(svg.contains("<path "));
    assert!(svg.contains("<polyline "));
    assert!(svg.contains("<polygon "));
    assert!(svg.contains("<circle "));
    assert!(svg.contains(">note</text>"));
    assert!(svg.contains(r#"fill="rgb(255,0,0)""#));
}
