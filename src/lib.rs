//! asciivec — ASCII-art diagrams to SVG vector drawings.
//!
//! Rectangles, poly-lines, arrows and free text drawn with `+ - | : = * / \
//! > < ^ V v` are lifted off the character grid into typed box and line
//! components, then painted as an SVG document.
//!
//! Public API: [`parse`] for the structured diagram, [`render_svg`] for the
//! one-call pipeline.

pub mod config;
pub mod error;
pub mod grid;
pub mod renderers;
pub mod shapes;
pub mod text;

pub use config::RenderConfig;
pub use error::{Error, Result};

use crate::grid::{Grid, StatusGrid};
use crate::shapes::{Component, Text};

/// A fully parsed diagram: extracted components with their labels and
/// colours attached, plus the text that belongs to no shape.
#[derive(Debug, Clone)]
pub struct Diagram {
    pub components: Vec<Component>,
    pub free_text: Vec<Text>,
    /// Grid dimensions, in cells.
    pub height: usize,
    pub width: usize,
}

/// Parse diagram text into its structured form: extract shapes, then route
/// every text run to the box that contains it (or to the free-text list).
pub fn parse(src: &str) -> Result<Diagram> {
    let grid = Grid::read(src);
    let mut status = StatusGrid::for_grid(&grid);
    let mut components = shapes::extract(&grid, &mut status)?;
    let items = text::collect_text(&grid, &status);
    let free_text = text::attach_text(&mut components, items);
    Ok(Diagram {
        components,
        free_text,
        height: grid.height(),
        width: grid.width(),
    })
}

/// Parse and render in one call.
pub fn render_svg(src: &str, config: &RenderConfig) -> Result<String> {
    let diagram = parse(src)?;
    Ok(renderers::svg::render(&diagram, config))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
