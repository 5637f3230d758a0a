//! Output renderers.
//!
//! The only backend is SVG: the extracted shapes are vector data, and a
//! vector document keeps them that way.

pub mod svg;

pub use svg::render;
