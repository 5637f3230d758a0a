//! Error taxonomy for the extraction pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the core pipeline.
///
/// There is no partial output: if any component fails to extract, the whole
/// call fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Rows of unequal width were handed to the rectangular-grid constructor.
    #[error("malformed grid: {reason}")]
    MalformedGrid { reason: String },

    /// An extractor expected an outgoing edge where none exists. This means
    /// the traced graph is corrupt (mismatched connector characters or a
    /// tracer bug) and is fatal for the whole run.
    #[error("cannot decide where to go from ({y},{x}) '{ch}'")]
    GraphInvariantViolated { y: i32, x: i32, ch: char },
}

// ─── Tests ───────────────────────────────────────────────────────────────────
