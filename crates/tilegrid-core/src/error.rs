//! Error types for tilegrid.

use thiserror::Error;

/// Errors raised by the fallible corners of the layout engine.
///
/// Almost every engine operation is total; these cover malformed
/// configuration and responsive lookups that cannot be satisfied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A snap constraint was configured with a non-positive step.
    #[error("snap_to_grid steps must be positive (got x={step_x}, y={step_y})")]
    InvalidSnapStep {
        /// Horizontal step in grid units.
        step_x: i32,
        /// Vertical step in grid units.
        step_y: i32,
    },

    /// No column count is configured for a breakpoint.
    #[error("cols entry for breakpoint `{0}` is missing")]
    MissingCols(String),

    /// No layout exists for a breakpoint and the policy forbids deriving one.
    #[error("no layout defined for breakpoint `{0}`")]
    MissingLayout(String),

    /// Breakpoint lookup against an empty breakpoint map.
    #[error("no breakpoints configured")]
    NoBreakpoints,

    /// Two items in one layout share an id.
    #[error("duplicate layout item id `{0}`")]
    DuplicateId(String),

    /// An item carries geometry the engine cannot place.
    #[error("invalid layout item `{id}`: {reason}")]
    InvalidItem {
        /// Offending item id.
        id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}
