#![allow(clippy::doc_markdown, clippy::missing_const_for_fn)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! tilegrid: grid layout engine for draggable, resizable dashboard tiles.
//!
//! A host owns a [`Layout`] and threads it through the engine on every
//! pointer move or container resize. Nothing is retained between calls.
//!
//! ```
//! use tilegrid::{Compactor, GridConfig, LayoutCompactor, LayoutItem};
//!
//! let config = GridConfig::default();
//! let layout = vec![LayoutItem::new("a", 0, 5, 2, 2)];
//! let compacted = config.compactor().compact(&layout, config.cols);
//! assert_eq!(compacted[0].y, 0);
//! assert_eq!(config.compactor(), Compactor::vertical());
//! ```

pub use tilegrid_core::*;
pub use tilegrid_layout as layout;
pub use tilegrid_layout::{
    collides, compact, correct_bounds, find_or_generate_responsive_layout,
    get_all_collisions, get_breakpoint_from_width, get_cols_from_breakpoint, get_compactor,
    get_first_collision, move_element, move_element_away_from_collision, sort_breakpoints,
    sort_layout_items, sort_layout_items_by_col_row, sort_layout_items_by_row_col,
    BreakpointCols, Breakpoints, CompactType, Compactor, CompactorKind, LayoutCompactor,
    MissingLayoutStrategy, ResolvedLayout, ResponsiveLayouts, ResponsiveResolver,
};

mod config;

pub use config::{GridConfig, ResponsiveConfig, SpacingConfig};
