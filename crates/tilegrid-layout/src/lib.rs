#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::doc_markdown)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Layout engine for tilegrid.
//!
//! Operates on [`tilegrid_core::Layout`] values and never mutates its
//! inputs: every operation returns a new layout whose index `i` holds the
//! item that was at input index `i`.
//!
//! - **Collision**: [`collides`], [`get_first_collision`], [`get_all_collisions`]
//! - **Compaction**: [`Compactor`] and the [`LayoutCompactor`] trait, with
//!   scan-based, tide-array and reading-order strategies
//! - **Dragging**: [`move_element`] resolves the push cascade of one move
//! - **Repair**: [`correct_bounds`] pulls items back inside the columns
//! - **Responsive**: [`ResponsiveResolver`] picks a breakpoint and derives
//!   missing layouts

mod bounds;
mod collision;
mod compact;
mod movement;
mod responsive;

pub use bounds::correct_bounds;
pub use collision::{collides, get_all_collisions, get_first_collision};
pub use compact::{
    compact, compact_horizontal_fast, compact_vertical_fast, compact_wrap, get_compactor,
    move_wrap, sort_layout_items, sort_layout_items_by_col_row, sort_layout_items_by_row_col,
    CompactType, Compactor, CompactorKind, LayoutCompactor,
};
pub use movement::{move_element, move_element_away_from_collision};
pub use responsive::{
    find_or_generate_responsive_layout, get_breakpoint_from_width, get_cols_from_breakpoint,
    sort_breakpoints, BreakpointCols, Breakpoints, MissingLayoutStrategy, ResolvedLayout,
    ResponsiveLayouts, ResponsiveResolver,
};
