//! Compaction strategies.
//!
//! A compactor decides how a layout is repacked after every change and how
//! a single drag step propagates. Strategies differ along two axes:
//!
//! | kind              | packs toward        | cost per pass      |
//! |-------------------|---------------------|--------------------|
//! | `Vertical`        | row 0               | O(n²) scans        |
//! | `Horizontal`      | column 0            | O(n²) scans        |
//! | `FastVertical`    | row 0               | O(n log n) + tide  |
//! | `FastHorizontal`  | column 0            | O(n log n) + tide  |
//! | `Wrap`            | reading order slots | O(n · cells)       |
//! | `NoCompaction`    | nowhere             | clone              |
//!
//! Any kind with `allow_overlap` set skips packing and collision handling
//! entirely.

mod fast;
mod packing;
mod wrap;

pub(crate) use fast::row_limit_guard;
pub use fast::{compact_horizontal_fast, compact_vertical_fast};
pub use packing::compact;
pub use wrap::{compact_wrap, move_wrap};

use crate::collision::get_first_collision;
use crate::movement::move_element;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tilegrid_core::{layout_index, Layout, LayoutItem};

/// Axis a compactor packs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompactType {
    /// Pack toward the top
    Vertical,
    /// Pack toward the left
    Horizontal,
    /// Pack in reading order, wrapping at the column count
    Wrap,
}

/// Packing algorithm selected by a [`Compactor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompactorKind {
    /// Collision-scan vertical packing
    #[default]
    Vertical,
    /// Collision-scan horizontal packing
    Horizontal,
    /// Slot-order packing
    Wrap,
    /// Keep positions as given
    #[serde(rename = "none")]
    NoCompaction,
    /// Tide-array vertical packing
    FastVertical,
    /// Tide-array horizontal packing
    FastHorizontal,
}

impl CompactorKind {
    /// Axis this kind packs along, `None` for no compaction.
    #[must_use]
    pub const fn compact_type(self) -> Option<CompactType> {
        match self {
            Self::Vertical | Self::FastVertical => Some(CompactType::Vertical),
            Self::Horizontal | Self::FastHorizontal => Some(CompactType::Horizontal),
            Self::Wrap => Some(CompactType::Wrap),
            Self::NoCompaction => None,
        }
    }
}

/// Capability set every compactor exposes.
///
/// [`move_element`] only needs the flags and the axis, so hosts can plug in
/// their own packing while reusing the move resolver.
pub trait LayoutCompactor {
    /// Axis used to order collisions during a move.
    fn compact_type(&self) -> Option<CompactType>;

    /// Items may overlap; no collision handling at all.
    fn allow_overlap(&self) -> bool;

    /// A move that would collide is reverted instead of pushing.
    fn prevent_collision(&self) -> bool;

    /// Repack a layout. Must not mutate the input.
    fn compact(&self, layout: &[LayoutItem], cols: i32) -> Layout;

    /// Move one item to `(x, y)` and resolve the consequences.
    fn on_move(&self, layout: &[LayoutItem], item: &LayoutItem, x: i32, y: i32, cols: i32)
        -> Layout;
}

/// The built-in compactors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Compactor {
    /// Packing algorithm
    pub kind: CompactorKind,
    /// Disable collision handling
    pub allow_overlap: bool,
    /// Revert colliding moves instead of pushing
    pub prevent_collision: bool,
}

impl Compactor {
    /// Compactor of the given kind with collisions resolved by pushing.
    #[must_use]
    pub const fn new(kind: CompactorKind) -> Self {
        Self {
            kind,
            allow_overlap: false,
            prevent_collision: false,
        }
    }

    /// Pack toward row 0.
    #[must_use]
    pub const fn vertical() -> Self {
        Self::new(CompactorKind::Vertical)
    }

    /// Pack toward column 0.
    #[must_use]
    pub const fn horizontal() -> Self {
        Self::new(CompactorKind::Horizontal)
    }

    /// Pack in reading order.
    #[must_use]
    pub const fn wrap() -> Self {
        Self::new(CompactorKind::Wrap)
    }

    /// Keep positions; moves still push colliding items.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(CompactorKind::NoCompaction)
    }

    /// Tide-array vertical packing for large layouts.
    #[must_use]
    pub const fn fast_vertical() -> Self {
        Self::new(CompactorKind::FastVertical)
    }

    /// Tide-array horizontal packing for large layouts.
    #[must_use]
    pub const fn fast_horizontal() -> Self {
        Self::new(CompactorKind::FastHorizontal)
    }

    /// Vertical, overlap allowed.
    #[must_use]
    pub const fn vertical_overlap() -> Self {
        Self::vertical().with_allow_overlap(true)
    }

    /// Horizontal, overlap allowed.
    #[must_use]
    pub const fn horizontal_overlap() -> Self {
        Self::horizontal().with_allow_overlap(true)
    }

    /// Wrap, overlap allowed.
    #[must_use]
    pub const fn wrap_overlap() -> Self {
        Self::wrap().with_allow_overlap(true)
    }

    /// No compaction, overlap allowed.
    #[must_use]
    pub const fn none_overlap() -> Self {
        Self::none().with_allow_overlap(true)
    }

    /// Set `allow_overlap`.
    #[must_use]
    pub const fn with_allow_overlap(mut self, allow_overlap: bool) -> Self {
        self.allow_overlap = allow_overlap;
        self
    }

    /// Set `prevent_collision`.
    #[must_use]
    pub const fn with_prevent_collision(mut self, prevent_collision: bool) -> Self {
        self.prevent_collision = prevent_collision;
        self
    }
}

/// Build the compactor matching a compaction axis and collision policy.
#[must_use]
pub const fn get_compactor(
    compact_type: Option<CompactType>,
    allow_overlap: bool,
    prevent_collision: bool,
) -> Compactor {
    let kind = match compact_type {
        Some(CompactType::Vertical) => CompactorKind::Vertical,
        Some(CompactType::Horizontal) => CompactorKind::Horizontal,
        Some(CompactType::Wrap) => CompactorKind::Wrap,
        None => CompactorKind::NoCompaction,
    };
    Compactor {
        kind,
        allow_overlap,
        prevent_collision,
    }
}

/// Commit a position without any collision handling.
fn place_item(layout: &[LayoutItem], item: &LayoutItem, x: i32, y: i32) -> Layout {
    let mut out = layout.to_vec();
    if let Some(index) = layout_index(&out, &item.id) {
        if !out[index].is_locked() {
            out[index].x = x;
            out[index].y = y;
        }
    }
    out
}

/// Whether the cell range `item` would cover at slot `(x, y)` is held by
/// another item.
fn wrap_target_taken(layout: &[LayoutItem], item: &LayoutItem, x: i32, y: i32, cols: i32) -> bool {
    if cols <= 0 {
        return false;
    }
    let mut probe = item.clone();
    probe.x = x.clamp(0, cols - 1);
    probe.y = y.max(0);
    get_first_collision(layout, &probe).is_some()
}

impl LayoutCompactor for Compactor {
    fn compact_type(&self) -> Option<CompactType> {
        self.kind.compact_type()
    }

    fn allow_overlap(&self) -> bool {
        self.allow_overlap
    }

    fn prevent_collision(&self) -> bool {
        self.prevent_collision
    }

    fn compact(&self, layout: &[LayoutItem], cols: i32) -> Layout {
        if self.allow_overlap {
            return layout.to_vec();
        }
        match self.kind {
            CompactorKind::Vertical => compact(layout, Some(CompactType::Vertical), cols, false),
            CompactorKind::Horizontal => {
                compact(layout, Some(CompactType::Horizontal), cols, false)
            }
            CompactorKind::Wrap => compact_wrap(layout, cols),
            CompactorKind::NoCompaction => layout.to_vec(),
            CompactorKind::FastVertical => compact_vertical_fast(layout, cols),
            CompactorKind::FastHorizontal => compact_horizontal_fast(layout, cols),
        }
    }

    fn on_move(
        &self,
        layout: &[LayoutItem],
        item: &LayoutItem,
        x: i32,
        y: i32,
        cols: i32,
    ) -> Layout {
        if self.allow_overlap {
            return place_item(layout, item, x, y);
        }
        match self.kind {
            CompactorKind::Wrap
                if self.prevent_collision && wrap_target_taken(layout, item, x, y, cols) =>
            {
                layout.to_vec()
            }
            CompactorKind::Wrap => move_wrap(layout, item, x, y, cols),
            _ => move_element(layout, item, x, y, self, cols),
        }
    }
}

fn row_col_order(a: &LayoutItem, b: &LayoutItem) -> Ordering {
    a.y.cmp(&b.y).then(a.x.cmp(&b.x))
}

fn col_row_order(a: &LayoutItem, b: &LayoutItem) -> Ordering {
    a.x.cmp(&b.x).then(a.y.cmp(&b.y))
}

/// Indices of `layout` in compaction order. Stable; `None` keeps layout order.
#[must_use]
pub(crate) fn sorted_indices(layout: &[LayoutItem], compact_type: Option<CompactType>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..layout.len()).collect();
    match compact_type {
        Some(CompactType::Vertical) => {
            order.sort_by(|&a, &b| row_col_order(&layout[a], &layout[b]));
        }
        Some(CompactType::Horizontal) => {
            order.sort_by(|&a, &b| col_row_order(&layout[a], &layout[b]));
        }
        Some(CompactType::Wrap) | None => {}
    }
    order
}

/// Copy of `layout` sorted by row, then column.
#[must_use]
pub fn sort_layout_items_by_row_col(layout: &[LayoutItem]) -> Layout {
    let mut out = layout.to_vec();
    out.sort_by(row_col_order);
    out
}

/// Copy of `layout` sorted by column, then row.
#[must_use]
pub fn sort_layout_items_by_col_row(layout: &[LayoutItem]) -> Layout {
    let mut out = layout.to_vec();
    out.sort_by(col_row_order);
    out
}

/// Copy of `layout` in the order a compactor of `compact_type` visits it.
#[must_use]
pub fn sort_layout_items(layout: &[LayoutItem], compact_type: Option<CompactType>) -> Layout {
    sorted_indices(layout, compact_type)
        .into_iter()
        .map(|i| layout[i].clone())
        .collect()
}
