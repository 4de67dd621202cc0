//! Layout items and whole-layout helpers.
//!
//! A [`Layout`] is an ordered `Vec<LayoutItem>`. Order is insertion order,
//! not a sort order, and every engine operation keeps output index `i`
//! pointing at the item that was at input index `i`.

use crate::constraint::Constraint;
use crate::error::LayoutError;
use crate::geometry::ResizeHandle;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordered sequence of layout items.
pub type Layout = Vec<LayoutItem>;

/// A rectangle placed on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutItem {
    /// Unique id within a layout
    pub id: String,
    /// Left column
    pub x: i32,
    /// Top row
    pub y: i32,
    /// Width in columns
    pub w: i32,
    /// Height in rows
    pub h: i32,
    /// Minimum width
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<i32>,
    /// Minimum height
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<i32>,
    /// Maximum width (`None` = unbounded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<i32>,
    /// Maximum height (`None` = unbounded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_h: Option<i32>,
    /// Immovable, but still blocks other items
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Per-item drag override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_draggable: Option<bool>,
    /// Per-item resize override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_resizable: Option<bool>,
    /// Per-item "stay inside the container" override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_bounded: Option<bool>,
    /// Resize handles shown for this item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resize_handles: Option<Vec<ResizeHandle>>,
    /// Host payload, never inspected by the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Constraints applied after the grid-wide ones
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
}

impl LayoutItem {
    /// Create an item at `(x, y)` with size `w`×`h`.
    #[must_use]
    pub fn new(id: impl Into<String>, x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
            min_w: None,
            min_h: None,
            max_w: None,
            max_h: None,
            is_static: false,
            is_draggable: None,
            is_resizable: None,
            is_bounded: None,
            resize_handles: None,
            data: None,
            constraints: Vec::new(),
        }
    }

    /// Mark the item static.
    #[must_use]
    pub const fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Override draggability.
    #[must_use]
    pub const fn with_draggable(mut self, draggable: bool) -> Self {
        self.is_draggable = Some(draggable);
        self
    }

    /// Override resizability.
    #[must_use]
    pub const fn with_resizable(mut self, resizable: bool) -> Self {
        self.is_resizable = Some(resizable);
        self
    }

    /// Set minimum size.
    #[must_use]
    pub const fn with_min_size(mut self, min_w: i32, min_h: i32) -> Self {
        self.min_w = Some(min_w);
        self.min_h = Some(min_h);
        self
    }

    /// Set maximum size.
    #[must_use]
    pub const fn with_max_size(mut self, max_w: i32, max_h: i32) -> Self {
        self.max_w = Some(max_w);
        self.max_h = Some(max_h);
        self
    }

    /// Attach a host payload.
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach a per-item constraint.
    #[must_use]
    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Static items only move when explicitly marked draggable.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.is_static && self.is_draggable != Some(true)
    }

    /// Bottom edge (exclusive).
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Right edge (exclusive).
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.w
    }
}

/// Lowest occupied row, i.e. the largest `y + h` in the layout.
#[must_use]
pub fn bottom(layout: &[LayoutItem]) -> i32 {
    layout.iter().map(LayoutItem::bottom).max().unwrap_or(0).max(0)
}

/// First item with the given id.
#[must_use]
pub fn get_layout_item<'a>(layout: &'a [LayoutItem], id: &str) -> Option<&'a LayoutItem> {
    layout.iter().find(|item| item.id == id)
}

/// Index of the first item with the given id.
#[must_use]
pub fn layout_index(layout: &[LayoutItem], id: &str) -> Option<usize> {
    layout.iter().position(|item| item.id == id)
}

/// Copies of all static items, in layout order.
#[must_use]
pub fn get_statics(layout: &[LayoutItem]) -> Layout {
    layout.iter().filter(|item| item.is_static).cloned().collect()
}

/// Owned copy of a layout.
#[must_use]
pub fn clone_layout(layout: &[LayoutItem]) -> Layout {
    layout.to_vec()
}

/// New layout with the item sharing `item.id` replaced by `item`.
#[must_use]
pub fn modify_layout(layout: &[LayoutItem], item: &LayoutItem) -> Layout {
    layout
        .iter()
        .map(|existing| {
            if existing.id == item.id {
                item.clone()
            } else {
                existing.clone()
            }
        })
        .collect()
}

/// Apply `f` to a copy of the item with `id`.
///
/// Returns the new layout and the updated item, or the unchanged layout and
/// `None` when the id is absent.
pub fn with_layout_item<F>(layout: &[LayoutItem], id: &str, f: F) -> (Layout, Option<LayoutItem>)
where
    F: FnOnce(LayoutItem) -> LayoutItem,
{
    match get_layout_item(layout, id) {
        Some(item) => {
            let updated = f(item.clone());
            (modify_layout(layout, &updated), Some(updated))
        }
        None => (clone_layout(layout), None),
    }
}

/// Check ids are unique and sizes are positive.
///
/// The engine never calls this itself; duplicate ids only make lookups
/// resolve to the first match.
pub fn validate_layout(layout: &[LayoutItem]) -> Result<(), LayoutError> {
    let mut seen = HashSet::with_capacity(layout.len());
    for item in layout {
        if !seen.insert(item.id.as_str()) {
            return Err(LayoutError::DuplicateId(item.id.clone()));
        }
        if item.w < 1 || item.h < 1 {
            return Err(LayoutError::InvalidItem {
                id: item.id.clone(),
                reason: format!("size {}x{} must be at least 1x1", item.w, item.h),
            });
        }
        if let (Some(min), Some(max)) = (item.min_w, item.max_w) {
            if min > max {
                return Err(LayoutError::InvalidItem {
                    id: item.id.clone(),
                    reason: format!("minW {min} exceeds maxW {max}"),
                });
            }
        }
        if let (Some(min), Some(max)) = (item.min_h, item.max_h) {
            if min > max {
                return Err(LayoutError::InvalidItem {
                    id: item.id.clone(),
                    reason: format!("minH {min} exceeds maxH {max}"),
                });
            }
        }
    }
    Ok(())
}
