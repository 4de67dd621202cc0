//! Position and size constraints.
//!
//! Constraints are stateless limiters consulted while a drag or resize is in
//! flight. The grid-wide list runs first, then the item's own list, each
//! stage consuming the previous stage's output:
//!
//! ```text
//! proposed ─▶ grid[0] ─▶ grid[1] ─▶ … ─▶ item[0] ─▶ … ─▶ final
//! ```

use crate::calc::{calc_grid_col_width, clamp};
use crate::error::LayoutError;
use crate::geometry::{PositionParams, ResizeHandle, Spacing};
use crate::item::LayoutItem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Read-only snapshot handed to every constraint.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintContext<'a> {
    /// Number of columns
    pub cols: i32,
    /// Row ceiling (`None` = unbounded)
    pub max_rows: Option<i32>,
    /// Container width in pixels
    pub container_width: f32,
    /// Measured container height in pixels (0 = unknown)
    pub container_height: f32,
    /// Row height in pixels
    pub row_height: f32,
    /// Spacing between cells
    pub gap: Spacing,
    /// Container padding
    pub container_padding: Spacing,
    /// The whole current layout, for cross-item rules
    pub layout: &'a [LayoutItem],
}

impl<'a> ConstraintContext<'a> {
    /// Build a context from position params.
    #[must_use]
    pub const fn new(
        params: &PositionParams,
        container_height: f32,
        layout: &'a [LayoutItem],
    ) -> Self {
        Self {
            cols: params.cols,
            max_rows: params.max_rows,
            container_width: params.container_width,
            container_height,
            row_height: params.row_height,
            gap: params.gap,
            container_padding: params.container_padding,
            layout,
        }
    }

    /// Row ceiling with `None` mapped to `i32::MAX`.
    #[must_use]
    pub fn row_limit(&self) -> i32 {
        self.max_rows.unwrap_or(i32::MAX)
    }

    fn position_params(&self) -> PositionParams {
        PositionParams {
            cols: self.cols,
            row_height: self.row_height,
            max_rows: self.max_rows,
            container_width: self.container_width,
            gap: self.gap,
            container_padding: self.container_padding,
        }
    }
}

/// Capability set of a constraint.
///
/// Both hooks default to passing the proposal through, so an implementor
/// only overrides the stage it cares about.
pub trait LayoutConstraint: fmt::Debug + Send + Sync {
    /// Display name used in diagnostics.
    fn name(&self) -> String;

    /// Limit a proposed top-left position.
    fn constrain_position(
        &self,
        _item: &LayoutItem,
        x: i32,
        y: i32,
        _ctx: &ConstraintContext<'_>,
    ) -> (i32, i32) {
        (x, y)
    }

    /// Limit a proposed size. `handle` is the active resize handle, if any.
    fn constrain_size(
        &self,
        _item: &LayoutItem,
        w: i32,
        h: i32,
        _handle: Option<ResizeHandle>,
        _ctx: &ConstraintContext<'_>,
    ) -> (i32, i32) {
        (w, h)
    }
}

/// A host-supplied constraint shared between layouts.
///
/// Equality is identity of the shared allocation.
#[derive(Debug, Clone)]
pub struct CustomConstraint(pub Arc<dyn LayoutConstraint>);

impl PartialEq for CustomConstraint {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Built-in constraints plus an escape hatch for custom ones.
///
/// Deserializing goes through the same checks as the constructors, so a
/// persisted `snapToGrid` with a step ≤ 0 is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "kind",
    rename_all = "camelCase",
    rename_all_fields = "camelCase",
    try_from = "StoredConstraint"
)]
pub enum Constraint {
    /// Keep the item on the grid; resize limits depend on the handle.
    GridBounds,
    /// Honour the item's own `min_*`/`max_*`.
    MinMaxSize,
    /// Keep the item within the rows visible in the measured container.
    ContainerBounds,
    /// Clamp x only.
    BoundedX,
    /// Clamp y only.
    BoundedY,
    /// Derive height from width so the pixel box keeps `ratio` (w / h).
    AspectRatio {
        /// Width divided by height
        ratio: f32,
    },
    /// Round positions to a coarser grid.
    SnapToGrid {
        /// Horizontal step
        step_x: i32,
        /// Vertical step
        step_y: i32,
    },
    /// Size floor.
    MinSize {
        /// Minimum width
        w: i32,
        /// Minimum height
        h: i32,
    },
    /// Size ceiling.
    MaxSize {
        /// Maximum width
        w: i32,
        /// Maximum height
        h: i32,
    },
    /// Host-defined behaviour; not serializable.
    #[serde(skip)]
    Custom(CustomConstraint),
}

impl Constraint {
    /// Aspect-ratio lock.
    #[must_use]
    pub const fn aspect_ratio(ratio: f32) -> Self {
        Self::AspectRatio { ratio }
    }

    /// Snap positions to multiples of the given steps.
    ///
    /// Fails fast on a step ≤ 0.
    pub fn snap_to_grid(step_x: i32, step_y: i32) -> Result<Self, LayoutError> {
        if step_x <= 0 || step_y <= 0 {
            return Err(LayoutError::InvalidSnapStep { step_x, step_y });
        }
        Ok(Self::SnapToGrid { step_x, step_y })
    }

    /// Minimum size.
    #[must_use]
    pub const fn min_size(w: i32, h: i32) -> Self {
        Self::MinSize { w, h }
    }

    /// Maximum size.
    #[must_use]
    pub const fn max_size(w: i32, h: i32) -> Self {
        Self::MaxSize { w, h }
    }

    /// Wrap a host-defined constraint.
    #[must_use]
    pub fn custom(constraint: impl LayoutConstraint + 'static) -> Self {
        Self::Custom(CustomConstraint(Arc::new(constraint)))
    }
}

/// Wire form of the serializable [`Constraint`] variants.
#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
enum StoredConstraint {
    GridBounds,
    MinMaxSize,
    ContainerBounds,
    BoundedX,
    BoundedY,
    AspectRatio { ratio: f32 },
    SnapToGrid { step_x: i32, step_y: i32 },
    MinSize { w: i32, h: i32 },
    MaxSize { w: i32, h: i32 },
}

impl TryFrom<StoredConstraint> for Constraint {
    type Error = LayoutError;

    fn try_from(stored: StoredConstraint) -> Result<Self, Self::Error> {
        Ok(match stored {
            StoredConstraint::GridBounds => Self::GridBounds,
            StoredConstraint::MinMaxSize => Self::MinMaxSize,
            StoredConstraint::ContainerBounds => Self::ContainerBounds,
            StoredConstraint::BoundedX => Self::BoundedX,
            StoredConstraint::BoundedY => Self::BoundedY,
            StoredConstraint::AspectRatio { ratio } => Self::aspect_ratio(ratio),
            StoredConstraint::SnapToGrid { step_x, step_y } => Self::snap_to_grid(step_x, step_y)?,
            StoredConstraint::MinSize { w, h } => Self::min_size(w, h),
            StoredConstraint::MaxSize { w, h } => Self::max_size(w, h),
        })
    }
}

/// The grid-wide list used when the host configures nothing else.
#[must_use]
pub fn default_constraints() -> Vec<Constraint> {
    vec![Constraint::GridBounds, Constraint::MinMaxSize]
}

fn round_to_step(value: i32, step: i32) -> i32 {
    if step <= 0 {
        return value;
    }
    ((value as f32 / step as f32).round() as i32) * step
}

impl LayoutConstraint for Constraint {
    fn name(&self) -> String {
        match self {
            Self::GridBounds => "gridBounds".to_string(),
            Self::MinMaxSize => "minMaxSize".to_string(),
            Self::ContainerBounds => "containerBounds".to_string(),
            Self::BoundedX => "boundedX".to_string(),
            Self::BoundedY => "boundedY".to_string(),
            Self::AspectRatio { ratio } => format!("aspectRatio({ratio})"),
            Self::SnapToGrid { step_x, step_y } => format!("snapToGrid({step_x}, {step_y})"),
            Self::MinSize { w, h } => format!("minSize({w}, {h})"),
            Self::MaxSize { w, h } => format!("maxSize({w}, {h})"),
            Self::Custom(custom) => custom.0.name(),
        }
    }

    fn constrain_position(
        &self,
        item: &LayoutItem,
        x: i32,
        y: i32,
        ctx: &ConstraintContext<'_>,
    ) -> (i32, i32) {
        let max_x = (ctx.cols - item.w).max(0);
        match self {
            Self::GridBounds => (
                clamp(x, 0, max_x),
                clamp(y, 0, ctx.row_limit().saturating_sub(item.h).max(0)),
            ),
            Self::ContainerBounds => {
                let row_pitch = ctx.row_height + ctx.gap.vertical();
                let visible_rows = if ctx.container_height > 0.0 && row_pitch > 0.0 {
                    ((ctx.container_height + ctx.gap.vertical()) / row_pitch).floor() as i32
                } else {
                    ctx.row_limit()
                };
                (
                    clamp(x, 0, max_x),
                    clamp(y, 0, visible_rows.saturating_sub(item.h).max(0)),
                )
            }
            Self::BoundedX => (clamp(x, 0, max_x), y),
            Self::BoundedY => (x, clamp(y, 0, ctx.row_limit().saturating_sub(item.h).max(0))),
            Self::SnapToGrid { step_x, step_y } => {
                (round_to_step(x, *step_x), round_to_step(y, *step_y))
            }
            Self::Custom(custom) => custom.0.constrain_position(item, x, y, ctx),
            Self::MinMaxSize
            | Self::AspectRatio { .. }
            | Self::MinSize { .. }
            | Self::MaxSize { .. } => (x, y),
        }
    }

    fn constrain_size(
        &self,
        item: &LayoutItem,
        w: i32,
        h: i32,
        handle: Option<ResizeHandle>,
        ctx: &ConstraintContext<'_>,
    ) -> (i32, i32) {
        match self {
            Self::GridBounds => {
                let west = handle.is_some_and(ResizeHandle::moves_west);
                let north = handle.is_some_and(ResizeHandle::moves_north);
                let max_w = if west { item.x + item.w } else { ctx.cols - item.x };
                let max_h = if north {
                    item.y + item.h
                } else {
                    ctx.row_limit().saturating_sub(item.y)
                };
                (clamp(w, 1, max_w.max(1)), clamp(h, 1, max_h.max(1)))
            }
            Self::MinMaxSize => (
                clamp(w, item.min_w.unwrap_or(1), item.max_w.unwrap_or(i32::MAX)),
                clamp(h, item.min_h.unwrap_or(1), item.max_h.unwrap_or(i32::MAX)),
            ),
            Self::AspectRatio { ratio } => {
                if !(ratio.is_finite() && *ratio > 0.0) {
                    return (w, h);
                }
                let col_width = calc_grid_col_width(&ctx.position_params());
                let gap_x = ctx.gap.horizontal();
                let gap_y = ctx.gap.vertical();
                let pixel_width = col_width * w as f32 + gap_x * (w - 1).max(0) as f32;
                let pixel_height = pixel_width / ratio;
                let row_pitch = ctx.row_height + gap_y;
                if row_pitch <= 0.0 {
                    return (w, h);
                }
                let new_h = ((pixel_height + gap_y) / row_pitch).round() as i32;
                (w, new_h.max(1))
            }
            Self::MinSize { w: min_w, h: min_h } => (w.max(*min_w), h.max(*min_h)),
            Self::MaxSize { w: max_w, h: max_h } => (w.min(*max_w), h.min(*max_h)),
            Self::Custom(custom) => custom.0.constrain_size(item, w, h, handle, ctx),
            Self::ContainerBounds | Self::BoundedX | Self::BoundedY | Self::SnapToGrid { .. } => {
                (w, h)
            }
        }
    }
}

/// Fold a proposed position through the grid-wide and per-item constraints.
#[must_use]
pub fn apply_position_constraints(
    constraints: &[Constraint],
    item: &LayoutItem,
    x: i32,
    y: i32,
    ctx: &ConstraintContext<'_>,
) -> (i32, i32) {
    constraints
        .iter()
        .chain(item.constraints.iter())
        .fold((x, y), |(x, y), c| c.constrain_position(item, x, y, ctx))
}

/// Fold a proposed size through the grid-wide and per-item constraints.
#[must_use]
pub fn apply_size_constraints(
    constraints: &[Constraint],
    item: &LayoutItem,
    w: i32,
    h: i32,
    handle: Option<ResizeHandle>,
    ctx: &ConstraintContext<'_>,
) -> (i32, i32) {
    constraints
        .iter()
        .chain(item.constraints.iter())
        .fold((w, h), |(w, h), c| c.constrain_size(item, w, h, handle, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> PositionParams {
        PositionParams::new(12, 100.0, 1200.0).with_max_rows(Some(10))
    }

    fn ctx<'a>(params: &PositionParams, layout: &'a [LayoutItem]) -> ConstraintContext<'a> {
        ConstraintContext::new(params, 0.0, layout)
    }

    // =========================================================================
    // Grid Bounds Tests
    // =========================================================================

    #[test]
    fn test_grid_bounds_position() {
        let p = params();
        let c = ctx(&p, &[]);
        let item = LayoutItem::new("a", 0, 0, 4, 3);
        assert_eq!(Constraint::GridBounds.constrain_position(&item, -2, -5, &c), (0, 0));
        assert_eq!(Constraint::GridBounds.constrain_position(&item, 11, 9, &c), (8, 7));
        assert_eq!(Constraint::GridBounds.constrain_position(&item, 3, 4, &c), (3, 4));
    }

    #[test]
    fn test_grid_bounds_size_southeast() {
        let p = params();
        let c = ctx(&p, &[]);
        let item = LayoutItem::new("a", 8, 6, 2, 2);
        let out = Constraint::GridBounds.constrain_size(&item, 10, 10, Some(ResizeHandle::Se), &c);
        assert_eq!(out, (4, 4));
        let out = Constraint::GridBounds.constrain_size(&item, 0, -3, Some(ResizeHandle::Se), &c);
        assert_eq!(out, (1, 1));
    }

    #[test]
    fn test_grid_bounds_size_northwest_anchors_opposite_edge() {
        let p = params();
        let c = ctx(&p, &[]);
        let item = LayoutItem::new("a", 8, 6, 2, 2);
        let out = Constraint::GridBounds.constrain_size(&item, 20, 20, Some(ResizeHandle::Nw), &c);
        assert_eq!(out, (10, 8));
    }

    #[test]
    fn test_grid_bounds_unbounded_rows() {
        let p = PositionParams::new(12, 100.0, 1200.0);
        let c = ctx(&p, &[]);
        let item = LayoutItem::new("a", 0, 0, 1, 1);
        assert_eq!(
            Constraint::GridBounds.constrain_position(&item, 0, 5000, &c),
            (0, 5000)
        );
    }

    // =========================================================================
    // Size Constraint Tests
    // =========================================================================

    #[test]
    fn test_min_max_size_uses_item_limits() {
        let p = params();
        let c = ctx(&p, &[]);
        let item = LayoutItem::new("a", 0, 0, 2, 2)
            .with_min_size(2, 1)
            .with_max_size(4, 3);
        assert_eq!(Constraint::MinMaxSize.constrain_size(&item, 1, 9, None, &c), (2, 3));
        assert_eq!(Constraint::MinMaxSize.constrain_size(&item, 3, 2, None, &c), (3, 2));
    }

    #[test]
    fn test_min_max_size_defaults() {
        let p = params();
        let c = ctx(&p, &[]);
        let item = LayoutItem::new("a", 0, 0, 2, 2);
        assert_eq!(Constraint::MinMaxSize.constrain_size(&item, 0, 500, None, &c), (1, 500));
    }

    #[test]
    fn test_min_and_max_size() {
        let p = params();
        let c = ctx(&p, &[]);
        let item = LayoutItem::new("a", 0, 0, 2, 2);
        assert_eq!(Constraint::min_size(3, 2).constrain_size(&item, 1, 5, None, &c), (3, 5));
        assert_eq!(Constraint::max_size(3, 2).constrain_size(&item, 1, 5, None, &c), (1, 2));
    }

    #[test]
    fn test_aspect_ratio_square() {
        // colWidth 100, rowHeight 100, no gap
        let p = PositionParams::new(12, 100.0, 1200.0);
        let c = ctx(&p, &[]);
        let item = LayoutItem::new("a", 0, 0, 2, 1);
        assert_eq!(Constraint::aspect_ratio(1.0).constrain_size(&item, 2, 7, None, &c), (2, 2));
    }

    #[test]
    fn test_aspect_ratio_wide() {
        let p = PositionParams::new(12, 100.0, 1200.0);
        let c = ctx(&p, &[]);
        let item = LayoutItem::new("a", 0, 0, 4, 1);
        assert_eq!(Constraint::aspect_ratio(2.0).constrain_size(&item, 4, 1, None, &c), (4, 2));
        // Never below one row.
        assert_eq!(Constraint::aspect_ratio(50.0).constrain_size(&item, 1, 3, None, &c), (1, 1));
    }

    #[test]
    fn test_aspect_ratio_invalid_ratio_passthrough() {
        let p = params();
        let c = ctx(&p, &[]);
        let item = LayoutItem::new("a", 0, 0, 2, 1);
        assert_eq!(Constraint::aspect_ratio(0.0).constrain_size(&item, 2, 3, None, &c), (2, 3));
    }

    // =========================================================================
    // Position Constraint Tests
    // =========================================================================

    #[test]
    fn test_bounded_axes() {
        let p = params();
        let c = ctx(&p, &[]);
        let item = LayoutItem::new("a", 0, 0, 2, 2);
        assert_eq!(Constraint::BoundedX.constrain_position(&item, 20, 50, &c), (10, 50));
        assert_eq!(Constraint::BoundedY.constrain_position(&item, 20, 50, &c), (20, 8));
    }

    #[test]
    fn test_container_bounds_uses_visible_rows() {
        let p = params();
        // 450px tall container with 100px rows → 4 visible rows
        let c = ConstraintContext::new(&p, 450.0, &[]);
        let item = LayoutItem::new("a", 0, 0, 1, 2);
        assert_eq!(Constraint::ContainerBounds.constrain_position(&item, 0, 9, &c), (0, 2));
    }

    #[test]
    fn test_container_bounds_unknown_height_falls_back_to_max_rows() {
        let p = params();
        let c = ctx(&p, &[]);
        let item = LayoutItem::new("a", 0, 0, 1, 2);
        assert_eq!(Constraint::ContainerBounds.constrain_position(&item, 0, 9, &c), (0, 8));
    }

    #[test]
    fn test_snap_to_grid() {
        let p = params();
        let c = ctx(&p, &[]);
        let item = LayoutItem::new("a", 0, 0, 1, 1);
        let snap = Constraint::snap_to_grid(3, 2).unwrap();
        assert_eq!(snap.constrain_position(&item, 4, 3, &c), (3, 4));
        assert_eq!(snap.constrain_position(&item, 5, 0, &c), (6, 0));
    }

    #[test]
    fn test_snap_to_grid_rejects_non_positive() {
        assert_eq!(
            Constraint::snap_to_grid(0, 2),
            Err(LayoutError::InvalidSnapStep {
                step_x: 0,
                step_y: 2
            })
        );
        assert!(Constraint::snap_to_grid(2, -1).is_err());
    }

    // =========================================================================
    // Pipeline Tests
    // =========================================================================

    #[derive(Debug)]
    struct EvenColumns;

    impl LayoutConstraint for EvenColumns {
        fn name(&self) -> String {
            "evenColumns".to_string()
        }

        fn constrain_position(
            &self,
            _item: &LayoutItem,
            x: i32,
            y: i32,
            _ctx: &ConstraintContext<'_>,
        ) -> (i32, i32) {
            (x - x % 2, y)
        }
    }

    #[test]
    fn test_pipeline_runs_grid_then_item_constraints() {
        let p = params();
        let c = ctx(&p, &[]);
        let item = LayoutItem::new("a", 0, 0, 2, 2).with_constraint(Constraint::custom(EvenColumns));
        // gridBounds clamps 11 → 10, then the item constraint rounds down to even.
        let out = apply_position_constraints(&default_constraints(), &item, 11, 3, &c);
        assert_eq!(out, (10, 3));
        let out = apply_position_constraints(&default_constraints(), &item, 7, 3, &c);
        assert_eq!(out, (6, 3));
    }

    #[test]
    fn test_pipeline_order_matters() {
        let p = params();
        let c = ctx(&p, &[]);
        let item = LayoutItem::new("a", 0, 0, 1, 1);
        let grow_then_cap = [Constraint::min_size(5, 5), Constraint::max_size(3, 3)];
        let cap_then_grow = [Constraint::max_size(3, 3), Constraint::min_size(5, 5)];
        assert_eq!(apply_size_constraints(&grow_then_cap, &item, 1, 1, None, &c), (3, 3));
        assert_eq!(apply_size_constraints(&cap_then_grow, &item, 1, 1, None, &c), (5, 5));
    }

    #[test]
    fn test_pipeline_empty_is_identity() {
        let p = params();
        let c = ctx(&p, &[]);
        let item = LayoutItem::new("a", 0, 0, 1, 1);
        assert_eq!(apply_position_constraints(&[], &item, -4, 99, &c), (-4, 99));
        assert_eq!(apply_size_constraints(&[], &item, 0, 0, None, &c), (0, 0));
    }

    #[test]
    fn test_constraint_names() {
        assert_eq!(Constraint::GridBounds.name(), "gridBounds");
        assert_eq!(Constraint::aspect_ratio(1.5).name(), "aspectRatio(1.5)");
        assert_eq!(Constraint::custom(EvenColumns).name(), "evenColumns");
    }

    #[test]
    fn test_custom_constraint_equality_is_identity() {
        let a = Constraint::custom(EvenColumns);
        let b = Constraint::custom(EvenColumns);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_constraint_serde() {
        let json = serde_json::to_string(&Constraint::snap_to_grid(2, 2).unwrap()).unwrap();
        assert_eq!(json, r#"{"kind":"snapToGrid","stepX":2,"stepY":2}"#);
        let back: Constraint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Constraint::snap_to_grid(2, 2).unwrap());
        let back: Constraint = serde_json::from_str(r#"{"kind":"gridBounds"}"#).unwrap();
        assert_eq!(back, Constraint::GridBounds);
    }

    #[test]
    fn test_stored_snap_with_zero_step_is_rejected() {
        let err = serde_json::from_str::<Constraint>(r#"{"kind":"snapToGrid","stepX":0,"stepY":0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("must be positive"));
        assert!(
            serde_json::from_str::<Constraint>(r#"{"kind":"snapToGrid","stepX":3,"stepY":-1}"#)
                .is_err()
        );
    }

    #[test]
    fn test_hand_built_zero_step_leaves_position_alone() {
        let p = params();
        let c = ctx(&p, &[]);
        let item = LayoutItem::new("a", 0, 0, 1, 1);
        let snap = Constraint::SnapToGrid { step_x: 0, step_y: 0 };
        assert_eq!(apply_position_constraints(&[snap], &item, 7, 5, &c), (7, 5));
    }
}
