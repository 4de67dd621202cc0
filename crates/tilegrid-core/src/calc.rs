//! Pixel ⇄ grid-unit conversion.
//!
//! All functions are pure and take a [`PositionParams`] snapshot. Column
//! widths are fractional; pixel outputs are rounded to whole pixels.

use crate::geometry::{PixelPosition, PositionParams, ResizeHandle};

/// Clamp `num` into `[lower, upper]`.
///
/// Unlike [`Ord::clamp`] this never panics: when `lower > upper` the lower
/// bound wins, which is what every caller in the engine wants for items
/// wider than the grid.
#[must_use]
pub fn clamp<T: PartialOrd>(num: T, lower: T, upper: T) -> T {
    let capped = if num > upper { upper } else { num };
    if capped < lower {
        lower
    } else {
        capped
    }
}

/// Width of a single column in pixels.
///
/// Returns 0 for `cols <= 0` so a bad column count cannot leak NaN or
/// infinity into every position derived from it.
#[must_use]
pub fn calc_grid_col_width(params: &PositionParams) -> f32 {
    if params.cols <= 0 {
        return 0.0;
    }
    let cols = params.cols as f32;
    (params.container_width
        - params.gap.horizontal() * (cols - 1.0)
        - params.container_padding.left
        - params.container_padding.right)
        / cols
}

/// Pixel extent of `grid_units` cells of size `cell_size` separated by `gap_px`.
///
/// Infinite inputs pass through untouched so unconstrained maxima stay
/// representable.
#[must_use]
pub fn calc_grid_item_wh_px(grid_units: f32, cell_size: f32, gap_px: f32) -> f32 {
    if !grid_units.is_finite() {
        return grid_units;
    }
    (cell_size * grid_units + (grid_units - 1.0).max(0.0) * gap_px).round()
}

/// Live override applied while an item is being dragged or resized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LivePosition {
    /// Item follows the pointer; only top/left are overridden.
    Dragging {
        /// Current top in pixels
        top: f32,
        /// Current left in pixels
        left: f32,
    },
    /// Item is mid-resize; the whole rectangle is overridden.
    Resizing(PixelPosition),
}

/// Pixel rectangle for an item at grid position `(x, y)` with size `(w, h)`.
///
/// Width and height are nudged so the distance to the next cell boundary
/// equals the configured gap exactly, which keeps neighbours flush when the
/// column width is fractional.
#[must_use]
pub fn calc_grid_item_position(
    params: &PositionParams,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
) -> PixelPosition {
    calc_grid_item_position_live(params, x, y, w, h, None)
}

/// [`calc_grid_item_position`] with an optional drag/resize override.
///
/// The sibling-gap correction is skipped while an override is active.
#[must_use]
pub fn calc_grid_item_position_live(
    params: &PositionParams,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    live: Option<LivePosition>,
) -> PixelPosition {
    let col_width = calc_grid_col_width(params);
    let gap_x = params.gap.horizontal();
    let gap_y = params.gap.vertical();
    let pad_left = params.container_padding.left;
    let pad_top = params.container_padding.top;

    let mut out = match live {
        Some(LivePosition::Resizing(rect)) => PixelPosition::new(
            rect.top.round(),
            rect.left.round(),
            rect.width.round(),
            rect.height.round(),
        ),
        _ => PixelPosition::new(
            ((params.row_height + gap_y) * y as f32 + pad_top).round(),
            ((col_width + gap_x) * x as f32 + pad_left).round(),
            calc_grid_item_wh_px(w as f32, col_width, gap_x),
            calc_grid_item_wh_px(h as f32, params.row_height, gap_y),
        ),
    };

    match live {
        Some(LivePosition::Dragging { top, left }) => {
            out.top = top.round();
            out.left = left.round();
        }
        Some(LivePosition::Resizing(_)) => {}
        None => {
            let sibling_left = ((col_width + gap_x) * (x + w) as f32 + pad_left).round();
            let actual_gap_right = sibling_left - out.left - out.width;
            if actual_gap_right != gap_x {
                out.width += actual_gap_right - gap_x;
            }

            let sibling_top = ((params.row_height + gap_y) * (y + h) as f32 + pad_top).round();
            let actual_gap_bottom = sibling_top - out.top - out.height;
            if actual_gap_bottom != gap_y {
                out.height += actual_gap_bottom - gap_y;
            }
        }
    }

    out
}

/// Grid position nearest to a pixel offset, without clamping.
#[must_use]
pub fn calc_xy_raw(params: &PositionParams, top: f32, left: f32) -> (i32, i32) {
    let col_width = calc_grid_col_width(params);
    let col_pitch = col_width + params.gap.horizontal();
    let row_pitch = params.row_height + params.gap.vertical();

    let x = if col_pitch > 0.0 {
        ((left - params.container_padding.left) / col_pitch).round() as i32
    } else {
        0
    };
    let y = if row_pitch > 0.0 {
        ((top - params.container_padding.top) / row_pitch).round() as i32
    } else {
        0
    };
    (x, y)
}

/// Grid position for a drag, clamped so a `w`×`h` item stays on the grid.
#[must_use]
pub fn calc_xy(params: &PositionParams, top: f32, left: f32, w: i32, h: i32) -> (i32, i32) {
    let (x, y) = calc_xy_raw(params, top, left);
    (
        clamp(x, 0, params.cols - w),
        clamp(y, 0, params.row_limit().saturating_sub(h)),
    )
}

/// Grid size nearest to a pixel size, without clamping.
#[must_use]
pub fn calc_wh_raw(params: &PositionParams, width: f32, height: f32) -> (i32, i32) {
    let col_width = calc_grid_col_width(params);
    let gap_x = params.gap.horizontal();
    let gap_y = params.gap.vertical();
    let col_pitch = col_width + gap_x;
    let row_pitch = params.row_height + gap_y;

    let w = if col_pitch > 0.0 {
        ((width + gap_x) / col_pitch).round() as i32
    } else {
        0
    };
    let h = if row_pitch > 0.0 {
        ((height + gap_y) / row_pitch).round() as i32
    } else {
        0
    };
    (w, h)
}

/// Grid size for a resize of an item at `(x, y)`.
///
/// West-side handles anchor the east edge, so the width may use every
/// column; likewise north-side handles may use every row.
#[must_use]
pub fn calc_wh(
    params: &PositionParams,
    width: f32,
    height: f32,
    x: i32,
    y: i32,
    handle: ResizeHandle,
) -> (i32, i32) {
    let (w, h) = calc_wh_raw(params, width, height);
    let row_limit = params.row_limit();

    let w = if handle.moves_west() {
        clamp(w, 0, params.cols)
    } else {
        clamp(w, 0, params.cols - x)
    };
    let h = if handle.moves_north() {
        clamp(h, 0, row_limit)
    } else {
        clamp(h, 0, row_limit.saturating_sub(y))
    };
    (w, h)
}

/// Apply a pixel-level resize while keeping the item inside the container.
///
/// Handles on the north/west sides move the origin so the opposite edge
/// stays put; the result never extends past the left or top container edge
/// nor past `container_width` on the right.
#[must_use]
pub fn resize_item_in_direction(
    handle: ResizeHandle,
    current: PixelPosition,
    proposed: PixelPosition,
    container_width: f32,
) -> PixelPosition {
    let mut out = current;

    if handle.moves_east() {
        out.width = proposed.width.min(container_width - current.left).max(0.0);
    }
    if handle.moves_west() {
        let left = current.left - (proposed.width - current.width);
        if left < 0.0 {
            out.width = (proposed.width + left).max(0.0);
            out.left = 0.0;
        } else {
            out.width = proposed.width;
            out.left = left;
        }
    }
    if handle.moves_south() {
        out.height = proposed.height.max(0.0);
    }
    if handle.moves_north() {
        let top = current.top - (proposed.height - current.height);
        if top < 0.0 {
            out.height = (proposed.height + top).max(0.0);
            out.top = 0.0;
        } else {
            out.height = proposed.height;
            out.top = top;
        }
    }

    out
}
