//! Grid configuration and pixel-space primitives.

use serde::{Deserialize, Serialize};

/// Four-sided spacing in pixels, used for gaps and container padding.
///
/// Gaps between neighbouring cells are read from the leading sides:
/// [`Spacing::horizontal`] is the gap between columns and
/// [`Spacing::vertical`] the gap between rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    /// Top spacing
    pub top: f32,
    /// Right spacing
    pub right: f32,
    /// Bottom spacing
    pub bottom: f32,
    /// Left spacing
    pub left: f32,
}

impl Spacing {
    /// No spacing.
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// Create spacing with explicit sides.
    #[must_use]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same spacing on every side.
    #[must_use]
    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Vertical (top/bottom) and horizontal (left/right) spacing.
    #[must_use]
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Horizontal gap between columns.
    #[must_use]
    pub const fn horizontal(&self) -> f32 {
        self.left
    }

    /// Vertical gap between rows.
    #[must_use]
    pub const fn vertical(&self) -> f32 {
        self.top
    }
}

/// Everything needed to convert between grid units and pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionParams {
    /// Number of columns
    pub cols: i32,
    /// Height of one row in pixels
    pub row_height: f32,
    /// Maximum number of rows (`None` = unbounded)
    pub max_rows: Option<i32>,
    /// Measured container width in pixels
    pub container_width: f32,
    /// Spacing between cells
    pub gap: Spacing,
    /// Padding inside the container
    pub container_padding: Spacing,
}

impl Default for PositionParams {
    fn default() -> Self {
        Self {
            cols: 12,
            row_height: 150.0,
            max_rows: None,
            container_width: 1200.0,
            gap: Spacing::uniform(10.0),
            container_padding: Spacing::uniform(10.0),
        }
    }
}

impl PositionParams {
    /// Create params with no gaps or padding.
    #[must_use]
    pub const fn new(cols: i32, row_height: f32, container_width: f32) -> Self {
        Self {
            cols,
            row_height,
            max_rows: None,
            container_width,
            gap: Spacing::ZERO,
            container_padding: Spacing::ZERO,
        }
    }

    /// Set the gap.
    #[must_use]
    pub const fn with_gap(mut self, gap: Spacing) -> Self {
        self.gap = gap;
        self
    }

    /// Set the container padding.
    #[must_use]
    pub const fn with_padding(mut self, padding: Spacing) -> Self {
        self.container_padding = padding;
        self
    }

    /// Set the row ceiling.
    #[must_use]
    pub const fn with_max_rows(mut self, max_rows: Option<i32>) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Row ceiling with `None` mapped to `i32::MAX`.
    #[must_use]
    pub fn row_limit(&self) -> i32 {
        self.max_rows.unwrap_or(i32::MAX)
    }
}

/// Pixel rectangle of a rendered item, relative to the container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelPosition {
    /// Distance from the container top
    pub top: f32,
    /// Distance from the container left edge
    pub left: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl PixelPosition {
    /// Create a new pixel rectangle.
    #[must_use]
    pub const fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }
}

/// Resize handle positions, named by compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    /// Bottom edge
    S,
    /// Left edge
    W,
    /// Right edge
    E,
    /// Top edge
    N,
    /// Bottom-left corner
    Sw,
    /// Top-left corner
    Nw,
    /// Bottom-right corner
    #[default]
    Se,
    /// Top-right corner
    Ne,
}

impl ResizeHandle {
    /// All handles.
    pub const ALL: [Self; 8] = [
        Self::S,
        Self::W,
        Self::E,
        Self::N,
        Self::Sw,
        Self::Nw,
        Self::Se,
        Self::Ne,
    ];

    /// Handle drags the west edge, so the east edge stays anchored.
    #[must_use]
    pub const fn moves_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Handle drags the north edge, so the south edge stays anchored.
    #[must_use]
    pub const fn moves_north(self) -> bool {
        matches!(self, Self::N | Self::Nw | Self::Ne)
    }

    /// Handle drags the east edge.
    #[must_use]
    pub const fn moves_east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    /// Handle drags the south edge.
    #[must_use]
    pub const fn moves_south(self) -> bool {
        matches!(self, Self::S | Self::Sw | Self::Se)
    }
}
