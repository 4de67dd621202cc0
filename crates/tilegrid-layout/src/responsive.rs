//! Breakpoint selection and per-breakpoint layouts.
//!
//! A host keeps one layout per named breakpoint. When the container width
//! crosses into a breakpoint with no layout of its own, one is derived
//! from the nearest wider breakpoint that has one, fitted to the new
//! column count and recompacted.

use crate::bounds::correct_bounds;
use crate::compact::{Compactor, LayoutCompactor};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tilegrid_core::{Layout, LayoutError};

/// Breakpoint name to minimum container width in pixels.
pub type Breakpoints = HashMap<String, f32>;

/// Breakpoint name to column count.
pub type BreakpointCols = HashMap<String, i32>;

/// Breakpoint name to layout.
pub type ResponsiveLayouts = HashMap<String, Layout>;

/// What to do when a breakpoint has no layout of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingLayoutStrategy {
    /// Warn the first time per breakpoint, then derive
    #[default]
    WarnOnce,
    /// Warn every time, then derive
    Warn,
    /// Derive silently
    Derive,
    /// Use an empty layout
    Empty,
    /// Fail with [`LayoutError::MissingLayout`]
    Error,
}

/// Breakpoint names ordered by ascending width, ties by name.
#[must_use]
pub fn sort_breakpoints(breakpoints: &Breakpoints) -> Vec<String> {
    let mut names: Vec<(&String, f32)> = breakpoints.iter().map(|(k, &v)| (k, v)).collect();
    names.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    names.into_iter().map(|(name, _)| name.clone()).collect()
}

/// Widest breakpoint whose threshold is at most `width`.
///
/// Widths below every threshold select the narrowest breakpoint.
///
/// # Errors
///
/// Returns [`LayoutError::NoBreakpoints`] if `breakpoints` is empty.
pub fn get_breakpoint_from_width(breakpoints: &Breakpoints, width: f32) -> Result<String, LayoutError> {
    let sorted = sort_breakpoints(breakpoints);
    let mut matching = sorted.first().ok_or(LayoutError::NoBreakpoints)?;
    for name in &sorted[1..] {
        if breakpoints.get(name).is_some_and(|&threshold| width >= threshold) {
            matching = name;
        }
    }
    Ok(matching.clone())
}

/// Column count configured for `breakpoint`.
///
/// # Errors
///
/// Returns [`LayoutError::MissingCols`] if there is no entry.
pub fn get_cols_from_breakpoint(breakpoint: &str, cols: &BreakpointCols) -> Result<i32, LayoutError> {
    cols.get(breakpoint)
        .copied()
        .ok_or_else(|| LayoutError::MissingCols(breakpoint.to_string()))
}

/// Layout to show at `breakpoint`.
///
/// An explicit layout is returned as is. Otherwise the nearest breakpoint
/// at or above this one with a layout is used, then `last_breakpoint`'s,
/// then an empty layout; the result is bounds-corrected to `cols` and
/// compacted.
#[must_use]
pub fn find_or_generate_responsive_layout<C: LayoutCompactor + ?Sized>(
    layouts: &ResponsiveLayouts,
    breakpoints: &Breakpoints,
    breakpoint: &str,
    last_breakpoint: &str,
    cols: i32,
    compactor: &C,
) -> Layout {
    if let Some(layout) = layouts.get(breakpoint) {
        return layout.clone();
    }

    let sorted = sort_breakpoints(breakpoints);
    let above = sorted
        .iter()
        .position(|name| name == breakpoint)
        .map_or(&sorted[..0], |at| &sorted[at..]);
    let base = above
        .iter()
        .find_map(|name| layouts.get(name))
        .or_else(|| layouts.get(last_breakpoint))
        .map_or_else(Vec::new, Clone::clone);

    compactor.compact(&correct_bounds(&base, cols), cols)
}

/// Layout picked for a container width.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLayout {
    /// Active breakpoint
    pub breakpoint: String,
    /// Column count at that breakpoint
    pub cols: i32,
    /// Layout to render
    pub layout: Layout,
}

/// Stateful breakpoint resolver.
///
/// Remembers which breakpoints already produced a
/// [`MissingLayoutStrategy::WarnOnce`] warning.
#[derive(Debug, Clone)]
pub struct ResponsiveResolver {
    breakpoints: Breakpoints,
    cols: BreakpointCols,
    compactor: Compactor,
    missing_layout_strategy: MissingLayoutStrategy,
    warned: HashSet<String>,
}

impl ResponsiveResolver {
    /// Create a resolver with the default missing-layout policy.
    #[must_use]
    pub fn new(breakpoints: Breakpoints, cols: BreakpointCols, compactor: Compactor) -> Self {
        Self {
            breakpoints,
            cols,
            compactor,
            missing_layout_strategy: MissingLayoutStrategy::default(),
            warned: HashSet::new(),
        }
    }

    /// Set the missing-layout policy.
    #[must_use]
    pub fn with_missing_layout_strategy(mut self, strategy: MissingLayoutStrategy) -> Self {
        self.missing_layout_strategy = strategy;
        self
    }

    /// Configured breakpoints.
    #[must_use]
    pub fn breakpoints(&self) -> &Breakpoints {
        &self.breakpoints
    }

    /// Compactor used for derived layouts.
    #[must_use]
    pub fn compactor(&self) -> Compactor {
        self.compactor
    }

    /// Breakpoint for a container width.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::NoBreakpoints`] if none are configured.
    pub fn breakpoint_for_width(&self, width: f32) -> Result<String, LayoutError> {
        get_breakpoint_from_width(&self.breakpoints, width)
    }

    /// Column count for a breakpoint.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::MissingCols`] if it has none.
    pub fn cols_for(&self, breakpoint: &str) -> Result<i32, LayoutError> {
        get_cols_from_breakpoint(breakpoint, &self.cols)
    }

    /// Resolve the breakpoint, column count and layout for `width`.
    ///
    /// # Errors
    ///
    /// Fails if no breakpoints are configured, the selected breakpoint has
    /// no column count, or it has no layout under
    /// [`MissingLayoutStrategy::Error`].
    pub fn resolve(
        &mut self,
        layouts: &ResponsiveLayouts,
        width: f32,
        last_breakpoint: &str,
    ) -> Result<ResolvedLayout, LayoutError> {
        let breakpoint = self.breakpoint_for_width(width)?;
        let cols = self.cols_for(&breakpoint)?;
        if breakpoint != last_breakpoint {
            tracing::debug!("breakpoint {} -> {} ({} cols)", last_breakpoint, breakpoint, cols);
        }

        let layout = if let Some(layout) = layouts.get(&breakpoint) {
            layout.clone()
        } else {
            match self.missing_layout_strategy {
                MissingLayoutStrategy::Error => {
                    return Err(LayoutError::MissingLayout(breakpoint));
                }
                MissingLayoutStrategy::Empty => Layout::new(),
                strategy => {
                    let first_time = self.warned.insert(breakpoint.clone());
                    if strategy == MissingLayoutStrategy::Warn
                        || (strategy == MissingLayoutStrategy::WarnOnce && first_time)
                    {
                        tracing::warn!(
                            "no layout for breakpoint {}, deriving one from a neighbor",
                            breakpoint
                        );
                    }
                    find_or_generate_responsive_layout(
                        layouts,
                        &self.breakpoints,
                        &breakpoint,
                        last_breakpoint,
                        cols,
                        &self.compactor,
                    )
                }
            }
        };

        Ok(ResolvedLayout {
            breakpoint,
            cols,
            layout,
        })
    }

    /// Whether a warn-once message was already emitted for `breakpoint`.
    #[must_use]
    pub fn has_warned(&self, breakpoint: &str) -> bool {
        self.missing_layout_strategy == MissingLayoutStrategy::WarnOnce
            && self.warned.contains(breakpoint)
    }
}
