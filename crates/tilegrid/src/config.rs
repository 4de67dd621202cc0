//! Grid configuration loaded from YAML, TOML or JSON.

use serde::{Deserialize, Serialize};
use tilegrid_core::{LayoutError, PositionParams, Spacing};
use tilegrid_layout::{
    BreakpointCols, Breakpoints, Compactor, CompactorKind, MissingLayoutStrategy,
    ResponsiveResolver,
};
use tracing::{debug, warn};

/// Spacing written either as one number or per side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpacingConfig {
    /// Same spacing on every side
    Uniform(f32),
    /// Explicit sides; missing sides are 0
    Sides(Spacing),
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self::Uniform(10.0)
    }
}

impl From<SpacingConfig> for Spacing {
    fn from(config: SpacingConfig) -> Self {
        match config {
            SpacingConfig::Uniform(value) => Self::uniform(value),
            SpacingConfig::Sides(spacing) => spacing,
        }
    }
}

/// Per-breakpoint settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsiveConfig {
    /// Breakpoint name to minimum width in pixels
    pub breakpoints: Breakpoints,
    /// Breakpoint name to column count
    pub cols: BreakpointCols,
    /// Policy for breakpoints without a layout
    pub missing_layout_strategy: MissingLayoutStrategy,
}

/// Grid settings a host keeps in its config file.
///
/// ```yaml
/// cols: 12
/// row_height: 150
/// gap: 10
/// compact_type: vertical
/// responsive:
///   breakpoints: { lg: 1200, md: 996, sm: 768 }
///   cols: { lg: 12, md: 10, sm: 6 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Column count
    pub cols: i32,
    /// Row height in pixels
    pub row_height: f32,
    /// Row limit (`None` = unbounded)
    pub max_rows: Option<i32>,
    /// Space between items
    pub gap: SpacingConfig,
    /// Space inside the container edge (`None` = same as `gap`)
    pub container_padding: Option<SpacingConfig>,
    /// Packing strategy
    pub compact_type: CompactorKind,
    /// Let items overlap freely
    pub allow_overlap: bool,
    /// Reject moves onto occupied cells
    pub prevent_collision: bool,
    /// Breakpoint settings
    pub responsive: Option<ResponsiveConfig>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: 12,
            row_height: 150.0,
            max_rows: None,
            gap: SpacingConfig::default(),
            container_padding: None,
            compact_type: CompactorKind::Vertical,
            allow_overlap: false,
            prevent_collision: false,
            responsive: None,
        }
    }
}

impl GridConfig {
    /// Parse and validate YAML.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Config`] for malformed or invalid input.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, LayoutError> {
        let config: Self =
            serde_yaml_ng::from_str(yaml).map_err(|e| LayoutError::Config(e.to_string()))?;
        config.loaded("yaml")
    }

    /// Parse and validate TOML.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Config`] for malformed or invalid input.
    pub fn from_toml_str(toml: &str) -> Result<Self, LayoutError> {
        let config: Self = toml::from_str(toml).map_err(|e| LayoutError::Config(e.to_string()))?;
        config.loaded("toml")
    }

    /// Parse and validate JSON.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Config`] for malformed or invalid input.
    pub fn from_json_str(json: &str) -> Result<Self, LayoutError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| LayoutError::Config(e.to_string()))?;
        config.loaded("json")
    }

    fn loaded(self, format: &str) -> Result<Self, LayoutError> {
        if let Err(err) = self.validate() {
            warn!(format, %err, "rejected grid config");
            return Err(err);
        }
        debug!(
            format,
            cols = self.cols,
            compactor = ?self.compact_type,
            breakpoints = self.responsive.as_ref().map_or(0, |r| r.breakpoints.len()),
            "loaded grid config"
        );
        Ok(self)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Config`] if serialization fails.
    pub fn to_yaml_string(&self) -> Result<String, LayoutError> {
        serde_yaml_ng::to_string(self).map_err(|e| LayoutError::Config(e.to_string()))
    }

    /// Check values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Config`] for non-positive sizes and
    /// [`LayoutError::MissingCols`] for a breakpoint without a column count.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.cols <= 0 {
            return Err(LayoutError::Config(format!("cols must be positive, got {}", self.cols)));
        }
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(LayoutError::Config(format!(
                "row_height must be positive, got {}",
                self.row_height
            )));
        }
        if let Some(max_rows) = self.max_rows.filter(|&rows| rows <= 0) {
            return Err(LayoutError::Config(format!(
                "max_rows must be positive, got {max_rows}"
            )));
        }
        if let Some(responsive) = &self.responsive {
            for name in responsive.breakpoints.keys() {
                match responsive.cols.get(name) {
                    None => return Err(LayoutError::MissingCols(name.clone())),
                    Some(&cols) if cols <= 0 => {
                        return Err(LayoutError::Config(format!(
                            "cols for breakpoint `{name}` must be positive, got {cols}"
                        )));
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }

    /// Position parameters for a container of `container_width` pixels.
    #[must_use]
    pub fn position_params(&self, container_width: f32) -> PositionParams {
        let gap = Spacing::from(self.gap);
        let padding = self.container_padding.map_or(gap, Spacing::from);
        PositionParams::new(self.cols, self.row_height, container_width)
            .with_gap(gap)
            .with_padding(padding)
            .with_max_rows(self.max_rows)
    }

    /// Compactor for these settings.
    #[must_use]
    pub fn compactor(&self) -> Compactor {
        Compactor::new(self.compact_type)
            .with_allow_overlap(self.allow_overlap)
            .with_prevent_collision(self.prevent_collision)
    }

    /// Breakpoint resolver, if breakpoints are configured.
    #[must_use]
    pub fn responsive_resolver(&self) -> Option<ResponsiveResolver> {
        self.responsive.as_ref().map(|responsive| {
            ResponsiveResolver::new(
                responsive.breakpoints.clone(),
                responsive.cols.clone(),
                self.compactor(),
            )
            .with_missing_layout_strategy(responsive.missing_layout_strategy)
        })
    }
}
