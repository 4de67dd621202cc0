#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::doc_markdown)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Core types for the tilegrid layout engine.
//!
//! This crate provides the data model shared by every engine component:
//! - Layout items and whole-layout helpers: [`LayoutItem`], [`Layout`]
//! - Grid configuration: [`PositionParams`], [`Spacing`]
//! - Pixel ⇄ grid-unit math: [`calc_grid_col_width`], [`calc_xy`], [`calc_wh`]
//! - Drag/resize limiters: [`Constraint`], [`apply_position_constraints`]

mod calc;
mod constraint;
mod error;
mod geometry;
mod item;

pub use calc::{
    calc_grid_col_width, calc_grid_item_position, calc_grid_item_position_live,
    calc_grid_item_wh_px, calc_wh, calc_wh_raw, calc_xy, calc_xy_raw, clamp,
    resize_item_in_direction, LivePosition,
};
pub use constraint::{
    apply_position_constraints, apply_size_constraints, default_constraints, Constraint,
    ConstraintContext, CustomConstraint, LayoutConstraint,
};
pub use error::LayoutError;
pub use geometry::{PixelPosition, PositionParams, ResizeHandle, Spacing};
pub use item::{
    bottom, clone_layout, get_layout_item, get_statics, layout_index, modify_layout,
    validate_layout, with_layout_item, Layout, LayoutItem,
};
