//! Integration tests for tilegrid-layout.
//!
//! These tests drive the engine the way a host does: drag, compact, resize
//! the container, and persist the result.

use tilegrid_core::{
    apply_position_constraints, calc_xy, default_constraints, ConstraintContext, Layout,
    LayoutItem, PositionParams,
};
use tilegrid_layout::{
    correct_bounds, get_breakpoint_from_width, move_element, Breakpoints, BreakpointCols,
    Compactor, LayoutCompactor, MissingLayoutStrategy, ResponsiveLayouts, ResponsiveResolver,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn pos(layout: &[LayoutItem], id: &str) -> (i32, i32) {
    let item = layout.iter().find(|i| i.id == id).expect("item present");
    (item.x, item.y)
}

fn dashboard() -> Layout {
    vec![
        LayoutItem::new("header", 0, 0, 12, 1).with_static(true),
        LayoutItem::new("chart", 0, 1, 8, 4),
        LayoutItem::new("stats", 8, 1, 4, 2),
        LayoutItem::new("feed", 8, 3, 4, 4),
        LayoutItem::new("footer", 0, 5, 8, 2),
    ]
}

// =============================================================================
// Compaction Tests
// =============================================================================

#[test]
fn test_vertical_compaction_example() {
    let layout = vec![LayoutItem::new("a", 0, 5, 2, 2)];
    let out = Compactor::vertical().compact(&layout, 12);
    assert_eq!(pos(&out, "a"), (0, 0));
}

#[test]
fn test_dashboard_is_already_compact() {
    let layout = dashboard();
    assert_eq!(Compactor::vertical().compact(&layout, 12), layout);
}

#[test]
fn test_gap_closes_after_removal() {
    let mut layout = dashboard();
    layout.retain(|item| item.id != "stats");
    let out = Compactor::vertical().compact(&layout, 12);
    assert_eq!(pos(&out, "feed"), (8, 1));
    assert_eq!(pos(&out, "header"), (0, 0));
}

// =============================================================================
// Drag Tests
// =============================================================================

#[test]
fn test_prevent_collision_example() {
    let layout = vec![
        LayoutItem::new("a", 0, 0, 2, 2),
        LayoutItem::new("b", 2, 0, 2, 2),
    ];
    let compactor = Compactor::vertical().with_prevent_collision(true);
    let out = move_element(&layout, &layout[1], 0, 0, &compactor, 12);
    assert_eq!(pos(&out, "b"), (2, 0));
}

#[test]
fn test_drag_session_from_pixels() {
    init_tracing();
    let params = PositionParams::new(12, 100.0, 1200.0);
    let layout = dashboard();
    let compactor = Compactor::vertical();

    // Drag "footer" up over "chart".
    let footer = &layout[4];
    let (x, y) = calc_xy(&params, 0.0, 0.0, footer.w, footer.h);
    let ctx = ConstraintContext::new(&params, 0.0, &layout);
    let (x, y) = apply_position_constraints(&default_constraints(), footer, x, y, &ctx);

    let moved = compactor.on_move(&layout, footer, x, y, params.cols);
    let settled = compactor.compact(&moved, params.cols);

    assert_eq!(pos(&settled, "header"), (0, 0));
    assert_eq!(pos(&settled, "footer"), (0, 1));
    assert_eq!(pos(&settled, "chart"), (0, 3));
}

#[test]
fn test_wrap_reinsertion_example() {
    let layout = vec![
        LayoutItem::new("a", 0, 0, 1, 1),
        LayoutItem::new("b", 1, 0, 1, 1),
        LayoutItem::new("c", 2, 0, 1, 1),
    ];
    let out = Compactor::wrap().on_move(&layout, &layout[2], 0, 0, 4);
    assert_eq!(pos(&out, "c"), (0, 0));
    assert_eq!(pos(&out, "a"), (1, 0));
    assert_eq!(pos(&out, "b"), (2, 0));
}

// =============================================================================
// Responsive Tests
// =============================================================================

fn breakpoints() -> Breakpoints {
    [("lg", 1200.0), ("md", 996.0), ("sm", 768.0)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[test]
fn test_breakpoint_selection_example() {
    assert_eq!(get_breakpoint_from_width(&breakpoints(), 800.0).unwrap(), "sm");
}

#[test]
fn test_shrinking_container_derives_layout() {
    init_tracing();
    let cols: BreakpointCols = [("lg", 12), ("md", 10), ("sm", 6)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    let mut layouts = ResponsiveLayouts::new();
    layouts.insert("lg".to_string(), dashboard());

    let mut resolver = ResponsiveResolver::new(breakpoints(), cols, Compactor::vertical())
        .with_missing_layout_strategy(MissingLayoutStrategy::Warn);
    let resolved = resolver.resolve(&layouts, 800.0, "lg").unwrap();

    assert_eq!(resolved.breakpoint, "sm");
    assert_eq!(resolved.cols, 6);
    assert_eq!(resolved.layout.len(), 5);
    for item in &resolved.layout {
        assert!(item.x >= 0 && item.x + item.w <= 6, "{item:?}");
    }
    let settled = Compactor::vertical().compact(&resolved.layout, 6);
    assert_eq!(settled, resolved.layout);
}

#[test]
fn test_correct_bounds_then_compact() {
    let layout = vec![
        LayoutItem::new("a", 10, 0, 4, 1),
        LayoutItem::new("b", -1, 3, 2, 1),
    ];
    let fixed = correct_bounds(&layout, 6);
    let out = Compactor::vertical().compact(&fixed, 6);
    assert_eq!(pos(&out, "a"), (2, 0));
    assert_eq!(pos(&out, "b"), (0, 1));
    assert_eq!(out[1].w, 6);
}

// =============================================================================
// Serialization Tests
// =============================================================================

#[test]
fn test_compacted_layout_json_roundtrip() {
    let out = Compactor::vertical().compact(&dashboard(), 12);
    let json = serde_json::to_string(&out).expect("serialize");
    let back: Layout = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, out);
}
