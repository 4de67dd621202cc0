//! End-to-end tests through the tilegrid facade.

use tilegrid::{
    apply_size_constraints, calc_grid_col_width, calc_wh, calc_xy, default_constraints,
    validate_layout, ConstraintContext, GridConfig, Layout, LayoutCompactor, LayoutError,
    LayoutItem, ResizeHandle, ResponsiveLayouts,
};

const CONFIG: &str = r#"
cols = 12
row_height = 90.0
gap = 10.0
compact_type = "vertical"

[responsive]
missing_layout_strategy = "warn_once"

[responsive.breakpoints]
lg = 1200.0
sm = 768.0

[responsive.cols]
lg = 12
sm = 6
"#;

fn layout() -> Layout {
    vec![
        LayoutItem::new("a", 0, 0, 2, 2),
        LayoutItem::new("b", 2, 0, 4, 2),
        LayoutItem::new("c", 0, 2, 6, 1),
    ]
}

#[test]
fn test_config_drives_geometry() {
    let config = GridConfig::from_toml_str(CONFIG).expect("valid config");
    let params = config.position_params(1210.0);
    assert_eq!(calc_grid_col_width(&params), 90.0);

    // One column pitch is 100px; padding is 10px.
    assert_eq!(calc_xy(&params, 210.0, 310.0, 2, 2), (3, 2));
    assert_eq!(calc_wh(&params, 290.0, 190.0, 0, 0, ResizeHandle::Se), (3, 2));
}

#[test]
fn test_drag_and_settle() {
    let config = GridConfig::from_toml_str(CONFIG).expect("valid config");
    let params = config.position_params(1210.0);
    let compactor = config.compactor();
    let layout = layout();

    // Drop "c" onto the top-left corner.
    let (x, y) = calc_xy(&params, 0.0, 0.0, layout[2].w, layout[2].h);
    let moved = compactor.on_move(&layout, &layout[2], x, y, config.cols);
    let settled = compactor.compact(&moved, config.cols);

    assert_eq!((settled[2].x, settled[2].y), (0, 0));
    assert_eq!((settled[0].x, settled[0].y), (0, 1));
    assert_eq!((settled[1].x, settled[1].y), (2, 1));
    assert!(validate_layout(&settled).is_ok());
}

#[test]
fn test_resize_is_limited_by_item_max() {
    let config = GridConfig::from_toml_str(CONFIG).expect("valid config");
    let params = config.position_params(1210.0);
    let item = LayoutItem::new("a", 0, 0, 2, 2).with_max_size(4, 3);
    let layout = vec![item.clone()];
    let ctx = ConstraintContext::new(&params, 0.0, &layout);

    let (w, h) = calc_wh(&params, 990.0, 990.0, item.x, item.y, ResizeHandle::Se);
    let (w, h) = apply_size_constraints(&default_constraints(), &item, w, h, Some(ResizeHandle::Se), &ctx);
    assert_eq!((w, h), (4, 3));
}

#[test]
fn test_responsive_switch() {
    let config = GridConfig::from_toml_str(CONFIG).expect("valid config");
    let mut resolver = config.responsive_resolver().expect("breakpoints configured");
    let mut layouts = ResponsiveLayouts::new();
    layouts.insert("lg".to_string(), layout());

    let wide = resolver.resolve(&layouts, 1400.0, "lg").expect("lg resolves");
    assert_eq!(wide.breakpoint, "lg");
    assert_eq!(wide.layout, layout());

    let narrow = resolver.resolve(&layouts, 800.0, "lg").expect("sm resolves");
    assert_eq!(narrow.breakpoint, "sm");
    assert_eq!(narrow.cols, 6);
    assert!(narrow.layout.iter().all(|item| item.x + item.w <= 6));
    assert!(resolver.has_warned("sm"));
}

#[test]
fn test_bad_config_is_reported() {
    let err = GridConfig::from_toml_str("cols = -3").expect_err("negative cols");
    assert!(matches!(err, LayoutError::Config(_)));
    assert!(err.to_string().contains("cols"));
}
