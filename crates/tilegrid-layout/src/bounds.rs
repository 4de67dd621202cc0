//! Best-effort repair of out-of-range layouts.

use crate::collision::collides;
use tilegrid_core::{Layout, LayoutItem};

/// Pull every item back inside `cols` columns.
///
/// Items hanging off the right edge are shifted left until flush. Items
/// starting left of column 0 are moved to 0 and stretched to the full
/// width. Statics that end up on top of each other (or on an item already
/// visited) are walked down one row at a time until clear.
#[must_use]
pub fn correct_bounds(layout: &[LayoutItem], cols: i32) -> Layout {
    let mut out = layout.to_vec();
    let mut blockers: Vec<usize> = (0..out.len()).filter(|&i| out[i].is_static).collect();

    for i in 0..out.len() {
        let item = &mut out[i];
        if item.right() > cols {
            item.x = cols - item.w;
        }
        if item.x < 0 {
            item.x = 0;
            item.w = cols;
        }

        if !item.is_static {
            blockers.push(i);
            continue;
        }
        while blockers.iter().any(|&b| collides(&out[b], &out[i])) {
            out[i].y += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_flush_right() {
        let layout = vec![LayoutItem::new("a", 10, 0, 4, 1)];
        let out = correct_bounds(&layout, 12);
        assert_eq!((out[0].x, out[0].w), (8, 4));
    }

    #[test]
    fn test_negative_x_takes_full_width() {
        let layout = vec![LayoutItem::new("a", -2, 0, 3, 1)];
        let out = correct_bounds(&layout, 6);
        assert_eq!((out[0].x, out[0].w), (0, 6));
    }

    #[test]
    fn test_too_wide_is_shrunk() {
        let layout = vec![LayoutItem::new("a", 0, 0, 20, 1)];
        let out = correct_bounds(&layout, 12);
        assert_eq!((out[0].x, out[0].w), (0, 12));
    }

    #[test]
    fn test_overlapping_statics_separate() {
        let layout = vec![
            LayoutItem::new("s1", 0, 0, 2, 2).with_static(true),
            LayoutItem::new("s2", 1, 1, 2, 2).with_static(true),
        ];
        let out = correct_bounds(&layout, 12);
        assert_eq!((out[0].x, out[0].y), (0, 3));
        assert_eq!((out[1].x, out[1].y), (1, 1));
        assert!(!collides(&out[0], &out[1]));
    }

    #[test]
    fn test_static_moves_below_earlier_item() {
        let layout = vec![
            LayoutItem::new("a", 0, 0, 2, 2),
            LayoutItem::new("s", 0, 1, 2, 1).with_static(true),
        ];
        let out = correct_bounds(&layout, 12);
        assert_eq!((out[0].x, out[0].y), (0, 0));
        assert_eq!((out[1].x, out[1].y), (0, 2));
    }

    #[test]
    fn test_in_range_is_untouched() {
        let layout = vec![
            LayoutItem::new("a", 0, 0, 2, 2),
            LayoutItem::new("b", 4, 3, 8, 1),
        ];
        assert_eq!(correct_bounds(&layout, 12), layout);
    }

    proptest! {
        #[test]
        fn prop_items_inside_columns(
            items in proptest::collection::vec((-10i32..30, 0i32..20, 1i32..8, 1i32..4), 0..12),
            cols in 1i32..16,
        ) {
            let layout: Layout = items
                .into_iter()
                .enumerate()
                .map(|(i, (x, y, w, h))| LayoutItem::new(format!("n{i}"), x, y, w, h))
                .collect();
            for item in correct_bounds(&layout, cols) {
                prop_assert!(item.x >= 0);
                prop_assert!(item.x + item.w <= cols);
            }
        }
    }
}
