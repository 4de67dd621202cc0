//! Reading-order packing.
//!
//! Every cell gets a slot number `y * cols + x`. Items keep their relative
//! slot order and are laid out left to right, wrapping at `cols`, around
//! whatever cells the statics occupy.

use std::collections::HashSet;
use tilegrid_core::{layout_index, Layout, LayoutItem};

fn slot(item: &LayoutItem, cols: i32) -> i64 {
    i64::from(item.y) * i64::from(cols) + i64::from(item.x)
}

fn cells(item: &LayoutItem) -> impl Iterator<Item = (i32, i32)> + '_ {
    (item.y..item.y + item.h).flat_map(move |y| (item.x..item.x + item.w).map(move |x| (x, y)))
}

/// Non-static indices in slot order, ties kept in layout order.
fn slot_order(layout: &[LayoutItem], cols: i32, skip: Option<usize>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..layout.len())
        .filter(|&i| !layout[i].is_static && Some(i) != skip)
        .collect();
    order.sort_by_key(|&i| slot(&layout[i], cols));
    order
}

/// Place the non-statics named by `order`, one after another.
fn wrap_in_order(layout: &[LayoutItem], order: &[usize], cols: i32) -> Layout {
    let mut out = layout.to_vec();
    let mut occupied: HashSet<(i32, i32)> = layout
        .iter()
        .filter(|item| item.is_static)
        .flat_map(cells)
        .collect();

    let width = i64::from(cols);
    let mut cursor: i64 = 0;
    for &index in order {
        let mut candidate = cursor;
        loop {
            let x = i32::try_from(candidate % width).unwrap_or(0);
            let y = i32::try_from(candidate / width).unwrap_or(i32::MAX);
            if x != 0 && x + out[index].w > cols {
                candidate = (candidate / width + 1) * width;
                continue;
            }
            let mut probe = out[index].clone();
            probe.x = x;
            probe.y = y;
            if cells(&probe).all(|cell| !occupied.contains(&cell)) {
                break;
            }
            candidate += 1;
        }

        let item = &mut out[index];
        item.x = i32::try_from(candidate % width).unwrap_or(0);
        item.y = i32::try_from(candidate / width).unwrap_or(i32::MAX);
        occupied.extend(cells(item));
        cursor = candidate + i64::from(item.w);
    }
    out
}

/// Pack `layout` in reading order.
///
/// Output keeps input order. Statics never move.
#[must_use]
pub fn compact_wrap(layout: &[LayoutItem], cols: i32) -> Layout {
    if cols <= 0 {
        return layout.to_vec();
    }
    let order = slot_order(layout, cols, None);
    wrap_in_order(layout, &order, cols)
}

/// Move `item` to the slot at `(x, y)` by reinserting it into the reading
/// order; everything between its old and new slot shifts one place the
/// other way.
#[must_use]
pub fn move_wrap(layout: &[LayoutItem], item: &LayoutItem, x: i32, y: i32, cols: i32) -> Layout {
    let Some(index) = layout_index(layout, &item.id) else {
        return layout.to_vec();
    };
    if cols <= 0 || layout[index].is_locked() {
        return layout.to_vec();
    }

    let old_slot = slot(&layout[index], cols);
    let new_slot = i64::from(y.max(0)) * i64::from(cols) + i64::from(x.clamp(0, cols - 1));

    let mut order = slot_order(layout, cols, Some(index));
    let at = if new_slot < old_slot {
        order.partition_point(|&i| slot(&layout[i], cols) < new_slot)
    } else {
        order.partition_point(|&i| slot(&layout[i], cols) <= new_slot)
    };
    order.insert(at, index);

    tracing::trace!("wrap move {} from slot {} to {}", item.id, old_slot, new_slot);
    wrap_in_order(layout, &order, cols)
}
