//! Tide-array packing for large layouts.
//!
//! Instead of scanning every placed item per step, each column (vertical)
//! or row (horizontal) keeps the first free coordinate along it. An item
//! lands at the highest tide under its span. Statics are handled with a
//! short scan since they cannot move.

use crate::collision::collides;
use std::cmp::Ordering;
use std::ops::Range;
use tilegrid_core::{Layout, LayoutItem};

/// Iteration ceiling for a single item's row search.
#[must_use]
pub(crate) fn row_limit_guard(items: usize) -> i32 {
    let scaled = i32::try_from(items.saturating_mul(100)).unwrap_or(i32::MAX);
    scaled.max(10_000)
}

/// Non-negative index range covering `[start, start + len)`.
fn span(start: i32, len: i32) -> Range<usize> {
    let from = usize::try_from(start.max(0)).unwrap_or(0);
    let to = usize::try_from(start.saturating_add(len).max(0)).unwrap_or(0);
    from..to.max(from)
}

fn grow(tide: &mut Vec<i32>, len: usize) {
    if tide.len() < len {
        tide.resize(len, 0);
    }
}

fn statics_first(a: &LayoutItem, b: &LayoutItem) -> Ordering {
    b.is_static.cmp(&a.is_static)
}

/// Vertical packing with a per-column tide.
///
/// Output keeps input order. Statics never move.
#[must_use]
pub fn compact_vertical_fast(layout: &[LayoutItem], cols: i32) -> Layout {
    let mut out = layout.to_vec();
    let mut order: Vec<usize> = (0..out.len()).collect();
    order.sort_by(|&a, &b| {
        let (a, b) = (&out[a], &out[b]);
        a.y.cmp(&b.y)
            .then(a.x.cmp(&b.x))
            .then_with(|| statics_first(a, b))
    });

    let statics: Vec<usize> = order.iter().copied().filter(|&i| out[i].is_static).collect();
    let mut static_offset = 0;
    let mut tide = vec![0; usize::try_from(cols.max(0)).unwrap_or(0)];

    for &index in &order {
        let columns = span(out[index].x, out[index].w);
        grow(&mut tide, columns.end);

        if out[index].is_static {
            static_offset += 1;
        } else {
            let top = tide[columns.clone()].iter().copied().max().unwrap_or(0);
            out[index].y = top;

            let mut j = static_offset;
            while j < statics.len() {
                let blocker = &out[statics[j]];
                if blocker.y >= out[index].bottom() {
                    break;
                }
                if collides(&out[index], blocker) {
                    let below = blocker.bottom();
                    out[index].y = below;
                    j = static_offset;
                } else {
                    j += 1;
                }
            }
        }

        let edge = out[index].bottom();
        for cell in &mut tide[columns] {
            *cell = (*cell).max(edge);
        }
    }
    out
}

/// Horizontal packing with a per-row tide.
///
/// Items that do not fit in the remaining width move down one row and try
/// again. A runaway search is cut off after [`row_limit_guard`] rows and
/// the item is placed at column 0.
#[must_use]
pub fn compact_horizontal_fast(layout: &[LayoutItem], cols: i32) -> Layout {
    let mut out = layout.to_vec();
    let mut order: Vec<usize> = (0..out.len()).collect();
    order.sort_by(|&a, &b| {
        let (a, b) = (&out[a], &out[b]);
        a.x.cmp(&b.x)
            .then(a.y.cmp(&b.y))
            .then_with(|| statics_first(a, b))
    });

    let statics: Vec<usize> = order.iter().copied().filter(|&i| out[i].is_static).collect();
    let limit = row_limit_guard(out.len());
    let mut tide: Vec<i32> = Vec::new();

    for &index in &order {
        if !out[index].is_static {
            let start_row = out[index].y;
            let mut target_x;
            loop {
                if out[index].y - start_row > limit {
                    tracing::warn!(
                        "fast horizontal compaction gave up on {} after {} rows",
                        out[index].id,
                        limit
                    );
                    target_x = 0;
                    break;
                }

                let rows = span(out[index].y, out[index].h);
                grow(&mut tide, rows.end);
                target_x = tide[rows].iter().copied().max().unwrap_or(0);

                let mut probe = out[index].clone();
                probe.x = target_x;
                while let Some(&blocker) = statics.iter().find(|&&s| collides(&probe, &out[s])) {
                    probe.x = out[blocker].right();
                }
                target_x = probe.x;

                if target_x + out[index].w <= cols || target_x == 0 {
                    break;
                }
                out[index].y += 1;
            }
            out[index].x = target_x;
        }

        let rows = span(out[index].y, out[index].h);
        grow(&mut tide, rows.end);
        let edge = out[index].right();
        for cell in &mut tide[rows] {
            *cell = (*cell).max(edge);
        }
    }
    out
}
