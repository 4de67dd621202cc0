//! Collision-scan packing toward an edge of the grid.

use super::{sorted_indices, CompactType};
use crate::collision::{collides, get_first_collision};
use tilegrid_core::{bottom, get_statics, Layout, LayoutItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn coord(self, item: &LayoutItem) -> i32 {
        match self {
            Self::X => item.x,
            Self::Y => item.y,
        }
    }

    fn coord_mut(self, item: &mut LayoutItem) -> &mut i32 {
        match self {
            Self::X => &mut item.x,
            Self::Y => &mut item.y,
        }
    }

    fn size(self, item: &LayoutItem) -> i32 {
        match self {
            Self::X => item.w,
            Self::Y => item.h,
        }
    }
}

/// Pending push in the compaction cascade.
struct PushFrame {
    index: usize,
    move_to: i32,
    cursor: usize,
}

/// Push `sorted[start]` to `move_to` and cascade onto later items it hits.
///
/// Each item is bumped one unit while its followers are checked, then
/// settled at its target. Followers land at the target plus the pusher's
/// size.
fn resolve_compaction_collision(sorted: &mut [LayoutItem], start: usize, move_to: i32, axis: Axis) {
    *axis.coord_mut(&mut sorted[start]) += 1;
    let mut stack = vec![PushFrame {
        index: start,
        move_to,
        cursor: start + 1,
    }];

    while let Some(frame) = stack.last_mut() {
        let item = &sorted[frame.index];
        let mut next = None;
        while frame.cursor < sorted.len() {
            let j = frame.cursor;
            frame.cursor += 1;
            let other = &sorted[j];
            if other.is_static {
                continue;
            }
            if other.y > item.y + item.h {
                frame.cursor = sorted.len();
                break;
            }
            if collides(item, other) {
                next = Some((j, frame.move_to + axis.size(item)));
                break;
            }
        }

        match next {
            Some((j, child_move_to)) => {
                *axis.coord_mut(&mut sorted[j]) += 1;
                stack.push(PushFrame {
                    index: j,
                    move_to: child_move_to,
                    cursor: j + 1,
                });
            }
            None => {
                let index = frame.index;
                let target = frame.move_to;
                *axis.coord_mut(&mut sorted[index]) = target;
                stack.pop();
            }
        }
    }
}

/// Slide `item` toward the origin of `axis` until it touches something.
fn slide_back(placed: &[LayoutItem], item: &mut LayoutItem, axis: Axis) {
    while axis.coord(item) > 0 && get_first_collision(placed, item).is_none() {
        *axis.coord_mut(item) -= 1;
    }
}

/// Settle `sorted[index]` against everything already placed.
fn compact_item(
    placed: &[LayoutItem],
    sorted: &mut [LayoutItem],
    index: usize,
    compact_type: Option<CompactType>,
    cols: i32,
    allow_overlap: bool,
    floor: i32,
) {
    let horizontal = compact_type == Some(CompactType::Horizontal);
    let axis = if horizontal { Axis::X } else { Axis::Y };

    match compact_type {
        Some(CompactType::Vertical) => {
            let item = &mut sorted[index];
            item.y = item.y.min(floor);
            slide_back(placed, item, Axis::Y);
        }
        Some(CompactType::Horizontal) => slide_back(placed, &mut sorted[index], Axis::X),
        Some(CompactType::Wrap) | None => {}
    }

    if compact_type.is_none() && allow_overlap {
        clamp_origin(&mut sorted[index]);
        return;
    }

    while let Some(hit) = get_first_collision(placed, &sorted[index]) {
        let move_to = axis.coord(hit) + axis.size(hit);
        resolve_compaction_collision(sorted, index, move_to, axis);

        let item = &mut sorted[index];
        if horizontal && item.x + item.w > cols {
            item.x = cols - item.w;
            item.y += 1;
            slide_back(placed, item, Axis::X);
        }
    }

    clamp_origin(&mut sorted[index]);
}

fn clamp_origin(item: &mut LayoutItem) {
    item.y = item.y.max(0);
    item.x = item.x.max(0);
}

/// Pack `layout` toward the origin of `compact_type`.
///
/// Items are visited in compaction order and settled one by one against
/// the statics plus everything settled before them. Statics never move.
/// The output keeps input order.
#[must_use]
pub fn compact(
    layout: &[LayoutItem],
    compact_type: Option<CompactType>,
    cols: i32,
    allow_overlap: bool,
) -> Layout {
    let order = sorted_indices(layout, compact_type);
    let mut sorted: Layout = order.iter().map(|&i| layout[i].clone()).collect();
    let mut placed = get_statics(layout);
    let mut floor = bottom(&placed);

    for index in 0..sorted.len() {
        if sorted[index].is_static {
            continue;
        }
        compact_item(
            &placed,
            &mut sorted,
            index,
            compact_type,
            cols,
            allow_overlap,
            floor,
        );
        floor = floor.max(sorted[index].bottom());
        placed.push(sorted[index].clone());
    }

    let mut out = layout.to_vec();
    for (item, &original) in sorted.into_iter().zip(&order) {
        out[original] = item;
    }
    out
}
