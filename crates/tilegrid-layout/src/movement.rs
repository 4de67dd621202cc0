//! Drag resolution.
//!
//! Moving an item may push others out of the way, and those pushes may
//! push further items. The cascade runs on a private working copy with an
//! explicit stack of pending moves and a processed set indexed like the
//! layout, so depth never touches the call stack and an item is only
//! displaced once per call.

use crate::collision::{collides, get_first_collision};
use crate::compact::{row_limit_guard, sorted_indices, CompactType, LayoutCompactor};
use tilegrid_core::{layout_index, Layout, LayoutItem};

/// A move to try. `None` leaves that axis alone.
#[derive(Debug, Clone, Copy)]
struct MoveRequest {
    index: usize,
    x: Option<i32>,
    y: Option<i32>,
    user_action: bool,
    prevent_collision: bool,
}

/// A committed move whose collisions are still being resolved.
#[derive(Debug)]
struct Frame {
    mover: usize,
    collisions: Vec<usize>,
    cursor: usize,
    user_action: bool,
}

struct Resolver {
    work: Layout,
    processed: Vec<bool>,
    compact_type: Option<CompactType>,
    steps: i32,
    limit: i32,
}

impl Resolver {
    fn new(layout: &[LayoutItem], compact_type: Option<CompactType>) -> Self {
        Self {
            work: layout.to_vec(),
            processed: vec![false; layout.len()],
            compact_type,
            steps: 0,
            limit: row_limit_guard(layout.len()),
        }
    }

    fn vertical(&self) -> bool {
        self.compact_type == Some(CompactType::Vertical)
    }

    fn horizontal(&self) -> bool {
        self.compact_type == Some(CompactType::Horizontal)
    }

    /// Commit a move and collect what it now overlaps.
    ///
    /// Returns `None` when there is nothing left to resolve: the item is
    /// locked, did not move, overlap is allowed, or the move was reverted.
    fn start(&mut self, request: MoveRequest, allow_overlap: bool) -> Option<Frame> {
        let i = request.index;
        let item = &self.work[i];
        if item.is_locked() {
            return None;
        }
        if request.x == Some(item.x) && request.y == Some(item.y) {
            return None;
        }

        let (old_x, old_y) = (item.x, item.y);
        if let Some(x) = request.x {
            self.work[i].x = x;
        }
        if let Some(y) = request.y {
            self.work[i].y = y;
        }
        self.processed[i] = true;

        let moving_up = match (self.compact_type, request.x, request.y) {
            (Some(CompactType::Vertical), _, Some(y)) => old_y >= y,
            (Some(CompactType::Horizontal), Some(x), _) => old_x >= x,
            _ => false,
        };
        let mut order = sorted_indices(&self.work, self.compact_type);
        if moving_up {
            order.reverse();
        }
        let collisions: Vec<usize> = order
            .into_iter()
            .filter(|&j| collides(&self.work[j], &self.work[i]))
            .collect();

        if !collisions.is_empty() && allow_overlap {
            return None;
        }
        if !collisions.is_empty() && request.prevent_collision {
            tracing::trace!("move of {} reverted, collision prevented", self.work[i].id);
            self.work[i].x = old_x;
            self.work[i].y = old_y;
            self.processed[i] = false;
            return None;
        }

        Some(Frame {
            mover: i,
            collisions,
            cursor: 0,
            user_action: request.user_action,
        })
    }

    /// Decide how `to_move` gets out of the way of `collides_with`.
    fn away(&mut self, collides_with: usize, to_move: usize, user_action: bool) -> Option<MoveRequest> {
        let horizontal = self.horizontal();
        let vertical = self.vertical();
        let prevent_collision = self.work[collides_with].is_static;
        let request = |index: usize, x: Option<i32>, y: Option<i32>| MoveRequest {
            index,
            x,
            y,
            user_action: false,
            prevent_collision,
        };

        let blocker = &self.work[collides_with];
        let mover = &self.work[to_move];

        if user_action {
            // Try to hop over the blocker first.
            let fake = LayoutItem::new(
                "-1",
                if horizontal { (blocker.x - mover.w).max(0) } else { mover.x },
                if vertical { (blocker.y - mover.h).max(0) } else { mover.y },
                mover.w,
                mover.h,
            );

            match get_first_collision(&self.work, &fake) {
                None => {
                    return Some(request(
                        to_move,
                        horizontal.then_some(fake.x),
                        vertical.then_some(fake.y),
                    ));
                }
                Some(first) => {
                    let north = first.bottom() > blocker.y;
                    let west = blocker.right() > first.x;
                    if north && vertical {
                        return Some(request(to_move, None, Some(blocker.y + 1)));
                    }
                    if north && self.compact_type.is_none() && !blocker.is_static {
                        let (mover_y, mover_h) = (mover.y, mover.h);
                        self.work[collides_with].y = mover_y;
                        self.work[to_move].y = mover_y + mover_h;
                        return None;
                    }
                    if west && horizontal {
                        return Some(request(collides_with, Some(mover.x), None));
                    }
                }
            }
        }

        let new_x = horizontal.then(|| mover.x + 1);
        let new_y = vertical.then(|| mover.y + 1);
        if new_x.is_none() && new_y.is_none() {
            return None;
        }
        Some(request(to_move, new_x, new_y))
    }

    /// Drain pending collisions until the stack is empty.
    fn run(&mut self, mut stack: Vec<Frame>) {
        while let Some(frame) = stack.last_mut() {
            self.steps += 1;
            if self.steps > self.limit {
                tracing::warn!(
                    "move cascade stopped after {} steps, layout may overlap",
                    self.limit
                );
                break;
            }

            let Some(&other) = frame.collisions.get(frame.cursor) else {
                stack.pop();
                continue;
            };
            frame.cursor += 1;
            if self.processed[other] {
                continue;
            }

            let mover = frame.mover;
            let user_action = frame.user_action;
            let next = if self.work[other].is_static {
                self.away(other, mover, user_action)
            } else {
                self.away(mover, other, user_action)
            };
            if let Some(request) = next {
                if let Some(child) = self.start(request, false) {
                    stack.push(child);
                }
            }
        }
    }
}

/// Move `item` to `(x, y)` and push whatever it lands on out of the way.
///
/// Locked items and moves to the current position return the layout
/// unchanged. With `allow_overlap` the position is committed as is; with
/// `prevent_collision` a move that would overlap anything is reverted.
/// Otherwise colliding items are pushed along the compaction axis, and a
/// mover that hits a static is pushed off the static instead.
#[must_use]
pub fn move_element<C: LayoutCompactor + ?Sized>(
    layout: &[LayoutItem],
    item: &LayoutItem,
    x: i32,
    y: i32,
    compactor: &C,
    cols: i32,
) -> Layout {
    let Some(index) = layout_index(layout, &item.id) else {
        return layout.to_vec();
    };
    tracing::debug!(cols, "move {} to ({}, {})", item.id, x, y);

    let mut resolver = Resolver::new(layout, compactor.compact_type());
    let request = MoveRequest {
        index,
        x: Some(x),
        y: Some(y),
        user_action: true,
        prevent_collision: compactor.prevent_collision(),
    };
    if let Some(frame) = resolver.start(request, compactor.allow_overlap()) {
        resolver.run(vec![frame]);
    }
    resolver.work
}

/// Push `item_to_move` clear of `collides_with` and resolve the cascade.
///
/// This is the step [`move_element`] takes for each collision. A user
/// action first tries to hop the item to just before the blocker.
#[must_use]
pub fn move_element_away_from_collision<C: LayoutCompactor + ?Sized>(
    layout: &[LayoutItem],
    collides_with: &LayoutItem,
    item_to_move: &LayoutItem,
    is_user_action: bool,
    compactor: &C,
    cols: i32,
) -> Layout {
    let (Some(blocker), Some(mover)) = (
        layout_index(layout, &collides_with.id),
        layout_index(layout, &item_to_move.id),
    ) else {
        return layout.to_vec();
    };
    tracing::debug!(cols, is_user_action, "push {} away from {}", item_to_move.id, collides_with.id);

    let mut resolver = Resolver::new(layout, compactor.compact_type());
    if let Some(request) = resolver.away(blocker, mover, is_user_action) {
        if let Some(frame) = resolver.start(request, false) {
            resolver.run(vec![frame]);
        }
    }
    resolver.work
}
