//! Axis-aligned collision queries.

use tilegrid_core::LayoutItem;

/// Whether two items overlap.
///
/// Rectangles are half-open, so items that only share an edge do not
/// collide. An item never collides with itself (same id).
#[must_use]
pub fn collides(a: &LayoutItem, b: &LayoutItem) -> bool {
    if a.id == b.id {
        return false;
    }
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

/// First item in layout order that collides with `item`.
#[must_use]
pub fn get_first_collision<'a>(layout: &'a [LayoutItem], item: &LayoutItem) -> Option<&'a LayoutItem> {
    layout.iter().find(|other| collides(other, item))
}

/// Every item in layout order that collides with `item`.
#[must_use]
pub fn get_all_collisions<'a>(layout: &'a [LayoutItem], item: &LayoutItem) -> Vec<&'a LayoutItem> {
    layout.iter().filter(|other| collides(other, item)).collect()
}
