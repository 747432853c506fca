//! Collision queries between entities
//!
//! Every entity in the round is a rectangle, so collisions reduce to
//! brute-force overlap scans over the (small) entity lists.

use super::rect::Rect;

/// Anything with a collision rectangle
pub trait Bounds {
    fn bounds(&self) -> Rect;
}

impl Bounds for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Check whether two entities overlap
#[inline]
pub fn collides<A: Bounds + ?Sized, B: Bounds + ?Sized>(a: &A, b: &B) -> bool {
    a.bounds().intersects(&b.bounds())
}

/// Check whether a rectangle overlaps any entity in the list
pub fn overlaps_any<T: Bounds>(rect: &Rect, items: &[T]) -> bool {
    items.iter().any(|item| rect.intersects(&item.bounds()))
}

/// Remove and return every entity overlapping the rectangle, keeping the
/// survivors in their original order
pub fn take_overlapping<T: Bounds>(rect: &Rect, items: &mut Vec<T>) -> Vec<T> {
    let mut taken = Vec::new();
    let mut kept = Vec::with_capacity(items.len());
    for item in items.drain(..) {
        if rect.intersects(&item.bounds()) {
            taken.push(item);
        } else {
            kept.push(item);
        }
    }
    *items = kept;
    taken
}
