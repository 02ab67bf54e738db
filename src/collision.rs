/// Axis-aligned bounding boxes and the overlap test shared by every entity.
///
/// Entity counts are tiny (one player, at most twenty aliens, five
/// obstacles and a handful of bullets), so callers simply scan pairs.

/// A rectangle in play-field pixels.  `(x, y)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    /// Strict overlap on both axes.  Rectangles that only share an edge do
    /// not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Anything with a collision footprint.
pub trait Bounded {
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// `true` when the footprints of `a` and `b` overlap.  Symmetric.
pub fn intersects<A: Bounded + ?Sized, B: Bounded + ?Sized>(a: &A, b: &B) -> bool {
    a.bounds().intersects(&b.bounds())
}
