//! Coordinate and size primitives shared by shapes, grids, and the search.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A grid cell position. `(0, 0)` is the top-left corner of any shape or grid.
///
/// Negative values are legal for arithmetic but never address a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

pub const ORIGIN: Pos = Pos { y: 0, x: 0 };
pub const NORTH: Pos = Pos { y: -1, x: 0 };
pub const EAST: Pos = Pos { y: 0, x: 1 };
pub const SOUTH: Pos = Pos { y: 1, x: 0 };
pub const WEST: Pos = Pos { y: 0, x: -1 };

const CARDINALS: [Pos; 4] = [NORTH, EAST, SOUTH, WEST];
const DIAGONALS: [Pos; 4] =
    [Pos { y: -1, x: 1 }, Pos { y: 1, x: 1 }, Pos { y: 1, x: -1 }, Pos { y: -1, x: -1 }];

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn is_negative(self) -> bool {
        self.x < 0 || self.y < 0
    }

    /// True when `self` lies strictly inside the rectangle spanned by the
    /// origin and `corner` on both axes.
    pub fn is_before(self, corner: Pos) -> bool {
        self.x < corner.x && self.y < corner.y
    }

    pub fn is_within(self, bounds: Size) -> bool {
        !self.is_negative() && (self.x as usize) < bounds.width && (self.y as usize) < bounds.height
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn chebyshev(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Offsets a position by a size, treating the size as a vector.
    pub fn offset_by(self, size: Size) -> Pos {
        Pos { y: self.y + size.height as i32, x: self.x + size.width as i32 }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, rhs: Pos) -> Pos {
        Pos { y: self.y + rhs.y, x: self.x + rhs.x }
    }
}

impl AddAssign for Pos {
    fn add_assign(&mut self, rhs: Pos) {
        self.y += rhs.y;
        self.x += rhs.x;
    }
}

impl Sub for Pos {
    type Output = Pos;

    fn sub(self, rhs: Pos) -> Pos {
        Pos { y: self.y - rhs.y, x: self.x - rhs.x }
    }
}

impl SubAssign for Pos {
    fn sub_assign(&mut self, rhs: Pos) {
        self.y -= rhs.y;
        self.x -= rhs.x;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

impl Size {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn area(self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The exclusive bottom-right corner as a position.
    pub fn as_corner(self) -> Pos {
        ORIGIN.offset_by(self)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A declared extent: either a fixed size or the unbounded sentinel an
/// auto-growing canvas reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Extent {
    Bounded(Size),
    Unbounded,
}

impl Extent {
    /// Whether a region of `size` placed at `offset` fits inside this extent.
    pub fn contains_region(self, offset: Pos, size: Size) -> bool {
        match self {
            Extent::Unbounded => !offset.is_negative(),
            Extent::Bounded(bounds) => {
                !offset.is_negative()
                    && offset.x as usize + size.width <= bounds.width
                    && offset.y as usize + size.height <= bounds.height
            }
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extent::Bounded(size) => size.fmt(f),
            Extent::Unbounded => write!(f, "\u{221e}x\u{221e}"),
        }
    }
}

/// Row-major iterator over every position in `[start, stop)`.
#[derive(Clone, Debug)]
pub struct RectIter {
    start: Pos,
    stop: Pos,
    next: Pos,
}

impl RectIter {
    pub fn new(start: Pos, stop: Pos) -> Self {
        let empty = stop.x <= start.x || stop.y <= start.y;
        let next = if empty { Pos { y: stop.y.max(start.y), x: start.x } } else { start };
        Self { start, stop, next }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(ORIGIN, size.as_corner())
    }
}

impl Iterator for RectIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        if self.next.y >= self.stop.y {
            return None;
        }
        let current = self.next;
        self.next.x += 1;
        if self.next.x >= self.stop.x {
            self.next.x = self.start.x;
            self.next.y += 1;
        }
        Some(current)
    }
}

/// Neighbouring positions of `center` in north, east, south, west order,
/// followed by the diagonals when requested. Negative positions are skipped.
pub fn neighbours(center: Pos, include_diagonals: bool) -> impl Iterator<Item = Pos> {
    let diagonals: &[Pos] = if include_diagonals { &DIAGONALS } else { &[] };
    CARDINALS
        .iter()
        .chain(diagonals.iter())
        .map(move |direction| center + *direction)
        .filter(|pos| !pos.is_negative())
}
