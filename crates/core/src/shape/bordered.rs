//! Filled rectangles with a stamped border ring.

use super::Cell;
use super::canvas::Shape;
use crate::types::{Pos, RectIter};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoxShape {
    shape: Shape,
    border: usize,
}

impl BoxShape {
    /// Fills a `width` x `height` rectangle with `fill`, then overwrites a
    /// ring `border` cells thick with `border_fill`.
    pub fn new(width: usize, height: usize, border: usize, fill: Cell, border_fill: Cell) -> Self {
        let mut this = Self { shape: Shape::new(width, height, fill), border };
        let ring: Vec<Pos> = this.perimeter().collect();
        for pos in ring {
            this.shape.put(pos.x as usize, pos.y as usize, border_fill);
        }
        this
    }

    pub fn border(&self) -> usize {
        self.border
    }

    pub fn width(&self) -> usize {
        self.shape.width()
    }

    pub fn height(&self) -> usize {
        self.shape.height()
    }

    /// Border positions: top band, the left and right bands between them,
    /// then the bottom band. Bands are clamped so thick borders on small
    /// boxes never yield a cell twice.
    pub fn perimeter(&self) -> impl Iterator<Item = Pos> {
        let (width, height) = (self.width() as i32, self.height() as i32);
        let border = self.border.min(i32::MAX as usize) as i32;
        let band = border.min(height);
        let bottom_start = (height - border).max(band);
        let side = border.min(width);
        let right_start = (width - border).max(side);

        let top = RectIter::new(Pos::new(0, 0), Pos::new(width, band));
        let left = RectIter::new(Pos::new(0, band), Pos::new(side, bottom_start));
        let right = RectIter::new(Pos::new(right_start, band), Pos::new(width, bottom_start));
        let bottom = RectIter::new(Pos::new(0, bottom_start), Pos::new(width, height));
        top.chain(left).chain(right).chain(bottom)
    }

    pub fn as_shape(&self) -> &Shape {
        &self.shape
    }

    pub fn into_shape(self) -> Shape {
        self.shape
    }
}

impl From<BoxShape> for Shape {
    fn from(boxed: BoxShape) -> Self {
        boxed.shape
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn border_overwrites_the_fill_around_the_edge() {
        let room = BoxShape::new(4, 3, 1, Some('.'), Some('#'));

        assert_eq!(room.as_shape().to_string(), "####\n#..#\n####");
    }

    #[test]
    fn thick_borders_leave_a_smaller_interior() {
        let room = BoxShape::new(6, 6, 2, Some('.'), Some('#'));

        let interior = room.as_shape().cells().filter(|(_, cell)| *cell == Some('.')).count();

        assert_eq!(interior, 4);
    }

    #[test]
    fn perimeter_visits_each_border_cell_once() {
        let room = BoxShape::new(5, 4, 1, None, Some('#'));

        let ring: Vec<Pos> = room.perimeter().collect();
        let unique: BTreeSet<Pos> = ring.iter().copied().collect();

        assert_eq!(ring.len(), 14);
        assert_eq!(unique.len(), ring.len());
        assert_eq!(ring.first(), Some(&Pos::new(0, 0)));
        assert_eq!(ring.last(), Some(&Pos::new(4, 3)));
    }

    #[test]
    fn zero_border_has_no_perimeter() {
        let room = BoxShape::new(3, 3, 0, Some('.'), Some('#'));

        assert_eq!(room.perimeter().count(), 0);
        assert!(room.as_shape().cells().all(|(_, cell)| cell == Some('.')));
    }

    #[test]
    fn border_thicker_than_the_box_fills_it_entirely() {
        let room = BoxShape::new(3, 2, 5, Some('.'), Some('#'));

        assert_eq!(room.perimeter().count(), 6);
        assert_eq!(room.as_shape().to_string(), "###\n###");
    }
}
