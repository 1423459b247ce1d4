//! A canvas that grows to fit whatever is written to it.
//! It reports an unbounded declared size; `actual_size` gives the real extent.

use super::Cell;
use super::canvas::{DrawMode, Shape};
use super::view::ColumnViewMut;
use crate::error::{BoundsError, ShapeError};
use crate::types::{Extent, Pos, Size};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AutoShape {
    canvas: Shape,
    fill: Cell,
}

impl AutoShape {
    pub fn new(fill: Cell) -> Self {
        Self { canvas: Shape::default(), fill }
    }

    pub fn declared_size(&self) -> Extent {
        Extent::Unbounded
    }

    /// Always `None`: an auto shape has no width limit.
    pub fn declared_width(&self) -> Option<usize> {
        None
    }

    /// Always `None`: an auto shape has no height limit.
    pub fn declared_height(&self) -> Option<usize> {
        None
    }

    pub fn actual_width(&self) -> usize {
        self.canvas.width()
    }

    pub fn actual_height(&self) -> usize {
        self.canvas.height()
    }

    pub fn actual_size(&self) -> Size {
        self.canvas.size()
    }

    /// Reads a cell, growing the canvas first if `pos` lies past its edge.
    pub fn get(&mut self, pos: Pos) -> Result<Cell, BoundsError> {
        self.grow_to_include(pos)?;
        self.canvas.get(pos)
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) -> Result<(), BoundsError> {
        self.grow_to_include(pos)?;
        self.canvas.set(pos, cell)
    }

    pub fn column_mut(&mut self, x: usize) -> Result<ColumnViewMut<'_>, BoundsError> {
        let height = self.canvas.height().max(1);
        self.grow_to(x + 1, height);
        self.canvas.column_mut(x)
    }

    pub fn draw_on(&mut self, other: &Shape, offset: Pos, mode: DrawMode) -> Result<(), ShapeError> {
        if !self.declared_size().contains_region(offset, other.size()) {
            return Err(ShapeError::DoesNotFit {
                offset,
                size: other.size(),
                target: self.actual_size(),
            });
        }
        let corner = offset.offset_by(other.size());
        self.grow_to(corner.x as usize, corner.y as usize);
        self.canvas.draw_on(other, offset, mode)
    }

    pub fn as_shape(&self) -> &Shape {
        &self.canvas
    }

    pub fn into_shape(self) -> Shape {
        self.canvas
    }

    fn grow_to_include(&mut self, pos: Pos) -> Result<(), BoundsError> {
        if pos.is_negative() {
            return Err(BoundsError::new(pos, self.actual_size()));
        }
        self.grow_to(pos.x as usize + 1, pos.y as usize + 1);
        Ok(())
    }

    fn grow_to(&mut self, width: usize, height: usize) {
        let width = (width > self.actual_width()).then_some(width);
        let height = (height > self.actual_height()).then_some(height);
        self.canvas.extend_to(width, height, self.fill);
    }
}

impl From<AutoShape> for Shape {
    fn from(auto: AutoShape) -> Self {
        auto.canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ORIGIN;

    #[test]
    fn reads_past_the_edge_grow_the_canvas_with_fill() {
        let mut auto = AutoShape::new(Some('.'));

        assert_eq!(auto.get(Pos::new(3, 1)), Ok(Some('.')));
        assert_eq!(auto.actual_size(), Size::new(4, 2));
        assert_eq!(auto.declared_size(), Extent::Unbounded);
        assert_eq!((auto.declared_width(), auto.declared_height()), (None, None));
    }

    #[test]
    fn writes_past_the_edge_keep_existing_content() {
        let mut auto = AutoShape::new(None);
        auto.set(ORIGIN, Some('a')).expect("origin is writable");

        auto.set(Pos::new(2, 2), Some('z')).expect("grows");

        assert_eq!(auto.as_shape().to_string(), "a  \n   \n  z");
    }

    #[test]
    fn negative_positions_are_still_out_of_bounds() {
        let mut auto = AutoShape::new(None);

        assert!(auto.set(Pos::new(-1, 0), Some('x')).is_err());
        assert_eq!(auto.actual_size(), Size::new(0, 0));
    }

    #[test]
    fn draw_on_grows_to_fit_the_incoming_shape() {
        let mut auto = AutoShape::new(None);
        let room = Shape::new(3, 2, Some('#'));

        auto.draw_on(&room, Pos::new(2, 1), DrawMode::Overwrite).expect("grows to fit");

        assert_eq!(auto.actual_size(), Size::new(5, 3));
        assert_eq!(auto.as_shape().get(Pos::new(4, 2)), Ok(Some('#')));
        assert_eq!(auto.as_shape().get(ORIGIN), Ok(None));
    }

    #[test]
    fn column_mut_grows_to_reach_the_column() {
        let mut auto = AutoShape::new(Some('.'));

        auto.column_mut(2).expect("grows").set(0, Some('#')).expect("row exists");

        assert_eq!(auto.into_shape().to_string(), "..#");
    }
}
