//! Row and column views that alias a parent shape.
//! A view borrows its parent, so the parent cannot be resized while a view is
//! alive. Writes through a mutable view land directly in the parent.

use std::fmt::{self, Write as _};

use super::Cell;
use super::canvas::Shape;
use super::strip::{Column, Row};
use crate::error::BoundsError;
use crate::types::Pos;

#[derive(Clone, Copy, Debug)]
pub struct ColumnView<'a> {
    shape: &'a Shape,
    x: usize,
}

impl<'a> ColumnView<'a> {
    pub(super) fn new(shape: &'a Shape, x: usize) -> Self {
        Self { shape, x }
    }

    pub fn index(&self) -> usize {
        self.x
    }

    pub fn len(&self) -> usize {
        self.shape.height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, y: usize) -> Result<Cell, BoundsError> {
        self.shape.get(Pos::new(self.x as i32, y as i32))
    }

    /// Cells top to bottom, paired with their position in the parent.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, Cell)> + 'a {
        let (shape, x) = (self.shape, self.x);
        (0..shape.height()).map(move |y| (Pos::new(x as i32, y as i32), shape.cell(x, y)))
    }

    pub fn to_vec(&self) -> Vec<Cell> {
        self.iter().map(|(_, cell)| cell).collect()
    }

    pub fn to_column(&self) -> Column {
        Column::from_cells(self.to_vec())
    }
}

impl fmt::Display for ColumnView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, (_, cell)) in self.iter().enumerate() {
            if y > 0 {
                f.write_char('\n')?;
            }
            f.write_char(cell.unwrap_or(' '))?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct ColumnViewMut<'a> {
    shape: &'a mut Shape,
    x: usize,
}

impl<'a> ColumnViewMut<'a> {
    pub(super) fn new(shape: &'a mut Shape, x: usize) -> Self {
        Self { shape, x }
    }

    pub fn as_view(&self) -> ColumnView<'_> {
        ColumnView::new(self.shape, self.x)
    }

    pub fn index(&self) -> usize {
        self.x
    }

    pub fn get(&self, y: usize) -> Result<Cell, BoundsError> {
        self.as_view().get(y)
    }

    pub fn set(&mut self, y: usize, cell: Cell) -> Result<(), BoundsError> {
        self.shape.set(Pos::new(self.x as i32, y as i32), cell)
    }

    /// Writes `cells` from the top down, stopping at the parent's bottom edge.
    pub fn fill_from<I: IntoIterator<Item = Cell>>(&mut self, cells: I) {
        let height = self.shape.height();
        for (y, cell) in cells.into_iter().take(height).enumerate() {
            self.shape.put(self.x, y, cell);
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RowView<'a> {
    shape: &'a Shape,
    y: usize,
}

impl<'a> RowView<'a> {
    pub(super) fn new(shape: &'a Shape, y: usize) -> Self {
        Self { shape, y }
    }

    pub fn index(&self) -> usize {
        self.y
    }

    /// The parent's width; short stored rows read as empty past their end.
    pub fn len(&self) -> usize {
        self.shape.width()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, x: usize) -> Result<Cell, BoundsError> {
        self.shape.get(Pos::new(x as i32, self.y as i32))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, Cell)> + 'a {
        let (shape, y) = (self.shape, self.y);
        (0..shape.width()).map(move |x| (Pos::new(x as i32, y as i32), shape.cell(x, y)))
    }

    pub fn to_vec(&self) -> Vec<Cell> {
        self.iter().map(|(_, cell)| cell).collect()
    }

    pub fn to_row(&self) -> Row {
        Row::from_cells(self.to_vec())
    }
}

impl fmt::Display for RowView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (_, cell) in self.iter() {
            f.write_char(cell.unwrap_or(' '))?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct RowViewMut<'a> {
    shape: &'a mut Shape,
    y: usize,
}

impl<'a> RowViewMut<'a> {
    pub(super) fn new(shape: &'a mut Shape, y: usize) -> Self {
        Self { shape, y }
    }

    pub fn as_view(&self) -> RowView<'_> {
        RowView::new(self.shape, self.y)
    }

    pub fn index(&self) -> usize {
        self.y
    }

    pub fn get(&self, x: usize) -> Result<Cell, BoundsError> {
        self.as_view().get(x)
    }

    pub fn set(&mut self, x: usize, cell: Cell) -> Result<(), BoundsError> {
        self.shape.set(Pos::new(x as i32, self.y as i32), cell)
    }

    pub fn fill_from<I: IntoIterator<Item = Cell>>(&mut self, cells: I) {
        let width = self.shape.width();
        for (x, cell) in cells.into_iter().take(width).enumerate() {
            self.shape.put(x, self.y, cell);
        }
    }
}
