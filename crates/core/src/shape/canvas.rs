//! The bounded glyph canvas every other shape type is built on.
//! Rows may have different stored lengths; reads past a short row inside the
//! declared bounds see an empty cell rather than an error.

use std::fmt::{self, Write as _};
use std::ops::Index;

use xxhash_rust::xxh3::xxh3_64;

use super::Cell;
use super::strip::Column;
use super::view::{ColumnView, ColumnViewMut, RowView, RowViewMut};
use crate::error::{Axis, BoundsError, ShapeError};
use crate::types::{Extent, ORIGIN, Pos, RectIter, Size};

const EMPTY: Cell = None;

/// How `draw_on` treats destination cells that already hold a glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DrawMode {
    Overwrite,
    /// Keep the existing glyph and skip the incoming one.
    #[default]
    SkipConflicts,
    ErrorOnConflict,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: Vec<Vec<Cell>>,
}

impl Shape {
    pub fn new(width: usize, height: usize, fill: Cell) -> Self {
        Self { rows: vec![vec![fill; width]; height] }
    }

    pub fn from_cells(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Builds a shape from text rows. Every character, spaces included,
    /// becomes a glyph.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        Self { rows: rows.iter().map(|row| row.as_ref().chars().map(Some).collect()).collect() }
    }

    /// Pads the shape out to at least `width` x `height`, leaving it as-is
    /// when it is already that large.
    pub fn with_min_size(mut self, width: usize, height: usize, fill: Cell) -> Self {
        let width = (width > self.width()).then_some(width);
        let height = (height > self.height()).then_some(height);
        self.extend_to(width, height, fill);
        self
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    pub fn get(&self, pos: Pos) -> Result<Cell, BoundsError> {
        self.check_bounds(pos)?;
        Ok(self.cell(pos.x as usize, pos.y as usize))
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) -> Result<(), BoundsError> {
        self.check_bounds(pos)?;
        self.put(pos.x as usize, pos.y as usize, cell);
        Ok(())
    }

    pub fn column(&self, x: usize) -> Result<ColumnView<'_>, BoundsError> {
        self.check_column(x)?;
        Ok(ColumnView::new(self, x))
    }

    pub fn column_mut(&mut self, x: usize) -> Result<ColumnViewMut<'_>, BoundsError> {
        self.check_column(x)?;
        Ok(ColumnViewMut::new(self, x))
    }

    pub fn row(&self, y: usize) -> Result<RowView<'_>, BoundsError> {
        self.check_row(y)?;
        Ok(RowView::new(self, y))
    }

    pub fn row_mut(&mut self, y: usize) -> Result<RowViewMut<'_>, BoundsError> {
        self.check_row(y)?;
        Ok(RowViewMut::new(self, y))
    }

    /// Replaces column `x` with `column`, ignoring whatever was there.
    pub fn set_column(&mut self, x: usize, column: &Column) -> Result<(), ShapeError> {
        self.draw_on(column.as_shape(), Pos::new(x as i32, 0), DrawMode::Overwrite)
    }

    /// Extends every row to `width` and appends rows up to `height`.
    pub fn normalise(
        &mut self,
        width: Option<usize>,
        height: Option<usize>,
        fill: Cell,
    ) -> Result<(), ShapeError> {
        if let Some(requested) = width.filter(|&width| width < self.width()) {
            return Err(ShapeError::NormaliseShrink {
                axis: Axis::Width,
                requested,
                current: self.width(),
            });
        }
        if let Some(requested) = height.filter(|&height| height < self.height()) {
            return Err(ShapeError::NormaliseShrink {
                axis: Axis::Height,
                requested,
                current: self.height(),
            });
        }
        self.extend_to(width, height, fill);
        Ok(())
    }

    pub(super) fn extend_to(&mut self, width: Option<usize>, height: Option<usize>, fill: Cell) {
        let grows = width.unwrap_or(0) > 0 || height.unwrap_or(0) > 0;
        if self.rows.is_empty() && grows {
            self.rows.push(Vec::new());
        }
        if let Some(width) = width {
            for row in &mut self.rows {
                if row.len() < width {
                    row.resize(width, fill);
                }
            }
        }
        if let Some(height) = height {
            let width = self.width();
            while self.rows.len() < height {
                self.rows.push(vec![fill; width]);
            }
        }
    }

    /// Cuts the shape down to `width` x `height`. Columns come off the right
    /// edge unless `trim_left`, rows off the bottom unless `trim_top`.
    /// Requests larger than the current extent change nothing.
    pub fn trim(
        &mut self,
        width: Option<usize>,
        height: Option<usize>,
        trim_left: bool,
        trim_top: bool,
    ) {
        if let Some(width) = width {
            for row in &mut self.rows {
                if row.len() <= width {
                    continue;
                }
                if trim_left {
                    row.drain(..row.len() - width);
                } else {
                    row.truncate(width);
                }
            }
        }
        if let Some(height) = height.filter(|&height| height < self.rows.len()) {
            if trim_top {
                self.rows.drain(..self.rows.len() - height);
            } else {
                self.rows.truncate(height);
            }
        }
    }

    /// Grows the shape to `columns` x `rows` by inserting cells at the left
    /// and top, so existing content keeps its distance from the bottom-right.
    pub fn pad(&mut self, columns: usize, rows: usize, fill: Cell) {
        if columns <= self.width() && rows <= self.height() {
            return;
        }
        if self.rows.is_empty() {
            self.rows.push(Vec::new());
        }
        for row in &mut self.rows {
            if row.len() < columns {
                let mut padded = vec![fill; columns - row.len()];
                padded.append(row);
                *row = padded;
            }
        }
        let width = self.width();
        while self.rows.len() < rows {
            self.rows.insert(0, vec![fill; width]);
        }
    }

    /// Copies every stored cell of `other` onto this shape at `offset`,
    /// empty cells included. Cells drawn before a conflict error stay drawn.
    pub fn draw_on(&mut self, other: &Shape, offset: Pos, mode: DrawMode) -> Result<(), ShapeError> {
        if !Extent::Bounded(self.size()).contains_region(offset, other.size()) {
            return Err(ShapeError::DoesNotFit {
                offset,
                size: other.size(),
                target: self.size(),
            });
        }
        for (pos, incoming) in other.cells() {
            let at = pos + offset;
            let (x, y) = (at.x as usize, at.y as usize);
            if mode != DrawMode::Overwrite {
                if let Some(existing) = self.cell(x, y) {
                    if mode == DrawMode::ErrorOnConflict {
                        return Err(ShapeError::Conflict { at, existing, incoming });
                    }
                    continue;
                }
            }
            self.put(x, y, incoming);
        }
        Ok(())
    }

    /// Copies the rectangle `[start, stop)`. With no `stop`, `start` is the
    /// exclusive corner and the rectangle begins at the origin.
    pub fn section(&self, start: Pos, stop: Option<Pos>) -> Result<Shape, ShapeError> {
        let (start, stop) = match stop {
            Some(stop) => (start, stop),
            None => (ORIGIN, start),
        };
        if !start.is_before(stop) {
            return Err(ShapeError::SectionOrder { start, stop });
        }
        let extent = stop - start;
        let mut section = Shape::new(extent.x as usize, extent.y as usize, None);
        for pos in RectIter::new(start, stop) {
            let local = pos - start;
            section.put(local.x as usize, local.y as usize, self.get(pos)?);
        }
        Ok(section)
    }

    pub fn wipe(&mut self) {
        for row in &mut self.rows {
            row.fill(None);
        }
    }

    pub fn center(&self) -> Pos {
        Pos::new((self.width() / 2) as i32, (self.height() / 2) as i32)
    }

    /// Stored cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().map(move |(x, cell)| (Pos::new(x as i32, y as i32), *cell))
        })
    }

    pub fn fill_empty(&mut self, fill: Cell) {
        for cell in self.rows.iter_mut().flatten() {
            if cell.is_none() {
                *cell = fill;
            }
        }
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.rows.len() * 4);
        bytes.extend((self.width() as u32).to_le_bytes());
        bytes.extend((self.height() as u32).to_le_bytes());
        for row in &self.rows {
            bytes.extend((row.len() as u32).to_le_bytes());
            for cell in row {
                match cell {
                    None => bytes.push(0),
                    Some(glyph) => {
                        bytes.push(1);
                        bytes.extend(u32::from(*glyph).to_le_bytes());
                    }
                }
            }
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    pub(super) fn cell(&self, x: usize, y: usize) -> Cell {
        self.rows.get(y).and_then(|row| row.get(x)).copied().flatten()
    }

    pub(super) fn put(&mut self, x: usize, y: usize, cell: Cell) {
        let row = &mut self.rows[y];
        if row.len() <= x {
            row.resize(x + 1, None);
        }
        row[x] = cell;
    }

    fn check_bounds(&self, pos: Pos) -> Result<(), BoundsError> {
        if pos.is_within(self.size()) {
            Ok(())
        } else {
            Err(BoundsError::new(pos, self.size()))
        }
    }

    fn check_column(&self, x: usize) -> Result<(), BoundsError> {
        if x < self.width() {
            Ok(())
        } else {
            Err(BoundsError::new(Pos::new(x as i32, 0), self.size()))
        }
    }

    fn check_row(&self, y: usize) -> Result<(), BoundsError> {
        if y < self.height() {
            Ok(())
        } else {
            Err(BoundsError::new(Pos::new(0, y as i32), self.size()))
        }
    }
}

impl Index<Pos> for Shape {
    type Output = Cell;

    fn index(&self, pos: Pos) -> &Cell {
        if let Err(error) = self.check_bounds(pos) {
            panic!("{error}");
        }
        self.rows[pos.y as usize].get(pos.x as usize).unwrap_or(&EMPTY)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows.iter().enumerate() {
            if y > 0 {
                f.write_char('\n')?;
            }
            for cell in row {
                f.write_char(cell.unwrap_or(' '))?;
            }
        }
        Ok(())
    }
}
