//! Single-column and single-row shapes.

use super::Cell;
use super::canvas::Shape;
use super::view::{ColumnView, RowView};
use crate::error::ShapeError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Column(Shape);

impl Column {
    pub fn new(height: usize, fill: Cell) -> Self {
        Self(Shape::new(1, height, fill))
    }

    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Self {
        Self(Shape::from_cells(cells.into_iter().map(|cell| vec![cell]).collect()))
    }

    pub fn from_glyphs(glyphs: &str) -> Self {
        Self::from_cells(glyphs.chars().map(Some))
    }

    /// Extends the column downwards to at least `height` cells.
    pub fn padded(self, height: usize, fill: Cell) -> Self {
        Self(self.0.with_min_size(1, height, fill))
    }

    pub fn len(&self) -> usize {
        self.0.height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_shape(&self) -> &Shape {
        &self.0
    }

    pub fn into_shape(self) -> Shape {
        self.0
    }
}

impl TryFrom<Shape> for Column {
    type Error = ShapeError;

    fn try_from(shape: Shape) -> Result<Self, ShapeError> {
        if shape.width() != 1 {
            return Err(ShapeError::NotAStrip { expected: "column", actual: shape.size() });
        }
        Ok(Self(shape))
    }
}

impl From<ColumnView<'_>> for Column {
    fn from(view: ColumnView<'_>) -> Self {
        view.to_column()
    }
}

impl From<Column> for Shape {
    fn from(column: Column) -> Self {
        column.0
    }
}

impl AsRef<Shape> for Column {
    fn as_ref(&self) -> &Shape {
        &self.0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Row(Shape);

impl Row {
    pub fn new(width: usize, fill: Cell) -> Self {
        Self(Shape::new(width, 1, fill))
    }

    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Self {
        Self(Shape::from_cells(vec![cells.into_iter().collect()]))
    }

    pub fn from_glyphs(glyphs: &str) -> Self {
        Self::from_cells(glyphs.chars().map(Some))
    }

    /// Extends the row rightwards to at least `width` cells.
    pub fn padded(self, width: usize, fill: Cell) -> Self {
        Self(self.0.with_min_size(width, 1, fill))
    }

    pub fn len(&self) -> usize {
        self.0.width()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_shape(&self) -> &Shape {
        &self.0
    }

    pub fn into_shape(self) -> Shape {
        self.0
    }
}

impl TryFrom<Shape> for Row {
    type Error = ShapeError;

    fn try_from(shape: Shape) -> Result<Self, ShapeError> {
        if shape.height() != 1 {
            return Err(ShapeError::NotAStrip { expected: "row", actual: shape.size() });
        }
        Ok(Self(shape))
    }
}

impl From<RowView<'_>> for Row {
    fn from(view: RowView<'_>) -> Self {
        view.to_row()
    }
}

impl From<Row> for Shape {
    fn from(row: Row) -> Self {
        row.0
    }
}

impl AsRef<Shape> for Row {
    fn as_ref(&self) -> &Shape {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Size;

    #[test]
    fn column_from_glyphs_is_one_wide() {
        let column = Column::from_glyphs("abc");

        assert_eq!(column.as_shape().size(), Size::new(1, 3));
        assert_eq!(column.as_shape().to_string(), "a\nb\nc");
    }

    #[test]
    fn padded_strips_grow_along_their_axis() {
        let column = Column::from_glyphs("ab").padded(4, Some('.'));
        let row = Row::from_glyphs("ab").padded(4, Some('.'));

        assert_eq!(column.as_shape().to_string(), "a\nb\n.\n.");
        assert_eq!(row.as_shape().to_string(), "ab..");
    }

    #[test]
    fn strips_reject_shapes_of_the_wrong_extent() {
        let square = Shape::new(2, 2, None);

        assert_eq!(
            Column::try_from(square.clone()),
            Err(ShapeError::NotAStrip { expected: "column", actual: Size::new(2, 2) })
        );
        assert!(Row::try_from(square).is_err());
        assert!(Row::try_from(Shape::new(5, 1, None)).is_ok());
    }

    #[test]
    fn strips_copy_out_of_views() {
        let shape = Shape::from_rows(&["ab", "cd"]);

        let column = Column::from(shape.column(0).expect("column"));
        let row = Row::from(shape.row(1).expect("row"));

        assert_eq!(column.as_shape().to_string(), "a\nc");
        assert_eq!(row.as_shape().to_string(), "cd");
    }
}
