//! Side-by-side and stacked composition of shapes and collections.
//! Each operator either renders a fresh canvas or, in collect mode, records
//! offsets in a `ShapeCollection` and leaves rendering for later.

use std::mem;

use tracing::warn;

use super::Cell;
use super::bordered::BoxShape;
use super::canvas::{DrawMode, Shape};
use super::collection::ShapeCollection;
use super::strip::{Column, Row};
use crate::error::ShapeError;
use crate::types::{Pos, RectIter, Size};

/// Either operand of a composition operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Composite {
    Shape(Shape),
    Collection(ShapeCollection),
}

impl Composite {
    pub fn width(&self) -> usize {
        self.size().width
    }

    pub fn height(&self) -> usize {
        self.size().height
    }

    pub fn size(&self) -> Size {
        match self {
            Composite::Shape(shape) => shape.size(),
            Composite::Collection(collection) => collection.size(),
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Composite::Collection(_))
    }

    pub fn into_collection(self) -> ShapeCollection {
        match self {
            Composite::Shape(shape) => ShapeCollection::from_shapes([shape]),
            Composite::Collection(collection) => collection,
        }
    }

    pub fn flatten(self) -> Result<Shape, ShapeError> {
        match self {
            Composite::Shape(shape) => Ok(shape),
            Composite::Collection(collection) => collection.combine(),
        }
    }
}

impl From<Shape> for Composite {
    fn from(shape: Shape) -> Self {
        Composite::Shape(shape)
    }
}

impl From<BoxShape> for Composite {
    fn from(boxed: BoxShape) -> Self {
        Composite::Shape(boxed.into_shape())
    }
}

impl From<Column> for Composite {
    fn from(column: Column) -> Self {
        Composite::Shape(column.into_shape())
    }
}

impl From<Row> for Composite {
    fn from(row: Row) -> Self {
        Composite::Shape(row.into_shape())
    }
}

impl From<ShapeCollection> for Composite {
    fn from(collection: ShapeCollection) -> Self {
        Composite::Collection(collection)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdjoinOptions {
    /// Columns the right operand shares with the left one.
    pub overlap: i32,
    /// Rows the right operand is pushed down from the top edge.
    pub top_offset: i32,
    /// Glyph for rendered cells neither operand covers.
    pub fill: Cell,
    /// Put the second operand on the left instead.
    pub join_left: bool,
    /// Keep the left operand's glyphs where the two overlap.
    pub skip_conflicts: bool,
    pub collect: bool,
    /// Push the left operand down by `top_offset` too.
    pub offset_both: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackOptions {
    pub left_offset: i32,
    /// Rows the lower operand shares with the upper one.
    pub overlap: i32,
    pub fill: Cell,
    /// Put the second operand on top instead.
    pub join_top: bool,
    /// Keep the upper operand's glyphs where the two overlap.
    pub skip_conflicts: bool,
    /// Shift the upper operand right by `left_offset`.
    pub offset_first: bool,
    /// Shift the lower operand right by `left_offset`.
    pub offset_second: bool,
    pub collect: bool,
}

impl Default for StackOptions {
    fn default() -> Self {
        Self {
            left_offset: 0,
            overlap: 0,
            fill: None,
            join_top: false,
            skip_conflicts: false,
            offset_first: false,
            offset_second: true,
            collect: false,
        }
    }
}

/// Places `second` to the right of `first`, sharing `overlap` columns.
/// A collection operand moves as a unit, exactly like a shape would.
pub fn adjoin(
    first: impl Into<Composite>,
    second: impl Into<Composite>,
    options: &AdjoinOptions,
) -> Result<Composite, ShapeError> {
    let (mut first, mut second) = (first.into(), second.into());
    warn_on_promotion("adjoin", options.collect, &first, &second);
    if options.join_left {
        mem::swap(&mut first, &mut second);
    }
    let first_offset = Pos::new(0, if options.offset_both { options.top_offset } else { 0 });
    let second_offset = Pos::new(first.width() as i32 - options.overlap, options.top_offset);
    place_pair(
        (first, first_offset),
        (second, second_offset),
        options.collect,
        options.skip_conflicts,
        options.fill,
    )
}

/// Places `second` below `first`, sharing `overlap` rows.
pub fn underneath(
    first: impl Into<Composite>,
    second: impl Into<Composite>,
    options: &StackOptions,
) -> Result<Composite, ShapeError> {
    let (mut first, mut second) = (first.into(), second.into());
    warn_on_promotion("underneath", options.collect, &first, &second);
    if options.join_top {
        mem::swap(&mut first, &mut second);
    }
    let shift = |enabled: bool| if enabled { options.left_offset } else { 0 };
    let first_offset = Pos::new(shift(options.offset_first), 0);
    let second_offset =
        Pos::new(shift(options.offset_second), first.height() as i32 - options.overlap);
    place_pair(
        (first, first_offset),
        (second, second_offset),
        options.collect,
        options.skip_conflicts,
        options.fill,
    )
}

/// Places `second` above `first`.
pub fn atop(
    first: impl Into<Composite>,
    second: impl Into<Composite>,
    options: &StackOptions,
) -> Result<Composite, ShapeError> {
    let flipped = StackOptions { join_top: !options.join_top, ..*options };
    underneath(first, second, &flipped)
}

fn warn_on_promotion(operator: &'static str, collect: bool, first: &Composite, second: &Composite) {
    if !collect && (first.is_collection() || second.is_collection()) {
        warn!(operator, "collection operand without collect mode, composing as a collection");
    }
}

fn place_pair(
    (first, first_offset): (Composite, Pos),
    (second, second_offset): (Composite, Pos),
    collect: bool,
    skip_conflicts: bool,
    fill: Cell,
) -> Result<Composite, ShapeError> {
    match (first, second) {
        (Composite::Shape(first), Composite::Shape(second)) if !collect => {
            render_pair((&first, first_offset), (&second, second_offset), skip_conflicts, fill)
                .map(Composite::Shape)
        }
        (first, second) => {
            collect_pair(first, first_offset, (second, second_offset), skip_conflicts)
                .map(Composite::Collection)
        }
    }
}

fn render_pair(
    (first, first_offset): (&Shape, Pos),
    (second, second_offset): (&Shape, Pos),
    skip_conflicts: bool,
    fill: Cell,
) -> Result<Shape, ShapeError> {
    let first_stop = first_offset.offset_by(first.size());
    let second_stop = second_offset.offset_by(second.size());
    let width = first_stop.x.max(second_stop.x).max(0) as usize;
    let height = first_stop.y.max(second_stop.y).max(0) as usize;

    let mut canvas = Shape::new(width, height, None);
    canvas.draw_on(first, first_offset, DrawMode::Overwrite)?;
    let mode = if skip_conflicts { DrawMode::SkipConflicts } else { DrawMode::Overwrite };
    canvas.draw_on(second, second_offset, mode)?;

    // Only cells neither operand covers take the fill; empty cells inside an
    // operand stay empty.
    let covered = |pos: Pos, offset: Pos, stop: Pos| {
        (offset.x..stop.x).contains(&pos.x) && (offset.y..stop.y).contains(&pos.y)
    };
    for pos in RectIter::from_size(canvas.size()) {
        if !covered(pos, first_offset, first_stop) && !covered(pos, second_offset, second_stop) {
            canvas.set(pos, fill)?;
        }
    }
    Ok(canvas)
}

fn collect_pair(
    first: Composite,
    first_offset: Pos,
    (second, second_offset): (Composite, Pos),
    skip_conflicts: bool,
) -> Result<ShapeCollection, ShapeError> {
    let mut collection = match first {
        Composite::Collection(mut collection) => {
            collection.offset(first_offset)?;
            collection
        }
        Composite::Shape(shape) => {
            let mut collection = ShapeCollection::new();
            collection.push_at(shape, first_offset)?;
            collection
        }
    };
    let incoming = match second {
        Composite::Collection(mut incoming) => {
            incoming.offset(second_offset)?;
            incoming
        }
        Composite::Shape(shape) => {
            let mut incoming = ShapeCollection::new();
            incoming.push_at(shape, second_offset)?;
            incoming
        }
    };
    if skip_conflicts {
        collection.prepend(incoming);
    } else {
        collection.extend(incoming);
    }
    Ok(collection)
}
