//! Glyph canvases and the composition algebra used to assemble floor plans.
//! This module exists so layout code can glue rectangles together without
//! tracking absolute coordinates by hand. It does not know what a glyph means.

mod auto;
mod bordered;
mod canvas;
mod collection;
mod compose;
mod strip;
mod view;

pub use auto::AutoShape;
pub use bordered::BoxShape;
pub use canvas::{DrawMode, Shape};
pub use collection::{OverlapPolicy, Placed, Priority, ShapeCollection};
pub use compose::{AdjoinOptions, Composite, StackOptions, adjoin, atop, underneath};
pub use strip::{Column, Row};
pub use view::{ColumnView, ColumnViewMut, RowView, RowViewMut};

use crate::error::ShapeError;

/// A single canvas cell. `None` is the distinguished "no glyph" value.
pub type Cell = Option<char>;

/// Parses a glyph from text, rejecting anything but exactly one character.
pub fn parse_glyph(value: &str) -> Result<char, ShapeError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(glyph), None) => Ok(glyph),
        _ => Err(ShapeError::InvalidGlyph { value: value.to_owned() }),
    }
}
