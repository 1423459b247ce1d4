//! Builder-side room descriptors.

use serde::{Deserialize, Serialize};

use super::config::RoomGlyphs;
use crate::shape::BoxShape;
use crate::types::{Pos, Size};

/// A rectangle the builder sizes and places. `start` and `stop` are the
/// inclusive top-left and bottom-right corners once the room is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub width: usize,
    pub height: usize,
    pub start: Option<Pos>,
    pub stop: Option<Pos>,
}

impl Room {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, start: None, stop: None }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The room as a one-thick wall ring around a floor.
    pub fn as_shape(&self, glyphs: &RoomGlyphs) -> BoxShape {
        BoxShape::new(self.width, self.height, 1, Some(glyphs.floor), Some(glyphs.wall))
    }

    pub fn place(&mut self, offset: Pos) {
        self.start = Some(offset);
        self.stop = Some(offset.offset_by(self.size()) - Pos::new(1, 1));
    }

    pub fn is_placed(&self) -> bool {
        self.start.is_some() && self.stop.is_some()
    }

    /// Whether `pos` falls inside the placed room, walls included.
    pub fn contains(&self, pos: Pos) -> bool {
        self.bounds().is_some_and(|(start, stop)| within(pos, start, stop))
    }

    /// Whether `pos` falls on the placed room's floor, walls excluded.
    pub fn interior_contains(&self, pos: Pos) -> bool {
        self.bounds().is_some_and(|(start, stop)| {
            within(pos, start + Pos::new(1, 1), stop - Pos::new(1, 1))
        })
    }

    fn bounds(&self) -> Option<(Pos, Pos)> {
        self.start.zip(self.stop)
    }
}

fn within(pos: Pos, start: Pos, stop: Pos) -> bool {
    (start.x..=stop.x).contains(&pos.x) && (start.y..=stop.y).contains(&pos.y)
}
