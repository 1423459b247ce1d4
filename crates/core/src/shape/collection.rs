//! Deferred composites: an ordered list of shapes placed at offsets in one
//! shared coordinate space. Nothing is rendered until `combine`.
//! Offsets are never negative, so the bounding box always starts at the origin.

use std::{slice, vec};

use tracing::debug;

use super::Cell;
use super::auto::AutoShape;
use super::canvas::{DrawMode, Shape};
use crate::error::ShapeError;
use crate::types::{ORIGIN, Pos, Size};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placed {
    shape: Shape,
    offset: Pos,
}

impl Placed {
    pub fn new(shape: Shape, offset: Pos) -> Self {
        Self { shape, offset }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    pub fn offset(&self) -> Pos {
        self.offset
    }

    /// Exclusive bottom-right corner in collection space.
    pub fn stop(&self) -> Pos {
        self.offset.offset_by(self.shape.size())
    }

    pub fn covers(&self, pos: Pos) -> bool {
        (pos - self.offset).is_within(self.shape.size())
    }

    pub fn into_parts(self) -> (Shape, Pos) {
        (self.shape, self.offset)
    }
}

/// Where `prioritise` moves a member. Later members are drawn last and win
/// overlaps under the default flatten policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Priority {
    Top,
    Bottom,
    /// Move by this many places, clamped to the ends of the collection.
    By(i32),
}

/// How `combine_with` resolves cells covered by more than one member.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    #[default]
    LastWins,
    FirstWins,
    Error,
}

impl OverlapPolicy {
    fn draw_mode(self) -> DrawMode {
        match self {
            OverlapPolicy::LastWins => DrawMode::Overwrite,
            OverlapPolicy::FirstWins => DrawMode::SkipConflicts,
            OverlapPolicy::Error => DrawMode::ErrorOnConflict,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShapeCollection {
    members: Vec<Placed>,
}

impl ShapeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places every shape at the origin.
    pub fn from_shapes<I: IntoIterator<Item = Shape>>(shapes: I) -> Self {
        Self { members: shapes.into_iter().map(|shape| Placed::new(shape, ORIGIN)).collect() }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Placed> {
        self.members.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Placed> {
        self.members.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Placed> {
        self.members.get_mut(index)
    }

    pub fn push(&mut self, placed: Placed) -> Result<(), ShapeError> {
        Self::check_offset(self.members.len(), placed.offset)?;
        self.members.push(placed);
        Ok(())
    }

    pub fn push_at(&mut self, shape: Shape, offset: Pos) -> Result<(), ShapeError> {
        self.push(Placed::new(shape, offset))
    }

    pub fn extend(&mut self, other: ShapeCollection) {
        self.members.extend(other.members);
    }

    /// Puts every member of `other` ahead of the existing members, so the
    /// existing ones are drawn over them.
    pub fn prepend(&mut self, other: ShapeCollection) {
        let mut members = other.members;
        members.append(&mut self.members);
        self.members = members;
    }

    pub fn pop(&mut self) -> Option<Placed> {
        self.members.pop()
    }

    /// Inserts at `index`, or appends when `index` is past the end. Returns
    /// the index the member actually landed at.
    pub fn insert(&mut self, index: usize, placed: Placed) -> Result<usize, ShapeError> {
        let index = index.min(self.members.len());
        Self::check_offset(index, placed.offset)?;
        self.members.insert(index, placed);
        Ok(index)
    }

    pub fn width(&self) -> usize {
        self.size().width
    }

    pub fn height(&self) -> usize {
        self.size().height
    }

    /// The bounding box of every member, measured from the origin.
    pub fn size(&self) -> Size {
        self.members.iter().fold(Size::default(), |size, member| {
            let stop = member.stop();
            Size::new(size.width.max(stop.x as usize), size.height.max(stop.y as usize))
        })
    }

    /// Moves every member by `by`. Nothing moves if any member would end up
    /// at a negative offset.
    pub fn offset(&mut self, by: Pos) -> Result<(), ShapeError> {
        for (index, member) in self.members.iter().enumerate() {
            Self::check_offset(index, member.offset + by)?;
        }
        for member in &mut self.members {
            member.offset += by;
        }
        Ok(())
    }

    /// Offsets `other` by `by` and appends its members.
    pub fn place_on(&mut self, mut other: ShapeCollection, by: Pos) -> Result<(), ShapeError> {
        other.offset(by)?;
        self.extend(other);
        Ok(())
    }

    pub fn reverse(&mut self) {
        self.members.reverse();
    }

    pub fn reversed(&self) -> ShapeCollection {
        let mut copy = self.clone();
        copy.reverse();
        copy
    }

    /// Moves member `index` within the draw order and returns where it ended
    /// up, or `None` when there is no such member.
    pub fn prioritise(&mut self, index: usize, priority: Priority) -> Option<usize> {
        if index >= self.members.len() {
            return None;
        }
        let last = self.members.len() - 1;
        let target = match priority {
            Priority::Top => last,
            Priority::Bottom => 0,
            Priority::By(delta) => {
                let moved = index as i64 + i64::from(delta);
                moved.clamp(0, last as i64) as usize
            }
        };
        let member = self.members.remove(index);
        self.members.insert(target, member);
        Some(target)
    }

    /// Largest member first. Ties keep their relative order.
    pub fn sort_by_size(&mut self) {
        self.members.sort_by(|a, b| {
            let (a, b) = (a.shape.size(), b.shape.size());
            (b.width, b.height).cmp(&(a.width, a.height))
        });
    }

    /// Distinct glyphs found at `pos` across every member covering it, in
    /// draw order.
    pub fn glyphs_at(&self, pos: Pos) -> Vec<char> {
        let mut glyphs = Vec::new();
        for member in self.members.iter().filter(|member| member.covers(pos)) {
            if let Ok(Some(glyph)) = member.shape.get(pos - member.offset) {
                if !glyphs.contains(&glyph) {
                    glyphs.push(glyph);
                }
            }
        }
        glyphs
    }

    /// Writes `cell` into every member covering `pos`. Returns how many
    /// members were written.
    pub fn set_at(&mut self, pos: Pos, cell: Cell) -> usize {
        let mut written = 0;
        for member in &mut self.members {
            if member.covers(pos) && member.shape.set(pos - member.offset, cell).is_ok() {
                written += 1;
            }
        }
        written
    }

    /// Writes `shape` through to the members underneath it. Cells no member
    /// covers are dropped.
    pub fn draw_shape_on(&mut self, shape: &Shape, offset: Pos) -> usize {
        shape.cells().map(|(pos, cell)| self.set_at(pos + offset, cell)).sum()
    }

    /// Flattens the collection, later members overwriting earlier ones.
    pub fn combine(&self) -> Result<Shape, ShapeError> {
        self.combine_with(OverlapPolicy::LastWins)
    }

    pub fn combine_with(&self, policy: OverlapPolicy) -> Result<Shape, ShapeError> {
        let mut canvas = AutoShape::new(None);
        for member in &self.members {
            canvas.draw_on(&member.shape, member.offset, policy.draw_mode())?;
        }
        debug!(members = self.members.len(), size = %canvas.actual_size(), ?policy, "combined collection");
        Ok(canvas.into_shape())
    }

    fn check_offset(index: usize, offset: Pos) -> Result<(), ShapeError> {
        if offset.is_negative() {
            return Err(ShapeError::NegativeOffset { index, offset });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ShapeCollection {
    type Item = &'a Placed;
    type IntoIter = slice::Iter<'a, Placed>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl IntoIterator for ShapeCollection {
    type Item = Placed;
    type IntoIter = vec::IntoIter<Placed>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(width: usize, height: usize, glyph: char) -> Shape {
        Shape::new(width, height, Some(glyph))
    }

    #[test]
    fn size_is_the_bounding_box_not_the_sum() {
        let mut collection = ShapeCollection::new();
        collection.push_at(filled(3, 3, 'a'), ORIGIN).expect("origin is valid");
        collection.push_at(filled(3, 3, 'b'), Pos::new(2, 1)).expect("positive offset");

        assert_eq!(collection.size(), Size::new(5, 4));
        assert_eq!(ShapeCollection::new().size(), Size::new(0, 0));
    }

    #[test]
    fn combine_lets_the_last_member_win() {
        let collection = ShapeCollection::from_shapes([filled(3, 3, 'Y'), filled(3, 3, 'X')]);

        assert_eq!(collection.combine().expect("combines").to_string(), "XXX\nXXX\nXXX");
        assert_eq!(collection.reversed().combine().expect("combines").to_string(), "YYY\nYYY\nYYY");
    }

    #[test]
    fn combine_with_first_wins_keeps_earlier_glyphs() {
        let mut collection = ShapeCollection::new();
        collection.push_at(filled(2, 1, 'a'), ORIGIN).expect("valid");
        collection.push_at(filled(2, 1, 'b'), Pos::new(1, 0)).expect("valid");

        let first = collection.combine_with(OverlapPolicy::FirstWins).expect("combines");
        let error = collection.combine_with(OverlapPolicy::Error).unwrap_err();

        assert_eq!(first.to_string(), "aab");
        assert_eq!(
            error,
            ShapeError::Conflict { at: Pos::new(1, 0), existing: 'a', incoming: Some('b') }
        );
    }

    #[test]
    fn combine_leaves_gaps_between_members_empty() {
        let mut collection = ShapeCollection::new();
        collection.push_at(filled(1, 1, 'a'), ORIGIN).expect("valid");
        collection.push_at(filled(1, 1, 'b'), Pos::new(2, 0)).expect("valid");

        let combined = collection.combine().expect("combines");

        assert_eq!(combined.get(Pos::new(1, 0)), Ok(None));
    }

    #[test]
    fn offset_is_all_or_nothing() {
        let mut collection = ShapeCollection::new();
        collection.push_at(filled(1, 1, 'a'), Pos::new(3, 3)).expect("valid");
        collection.push_at(filled(1, 1, 'b'), Pos::new(0, 5)).expect("valid");

        let error = collection.offset(Pos::new(-1, 0)).unwrap_err();

        assert_eq!(error, ShapeError::NegativeOffset { index: 1, offset: Pos::new(-1, 5) });
        assert_eq!(collection.get(0).map(Placed::offset), Some(Pos::new(3, 3)));
    }

    #[test]
    fn push_rejects_negative_offsets() {
        let mut collection = ShapeCollection::new();

        assert!(collection.push_at(filled(1, 1, 'a'), Pos::new(0, -2)).is_err());
        assert!(collection.is_empty());
    }

    #[test]
    fn insert_past_the_end_appends() {
        let mut collection = ShapeCollection::from_shapes([filled(1, 1, 'a')]);

        let index = collection.insert(10, Placed::new(filled(1, 1, 'b'), ORIGIN)).expect("valid");

        assert_eq!(index, 1);
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn prepend_puts_new_members_underneath() {
        let mut collection = ShapeCollection::from_shapes([filled(2, 2, 'a')]);

        collection.prepend(ShapeCollection::from_shapes([filled(2, 2, 'b')]));

        assert_eq!(collection.combine().expect("combines").to_string(), "aa\naa");
    }

    #[test]
    fn place_on_offsets_the_incoming_members() {
        let mut collection = ShapeCollection::from_shapes([filled(2, 2, 'a')]);
        let incoming = ShapeCollection::from_shapes([filled(2, 2, 'b')]);

        collection.place_on(incoming, Pos::new(2, 0)).expect("offset is valid");

        assert_eq!(collection.combine().expect("combines").to_string(), "aabb\naabb");
    }

    #[test]
    fn prioritise_moves_members_in_draw_order() {
        let mut collection =
            ShapeCollection::from_shapes([filled(1, 1, 'a'), filled(1, 1, 'b'), filled(1, 1, 'c')]);

        assert_eq!(collection.prioritise(0, Priority::Top), Some(2));
        assert_eq!(collection.combine().expect("combines").to_string(), "a");
        assert_eq!(collection.prioritise(2, Priority::Bottom), Some(0));
        assert_eq!(collection.prioritise(0, Priority::By(5)), Some(2));
        assert_eq!(collection.prioritise(1, Priority::By(-1)), Some(0));
        assert_eq!(collection.prioritise(3, Priority::Top), None);
    }

    #[test]
    fn sort_by_size_puts_the_largest_first() {
        let mut collection =
            ShapeCollection::from_shapes([filled(1, 1, 'a'), filled(3, 2, 'b'), filled(2, 2, 'c')]);

        collection.sort_by_size();

        let widths: Vec<usize> = collection.iter().map(|member| member.shape().width()).collect();
        assert_eq!(widths, vec![3, 2, 1]);
    }

    #[test]
    fn glyphs_at_reports_each_distinct_glyph_once() {
        let mut collection = ShapeCollection::new();
        collection.push_at(filled(2, 2, '#'), ORIGIN).expect("valid");
        collection.push_at(filled(2, 2, '#'), Pos::new(1, 0)).expect("valid");
        collection.push_at(filled(1, 1, '.'), Pos::new(1, 1)).expect("valid");

        assert_eq!(collection.glyphs_at(Pos::new(1, 1)), vec!['#', '.']);
        assert_eq!(collection.glyphs_at(Pos::new(0, 1)), vec!['#']);
        assert!(collection.glyphs_at(Pos::new(5, 5)).is_empty());
    }

    #[test]
    fn set_at_writes_through_to_every_covering_member() {
        let mut collection = ShapeCollection::new();
        collection.push_at(filled(2, 1, 'a'), ORIGIN).expect("valid");
        collection.push_at(filled(2, 1, 'b'), Pos::new(1, 0)).expect("valid");

        assert_eq!(collection.set_at(Pos::new(1, 0), Some('+')), 2);
        assert_eq!(collection.set_at(Pos::new(9, 0), Some('+')), 0);
        assert_eq!(collection.get(1).map(|member| member.shape().to_string()), Some("+b".to_owned()));
    }

    #[test]
    fn draw_shape_on_drops_cells_outside_every_member() {
        let mut collection = ShapeCollection::from_shapes([filled(2, 2, '.')]);

        let written = collection.draw_shape_on(&Shape::from_rows(&["XX"]), Pos::new(1, 1));

        assert_eq!(written, 1);
        assert_eq!(collection.combine().expect("combines").to_string(), "..\n.X");
    }
}
