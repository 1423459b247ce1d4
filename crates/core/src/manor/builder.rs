//! The one-corridor layout: a bottom row grown outwards from the entrance
//! hall, a matching top row, and a corridor strip between them.

use serde::Serialize;
use tracing::debug;

use super::ManorStyle;
use super::config::{ManorConfig, RoomGlyphs};
use super::random::RandomSource;
use super::room::Room;
use crate::error::{ConfigError, ShapeError};
use crate::shape::{
    AdjoinOptions, Composite, Row, Shape, ShapeCollection, StackOptions, adjoin, underneath,
};
use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Corridor {
    pub start: Pos,
    pub length: usize,
}

/// A composed floor plan and the rooms it was built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Manor {
    style: ManorStyle,
    layout: ShapeCollection,
    rooms: Vec<Room>,
    top_row_len: usize,
    entrance: Option<usize>,
    corridor: Option<Corridor>,
}

impl Manor {
    fn empty(style: ManorStyle) -> Self {
        Self {
            style,
            layout: ShapeCollection::new(),
            rooms: Vec::new(),
            top_row_len: 0,
            entrance: None,
            corridor: None,
        }
    }

    pub fn style(&self) -> ManorStyle {
        self.style
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    pub fn layout(&self) -> &ShapeCollection {
        &self.layout
    }

    pub fn into_layout(self) -> ShapeCollection {
        self.layout
    }

    /// Every room, top row left to right, then bottom row left to right.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn top_row(&self) -> &[Room] {
        &self.rooms[..self.top_row_len]
    }

    pub fn bottom_row(&self) -> &[Room] {
        &self.rooms[self.top_row_len..]
    }

    /// Index into `rooms` of the entrance hall.
    pub fn entrance(&self) -> Option<usize> {
        self.entrance
    }

    pub fn corridor(&self) -> Option<Corridor> {
        self.corridor
    }

    /// Flattens the layout into a single canvas.
    pub fn plan(&self) -> Result<Shape, ShapeError> {
        self.layout.combine()
    }

    /// The first room whose floor covers `pos`.
    pub fn room_at(&self, pos: Pos) -> Option<usize> {
        self.rooms.iter().position(|room| room.interior_contains(pos))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManorBuilder {
    config: ManorConfig,
    glyphs: RoomGlyphs,
}

impl ManorBuilder {
    pub fn new(config: ManorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let glyphs = config.glyphs()?;
        Ok(Self { config, glyphs })
    }

    pub fn config(&self) -> &ManorConfig {
        &self.config
    }

    pub fn build<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        style: ManorStyle,
    ) -> Result<Manor, ShapeError> {
        match style {
            ManorStyle::OneCorridor => self.build_one_corridor(rng),
            ManorStyle::LCorridor | ManorStyle::ZCorridor => {
                debug!(%style, "layout style not implemented yet, returning an empty manor");
                Ok(Manor::empty(style))
            }
        }
    }

    fn build_one_corridor<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<Manor, ShapeError> {
        let (mut bottom, entrance) = self.grow_bottom_row(rng);
        let mut top = vec![self.default_room(); bottom.len()];
        let overlap = self.adjust_edges(rng, &mut top, &mut bottom);

        let top_row = self.compose_top_row(&top)?;
        let bottom_row = self.compose_bottom_row(&bottom)?;
        let stacked = underneath(
            top_row,
            bottom_row,
            &StackOptions { overlap, collect: true, ..StackOptions::default() },
        )?;
        let mut layout = stacked.into_collection();

        for (room, member) in top.iter_mut().chain(bottom.iter_mut()).zip(layout.iter()) {
            room.place(member.offset());
        }

        let corridor = Corridor {
            start: Pos::new(self.config.room_width as i32, self.config.room_height as i32),
            length: layout.width().saturating_sub(2 * self.config.room_width),
        };
        let corridor = if corridor.length > 0 {
            let strip = Row::new(corridor.length, Some(self.glyphs.corridor));
            layout.push_at(strip.into_shape(), corridor.start)?;
            Some(corridor)
        } else {
            None
        };
        debug!(
            rooms_per_row = top.len(),
            width = layout.width(),
            height = layout.height(),
            corridor_length = corridor.map_or(0, |corridor| corridor.length),
            "built one-corridor manor"
        );

        let top_row_len = top.len();
        let mut rooms = top;
        rooms.extend(bottom);
        Ok(Manor {
            style: ManorStyle::OneCorridor,
            layout,
            rooms,
            top_row_len,
            entrance: Some(top_row_len + entrance),
            corridor,
        })
    }

    fn default_room(&self) -> Room {
        Room::new(self.config.room_width, self.config.room_height)
    }

    /// Grows the bottom row from the entrance hall, alternating sides so
    /// neither side is ever more than one room ahead. Returns the row and the
    /// entrance hall's index in it.
    fn grow_bottom_row<R: RandomSource + ?Sized>(&self, rng: &mut R) -> (Vec<Room>, usize) {
        let mut row = vec![self.default_room()];
        let mut entrance = 0;
        let (mut left, mut right) = (0_usize, 0_usize);

        while row.len() < self.config.target_rooms {
            if row.len() > self.config.early_stop_after
                && rng.range_inclusive(1, i64::from(self.config.early_stop_odds)) == 1
            {
                debug!(rooms = row.len(), "bottom row stopped early");
                break;
            }
            let grow_right = if left == right { rng.coin_flip() } else { left > right };
            if grow_right {
                row.push(self.default_room());
                right += 1;
            } else {
                row.insert(0, self.default_room());
                left += 1;
                entrance += 1;
            }
        }

        (row, entrance)
    }

    /// Enlarges the end rooms to leave space for the corridor and returns
    /// the overlap the two rows are stacked with.
    fn adjust_edges<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        top: &mut [Room],
        bottom: &mut [Room],
    ) -> i32 {
        let by = self.config.adjust_by;
        let last = bottom.len() - 1;
        let inner_last = last.saturating_sub(1);
        let strategy = rng.range_inclusive(0, 2);
        debug!(strategy, "edge adjustment");

        match strategy {
            2 => {
                bottom[0].height += by;
                bottom[last].height += by;
                top[0].width += by;
                top[last].width += by;
                bottom[1].width += by;
                bottom[inner_last].width += by;
                1
            }
            1 => {
                let adjusted = if rng.coin_flip() { last } else { 0 };
                let other = last - adjusted;
                bottom[adjusted].height += by;
                top[other].height += by;
                bottom[other].width += by;
                top[adjusted].width += by;
                3
            }
            _ => {
                top[0].height += by;
                top[last].height += by;
                bottom[0].width += by;
                bottom[last].width += by;
                top[1].width += by;
                top[inner_last].width += by;
                3
            }
        }
    }

    fn compose_top_row(&self, rooms: &[Room]) -> Result<Composite, ShapeError> {
        let options = AdjoinOptions { overlap: 1, collect: true, ..AdjoinOptions::default() };
        let mut shapes = rooms.iter().map(|room| room.as_shape(&self.glyphs));
        let Some(first) = shapes.next() else {
            return Ok(ShapeCollection::new().into());
        };
        shapes.try_fold(Composite::from(first), |row, shape| adjoin(row, shape, &options))
    }

    /// Lines the bottom row up along its roofline. When the first two rooms
    /// match in height both drop by `top_offset`, and later rooms drop too
    /// unless they are taller than the first. Otherwise only rooms shorter
    /// than the first drop.
    fn compose_bottom_row(&self, rooms: &[Room]) -> Result<Composite, ShapeError> {
        let [first, second, rest @ ..] = rooms else {
            return self.compose_top_row(rooms);
        };
        let top_offset = self.config.top_offset;
        let offset_both = first.height == second.height;
        let mut row = adjoin(
            first.as_shape(&self.glyphs),
            second.as_shape(&self.glyphs),
            &AdjoinOptions { overlap: 1, top_offset, collect: true, offset_both, ..AdjoinOptions::default() },
        )?;
        for room in rest {
            let flush = (room.height == first.height && !offset_both) || room.height > first.height;
            let options = AdjoinOptions {
                overlap: 1,
                top_offset: if flush { 0 } else { top_offset },
                collect: true,
                ..AdjoinOptions::default()
            };
            row = adjoin(row, room.as_shape(&self.glyphs), &options)?;
        }
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manor::{ScriptedRandom, seeded_rng};

    fn builder() -> ManorBuilder {
        ManorBuilder::new(ManorConfig::default()).expect("default config is valid")
    }

    #[test]
    fn bottom_row_alternates_sides_and_tracks_the_entrance() {
        let mut rng = ScriptedRandom::new([0, 0, 2, 0]);

        let (row, entrance) = builder().grow_bottom_row(&mut rng);

        assert_eq!(row.len(), 6);
        assert_eq!(entrance, 3, "three rooms were added on the left");
    }

    #[test]
    fn bottom_row_can_stop_after_five_rooms() {
        let mut rng = ScriptedRandom::new([1, 1, 1]);

        let (row, _) = builder().grow_bottom_row(&mut rng);

        assert_eq!(row.len(), 5);
    }

    #[test]
    fn edge_strategy_two_grows_bottom_heights_and_uses_overlap_one() {
        let mut rng = ScriptedRandom::new([2]);
        let mut top = vec![Room::new(12, 7); 6];
        let mut bottom = vec![Room::new(12, 7); 6];

        let overlap = builder().adjust_edges(&mut rng, &mut top, &mut bottom);

        assert_eq!(overlap, 1);
        assert_eq!((bottom[0].height, bottom[5].height), (9, 9));
        assert_eq!((top[0].width, top[5].width), (14, 14));
        assert_eq!((bottom[1].width, bottom[4].width), (14, 14));
        assert_eq!(top[2], Room::new(12, 7));
    }

    #[test]
    fn edge_strategy_one_adjusts_opposite_ends() {
        let mut rng = ScriptedRandom::new([1, 1]);
        let mut top = vec![Room::new(12, 7); 5];
        let mut bottom = vec![Room::new(12, 7); 5];

        let overlap = builder().adjust_edges(&mut rng, &mut top, &mut bottom);

        assert_eq!(overlap, 3);
        assert_eq!(bottom[4].height, 9);
        assert_eq!(top[0].height, 9);
        assert_eq!(bottom[0].width, 14);
        assert_eq!(top[4].width, 14);
    }

    #[test]
    fn bottom_row_drops_rooms_that_match_the_roofline() {
        let rooms = [Room::new(12, 9), Room::new(12, 7), Room::new(12, 7), Room::new(12, 9)];

        let row = builder().compose_bottom_row(&rooms).expect("composes").into_collection();

        let offsets: Vec<Pos> = row.iter().map(|member| member.offset()).collect();
        assert_eq!(
            offsets,
            vec![Pos::new(0, 0), Pos::new(11, 2), Pos::new(22, 2), Pos::new(33, 0)]
        );
    }

    #[test]
    fn bottom_row_with_matching_first_pair_offsets_both() {
        let rooms = [Room::new(12, 7), Room::new(12, 7), Room::new(12, 9)];

        let row = builder().compose_bottom_row(&rooms).expect("composes").into_collection();

        let offsets: Vec<Pos> = row.iter().map(|member| member.offset()).collect();
        assert_eq!(offsets, vec![Pos::new(0, 2), Pos::new(11, 2), Pos::new(22, 0)]);
    }

    #[test]
    fn unimplemented_styles_return_an_empty_manor() {
        let mut rng = seeded_rng(3);

        for style in [ManorStyle::LCorridor, ManorStyle::ZCorridor] {
            let manor = builder().build(&mut rng, style).expect("stubs never fail");
            assert!(manor.is_empty());
            assert!(manor.rooms().is_empty());
            assert_eq!(manor.plan().expect("empty plan").size().area(), 0);
        }
    }

    #[test]
    fn rooms_are_placed_where_the_layout_put_them() {
        let manor = builder().build(&mut seeded_rng(11), ManorStyle::OneCorridor).expect("builds");

        for (room, member) in manor.rooms().iter().zip(manor.layout().iter()) {
            assert_eq!(room.start, Some(member.offset()));
            assert_eq!(room.size(), member.shape().size());
        }
        let entrance = manor.entrance().expect("one-corridor manors have an entrance");
        assert!(entrance >= manor.top_row().len());
    }
}
