//! Uniform-cost search over a traversability oracle.
//! This module exists so movement code can ask "is there a way from here to
//! there" or "how do I reach any cell matching this". It does not own the
//! notion of what is passable; the oracle answers that.

use tracing::{debug, trace};

use crate::error::BoundsError;
use crate::grid::{DistanceGrid, Grid, INFINITY, PrevGrid, Traversable};
use crate::types::{Pos, neighbours};

type Condition<'a> = Box<dyn Fn(Pos) -> bool + 'a>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchState {
    /// The search has not run yet.
    Seeded,
    /// The target condition held at this position.
    Found(Pos),
    /// The frontier ran dry before the target condition held.
    Exhausted,
}

/// A single search from `start`. Runs lazily on the first query and keeps
/// its result; it is not meant to be reused for another start or target.
pub struct Pathfind<'a, G: Traversable + ?Sized> {
    grid: &'a G,
    start: Pos,
    target: Option<Pos>,
    target_condition: Option<Condition<'a>>,
    pos_condition: Option<Condition<'a>>,
    include_diagonals: bool,
    distances: DistanceGrid,
    previous: PrevGrid,
    state: SearchState,
    expanded: usize,
}

impl<'a, G: Traversable + ?Sized> Pathfind<'a, G> {
    pub fn new(grid: &'a G, start: Pos, target: Pos) -> Result<Self, BoundsError> {
        let mut search = Self::seeded(grid, start)?;
        if !target.is_within(grid.extent()) {
            return Err(BoundsError::new(target, grid.extent()));
        }
        search.target = Some(target);
        Ok(search)
    }

    /// Searches for the nearest cell satisfying `condition` instead of a
    /// fixed target. The first such cell reached becomes the target.
    pub fn with_condition(
        grid: &'a G,
        start: Pos,
        condition: impl Fn(Pos) -> bool + 'a,
    ) -> Result<Self, BoundsError> {
        let mut search = Self::seeded(grid, start)?;
        search.target_condition = Some(Box::new(condition));
        Ok(search)
    }

    /// Also accept any cell satisfying `condition` as the target.
    pub fn with_target_condition(mut self, condition: impl Fn(Pos) -> bool + 'a) -> Self {
        self.target_condition = Some(Box::new(condition));
        self
    }

    /// Restricts the cells the search may step on beyond passability.
    pub fn with_pos_condition(mut self, condition: impl Fn(Pos) -> bool + 'a) -> Self {
        self.pos_condition = Some(Box::new(condition));
        self
    }

    pub fn with_diagonals(mut self, include_diagonals: bool) -> Self {
        self.include_diagonals = include_diagonals;
        self
    }

    pub fn path_exists(&mut self) -> bool {
        matches!(self.run(), SearchState::Found(_))
    }

    /// The path from target back to start, target first. `None` when the
    /// target cannot be reached.
    pub fn get_path(&mut self) -> Option<Vec<Pos>> {
        let SearchState::Found(target) = self.run() else {
            return None;
        };
        let mut path = vec![target];
        let mut cursor = self.previous[target];
        while let Some(pos) = cursor {
            path.push(pos);
            cursor = self.previous[pos];
        }
        Some(path)
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    /// The fixed target, or the cell a condition search settled on.
    pub fn target(&self) -> Option<Pos> {
        self.target
    }

    /// Distance recorded for `pos` so far, if it has been reached.
    pub fn distance_to(&self, pos: Pos) -> Option<u32> {
        self.distances.get(pos).ok().copied().filter(|distance| *distance != INFINITY)
    }

    pub fn expanded_cells(&self) -> usize {
        self.expanded
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    fn seeded(grid: &'a G, start: Pos) -> Result<Self, BoundsError> {
        let extent = grid.extent();
        if !start.is_within(extent) {
            return Err(BoundsError::new(start, extent));
        }
        Ok(Self {
            grid,
            start,
            target: None,
            target_condition: None,
            pos_condition: None,
            include_diagonals: false,
            distances: DistanceGrid::distances(extent),
            previous: PrevGrid::new(extent, None),
            state: SearchState::Seeded,
            expanded: 0,
        })
    }

    fn run(&mut self) -> SearchState {
        if self.state != SearchState::Seeded {
            return self.state;
        }
        self.distances[self.start] = 0;
        if self.is_target(self.start) {
            self.target = Some(self.start);
            self.state = SearchState::Found(self.start);
            debug!(start = %self.start, "start already satisfies the target");
            return self.state;
        }

        let mut frontier = vec![self.start];
        let mut in_frontier = Grid::new(self.distances.size(), false);
        in_frontier[self.start] = true;

        while !frontier.is_empty() {
            let current = frontier.remove(0);
            in_frontier[current] = false;
            self.expanded += 1;
            trace!(%current, distance = self.distances[current], "expanding");

            if let Some(reached) = self.relax_neighbours(current, &mut frontier, &mut in_frontier) {
                self.target = Some(reached);
                self.state = SearchState::Found(reached);
                debug!(
                    start = %self.start,
                    target = %reached,
                    distance = self.distances[reached],
                    expanded = self.expanded,
                    "path found"
                );
                return self.state;
            }

            let distances = &self.distances;
            frontier.sort_by_key(|pos| distances[*pos]);
        }

        self.state = SearchState::Exhausted;
        debug!(start = %self.start, target = ?self.target, expanded = self.expanded, "no path");
        self.state
    }

    /// Relaxes every usable neighbour of `current`, then reports the first
    /// one, in neighbour order, that satisfies the target condition.
    fn relax_neighbours(
        &mut self,
        current: Pos,
        frontier: &mut Vec<Pos>,
        in_frontier: &mut Grid<bool>,
    ) -> Option<Pos> {
        let next_distance = self.distances[current].saturating_add(1);
        let mut reached = None;

        for pos in neighbours(current, self.include_diagonals) {
            if !self.distances.contains(pos) || !self.grid.is_passable(pos) || !self.accepts(pos) {
                continue;
            }
            if in_frontier[pos] {
                if self.distances[pos] > next_distance {
                    self.distances[pos] = next_distance;
                    self.previous[pos] = Some(current);
                }
            } else if self.distances[pos] == INFINITY {
                self.distances[pos] = next_distance;
                self.previous[pos] = Some(current);
                frontier.push(pos);
                in_frontier[pos] = true;
            }
            if reached.is_none() && self.is_target(pos) {
                reached = Some(pos);
            }
        }

        reached
    }

    fn is_target(&self, pos: Pos) -> bool {
        self.target == Some(pos) || self.target_condition.as_ref().is_some_and(|condition| condition(pos))
    }

    fn accepts(&self, pos: Pos) -> bool {
        self.pos_condition.as_ref().is_none_or(|condition| condition(pos))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::types::Size;

    fn open_grid(width: usize, height: usize) -> Grid<bool> {
        Grid::new(Size::new(width, height), true)
    }

    fn grid_from_rows(rows: &[&str]) -> Grid<bool> {
        let mut grid = Grid::new(Size::new(rows[0].len(), rows.len()), false);
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                grid[Pos::new(x as i32, y as i32)] = glyph != '#';
            }
        }
        grid
    }

    #[test]
    fn straight_corridor_path_is_reported_target_first() {
        let grid = open_grid(4, 1);
        let mut search = Pathfind::new(&grid, Pos::new(0, 0), Pos::new(3, 0)).expect("in bounds");

        let path = search.get_path();

        assert_eq!(
            path,
            Some(vec![Pos::new(3, 0), Pos::new(2, 0), Pos::new(1, 0), Pos::new(0, 0)])
        );
        assert_eq!(search.distance_to(Pos::new(3, 0)), Some(3));
    }

    #[test]
    fn start_equal_to_target_needs_no_search() {
        let grid = open_grid(3, 3);
        let start = Pos::new(1, 1);
        let mut search = Pathfind::new(&grid, start, start).expect("in bounds");

        assert!(search.path_exists());
        assert_eq!(search.get_path(), Some(vec![start]));
        assert_eq!(search.expanded_cells(), 0);
        assert_eq!(search.state(), SearchState::Found(start));
    }

    #[test]
    fn walled_off_target_has_no_path() {
        let grid = grid_from_rows(&[".....", "..#..", ".#.#.", "..#..", "....."]);
        let mut search = Pathfind::new(&grid, Pos::new(0, 0), Pos::new(2, 2)).expect("in bounds");

        assert!(!search.path_exists());
        assert_eq!(search.get_path(), None);
        assert_eq!(search.state(), SearchState::Exhausted);
        assert_eq!(search.target(), Some(Pos::new(2, 2)));
    }

    #[test]
    fn condition_target_binds_to_the_nearest_match() {
        let grid = open_grid(6, 1);
        let mut search =
            Pathfind::with_condition(&grid, Pos::new(0, 0), |pos| pos.x >= 3).expect("in bounds");

        let path = search.get_path().expect("reachable");

        assert_eq!(search.target(), Some(Pos::new(3, 0)));
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn condition_satisfied_at_start_returns_immediately() {
        let grid = open_grid(2, 2);
        let mut search = Pathfind::with_condition(&grid, Pos::new(1, 1), |_| true).expect("in bounds");

        assert_eq!(search.get_path(), Some(vec![Pos::new(1, 1)]));
        assert_eq!(search.expanded_cells(), 0);
    }

    #[test]
    fn pos_condition_can_block_the_only_route() {
        let grid = grid_from_rows(&["...", "##.", "..."]);
        let blocked = Pos::new(2, 1);
        let mut search = Pathfind::new(&grid, Pos::new(0, 0), Pos::new(0, 2))
            .expect("in bounds")
            .with_pos_condition(move |pos| pos != blocked);

        assert!(!search.path_exists());
    }

    #[test]
    fn diagonals_shorten_the_path() {
        let grid = open_grid(4, 4);
        let mut orthogonal = Pathfind::new(&grid, Pos::new(0, 0), Pos::new(3, 3)).expect("in bounds");
        let mut diagonal = Pathfind::new(&grid, Pos::new(0, 0), Pos::new(3, 3))
            .expect("in bounds")
            .with_diagonals(true);

        assert_eq!(orthogonal.get_path().map(|path| path.len()), Some(7));
        assert_eq!(diagonal.get_path().map(|path| path.len()), Some(4));
    }

    #[test]
    fn construction_rejects_positions_outside_the_grid() {
        let grid = open_grid(2, 2);

        assert!(Pathfind::new(&grid, Pos::new(0, 0), Pos::new(2, 0)).is_err());
        assert!(Pathfind::new(&grid, Pos::new(-1, 0), Pos::new(1, 1)).is_err());
    }

    #[test]
    fn repeated_queries_reuse_the_first_search() {
        let grid = open_grid(5, 5);
        let mut search = Pathfind::new(&grid, Pos::new(0, 0), Pos::new(4, 4)).expect("in bounds");

        assert!(search.path_exists());
        let expanded = search.expanded_cells();
        let _path = search.get_path();

        assert_eq!(search.expanded_cells(), expanded);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn open_grid_paths_follow_manhattan_distance(
            (width, height, start, target) in (1_i32..12, 1_i32..12).prop_flat_map(|(width, height)| {
                (
                    Just(width),
                    Just(height),
                    (0..width, 0..height).prop_map(|(x, y)| Pos::new(x, y)),
                    (0..width, 0..height).prop_map(|(x, y)| Pos::new(x, y)),
                )
            }),
        ) {
            let grid = open_grid(width as usize, height as usize);
            let mut search = Pathfind::new(&grid, start, target).expect("in bounds");

            let path = search.get_path().expect("open grids are connected");

            prop_assert_eq!(path.len() - 1, start.manhattan(target) as usize);
            prop_assert_eq!(path.first(), Some(&target));
            prop_assert_eq!(path.last(), Some(&start));
            for step in path.windows(2) {
                prop_assert_eq!(step[0].manhattan(step[1]), 1);
            }
        }
    }
}
