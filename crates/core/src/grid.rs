//! Fixed-size 2-D arrays and the traversability oracle the search consumes.
//! This module exists so pathfinding works over any passability layer.
//! It does not decide what makes a cell passable.

use std::ops::{Index, IndexMut};

use crate::error::BoundsError;
use crate::shape::{Cell, Shape};
use crate::types::{Pos, RectIter, Size};

/// Tentative distance of a cell the search has not reached.
pub const INFINITY: u32 = u32::MAX;

pub type DistanceGrid = Grid<u32>;
pub type PrevGrid = Grid<Option<Pos>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    size: Size,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(size: Size, fill: T) -> Self {
        Self { size, cells: vec![fill; size.area()] }
    }
}

impl<T> Grid<T> {
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.width
    }

    pub fn height(&self) -> usize {
        self.size.height
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.is_within(self.size)
    }

    pub fn get(&self, pos: Pos) -> Result<&T, BoundsError> {
        let index = self.index_of(pos)?;
        Ok(&self.cells[index])
    }

    pub fn get_mut(&mut self, pos: Pos) -> Result<&mut T, BoundsError> {
        let index = self.index_of(pos)?;
        Ok(&mut self.cells[index])
    }

    pub fn set(&mut self, pos: Pos, value: T) -> Result<(), BoundsError> {
        *self.get_mut(pos)? = value;
        Ok(())
    }

    /// Every cell in row-major order with its position.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &T)> + '_ {
        RectIter::from_size(self.size).zip(self.cells.iter())
    }

    fn index_of(&self, pos: Pos) -> Result<usize, BoundsError> {
        if !self.contains(pos) {
            return Err(BoundsError::new(pos, self.size));
        }
        Ok(pos.y as usize * self.size.width + pos.x as usize)
    }

    /// Maps every cell of `shape` through `map`, reading short rows as empty.
    pub fn from_shape(shape: &Shape, map: impl Fn(Cell) -> T) -> Self {
        let size = shape.size();
        let cells = RectIter::from_size(size)
            .map(|pos| map(shape.get(pos).unwrap_or(None)))
            .collect();
        Self { size, cells }
    }
}

impl DistanceGrid {
    pub fn distances(size: Size) -> Self {
        Self::new(size, INFINITY)
    }
}

impl<T> Index<Pos> for Grid<T> {
    type Output = T;

    fn index(&self, pos: Pos) -> &T {
        match self.get(pos) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T> IndexMut<Pos> for Grid<T> {
    fn index_mut(&mut self, pos: Pos) -> &mut T {
        match self.index_of(pos) {
            Ok(index) => &mut self.cells[index],
            Err(error) => panic!("{error}"),
        }
    }
}

/// The question a search asks of the world: may a walker stand on `pos`?
pub trait Traversable {
    fn extent(&self) -> Size;

    /// Positions outside `extent` must report `false`.
    fn is_passable(&self, pos: Pos) -> bool;
}

impl Traversable for Grid<bool> {
    fn extent(&self) -> Size {
        self.size
    }

    fn is_passable(&self, pos: Pos) -> bool {
        self.get(pos).is_ok_and(|passable| *passable)
    }
}
