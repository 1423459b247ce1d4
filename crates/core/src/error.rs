//! Error kinds raised by the geometry core.
//! Geometry errors are contract violations and carry the full context of the
//! failing call. An unreachable pathfinding target is not an error.

use std::fmt;

use thiserror::Error;
use toml::de::Error as TomlError;

use crate::types::{Pos, Size};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("position {pos} is outside {width}x{height} bounds")]
pub struct BoundsError {
    pub pos: Pos,
    pub width: usize,
    pub height: usize,
}

impl BoundsError {
    pub fn new(pos: Pos, bounds: Size) -> Self {
        Self { pos, width: bounds.width, height: bounds.height }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error(transparent)]
    Bounds(#[from] BoundsError),
    #[error("glyph must be exactly one character, got {value:?}")]
    InvalidGlyph { value: String },
    #[error("can't normalise {axis} to {requested}, less than current {current}")]
    NormaliseShrink { axis: Axis, requested: usize, current: usize },
    #[error("tried to draw {incoming:?} onto {existing:?} at {at}")]
    Conflict { at: Pos, existing: char, incoming: Option<char> },
    #[error("shape of size {size} at {offset} does not fit inside {target}")]
    DoesNotFit { offset: Pos, size: Size, target: Size },
    #[error("section start {start} must be before stop {stop}")]
    SectionOrder { start: Pos, stop: Pos },
    #[error("member {index} would move to negative offset {offset}")]
    NegativeOffset { index: usize, offset: Pos },
    #[error("expected a single {expected}, got a {actual} shape")]
    NotAStrip { expected: &'static str, actual: Size },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Height => write!(f, "height"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse manor config: {0}")]
    Parse(#[from] TomlError),
    #[error("invalid glyph for `{field}`: {source}")]
    Glyph {
        field: &'static str,
        #[source]
        source: ShapeError,
    },
    #[error("invalid manor config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown manor style {value:?}, expected one-corridor, l-corridor or z-corridor")]
pub struct ParseStyleError {
    pub value: String,
}

/// Anything that can stop a manor from being built.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Shape(#[from] ShapeError),
}
