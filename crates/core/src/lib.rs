pub mod error;
pub mod grid;
pub mod manor;
pub mod pathfind;
pub mod shape;
pub mod types;

pub use error::{BoundsError, BuildError, ConfigError, ShapeError};
pub use grid::{Grid, Traversable};
pub use manor::{Manor, ManorBuilder, ManorConfig, ManorStyle, build_manor};
pub use pathfind::{Pathfind, SearchState};
pub use shape::{Cell, Shape, ShapeCollection};
pub use types::*;
