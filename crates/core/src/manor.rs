//! Manor floor-plan generation on top of the shape algebra.
//! This module exists so a seed and a style turn into a reproducible room
//! layout. It does not decide what the rooms are used for.

mod builder;
mod config;
mod random;
mod room;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use builder::{Corridor, Manor, ManorBuilder};
pub use config::{ManorConfig, RoomGlyphs};
pub use random::{RandomSource, ScriptedRandom, seeded_rng};
pub use room::Room;

use crate::error::{BuildError, ParseStyleError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManorStyle {
    /// Two rows of rooms either side of a single straight corridor.
    #[default]
    OneCorridor,
    LCorridor,
    ZCorridor,
}

impl ManorStyle {
    pub const ALL: [ManorStyle; 3] =
        [ManorStyle::OneCorridor, ManorStyle::LCorridor, ManorStyle::ZCorridor];

    pub fn as_str(self) -> &'static str {
        match self {
            ManorStyle::OneCorridor => "one-corridor",
            ManorStyle::LCorridor => "l-corridor",
            ManorStyle::ZCorridor => "z-corridor",
        }
    }
}

impl fmt::Display for ManorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ManorStyle {
    type Err = ParseStyleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ManorStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == value)
            .ok_or_else(|| ParseStyleError { value: value.to_owned() })
    }
}

/// Builds a manor with the default config and a ChaCha8 stream seeded from
/// `seed`. The same seed and style always give the same layout.
pub fn build_manor(seed: u64, style: ManorStyle) -> Result<Manor, BuildError> {
    let builder = ManorBuilder::new(ManorConfig::default())?;
    Ok(builder.build(&mut seeded_rng(seed), style)?)
}
