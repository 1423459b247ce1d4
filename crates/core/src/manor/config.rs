//! Tunable layout parameters, loadable from TOML.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::shape::parse_glyph;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManorConfig {
    /// Default room width, walls included.
    pub room_width: usize,
    pub room_height: usize,
    /// The bottom row stops growing once it holds this many rooms.
    pub target_rooms: usize,
    /// Past this many rooms the bottom row may stop growing early.
    pub early_stop_after: usize,
    /// Early stop happens on a 1-in-`early_stop_odds` roll.
    pub early_stop_odds: u32,
    /// Rows a bottom-row room drops by to line up with its neighbours.
    pub top_offset: i32,
    /// How much the end rooms grow to make space for the corridor.
    pub adjust_by: usize,
    pub wall_glyph: String,
    pub floor_glyph: String,
    pub corridor_glyph: String,
}

impl Default for ManorConfig {
    fn default() -> Self {
        Self {
            room_width: 12,
            room_height: 7,
            target_rooms: 6,
            early_stop_after: 4,
            early_stop_odds: 4,
            top_offset: 2,
            adjust_by: 2,
            wall_glyph: "#".to_owned(),
            floor_glyph: ".".to_owned(),
            corridor_glyph: ".".to_owned(),
        }
    }
}

/// Glyphs used when rooms and the corridor are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomGlyphs {
    pub wall: char,
    pub floor: char,
    pub corridor: char,
}

impl Default for RoomGlyphs {
    fn default() -> Self {
        Self { wall: '#', floor: '.', corridor: '.' }
    }
}

impl ManorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.room_width < 3 || self.room_height < 3 {
            return Err(ConfigError::Invalid(format!(
                "rooms must be at least 3x3 to have an interior, got {}x{}",
                self.room_width, self.room_height
            )));
        }
        if self.target_rooms < 2 {
            return Err(ConfigError::Invalid(format!(
                "target_rooms must be at least 2, got {}",
                self.target_rooms
            )));
        }
        if self.early_stop_after < 1 {
            return Err(ConfigError::Invalid("early_stop_after must be at least 1".to_owned()));
        }
        if self.early_stop_odds < 1 {
            return Err(ConfigError::Invalid("early_stop_odds must be at least 1".to_owned()));
        }
        if self.top_offset < 0 {
            return Err(ConfigError::Invalid(format!(
                "top_offset must not be negative, got {}",
                self.top_offset
            )));
        }
        self.glyphs().map(|_| ())
    }

    pub fn glyphs(&self) -> Result<RoomGlyphs, ConfigError> {
        let glyph = |field: &'static str, value: &str| {
            parse_glyph(value).map_err(|source| ConfigError::Glyph { field, source })
        };
        Ok(RoomGlyphs {
            wall: glyph("wall_glyph", &self.wall_glyph)?,
            floor: glyph("floor_glyph", &self.floor_glyph)?,
            corridor: glyph("corridor_glyph", &self.corridor_glyph)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShapeError;

    #[test]
    fn empty_toml_gives_the_defaults() {
        let config = ManorConfig::from_toml_str("").expect("defaults are valid");

        assert_eq!(config, ManorConfig::default());
        assert_eq!(config.glyphs().expect("valid glyphs"), RoomGlyphs::default());
    }

    #[test]
    fn toml_overrides_individual_fields() {
        let config = ManorConfig::from_toml_str("room_width = 10\nwall_glyph = \"%\"\n")
            .expect("valid config");

        assert_eq!(config.room_width, 10);
        assert_eq!(config.room_height, 7);
        assert_eq!(config.glyphs().expect("valid glyphs").wall, '%');
    }

    #[test]
    fn multi_character_glyphs_are_rejected() {
        let error = ManorConfig::from_toml_str("floor_glyph = \"..\"").unwrap_err();

        assert!(matches!(
            error,
            ConfigError::Glyph { field: "floor_glyph", source: ShapeError::InvalidGlyph { .. } }
        ));
    }

    #[test]
    fn rooms_too_small_for_an_interior_are_rejected() {
        let error = ManorConfig::from_toml_str("room_height = 2").unwrap_err();

        assert!(matches!(error, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_keys_are_a_parse_error() {
        let error = ManorConfig::from_toml_str("rooms = 9").unwrap_err();

        assert!(matches!(error, ConfigError::Parse(_)));
    }
}
