//! Shared plumbing for the command-line front-ends: config loading, logging
//! setup and the checks a generated manor must pass.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use manor_core::grid::Grid;
use manor_core::manor::RoomGlyphs;
use manor_core::{Manor, ManorConfig, Pos, Shape};
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so plans printed on stdout stay clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

/// Reads a TOML config, or falls back to the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<ManorConfig> {
    let Some(path) = path else {
        return Ok(ManorConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    ManorConfig::from_toml_str(&text)
        .with_context(|| format!("invalid config file {}", path.display()))
}

/// Parses `x,y` into a position.
pub fn parse_pos(value: &str) -> Result<Pos, String> {
    let (x, y) = value.split_once(',').ok_or_else(|| format!("expected x,y, got {value:?}"))?;
    let coordinate = |text: &str| {
        text.trim().parse::<i32>().map_err(|error| format!("bad coordinate {text:?}: {error}"))
    };
    Ok(Pos::new(coordinate(x)?, coordinate(y)?))
}

/// Floor and corridor cells are walkable, everything else blocks.
pub fn passability(plan: &Shape, glyphs: &RoomGlyphs) -> Grid<bool> {
    Grid::from_shape(plan, |cell| cell == Some(glyphs.floor) || cell == Some(glyphs.corridor))
}

/// Structural checks every one-corridor manor must satisfy.
pub fn check_manor(manor: &Manor, plan: &Shape, config: &ManorConfig) -> Result<()> {
    if manor.is_empty() {
        ensure!(manor.rooms().is_empty(), "empty manor still lists rooms");
        return Ok(());
    }
    let bottom = manor.bottom_row().len();
    ensure!(
        manor.top_row().len() == bottom,
        "top row has {} rooms, bottom row {bottom}",
        manor.top_row().len()
    );
    let fewest = (config.early_stop_after + 1).min(config.target_rooms);
    ensure!(
        (fewest..=config.target_rooms).contains(&bottom),
        "bottom row has {bottom} rooms"
    );
    ensure!(plan.size() == manor.layout().size(), "plan size differs from the layout bounds");

    for (index, room) in manor.rooms().iter().enumerate() {
        let (Some(start), Some(stop)) = (room.start, room.stop) else {
            bail!("room {index} was never placed");
        };
        ensure!(
            !start.is_negative() && stop.is_within(plan.size()),
            "room {index} spans {start}..{stop} outside the {} plan",
            plan.size()
        );
    }

    let entrance = manor.entrance().context("one-corridor manor has no entrance")?;
    ensure!(entrance >= manor.top_row().len(), "entrance {entrance} is not in the bottom row");

    if let Some(corridor) = manor.corridor() {
        ensure!(
            corridor.length == plan.width().saturating_sub(2 * config.room_width),
            "corridor length {} does not match plan width {}",
            corridor.length,
            plan.width()
        );
    }
    Ok(())
}
