use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use manor_core::manor::{Corridor, Room, seeded_rng};
use manor_core::pathfind::Pathfind;
use manor_core::{ManorBuilder, ManorStyle, Pos};
use serde::Serialize;
use tools::{init_tracing, load_config, parse_pos, passability};
use tracing::info;

/// Render one seeded manor floor plan, optionally with a route through it.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = ManorStyle::OneCorridor)]
    style: ManorStyle,
    /// TOML file overriding the default layout parameters
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Route start as x,y
    #[arg(long, value_parser = parse_pos)]
    from: Option<Pos>,
    /// Route end as x,y
    #[arg(long, value_parser = parse_pos, conflicts_with = "to_room")]
    to: Option<Pos>,
    /// Route to the nearest floor cell of this room instead of a fixed cell
    #[arg(long)]
    to_room: Option<usize>,
    #[arg(long)]
    diagonals: bool,
    /// Print a JSON report instead of the plan
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    seed: u64,
    style: ManorStyle,
    width: usize,
    height: usize,
    fingerprint: String,
    rooms: Vec<Room>,
    entrance: Option<usize>,
    corridor: Option<Corridor>,
    route: Option<Vec<Pos>>,
    plan: Vec<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let glyphs = config.glyphs()?;
    let builder = ManorBuilder::new(config)?;
    let manor = builder
        .build(&mut seeded_rng(args.seed), args.style)
        .with_context(|| format!("failed to build {} manor for seed {}", args.style, args.seed))?;
    let mut plan = manor.plan()?;
    let fingerprint = plan.fingerprint();

    let route = match args.from {
        None => {
            if args.to.is_some() || args.to_room.is_some() {
                bail!("--to and --to-room need a --from");
            }
            None
        }
        Some(from) => {
            let grid = passability(&plan, &glyphs);
            let mut search = match (args.to, args.to_room) {
                (Some(to), _) => Pathfind::new(&grid, from, to)?,
                (None, Some(index)) => {
                    let room = *manor
                        .rooms()
                        .get(index)
                        .with_context(|| format!("no room {index}, the manor has {}", manor.rooms().len()))?;
                    Pathfind::with_condition(&grid, from, move |pos| room.interior_contains(pos))?
                }
                (None, None) => bail!("--from needs either --to or --to-room"),
            }
            .with_diagonals(args.diagonals);
            let path = search.get_path();
            info!(%from, target = ?search.target(), found = path.is_some(), "route search");
            path
        }
    };

    if let Some(path) = &route {
        for pos in path {
            plan.set(*pos, Some('*'))?;
        }
    }

    if args.json {
        let report = Report {
            seed: args.seed,
            style: manor.style(),
            width: plan.width(),
            height: plan.height(),
            fingerprint: format!("{fingerprint:016x}"),
            rooms: manor.rooms().to_vec(),
            entrance: manor.entrance(),
            corridor: manor.corridor(),
            route,
            plan: plan.to_string().lines().map(str::to_owned).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{plan}");
    println!();
    println!("Seed: {} Style: {}", args.seed, manor.style());
    println!("Size: {}", plan.size());
    println!("Fingerprint: {fingerprint:016x}");
    println!("Rooms: {} ({} per row)", manor.rooms().len(), manor.bottom_row().len());
    if let Some(corridor) = manor.corridor() {
        println!("Corridor: {} long from {}", corridor.length, corridor.start);
    }
    match (&route, args.from) {
        (Some(path), _) => println!("Route: {} steps", path.len() - 1),
        (None, Some(_)) => println!("Route: unreachable"),
        (None, None) => {}
    }
    Ok(())
}
