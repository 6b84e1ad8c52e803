//! Demo: sample a grid from circular obstacles, find a smoothed path across
//! it, then let a GOAP woodcutter walk that grid to fetch wood.
//!
//! Usage: `gridmind-demo [config.json]`. Set `RUST_LOG=debug` to see the
//! search and planning logs.

mod config;
mod woodcutter;

use std::path::Path;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use gridmind_core::Point;
use gridmind_paths::{NodeKind, Seeker};

use config::DemoConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => DemoConfig::load(Path::new(&path))?,
        None => DemoConfig::default(),
    };

    let layout = config.pathfinding.layout;
    let occupancy = layout.sample(|center, size| config.is_obstructed(center, size));
    log::info!(
        "sampled {}x{} grid, {} cells blocked",
        occupancy.width(),
        occupancy.height(),
        occupancy.blocked_count()
    );

    let mut seeker = Seeker::new(&config.pathfinding, occupancy)?;
    match seeker.search(config.from, config.to) {
        Some(path) => {
            println!("{}", render(&seeker));
            println!(
                "path: {} cells, {} waypoints after smoothing, length {:.2}",
                path.len(),
                path.vector_path.len(),
                path.length()
            );
            for v in &path.vector_path {
                println!("  {v}");
            }
        }
        None => log::warn!("no path from {} to {}", config.from, config.to),
    }

    woodcutter::run(&config, seeker);
    Ok(())
}

/// Draw the last search: `#` blocked, `*` path, `+` frontier, `,` explored.
fn render(seeker: &Seeker) -> String {
    let graph = seeker.graph();
    let pathfinder = seeker.pathfinder();
    let mut out = String::new();
    for y in (0..graph.height()).rev() {
        for x in 0..graph.width() {
            let p = Point::new(x, y);
            let ch = if graph.is_blocked(p) {
                '#'
            } else {
                match pathfinder.node_kind(p) {
                    NodeKind::Path => '*',
                    NodeKind::Frontier => '+',
                    NodeKind::Explored => ',',
                    NodeKind::Untouched => '.',
                }
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
