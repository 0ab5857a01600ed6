//! replan — plan once, then keep the plan current while walls come and go.
//!
//! Builds a random grid (or loads one with `--grid`), finds a path with A*,
//! opens a D* Lite session on the same grid and toggles random walls.  After
//! every edit the incremental answer is checked against a fresh A* on the
//! edited grid; any disagreement aborts the run.
//!
//! Set `RUST_LOG=gp_search=debug` to see per-search summaries.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail, ensure};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gp_core::{CellId, CellState, Coord, Cost, Grid, GridGraph};
use gp_search::{DStarLite, Path, SearchStats, find_path};

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "replan")]
#[command(about = "Grid path planning with incremental replanning")]
struct ReplanConfig {
    /// Grid width when generating
    #[arg(long, default_value_t = 24)]
    width: usize,

    /// Grid height when generating
    #[arg(long, default_value_t = 12)]
    height: usize,

    /// Probability that a free cell starts as a wall
    #[arg(long, default_value_t = 0.2)]
    density: f64,

    /// Seed for wall placement and edits
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of wall toggles to replan through
    #[arg(long, default_value_t = 10)]
    edits: usize,

    /// ASCII grid file to load instead of generating one
    #[arg(long)]
    grid: Option<PathBuf>,

    /// Print a JSON report instead of drawing the grid
    #[arg(long)]
    json: bool,
}

// ── Report ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct EditReport {
    at:         Coord,
    state:      CellState,
    cost:       Cost,
    astar_cost: Cost,
    stats:      SearchStats,
}

#[derive(Serialize)]
struct Report {
    width:      usize,
    height:     usize,
    walls:      usize,
    initial:    Path,
    edits:      Vec<EditReport>,
    final_path: Path,
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn build_grid(config: &ReplanConfig) -> Result<Grid> {
    if let Some(path) = &config.grid {
        return Grid::load(path).with_context(|| format!("loading grid {}", path.display()));
    }

    ensure!(config.width > 0 && config.height > 0, "grid must be at least 1x1");
    let mut grid = Grid::new(config.width, config.height);
    let far = Coord::new(config.width as i32 - 1, config.height as i32 - 1);
    grid.set(Coord::new(0, 0), CellState::Source)?;
    grid.set(far, CellState::Destination)?;
    grid.scatter_walls(config.density, config.seed);
    Ok(grid)
}

/// Copy the graph's current cell states back onto `grid` for drawing.
fn sync_grid(grid: &mut Grid, graph: &GridGraph) -> Result<()> {
    for cell in graph.cells() {
        grid.set(graph.coord(cell), graph.state(cell))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = ReplanConfig::parse();
    let mut grid = build_grid(&config)?;
    let mut graph = grid.build_graph();

    let source = grid.source().context("grid has no S cell")?;
    let destination = grid.destination().context("grid has no D cell")?;
    let start = graph.lookup(source)?;
    let goal = graph.lookup(destination)?;

    info!(
        width = grid.width(),
        height = grid.height(),
        walls = grid.count(CellState::Blocked),
        %source,
        %destination,
        "grid ready"
    );

    // 1. One-shot A*.
    let initial = find_path(&graph, start, goal);
    if !config.json {
        println!("A* cost {}  ({} cells)", initial.cost, initial.len());
        print!("{}", grid.render_path(&initial.coords));
        println!();
    }

    // 2. Incremental session.
    let started = Instant::now();
    let mut dsl = DStarLite::new(&mut graph, start, goal);
    let stats = dsl.compute_shortest_path();
    if dsl.shortest_path_cost() != initial.cost {
        bail!(
            "D* Lite cost {} disagrees with A* cost {}",
            dsl.shortest_path_cost(),
            initial.cost
        );
    }
    info!(expanded = stats.expanded, cost = dsl.shortest_path_cost(), "initial plan");

    // 3. Toggle random walls and replan after each.
    let cells = dsl.graph().cell_count() as u32;
    let mut rng = SmallRng::seed_from_u64(config.seed.wrapping_add(1));
    let mut edits = Vec::with_capacity(config.edits);

    while edits.len() < config.edits && cells > 2 {
        let cell = CellId(rng.gen_range(0..cells));
        if cell == start || cell == goal {
            continue;
        }
        let state = if dsl.graph().state(cell).is_blocked() {
            CellState::Free
        } else {
            CellState::Blocked
        };

        let stats = dsl.update_obstacle(cell, state);
        let cost = dsl.shortest_path_cost();
        let astar_cost = find_path(dsl.graph(), start, goal).cost;
        let at = dsl.graph().coord(cell);
        if cost != astar_cost {
            bail!("after setting {at} to {state}: D* Lite cost {cost}, A* cost {astar_cost}");
        }

        if !config.json {
            println!(
                "{:<10} {:<12} cost {:<6} expanded {}",
                at.to_string(),
                state.as_str(),
                cost,
                stats.expanded
            );
        }
        edits.push(EditReport { at, state, cost, astar_cost, stats });
    }

    let final_path = dsl.path();
    let elapsed = started.elapsed();
    sync_grid(&mut grid, dsl.graph())?;
    info!(edits = edits.len(), elapsed_ms = elapsed.as_secs_f64() * 1e3, "replanning done");

    if config.json {
        let report = Report {
            width: grid.width(),
            height: grid.height(),
            walls: grid.count(CellState::Blocked),
            initial,
            edits,
            final_path,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        if final_path.is_found() {
            println!("Final D* Lite cost {}  ({} cells)", final_path.cost, final_path.len());
        } else {
            println!("Final D* Lite: no path");
        }
        print!("{}", grid.render_path(&final_path.coords));
    }

    Ok(())
}
