use std::convert::TryFrom;
use std::fs::File;
use std::io::{stdin, stdout, BufReader};
use std::path::PathBuf;
use std::process;

use structopt::StructOpt;
use termion::raw::IntoRawMode;
use termion::cursor;
use tracing::{info, warn, Level};

mod display;
mod error;
mod grid;
mod plan;
mod utils;
mod walk;

use display::{Screen, ScreenBuffer, Silent, Tile};
use error::Error;
use grid::Grid;
use plan::DigPlan;
use utils::Ticker;
use walk::{Bounds, Position, Walk};

#[derive(Debug, StructOpt)]
struct Opts {
    /// File holding the dig plan, read from stdin if not given
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,

    /// Decode instructions from their hex codes
    #[structopt(short, long)]
    encoded: bool,

    /// Fail if the dig plan does not return to where it started
    #[structopt(long)]
    strict: bool,

    /// Animate the fill at this many cells per second
    #[structopt(short, long)]
    speed: Option<u64>,

    /// Print fill events instead of drawing them
    #[structopt(short, long)]
    debug: bool,

    /// Print the dug out lagoon
    #[structopt(long)]
    show: bool,

    /// Largest grid to lay out, in cells
    #[structopt(long, default_value = "50000000")]
    max_cells: u64,

    /// Log more, repeat for even more
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

impl Opts {
    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn screen_position(bounds: Bounds, position: Position) -> Option<[u16; 2]> {
    let (column, row) = bounds.offset(position)?;
    Some([u16::try_from(column).ok()?, u16::try_from(row).ok()?])
}

fn draw(grid: &Grid, screen: &mut impl Screen) {
    screen.clear();
    for (position, cell) in grid.positions() {
        if let Some(tile_position) = screen_position(grid.bounds(), position) {
            screen.set_tile(tile_position, Tile::from(cell));
        }
    }
}

fn dig(plan: &DigPlan, opts: &Opts, screen: &mut impl Screen) -> Result<Grid, Error> {
    let walk = Walk::trace_within(plan, opts.encoded.into(), opts.max_cells)?;
    if opts.strict {
        walk.ensure_closed()?;
    } else if !walk.is_closed() {
        warn!(end = %walk.end(), "dig plan does not return to the origin");
    }

    let mut grid = Grid::rasterize(&walk, opts.max_cells)?;
    let seed = grid.interior_seed()?;

    let animate = opts.speed.is_some() || opts.debug;
    if animate {
        draw(&grid, screen);
    }

    let bounds = grid.bounds();
    let mut ticker = opts.speed.map(Ticker::with_rate);
    grid.flood_fill(seed, |position| {
        if !animate {
            return;
        }
        if let Some(tile_position) = screen_position(bounds, position) {
            screen.set_tile(tile_position, Tile::Dug);
        }
        if let Some(ref mut ticker) = ticker {
            ticker.wait();
        }
    });

    if animate {
        let below = u16::try_from(bounds.height()).unwrap_or(u16::max_value());
        screen.goto([0, below]);
    }

    Ok(grid)
}

fn run(opts: &Opts) -> Result<(), Error> {
    let plan = match opts.input {
        Some(ref path) => DigPlan::read(BufReader::new(File::open(path)?))?,
        None => DigPlan::read(stdin().lock())?,
    };

    if plan.is_empty() {
        warn!("dig plan is empty");
    }
    info!(instructions = plan.len(), "read dig plan");

    let grid = if opts.speed.is_some() && !opts.debug {
        let mut screen = cursor::HideCursor::from(stdout().into_raw_mode()?);
        dig(&plan, opts, &mut screen)?
    } else if opts.debug {
        dig(&plan, opts, &mut ScreenBuffer {})?
    } else {
        dig(&plan, opts, &mut Silent {})?
    };

    if opts.show {
        println!("{}", grid);
    }
    println!("{}", grid.area());

    Ok(())
}

fn main() {
    let opts = Opts::from_args();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(opts.log_level())
        .init();

    if let Err(err) = run(&opts) {
        eprintln!("{}", err);
        process::exit(1);
    }
}
