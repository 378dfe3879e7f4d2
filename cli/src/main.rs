use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use tilelink_core::{Board, BoardGenerator, Coord, GameConfig, RandomBoardGenerator, count_moves, find_hint};
use tracing_subscriber::EnvFilter;

mod game;
mod render;
mod settings;

use settings::{Overrides, Preset, Settings};

#[derive(Parser, Debug)]
#[command(version, about = "Tile matching boards with at most two-turn connections", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// TOML file with `[game]` and `[session]` settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Start from a preset board shape
    #[arg(short, long, global = true)]
    preset: Option<Preset>,

    #[arg(long, global = true)]
    rows: Option<Coord>,

    #[arg(long, global = true)]
    cols: Option<Coord>,

    /// Number of distinct tile kinds
    #[arg(long, global = true)]
    kinds: Option<u8>,

    /// Do not wrap the board in an empty ring
    #[arg(long, global = true)]
    no_border: bool,

    /// Force a seed instead of random
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a board and print it
    Generate {
        /// Print the board as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the first available move
    Hint {
        /// Text board to read instead of generating one, `.` for empty cells and letters for tiles
        #[arg(long)]
        board: Option<PathBuf>,
    },
    /// Play a round, reading `row col` picks and commands from stdin
    Play,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(args.verbose.tracing_level_filter().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let overrides = Overrides {
        preset: args.preset,
        rows: args.rows,
        cols: args.cols,
        kinds: args.kinds,
        no_border: args.no_border,
    };
    let config = overrides.apply(settings.game);
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}, config: {:?}", seed, config);

    match args.command {
        Command::Generate { json } => {
            let board = generate(config, seed)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&board)?);
            } else {
                println!("{board}");
                println!("moves available: {}", count_moves(&board));
            }
        }
        Command::Hint { board } => {
            let board = match board {
                Some(path) => read_board(&path)?,
                None => generate(config, seed)?,
            };
            println!("{}", render::render_board(&board, None, &[], &[]));
            match find_hint(&board) {
                Some(hint) => println!(
                    "{:?} and {:?} via {:?}",
                    hint.first,
                    hint.second,
                    hint.path.points()
                ),
                None => println!("no moves"),
            }
        }
        Command::Play => {
            let mut player = game::Player::new(config, settings.session, seed)?;
            player.run(io::stdin().lock(), &mut io::stdout().lock())?;
        }
    }
    Ok(())
}

fn generate(config: GameConfig, seed: u64) -> anyhow::Result<Board> {
    RandomBoardGenerator::with_seed(seed)
        .generate(config)
        .context("Could not generate a board")
}

fn read_board(path: &Path) -> anyhow::Result<Board> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read board from {}", path.display()))?;
    let rows: Vec<&str> = text.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
    Board::from_rows(rows.as_slice()).with_context(|| format!("Invalid board in {}", path.display()))
}
