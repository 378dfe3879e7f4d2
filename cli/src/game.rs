use std::io::{BufRead, Write};

use anyhow::{Context, bail};
use rand::prelude::*;
use tilelink_core::{
    Board, BoardGenerator, Coord2, GameConfig, RandomBoardGenerator, SelectOutcome, Session,
    SessionConfig, ShuffleOutcome,
};

use crate::render::render_session;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Select(Coord2),
    Hint,
    Shuffle,
    Tick(u16),
    Restart,
    Show,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> anyhow::Result<Self> {
        let words: Vec<&str> = line.split_whitespace().collect();
        Ok(match words.as_slice() {
            ["hint" | "h"] => Self::Hint,
            ["shuffle" | "s"] => Self::Shuffle,
            ["tick" | "t"] => Self::Tick(1),
            ["tick" | "t", count] => Self::Tick(count.parse().context("tick count")?),
            ["restart" | "r"] => Self::Restart,
            ["show" | "board"] | [] => Self::Show,
            ["quit" | "q" | "exit"] => Self::Quit,
            [row, col] => Self::Select((
                row.parse().context("row")?,
                col.parse().context("column")?,
            )),
            _ => bail!("unknown command {line:?}"),
        })
    }
}

/// Drives a session from text commands, the way a graphical host would from clicks and frames.
pub struct Player {
    session: Session,
    config: GameConfig,
    rng: SmallRng,
}

impl Player {
    pub fn new(config: GameConfig, session_config: SessionConfig, seed: u64) -> anyhow::Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = next_board(&mut rng, config)?;
        Ok(Self::with_board(board, config, session_config, rng))
    }

    pub fn with_board(board: Board, config: GameConfig, session_config: SessionConfig, rng: SmallRng) -> Self {
        Self {
            session: Session::new(board, session_config),
            config,
            rng,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> anyhow::Result<()> {
        writeln!(out, "{}", render_session(&self.session))?;
        for line in input.lines() {
            let line = line.context("Could not read command")?;
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(out, "error: {err:#}")?;
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }
            self.execute(command, out)?;
        }
        Ok(())
    }

    pub fn execute(&mut self, command: Command, out: &mut impl Write) -> anyhow::Result<()> {
        log::debug!("Command: {:?}", command);
        match command {
            Command::Select(coords) => match self.session.select(coords) {
                Ok(outcome) => self.report_selection(outcome, out)?,
                Err(err) => writeln!(out, "error: {err}")?,
            },
            Command::Hint => match self.session.hint() {
                Some(hint) => {
                    writeln!(out, "hint: {:?} and {:?} via {:?}", hint.first, hint.second, hint.path.points())?;
                    writeln!(out, "{}", render_session(&self.session))?;
                }
                None => writeln!(out, "no moves left, try shuffle")?,
            },
            Command::Shuffle => match self.session.shuffle(&mut self.rng) {
                Ok(ShuffleOutcome::Unsolvable) => writeln!(out, "board cannot be made solvable, try restart")?,
                Ok(outcome) => {
                    log::info!("Shuffle: {:?}", outcome);
                    writeln!(out, "{}", render_session(&self.session))?;
                }
                Err(err) => writeln!(out, "error: {err}")?,
            },
            Command::Tick(count) => {
                for _ in 0..count {
                    self.session.tick();
                }
                writeln!(out, "{}", render_session(&self.session))?;
            }
            Command::Restart => {
                let board = next_board(&mut self.rng, self.config)?;
                self.session.restart(board);
                writeln!(out, "{}", render_session(&self.session))?;
            }
            Command::Show => writeln!(out, "{}", render_session(&self.session))?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn report_selection(&self, outcome: SelectOutcome, out: &mut impl Write) -> anyhow::Result<()> {
        match &outcome {
            SelectOutcome::NoChange => writeln!(out, "nothing there")?,
            SelectOutcome::Selected | SelectOutcome::Reselected | SelectOutcome::Deselected => {}
            SelectOutcome::Matched(path) => {
                writeln!(out, "matched via {:?}, score {}", path.points(), self.session.score())?;
            }
            SelectOutcome::Cleared(path) => {
                writeln!(out, "matched via {:?}, score {}", path.points(), self.session.score())?;
                writeln!(out, "board cleared! type restart for a new round")?;
            }
        }
        if outcome.has_update() {
            writeln!(out, "{}", render_session(&self.session))?;
        }
        if !self.session.is_finished() && !self.session.has_moves() {
            writeln!(out, "no moves left, try shuffle")?;
        }
        Ok(())
    }
}

fn next_board(rng: &mut SmallRng, config: GameConfig) -> anyhow::Result<Board> {
    let seed = rng.random();
    log::debug!("Generating board with seed {}", seed);
    RandomBoardGenerator::with_seed(seed)
        .generate(config)
        .context("Could not generate a board")
}
