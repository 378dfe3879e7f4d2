use alloc::vec::Vec;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::*;

/// A connectable pair of same-kind tiles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub first: Coord2,
    pub second: Coord2,
    pub path: Path,
}

/// Every connectable same-kind pair, ordered by the row-major position of the first tile, then of the second.
pub fn iter_moves(board: &Board) -> MoveIter<'_> {
    MoveIter {
        board,
        occupied: board.iter_occupied().map(|(coords, _)| coords).collect(),
        first: 0,
        second: 0,
    }
}

#[derive(Debug)]
pub struct MoveIter<'a> {
    board: &'a Board,
    occupied: Vec<Coord2>,
    first: usize,
    second: usize,
}

impl Iterator for MoveIter<'_> {
    type Item = Hint;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.second += 1;
            if self.second >= self.occupied.len() {
                self.first += 1;
                self.second = self.first + 1;
                if self.second >= self.occupied.len() {
                    return None;
                }
            }

            let (first, second) = (self.occupied[self.first], self.occupied[self.second]);
            if let Some(path) = match_path(self.board, first, second) {
                return Some(Hint {
                    first,
                    second,
                    path,
                });
            }
        }
    }
}

/// Whether at least one pair can be matched; an empty board is not solvable.
pub fn is_solvable(board: &Board) -> bool {
    iter_moves(board).next().is_some()
}

pub fn find_hint(board: &Board) -> Option<Hint> {
    iter_moves(board).next()
}

pub fn count_moves(board: &Board) -> usize {
    iter_moves(board).count()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShuffleOutcome {
    /// A random redistribution produced a solvable board.
    Shuffled { attempts: u32 },
    /// No random draw was solvable, kinds were swapped to make one pair connectable.
    Forced,
    /// Not even a forced swap can make the board solvable.
    Unsolvable,
}

impl ShuffleOutcome {
    pub const fn is_solvable(self) -> bool {
        !matches!(self, Self::Unsolvable)
    }
}

/// Redistributes the kinds of the occupied cells among the same positions until the board is solvable.
///
/// Gives up on randomness after `max_attempts` draws and falls back to [`force_connectable_pair`].
pub fn shuffle<R: Rng + ?Sized>(board: &mut Board, rng: &mut R, max_attempts: u32) -> ShuffleOutcome {
    let (positions, mut kinds): (Vec<Coord2>, Vec<TileKind>) = board.iter_occupied().unzip();
    if positions.len() < 2 {
        return ShuffleOutcome::Unsolvable;
    }

    for attempt in 1..=max_attempts {
        kinds.shuffle(rng);
        for (&coords, &kind) in positions.iter().zip(&kinds) {
            board[coords] = Cell::Occupied(kind);
        }
        if is_solvable(board) {
            log::debug!("Shuffled {} tiles in {} attempts", positions.len(), attempt);
            return ShuffleOutcome::Shuffled { attempts: attempt };
        }
    }

    log::warn!(
        "No solvable shuffle after {} attempts, forcing a connectable pair",
        max_attempts
    );
    if force_connectable_pair(board) {
        ShuffleOutcome::Forced
    } else {
        log::warn!("Board cannot be made solvable");
        ShuffleOutcome::Unsolvable
    }
}

/// Swaps kinds so that the first geometrically connectable pair of tiles shares a kind.
///
/// Occupancy and the number of tiles of each kind are preserved. Returns `false` when no pair of tiles is connectable
/// or no swap partner exists.
pub fn force_connectable_pair(board: &mut Board) -> bool {
    let occupied: Vec<(Coord2, TileKind)> = board.iter_occupied().collect();

    for (index, &(first, first_kind)) in occupied.iter().enumerate() {
        for &(second, second_kind) in &occupied[index + 1..] {
            if !connection_exists(board, first, second) {
                continue;
            }
            if first_kind == second_kind {
                return true;
            }

            let partner = |kind: TileKind| {
                occupied
                    .iter()
                    .find(|&&(coords, other)| other == kind && coords != first && coords != second)
                    .map(|&(coords, _)| coords)
            };
            if let Some(partner) = partner(first_kind) {
                board[partner] = Cell::Occupied(second_kind);
                board[second] = Cell::Occupied(first_kind);
            } else if let Some(partner) = partner(second_kind) {
                board[partner] = Cell::Occupied(first_kind);
                board[first] = Cell::Occupied(second_kind);
            } else {
                continue;
            }
            log::debug!("Forced connectable pair at {:?} and {:?}", first, second);
            return true;
        }
    }
    false
}
