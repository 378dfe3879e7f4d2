use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Most turns a connecting path may take.
pub const MAX_TURNS: usize = 2;

/// Connection between two tiles as its corner points: source, up to two turns, destination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    points: SmallVec<[Coord2; MAX_TURNS + 2]>,
}

impl Path {
    /// Builds a path from its corner points, dropping repeated points and points that do not change direction.
    pub(crate) fn from_corners(corners: impl IntoIterator<Item = Coord2>) -> Self {
        let mut points: SmallVec<[Coord2; MAX_TURNS + 2]> = SmallVec::new();
        for point in corners {
            if points.last() == Some(&point) {
                continue;
            }
            if let &[.., before, last] = points.as_slice() {
                let same_row = before.0 == last.0 && last.0 == point.0;
                let same_col = before.1 == last.1 && last.1 == point.1;
                if same_row || same_col {
                    points.pop();
                }
            }
            if points.last() != Some(&point) {
                points.push(point);
            }
        }
        Self { points }
    }

    pub fn points(&self) -> &[Coord2] {
        &self.points
    }

    pub fn source(&self) -> Coord2 {
        self.points[0]
    }

    pub fn destination(&self) -> Coord2 {
        self.points[self.points.len() - 1]
    }

    pub fn turns(&self) -> usize {
        self.points.len().saturating_sub(2)
    }

    /// Straight segments as `(start, end)` pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Coord2, Coord2)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Every grid point walked, both endpoints included.
    pub fn cells(&self) -> Vec<Coord2> {
        let mut cells = Vec::from([self.source()]);
        for (start, end) in self.segments() {
            cells.extend(between(start, end));
            cells.push(end);
        }
        cells
    }

    /// Whether the path is axis-aligned, takes at most [`MAX_TURNS`] turns, and only crosses empty cells between its
    /// endpoints.
    pub fn is_valid_on(&self, board: &Board) -> bool {
        if !(2..=MAX_TURNS + 2).contains(&self.points.len()) {
            return false;
        }
        let aligned = self
            .segments()
            .all(|(start, end)| start != end && is_aligned(start, end));
        let turns_empty = self.points[1..self.points.len() - 1]
            .iter()
            .all(|&turn| board.is_empty_at(turn));
        let segments_empty = self
            .segments()
            .all(|(start, end)| between(start, end).all(|cell| board.is_empty_at(cell)));
        aligned && turns_empty && segments_empty
    }
}
