use ndarray::Array2;

/// Single coordinate axis used for board height, width, and positions.
pub type Coord = u8;

/// Count type used for tile counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait CoordSizeExt {
    /// Array dimensions as board coordinates, `None` when they do not fit in [`Coord`].
    fn coord_size(&self) -> Option<Coord2>;
}

impl<T> CoordSizeExt for Array2<T> {
    fn coord_size(&self) -> Option<Coord2> {
        let (rows, cols) = self.dim();
        Some((rows.try_into().ok()?, cols.try_into().ok()?))
    }
}

/// Whether two points share a row or a column.
pub const fn is_aligned(a: Coord2, b: Coord2) -> bool {
    a.0 == b.0 || a.1 == b.1
}

/// Moves `from` one step towards `to` along their shared row or column.
fn step_towards(from: Coord2, to: Coord2) -> Option<Coord2> {
    let (row, col) = from;
    if from == to {
        None
    } else if row == to.0 {
        Some((row, if col < to.1 { col + 1 } else { col - 1 }))
    } else if col == to.1 {
        Some((if row < to.0 { row + 1 } else { row - 1 }, col))
    } else {
        None
    }
}

/// Points strictly between two aligned points, walked from `from` towards `to`.
///
/// Yields nothing when the points are equal, adjacent, or not aligned.
pub fn between(from: Coord2, to: Coord2) -> BetweenIter {
    BetweenIter {
        cursor: if is_aligned(from, to) { from } else { to },
        end: to,
    }
}

#[derive(Debug)]
pub struct BetweenIter {
    cursor: Coord2,
    end: Coord2,
}

impl Iterator for BetweenIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let next = step_towards(self.cursor, self.end)?;
        self.cursor = next;
        if next == self.end { None } else { Some(next) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn between_walks_rows_and_columns_in_both_directions() {
        assert_eq!(between((0, 0), (0, 3)).collect::<Vec<_>>(), [(0, 1), (0, 2)]);
        assert_eq!(between((3, 1), (0, 1)).collect::<Vec<_>>(), [(2, 1), (1, 1)]);
    }

    #[test]
    fn between_is_empty_for_adjacent_equal_or_unaligned_points() {
        assert_eq!(between((1, 1), (1, 2)).count(), 0);
        assert_eq!(between((1, 1), (1, 1)).count(), 0);
        assert_eq!(between((0, 0), (2, 2)).count(), 0);
    }
}
