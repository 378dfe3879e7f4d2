use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Tile layout of a round, stored row-major in a flat array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    cells: Array2<Cell>,
    border: bool,
}

/// Unchecked serialized form, validated into a [`Board`].
#[derive(Deserialize)]
struct RawBoard {
    cells: Array2<Cell>,
    border: bool,
}

impl TryFrom<RawBoard> for Board {
    type Error = GameError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        let mut board = Self::from_cells(raw.cells)?;
        if raw.border {
            let (rows, cols) = board.size();
            if rows < 3 || cols < 3 {
                return Err(GameError::InvalidBoardShape);
            }
            board.border = true;
            if board.iter_occupied().any(|(coords, _)| !board.is_interior(coords)) {
                return Err(GameError::InvalidBoardShape);
            }
        }
        Ok(board)
    }
}

impl Board {
    /// Empty board of the given full size, without a border ring.
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
            border: false,
        }
    }

    /// Empty board sized for `config`, ring included.
    pub fn for_config(config: &GameConfig) -> Self {
        Self {
            cells: Array2::default(config.board_size().to_nd_index()),
            border: config.border,
        }
    }

    pub fn from_cells(cells: Array2<Cell>) -> Result<Self> {
        if cells.is_empty() || cells.coord_size().is_none() {
            return Err(GameError::InvalidBoardShape);
        }
        Ok(Self {
            cells,
            border: false,
        })
    }

    /// Parses a text layout, one string per row: `.` is empty, letters are tile kinds.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let mut cells = Vec::with_capacity(rows.len() * width);

        for row in rows {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(GameError::InvalidBoardShape);
            }
            for symbol in row.chars() {
                cells.push(Cell::from_symbol(symbol).ok_or(GameError::InvalidLayout(symbol))?);
            }
        }

        let cells = Array2::from_shape_vec((rows.len(), width), cells)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Self::from_cells(cells)
    }

    /// Copy of this board wrapped in an empty ring one cell deep.
    pub fn bordered(&self) -> Result<Self> {
        let (rows, cols) = self.size();
        let rows = rows.checked_add(2).ok_or(GameError::InvalidBoardShape)?;
        let cols = cols.checked_add(2).ok_or(GameError::InvalidBoardShape)?;

        let mut cells: Array2<Cell> = Array2::default((rows, cols).to_nd_index());
        for ((row, col), &cell) in self.cells.indexed_iter() {
            cells[[row + 1, col + 1]] = cell;
        }

        Ok(Self {
            cells,
            border: true,
        })
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // dimensions are checked against `Coord` on construction
        (rows as Coord, cols as Coord)
    }

    pub fn has_border(&self) -> bool {
        self.border
    }

    /// Half-open `(start, end)` bounds of the cells that may hold tiles.
    pub fn interior(&self) -> (Coord2, Coord2) {
        let (rows, cols) = self.size();
        if self.border {
            ((1, 1), (rows - 1, cols - 1))
        } else {
            ((0, 0), (rows, cols))
        }
    }

    pub fn is_interior(&self, coords: Coord2) -> bool {
        let (start, end) = self.interior();
        (start.0..end.0).contains(&coords.0) && (start.1..end.1).contains(&coords.1)
    }

    /// Interior positions in row-major order.
    pub fn iter_interior(&self) -> impl Iterator<Item = Coord2> + use<> {
        let ((row_start, col_start), (row_end, col_end)) = self.interior();
        (row_start..row_end).flat_map(move |row| (col_start..col_end).map(move |col| (row, col)))
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self[coords]
    }

    pub fn kind_at(&self, coords: Coord2) -> Option<TileKind> {
        self.get(coords).and_then(Cell::kind)
    }

    /// Out of bounds positions are not empty, they simply do not exist.
    pub fn is_empty_at(&self, coords: Coord2) -> bool {
        self.get(coords).is_some_and(Cell::is_empty)
    }

    pub fn set_cell(&mut self, coords: Coord2, cell: Cell) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        if cell.is_occupied() && !self.is_interior(coords) {
            return Err(GameError::InvalidCoords);
        }
        self[coords] = cell;
        Ok(())
    }

    /// Occupied positions and their kinds, row-major.
    pub fn iter_occupied(&self) -> impl Iterator<Item = (Coord2, TileKind)> + '_ {
        self.cells
            .indexed_iter()
            .filter_map(|((row, col), cell)| Some(((row as Coord, col as Coord), cell.kind()?)))
    }

    pub fn occupied_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_occupied()).count() as CellCount
    }

    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Empties both cells of a matched pair.
    pub fn remove_pair(&mut self, first: Coord2, second: Coord2) -> Result<()> {
        for coords in [first, second] {
            if self.get(coords).ok_or(GameError::InvalidCoords)?.is_empty() {
                return Err(GameError::NotOccupied);
            }
        }
        self[first] = Cell::Empty;
        self[second] = Cell::Empty;
        log::debug!("Removed pair at {:?} and {:?}", first, second);
        Ok(())
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.cells.rows().into_iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}
