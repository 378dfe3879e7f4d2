use std::collections::HashSet;
use std::fmt;

use tilelink_core::{Board, Coord2, Session};

/// Plain text view of a board with row and column labels.
///
/// The held tile is shown as `[A]`, hinted tiles as `(A)`, and cells walked by the last matched path as ` * `.
pub struct BoardView<'a> {
    board: &'a Board,
    selected: Option<Coord2>,
    hinted: &'a [Coord2],
    path: HashSet<Coord2>,
}

impl<'a> BoardView<'a> {
    pub fn new(board: &'a Board, selected: Option<Coord2>, hinted: &'a [Coord2], path: &[Coord2]) -> Self {
        Self {
            board,
            selected,
            hinted,
            path: path.iter().copied().collect(),
        }
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.board.size();

        write!(f, "    ")?;
        for col in 0..cols {
            write!(f, "{col:^3}")?;
        }
        writeln!(f)?;

        for row in 0..rows {
            write!(f, "{row:>3} ")?;
            for col in 0..cols {
                let coords = (row, col);
                let cell = self.board.cell_at(coords);
                let symbol = if cell.is_empty() && self.path.contains(&coords) {
                    '*'
                } else {
                    cell.symbol()
                };
                let (open, close) = if self.selected == Some(coords) {
                    ('[', ']')
                } else if self.hinted.contains(&coords) {
                    ('(', ')')
                } else {
                    (' ', ' ')
                };
                write!(f, "{open}{symbol}{close}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub fn render_board(board: &Board, selected: Option<Coord2>, hinted: &[Coord2], path: &[Coord2]) -> String {
    BoardView::new(board, selected, hinted, path).to_string()
}

pub fn render_session(session: &Session) -> String {
    let hinted: Vec<Coord2> = session
        .highlighted_hint()
        .map(|hint| vec![hint.first, hint.second])
        .unwrap_or_default();
    let path = session
        .highlighted_path()
        .map(|path| path.cells())
        .unwrap_or_default();
    render_board(session.board(), session.selection().selected(), &hinted, &path)
}
