use crate::*;

/// Finds a path of at most two turns joining two occupied cells through empty cells only.
///
/// Straight connections are preferred over one-turn connections, and those over two-turn connections; within a tier
/// the first candidate found wins. Tile kinds are not compared, callers decide whether a connection counts as a match.
///
/// # Panics
///
/// When `source` and `destination` are the same cell, or either one is out of bounds or empty.
pub fn find_connection(board: &Board, source: Coord2, destination: Coord2) -> Option<Path> {
    assert_ne!(source, destination, "connection endpoints must differ");
    assert!(
        board.kind_at(source).is_some(),
        "connection source {source:?} is not an occupied cell"
    );
    assert!(
        board.kind_at(destination).is_some(),
        "connection destination {destination:?} is not an occupied cell"
    );

    let path = straight(board, source, destination)
        .or_else(|| one_turn(board, source, destination))
        .or_else(|| two_turn(board, source, destination));
    log::trace!(
        "Connection {:?} -> {:?}: {:?}",
        source,
        destination,
        path.as_ref().map(Path::points)
    );
    path
}

pub fn connection_exists(board: &Board, source: Coord2, destination: Coord2) -> bool {
    find_connection(board, source, destination).is_some()
}

/// Path between two distinct tiles of the same kind, `None` for anything else.
pub fn match_path(board: &Board, first: Coord2, second: Coord2) -> Option<Path> {
    if first == second {
        return None;
    }
    let kind = board.kind_at(first)?;
    if board.kind_at(second)? != kind {
        return None;
    }
    find_connection(board, first, second)
}

/// Whether two aligned points see each other: every cell strictly between them is empty.
pub fn straight_clear(board: &Board, from: Coord2, to: Coord2) -> bool {
    is_aligned(from, to) && between(from, to).all(|cell| board.is_empty_at(cell))
}

fn straight(board: &Board, source: Coord2, destination: Coord2) -> Option<Path> {
    straight_clear(board, source, destination).then(|| Path::from_corners([source, destination]))
}

fn one_turn(board: &Board, source: Coord2, destination: Coord2) -> Option<Path> {
    [(source.0, destination.1), (destination.0, source.1)]
        .into_iter()
        .find(|&corner| {
            let usable = corner == source || corner == destination || board.is_empty_at(corner);
            usable
                && straight_clear(board, source, corner)
                && straight_clear(board, corner, destination)
        })
        .map(|corner| Path::from_corners([source, corner, destination]))
}

/// First turn point is any empty cell in sight of the source, row-major; the rest must be a one-turn path.
fn two_turn(board: &Board, source: Coord2, destination: Coord2) -> Option<Path> {
    let (rows, cols) = board.size();
    (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (row, col)))
        .filter(|&turn| turn != source && board.is_empty_at(turn))
        .filter(|&turn| straight_clear(board, source, turn))
        .find_map(|turn| {
            let rest = one_turn(board, turn, destination)?;
            Some(Path::from_corners(
                core::iter::once(source).chain(rest.points().iter().copied()),
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    fn connect(board: &Board, source: Coord2, destination: Coord2) -> Option<alloc::vec::Vec<Coord2>> {
        find_connection(board, source, destination).map(|path| path.points().to_vec())
    }

    #[test]
    fn straight_line_across_empty_cell() {
        let board = board(&["A.A"]);

        assert_eq!(connect(&board, (0, 0), (0, 2)), Some([(0, 0), (0, 2)].to_vec()));
    }

    #[test]
    fn adjacent_tiles_connect_directly() {
        let board = board(&["AA", "BB"]);

        assert_eq!(connect(&board, (1, 1), (1, 0)), Some([(1, 1), (1, 0)].to_vec()));
        assert_eq!(connect(&board, (0, 0), (1, 0)), Some([(0, 0), (1, 0)].to_vec()));
    }

    #[test]
    fn straight_line_blocked_by_tile() {
        let board = board(&["ABA"]);

        assert_eq!(connect(&board, (0, 0), (0, 2)), None);
    }

    #[test]
    fn one_turn_prefers_source_row_corner() {
        let board = board(&["A..", "...", "..A"]);

        assert_eq!(
            connect(&board, (0, 0), (2, 2)),
            Some([(0, 0), (0, 2), (2, 2)].to_vec())
        );
    }

    #[test]
    fn one_turn_falls_back_to_second_corner() {
        let board = board(&["A.B", "...", "..A"]);

        assert_eq!(
            connect(&board, (0, 0), (2, 2)),
            Some([(0, 0), (2, 0), (2, 2)].to_vec())
        );
    }

    #[test]
    fn two_turns_around_blocked_corners() {
        let board = board(&["A.B", "...", "B.A"]);

        let path = find_connection(&board, (0, 0), (2, 2)).unwrap();

        assert_eq!(path.points(), &[(0, 0), (0, 1), (2, 1), (2, 2)]);
        assert_eq!(path.turns(), 2);
        assert!(path.cells().contains(&(1, 1)));
        assert!(path.is_valid_on(&board));
    }

    #[test]
    fn walled_in_tiles_do_not_connect() {
        let board = board(&["ABC", "BCB", "CBA"]);

        assert_eq!(connect(&board, (0, 0), (2, 2)), None);
    }

    #[test]
    fn two_turns_through_the_border_ring() {
        let board = board(&["ABA"]);
        assert_eq!(connect(&board, (0, 0), (0, 2)), None);

        let board = board.bordered().unwrap();
        assert_eq!(
            connect(&board, (1, 1), (1, 3)),
            Some([(1, 1), (0, 1), (0, 3), (1, 3)].to_vec())
        );
    }

    #[test]
    fn three_turn_routes_are_rejected() {
        // shortest route turns at (0,3), (3,3) and (3,0)
        let board = board(&["A...", "BBB.", "A.B.", "...."]);

        assert_eq!(connect(&board, (0, 0), (2, 0)), None);
    }

    #[test]
    fn connection_is_symmetric() {
        let board = board(&["A.B", "...", "B.A"]);

        let forward = find_connection(&board, (0, 0), (2, 2)).unwrap();
        let backward = find_connection(&board, (2, 2), (0, 0)).unwrap();

        assert_eq!(forward.turns(), backward.turns());
        assert_eq!(backward.source(), (2, 2));
        assert_eq!(backward.destination(), (0, 0));
    }

    #[test]
    fn reverse_query_turns_at_its_own_source_row_corner() {
        let board = board(&["A..", "...", "..A"]);

        assert_eq!(connect(&board, (0, 0), (2, 2)).unwrap(), [(0, 0), (0, 2), (2, 2)]);
        assert_eq!(connect(&board, (2, 2), (0, 0)).unwrap(), [(2, 2), (2, 0), (0, 0)]);
    }

    #[test]
    fn match_path_requires_equal_kinds() {
        let board = board(&["AB"]);

        assert!(connection_exists(&board, (0, 0), (0, 1)));
        assert_eq!(match_path(&board, (0, 0), (0, 1)), None);
        assert_eq!(match_path(&board, (0, 0), (0, 0)), None);
    }

    #[test]
    #[should_panic(expected = "endpoints must differ")]
    fn same_cell_query_panics() {
        let board = board(&["A.A"]);
        find_connection(&board, (0, 0), (0, 0));
    }

    #[test]
    #[should_panic(expected = "not an occupied cell")]
    fn empty_endpoint_panics() {
        let board = board(&["A.A"]);
        find_connection(&board, (0, 0), (0, 1));
    }
}
