use alloc::vec::Vec;

use super::*;

/// Draws used before a generator or shuffle gives up on randomness.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 64;

/// Generation strategy that fills the interior with shuffled pairs and only accepts layouts that have a move.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
    max_attempts: u32,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64, max_attempts: u32) -> Self {
        Self {
            seed,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(seed, DEFAULT_MAX_ATTEMPTS)
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board> {
        use rand::prelude::*;

        config.validate()?;

        let mut board = Board::for_config(&config);
        let slots: Vec<Coord2> = board.iter_interior().collect();
        let mut tiles: Vec<TileKind> = (0..config.pair_count())
            .flat_map(|pair| {
                // kinds cycle, so every kind gets roughly the same number of pairs
                let kind = TileKind::nth((pair % CellCount::from(config.kinds)) as u8);
                [kind, kind]
            })
            .collect();
        if slots.len() > tiles.len() {
            log::debug!("Odd interior, {} cell stays empty", slots.len() - tiles.len());
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        for attempt in 1..=self.max_attempts {
            tiles.shuffle(&mut rng);
            for (&coords, &kind) in slots.iter().zip(&tiles) {
                board.set_cell(coords, Cell::Occupied(kind))?;
            }
            if is_solvable(&board) {
                log::debug!(
                    "Generated {}x{} board with {} pairs in {} attempts",
                    config.size.0,
                    config.size.1,
                    tiles.len() / 2,
                    attempt
                );
                return Ok(board);
            }
            log::trace!("Rejected layout without moves, attempt {}", attempt);
        }

        log::warn!(
            "No solvable layout after {} attempts, forcing a connectable pair",
            self.max_attempts
        );
        if force_connectable_pair(&mut board) {
            Ok(board)
        } else {
            Err(GameError::Unsolvable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;

    fn generate(config: GameConfig, seed: u64) -> Board {
        RandomBoardGenerator::with_seed(seed)
            .generate(config)
            .unwrap()
    }

    #[test]
    fn same_seed_same_board() {
        let config = GameConfig::small();

        assert_eq!(generate(config, 42), generate(config, 42));
        assert_ne!(generate(config, 42), generate(config, 43));
    }

    #[test]
    fn every_kind_comes_in_pairs() {
        let board = generate(GameConfig::classic(), 3);
        let mut counts: BTreeMap<TileKind, usize> = BTreeMap::new();
        for (_, kind) in board.iter_occupied() {
            *counts.entry(kind).or_default() += 1;
        }

        assert_eq!(counts.len(), 8);
        assert!(counts.values().all(|count| count % 2 == 0));
        assert_eq!(board.occupied_count(), 160);
    }

    #[test]
    fn border_ring_stays_empty() {
        let board = generate(GameConfig::small(), 9);
        let (rows, cols) = board.size();

        assert_eq!(board.size(), (8, 10));
        for row in 0..rows {
            for col in 0..cols {
                if !board.is_interior((row, col)) {
                    assert!(board.is_empty_at((row, col)));
                }
            }
        }
    }

    #[test]
    fn odd_interior_leaves_one_cell_empty() {
        let board = generate(GameConfig::new((3, 3), 2, false), 5);

        assert_eq!(board.occupied_count(), 8);
        assert!(is_solvable(&board));
    }

    #[test]
    fn generated_boards_are_solvable() {
        for seed in 0..20 {
            let board = generate(GameConfig::new((4, 4), 8, false), seed);
            assert!(is_solvable(&board), "seed {seed} produced a stuck board");
        }
    }

    #[test]
    fn stuck_first_draw_falls_back_to_a_forced_pair() {
        use rand::prelude::*;

        // in a single full row only neighbours connect, so ABAB and BABA have no move
        let config = GameConfig::new((1, 4), 2, false);
        let mut forced = 0;
        for seed in 0..64 {
            let mut first_draw = [TileKind::nth(0), TileKind::nth(0), TileKind::nth(1), TileKind::nth(1)];
            first_draw.shuffle(&mut SmallRng::seed_from_u64(seed));
            let mut stuck = Board::new((1, 4));
            for (col, &kind) in first_draw.iter().enumerate() {
                stuck[(0, col as Coord)] = Cell::Occupied(kind);
            }

            let board = RandomBoardGenerator::new(seed, 1).generate(config).unwrap();

            assert!(is_solvable(&board), "seed {seed} produced a stuck board");
            assert_eq!(board.occupied_count(), 4);
            if !is_solvable(&stuck) {
                forced += 1;
                assert_ne!(board, stuck);
            } else {
                assert_eq!(board, stuck);
            }
        }
        assert!(forced > 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = GameConfig::new_unchecked((0, 4), 2, false);

        assert_eq!(
            RandomBoardGenerator::with_seed(1).generate(config),
            Err(GameError::InvalidConfig)
        );
    }
}
