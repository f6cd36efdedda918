use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::GameError;
use crate::game::field::Board;

/// Pick the computer's next cell: a uniform-random choice among empty cells.
///
/// No look-ahead and no blocking; the opponent is intentionally weak.
/// Fails with [`GameError::InvalidState`] on a full board.
pub fn select_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<usize, GameError> {
    board
        .empty_indices()
        .choose(rng)
        .copied()
        .ok_or_else(|| GameError::invalid_state("no empty cell left for the opponent"))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::game::types::{Cell, Mark};

    #[test]
    fn always_picks_an_empty_cell() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut board = Board::new();
            let mut mark = Mark::X;
            while !board.is_full() {
                let idx = select_move(&board, &mut rng).unwrap();
                assert_eq!(board.get(idx), Some(Cell::Empty), "seed {seed}");
                board.place(idx, mark).unwrap();
                mark = mark.other();
            }
        }
    }

    #[test]
    fn single_empty_cell_is_chosen() {
        let mut board = Board::new();
        for idx in [0, 1, 2, 3, 5, 6, 7, 8] {
            board.place(idx, Mark::X).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(select_move(&board, &mut rng), Ok(4));
    }

    #[test]
    fn full_board_is_invalid_state() {
        let mut board = Board::new();
        for idx in 0..9 {
            board.place(idx, Mark::O).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            select_move(&board, &mut rng),
            Err(GameError::InvalidState { .. })
        ));
    }

    #[test]
    fn reaches_every_empty_cell_eventually() {
        let board = Board::new();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 9];
        for _ in 0..500 {
            seen[select_move(&board, &mut rng).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
