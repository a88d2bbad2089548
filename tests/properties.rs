//! Invariant checks over randomly generated positions.
//!
//! Positions are reached by random legal play from the empty board using a
//! seeded RNG, so every board visited is well-formed and failures reproduce.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use tictactoe_engine::board::ALL_MOVES;
use tictactoe_engine::eval::{O_WIN_UTILITY, X_WIN_UTILITY};
use tictactoe_engine::movegen::random_move;
use tictactoe_engine::{
    apply_move, current_player, initial_state, is_terminal, legal_moves, search, utility, winner,
    Board, Cell, GameError, MoveRejection, Player, SearchConfig,
};

/// Collects every position along `games` random playouts.
fn random_positions(seed: u64, games: usize) -> Vec<Board> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut out = Vec::new();
    for _ in 0..games {
        let mut b = initial_state();
        out.push(b);
        while !is_terminal(&b) {
            let mv = random_move(&b, &mut rng).unwrap();
            b = apply_move(&b, mv).unwrap();
            out.push(b);
        }
    }
    out
}

#[test]
fn legal_move_count_matches_empty_cells() {
    for b in random_positions(1, 200) {
        assert_eq!(legal_moves(&b).len(), b.empty_count());
    }
}

#[test]
fn apply_move_changes_one_cell_and_flips_turn() {
    for b in random_positions(2, 100) {
        for mv in legal_moves(&b) {
            let next = apply_move(&b, mv).unwrap();
            let changed = ALL_MOVES
                .iter()
                .filter(|&&m| b.cell(m) != next.cell(m))
                .count();
            assert_eq!(changed, 1);
            assert_eq!(next.cell(mv), Some(Cell::from(current_player(&b))));
            assert_ne!(current_player(&next), current_player(&b));
            assert!(next.is_well_formed());
        }
    }
}

#[test]
fn occupied_cells_always_rejected() {
    for b in random_positions(3, 100) {
        for mv in ALL_MOVES.iter().copied().filter(|&m| b.cell(m) != Some(Cell::Empty)) {
            assert_eq!(
                apply_move(&b, mv),
                Err(GameError::InvalidMove {
                    mv,
                    reason: MoveRejection::Occupied,
                })
            );
        }
    }
}

#[test]
fn utility_defined_exactly_on_terminal_boards() {
    for b in random_positions(4, 200) {
        match utility(&b) {
            Ok(u) => {
                assert!(is_terminal(&b));
                let expected = match winner(&b) {
                    Some(Player::X) => X_WIN_UTILITY,
                    Some(Player::O) => O_WIN_UTILITY,
                    None => 0,
                };
                assert_eq!(u, expected);
            }
            Err(e) => {
                assert!(!is_terminal(&b));
                assert!(matches!(e, GameError::InvalidState { .. }));
            }
        }
    }
}

#[test]
fn best_move_is_legal_and_never_worse_than_alternatives() {
    let config = SearchConfig::default();
    // Skip the nearly empty boards to keep the exhaustive search cheap.
    let positions: Vec<Board> = random_positions(5, 40)
        .into_iter()
        .filter(|b| b.empty_count() <= 6)
        .collect();

    for b in positions {
        let result = search(&b, &config).unwrap();
        let Some(mv) = result.best_move else {
            assert!(is_terminal(&b));
            continue;
        };
        assert_eq!(b.cell(mv), Some(Cell::Empty));

        let maximizing = current_player(&b) == Player::X;
        for alt in legal_moves(&b) {
            let child = apply_move(&b, alt).unwrap();
            let alt_score = search(&child, &config).unwrap().score;
            if maximizing {
                assert!(alt_score <= result.score);
            } else {
                assert!(alt_score >= result.score);
            }
        }
    }
}

#[test]
fn search_modes_agree_on_random_positions() {
    let mut rng = SmallRng::seed_from_u64(6);
    let positions = random_positions(6, 30);
    for _ in 0..20 {
        let b = positions[rng.gen_range(0..positions.len())];
        if b.empty_count() > 7 {
            continue;
        }
        let seq = search(&b, &SearchConfig { parallel: false }).unwrap();
        let par = search(&b, &SearchConfig { parallel: true }).unwrap();
        assert_eq!(seq, par);
    }
}
