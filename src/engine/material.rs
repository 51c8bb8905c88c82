use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::engine::{play_uniformly_random, Engine, EngineError};
use crate::position::{Move, Position};
use crate::utils::{Color, Square};

/// Sum of piece values, White's minus Black's.
pub fn material_balance(position: &Position) -> i32 {
    Square::iter_all()
        .filter_map(|square| position.piece_at(square))
        .map(|(color, piece_type)| match color {
            Color::White => piece_type.material_value(),
            Color::Black => -piece_type.material_value(),
        })
        .sum()
}

/// Plays the move that leaves the best material balance for the side to move, one ply deep.
/// Ties are broken uniformly at random.
#[derive(Debug, Clone)]
pub struct MaterialGreedyEngine {
    rng: StdRng,
}

impl MaterialGreedyEngine {
    pub fn new() -> MaterialGreedyEngine {
        MaterialGreedyEngine { rng: StdRng::from_entropy() }
    }

    pub fn with_seed(seed: u64) -> MaterialGreedyEngine {
        MaterialGreedyEngine { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for MaterialGreedyEngine {
    fn default() -> Self {
        MaterialGreedyEngine::new()
    }
}

impl Engine for MaterialGreedyEngine {
    fn name(&self) -> &str {
        "material"
    }

    fn play_move_on_chessboard(&mut self, position: &mut Position) -> Result<Move, EngineError> {
        let legal_moves = position.legal_moves();
        let maximizing = position.turn() == Color::White;

        let mut best_score = None;
        let mut best_moves = Vec::new();
        for mv in legal_moves {
            let score = {
                let applied = position.apply(&mv)?;
                material_balance(&applied)
            };
            // Negate for Black so that higher is always better for the side to move
            let score = if maximizing { score } else { -score };

            match best_score {
                Some(best) if score < best => continue,
                Some(best) if score == best => best_moves.push(mv),
                _ => {
                    best_score = Some(score);
                    best_moves.clear();
                    best_moves.push(mv);
                }
            }
        }

        play_uniformly_random(&mut self.rng, position, &best_moves)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use super::*;

    #[test]
    fn test_material_balance() {
        assert_eq!(material_balance(&Position::new()), 0);
        let position = Position::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(material_balance(&position), -8);
        let position = Position::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        assert_eq!(material_balance(&position), 9);
    }

    #[test]
    fn test_white_takes_the_queen() {
        let mut position = Position::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let mv = MaterialGreedyEngine::with_seed(0).play_move_on_chessboard(&mut position).unwrap();
        assert_eq!(position.to_uci(&mv), "e4d5");
        assert_eq!(material_balance(&position), 1);
    }

    #[test]
    fn test_black_minimizes() {
        let mut position = Position::from_fen("4k3/8/8/3p4/4Q3/8/8/4K3 b - - 0 1").unwrap();
        let mv = MaterialGreedyEngine::with_seed(0).play_move_on_chessboard(&mut position).unwrap();
        assert_eq!(position.to_uci(&mv), "d5e4");
        assert_eq!(material_balance(&position), -1);
    }

    #[test]
    fn test_evaluation_leaves_position_intact() {
        let mut position = Position::new();
        position.push_uci("e2e4").unwrap();
        let before = position.clone();
        let mv = MaterialGreedyEngine::with_seed(9).play_move_on_chessboard(&mut position).unwrap();
        assert_eq!(position.ply(), before.ply() + 1);
        position.pop();
        assert_eq!(position.fen(), before.fen());
        assert!(before.is_legal(&mv));
    }

    #[test]
    fn test_ties_are_broken_randomly() {
        let mut seen = HashSet::new();
        for seed in 0..50 {
            let mut position = Position::new();
            let mv = MaterialGreedyEngine::with_seed(seed).play_move_on_chessboard(&mut position).unwrap();
            seen.insert(mv);
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_no_legal_move() {
        let mut position = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(position.legal_moves().is_empty());
        assert!(matches!(
            MaterialGreedyEngine::with_seed(0).play_move_on_chessboard(&mut position),
            Err(EngineError::NoLegalMove)
        ));
    }
}
