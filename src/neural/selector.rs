//! Turns a vector of move scores into a move on the board.

use std::cmp::Ordering;
use std::collections::HashMap;
use crate::engine::EngineError;
use crate::neural::constants::MOVE_INDEX_SIZE;
use crate::neural::{index_of, mirrored_index, move_at, MoveShape};
use crate::position::{Move, Position};

/// NaN scores rank below every real score. `-0.0` and `0.0` compare equal.
fn score(probability: f32) -> f32 {
    if probability.is_nan() {
        f32::NEG_INFINITY
    } else {
        probability + 0.
    }
}

fn by_descending_score(a: f32, b: f32) -> Ordering {
    score(b).total_cmp(&score(a))
}

fn check_length(probabilities: &[f32]) -> Result<(), EngineError> {
    if probabilities.len() != MOVE_INDEX_SIZE {
        return Err(EngineError::ProbabilityLength {
            expected: MOVE_INDEX_SIZE,
            actual: probabilities.len(),
        });
    }
    Ok(())
}

/// Move indices sorted by descending score. Equal scores keep enumeration order.
pub fn rank_indices(probabilities: &[f32]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..probabilities.len()).collect();
    indices.sort_by(|&a, &b| by_descending_score(probabilities[a], probabilities[b]));
    indices
}

/// Maps the shape of every legal move to the move itself.
///
/// Castling is found under both the king-to-destination and the king-onto-rook shape, whatever
/// the castling mode of the position, unless that shape already belongs to a regular move.
fn legal_moves_by_shape(position: &Position) -> Result<HashMap<MoveShape, Move>, EngineError> {
    let mut legal_moves = HashMap::new();
    let mut castles = Vec::new();
    for mv in position.legal_moves() {
        let shape = position.shape_of(&mv)?;
        // A legal move outside the enumeration means the codec and the rules engine disagree
        index_of(&shape)?;
        if mv.is_castle() {
            castles.push(mv.clone());
        }
        legal_moves.insert(shape, mv);
    }

    for mv in castles {
        for shape in position.castling_shapes(&mv) {
            // A king already on its castling square has no king-to-destination shape
            if index_of(&shape).is_ok() {
                legal_moves.entry(shape).or_insert_with(|| mv.clone());
            }
        }
    }
    Ok(legal_moves)
}

/// Picks a move from `probabilities` and plays it on `position`.
///
/// With `prevent_illegal_move`, the legal move with the highest score is played. Without it, only
/// the single best scored shape is considered, and if it is not legal the call fails with
/// [`EngineError::IllegalMove`] and the position is left as it was.
pub fn select_move(position: &mut Position, probabilities: &[f32], prevent_illegal_move: bool) -> Result<Move, EngineError> {
    check_length(probabilities)?;

    let legal_moves = legal_moves_by_shape(position)?;
    if legal_moves.is_empty() {
        return Err(EngineError::NoLegalMove);
    }

    let ranked = rank_indices(probabilities);

    if !prevent_illegal_move {
        let shape = move_at(ranked[0])?;
        let mv = legal_moves.get(&shape).ok_or_else(|| EngineError::IllegalMove {
            uci: shape.uci(),
            fen: position.fen(),
        })?;
        position.push(mv)?;
        return Ok(mv.clone());
    }

    for index in ranked {
        if let Some(mv) = legal_moves.get(&move_at(index)?) {
            position.push(mv)?;
            return Ok(mv.clone());
        }
    }

    // Every legal shape has an index, so the loop always finds one
    Err(EngineError::NoLegalMove)
}

/// The legal moves of `position` with their scores, best first.
pub fn rank_legal_moves(position: &Position, probabilities: &[f32]) -> Result<Vec<(Move, f32)>, EngineError> {
    check_length(probabilities)?;

    let mut rank_of = vec![0; MOVE_INDEX_SIZE];
    for (rank, index) in rank_indices(probabilities).into_iter().enumerate() {
        rank_of[index] = rank;
    }

    // A move written several ways counts with its best ranked shape, as in `select_move`
    let mut best: Vec<(usize, Move)> = Vec::new();
    for (shape, mv) in legal_moves_by_shape(position)? {
        let index = index_of(&shape)?;
        match best.iter_mut().find(|(_, other)| *other == mv) {
            Some(entry) if rank_of[index] < rank_of[entry.0] => entry.0 = index,
            Some(_) => {}
            None => best.push((index, mv)),
        }
    }
    best.sort_by_key(|(index, _)| rank_of[*index]);

    Ok(best
        .into_iter()
        .map(|(index, mv)| (mv, probabilities[index]))
        .collect())
}

/// Maps scores produced for a mirrored encoding back to absolute move indices.
pub fn unmirror_probabilities(probabilities: &[f32]) -> Result<Vec<f32>, EngineError> {
    check_length(probabilities)?;

    let mut unmirrored = vec![0.; MOVE_INDEX_SIZE];
    for (index, &probability) in probabilities.iter().enumerate() {
        unmirrored[mirrored_index(index)?] = probability;
    }
    Ok(unmirrored)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use crate::position::CastlingMode;
    use super::*;

    fn probabilities_favoring(ucis: &[&str]) -> Vec<f32> {
        let mut probabilities = vec![0.; MOVE_INDEX_SIZE];
        for (i, uci) in ucis.iter().enumerate() {
            let index = index_of(&uci.parse().unwrap()).unwrap();
            probabilities[index] = 1. - i as f32 * 0.1;
        }
        probabilities
    }

    #[test]
    fn test_rank_indices_is_stable() {
        let ranked = rank_indices(&[0.1, 0.5, 0.1, f32::NAN, 0.5]);
        assert_eq!(ranked, vec![1, 4, 0, 2, 3]);
    }

    #[test]
    fn test_rank_indices_treats_signed_zeros_as_equal() {
        assert_eq!(rank_indices(&[-0.0, 0.0]), vec![0, 1]);
        assert_eq!(rank_indices(&[0.0, -0.0, 0.5]), vec![2, 0, 1]);
    }

    #[test]
    fn test_castling_found_under_both_shapes() {
        for uci in ["e1h1", "e1g1"] {
            let mut position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
            let probabilities = probabilities_favoring(&[uci]);
            let mv = select_move(&mut position, &probabilities, true).unwrap();
            assert!(matches!(mv, Move::Castle { .. }), "{}", uci);
            assert_eq!(position.to_uci(&mv), "e1g1");

            let mut position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
            let mv = select_move(&mut position, &probabilities, false).unwrap();
            assert!(matches!(mv, Move::Castle { .. }), "{}", uci);
        }

        let mut position = Position::from_fen_with_mode("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", CastlingMode::Chess960).unwrap();
        let mv = select_move(&mut position, &probabilities_favoring(&["e1c1"]), true).unwrap();
        assert!(matches!(mv, Move::Castle { .. }));
        assert_eq!(position.to_uci(&mv), "e1a1");
    }

    #[test]
    fn test_castling_shape_does_not_hide_regular_move() {
        // The king on b1 can step to c1 or castle queenside, which also lands it on c1
        let mut position = Position::from_fen_with_mode("4k3/8/8/8/8/8/8/RK6 w A - 0 1", CastlingMode::Chess960).unwrap();
        let mv = select_move(&mut position, &probabilities_favoring(&["b1c1"]), true).unwrap();
        assert!(!mv.is_castle());
    }

    #[test]
    fn test_rank_legal_moves_lists_castling_once() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let probabilities = probabilities_favoring(&["e1h1"]);
        let ranked = rank_legal_moves(&position, &probabilities).unwrap();
        assert_eq!(ranked.len(), position.legal_moves().len());
        assert!(matches!(ranked[0].0, Move::Castle { .. }));
        assert_eq!(ranked[0].1, 1.);
    }

    #[test]
    fn test_illegal_top_move_is_skipped() {
        let mut position = Position::new();
        let probabilities = probabilities_favoring(&["e2e5", "d1d4", "g1f3"]);
        let mv = select_move(&mut position, &probabilities, true).unwrap();
        assert_eq!(position.to_uci(&mv), "g1f3");
        assert_eq!(position.ply(), 1);
    }

    #[test]
    fn test_all_zero_vector_picks_first_legal_in_enumeration_order() {
        let mut position = Position::new();
        let mv = select_move(&mut position, &vec![0.; MOVE_INDEX_SIZE], true).unwrap();
        // b1 is the first source square with a legal move, a3 its first reachable target
        assert_eq!(position.to_uci(&mv), "b1a3");
    }

    #[test]
    fn test_always_legal() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut position = Position::new();
        for _ in 0..60 {
            if position.is_game_over() {
                break;
            }
            let probabilities: Vec<f32> = (0..MOVE_INDEX_SIZE).map(|_| rng.gen()).collect();
            let legal_moves = position.legal_moves();
            let mv = select_move(&mut position, &probabilities, true).unwrap();
            assert!(legal_moves.contains(&mv));
            assert_eq!(position.last_move(), Some(&mv));
        }
    }

    #[test]
    fn test_deterministic() {
        let mut rng = StdRng::seed_from_u64(11);
        let probabilities: Vec<f32> = (0..MOVE_INDEX_SIZE).map(|_| rng.gen()).collect();
        let mut first = Position::new();
        let mut second = Position::new();
        let a = select_move(&mut first, &probabilities, true).unwrap();
        let b = select_move(&mut second, &probabilities, true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_illegal_move_without_prevention() {
        let mut position = Position::new();
        let fen = position.fen();
        let probabilities = probabilities_favoring(&["e2e5", "e2e4"]);
        match select_move(&mut position, &probabilities, false) {
            Err(EngineError::IllegalMove { uci, fen: error_fen }) => {
                assert_eq!(uci, "e2e5");
                assert_eq!(error_fen, fen);
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(position.fen(), fen);
        assert_eq!(position.ply(), 0);

        let probabilities = probabilities_favoring(&["e2e4"]);
        let mv = select_move(&mut position, &probabilities, false).unwrap();
        assert_eq!(position.to_uci(&mv), "e2e4");
    }

    #[test]
    fn test_no_legal_move() {
        let mut position = Position::new();
        for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            position.push_uci(uci).unwrap();
        }
        let probabilities = vec![0.; MOVE_INDEX_SIZE];
        assert!(matches!(select_move(&mut position, &probabilities, true), Err(EngineError::NoLegalMove)));
        assert!(matches!(select_move(&mut position, &probabilities, false), Err(EngineError::NoLegalMove)));
    }

    #[test]
    fn test_probability_length() {
        let mut position = Position::new();
        assert!(matches!(
            select_move(&mut position, &[0.5; 10], true),
            Err(EngineError::ProbabilityLength { expected: MOVE_INDEX_SIZE, actual: 10 })
        ));
        assert!(rank_legal_moves(&position, &[]).is_err());
        assert!(unmirror_probabilities(&[1.]).is_err());
    }

    #[test]
    fn test_nan_scores_rank_last() {
        let mut position = Position::new();
        let mut probabilities = vec![f32::NAN; MOVE_INDEX_SIZE];
        probabilities[index_of(&"h2h3".parse().unwrap()).unwrap()] = -5.;
        let mv = select_move(&mut position, &probabilities, true).unwrap();
        assert_eq!(position.to_uci(&mv), "h2h3");
    }

    #[test]
    fn test_underpromotion() {
        let mut position = Position::from_fen("8/4P3/8/8/8/1k6/8/4K3 w - - 0 1").unwrap();
        let probabilities = probabilities_favoring(&["e7e8n", "e7e8q"]);
        let mv = select_move(&mut position, &probabilities, true).unwrap();
        assert_eq!(position.to_uci(&mv), "e7e8n");
    }

    #[test]
    fn test_rank_legal_moves() {
        let position = Position::new();
        let probabilities = probabilities_favoring(&["d2d4", "e2e5", "g1f3"]);
        let ranked = rank_legal_moves(&position, &probabilities).unwrap();
        assert_eq!(ranked.len(), 20);
        assert_eq!(position.to_uci(&ranked[0].0), "d2d4");
        assert_eq!(position.to_uci(&ranked[1].0), "g1f3");
        // the rest tie at zero and keep enumeration order
        assert_eq!(position.to_uci(&ranked[2].0), "b1a3");
        assert!(ranked.windows(2).all(|pair| pair[0].1 >= pair[1].1));
    }

    #[test]
    fn test_unmirror_probabilities() {
        let probabilities = probabilities_favoring(&["e2e4", "a7a8n"]);
        let unmirrored = unmirror_probabilities(&probabilities).unwrap();
        assert_eq!(unmirrored[index_of(&"e7e5".parse().unwrap()).unwrap()], 1.);
        let a7a8n = index_of(&"a7a8n".parse().unwrap()).unwrap();
        assert_eq!(unmirrored[index_of(&"a2a1n".parse().unwrap()).unwrap()], probabilities[a7a8n]);
        assert_eq!(unmirror_probabilities(&unmirrored).unwrap(), probabilities);
    }
}
