use crate::engine::{Engine, EngineError};
use crate::position::{Outcome, Position, Termination};
use crate::utils::Color;

/// How a game between two engines went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub white: String,
    pub black: String,
    /// Moves in UCI notation, in the order they were played.
    pub moves: Vec<String>,
    /// `None` if the ply limit was reached first.
    pub termination: Option<Termination>,
    pub outcome: Option<Outcome>,
    pub final_fen: String,
}

/// Lets `white` and `black` take turns on `position` until the game ends or `max_plies` moves
/// have been played.
pub fn play_game(
    white: &mut dyn Engine,
    black: &mut dyn Engine,
    position: &mut Position,
    max_plies: usize,
) -> Result<GameRecord, EngineError> {
    let mut moves = Vec::new();

    for _ in 0..max_plies {
        if position.is_game_over() {
            break;
        }
        let engine: &mut dyn Engine = match position.turn() {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };
        let mv = engine.play_move_on_chessboard(position)?;
        moves.push(position.to_uci(&mv));
    }

    Ok(GameRecord {
        white: white.name().to_string(),
        black: black.name().to_string(),
        moves,
        termination: position.termination(),
        outcome: position.outcome(),
        final_fen: position.fen(),
    })
}
