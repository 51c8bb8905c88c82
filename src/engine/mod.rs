//! Move-selection engines. Every engine looks at a position, picks one move and plays it.

mod error;
mod random;
mod material;
mod neural;
mod any_engine;
mod game;

pub use error::*;
pub use random::*;
pub use material::*;
pub use neural::*;
pub use any_engine::*;
pub use game::*;

use rand::seq::SliceRandom;
use rand::Rng;
use crate::position::{Move, Position};

pub trait Engine {
    fn name(&self) -> &str;

    /// Picks a move, pushes it onto `position` and returns it.
    /// Fails with [`EngineError::NoLegalMove`] if the side to move has no legal moves.
    fn play_move_on_chessboard(&mut self, position: &mut Position) -> Result<Move, EngineError>;
}

/// Plays one of `candidates` chosen uniformly at random.
pub(crate) fn play_uniformly_random<R: Rng + ?Sized>(
    rng: &mut R,
    position: &mut Position,
    candidates: &[Move],
) -> Result<Move, EngineError> {
    let mv = candidates.choose(rng).ok_or(EngineError::NoLegalMove)?.clone();
    position.push(&mv)?;
    Ok(mv)
}
