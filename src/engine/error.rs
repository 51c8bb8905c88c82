use thiserror::Error;
use crate::neural::{EncodingError, ModelError, MoveIndexError};
use crate::position::PositionError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("the best scored move {uci} is not legal in position {fen}")]
    IllegalMove { uci: String, fen: String },
    #[error("no legal moves, the game is over")]
    NoLegalMove,
    #[error("expected {expected} move probabilities, got {actual}")]
    ProbabilityLength { expected: usize, actual: usize },
    #[error("the neural engine needs a policy model")]
    ModelRequired,
    #[error(transparent)]
    Position(#[from] PositionError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    MoveIndex(#[from] MoveIndexError),
    #[error(transparent)]
    Model(#[from] ModelError),
}
