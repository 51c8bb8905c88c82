use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("invalid FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: String },
    #[error("invalid UCI move {uci:?}: {reason}")]
    InvalidUci { uci: String, reason: String },
    #[error("illegal move {uci} in position {fen}")]
    IllegalMove { uci: String, fen: String },
    #[error("move {uci} has no source/destination shape")]
    UnsupportedMove { uci: String },
    #[error("chess960 start position index {0} is not in 0..960")]
    InvalidChess960Index(u32),
}
