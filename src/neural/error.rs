use thiserror::Error;
use crate::neural::MoveShape;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("expected {expected} input channels, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },
    #[error("expected {expected} tensor values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("position cannot be encoded: {0}")]
    Unrepresentable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveIndexError {
    #[error("move {0} is outside the move index enumeration")]
    UnsupportedMove(MoveShape),
    #[error("move index {index} is out of range 0..{size}")]
    IndexOutOfRange { index: usize, size: usize },
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error("model produced {actual} scores per position, expected {expected}")]
    OutputSize { expected: usize, actual: usize },
    #[error("invalid device {0:?}, expected auto, cpu, cuda or cuda:N")]
    InvalidDevice(String),
    #[error("torch error: {0}")]
    Tch(#[from] tch::TchError),
}
