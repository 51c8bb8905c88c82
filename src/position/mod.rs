//! The adapter around the chess rules engine: positions, move application and game termination.

mod error;
mod termination;
mod chess960;
mod position;

pub use error::*;
pub use termination::*;
pub use chess960::*;
pub use position::*;

pub use shakmaty::{CastlingMode, Move};
