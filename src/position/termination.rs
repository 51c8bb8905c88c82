use std::fmt::{Display, Formatter};
use crate::utils::Color;

#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    SeventyFiveMoves,
    FivefoldRepetition
}

impl Termination {
    pub fn is_decisive(&self) -> bool {
        self == &Termination::Checkmate
    }

    pub fn is_draw(&self) -> bool {
        !self.is_decisive()
    }
}

#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum Outcome {
    Decisive { winner: Color },
    Draw,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Decisive { winner: Color::White } => write!(f, "1-0"),
            Outcome::Decisive { winner: Color::Black } => write!(f, "0-1"),
            Outcome::Draw => write!(f, "1/2-1/2"),
        }
    }
}
