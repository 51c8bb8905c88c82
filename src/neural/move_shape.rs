use std::fmt::{Display, Formatter};
use std::str::FromStr;
use crate::utils::{PieceType, Square};

/// A move described only by its geometry: source square, destination square and promotion.
/// It says nothing about whether the move is legal in any position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct MoveShape {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl MoveShape {
    pub const fn new(from: Square, to: Square, promotion: Option<PieceType>) -> MoveShape {
        MoveShape { from, to, promotion }
    }

    /// The same shape reflected across the horizontal midline, as seen by the other player.
    pub const fn mirrored(&self) -> MoveShape {
        MoveShape {
            from: self.from.flip_vertical(),
            to: self.to.flip_vertical(),
            promotion: self.promotion,
        }
    }

    pub fn uci(&self) -> String {
        self.to_string()
    }
}

impl Display for MoveShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.to_char())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid move shape {0:?}, expected UCI text such as e2e4 or e7e8q")]
pub struct ParseMoveShapeError(pub String);

impl FromStr for MoveShape {
    type Err = ParseMoveShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseMoveShapeError(s.to_string());
        if !s.is_ascii() || (s.len() != 4 && s.len() != 5) {
            return Err(invalid());
        }
        let from = s[0..2].parse::<Square>().map_err(|_| invalid())?;
        let to = s[2..4].parse::<Square>().map_err(|_| invalid())?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) if c.is_ascii_lowercase() => match PieceType::from_char(c) {
                Some(piece_type) if piece_type.is_promotion_piece() => Some(piece_type),
                _ => return Err(invalid()),
            },
            Some(_) => return Err(invalid()),
        };
        Ok(MoveShape { from, to, promotion })
    }
}
