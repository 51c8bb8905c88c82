#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceType {
    Pawn=0,
    Knight=1,
    Bishop=2,
    Rook=3,
    Queen=4,
    King=5
}

const ALL_PIECES: [PieceType; 6] = [
    PieceType::Pawn,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Rook,
    PieceType::Queen,
    PieceType::King
];

/// Promotion pieces in the order the move index enumerates them.
const ALL_PROMOTION_PIECES: [PieceType; 4] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight
];

impl PieceType {
    pub const fn to_char(&self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    pub const fn from_char(c: char) -> Option<PieceType> {
        match c {
            'p' | 'P' => Some(PieceType::Pawn),
            'n' | 'N' => Some(PieceType::Knight),
            'b' | 'B' => Some(PieceType::Bishop),
            'r' | 'R' => Some(PieceType::Rook),
            'q' | 'Q' => Some(PieceType::Queen),
            'k' | 'K' => Some(PieceType::King),
            _ => None
        }
    }

    /// Conventional material value; the king is not counted.
    pub const fn material_value(&self) -> i32 {
        match self {
            PieceType::Pawn => 1,
            PieceType::Knight => 3,
            PieceType::Bishop => 3,
            PieceType::Rook => 5,
            PieceType::Queen => 9,
            PieceType::King => 0,
        }
    }

    pub const fn is_promotion_piece(&self) -> bool {
        matches!(self, PieceType::Knight | PieceType::Bishop | PieceType::Rook | PieceType::Queen)
    }

    pub fn iter_pieces() -> impl Iterator<Item = PieceType> {
        ALL_PIECES.iter().copied()
    }

    pub fn iter_promotion_pieces() -> impl Iterator<Item = PieceType> {
        ALL_PROMOTION_PIECES.iter().copied()
    }
}

impl From<shakmaty::Role> for PieceType {
    fn from(role: shakmaty::Role) -> Self {
        match role {
            shakmaty::Role::Pawn => PieceType::Pawn,
            shakmaty::Role::Knight => PieceType::Knight,
            shakmaty::Role::Bishop => PieceType::Bishop,
            shakmaty::Role::Rook => PieceType::Rook,
            shakmaty::Role::Queen => PieceType::Queen,
            shakmaty::Role::King => PieceType::King,
        }
    }
}

impl From<PieceType> for shakmaty::Role {
    fn from(piece_type: PieceType) -> Self {
        match piece_type {
            PieceType::Pawn => shakmaty::Role::Pawn,
            PieceType::Knight => shakmaty::Role::Knight,
            PieceType::Bishop => shakmaty::Role::Bishop,
            PieceType::Rook => shakmaty::Role::Rook,
            PieceType::Queen => shakmaty::Role::Queen,
            PieceType::King => shakmaty::Role::King,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_type() {
        assert_eq!(PieceType::Pawn as u8, 0);
        assert_eq!(PieceType::King as u8, 5);
        for piece_type in PieceType::iter_pieces() {
            assert_eq!(PieceType::from_char(piece_type.to_char()), Some(piece_type));
            assert_eq!(PieceType::from(shakmaty::Role::from(piece_type)), piece_type);
        }
        assert_eq!(PieceType::from_char('x'), None);
    }

    #[test]
    fn test_promotion_pieces() {
        let promotion_pieces: Vec<PieceType> = PieceType::iter_promotion_pieces().collect();
        assert_eq!(promotion_pieces, vec![PieceType::Queen, PieceType::Rook, PieceType::Bishop, PieceType::Knight]);
        assert!(promotion_pieces.iter().all(|piece_type| piece_type.is_promotion_piece()));
        assert!(!PieceType::Pawn.is_promotion_piece());
        assert!(!PieceType::King.is_promotion_piece());
    }
}
