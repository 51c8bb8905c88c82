//! Move geometry: queen-like rays and knight jumps from a square.

use crate::utils::Square;

#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum QueenLikeMoveDirection {
    Up=0, Down=7,
    UpRight=1, DownLeft=6,
    Right=2, Left=5,
    DownRight=3, UpLeft=4,
}

const ALL_QUEEN_MOVE_DIRECTIONS: [QueenLikeMoveDirection; 8] = [
    QueenLikeMoveDirection::Up, QueenLikeMoveDirection::Down,
    QueenLikeMoveDirection::UpRight, QueenLikeMoveDirection::DownLeft,
    QueenLikeMoveDirection::Right, QueenLikeMoveDirection::Left,
    QueenLikeMoveDirection::DownRight, QueenLikeMoveDirection::UpLeft
];

impl QueenLikeMoveDirection {
    /// File and rank step of one square along the direction. Up is towards rank 8.
    pub const fn delta(&self) -> (i8, i8) {
        match self {
            QueenLikeMoveDirection::Up => (0, 1),
            QueenLikeMoveDirection::Down => (0, -1),
            QueenLikeMoveDirection::UpRight => (1, 1),
            QueenLikeMoveDirection::DownLeft => (-1, -1),
            QueenLikeMoveDirection::Right => (1, 0),
            QueenLikeMoveDirection::Left => (-1, 0),
            QueenLikeMoveDirection::DownRight => (1, -1),
            QueenLikeMoveDirection::UpLeft => (-1, 1),
        }
    }

    pub fn iter() -> impl Iterator<Item=QueenLikeMoveDirection> {
        ALL_QUEEN_MOVE_DIRECTIONS.iter().copied()
    }

    /// Squares reached from `src_square` along this direction, nearest first.
    pub fn ray(self, src_square: Square) -> impl Iterator<Item=Square> {
        let (file_step, rank_step) = self.delta();
        std::iter::successors(src_square.offset(file_step, rank_step), move |square| {
            square.offset(file_step, rank_step)
        })
    }
}

#[repr(u8)]
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum KnightMoveDirection {
    TwoUpOneRight=0, TwoDownOneLeft=7,
    TwoRightOneUp=1, TwoLeftOneDown=6,
    TwoRightOneDown=2, TwoLeftOneUp=5,
    TwoDownOneRight=3, TwoUpOneLeft=4,
}

const ALL_KNIGHT_MOVE_DIRECTIONS: [KnightMoveDirection; 8] = [
    KnightMoveDirection::TwoUpOneRight, KnightMoveDirection::TwoDownOneLeft,
    KnightMoveDirection::TwoRightOneUp, KnightMoveDirection::TwoLeftOneDown,
    KnightMoveDirection::TwoRightOneDown, KnightMoveDirection::TwoLeftOneUp,
    KnightMoveDirection::TwoDownOneRight, KnightMoveDirection::TwoUpOneLeft
];

impl KnightMoveDirection {
    pub const fn delta(&self) -> (i8, i8) {
        match self {
            KnightMoveDirection::TwoUpOneRight => (1, 2),
            KnightMoveDirection::TwoDownOneLeft => (-1, -2),
            KnightMoveDirection::TwoRightOneUp => (2, 1),
            KnightMoveDirection::TwoLeftOneDown => (-2, -1),
            KnightMoveDirection::TwoRightOneDown => (2, -1),
            KnightMoveDirection::TwoLeftOneUp => (-2, 1),
            KnightMoveDirection::TwoDownOneRight => (1, -2),
            KnightMoveDirection::TwoUpOneLeft => (-1, 2),
        }
    }

    pub fn iter() -> impl Iterator<Item=KnightMoveDirection> {
        ALL_KNIGHT_MOVE_DIRECTIONS.iter().copied()
    }

    pub const fn jump(self, src_square: Square) -> Option<Square> {
        let (file_delta, rank_delta) = self.delta();
        src_square.offset(file_delta, rank_delta)
    }
}

/// Every square a queen or a knight could reach from `src_square` on an empty board, in square order.
pub fn queen_and_knight_targets(src_square: Square) -> Vec<Square> {
    let mut targets: Vec<Square> = QueenLikeMoveDirection::iter()
        .flat_map(|direction| direction.ray(src_square))
        .chain(KnightMoveDirection::iter().filter_map(|direction| direction.jump(src_square)))
        .collect();
    targets.sort();
    targets
}
