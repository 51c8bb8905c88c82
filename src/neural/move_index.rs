//! Fixed enumeration of every move shape the policy model can score.
//!
//! Indices `0..1792` are the queen-like and knight-jump shapes, ordered by source square and then
//! destination square (a1 = 0). They are followed by the 88 White promotions (rank 7 to rank 8) and
//! the 88 Black promotions (rank 2 to rank 1), ordered by source file, destination file and then
//! promotion piece (queen, rook, bishop, knight). The enumeration is closed under vertical
//! mirroring, so every shape has a mirrored counterpart with its own index.

use std::collections::HashMap;
use lazy_static::lazy_static;
use crate::neural::constants::MOVE_INDEX_SIZE;
use crate::neural::{MoveIndexError, MoveShape};
use crate::utils::{queen_and_knight_targets, PieceType, Square};

lazy_static! {
    static ref MOVE_SHAPES: Vec<MoveShape> = enumerate_move_shapes();
    static ref MOVE_INDICES: HashMap<MoveShape, usize> = MOVE_SHAPES
        .iter()
        .enumerate()
        .map(|(index, &shape)| (shape, index))
        .collect();
    static ref MIRRORED_INDICES: Vec<usize> = MOVE_SHAPES
        .iter()
        .map(|shape| MOVE_INDICES[&shape.mirrored()])
        .collect();
}

fn enumerate_move_shapes() -> Vec<MoveShape> {
    let mut shapes = Vec::with_capacity(MOVE_INDEX_SIZE);

    for from in Square::iter_all() {
        for to in queen_and_knight_targets(from) {
            shapes.push(MoveShape::new(from, to, None));
        }
    }

    // White promotes from rank index 6 to 7, Black from 1 to 0
    for (from_rank, to_rank) in [(6, 7), (1, 0)] {
        for from_file in 0..8u8 {
            for to_file in from_file.saturating_sub(1)..=(from_file + 1).min(7) {
                let (Some(from), Some(to)) = (
                    Square::from_coords(from_file, from_rank),
                    Square::from_coords(to_file, to_rank),
                ) else {
                    continue;
                };
                for piece_type in PieceType::iter_promotion_pieces() {
                    shapes.push(MoveShape::new(from, to, Some(piece_type)));
                }
            }
        }
    }

    shapes
}

/// Position of `shape` in the enumeration.
pub fn index_of(shape: &MoveShape) -> Result<usize, MoveIndexError> {
    MOVE_INDICES
        .get(shape)
        .copied()
        .ok_or(MoveIndexError::UnsupportedMove(*shape))
}

/// Shape stored at `index`.
pub fn move_at(index: usize) -> Result<MoveShape, MoveIndexError> {
    MOVE_SHAPES
        .get(index)
        .copied()
        .ok_or(MoveIndexError::IndexOutOfRange { index, size: MOVE_INDEX_SIZE })
}

/// Index of the vertically mirrored counterpart of the shape at `index`.
pub fn mirrored_index(index: usize) -> Result<usize, MoveIndexError> {
    MIRRORED_INDICES
        .get(index)
        .copied()
        .ok_or(MoveIndexError::IndexOutOfRange { index, size: MOVE_INDEX_SIZE })
}

pub fn all_move_shapes() -> &'static [MoveShape] {
    &MOVE_SHAPES
}
