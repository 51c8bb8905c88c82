// Layout of the input tensor. Changing anything here invalidates trained models: bump ENCODING_VERSION.
pub const ENCODING_VERSION: u32 = 1;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

pub const NUM_PIECE_TYPE_BITS: usize = 6; // 6 piece types
pub const NUM_COLOR_BITS: usize = 2; // 2 colors
pub const NUM_BITS_PER_BOARD: usize = NUM_PIECE_TYPE_BITS * NUM_COLOR_BITS; // channels 0-11

pub const SIDE_TO_MOVE_CHANNEL: usize = NUM_BITS_PER_BOARD; // channel 12
pub const NUM_SIDE_TO_MOVE_BITS: usize = 1;

pub const CASTLING_CHANNEL: usize = SIDE_TO_MOVE_CHANNEL + NUM_SIDE_TO_MOVE_BITS; // channels 13-16
pub const NUM_CASTLING_BITS: usize = 4; // our kingside, our queenside, their kingside, their queenside

pub const EN_PASSANT_CHANNEL: usize = CASTLING_CHANNEL + NUM_CASTLING_BITS; // channel 17
pub const HALFMOVE_CHANNEL: usize = EN_PASSANT_CHANNEL + 1; // channel 18
pub const FULLMOVE_CHANNEL: usize = HALFMOVE_CHANNEL + 1; // channel 19

pub const REPETITION_CHANNEL: usize = FULLMOVE_CHANNEL + 1; // channels 20-21
pub const NUM_REPETITION_BITS: usize = 2; // seen once before, seen twice before

pub const CHECK_CHANNEL: usize = REPETITION_CHANNEL + NUM_REPETITION_BITS; // channel 22
pub const ONES_CHANNEL: usize = CHECK_CHANNEL + 1; // channel 23

pub const NUM_RESERVED_CHANNELS: usize = 5; // channels 24-28, always zero
pub const FIRST_RESERVED_CHANNEL: usize = ONES_CHANNEL + 1;

pub const NUM_CHANNELS: usize = FIRST_RESERVED_CHANNEL + NUM_RESERVED_CHANNELS; // 29 8x8 planes in the input tensor

pub const HALFMOVE_NORMALIZER: f32 = 100.;
pub const FULLMOVE_NORMALIZER: f32 = 200.;

// Size of the move index space
pub const NUM_QUEEN_LIKE_AND_KNIGHT_MOVES: usize = 1792; // 1456 queen-like + 336 knight jumps
pub const NUM_PROMOTION_SQUARE_PAIRS_PER_SIDE: usize = 22; // pushes and captures onto the last rank
pub const NUM_PROMOTION_PIECES: usize = 4;
pub const NUM_PROMOTION_MOVES_PER_SIDE: usize = NUM_PROMOTION_SQUARE_PAIRS_PER_SIDE * NUM_PROMOTION_PIECES; // 88
pub const MOVE_INDEX_SIZE: usize = NUM_QUEEN_LIKE_AND_KNIGHT_MOVES + 2 * NUM_PROMOTION_MOVES_PER_SIDE; // 1968

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_layout() {
        assert_eq!(SIDE_TO_MOVE_CHANNEL, 12);
        assert_eq!(CASTLING_CHANNEL, 13);
        assert_eq!(EN_PASSANT_CHANNEL, 17);
        assert_eq!(HALFMOVE_CHANNEL, 18);
        assert_eq!(FULLMOVE_CHANNEL, 19);
        assert_eq!(REPETITION_CHANNEL, 20);
        assert_eq!(CHECK_CHANNEL, 22);
        assert_eq!(ONES_CHANNEL, 23);
        assert_eq!(NUM_CHANNELS, 29);
    }

    #[test]
    fn test_move_index_size() {
        assert_eq!(NUM_PROMOTION_MOVES_PER_SIDE, 88);
        assert_eq!(MOVE_INDEX_SIZE, 1968);
    }
}
