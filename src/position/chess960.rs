//! Chess960 start positions in Scharnagl numbering.

use crate::position::PositionError;

pub const NUM_CHESS960_POSITIONS: u32 = 960;

/// The index of the standard starting array (RNBQKBNR).
pub const STANDARD_CHESS960_INDEX: u32 = 518;

/// Knight placements among the five squares left after bishops and queen are placed.
const KNIGHT_PLACEMENTS: [(usize, usize); 10] = [
    (0, 1), (0, 2), (0, 3), (0, 4),
    (1, 2), (1, 3), (1, 4),
    (2, 3), (2, 4),
    (3, 4)
];

/// Returns White's back rank for start position `index`, from the a-file to the h-file.
pub fn chess960_back_rank(index: u32) -> Result<[char; 8], PositionError> {
    if index >= NUM_CHESS960_POSITIONS {
        return Err(PositionError::InvalidChess960Index(index));
    }

    let mut rank = [' '; 8];

    let n = index;
    let light_bishop_file = 2 * (n % 4) as usize + 1;
    let n = n / 4;
    let dark_bishop_file = 2 * (n % 4) as usize;
    let n = n / 4;
    let queen_slot = (n % 6) as usize;
    let knight_placement = KNIGHT_PLACEMENTS[(n / 6) as usize];

    rank[light_bishop_file] = 'B';
    rank[dark_bishop_file] = 'B';

    let empty_files = |rank: &[char; 8]| -> Vec<usize> {
        (0..8).filter(|&file| rank[file] == ' ').collect()
    };

    let queen_file = empty_files(&rank)[queen_slot];
    rank[queen_file] = 'Q';

    let free = empty_files(&rank);
    rank[free[knight_placement.0]] = 'N';
    rank[free[knight_placement.1]] = 'N';

    // The king always lands between the rooks
    for (file, piece) in empty_files(&rank).into_iter().zip(['R', 'K', 'R']) {
        rank[file] = piece;
    }

    Ok(rank)
}

/// Returns the FEN of start position `index`, with both sides holding both castling rights.
pub fn chess960_fen(index: u32) -> Result<String, PositionError> {
    let white: String = chess960_back_rank(index)?.iter().collect();
    let black = white.to_lowercase();
    Ok(format!("{}/pppppppp/8/8/8/8/PPPPPPPP/{} w KQkq - 0 1", black, white))
}
