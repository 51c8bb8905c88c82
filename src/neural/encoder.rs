use crate::neural::constants::*;
use crate::neural::{BoardTensor, EncodingError};
use crate::position::Position;
use crate::utils::{Color, PieceType, Square};

/// Turns positions into the fixed `[NUM_CHANNELS, 8, 8]` input of the policy model.
///
/// With `mirror_if_black`, positions with Black to move are flipped vertically and the colors
/// swapped, so the model always sees the side to move from the first player's seat. The same
/// setting must be used when generating training data and at inference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionEncoder {
    mirror_if_black: bool,
}

impl PositionEncoder {
    /// Fails if `channels` is not the channel count of the encoding layout.
    pub fn new(channels: usize, mirror_if_black: bool) -> Result<PositionEncoder, EncodingError> {
        if channels != NUM_CHANNELS {
            return Err(EncodingError::ChannelMismatch {
                expected: NUM_CHANNELS,
                actual: channels,
            });
        }
        Ok(PositionEncoder { mirror_if_black })
    }

    pub fn mirror_if_black(&self) -> bool {
        self.mirror_if_black
    }

    /// Whether `position` gets encoded from the mirrored point of view.
    pub fn is_mirrored(&self, position: &Position) -> bool {
        self.mirror_if_black && position.turn() == Color::Black
    }

    pub fn encode(&self, position: &Position) -> Result<BoardTensor, EncodingError> {
        let mirrored = self.is_mirrored(position);
        let us = if mirrored { Color::Black } else { Color::White };

        let mut tensor = BoardTensor::zeros(NUM_CHANNELS);

        // Channels 0-11: Pieces
        fill_pieces(&mut tensor, position, us, mirrored);

        // Channel 12: Side to move
        fill_side_to_move(&mut tensor, position.turn() == us);

        // Channels 13-16: Castling rights
        fill_castling_rights(&mut tensor, position, us);

        // Channel 17: En passant file
        fill_en_passant(&mut tensor, position, mirrored)?;

        // Channels 18-19: Move counters
        fill_move_counters(&mut tensor, position);

        // Channels 20-21: Repetitions
        fill_repetitions(&mut tensor, position.repetitions());

        // Channel 22: Check
        if position.is_check() {
            tensor.fill_plane(CHECK_CHANNEL, 1.);
        }

        // Channel 23: Constant ones, channels 24-28 stay zero
        tensor.fill_plane(ONES_CHANNEL, 1.);

        Ok(tensor)
    }
}

/// Encodes `position` with the default channel count.
pub fn encode(position: &Position, mirror_if_black: bool) -> Result<BoardTensor, EncodingError> {
    PositionEncoder::new(NUM_CHANNELS, mirror_if_black)?.encode(position)
}

fn oriented(square: Square, mirrored: bool) -> Square {
    if mirrored {
        square.flip_vertical()
    } else {
        square
    }
}

fn fill_pieces(tensor: &mut BoardTensor, position: &Position, us: Color, mirrored: bool) {
    for square in Square::iter_all() {
        if let Some((color, piece_type)) = position.piece_at(square) {
            let offset = if color == us { 0 } else { NUM_PIECE_TYPE_BITS };
            let channel = offset + piece_type as usize - PieceType::Pawn as usize;
            let square = oriented(square, mirrored);
            tensor.set(channel, square.get_rank() as usize, square.get_file() as usize, 1.);
        }
    }
}

fn fill_side_to_move(tensor: &mut BoardTensor, first_player_to_move: bool) {
    let val = if first_player_to_move { 1. } else { 0. };
    tensor.fill_plane(SIDE_TO_MOVE_CHANNEL, val);
}

fn fill_castling_rights(tensor: &mut BoardTensor, position: &Position, us: Color) {
    let rights = [
        (us, true),
        (us, false),
        (us.flip(), true),
        (us.flip(), false),
    ];
    for (i, (color, kingside)) in rights.into_iter().enumerate() {
        if position.has_castling_right(color, kingside) {
            tensor.fill_plane(CASTLING_CHANNEL + i, 1.);
        }
    }
}

fn fill_en_passant(tensor: &mut BoardTensor, position: &Position, mirrored: bool) -> Result<(), EncodingError> {
    let Some(ep_square) = position.ep_square() else {
        return Ok(());
    };

    // The target square sits behind the pawn that just made a double push
    let expected_rank = match position.turn() {
        Color::White => 5,
        Color::Black => 2,
    };
    if ep_square.get_rank() != expected_rank {
        return Err(EncodingError::Unrepresentable(format!(
            "en passant square {} with {:?} to move",
            ep_square,
            position.turn()
        )));
    }

    let file = oriented(ep_square, mirrored).get_file() as usize;
    for rank in 0..BOARD_SIZE {
        tensor.set(EN_PASSANT_CHANNEL, rank, file, 1.);
    }
    Ok(())
}

fn fill_move_counters(tensor: &mut BoardTensor, position: &Position) {
    let halfmoves = (position.halfmoves() as f32 / HALFMOVE_NORMALIZER).min(1.);
    let fullmoves = (position.fullmoves() as f32 / FULLMOVE_NORMALIZER).min(1.);
    tensor.fill_plane(HALFMOVE_CHANNEL, halfmoves);
    tensor.fill_plane(FULLMOVE_CHANNEL, fullmoves);
}

fn fill_repetitions(tensor: &mut BoardTensor, repetitions: usize) {
    for i in 0..NUM_REPETITION_BITS {
        if repetitions > i {
            tensor.fill_plane(REPETITION_CHANNEL + i, 1.);
        }
    }
}
