//! Legal-moves dataset: positions from random chess960 games, each paired with its legal moves.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::neural::constants::{MOVE_INDEX_SIZE, NUM_CHANNELS};
use crate::neural::{index_of, BoardTensor, EncodingError, MoveIndexError, MoveShape, ParseMoveShapeError, PositionEncoder};
use crate::position::{CastlingMode, Position, PositionError};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(transparent)]
    Position(#[from] PositionError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    MoveShape(#[from] ParseMoveShapeError),
    #[error(transparent)]
    MoveIndex(#[from] MoveIndexError),
    #[error("dataset file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("dataset serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

/// A position and the UCI text of every move legal in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalMovesRecord {
    pub fen: String,
    pub legal_moves: Vec<String>,
}

/// Model input and multi-hot legal move target for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingPair {
    pub input: BoardTensor,
    pub target: Vec<f32>,
}

impl LegalMovesRecord {
    pub fn from_position(position: &Position) -> LegalMovesRecord {
        LegalMovesRecord {
            fen: position.fen(),
            legal_moves: position
                .legal_moves()
                .iter()
                .map(|mv| position.to_uci(mv))
                .collect(),
        }
    }

    /// Encodes the record. When the input is mirrored, the target move shapes are mirrored with it.
    pub fn to_training_pair(&self, mirror_if_black: bool) -> Result<TrainingPair, DatasetError> {
        // Chess960 mode reads both standard and chess960 castling rights
        let position = Position::from_fen_with_mode(&self.fen, CastlingMode::Chess960)?;
        let encoder = PositionEncoder::new(NUM_CHANNELS, mirror_if_black)?;
        let input = encoder.encode(&position)?;
        let mirrored = encoder.is_mirrored(&position);

        let mut target = vec![0.; MOVE_INDEX_SIZE];
        for uci in &self.legal_moves {
            let shape: MoveShape = uci.parse()?;
            let shape = if mirrored { shape.mirrored() } else { shape };
            target[index_of(&shape)?] = 1.;
        }

        Ok(TrainingPair { input, target })
    }
}

/// Plays uniformly random legal moves until the game is over.
pub fn play_random_game<R: Rng + ?Sized>(position: &mut Position, rng: &mut R) -> Result<(), PositionError> {
    while !position.is_game_over() {
        let legal_moves = position.legal_moves();
        let Some(mv) = legal_moves.choose(rng) else {
            break;
        };
        position.push(mv)?;
    }
    Ok(())
}

/// Takes back every move of a game, recording each position reached on the way. The position
/// before the last move comes first; the final position itself is not recorded.
pub fn records_from_finished_game(position: &mut Position) -> Vec<LegalMovesRecord> {
    let mut records = Vec::with_capacity(position.ply());
    while position.pop().is_some() {
        records.push(LegalMovesRecord::from_position(position));
    }
    records
}

pub fn generate_legal_moves_dataset<R: Rng + ?Sized>(n_games: usize, rng: &mut R) -> Result<Vec<LegalMovesRecord>, DatasetError> {
    let mut dataset = Vec::new();
    for _ in 0..n_games {
        let mut position = Position::random_chess960(rng)?;
        play_random_game(&mut position, rng)?;
        dataset.extend(records_from_finished_game(&mut position));
    }
    Ok(dataset)
}

pub fn save_dataset<P: AsRef<Path>>(dataset: &[LegalMovesRecord], path: P) -> Result<(), DatasetError> {
    let writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(writer, dataset)?;
    Ok(())
}

pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Vec<LegalMovesRecord>, DatasetError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(bincode::deserialize_from(reader)?)
}
