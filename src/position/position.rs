//! Contains the Position struct, the adapter between the core and the chess rules engine.

use std::fmt::{Display, Formatter};
use std::ops::Deref;
use rand::Rng;
use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, CastlingSide, Chess, EnPassantMode, Move, Position as _};
use crate::neural::MoveShape;
use crate::position::{chess960_fen, Outcome, PositionError, Termination, NUM_CHESS960_POSITIONS};
use crate::utils::{cb_to_string, Charboard, Color, PieceType, Square, EMPTY_CHARBOARD};

/// Halfmove clock at which the seventy-five move rule ends the game.
const SEVENTY_FIVE_MOVE_HALFMOVES: u32 = 150;

/// Earlier occurrences after which a position counts as repeated five times.
const FIVEFOLD_EARLIER_OCCURRENCES: usize = 4;

#[derive(Clone, Debug)]
struct HistoryEntry {
    position: Chess,
    key: String,
    mv: Move,
}

/// A chess position together with the moves that led to it.
///
/// Moves are applied with [`Position::push`] and taken back with [`Position::pop`]. Every push
/// stores a snapshot of the previous position, so popping restores it exactly, counters included.
#[derive(Clone, Debug)]
pub struct Position {
    current: Chess,
    current_key: String,
    castling_mode: CastlingMode,
    history: Vec<HistoryEntry>,
}

fn shape_in_mode(mv: &Move, castling_mode: CastlingMode) -> Result<MoveShape, PositionError> {
    match mv.to_uci(castling_mode) {
        UciMove::Normal { from, to, promotion } => Ok(MoveShape::new(
            from.into(),
            to.into(),
            promotion.map(PieceType::from),
        )),
        other => Err(PositionError::UnsupportedMove { uci: other.to_string() }),
    }
}

/// Board, side to move, castling rights and en passant square: the fields that decide repetition.
fn repetition_key(position: &Chess) -> String {
    let fen = Fen::from_position(position.clone(), EnPassantMode::Legal).to_string();
    fen.split(' ').take(4).collect::<Vec<_>>().join(" ")
}

impl Default for Position {
    fn default() -> Self {
        Position::from_chess(Chess::default(), CastlingMode::Standard)
    }
}

impl Position {
    /// Creates the standard starting position.
    pub fn new() -> Position {
        Position::default()
    }

    fn from_chess(current: Chess, castling_mode: CastlingMode) -> Position {
        Position {
            current_key: repetition_key(&current),
            current,
            castling_mode,
            history: Vec::new(),
        }
    }

    /// Parses a FEN with standard castling.
    pub fn from_fen(fen: &str) -> Result<Position, PositionError> {
        Position::from_fen_with_mode(fen, CastlingMode::Standard)
    }

    pub fn from_fen_with_mode(fen: &str, castling_mode: CastlingMode) -> Result<Position, PositionError> {
        let invalid = |reason: String| PositionError::InvalidFen { fen: fen.to_string(), reason };
        let parsed = Fen::from_ascii(fen.trim().as_bytes()).map_err(|e| invalid(e.to_string()))?;
        let current: Chess = parsed
            .into_position(castling_mode)
            .map_err(|e| invalid(e.to_string()))?;
        Ok(Position::from_chess(current, castling_mode))
    }

    /// Creates chess960 start position `index` (Scharnagl numbering), using chess960 castling notation.
    pub fn chess960(index: u32) -> Result<Position, PositionError> {
        let fen = chess960_fen(index)?;
        Position::from_fen_with_mode(&fen, CastlingMode::Chess960)
    }

    pub fn random_chess960<R: Rng + ?Sized>(rng: &mut R) -> Result<Position, PositionError> {
        Position::chess960(rng.gen_range(0..NUM_CHESS960_POSITIONS))
    }

    pub fn castling_mode(&self) -> CastlingMode {
        self.castling_mode
    }

    pub fn fen(&self) -> String {
        Fen::from_position(self.current.clone(), EnPassantMode::Legal).to_string()
    }

    pub fn turn(&self) -> Color {
        self.current.turn().into()
    }

    pub fn piece_at(&self, square: Square) -> Option<(Color, PieceType)> {
        self.current
            .board()
            .piece_at(square.into())
            .map(|piece| (piece.color.into(), piece.role.into()))
    }

    pub fn has_castling_right(&self, color: Color, kingside: bool) -> bool {
        let side = if kingside { CastlingSide::KingSide } else { CastlingSide::QueenSide };
        self.current.castles().has(color.into(), side)
    }

    /// The en passant target square, only if an en passant capture is actually legal.
    pub fn ep_square(&self) -> Option<Square> {
        self.current.ep_square(EnPassantMode::Legal).map(Square::from)
    }

    pub fn halfmoves(&self) -> u32 {
        self.current.halfmoves()
    }

    pub fn fullmoves(&self) -> u32 {
        self.current.fullmoves().get()
    }

    /// Number of moves pushed since the position was created.
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    pub fn is_check(&self) -> bool {
        self.current.is_check()
    }

    /// Counts earlier positions in the history that are repetitions of the current one.
    pub fn repetitions(&self) -> usize {
        self.history
            .iter()
            .rev()
            .take(self.halfmoves() as usize)
            .filter(|entry| entry.key == self.current_key)
            .count()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.current.legal_moves().into_iter().collect()
    }

    pub fn is_legal(&self, mv: &Move) -> bool {
        self.current.is_legal(mv)
    }

    pub fn is_capture(&self, mv: &Move) -> bool {
        mv.is_capture()
    }

    /// Checks whether a legal move puts the opponent in check. Illegal moves never give check.
    pub fn gives_check(&self, mv: &Move) -> bool {
        if !self.current.is_legal(mv) {
            return false;
        }
        let mut after = self.current.clone();
        after.play_unchecked(mv);
        after.is_check()
    }

    /// Plays a legal move. Illegal moves are rejected and leave the position untouched.
    pub fn push(&mut self, mv: &Move) -> Result<(), PositionError> {
        if !self.current.is_legal(mv) {
            return Err(PositionError::IllegalMove {
                uci: self.to_uci(mv),
                fen: self.fen(),
            });
        }

        let previous = self.current.clone();
        self.current.play_unchecked(mv);
        let previous_key = std::mem::replace(&mut self.current_key, repetition_key(&self.current));
        self.history.push(HistoryEntry {
            position: previous,
            key: previous_key,
            mv: mv.clone(),
        });
        Ok(())
    }

    pub fn push_uci(&mut self, uci: &str) -> Result<Move, PositionError> {
        let mv = self.move_from_uci(uci)?;
        self.push(&mv)?;
        Ok(mv)
    }

    /// Takes back the last move, restoring the previous position exactly.
    pub fn pop(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        self.current = entry.position;
        self.current_key = entry.key;
        Some(entry.mv)
    }

    /// Plays a move for the lifetime of the returned guard; dropping the guard takes it back.
    pub fn apply(&mut self, mv: &Move) -> Result<AppliedMove<'_>, PositionError> {
        self.push(mv)?;
        Ok(AppliedMove { position: self })
    }

    /// Moves played since the position was created, oldest first.
    pub fn move_stack(&self) -> impl Iterator<Item = &Move> {
        self.history.iter().map(|entry| &entry.mv)
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.history.last().map(|entry| &entry.mv)
    }

    pub fn move_from_uci(&self, uci: &str) -> Result<Move, PositionError> {
        let parsed = UciMove::from_ascii(uci.trim().as_bytes()).map_err(|e| PositionError::InvalidUci {
            uci: uci.to_string(),
            reason: e.to_string(),
        })?;
        parsed.to_move(&self.current).map_err(|e| PositionError::InvalidUci {
            uci: uci.to_string(),
            reason: e.to_string(),
        })
    }

    /// UCI text of a move; castling is king-to-rook in chess960 mode and king-two-squares otherwise.
    pub fn to_uci(&self, mv: &Move) -> String {
        mv.to_uci(self.castling_mode).to_string()
    }

    pub fn shape_of(&self, mv: &Move) -> Result<MoveShape, PositionError> {
        shape_in_mode(mv, self.castling_mode)
    }

    /// Both shapes a castling move can be written as: king to its destination and king onto rook.
    /// Empty for every other move.
    pub fn castling_shapes(&self, mv: &Move) -> Vec<MoveShape> {
        if !mv.is_castle() {
            return Vec::new();
        }
        [CastlingMode::Standard, CastlingMode::Chess960]
            .into_iter()
            .filter_map(|mode| shape_in_mode(mv, mode).ok())
            .collect()
    }

    pub fn termination(&self) -> Option<Termination> {
        if self.current.is_checkmate() {
            Some(Termination::Checkmate)
        } else if self.current.is_insufficient_material() {
            Some(Termination::InsufficientMaterial)
        } else if self.current.is_stalemate() {
            Some(Termination::Stalemate)
        } else if self.halfmoves() >= SEVENTY_FIVE_MOVE_HALFMOVES {
            Some(Termination::SeventyFiveMoves)
        } else if self.repetitions() >= FIVEFOLD_EARLIER_OCCURRENCES {
            Some(Termination::FivefoldRepetition)
        } else {
            None
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.termination().is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.termination().map(|termination| match termination {
            Termination::Checkmate => Outcome::Decisive { winner: self.turn().flip() },
            _ => Outcome::Draw,
        })
    }

    pub fn to_cb(&self) -> Charboard {
        let mut cb = EMPTY_CHARBOARD;
        for square in Square::iter_all() {
            if let Some((color, piece_type)) = self.piece_at(square) {
                let c = piece_type.to_char();
                cb[7 - square.get_rank() as usize][square.get_file() as usize] = match color {
                    Color::White => c.to_ascii_uppercase(),
                    Color::Black => c,
                };
            }
        }
        cb
    }

    pub fn print(&self) {
        println!("{}", self);
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", cb_to_string(&self.to_cb()))
    }
}

/// A move applied to a [`Position`] for as long as this guard lives.
///
/// The move is taken back when the guard is dropped, including on early returns and `?`.
pub struct AppliedMove<'a> {
    position: &'a mut Position,
}

impl AppliedMove<'_> {
    pub fn mv(&self) -> Option<&Move> {
        self.position.last_move()
    }
}

impl Deref for AppliedMove<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.position
    }
}

impl Drop for AppliedMove<'_> {
    fn drop(&mut self) {
        self.position.pop();
    }
}
