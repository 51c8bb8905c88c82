use std::fmt::Display;
use std::str::FromStr;

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Square {
    A1=0, B1=1, C1=2, D1=3, E1=4, F1=5, G1=6, H1=7,
    A2=8, B2=9, C2=10, D2=11, E2=12, F2=13, G2=14, H2=15,
    A3=16, B3=17, C3=18, D3=19, E3=20, F3=21, G3=22, H3=23,
    A4=24, B4=25, C4=26, D4=27, E4=28, F4=29, G4=30, H4=31,
    A5=32, B5=33, C5=34, D5=35, E5=36, F5=37, G5=38, H5=39,
    A6=40, B6=41, C6=42, D6=43, E6=44, F6=45, G6=46, H6=47,
    A7=48, B7=49, C7=50, D7=51, E7=52, F7=53, G7=54, H7=55,
    A8=56, B8=57, C8=58, D8=59, E8=60, F8=61, G8=62, H8=63
}

const ALL: [Square; 64] = [
    Square::A1, Square::B1, Square::C1, Square::D1, Square::E1, Square::F1, Square::G1, Square::H1,
    Square::A2, Square::B2, Square::C2, Square::D2, Square::E2, Square::F2, Square::G2, Square::H2,
    Square::A3, Square::B3, Square::C3, Square::D3, Square::E3, Square::F3, Square::G3, Square::H3,
    Square::A4, Square::B4, Square::C4, Square::D4, Square::E4, Square::F4, Square::G4, Square::H4,
    Square::A5, Square::B5, Square::C5, Square::D5, Square::E5, Square::F5, Square::G5, Square::H5,
    Square::A6, Square::B6, Square::C6, Square::D6, Square::E6, Square::F6, Square::G6, Square::H6,
    Square::A7, Square::B7, Square::C7, Square::D7, Square::E7, Square::F7, Square::G7, Square::H7,
    Square::A8, Square::B8, Square::C8, Square::D8, Square::E8, Square::F8, Square::G8, Square::H8,
];

impl Square {
    pub const fn from_index(index: u8) -> Option<Square> {
        if index < 64 {
            Some(ALL[index as usize])
        } else {
            None
        }
    }

    pub const fn from_coords(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 {
            Some(ALL[(rank * 8 + file) as usize])
        } else {
            None
        }
    }

    pub const fn index(&self) -> usize {
        *self as usize
    }

    pub const fn get_file(&self) -> u8 {
        *self as u8 % 8
    }

    pub const fn get_rank(&self) -> u8 {
        *self as u8 / 8
    }

    pub const fn get_file_char(&self) -> char {
        (b'a' + self.get_file()) as char
    }

    pub const fn get_rank_char(&self) -> char {
        (b'1' + self.get_rank()) as char
    }

    /// Reflects the square across the horizontal midline (a1 <-> a8).
    pub const fn flip_vertical(&self) -> Square {
        ALL[(*self as u8 ^ 56) as usize]
    }

    /// Moves the square by the given file and rank offsets, if it stays on the board.
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Square> {
        let file = self.get_file() as i8 + file_delta;
        let rank = self.get_rank() as i8 + rank_delta;
        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            None
        } else {
            Square::from_coords(file as u8, rank as u8)
        }
    }

    pub fn iter_all() -> impl Iterator<Item = Square> {
        ALL.iter().copied()
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.get_file_char(), self.get_rank_char())
    }
}

impl FromStr for Square {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(());
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::from_coords(file, rank).ok_or(())
    }
}

impl From<shakmaty::Square> for Square {
    fn from(square: shakmaty::Square) -> Self {
        ALL[square as usize]
    }
}

impl From<Square> for shakmaty::Square {
    fn from(square: Square) -> Self {
        shakmaty::Square::new(square as u32)
    }
}
