/// A board as characters, rank 8 first, file a first. Empty squares are spaces.
pub type Charboard = [[char; 8]; 8];

pub const EMPTY_CHARBOARD: Charboard = [[' '; 8]; 8];

pub const INITIAL_CHARBOARD: Charboard = [
    ['r', 'n', 'b', 'q', 'k', 'b', 'n', 'r'],
    ['p', 'p', 'p', 'p', 'p', 'p', 'p', 'p'],
    [' '; 8],
    [' '; 8],
    [' '; 8],
    [' '; 8],
    ['P', 'P', 'P', 'P', 'P', 'P', 'P', 'P'],
    ['R', 'N', 'B', 'Q', 'K', 'B', 'N', 'R']
];

pub fn cb_to_string(cb: &Charboard) -> String {
    let mut res = String::new();
    for (i, row) in cb.iter().enumerate() {
        res += &format!("{} ", 8 - i);
        for &c in row {
            res.push(if c == ' ' { '.' } else { c });
            res.push(' ');
        }
        res.push('\n');
    }
    res + "  a b c d e f g h"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cb_to_string() {
        let s = cb_to_string(&INITIAL_CHARBOARD);
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8 r n b q k b n r ");
        assert_eq!(lines[4], "4 . . . . . . . . ");
        assert_eq!(lines[7], "1 R N B Q K B N R ");
        assert_eq!(lines[8], "  a b c d e f g h");
        assert_eq!(cb_to_string(&EMPTY_CHARBOARD).matches('.').count(), 64);
    }
}
