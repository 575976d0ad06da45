// Copyright (C) 2025-2026 Andy Kurnia.

// Tile codes: 0 = blank, 1-26 = A-Z, 0x80 | letter = blank played as that
// letter. A flagged tile keeps the blank's identity (and its zero score) on
// the board and on the way back out of a rack.

pub struct Tile<'a> {
    label: &'a str,
    blank_label: &'a str,
    freq: u8,
    score: i8,
}

pub struct StaticAlphabet<'a> {
    tiles: &'a [Tile<'a>],
}

pub enum Alphabet<'a> {
    Static(StaticAlphabet<'a>),
}

impl<'a> Alphabet<'a> {
    #[inline(always)]
    pub fn len(&self) -> u8 {
        match self {
            Alphabet::Static(x) => x.tiles.len() as u8,
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn get(&self, idx: u8) -> &'a Tile<'a> {
        match self {
            Alphabet::Static(x) => &x.tiles[idx as usize],
        }
    }

    #[inline(always)]
    pub fn from_board(&self, idx: u8) -> Option<&'a str> {
        let c = idx & 0x7f;
        if c == 0 || c >= self.len() {
            None
        } else if idx & 0x80 == 0 {
            Some(self.get(c).label)
        } else {
            Some(self.get(c).blank_label)
        }
    }

    #[inline(always)]
    pub fn from_rack(&self, idx: u8) -> Option<&'a str> {
        if idx >= self.len() {
            None
        } else {
            Some(self.get(idx).label)
        }
    }

    #[inline(always)]
    pub fn score(&self, idx: u8) -> i8 {
        // 0x80-flagged tiles score as the blank (index 0).
        self.get(idx & !((idx as i8) >> 7) as u8).score
    }

    #[inline(always)]
    pub fn freq(&self, idx: u8) -> u8 {
        self.get(idx).freq
    }

    pub fn fmt_rack(&self, rack: &[u8]) -> String {
        rack.iter()
            .filter_map(|&tile| self.from_rack(tile))
            .collect()
    }
}

macro_rules! tile {
    ($label:expr, $blank_label:expr, $freq:expr, $score:expr) => {
        Tile {
            label: $label,
            blank_label: $blank_label,
            freq: $freq,
            score: $score,
        }
    };
}

pub fn make_english_alphabet<'a>() -> Alphabet<'a> {
    Alphabet::Static(StaticAlphabet {
        tiles: &[
            tile!("?", "?", 2, 0),
            tile!("A", "a", 9, 1),
            tile!("B", "b", 2, 3),
            tile!("C", "c", 2, 3),
            tile!("D", "d", 4, 2),
            tile!("E", "e", 12, 1),
            tile!("F", "f", 2, 4),
            tile!("G", "g", 3, 2),
            tile!("H", "h", 2, 4),
            tile!("I", "i", 9, 1),
            tile!("J", "j", 1, 8),
            tile!("K", "k", 1, 5),
            tile!("L", "l", 4, 1),
            tile!("M", "m", 2, 3),
            tile!("N", "n", 6, 1),
            tile!("O", "o", 8, 1),
            tile!("P", "p", 2, 3),
            tile!("Q", "q", 1, 10),
            tile!("R", "r", 6, 1),
            tile!("S", "s", 4, 1),
            tile!("T", "t", 6, 1),
            tile!("U", "u", 4, 1),
            tile!("V", "v", 2, 4),
            tile!("W", "w", 2, 4),
            tile!("X", "x", 1, 8),
            tile!("Y", "y", 2, 4),
            tile!("Z", "z", 1, 10),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_distribution_has_one_hundred_tiles() {
        let alphabet = make_english_alphabet();
        let num_tiles: u16 = (0..alphabet.len())
            .map(|tile| alphabet.freq(tile) as u16)
            .sum();
        assert_eq!(num_tiles, 100);
        assert_eq!(alphabet.freq(0), 2);
    }

    #[test]
    fn blank_scores_zero_whatever_it_plays_as() {
        let alphabet = make_english_alphabet();
        assert_eq!(alphabet.score(0), 0);
        assert_eq!(alphabet.score(0x80 | 17), 0); // blank played as Q
        assert_eq!(alphabet.score(17), 10);
    }

    #[test]
    fn board_labels_distinguish_blanks() {
        let alphabet = make_english_alphabet();
        assert_eq!(alphabet.from_board(0), None);
        assert_eq!(alphabet.from_board(3), Some("C"));
        assert_eq!(alphabet.from_board(0x80 | 3), Some("c"));
    }

    #[test]
    fn rack_formatting() {
        let alphabet = make_english_alphabet();
        assert_eq!(alphabet.fmt_rack(&[3, 1, 20, 0]), "CAT?");
    }
}
