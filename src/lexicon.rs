// Copyright (C) 2025-2026 Andy Kurnia.

// Word membership by 64-bit fingerprint instead of by string. Each letter
// contributes its low 5 bits, which maps 'A'/'a' from a word list and the
// tile codes 1-26 (blank-flagged or not) to the same value, so the search
// loop hashes board runs directly without building a word. Two different
// words could fingerprint alike and be treated as interchangeable; that
// collision risk is accepted.

const FINGERPRINT_SEED: u64 = 0xcbf2_9ce4_8422_2325;
const FINGERPRINT_MULTIPLIER: u64 = 0x0000_0100_0000_01b3;

#[derive(Clone, Copy)]
pub struct Fingerprint(u64);

impl Fingerprint {
    #[inline(always)]
    pub fn new() -> Fingerprint {
        Fingerprint(FINGERPRINT_SEED)
    }

    #[inline(always)]
    pub fn step(self, letter: u8) -> Fingerprint {
        Fingerprint(self.0.wrapping_mul(FINGERPRINT_MULTIPLIER) ^ ((letter & 0x1f) as u64))
    }

    #[inline(always)]
    pub fn of(word: &[u8]) -> Fingerprint {
        word.iter().fold(Fingerprint::new(), |fp, &b| fp.step(b))
    }

    #[inline(always)]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for Fingerprint {
    fn default() -> Fingerprint {
        Fingerprint::new()
    }
}

// Fingerprints are already mixed, pass them through as their own hash.
pub struct PassThroughHasher(u64);

impl std::hash::Hasher for PassThroughHasher {
    fn finish(&self) -> u64 {
        self.0
    }
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.rotate_left(8) ^ b as u64;
        }
    }
    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }
}

impl Default for PassThroughHasher {
    fn default() -> PassThroughHasher {
        PassThroughHasher(0)
    }
}

type FingerprintSet = std::collections::HashSet<u64, std::hash::BuildHasherDefault<PassThroughHasher>>;

pub struct Lexicon {
    words: FingerprintSet,
}

impl Lexicon {
    pub fn new() -> Lexicon {
        Lexicon {
            words: FingerprintSet::default(),
        }
    }

    // Words shorter than two letters are never valid plays, skip them here
    // so lookups need not recheck.
    pub fn add_word(&mut self, word: &[u8]) {
        if word.len() >= 2 {
            self.words.insert(Fingerprint::of(word).value());
        }
    }

    #[inline(always)]
    pub fn lookup(&self, fingerprint: Fingerprint) -> bool {
        self.words.contains(&fingerprint.value())
    }

    #[inline(always)]
    pub fn contains(&self, word: &[u8]) -> bool {
        word.len() >= 2 && self.lookup(Fingerprint::of(word))
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Lexicon {
    fn default() -> Lexicon {
        Lexicon::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_are_case_insensitive() {
        let mut lexicon = Lexicon::new();
        lexicon.add_word(b"cat");
        assert!(lexicon.contains(b"CAT"));
        assert!(lexicon.contains(b"cAt"));
        assert!(!lexicon.contains(b"act"));
    }

    #[test]
    fn tile_codes_fingerprint_like_letters() {
        // C=3 A=1 T=20, with and without the blank flag.
        assert_eq!(
            Fingerprint::of(b"CAT").value(),
            Fingerprint::of(&[3, 1, 20]).value()
        );
        assert_eq!(
            Fingerprint::of(b"cat").value(),
            Fingerprint::of(&[0x80 | 3, 1, 20]).value()
        );
    }

    #[test]
    fn fingerprint_is_order_sensitive() {
        assert_ne!(
            Fingerprint::of(b"ON").value(),
            Fingerprint::of(b"NO").value()
        );
    }

    #[test]
    fn short_words_are_ignored() {
        let mut lexicon = Lexicon::new();
        lexicon.add_word(b"A");
        lexicon.add_word(b"");
        assert!(lexicon.is_empty());
        assert!(!lexicon.contains(b"A"));
    }

    #[test]
    fn counts_distinct_words() {
        let mut lexicon = Lexicon::new();
        lexicon.add_word(b"cat");
        lexicon.add_word(b"CAT");
        lexicon.add_word(b"cob");
        assert_eq!(lexicon.len(), 2);
    }
}
