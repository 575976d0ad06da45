// Copyright (C) 2025-2026 Andy Kurnia.

use super::{game_config, lexicon, matrix};

pub struct BoardSnapshot<'a> {
    pub board_tiles: &'a [u8],
    pub game_config: &'a game_config::GameConfig<'a>,
    pub lexicon: &'a lexicon::Lexicon,
}

pub enum Play {
    Pass,
    Place {
        down: bool,
        lane: i8,
        idx: i8,
        word: Vec<u8>,
        score: i16,
    },
}

impl Play {
    pub fn fmt(&self, board_snapshot: &BoardSnapshot<'_>) -> String {
        match self {
            Play::Pass => "(pass)".into(),
            Play::Place {
                down,
                lane,
                idx,
                word,
                score,
            } => {
                let alphabet = board_snapshot.game_config.alphabet();
                let dim = board_snapshot.game_config.board_layout().dim();
                let strider = dim.lane(*down, *lane);
                let mut s = if *down {
                    format!("{}{} ", (*lane as u8 + 0x61) as char, idx + 1)
                } else {
                    format!("{}{} ", lane + 1, (*idx as u8 + 0x61) as char)
                };
                let mut inside = false;
                for (i, &tile) in (*idx..).zip(word.iter()) {
                    if tile == 0 {
                        if !inside {
                            s.push('(');
                            inside = true;
                        }
                        s.push_str(
                            alphabet
                                .from_board(board_snapshot.board_tiles[strider.at(i)])
                                .unwrap_or("?"),
                        );
                    } else {
                        if inside {
                            s.push(')');
                            inside = false;
                        }
                        s.push_str(alphabet.from_board(tile).unwrap_or("?"));
                    }
                }
                if inside {
                    s.push(')');
                }
                s.push_str(&format!(" {score}"));
                s
            }
        }
    }
}

// Every distinct way to arrange some subset of the rack, each produced
// exactly once: identical tiles are collapsed by drawing from a tally
// instead of from rack positions. Blanks materialize here, as one flagged
// sequence per letter; a sequence that would need a second blank is dropped.
fn enumerate_rack_sequences(
    alphabet_len: u8,
    rack: &[u8],
    rack_tally: &mut [u8],
    out: &mut Vec<Vec<u8>>,
) {
    rack_tally.iter_mut().for_each(|m| *m = 0);
    for &tile in rack {
        rack_tally[tile as usize] += 1;
    }

    struct Env<'a> {
        alphabet_len: u8,
        rack_tally: &'a mut [u8],
        seq: Vec<u8>,
        out: &'a mut Vec<Vec<u8>>,
        has_blank: bool,
    }

    fn extend(env: &mut Env<'_>) {
        for tile in 0..env.alphabet_len {
            if env.rack_tally[tile as usize] == 0 {
                continue;
            }
            if tile == 0 {
                // a second blank in the same sequence is not supported
                if env.has_blank {
                    continue;
                }
                env.rack_tally[0] -= 1;
                env.has_blank = true;
                for letter in 1..env.alphabet_len {
                    env.seq.push(0x80 | letter);
                    env.out.push(env.seq.clone());
                    extend(env);
                    env.seq.pop();
                }
                env.has_blank = false;
                env.rack_tally[0] += 1;
            } else {
                env.rack_tally[tile as usize] -= 1;
                env.seq.push(tile);
                env.out.push(env.seq.clone());
                extend(env);
                env.seq.pop();
                env.rack_tally[tile as usize] += 1;
            }
        }
    }

    let mut env = Env {
        alphabet_len,
        rack_tally,
        seq: Vec::with_capacity(rack.len()),
        out,
        has_blank: false,
    };
    extend(&mut env);
}

// A play is connected if it fills the star square while that square is
// still empty, or if the board has started and the run touches or plays
// through at least one existing tile. The sequence must also be consumed
// exactly by the empty squares of the run before the board edge.
fn check_geometry(
    board_snapshot: &BoardSnapshot<'_>,
    down: bool,
    lane: i8,
    idx: i8,
    num_tiles: i8,
) -> bool {
    let board_layout = board_snapshot.game_config.board_layout();
    let dim = board_layout.dim();
    let strider = dim.lane(down, lane);
    let (star_lane, star_idx) = if down {
        (board_layout.star_col(), board_layout.star_row())
    } else {
        (board_layout.star_row(), board_layout.star_col())
    };
    let mut remaining = num_tiles;
    let mut connected = false;
    let mut fills_star = false;
    let mut i = idx;
    while i < strider.len() && remaining > 0 {
        if board_snapshot.board_tiles[strider.at(i)] == 0 {
            remaining -= 1;
            if lane == star_lane && i == star_idx {
                fills_star = true;
            }
        } else {
            connected = true;
        }
        if !connected {
            let (row, col) = if down { (i, lane) } else { (lane, i) };
            connected = (row > 0 && board_snapshot.board_tiles[dim.at_row_col(row - 1, col)] != 0)
                || (row + 1 < dim.rows
                    && board_snapshot.board_tiles[dim.at_row_col(row + 1, col)] != 0)
                || (col > 0 && board_snapshot.board_tiles[dim.at_row_col(row, col - 1)] != 0)
                || (col + 1 < dim.cols
                    && board_snapshot.board_tiles[dim.at_row_col(row, col + 1)] != 0);
        }
        i += 1;
    }
    remaining == 0
        && (fills_star
            || (board_snapshot.board_tiles
                [dim.at_row_col(board_layout.star_row(), board_layout.star_col())]
                != 0
                && connected))
}

// Validates and scores the maximal run through anchor_idx along strider.
// overlay holds the tiles being placed this turn; premiums apply to those
// squares only. The run is fingerprinted as it is scanned, no word buffer.
fn check_word(
    board_snapshot: &BoardSnapshot<'_>,
    overlay: &[u8],
    strider: matrix::Strider,
    anchor_idx: i8,
    primary: bool,
) -> Option<i16> {
    let game_config = board_snapshot.game_config;
    let alphabet = game_config.alphabet();
    let premiums = game_config.board_layout().premiums();
    let mut start = anchor_idx;
    while start > 0 {
        let pos = strider.at(start - 1);
        if overlay[pos] == 0 && board_snapshot.board_tiles[pos] == 0 {
            break;
        }
        start -= 1;
    }
    let mut score = 0i16;
    let mut word_multiplier = 1i16;
    let mut fingerprint = lexicon::Fingerprint::new();
    let mut len = 0i8;
    let mut i = start;
    while i < strider.len() {
        let pos = strider.at(i);
        let mut tile = board_snapshot.board_tiles[pos];
        let mut tile_multiplier = 1i16;
        if overlay[pos] != 0 {
            tile = overlay[pos];
            let premium = premiums[pos];
            word_multiplier *= premium.word_multiplier as i16;
            tile_multiplier = premium.tile_multiplier as i16;
        }
        if tile == 0 {
            break;
        }
        fingerprint = fingerprint.step(tile);
        len += 1;
        score += alphabet.score(tile) as i16 * tile_multiplier;
        i += 1;
    }
    if len < 2 {
        // a lone tile forms no word in this direction
        if primary { None } else { Some(0) }
    } else if !board_snapshot.lexicon.lookup(fingerprint) {
        None
    } else {
        Some(score * word_multiplier)
    }
}

// Drops seq into the empty squares of the run starting at idx. Each placed
// tile must leave its perpendicular run valid; the main run is checked
// last. Returns the total score, or None for any illegal candidate - a
// normal outcome, most candidates die here.
fn evaluate_play(
    board_snapshot: &BoardSnapshot<'_>,
    overlay: &mut [u8],
    down: bool,
    lane: i8,
    idx: i8,
    seq: &[u8],
) -> Option<i16> {
    if !check_geometry(board_snapshot, down, lane, idx, seq.len() as i8) {
        return None;
    }
    let dim = board_snapshot.game_config.board_layout().dim();
    let strider = dim.lane(down, lane);
    let mut total = 0i16;
    let mut legal = true;
    let mut placed = 0;
    let mut i = idx;
    while placed < seq.len() {
        let pos = strider.at(i);
        if board_snapshot.board_tiles[pos] == 0 {
            overlay[pos] = seq[placed];
            placed += 1;
            match check_word(board_snapshot, overlay, dim.lane(!down, i), lane, false) {
                Some(points) => total += points,
                None => {
                    legal = false;
                    break;
                }
            }
        }
        i += 1;
    }
    if legal {
        match check_word(board_snapshot, overlay, strider, idx, true) {
            Some(points) => total += points,
            None => legal = false,
        }
    }
    // clear the overlay for the next candidate
    let mut cleared = 0;
    let mut j = idx;
    while cleared < placed {
        let pos = strider.at(j);
        if overlay[pos] != 0 {
            overlay[pos] = 0;
            cleared += 1;
        }
        j += 1;
    }
    if legal { Some(total) } else { None }
}

struct WorkingBuffer {
    rack_tally: Box<[u8]>,   // 27 for ?A-Z
    overlay: Box<[u8]>,      // r*c, the candidate currently being tried
    sequences: Vec<Vec<u8>>, // distinct rack arrangements for this turn
}

impl WorkingBuffer {
    fn new(game_config: &game_config::GameConfig) -> Self {
        let dim = game_config.board_layout().dim();
        let rows_times_cols = ((dim.rows as isize) * (dim.cols as isize)) as usize;
        Self {
            rack_tally: vec![0u8; game_config.alphabet().len() as usize].into_boxed_slice(),
            overlay: vec![0u8; rows_times_cols].into_boxed_slice(),
            sequences: Vec::new(),
        }
    }
}

pub struct ExhaustiveMoveGenerator {
    working_buffer: WorkingBuffer,
}

impl ExhaustiveMoveGenerator {
    pub fn new(game_config: &game_config::GameConfig) -> Self {
        Self {
            working_buffer: WorkingBuffer::new(game_config),
        }
    }

    // Brute force: every empty square x both directions x every sequence
    // that fits the open squares of that lane. Keeps the first strictly
    // best play; enumeration order is fixed, so ties are deterministic.
    pub fn gen_best_play(&mut self, board_snapshot: &BoardSnapshot<'_>, rack: &[u8]) -> Play {
        let game_config = board_snapshot.game_config;
        let dim = game_config.board_layout().dim();
        let WorkingBuffer {
            rack_tally,
            overlay,
            sequences,
        } = &mut self.working_buffer;
        sequences.clear();
        enumerate_rack_sequences(game_config.alphabet().len(), rack, rack_tally, sequences);

        let mut best: Option<(bool, i8, i8, &Vec<u8>)> = None;
        let mut best_score = -1i16;
        for &down in &[false, true] {
            let num_lanes = if down { dim.cols } else { dim.rows };
            for lane in 0..num_lanes {
                let strider = dim.lane(down, lane);
                for idx in 0..strider.len() {
                    if board_snapshot.board_tiles[strider.at(idx)] != 0 {
                        continue;
                    }
                    let mut open = 0usize;
                    for j in idx..strider.len() {
                        if board_snapshot.board_tiles[strider.at(j)] == 0 {
                            open += 1;
                        }
                    }
                    for seq in sequences.iter() {
                        if seq.len() > open {
                            continue;
                        }
                        if let Some(score) =
                            evaluate_play(board_snapshot, overlay, down, lane, idx, seq)
                        {
                            if score > best_score {
                                best_score = score;
                                best = Some((down, lane, idx, seq));
                            }
                        }
                    }
                }
            }
        }

        match best {
            None => Play::Pass,
            Some((down, lane, idx, seq)) => {
                // record the full main word, 0 marking played-through tiles
                let strider = dim.lane(down, lane);
                let mut start = idx;
                while start > 0 && board_snapshot.board_tiles[strider.at(start - 1)] != 0 {
                    start -= 1;
                }
                let mut word = Vec::with_capacity(seq.len());
                let mut placed = 0;
                let mut i = start;
                while i < strider.len() {
                    if board_snapshot.board_tiles[strider.at(i)] != 0 {
                        word.push(0);
                    } else if placed < seq.len() {
                        word.push(seq[placed]);
                        placed += 1;
                    } else {
                        break;
                    }
                    i += 1;
                }
                Play::Place {
                    down,
                    lane,
                    idx: start,
                    word,
                    score: best_score,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles(s: &str) -> Vec<u8> {
        s.bytes()
            .map(|b| if b == b'?' { 0 } else { b & 0x1f })
            .collect()
    }

    fn make_lexicon(words: &[&str]) -> lexicon::Lexicon {
        let mut lexicon = lexicon::Lexicon::new();
        for word in words {
            lexicon.add_word(word.as_bytes());
        }
        lexicon
    }

    fn sequences_for(rack: &str) -> Vec<Vec<u8>> {
        let mut rack_tally = vec![0u8; 27];
        let mut out = Vec::new();
        enumerate_rack_sequences(27, &tiles(rack), &mut rack_tally, &mut out);
        out
    }

    #[test]
    fn three_distinct_tiles_give_fifteen_sequences() {
        // sum over k=1..3 of 3!/(3-k)! = 3 + 6 + 6
        let out = sequences_for("ABC");
        assert_eq!(out.len(), 15);
        let distinct: std::collections::HashSet<&Vec<u8>> = out.iter().collect();
        assert_eq!(distinct.len(), out.len());
    }

    #[test]
    fn repeated_tiles_collapse() {
        // A B AA AB BA AAB ABA BAA
        let out = sequences_for("AAB");
        assert_eq!(out.len(), 8);
        let distinct: std::collections::HashSet<&Vec<u8>> = out.iter().collect();
        assert_eq!(distinct.len(), out.len());
    }

    #[test]
    fn a_blank_becomes_every_letter() {
        let out = sequences_for("?");
        assert_eq!(out.len(), 26);
        assert!(out.iter().all(|seq| seq.len() == 1 && seq[0] & 0x80 != 0));
    }

    #[test]
    fn a_second_blank_is_dropped() {
        // same as a single blank: no two-blank sequence is materialized
        let out = sequences_for("??");
        assert_eq!(out.len(), 26);
        assert!(
            out.iter()
                .all(|seq| seq.iter().filter(|&&tile| tile & 0x80 != 0).count() <= 1)
        );
    }

    #[test]
    fn blank_sequences_carry_the_flag() {
        let out = sequences_for("?A");
        // 26 single blanks + 1 single A + 26 blank-then-A + 26 A-then-blank
        assert_eq!(out.len(), 79);
        assert!(out.contains(&vec![0x80 | 2, 1])); // blank-as-B then A
        assert!(!out.contains(&vec![2, 1])); // no unflagged B exists
    }

    #[test]
    fn opening_play_through_the_star_scores_doubled() {
        let game_config = game_config::make_common_english_game_config();
        let lexicon = make_lexicon(&["CAT"]);
        let board_tiles = vec![0u8; 225];
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            lexicon: &lexicon,
        };
        let mut overlay = vec![0u8; 225];
        // C A T on row 7, columns 5..=7, covers the star
        assert_eq!(
            evaluate_play(board_snapshot, &mut overlay, false, 7, 5, &tiles("CAT")),
            Some(10)
        );
        assert!(overlay.iter().all(|&tile| tile == 0));
    }

    #[test]
    fn opening_play_missing_the_star_is_illegal() {
        let game_config = game_config::make_common_english_game_config();
        let lexicon = make_lexicon(&["CAT"]);
        let board_tiles = vec![0u8; 225];
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            lexicon: &lexicon,
        };
        let mut overlay = vec![0u8; 225];
        assert_eq!(
            evaluate_play(board_snapshot, &mut overlay, false, 0, 0, &tiles("CAT")),
            None
        );
        assert_eq!(
            evaluate_play(board_snapshot, &mut overlay, true, 3, 4, &tiles("CAT")),
            None
        );
    }

    #[test]
    fn lone_tile_has_no_primary_word() {
        let game_config = game_config::make_common_english_game_config();
        let lexicon = make_lexicon(&["CAT"]);
        let board_tiles = vec![0u8; 225];
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            lexicon: &lexicon,
        };
        let mut overlay = vec![0u8; 225];
        assert_eq!(
            evaluate_play(board_snapshot, &mut overlay, false, 7, 7, &tiles("C")),
            None
        );
    }

    #[test]
    fn extending_an_existing_word_scores_new_premiums_only() {
        let game_config = game_config::make_common_english_game_config();
        let dim = game_config.board_layout().dim();
        let lexicon = make_lexicon(&["CAT", "COB"]);
        let mut board_tiles = vec![0u8; 225];
        for (col, &tile) in (5..).zip(tiles("CAT").iter()) {
            board_tiles[dim.at_row_col(7, col)] = tile;
        }
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            lexicon: &lexicon,
        };
        let mut overlay = vec![0u8; 225];
        // O B under the C of CAT: C(3) + O(1) + B(3) tripled at (9,5) = 13,
        // the C itself no longer earns its original square's premium
        assert_eq!(
            evaluate_play(board_snapshot, &mut overlay, true, 5, 8, &tiles("OB")),
            Some(13)
        );
        assert!(overlay.iter().all(|&tile| tile == 0));
    }

    #[test]
    fn disconnected_play_on_a_started_board_is_illegal() {
        let game_config = game_config::make_common_english_game_config();
        let dim = game_config.board_layout().dim();
        let lexicon = make_lexicon(&["CAT", "COB"]);
        let mut board_tiles = vec![0u8; 225];
        for (col, &tile) in (5..).zip(tiles("CAT").iter()) {
            board_tiles[dim.at_row_col(7, col)] = tile;
        }
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            lexicon: &lexicon,
        };
        let mut overlay = vec![0u8; 225];
        assert_eq!(
            evaluate_play(board_snapshot, &mut overlay, false, 0, 0, &tiles("COB")),
            None
        );
    }

    #[test]
    fn every_cross_word_must_be_valid() {
        let game_config = game_config::make_common_english_game_config();
        let dim = game_config.board_layout().dim();
        let mut board_tiles = vec![0u8; 225];
        for (col, &tile) in (5..).zip(tiles("CAT").iter()) {
            board_tiles[dim.at_row_col(7, col)] = tile;
        }
        for (row, &tile) in (8..).zip(tiles("OB").iter()) {
            board_tiles[dim.at_row_col(row, 5)] = tile;
        }
        let mut overlay = vec![0u8; 225];
        // X after the O of COB makes OX across and AX down through CAT's A
        let without_ax = make_lexicon(&["CAT", "COB", "OX"]);
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            lexicon: &without_ax,
        };
        assert_eq!(
            evaluate_play(board_snapshot, &mut overlay, false, 8, 6, &tiles("X")),
            None
        );
        // once AX is a word, X lands on a double letter and counts in both
        // runs: OX = 1 + 16, AX = 1 + 16
        let with_ax = make_lexicon(&["CAT", "COB", "OX", "AX"]);
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            lexicon: &with_ax,
        };
        assert_eq!(
            evaluate_play(board_snapshot, &mut overlay, false, 8, 6, &tiles("X")),
            Some(34)
        );
    }

    #[test]
    fn best_play_takes_the_highest_score() {
        let game_config = game_config::make_common_english_game_config();
        let lexicon = make_lexicon(&["AT", "TAS"]);
        let board_tiles = vec![0u8; 225];
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            lexicon: &lexicon,
        };
        let mut move_generator = ExhaustiveMoveGenerator::new(&game_config);
        match move_generator.gen_best_play(board_snapshot, &tiles("AST")) {
            Play::Place {
                down, word, score, ..
            } => {
                // TAS through the star doubles to 6, beating AT's 4
                assert!(!down);
                assert_eq!(word.len(), 3);
                assert_eq!(score, 6);
            }
            Play::Pass => panic!("expected a place play"),
        }
    }

    #[test]
    fn no_legal_play_passes() {
        let game_config = game_config::make_common_english_game_config();
        let lexicon = make_lexicon(&[]);
        let board_tiles = vec![0u8; 225];
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            lexicon: &lexicon,
        };
        let mut move_generator = ExhaustiveMoveGenerator::new(&game_config);
        assert!(matches!(
            move_generator.gen_best_play(board_snapshot, &tiles("CAT")),
            Play::Pass
        ));
    }

    #[test]
    fn a_played_blank_scores_nothing() {
        let game_config = game_config::make_common_english_game_config();
        let lexicon = make_lexicon(&["AB"]);
        let board_tiles = vec![0u8; 225];
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            lexicon: &lexicon,
        };
        let mut move_generator = ExhaustiveMoveGenerator::new(&game_config);
        // blank as B: (1 + 0) doubled at the star
        match move_generator.gen_best_play(board_snapshot, &tiles("A?")) {
            Play::Place { word, score, .. } => {
                assert_eq!(score, 2);
                assert!(word.contains(&(0x80 | 2)));
            }
            Play::Pass => panic!("expected a place play"),
        }
        // a real B is worth its three points
        match move_generator.gen_best_play(board_snapshot, &tiles("AB")) {
            Play::Place { score, .. } => assert_eq!(score, 8),
            Play::Pass => panic!("expected a place play"),
        }
    }

    #[test]
    fn play_formatting() {
        let game_config = game_config::make_common_english_game_config();
        let lexicon = make_lexicon(&["CAT"]);
        let board_tiles = vec![0u8; 225];
        let board_snapshot = &BoardSnapshot {
            board_tiles: &board_tiles,
            game_config: &game_config,
            lexicon: &lexicon,
        };
        assert_eq!(Play::Pass.fmt(board_snapshot), "(pass)");
        let play = Play::Place {
            down: false,
            lane: 7,
            idx: 5,
            word: tiles("CAT"),
            score: 10,
        };
        assert_eq!(play.fmt(board_snapshot), "8f CAT 10");
    }
}
