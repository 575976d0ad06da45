// Copyright (C) 2025-2026 Andy Kurnia.

use super::{alphabet, board_layout};

#[inline(always)]
pub fn empty_label(board_layout: &board_layout::BoardLayout, row: i8, col: i8) -> &'static str {
    if row == board_layout.star_row() && col == board_layout.star_col() {
        return "*";
    }
    let premium = board_layout.premiums()[board_layout.dim().at_row_col(row, col)];
    match (premium.word_multiplier, premium.tile_multiplier) {
        (3, _) => "=",
        (2, _) => "-",
        (_, 3) => "\"",
        (_, 2) => "\'",
        _ => " ",
    }
}

#[inline(always)]
pub fn board_label<'a>(
    alphabet: &'a alphabet::Alphabet<'a>,
    board_layout: &board_layout::BoardLayout,
    board_tiles: &'a [u8],
    row: i8,
    col: i8,
) -> &'a str {
    alphabet
        .from_board(board_tiles[board_layout.dim().at_row_col(row, col)])
        .unwrap_or_else(|| empty_label(board_layout, row, col))
}

pub fn print_board<'a>(
    alphabet: &'a alphabet::Alphabet<'a>,
    board_layout: &board_layout::BoardLayout,
    board_tiles: &[u8],
) {
    let dim = board_layout.dim();
    let mut column_legend = String::from("  ");
    for c in 0..dim.cols {
        column_legend.push(' ');
        column_legend.push(((c as u8) + 0x61) as char);
    }
    let mut border = String::from("  +");
    for _ in 1..dim.cols {
        border.push_str("--");
    }
    border.push_str("-+");
    println!("{column_legend}");
    println!("{border}");
    for r in 0..dim.rows {
        let mut line = format!("{:2}|", r + 1);
        for c in 0..dim.cols {
            if c > 0 {
                line.push(' ');
            }
            line.push_str(board_label(alphabet, board_layout, board_tiles, r, c));
        }
        println!("{}|{}", line, r + 1);
    }
    println!("{border}");
    println!("{column_legend}");
}
