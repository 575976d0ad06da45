// Copyright (C) 2025-2026 Andy Kurnia.

use autoscrab::{display, error, game_config, game_state, lexicon, movegen, return_error};
use rand::prelude::*;
use std::io::BufRead;

fn main() -> error::Returns<()> {
    let dictionary_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "dictionary.txt".into());
    let mut lexicon = lexicon::Lexicon::new();
    {
        let file = match std::fs::File::open(&dictionary_path) {
            Ok(file) => file,
            Err(e) => {
                return_error!(format!("unable to open dictionary {dictionary_path}: {e}"));
            }
        };
        for line in std::io::BufReader::new(file).lines() {
            lexicon.add_word(line?.trim_end().as_bytes());
        }
    }
    println!("{} words from {}", lexicon.len(), dictionary_path);

    let game_config = &game_config::make_common_english_game_config();
    let mut move_generator = movegen::ExhaustiveMoveGenerator::new(game_config);
    let mut game_state = game_state::GameState::new(game_config);
    let mut rng = rand_chacha::ChaCha20Rng::from_os_rng();

    game_state.bag.shuffle(&mut rng);
    for player in game_state.players.iter_mut() {
        game_state
            .bag
            .replenish(&mut player.rack, game_config.rack_size() as usize);
    }

    // a full lap of scoreless turns, thrice, means nobody can move again
    let max_zero_turns = 3 * game_state.players.len();
    let mut zero_turns = 0;
    while game_state.players_have_tiles() && zero_turns < max_zero_turns {
        for _ in 0..game_state.players.len() {
            let board_snapshot = &movegen::BoardSnapshot {
                board_tiles: &game_state.board_tiles,
                game_config,
                lexicon: &lexicon,
            };
            let play =
                move_generator.gen_best_play(board_snapshot, &game_state.current_player().rack);
            match &play {
                movegen::Play::Pass => {
                    println!("player {}: no word found - passing", game_state.turn + 1);
                    zero_turns += 1;
                }
                movegen::Play::Place { .. } => {
                    println!("player {}: {}", game_state.turn + 1, play.fmt(board_snapshot));
                    zero_turns = 0;
                }
            }
            game_state.play(&play)?;
            game_state.next_turn();
        }
        display::print_board(
            game_config.alphabet(),
            game_config.board_layout(),
            &game_state.board_tiles,
        );
        for (i, player) in (1..).zip(game_state.players.iter()) {
            println!(
                "player {}: {} - {}",
                i,
                player.score,
                game_config.alphabet().fmt_rack(&player.rack)
            );
        }
        println!("pool: {} tiles", game_state.bag.0.len());
    }

    for (i, player) in (1..).zip(game_state.players.iter()) {
        print!("player {}: {}, ", i, player.score);
    }
    println!("final scores");
    Ok(())
}
