// Copyright (C) 2025-2026 Andy Kurnia.

#[macro_use]
pub mod error;

pub mod alphabet;
pub mod bag;
pub mod board_layout;
pub mod display;
pub mod game_config;
pub mod game_state;
pub mod lexicon;
pub mod matrix;
pub mod movegen;
