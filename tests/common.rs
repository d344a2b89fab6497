//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

use bemora::tictactoe::{BoardState, Player};

/// Every position reachable by legal play from an empty board opened by
/// `first`, terminal positions included.
pub fn reachable_positions(first: Player) -> Vec<BoardState> {
    let mut seen = HashSet::new();
    let mut positions = Vec::new();
    let mut stack = vec![BoardState::new_with_player(first)];

    while let Some(state) = stack.pop() {
        if !seen.insert(state) {
            continue;
        }
        positions.push(state);
        for pos in state.legal_moves() {
            if let Ok(next) = state.make_move(pos) {
                stack.push(next);
            }
        }
    }

    positions
}

pub fn board(s: &str) -> BoardState {
    BoardState::from_string(s).unwrap()
}
