//! Depth-aware minimax with optional alpha-beta pruning
//!
//! Scores are from the maximizer's point of view: `WIN_SCORE - depth` for a
//! maximizer win, `depth - WIN_SCORE` for a loss and `0` for a full board.
//! Branches are explored on a private cell array with place/undo
//! backtracking, so the caller's board is never touched.

use crate::tictactoe::{BOARD_CELLS, BoardState, Cell, LineAnalyzer, Player};

/// Base score of a win before the depth penalty
pub const WIN_SCORE: i32 = 10;

/// Whether the search prunes with alpha-beta or visits every node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pruning {
    #[default]
    AlphaBeta,
    Exhaustive,
}

/// Counters collected during a search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited, terminal ones included
    pub nodes: u64,
}

/// Score a terminal position, or `None` if play continues
pub fn terminal_score(cells: &[Cell; BOARD_CELLS], maximizer: Player, depth: i32) -> Option<i32> {
    match LineAnalyzer::winner(cells) {
        Some(winner) if winner == maximizer => Some(WIN_SCORE - depth),
        Some(_) => Some(depth - WIN_SCORE),
        None if !cells.contains(&Cell::Empty) => Some(0),
        None => None,
    }
}

/// Score every legal move for `maximizer` on `board`.
///
/// Each candidate is placed on a copy and the remainder searched with a full
/// window at depth 1, so the returned scores are exact under either pruning
/// mode. Moves come back in ascending cell order.
pub fn score_moves(
    board: &BoardState,
    maximizer: Player,
    pruning: Pruning,
    stats: &mut SearchStats,
) -> Vec<(usize, i32)> {
    let mut cells = board.cells;
    let mut scored = Vec::new();

    for pos in board.legal_moves() {
        cells[pos] = maximizer.to_cell();
        let score = match pruning {
            Pruning::AlphaBeta => {
                alpha_beta(&mut cells, maximizer, false, 1, i32::MIN, i32::MAX, stats)
            }
            Pruning::Exhaustive => minimax(&mut cells, maximizer, false, 1, stats),
        };
        cells[pos] = Cell::Empty;
        scored.push((pos, score));
    }

    scored
}

fn mover(maximizer: Player, maximizing: bool) -> Cell {
    if maximizing {
        maximizer.to_cell()
    } else {
        maximizer.opponent().to_cell()
    }
}

/// Alpha-beta search; siblings are skipped once `beta <= alpha`
pub(crate) fn alpha_beta(
    cells: &mut [Cell; BOARD_CELLS],
    maximizer: Player,
    maximizing: bool,
    depth: i32,
    mut alpha: i32,
    mut beta: i32,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;
    if let Some(score) = terminal_score(cells, maximizer, depth) {
        return score;
    }

    let mark = mover(maximizer, maximizing);
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for pos in 0..BOARD_CELLS {
        if cells[pos] != Cell::Empty {
            continue;
        }

        cells[pos] = mark;
        let score = alpha_beta(cells, maximizer, !maximizing, depth + 1, alpha, beta, stats);
        cells[pos] = Cell::Empty;

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }

        if beta <= alpha {
            break;
        }
    }

    best
}

/// Plain minimax over the full tree
pub(crate) fn minimax(
    cells: &mut [Cell; BOARD_CELLS],
    maximizer: Player,
    maximizing: bool,
    depth: i32,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;
    if let Some(score) = terminal_score(cells, maximizer, depth) {
        return score;
    }

    let mark = mover(maximizer, maximizing);
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for pos in 0..BOARD_CELLS {
        if cells[pos] != Cell::Empty {
            continue;
        }

        cells[pos] = mark;
        let score = minimax(cells, maximizer, !maximizing, depth + 1, stats);
        cells[pos] = Cell::Empty;

        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> BoardState {
        BoardState::from_string(s).unwrap()
    }

    #[test]
    fn terminal_scores_prefer_fast_wins() {
        let won = board("OOO|XX.|X..").cells;
        assert_eq!(terminal_score(&won, Player::O, 1), Some(9));
        assert_eq!(terminal_score(&won, Player::O, 5), Some(5));
        assert_eq!(terminal_score(&won, Player::X, 3), Some(-7));

        let tie = board("XOX|XOO|OXX").cells;
        assert_eq!(terminal_score(&tie, Player::O, 9), Some(0));

        let open = board("X........").cells;
        assert_eq!(terminal_score(&open, Player::O, 1), None);
    }

    #[test]
    fn immediate_win_scores_nine() {
        // XX.
        // OO.
        // X..   O to move: 5 wins at once
        let state = board("XX.|OO.|X..:O");
        let mut stats = SearchStats::default();
        let scored = score_moves(&state, Player::O, Pruning::AlphaBeta, &mut stats);
        let win = scored.iter().find(|(pos, _)| *pos == 5).unwrap();
        assert_eq!(win.1, WIN_SCORE - 1);
        assert!(scored.iter().all(|&(pos, score)| pos == 5 || score < win.1));
    }

    #[test]
    fn pruning_preserves_root_scores_and_saves_nodes() {
        let state = board("X........");
        let mut pruned = SearchStats::default();
        let mut full = SearchStats::default();

        let a = score_moves(&state, Player::O, Pruning::AlphaBeta, &mut pruned);
        let b = score_moves(&state, Player::O, Pruning::Exhaustive, &mut full);

        assert_eq!(a, b);
        assert!(pruned.nodes < full.nodes, "{} vs {}", pruned.nodes, full.nodes);
    }

    #[test]
    fn empty_board_is_a_draw_for_either_side() {
        let mut stats = SearchStats::default();
        let scored = score_moves(&BoardState::new(), Player::X, Pruning::AlphaBeta, &mut stats);
        assert_eq!(scored.len(), 9);
        assert_eq!(scored.iter().map(|&(_, s)| s).max(), Some(0));
    }

    #[test]
    fn search_leaves_cells_untouched() {
        let state = board("X...O...X");
        let before = state;
        let mut stats = SearchStats::default();
        let _ = score_moves(&state, Player::O, Pruning::Exhaustive, &mut stats);
        assert_eq!(state, before);
    }
}
