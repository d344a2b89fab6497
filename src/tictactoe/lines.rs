//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, Player};

/// Winning line indices on the 3x3 board
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has won by having three in a row
    pub fn has_won(cells: &[Cell; 9], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// Owner of the first completed line, if any
    pub fn winner(cells: &[Cell; 9]) -> Option<Player> {
        WINNING_LINES.iter().find_map(|&[a, b, c]| {
            let owner = cells[a].owner()?;
            (cells[b] == cells[a] && cells[c] == cells[a]).then_some(owner)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(marks: &[(usize, Cell)]) -> [Cell; 9] {
        let mut cells = [Cell::Empty; 9];
        for &(idx, cell) in marks {
            cells[idx] = cell;
        }
        cells
    }

    #[test]
    fn test_has_won_each_orientation() {
        let row = cells(&[(3, Cell::X), (4, Cell::X), (5, Cell::X)]);
        assert!(LineAnalyzer::has_won(&row, Player::X));
        assert!(!LineAnalyzer::has_won(&row, Player::O));

        let column = cells(&[(2, Cell::O), (5, Cell::O), (8, Cell::O)]);
        assert_eq!(LineAnalyzer::winner(&column), Some(Player::O));

        let anti = cells(&[(2, Cell::X), (4, Cell::X), (6, Cell::X)]);
        assert_eq!(LineAnalyzer::winner(&anti), Some(Player::X));
    }

    #[test]
    fn test_no_winner_on_mixed_line() {
        let mixed = cells(&[(0, Cell::X), (1, Cell::O), (2, Cell::X)]);
        assert_eq!(LineAnalyzer::winner(&mixed), None);
        assert_eq!(LineAnalyzer::winner(&[Cell::Empty; 9]), None);
    }
}
