//! Board snapshot for the BMO tic-tac-toe game

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;

/// Number of cells on the 3x3 board
pub const BOARD_CELLS: usize = 9;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// The player owning this mark, if any
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A side in the match.
///
/// X is the human player and moves first in the site's game; O is the
/// automated "BMO AI" opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Player::X => "X",
            Player::O => "O",
        })
    }
}

impl FromStr for Player {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            other => Err(crate::Error::InvalidPlayerString {
                player: other.to_string(),
                context: s.to_string(),
            }),
        }
    }
}

/// Board cells plus the side to move.
///
/// `Copy` so callers hand the engine a snapshot; the engine only ever
/// explores private copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: [Cell; BOARD_CELLS],
    pub to_move: Player,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    x: usize,
    o: usize,
}

impl BoardState {
    /// Create a new empty board with X to move
    pub fn new() -> Self {
        Self::new_with_player(Player::X)
    }

    /// Create a new empty board with the given player to move first.
    ///
    /// The site lets the player hand the opening move to BMO, so O-first
    /// matches are first class.
    ///
    /// ```
    /// use bemora::tictactoe::{BoardState, Player};
    ///
    /// let board = BoardState::new_with_player(Player::O);
    /// assert_eq!(board.to_move, Player::O);
    /// let after = board.make_move(4).unwrap();
    /// assert_eq!(after.to_move, Player::X);
    /// ```
    pub fn new_with_player(first_player: Player) -> Self {
        BoardState {
            cells: [Cell::Empty; BOARD_CELLS],
            to_move: first_player,
        }
    }

    fn count_pieces(cells: &[Cell; BOARD_CELLS]) -> PieceCount {
        cells.iter().fold(PieceCount { x: 0, o: 0 }, |mut acc, cell| {
            match cell {
                Cell::X => acc.x += 1,
                Cell::O => acc.o += 1,
                Cell::Empty => {}
            }
            acc
        })
    }

    fn turn_from_counts(count: PieceCount) -> Result<Player, crate::Error> {
        if count.x == count.o {
            Ok(Player::X)
        } else if count.x == count.o + 1 {
            Ok(Player::O)
        } else if count.o == count.x + 1 {
            Ok(Player::X)
        } else {
            Err(crate::Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            })
        }
    }

    fn parse_cells(chars: &[char], context: &str) -> Result<[Cell; BOARD_CELLS], crate::Error> {
        if chars.len() != BOARD_CELLS {
            return Err(crate::Error::InvalidBoardLength {
                expected: BOARD_CELLS,
                got: chars.len(),
                context: context.to_string(),
            });
        }

        let mut cells = [Cell::Empty; BOARD_CELLS];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: context.to_string(),
            })?;
        }
        Ok(cells)
    }

    /// Parse a board from text.
    ///
    /// Nine cell characters (`.`/`_`/`-` empty, `X`, `O`), whitespace and `|`
    /// ignored, optionally followed by `:X` or `:O` to force the side to move.
    /// Without the suffix the side to move is inferred from the counts.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - the board part does not hold exactly 9 cells
    /// - a character is not a valid cell
    /// - the piece counts differ by more than one
    /// - the suffix names a side inconsistent with the counts
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let (board_part, suffix) = match s.split_once(':') {
            Some((board, turn)) => (board, Some(turn)),
            None => (s, None),
        };

        let chars: Vec<char> = board_part
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();
        let cells = Self::parse_cells(&chars, s)?;
        let count = Self::count_pieces(&cells);
        let inferred = Self::turn_from_counts(count)?;

        let to_move = match suffix {
            None => inferred,
            Some(turn) => {
                let player: Player = turn.parse()?;
                let consistent = match player {
                    Player::X => count.x == count.o || count.o == count.x + 1,
                    Player::O => count.x == count.o || count.x == count.o + 1,
                };
                if !consistent {
                    return Err(crate::Error::InvalidConfiguration {
                        message: format!(
                            "piece counts (X={}, O={}) are inconsistent with {player} to move in '{s}'",
                            count.x, count.o
                        ),
                    });
                }
                player
            }
        };

        Ok(BoardState { cells, to_move })
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        let count = Self::count_pieces(&self.cells);
        count.x + count.o
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    /// Check if a position is on the board and empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.get(pos) == Some(Cell::Empty)
    }

    /// Get all empty positions in ascending index order
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Place the side-to-move's mark and return the new board state
    #[must_use = "make_move returns a new board state; the original is unchanged"]
    pub fn make_move(&self, pos: usize) -> Result<BoardState, crate::Error> {
        if !self.is_empty(pos) {
            return Err(crate::Error::InvalidMove { position: pos });
        }

        let mut next = *self;
        next.cells[pos] = self.to_move.to_cell();
        next.to_move = self.to_move.opponent();
        Ok(next)
    }

    /// Legal moves: empty cells while the match is still open
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.empty_positions()
    }

    /// Check if a player has three in a row
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// Check if the board is full
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Check if the position is a draw (all cells filled, no winner)
    pub fn is_draw(&self) -> bool {
        self.is_full() && self.winner().is_none()
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::winner(&self.cells)
    }

    /// Compact key such as `XO.......:X`
    pub fn encode(&self) -> String {
        format!(
            "{}:{}",
            self.cells.iter().map(|&c| c.to_char()).collect::<String>(),
            self.to_move
        )
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for BoardState {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for &cell in chunk {
                write!(f, "{}", cell.to_char())?;
            }
        }
        Ok(())
    }
}
