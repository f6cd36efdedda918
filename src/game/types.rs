use serde::{Deserialize, Serialize};

/// The symbol a player places on the board. The human always plays X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn other(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

/// A single cell on the 3×3 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Marked(Mark),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Marked(m) => Some(m),
        }
    }

    /// Display glyph: "X", "O" or an empty string.
    pub fn glyph(self) -> &'static str {
        self.mark().map_or("", Mark::glyph)
    }
}

/// Classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Won(Mark),
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

/// State of the turn controller. Always derived from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingHumanMove,
    AwaitingOpponentMove,
    GameOver(Outcome),
}

/// Cumulative win/loss/draw statistics from the human player's perspective.
///
/// Serialized as the flat record `{ "wins": n, "losses": n, "draws": n }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
}

impl Statistics {
    /// Count one finished game. `InProgress` is ignored.
    ///
    /// Counters saturate at `u64::MAX` and never decrease.
    pub fn record(&mut self, outcome: Outcome) {
        let counter = match outcome {
            Outcome::Won(Mark::X) => &mut self.wins,
            Outcome::Won(Mark::O) => &mut self.losses,
            Outcome::Draw => &mut self.draws,
            Outcome::InProgress => return,
        };
        *counter = counter.saturating_add(1);
    }

    pub fn games_played(&self) -> u64 {
        self.wins
            .saturating_add(self.losses)
            .saturating_add(self.draws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_from_human_perspective() {
        let mut stats = Statistics::default();
        stats.record(Outcome::Won(Mark::X));
        stats.record(Outcome::Won(Mark::O));
        stats.record(Outcome::Won(Mark::O));
        stats.record(Outcome::Draw);
        assert_eq!(
            stats,
            Statistics {
                wins: 1,
                losses: 2,
                draws: 1
            }
        );
        assert_eq!(stats.games_played(), 4);
    }

    #[test]
    fn record_ignores_in_progress() {
        let mut stats = Statistics::default();
        stats.record(Outcome::InProgress);
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn record_saturates_at_max() {
        let mut stats = Statistics {
            wins: u64::MAX,
            losses: u64::MAX,
            draws: u64::MAX,
        };
        stats.record(Outcome::Won(Mark::X));
        stats.record(Outcome::Won(Mark::O));
        stats.record(Outcome::Draw);
        assert_eq!(stats.wins, u64::MAX);
        assert_eq!(stats.losses, u64::MAX);
        assert_eq!(stats.draws, u64::MAX);
        assert_eq!(stats.games_played(), u64::MAX);
    }

    #[test]
    fn counts_beyond_u32_still_load() {
        let stats: Statistics =
            serde_json::from_str("{\"wins\": 4294967296, \"losses\": 1, \"draws\": 0}").unwrap();
        assert_eq!(stats.wins, 4_294_967_296);
    }

    #[test]
    fn statistics_json_shape() {
        let stats = Statistics {
            wins: 3,
            losses: 1,
            draws: 2,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json, serde_json::json!({ "wins": 3, "losses": 1, "draws": 2 }));
    }

    #[test]
    fn cell_glyphs() {
        assert_eq!(Cell::Empty.glyph(), "");
        assert_eq!(Cell::Marked(Mark::X).glyph(), "X");
        assert_eq!(Cell::Marked(Mark::O).glyph(), "O");
    }
}
