use fluent_bundle::FluentArgs;

use super::field::{Board, CELL_COUNT};
use super::types::{Mark, Outcome, Statistics};
use crate::i18n::I18n;

/// One board cell as the front end draws it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub glyph: &'static str,
    /// Part of the winning line.
    pub highlighted: bool,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub cells: [CellView; CELL_COUNT],
    pub status: String,
    pub statistics: Statistics,
    pub winning_line: Option<[usize; 3]>,
}

impl BoardView {
    /// `turn` is the mark to move next while the game is running.
    pub fn build(board: &Board, turn: Mark, statistics: Statistics, i18n: &I18n) -> Self {
        let outcome = board.outcome();
        let winning_line = match outcome {
            Outcome::Won(_) => board.winning_line(),
            _ => None,
        };
        let cells = std::array::from_fn(|i| CellView {
            glyph: board.cells()[i].glyph(),
            highlighted: winning_line.is_some_and(|line| line.contains(&i)),
        });
        Self {
            cells,
            status: status_text(outcome, turn, i18n),
            statistics,
            winning_line,
        }
    }
}

fn status_text(outcome: Outcome, turn: Mark, i18n: &I18n) -> String {
    let mut args = FluentArgs::new();
    match outcome {
        Outcome::InProgress => {
            args.set("mark", turn.glyph());
            i18n.t_args("status-turn", &args)
        }
        Outcome::Won(mark) => {
            args.set("mark", mark.glyph());
            i18n.t_args("status-won", &args)
        }
        Outcome::Draw => i18n.t("status-draw"),
    }
}
