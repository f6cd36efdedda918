use std::rc::Rc;

use gtk4::prelude::*;
use gtk4::{Button, Grid};
use tracing::debug;

use super::SharedSession;
use crate::game::field::{BOARD_SIZE, CELL_COUNT};
use crate::game::logic::MoveResult;
use crate::game::view::BoardView;

const CELL_PIXELS: i32 = 80;

/// The 3×3 grid of cell buttons.
pub struct BoardWidgets {
    pub grid: Grid,
    buttons: Vec<Button>,
}

impl BoardWidgets {
    /// Sync glyphs and win highlighting with `view`.
    pub fn refresh(&self, view: &BoardView) {
        for (button, cell) in self.buttons.iter().zip(view.cells.iter()) {
            button.set_label(cell.glyph);
            if cell.highlighted {
                button.add_css_class("winning-cell");
            } else {
                button.remove_css_class("winning-cell");
            }
        }
    }
}

/// Create the board grid. Each click goes to the session; `on_change`
/// runs after every accepted move.
pub fn create_board(session: SharedSession, on_change: Rc<dyn Fn()>) -> BoardWidgets {
    let grid = Grid::new();
    grid.set_row_spacing(8);
    grid.set_column_spacing(8);
    grid.set_halign(gtk4::Align::Center);

    let mut buttons = Vec::with_capacity(CELL_COUNT);
    for index in 0..CELL_COUNT {
        let button = Button::with_label("");
        button.set_size_request(CELL_PIXELS, CELL_PIXELS);
        button.add_css_class("cell-button");

        {
            let session = session.clone();
            let on_change = on_change.clone();
            button.connect_clicked(move |_| {
                let result = session.borrow_mut().place_mark(index);
                debug!(index, ?result, "cell clicked");
                if result != MoveResult::Invalid {
                    on_change();
                }
            });
        }

        let (row, col) = (index / BOARD_SIZE, index % BOARD_SIZE);
        grid.attach(&button, col as i32, row as i32, 1, 1);
        buttons.push(button);
    }

    BoardWidgets { grid, buttons }
}
