use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use gtk4::gdk::Display;
use gtk4::prelude::*;
use gtk4::{
    Application, ApplicationWindow, Box as GtkBox, Button, CssProvider, HeaderBar, Label,
    Orientation, Separator, STYLE_PROVIDER_PRIORITY_APPLICATION,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use super::board::{self, BoardWidgets};
use crate::game::logic::GameSession;
use crate::i18n::I18n;
use crate::storage::{self, FileStore, Settings};

const DEFAULT_WIDTH: i32 = 360;
const DEFAULT_HEIGHT: i32 = 520;

fn open_store() -> FileStore {
    match FileStore::in_config_dir() {
        Ok(store) => store,
        Err(e) => {
            warn!(error = %e, "config directory unavailable, using working directory");
            FileStore::new(".")
        }
    }
}

fn save_window_geometry(win: &ApplicationWindow, store: &mut FileStore) {
    let mut settings = storage::load_settings(store);
    settings.window_width = Some(win.width());
    settings.window_height = Some(win.height());
    if let Err(e) = storage::save_settings(store, &settings) {
        warn!(error = %e, "could not save window geometry");
    }
}

fn stat_text(i18n: &I18n, id: &str, value: u64) -> String {
    format!("{}: {}", i18n.t(id), value)
}

/// Build and present the main application window.
pub fn build_ui(app: &Application, resources_dir: &str) {
    // ── Shared state ──
    let store = open_store();
    let settings: Settings = storage::load_settings(&store);
    info!(dir = %store.dir().display(), "using storage directory");
    let session = Rc::new(RefCell::new(GameSession::with_key(
        store.clone(),
        StdRng::from_entropy(),
        settings.statistics_key.clone(),
    )));
    let i18n = Rc::new(I18n::load_from_dir(resources_dir));

    // ── CSS ──
    let provider = CssProvider::new();
    let css = "
        .title-label   { font-weight: 700; font-size: 15px; }
        .cell-button   { font-size: 32px; font-weight: 700; }
        .winning-cell  { background: linear-gradient(to right, #22d3ee, #e879f9); color: white; }
        .status-label  { font-size: 16px; }
        .stat-label    { font-size: 12px; margin: 0 6px; }
    ";
    provider.load_from_data(css);
    if let Some(display) = Display::default() {
        gtk4::style_context_add_provider_for_display(
            &display,
            &provider,
            STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }

    // ── Window ──
    let window = ApplicationWindow::builder()
        .application(app)
        .title(&i18n.t("app-title"))
        .default_width(DEFAULT_WIDTH)
        .default_height(DEFAULT_HEIGHT)
        .resizable(true)
        .build();

    if let (Some(w), Some(h)) = (settings.window_width, settings.window_height) {
        window.set_default_size(w, h);
    }

    let header = HeaderBar::new();
    header.set_show_title_buttons(true);
    let header_title = Label::new(Some(&i18n.t("app-title")));
    header_title.add_css_class("title-label");
    header.set_title_widget(Some(&header_title));

    // ── Main layout ──
    let main_box = GtkBox::new(Orientation::Vertical, 12);
    main_box.set_margin_top(16);
    main_box.set_margin_bottom(16);
    main_box.set_margin_start(16);
    main_box.set_margin_end(16);

    let status = Label::new(None);
    status.add_css_class("status-label");
    let reset_button = Button::with_label(&i18n.t("button-reset"));
    reset_button.set_halign(gtk4::Align::Center);

    let history_title = Label::new(Some(&i18n.t("history-title")));
    let stats_bar = GtkBox::new(Orientation::Horizontal, 8);
    stats_bar.set_halign(gtk4::Align::Center);
    let stat_wins = Label::new(None);
    let stat_losses = Label::new(None);
    let stat_draws = Label::new(None);
    for (i, label) in [&stat_wins, &stat_losses, &stat_draws].into_iter().enumerate() {
        if i > 0 {
            stats_bar.append(&Separator::new(Orientation::Vertical));
        }
        label.add_css_class("stat-label");
        stats_bar.append(label);
    }

    // ── View updater ──
    let board_slot: Rc<OnceCell<BoardWidgets>> = Rc::new(OnceCell::new());
    let refresh: Rc<dyn Fn()> = {
        let session = session.clone();
        let i18n = i18n.clone();
        let board_slot = board_slot.clone();
        let status = status.clone();
        let stat_wins = stat_wins.clone();
        let stat_losses = stat_losses.clone();
        let stat_draws = stat_draws.clone();
        Rc::new(move || {
            let view = session.borrow().view(&i18n);
            if let Some(board) = board_slot.get() {
                board.refresh(&view);
            }
            status.set_text(&view.status);
            stat_wins.set_text(&stat_text(&i18n, "stat-wins", view.statistics.wins));
            stat_losses.set_text(&stat_text(&i18n, "stat-losses", view.statistics.losses));
            stat_draws.set_text(&stat_text(&i18n, "stat-draws", view.statistics.draws));
        })
    };

    let board = board::create_board(session.clone(), refresh.clone());
    main_box.append(&board.grid);
    main_box.append(&status);
    main_box.append(&reset_button);
    main_box.append(&history_title);
    main_box.append(&stats_bar);
    if board_slot.set(board).is_err() {
        warn!("board widgets initialised twice");
    }
    refresh();

    // ── Actions ──
    {
        let session = session.clone();
        let refresh = refresh.clone();
        reset_button.connect_clicked(move |_| {
            session.borrow_mut().reset();
            refresh();
        });
    }

    // Persist window size on close so it can be restored on next startup.
    {
        let store = RefCell::new(store);
        window.connect_close_request(move |win| {
            save_window_geometry(win, &mut store.borrow_mut());
            gtk4::Inhibit(false)
        });
    }

    window.set_titlebar(Some(&header));
    window.set_child(Some(&main_box));
    window.present();
}
