use crate::app::{App, MenuItem};
use crate::state::app_state::Modal;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dashcricket_engine::Delivery;
use std::sync::Arc;
use tokio::sync::Mutex;

pub async fn handle_key_bindings(key_event: KeyEvent, app: &Arc<Mutex<App>>) {
    let mut guard = app.lock().await;

    if let (Char('c'), KeyModifiers::CONTROL) = (key_event.code, key_event.modifiers) {
        quit();
    }

    // Function keys work even while typing.
    match key_event.code {
        KeyCode::F(1) => return guard.update_tab(MenuItem::Help),
        KeyCode::F(2) => return guard.toggle_show_logs(),
        _ => {}
    }

    if let Some(modal) = guard.state.modal.clone() {
        handle_modal_keys(&mut guard, &modal, key_event);
        return;
    }

    if guard.state.is_text_entry() {
        handle_text_entry(&mut guard, key_event);
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        (_, Char('q'), _) => quit(),

        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Toss
        (MenuItem::Toss, KeyCode::Left | KeyCode::Right | KeyCode::Tab, _) => {
            guard.toss_switch_winner()
        }
        (MenuItem::Toss, KeyCode::Up | KeyCode::Down | Char(' '), _) => guard.toss_switch_decision(),
        (MenuItem::Toss, KeyCode::Enter, _) => guard.toss_confirm(),

        // Innings setup
        (MenuItem::InningsSetup, Char('k') | KeyCode::Up, _) => guard.setup_move_field(-1),
        (MenuItem::InningsSetup, Char('j') | KeyCode::Down | KeyCode::Tab, _) => {
            guard.setup_move_field(1)
        }
        (MenuItem::InningsSetup, Char('h') | KeyCode::Left, _) => guard.setup_cycle(-1),
        (MenuItem::InningsSetup, Char('l') | KeyCode::Right, _) => guard.setup_cycle(1),
        (MenuItem::InningsSetup, KeyCode::Enter, _) => guard.setup_confirm(),

        // Scoring
        (MenuItem::Scoring, Char(c @ '0'..='5'), _) => guard.score_runs(digit(c)),
        (MenuItem::Scoring, Char(c @ '6'..='9'), _) => guard.score_boundary(digit(c) as usize - 6),
        (MenuItem::Scoring, Char('w'), _) => guard.score(Delivery::wicket()),
        (MenuItem::Scoring, Char('n'), _) => guard.score(Delivery::no_ball()),
        (MenuItem::Scoring, Char('d'), _) => guard.score(Delivery::wide()),
        (MenuItem::Scoring, Char('b'), _) => guard.open_byes(),
        (MenuItem::Scoring, Char('c'), _) => guard.open_custom(),

        // Scorecard
        (MenuItem::Scorecard, Char('r'), _) => guard.rematch(),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}

fn handle_text_entry(app: &mut App, key_event: KeyEvent) {
    match (app.state.active_tab, key_event.code) {
        (MenuItem::TeamNames, KeyCode::Tab | KeyCode::Up | KeyCode::Down) => app.names_switch_field(),
        (MenuItem::TeamNames, KeyCode::Backspace) => app.names_backspace(),
        (MenuItem::TeamNames, KeyCode::Enter) => app.names_confirm(),
        (MenuItem::TeamNames, Char(c)) => app.names_input(c),

        (MenuItem::Players, KeyCode::Tab) => app.players_cycle_role(),
        (MenuItem::Players, KeyCode::Up) => app.players_move(-1),
        (MenuItem::Players, KeyCode::Down) => app.players_move(1),
        (MenuItem::Players, KeyCode::Backspace) => app.players_backspace(),
        (MenuItem::Players, KeyCode::Enter) => app.players_confirm(),
        (MenuItem::Players, KeyCode::Esc) => app.players_back(),
        (MenuItem::Players, Char(c)) => app.players_input(c),

        _ => {}
    }
}

fn handle_modal_keys(app: &mut App, modal: &Modal, key_event: KeyEvent) {
    match (modal, key_event.code) {
        (_, KeyCode::Enter) => app.modal_confirm(),
        (_, KeyCode::Esc) => app.modal_cancel(),

        (Modal::Custom { .. }, KeyCode::Backspace) => app.modal_backspace(),
        (Modal::Custom { .. }, Char(c)) => app.modal_input(c),

        (Modal::Byes { .. }, KeyCode::Left | KeyCode::Right | Char(' ')) => app.modal_toggle(),
        (Modal::Byes { .. }, Char('k') | KeyCode::Up) => app.modal_adjust(1),
        (Modal::Byes { .. }, Char('j') | KeyCode::Down) => app.modal_adjust(-1),
        (_, Char('k') | KeyCode::Up) => app.modal_adjust(-1),
        (_, Char('j') | KeyCode::Down) => app.modal_adjust(1),

        _ => {}
    }
}

fn digit(c: char) -> i32 {
    c.to_digit(10).map(|d| d as i32).unwrap_or(0)
}

fn quit() -> ! {
    crate::cleanup_terminal();
    std::process::exit(0);
}
