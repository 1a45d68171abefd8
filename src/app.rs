use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, BallLogEntry, InningsSetupForm, Modal, wrap};
use crate::state::roster::Roster;
use chrono::Local;
use dashcricket_engine::{BOUNDARY_RUNS, Delivery, DeliveryOutcome, Match, PlayerId, Toss, TossDecision};
use log::{error, info};

/// The screens of a match, in the order they are normally visited.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    TeamNames,
    Players,
    Toss,
    InningsSetup,
    Scoring,
    Scorecard,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    pub fn on_started(&mut self) {
        let Some(path) = self.settings.roster_path.clone() else {
            return;
        };
        match Roster::load(&path) {
            Ok(roster) => {
                info!("loaded roster from {}", path.display());
                self.state.sheets = roster.teams;
                self.state.last_error = None;
                self.update_tab(MenuItem::Toss);
            }
            Err(e) => {
                error!("roster load failed: {e:#}");
                self.on_error(format!("{e:#}"));
            }
        }
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    pub fn game(&self) -> Option<&Match> {
        self.state.game.as_ref()
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Team names and player entry
    // -----------------------------------------------------------------------

    pub fn names_input(&mut self, c: char) {
        let field = self.state.names.field;
        self.state.sheets[field].name.push(c);
    }

    pub fn names_backspace(&mut self) {
        let field = self.state.names.field;
        self.state.sheets[field].name.pop();
    }

    pub fn names_switch_field(&mut self) {
        self.state.names.field = 1 - self.state.names.field;
    }

    pub fn names_confirm(&mut self) {
        let [a, b] = &self.state.sheets;
        let problem = if a.name.trim().is_empty() || b.name.trim().is_empty() {
            Some("Both teams need a name".to_string())
        } else {
            a.ensure_distinct_from(b).err().map(|e| e.to_string())
        };
        if let Some(problem) = problem {
            self.on_error(problem);
            return;
        }
        self.state.last_error = None;
        self.state.players = Default::default();
        self.update_tab(MenuItem::Players);
    }

    pub fn players_input(&mut self, c: char) {
        let (team, row) = (self.state.players.team, self.state.players.row);
        self.state.sheets[team].players[row].name.push(c);
    }

    pub fn players_backspace(&mut self) {
        let (team, row) = (self.state.players.team, self.state.players.row);
        self.state.sheets[team].players[row].name.pop();
    }

    pub fn players_cycle_role(&mut self) {
        let (team, row) = (self.state.players.team, self.state.players.row);
        let entry = &mut self.state.sheets[team].players[row];
        entry.role = entry.role.cycle();
    }

    pub fn players_move(&mut self, delta: isize) {
        self.state.players.move_row(delta);
    }

    /// Validates the sheet being edited, then moves to the other team or on
    /// to the toss.
    pub fn players_confirm(&mut self) {
        let team = self.state.players.team;
        if let Err(e) = self.state.sheets[team].validate() {
            self.on_error(e.to_string());
            return;
        }
        self.state.last_error = None;
        if team == 0 {
            self.state.players.team = 1;
            self.state.players.row = 0;
        } else {
            self.update_tab(MenuItem::Toss);
        }
    }

    pub fn players_back(&mut self) {
        if self.state.players.team == 1 {
            self.state.players.team = 0;
            self.state.players.row = 0;
        } else {
            self.update_tab(MenuItem::TeamNames);
        }
    }

    // -----------------------------------------------------------------------
    // Toss and innings setup
    // -----------------------------------------------------------------------

    pub fn toss_switch_winner(&mut self) {
        self.state.toss.winner = 1 - self.state.toss.winner;
    }

    pub fn toss_switch_decision(&mut self) {
        self.state.toss.decision = match self.state.toss.decision {
            TossDecision::Bat => TossDecision::Bowl,
            TossDecision::Bowl => TossDecision::Bat,
        };
    }

    pub fn toss_confirm(&mut self) {
        let toss = Toss {
            winner: self.state.toss.winner,
            decision: self.state.toss.decision,
        };
        let [a, b] = self.state.sheets.clone();
        match Match::from_sheets(a, b, toss) {
            Ok(game) => {
                self.state.game = Some(game);
                self.state.ball_log.clear();
                self.state.modal = None;
                self.state.last_error = None;
                self.state.setup = InningsSetupForm::reset();
                self.update_tab(MenuItem::InningsSetup);
            }
            Err(e) => self.on_error(e.to_string()),
        }
    }

    pub fn setup_move_field(&mut self, delta: isize) {
        self.state.setup.move_field(delta);
    }

    pub fn setup_cycle(&mut self, delta: isize) {
        let Some(game) = self.state.game.as_ref() else {
            return;
        };
        let batters = game.opening_batter_candidates().len();
        let bowlers = game.opening_bowler_candidates().len();
        self.state.setup.cycle(delta, batters, bowlers);
    }

    pub fn setup_confirm(&mut self) {
        let Some(game) = self.state.game.as_mut() else {
            return;
        };
        let form = &self.state.setup;
        let batters: Vec<_> = game.opening_batter_candidates().iter().map(|p| p.id).collect();
        let bowlers: Vec<_> = game.opening_bowler_candidates().iter().map(|p| p.id).collect();
        let (Some(b1), Some(b2), Some(bowler)) = (
            batters.get(form.batter1),
            batters.get(form.batter2),
            bowlers.get(form.bowler),
        ) else {
            self.state.last_error = Some("Nobody left to pick".to_string());
            return;
        };

        match game.start_innings(*b1, *b2, form.on_strike, *bowler) {
            Ok(()) => {
                self.state.last_error = None;
                self.update_tab(MenuItem::Scoring);
            }
            Err(e) => self.on_error(e.to_string()),
        }
    }

    // -----------------------------------------------------------------------
    // Scoring
    // -----------------------------------------------------------------------

    pub fn score_runs(&mut self, runs: i32) {
        self.score(Delivery::runs(runs));
    }

    /// `step` indexes the boundary ladder.
    pub fn score_boundary(&mut self, step: usize) {
        if let Some(runs) = BOUNDARY_RUNS.get(step) {
            self.score(Delivery::runs(*runs));
        }
    }

    pub fn score(&mut self, delivery: Delivery) {
        let Some(game) = self.state.game.as_mut() else {
            return;
        };
        let innings = game.innings();
        match game.apply_delivery(delivery) {
            Ok(outcome) => {
                let ball = if outcome.innings_closed {
                    innings.ball_cap()
                } else {
                    game.balls_completed()
                };
                let text = describe_ball(game, &delivery, &outcome);
                self.state.ball_log.push(BallLogEntry {
                    at: Local::now().format("%H:%M:%S").to_string(),
                    innings,
                    ball,
                    text,
                });
                self.state.last_error = None;
                self.after_delivery();
            }
            Err(e) => self.on_error(e.to_string()),
        }
    }

    /// Moves the UI to whatever the match needs next: a replacement picker,
    /// the next innings' setup, or the final scorecard.
    fn after_delivery(&mut self) {
        let Some(game) = self.state.game.as_ref() else {
            return;
        };
        if game.is_completed() {
            self.state.modal = None;
            self.update_tab(MenuItem::Scorecard);
        } else if game.is_innings_just_started() {
            self.state.modal = None;
            self.state.setup = InningsSetupForm::reset();
            self.update_tab(MenuItem::InningsSetup);
        } else if game.batter_to_replace().is_some() && !game.available_batters().is_empty() {
            self.state.modal = Some(Modal::ReplaceBatter { cursor: 0 });
        } else if game.needs_bowler_change() {
            self.state.modal = Some(Modal::SelectBowler { cursor: 0 });
        } else {
            self.state.modal = None;
        }
    }

    pub fn open_byes(&mut self) {
        self.state.modal = Some(Modal::Byes {
            running: 0,
            boundary: false,
        });
    }

    pub fn open_custom(&mut self) {
        self.state.modal = Some(Modal::Custom {
            input: String::new(),
        });
    }

    pub fn modal_cancel(&mut self) {
        if self.state.modal.as_ref().is_some_and(|m| !m.is_mandatory()) {
            self.state.modal = None;
        }
    }

    /// Up/down inside a dialog: running byes or a picker cursor.
    pub fn modal_adjust(&mut self, delta: isize) {
        let (batters, bowlers) = match self.game() {
            Some(game) => (game.available_batters().len(), game.available_bowlers().len()),
            None => (0, 0),
        };
        match self.state.modal.as_mut() {
            Some(Modal::Byes { running, .. }) => {
                *running = wrap(*running as usize, delta, 5) as i32;
            }
            Some(Modal::ReplaceBatter { cursor }) => *cursor = wrap(*cursor, delta, batters),
            Some(Modal::SelectBowler { cursor }) => *cursor = wrap(*cursor, delta, bowlers),
            _ => {}
        }
    }

    pub fn modal_toggle(&mut self) {
        if let Some(Modal::Byes { boundary, .. }) = self.state.modal.as_mut() {
            *boundary = !*boundary;
        }
    }

    pub fn modal_input(&mut self, c: char) {
        if let Some(Modal::Custom { input }) = self.state.modal.as_mut()
            && (c.is_ascii_digit() || (c == '-' && input.is_empty()))
        {
            input.push(c);
        }
    }

    pub fn modal_backspace(&mut self) {
        if let Some(Modal::Custom { input }) = self.state.modal.as_mut() {
            input.pop();
        }
    }

    pub fn modal_confirm(&mut self) {
        let Some(modal) = self.state.modal.clone() else {
            return;
        };
        let lone = self.game().is_some_and(|g| g.is_only_one_batter_left());
        match modal {
            Modal::Byes { running, boundary } => {
                match Delivery::byes(running, if boundary { 4 } else { 0 }) {
                    Ok(delivery) => {
                        self.state.modal = None;
                        self.score(delivery);
                    }
                    Err(e) => self.on_error(e.to_string()),
                }
            }
            Modal::Custom { input } => match Delivery::parse_custom(&input, lone) {
                Ok(delivery) => {
                    self.state.modal = None;
                    self.score(delivery);
                }
                Err(e) => self.on_error(e.to_string()),
            },
            Modal::ReplaceBatter { cursor } => self.confirm_replacement(cursor),
            Modal::SelectBowler { cursor } => self.confirm_bowler(cursor),
        }
    }

    fn confirm_replacement(&mut self, cursor: usize) {
        let Some(game) = self.state.game.as_mut() else {
            return;
        };
        let Some(id) = game.available_batters().get(cursor).map(|p| p.id) else {
            return;
        };
        match game.replace_batter(id) {
            Ok(_) => {
                self.state.last_error = None;
                self.after_delivery();
            }
            Err(e) => self.on_error(e.to_string()),
        }
    }

    fn confirm_bowler(&mut self, cursor: usize) {
        let Some(game) = self.state.game.as_mut() else {
            return;
        };
        let Some(id) = game.available_bowlers().get(cursor).map(|p| p.id) else {
            return;
        };
        match game.select_bowler(id) {
            Ok(()) => {
                self.state.last_error = None;
                self.state.modal = None;
            }
            Err(e) => self.on_error(e.to_string()),
        }
    }

    /// Rematch with the same sheets: back to the toss.
    pub fn rematch(&mut self) {
        self.state.game = None;
        self.state.modal = None;
        self.state.ball_log.clear();
        self.state.toss = Default::default();
        self.update_tab(MenuItem::Toss);
    }
}

fn describe_ball(game: &Match, delivery: &Delivery, outcome: &DeliveryOutcome) -> String {
    let name = |id: PlayerId| {
        game.teams()
            .iter()
            .find_map(|t| t.player(id))
            .map(|p| p.name.as_str())
            .unwrap_or("?")
    };
    let mut text = format!(
        "{} to {}: {}",
        name(outcome.bowler),
        name(outcome.striker),
        delivery.label()
    );
    if outcome.over_completed {
        text.push_str(" | end of over");
    }
    if outcome.innings_closed {
        text.push_str(" | innings closed");
    }
    text
}
