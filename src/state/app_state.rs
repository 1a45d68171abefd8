use crate::app::MenuItem;
use dashcricket_engine::{Innings, Match, SQUAD_SIZE, TeamSheet, TossDecision};

// ---------------------------------------------------------------------------
// Setup forms
// ---------------------------------------------------------------------------

/// Which of the two team-name fields has focus.
#[derive(Debug, Default)]
pub struct NameForm {
    pub field: usize,
}

/// Cursor into the player grid of one team sheet.
#[derive(Debug, Default)]
pub struct PlayerForm {
    pub team: usize,
    pub row: usize,
}

impl PlayerForm {
    pub fn move_row(&mut self, delta: isize) {
        self.row = wrap(self.row, delta, SQUAD_SIZE);
    }
}

#[derive(Debug)]
pub struct TossForm {
    pub winner: usize,
    pub decision: TossDecision,
}

impl Default for TossForm {
    fn default() -> Self {
        Self {
            winner: 0,
            decision: TossDecision::Bat,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SetupField {
    #[default]
    Batter1,
    Batter2,
    OnStrike,
    Bowler,
}

impl SetupField {
    pub const ALL: [SetupField; 4] = [
        SetupField::Batter1,
        SetupField::Batter2,
        SetupField::OnStrike,
        SetupField::Bowler,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SetupField::Batter1 => "Batter 1",
            SetupField::Batter2 => "Batter 2",
            SetupField::OnStrike => "On strike",
            SetupField::Bowler => "Bowler",
        }
    }
}

/// Opening selections, held as indexes into the candidate lists the engine
/// offers for the current innings.
#[derive(Debug, Default)]
pub struct InningsSetupForm {
    pub field: SetupField,
    pub batter1: usize,
    pub batter2: usize,
    pub on_strike: usize,
    pub bowler: usize,
}

impl InningsSetupForm {
    pub fn reset() -> Self {
        Self {
            batter2: 1,
            ..Default::default()
        }
    }

    pub fn move_field(&mut self, delta: isize) {
        let idx = SetupField::ALL.iter().position(|f| *f == self.field).unwrap_or(0);
        self.field = SetupField::ALL[wrap(idx, delta, SetupField::ALL.len())];
    }

    /// Cycles the focused field through `batters` or `bowlers` choices.
    pub fn cycle(&mut self, delta: isize, batters: usize, bowlers: usize) {
        match self.field {
            SetupField::Batter1 => self.batter1 = wrap(self.batter1, delta, batters),
            SetupField::Batter2 => self.batter2 = wrap(self.batter2, delta, batters),
            SetupField::OnStrike => self.on_strike = wrap(self.on_strike, delta, 2),
            SetupField::Bowler => self.bowler = wrap(self.bowler, delta, bowlers),
        }
    }
}

// ---------------------------------------------------------------------------
// Scoring dialogs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Running byes 0-4 plus an optional boundary of 4.
    Byes { running: i32, boundary: bool },
    Custom { input: String },
    ReplaceBatter { cursor: usize },
    SelectBowler { cursor: usize },
}

impl Modal {
    /// Replacement pickers block scoring until answered.
    pub fn is_mandatory(&self) -> bool {
        matches!(self, Modal::ReplaceBatter { .. } | Modal::SelectBowler { .. })
    }
}

// ---------------------------------------------------------------------------
// Ball log
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct BallLogEntry {
    pub at: String,
    pub innings: Innings,
    pub ball: u32,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Top-level state
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub sheets: [TeamSheet; 2],
    pub names: NameForm,
    pub players: PlayerForm,
    pub toss: TossForm,
    pub setup: InningsSetupForm,
    pub game: Option<Match>,
    pub modal: Option<Modal>,
    pub ball_log: Vec<BallLogEntry>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            show_logs: false,
            last_error: None,
            sheets: [TeamSheet::blank(""), TeamSheet::blank("")],
            names: NameForm::default(),
            players: PlayerForm::default(),
            toss: TossForm::default(),
            setup: InningsSetupForm::reset(),
            game: None,
            modal: None,
            ball_log: Vec::new(),
        }
    }

    /// True while keystrokes go into a text field rather than commands.
    pub fn is_text_entry(&self) -> bool {
        matches!(self.active_tab, MenuItem::TeamNames | MenuItem::Players)
            || matches!(self.modal, Some(Modal::Custom { .. }))
    }
}

pub fn wrap(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index as isize + delta).rem_euclid(len as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap() {
        assert_eq!(wrap(0, -1, 10), 9);
        assert_eq!(wrap(9, 1, 10), 0);
        assert_eq!(wrap(3, 2, 10), 5);
        assert_eq!(wrap(3, 1, 0), 0);
    }

    #[test]
    fn test_setup_form_cycles_fields() {
        let mut form = InningsSetupForm::reset();
        assert_eq!((form.batter1, form.batter2), (0, 1));
        form.move_field(-1);
        assert_eq!(form.field, SetupField::Bowler);
        form.cycle(1, 6, 3);
        form.cycle(1, 6, 3);
        form.cycle(1, 6, 3);
        assert_eq!(form.bowler, 0);
        form.move_field(-1);
        form.cycle(1, 6, 3);
        assert_eq!(form.on_strike, 1);
    }
}
