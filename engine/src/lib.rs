pub mod delivery;
pub mod eligibility;
pub mod error;
pub mod innings;
pub mod result;
pub mod scorecard;
pub mod scoring;
pub mod setup;
pub mod state;

pub use delivery::Delivery;
pub use error::{EngineError, EngineResult, SetupError};
pub use result::MatchResult;
pub use scoring::DeliveryOutcome;
pub use scorecard::{BattingLine, BowlingLine, Scorecard, TeamCard};
pub use setup::{SheetEntry, TeamSheet, Toss, TossDecision};
pub use state::{CreaseSlot, Match};

use serde::Deserialize;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Rule constants
// ---------------------------------------------------------------------------

/// Legal deliveries in one over.
pub const OVER_LENGTH: u32 = 5;

/// Deducted from the batting side and the striker on every wicket ball.
pub const WICKET_PENALTY: i32 = 25;

/// The only outcomes a lone batter can produce: a dot or a struck boundary.
pub const SINGLE_BATTER_RUNS: [i32; 5] = [0, 10, 15, 20, 25];

/// Boundary ladder offered alongside the 0-5 run buttons.
pub const BOUNDARY_RUNS: [i32; 4] = [10, 15, 20, 25];

pub const SQUAD_SIZE: usize = 10;

// ---------------------------------------------------------------------------
// Player / team model
// ---------------------------------------------------------------------------

pub type PlayerId = Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum Role {
    #[default]
    Batter,
    AllRounder,
    Bowler,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Batter, Role::AllRounder, Role::Bowler];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Batter => "Batter",
            Role::AllRounder => "All-Rounder",
            Role::Bowler => "Bowler",
        }
    }

    /// Balls a player of this role may face across the whole match.
    pub fn ball_quota(&self) -> u32 {
        match self {
            Role::Batter => 10,
            Role::AllRounder => 5,
            Role::Bowler => 0,
        }
    }

    /// Balls a player of this role may bowl across the whole match.
    pub fn bowling_quota(&self) -> u32 {
        match self {
            Role::Batter => 0,
            Role::AllRounder => 5,
            Role::Bowler => 10,
        }
    }

    pub fn can_bat(&self) -> bool {
        matches!(self, Role::Batter | Role::AllRounder)
    }

    pub fn can_bowl(&self) -> bool {
        matches!(self, Role::Bowler | Role::AllRounder)
    }

    /// Next role in display order, wrapping. Used by role pickers.
    pub fn cycle(self) -> Self {
        match self {
            Role::Batter => Role::AllRounder,
            Role::AllRounder => Role::Bowler,
            Role::Bowler => Role::Batter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
    pub balls_faced: u32,
    pub balls_bowled: u32,
    pub runs_scored: i32, // goes negative after a wicket penalty
    pub runs_conceded: i32,
    pub overs_bowled: u32,
    pub balls_in_current_over: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role,
            balls_faced: 0,
            balls_bowled: 0,
            runs_scored: 0,
            runs_conceded: 0,
            overs_bowled: 0,
            balls_in_current_over: 0,
        }
    }

    pub fn ball_quota(&self) -> u32 {
        self.role.ball_quota()
    }

    pub fn bowling_quota(&self) -> u32 {
        self.role.bowling_quota()
    }

    /// Still has balls left to face.
    pub fn can_still_bat(&self) -> bool {
        self.role.can_bat() && self.balls_faced < self.ball_quota()
    }

    /// Still has balls left to bowl.
    pub fn can_still_bowl(&self) -> bool {
        self.role.can_bowl() && self.balls_bowled < self.bowling_quota()
    }

    pub fn balls_left_to_face(&self) -> u32 {
        self.ball_quota().saturating_sub(self.balls_faced)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
    pub total_runs: i32, // may go negative through wicket penalties
}

impl Team {
    pub fn new(name: impl Into<String>, players: Vec<Player>) -> Self {
        Self {
            name: name.into(),
            players,
            total_runs: 0,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn with_role(&self, role: Role) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.role == role)
    }

    /// (batters, all-rounders, bowlers)
    pub fn composition(&self) -> (usize, usize, usize) {
        (
            self.with_role(Role::Batter).count(),
            self.with_role(Role::AllRounder).count(),
            self.with_role(Role::Bowler).count(),
        )
    }
}

// ---------------------------------------------------------------------------
// Innings
// ---------------------------------------------------------------------------

/// Ordered from first to last; there is no fourth innings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Innings {
    #[default]
    First,
    Second,
    Third,
}

impl Innings {
    pub fn number(&self) -> u8 {
        match self {
            Innings::First => 1,
            Innings::Second => 2,
            Innings::Third => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Innings::First => "1st Innings",
            Innings::Second => "2nd Innings",
            Innings::Third => "3rd Innings",
        }
    }

    /// Legal deliveries before the innings closes.
    pub fn ball_cap(&self) -> u32 {
        match self {
            Innings::First | Innings::Third => 25,
            Innings::Second => 50,
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Innings::First => Some(Innings::Second),
            Innings::Second => Some(Innings::Third),
            Innings::Third => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Squad in sheet order: 4 batters, 2 all-rounders, 4 bowlers.
    pub fn squad(prefix: &str) -> Vec<Player> {
        let mut players = Vec::new();
        for i in 1..=4 {
            players.push(Player::new(format!("{prefix} Bat{i}"), Role::Batter));
        }
        for i in 1..=2 {
            players.push(Player::new(format!("{prefix} AR{i}"), Role::AllRounder));
        }
        for i in 1..=4 {
            players.push(Player::new(format!("{prefix} Bowl{i}"), Role::Bowler));
        }
        players
    }

    pub fn team(name: &str) -> Team {
        Team::new(name, squad(name))
    }

    pub fn id_of(team: &Team, name: &str) -> PlayerId {
        team.players
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id)
            .unwrap_or_else(|| panic!("no player named {name}"))
    }

    /// Fresh match, Team A batting first, innings not started.
    pub fn new_match() -> Match {
        Match::new(team("Team A"), team("Team B"), 0)
    }

    /// Fresh match with openers Bat1/Bat2 (Bat1 on strike) and Bowl1 bowling.
    pub fn started_match() -> Match {
        let mut m = new_match();
        let b1 = id_of(m.batting_team(), "Team A Bat1");
        let b2 = id_of(m.batting_team(), "Team A Bat2");
        let bowler = id_of(m.bowling_team(), "Team B Bowl1");
        m.start_innings(b1, b2, 0, bowler).expect("openers are eligible");
        m
    }

    /// Resolves any pending prompts with the first eligible candidate,
    /// the way a user tapping the top entry of each picker would.
    pub fn resolve_prompts(m: &mut Match) {
        if m.is_completed() {
            return;
        }
        if m.is_innings_just_started() {
            let batters = m.opening_batter_candidates();
            let bowler = m.opening_bowler_candidates()[0].id;
            m.start_innings(batters[0].id, batters[1].id, 0, bowler)
                .expect("opening selection is eligible");
            return;
        }
        if m.batter_to_replace().is_some()
            && let Some(next) = m.available_batters().first().map(|p| p.id)
        {
            m.replace_batter(next).expect("replacement is eligible");
        }
        if m.needs_bowler_change() {
            let next = m.available_bowlers()[0].id;
            m.select_bowler(next).expect("bowler is eligible");
        }
    }

    /// Plays `deliveries` in order, resolving prompts before each ball.
    pub fn play(m: &mut Match, deliveries: &[Delivery]) {
        for delivery in deliveries {
            resolve_prompts(m);
            m.apply_delivery(*delivery).expect("delivery is legal");
        }
    }
}
