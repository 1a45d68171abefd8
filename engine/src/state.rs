use crate::{Innings, MatchResult, Player, PlayerId, Team};

/// One of the two crease positions. Strike is tracked by slot, so a
/// replacement batter inherits the slot (and strike) of the one they replace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CreaseSlot {
    #[default]
    One,
    Two,
}

impl CreaseSlot {
    pub fn other(self) -> Self {
        match self {
            CreaseSlot::One => CreaseSlot::Two,
            CreaseSlot::Two => CreaseSlot::One,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(CreaseSlot::One),
            1 => Some(CreaseSlot::Two),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            CreaseSlot::One => 0,
            CreaseSlot::Two => 1,
        }
    }
}

/// The whole mutable state of one match.
///
/// Fields are only written by the scoring, eligibility and innings modules of
/// this crate; callers get the read-only accessors below plus the mutating
/// operations (`start_innings`, `apply_delivery`, `replace_batter`,
/// `select_bowler`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub(crate) teams: [Team; 2],
    pub(crate) innings: Innings,
    pub(crate) batting: usize,
    pub(crate) bowling: usize,
    pub(crate) balls_completed: u32,
    pub(crate) crease: [Option<PlayerId>; 2],
    pub(crate) on_strike: CreaseSlot,
    pub(crate) bowler: Option<PlayerId>,
    pub(crate) last_bowler: Option<PlayerId>,
    pub(crate) completed: bool,
    pub(crate) result: Option<MatchResult>,
}

impl Match {
    /// `batting_first` is the index (0 or 1) of the side that won the right to
    /// bat at the toss; anything else is treated as team 0.
    pub fn new(team_a: Team, team_b: Team, batting_first: usize) -> Self {
        let batting = if batting_first == 1 { 1 } else { 0 };
        log::info!(
            "new match: {} v {}, {} to bat first",
            team_a.name,
            team_b.name,
            if batting == 0 { &team_a.name } else { &team_b.name }
        );
        Self {
            teams: [team_a, team_b],
            innings: Innings::First,
            batting,
            bowling: 1 - batting,
            balls_completed: 0,
            crease: [None, None],
            on_strike: CreaseSlot::One,
            bowler: None,
            last_bowler: None,
            completed: false,
            result: None,
        }
    }

    // -----------------------------------------------------------------------
    // Read-only view
    // -----------------------------------------------------------------------

    pub fn teams(&self) -> &[Team; 2] {
        &self.teams
    }

    pub fn team(&self, index: usize) -> &Team {
        &self.teams[index & 1]
    }

    pub fn innings(&self) -> Innings {
        self.innings
    }

    pub fn batting_index(&self) -> usize {
        self.batting
    }

    pub fn bowling_index(&self) -> usize {
        self.bowling
    }

    pub fn batting_team(&self) -> &Team {
        &self.teams[self.batting]
    }

    pub fn bowling_team(&self) -> &Team {
        &self.teams[self.bowling]
    }

    pub fn balls_completed(&self) -> u32 {
        self.balls_completed
    }

    pub fn balls_remaining(&self) -> u32 {
        self.innings.ball_cap().saturating_sub(self.balls_completed)
    }

    pub fn on_strike_slot(&self) -> CreaseSlot {
        self.on_strike
    }

    pub fn crease_batter(&self, slot: CreaseSlot) -> Option<&Player> {
        self.crease[slot.index()].and_then(|id| self.batting_team().player(id))
    }

    pub fn on_strike_batter(&self) -> Option<&Player> {
        self.crease_batter(self.on_strike)
    }

    pub fn non_strike_batter(&self) -> Option<&Player> {
        self.crease_batter(self.on_strike.other())
    }

    pub fn active_bowler(&self) -> Option<&Player> {
        self.bowler.and_then(|id| self.bowling_team().player(id))
    }

    pub fn last_bowler(&self) -> Option<&Player> {
        self.last_bowler.and_then(|id| self.bowling_team().player(id))
    }

    /// True at the start of each innings until openers and a bowler are set.
    pub fn is_innings_just_started(&self) -> bool {
        self.balls_completed == 0
            && (self.crease[0].is_none() || self.crease[1].is_none() || self.bowler.is_none())
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    /// Result line once the match is over, e.g. "Team A wins by 15 runs".
    pub fn result_text(&self) -> Option<String> {
        self.result.as_ref().map(|r| r.describe(&self.teams))
    }

    // -----------------------------------------------------------------------
    // Internal lookups
    // -----------------------------------------------------------------------

    pub(crate) fn batting_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.teams[self.batting].player_mut(id)
    }

    pub(crate) fn bowling_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.teams[self.bowling].player_mut(id)
    }

    /// Flip strike. A no-op with one crease slot empty: a lone batter keeps
    /// facing whatever the runs or the over say.
    pub(crate) fn rotate_strike(&mut self) {
        if self.crease[0].is_some() && self.crease[1].is_some() {
            self.on_strike = self.on_strike.other();
        }
    }

    pub(crate) fn ensure_in_progress(&self) -> Result<(), crate::EngineError> {
        if self.completed {
            return Err(crate::EngineError::state("match is already completed"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;

    #[test]
    fn new_match_honours_toss() {
        let m = Match::new(team("Team A"), team("Team B"), 1);
        assert_eq!(m.batting_index(), 1);
        assert_eq!(m.bowling_index(), 0);
        assert_eq!(m.batting_team().name, "Team B");
        assert_eq!(m.innings(), Innings::First);
    }

    #[test]
    fn fresh_match_is_just_started() {
        let m = new_match();
        assert!(m.is_innings_just_started());
        assert!(m.on_strike_batter().is_none());
        assert!(m.active_bowler().is_none());
        assert!(!m.is_completed());
        assert!(m.result_text().is_none());
    }

    #[test]
    fn started_match_exposes_crease() {
        let m = started_match();
        assert!(!m.is_innings_just_started());
        assert_eq!(m.on_strike_batter().map(|p| p.name.as_str()), Some("Team A Bat1"));
        assert_eq!(m.non_strike_batter().map(|p| p.name.as_str()), Some("Team A Bat2"));
        assert_eq!(m.active_bowler().map(|p| p.name.as_str()), Some("Team B Bowl1"));
        assert_eq!(m.balls_remaining(), 25);
    }

    #[test]
    fn rotate_strike_needs_two_batters() {
        let mut m = started_match();
        m.rotate_strike();
        assert_eq!(m.on_strike_slot(), CreaseSlot::Two);
        m.crease[0] = None;
        m.rotate_strike();
        assert_eq!(m.on_strike_slot(), CreaseSlot::Two);
    }
}
