//! Pre-match setup: team sheets and the toss.

use crate::{Match, Player, Role, SQUAD_SIZE, SetupError, Team};
use serde::Deserialize;

pub const REQUIRED_BATTERS: usize = 4;
pub const REQUIRED_ALL_ROUNDERS: usize = 2;
pub const REQUIRED_BOWLERS: usize = 4;

/// One entry on a team sheet before it becomes a `Player`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SheetEntry {
    pub name: String,
    pub role: Role,
}

/// A team as typed in by the user or read from a roster file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TeamSheet {
    pub name: String,
    pub players: Vec<SheetEntry>,
}

impl TeamSheet {
    /// An empty sheet with `SQUAD_SIZE` blank batter rows, ready for editing.
    pub fn blank(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            players: vec![SheetEntry::default(); SQUAD_SIZE],
        }
    }

    pub fn composition(&self) -> (usize, usize, usize) {
        let count = |role: Role| self.players.iter().filter(|p| p.role == role).count();
        (count(Role::Batter), count(Role::AllRounder), count(Role::Bowler))
    }

    pub fn has_valid_composition(&self) -> bool {
        self.composition() == (REQUIRED_BATTERS, REQUIRED_ALL_ROUNDERS, REQUIRED_BOWLERS)
    }

    /// Team names must differ, ignoring case and surrounding spaces. An empty
    /// name is left for `validate` to report.
    pub fn ensure_distinct_from(&self, other: &TeamSheet) -> Result<(), SetupError> {
        let name = self.name.trim();
        if !name.is_empty() && name.eq_ignore_ascii_case(other.name.trim()) {
            return Err(SetupError::DuplicateTeamName(name.to_string()));
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SetupError> {
        let team = self.name.trim();
        if team.is_empty() {
            return Err(SetupError::EmptyTeamName);
        }
        if self.players.len() != SQUAD_SIZE {
            return Err(SetupError::WrongSquadSize {
                team: team.to_string(),
                expected: SQUAD_SIZE,
                found: self.players.len(),
            });
        }
        if let Some(index) = self.players.iter().position(|p| p.name.trim().is_empty()) {
            return Err(SetupError::UnnamedPlayer {
                team: team.to_string(),
                index: index + 1,
            });
        }
        if !self.has_valid_composition() {
            let (batters, all_rounders, bowlers) = self.composition();
            return Err(SetupError::Composition {
                team: team.to_string(),
                batters,
                all_rounders,
                bowlers,
            });
        }
        Ok(())
    }

    /// Validates the sheet and builds a team with fresh player ids.
    pub fn into_team(self) -> Result<Team, SetupError> {
        self.validate()?;
        let players = self
            .players
            .into_iter()
            .map(|entry| Player::new(entry.name.trim(), entry.role))
            .collect();
        Ok(Team::new(self.name.trim(), players))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TossDecision {
    Bat,
    Bowl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toss {
    /// Index (0 or 1) of the side that called correctly.
    pub winner: usize,
    pub decision: TossDecision,
}

impl Toss {
    /// Index of the side that bats in the first innings.
    pub fn batting_first(&self) -> usize {
        let winner = self.winner & 1;
        match self.decision {
            TossDecision::Bat => winner,
            TossDecision::Bowl => 1 - winner,
        }
    }
}

impl Match {
    /// Builds a match from two sheets once both pass validation.
    pub fn from_sheets(team_a: TeamSheet, team_b: TeamSheet, toss: Toss) -> Result<Self, SetupError> {
        team_a.ensure_distinct_from(&team_b)?;
        let team_a = team_a.into_team()?;
        let team_b = team_b.into_team()?;
        Ok(Match::new(team_a, team_b, toss.batting_first()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(name: &str) -> TeamSheet {
        let roles = [
            Role::Batter,
            Role::Batter,
            Role::Batter,
            Role::Batter,
            Role::AllRounder,
            Role::AllRounder,
            Role::Bowler,
            Role::Bowler,
            Role::Bowler,
            Role::Bowler,
        ];
        TeamSheet {
            name: name.to_string(),
            players: roles
                .iter()
                .enumerate()
                .map(|(i, role)| SheetEntry {
                    name: format!("{name} {}", i + 1),
                    role: *role,
                })
                .collect(),
        }
    }

    #[test]
    fn valid_sheet_builds_team() {
        let team = sheet("Lions").into_team().expect("valid sheet");
        assert_eq!(team.name, "Lions");
        assert_eq!(team.players.len(), 10);
        assert_eq!(team.composition(), (4, 2, 4));
        assert_eq!(team.total_runs, 0);
    }

    #[test]
    fn player_ids_are_unique() {
        let team = sheet("Lions").into_team().expect("valid sheet");
        let mut ids: Vec<_> = team.players.iter().map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn composition_is_enforced() {
        let mut s = sheet("Lions");
        s.players[9].role = Role::AllRounder;
        assert_eq!(
            s.validate(),
            Err(SetupError::Composition {
                team: "Lions".to_string(),
                batters: 4,
                all_rounders: 3,
                bowlers: 3,
            })
        );
    }

    #[test]
    fn blank_names_are_reported_by_position() {
        let mut s = sheet("Lions");
        s.players[6].name = "  ".to_string();
        assert_eq!(
            s.validate(),
            Err(SetupError::UnnamedPlayer {
                team: "Lions".to_string(),
                index: 7
            })
        );
        assert_eq!(TeamSheet::blank("").validate(), Err(SetupError::EmptyTeamName));
    }

    #[test]
    fn squad_size_is_enforced() {
        let mut s = sheet("Lions");
        s.players.pop();
        assert!(matches!(s.validate(), Err(SetupError::WrongSquadSize { found: 9, .. })));
    }

    #[test]
    fn toss_decides_who_bats() {
        let bat = Toss { winner: 1, decision: TossDecision::Bat };
        let bowl = Toss { winner: 1, decision: TossDecision::Bowl };
        assert_eq!(bat.batting_first(), 1);
        assert_eq!(bowl.batting_first(), 0);
    }

    #[test]
    fn match_from_sheets_applies_toss() {
        let toss = Toss { winner: 0, decision: TossDecision::Bowl };
        let m = Match::from_sheets(sheet("Lions"), sheet("Tigers"), toss).expect("valid match");
        assert_eq!(m.batting_team().name, "Tigers");
        assert!(m.is_innings_just_started());
    }

    #[test]
    fn duplicate_team_names_are_refused() {
        let toss = Toss { winner: 0, decision: TossDecision::Bat };
        assert_eq!(
            Match::from_sheets(sheet("Lions"), sheet("lions"), toss),
            Err(SetupError::DuplicateTeamName("Lions".to_string()))
        );
    }

    #[test]
    fn distinct_names_ignore_case_and_padding() {
        assert_eq!(
            sheet(" Lions ").ensure_distinct_from(&sheet("LIONS")),
            Err(SetupError::DuplicateTeamName("Lions".to_string()))
        );
        assert_eq!(sheet("Lions").ensure_distinct_from(&sheet("Tigers")), Ok(()));
        assert_eq!(sheet("").ensure_distinct_from(&sheet("")), Ok(()));
    }

    #[test]
    fn roster_sheet_deserializes() {
        let json = r#"{"name":"Lions","players":[{"name":"A","role":"AllRounder"}]}"#;
        let s: TeamSheet = serde_json::from_str(json).expect("sheet json");
        assert_eq!(s.players[0].role, Role::AllRounder);
    }
}
