use crate::Team;
use std::cmp::Ordering;

/// Final outcome, decided on total runs alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// `winner` indexes the match's team pair.
    Win { winner: usize, margin: u32 },
    Tie,
}

impl MatchResult {
    pub fn from_totals(team_a: i32, team_b: i32) -> Self {
        match team_a.cmp(&team_b) {
            Ordering::Greater => MatchResult::Win {
                winner: 0,
                margin: team_a.abs_diff(team_b),
            },
            Ordering::Less => MatchResult::Win {
                winner: 1,
                margin: team_b.abs_diff(team_a),
            },
            Ordering::Equal => MatchResult::Tie,
        }
    }

    pub fn from_teams(teams: &[Team; 2]) -> Self {
        Self::from_totals(teams[0].total_runs, teams[1].total_runs)
    }

    pub fn winner(&self) -> Option<usize> {
        match self {
            MatchResult::Win { winner, .. } => Some(*winner),
            MatchResult::Tie => None,
        }
    }

    pub fn describe(&self, teams: &[Team; 2]) -> String {
        match self {
            MatchResult::Win { winner, margin } => {
                let unit = if *margin == 1 { "run" } else { "runs" };
                format!("{} wins by {margin} {unit}", teams[*winner & 1].name)
            }
            MatchResult::Tie => "Match is a tie!".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: i32, b: i32) -> [Team; 2] {
        let mut team_a = Team::new("Team A", Vec::new());
        let mut team_b = Team::new("Team B", Vec::new());
        team_a.total_runs = a;
        team_b.total_runs = b;
        [team_a, team_b]
    }

    #[test]
    fn higher_total_wins_by_difference() {
        let teams = pair(70, 55);
        let result = MatchResult::from_teams(&teams);
        assert_eq!(result, MatchResult::Win { winner: 0, margin: 15 });
        assert_eq!(result.describe(&teams), "Team A wins by 15 runs");
    }

    #[test]
    fn second_team_can_win() {
        let teams = pair(-20, 5);
        let result = MatchResult::from_teams(&teams);
        assert_eq!(result.winner(), Some(1));
        assert_eq!(result.describe(&teams), "Team B wins by 25 runs");
    }

    #[test]
    fn equal_totals_tie() {
        let teams = pair(70, 70);
        let result = MatchResult::from_teams(&teams);
        assert_eq!(result, MatchResult::Tie);
        assert_eq!(result.winner(), None);
        assert_eq!(result.describe(&teams), "Match is a tie!");
    }

    #[test]
    fn single_run_margin() {
        let teams = pair(3, 2);
        assert_eq!(MatchResult::from_teams(&teams).describe(&teams), "Team A wins by 1 run");
    }

    #[test]
    fn margin_spans_the_full_run_range() {
        let teams = pair(i32::MAX, -25);
        let result = MatchResult::from_teams(&teams);
        assert_eq!(result, MatchResult::Win { winner: 0, margin: i32::MAX as u32 + 25 });
    }
}
