//! Read-only summary of a match, used by the final screen and the live
//! batting/bowling tables.

use crate::{Match, OVER_LENGTH, Player, Role, Team};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattingLine {
    pub name: String,
    pub role: Role,
    pub runs: i32,
    pub balls: u32,
    pub quota: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BowlingLine {
    pub name: String,
    pub role: Role,
    pub balls: u32,
    pub runs_conceded: i32,
    pub quota: u32,
}

impl BowlingLine {
    /// Overs in cricket notation, e.g. `3.2` for 17 balls.
    pub fn overs(&self) -> String {
        format!("{}.{}", self.balls / OVER_LENGTH, self.balls % OVER_LENGTH)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamCard {
    pub name: String,
    pub total_runs: i32,
    pub batting: Vec<BattingLine>,
    pub bowling: Vec<BowlingLine>,
}

impl TeamCard {
    /// Lines are only produced for players who have faced or bowled a ball.
    pub fn from_team(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            total_runs: team.total_runs,
            batting: team
                .players
                .iter()
                .filter(|p| p.balls_faced > 0)
                .map(batting_line)
                .collect(),
            bowling: team
                .players
                .iter()
                .filter(|p| p.balls_bowled > 0)
                .map(bowling_line)
                .collect(),
        }
    }
}

fn batting_line(p: &Player) -> BattingLine {
    BattingLine {
        name: p.name.clone(),
        role: p.role,
        runs: p.runs_scored,
        balls: p.balls_faced,
        quota: p.ball_quota(),
    }
}

fn bowling_line(p: &Player) -> BowlingLine {
    BowlingLine {
        name: p.name.clone(),
        role: p.role,
        balls: p.balls_bowled,
        runs_conceded: p.runs_conceded,
        quota: p.bowling_quota(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorecard {
    pub teams: [TeamCard; 2],
    /// `None` until the match is completed.
    pub result: Option<String>,
}

impl Match {
    pub fn scorecard(&self) -> Scorecard {
        let [a, b] = self.teams();
        Scorecard {
            teams: [TeamCard::from_team(a), TeamCard::from_team(b)],
            result: self.result_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Delivery;
    use crate::test_support::*;

    #[test]
    fn fresh_match_has_empty_lines() {
        let card = new_match().scorecard();
        assert_eq!(card.teams[0].name, "Team A");
        assert!(card.teams[0].batting.is_empty());
        assert!(card.teams[1].bowling.is_empty());
        assert_eq!(card.result, None);
    }

    #[test]
    fn lines_follow_the_play() {
        let mut m = started_match();
        play(&mut m, &[Delivery::runs(1), Delivery::runs(4), Delivery::wicket()]);
        let card = m.scorecard();

        let batting = &card.teams[0].batting;
        assert_eq!(batting.len(), 2);
        assert_eq!(batting[0].name, "Team A Bat1");
        assert_eq!((batting[0].runs, batting[0].balls), (1, 1));
        assert_eq!((batting[1].runs, batting[1].balls), (-21, 2));
        assert_eq!(card.teams[0].total_runs, -20);

        let bowling = &card.teams[1].bowling;
        assert_eq!(bowling.len(), 1);
        assert_eq!(bowling[0].runs_conceded, 5);
        assert_eq!(bowling[0].overs(), "0.3");
    }

    #[test]
    fn result_appears_at_match_end() {
        let mut m = started_match();
        play(&mut m, &[Delivery::dot(); 100]);
        let card = m.scorecard();
        assert_eq!(card.result.as_deref(), Some("Match is a tie!"));
        let bowl1 = card.teams[1]
            .bowling
            .iter()
            .find(|l| l.name == "Team B Bowl1")
            .expect("Bowl1 bowled");
        assert_eq!(bowl1.overs(), "2.0");
        assert_eq!(bowl1.balls, bowl1.quota);
    }
}
