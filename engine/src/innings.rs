use crate::state::CreaseSlot;
use crate::{Match, MatchResult};
use log::info;

impl Match {
    /// Called once `balls_completed` reaches the cap. First -> Second swaps
    /// sides, Second -> Third swaps them back, Third ends the match.
    pub(crate) fn close_innings(&mut self) {
        let closed = self.innings;
        info!(
            "{} closed: {} {} runs",
            closed.label(),
            self.batting_team().name,
            self.batting_team().total_runs
        );

        self.balls_completed = 0;
        self.last_bowler = None;

        match closed.next() {
            Some(next) => {
                self.innings = next;
                std::mem::swap(&mut self.batting, &mut self.bowling);
                self.crease = [None, None];
                self.bowler = None;
                self.on_strike = CreaseSlot::One;
                info!("{} begins: {} to bat", next.label(), self.batting_team().name);
            }
            None => {
                let result = MatchResult::from_teams(&self.teams);
                self.completed = true;
                self.result = Some(result);
                info!("match completed: {}", result.describe(&self.teams));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use crate::{CreaseSlot, Delivery, EngineError, Innings, MatchResult};

    #[test]
    fn first_innings_closes_after_25_balls() {
        let mut m = started_match();
        play(&mut m, &[Delivery::dot(); 24]);
        assert_eq!(m.innings(), Innings::First);
        assert_eq!(m.balls_completed(), 24);

        play(&mut m, &[Delivery::dot()]);
        assert_eq!(m.innings(), Innings::Second);
        assert_eq!(m.balls_completed(), 0);
        assert_eq!(m.batting_index(), 1);
        assert_eq!(m.bowling_index(), 0);
        assert!(m.is_innings_just_started());
        assert!(m.on_strike_batter().is_none());
        assert!(m.non_strike_batter().is_none());
        assert!(m.active_bowler().is_none());
        assert!(m.last_bowler().is_none());
        assert_eq!(m.on_strike_slot(), CreaseSlot::One);
    }

    #[test]
    fn second_innings_runs_50_balls_then_swaps_back() {
        let mut m = started_match();
        play(&mut m, &[Delivery::dot(); 25]);
        play(&mut m, &[Delivery::dot(); 49]);
        assert_eq!(m.innings(), Innings::Second);
        assert_eq!(m.balls_completed(), 49);

        play(&mut m, &[Delivery::dot()]);
        assert_eq!(m.innings(), Innings::Third);
        assert_eq!(m.batting_index(), 0);
        assert_eq!(m.bowling_index(), 1);
        assert!(m.is_innings_just_started());
    }

    #[test]
    fn third_innings_completes_match() {
        let mut m = started_match();
        play(&mut m, &[Delivery::dot(); 25 + 50 + 24]);
        assert_eq!(m.innings(), Innings::Third);
        assert!(!m.is_completed());

        play(&mut m, &[Delivery::dot()]);
        assert!(m.is_completed());
        assert_eq!(m.result(), Some(&MatchResult::Tie));
        assert_eq!(m.result_text().as_deref(), Some("Match is a tie!"));
        assert!(!m.needs_bowler_change());
    }

    #[test]
    fn completed_match_refuses_all_mutation() {
        let mut m = started_match();
        play(&mut m, &[Delivery::dot(); 100]);
        assert!(m.is_completed());
        let snapshot = m.clone();

        assert!(matches!(m.apply_delivery(Delivery::runs(4)), Err(EngineError::InvalidState(_))));
        let any_bowler = m.bowling_team().players[9].id;
        assert!(matches!(m.select_bowler(any_bowler), Err(EngineError::InvalidState(_))));
        let any_batter = m.batting_team().players[0].id;
        assert!(matches!(m.replace_batter(any_batter), Err(EngineError::InvalidState(_))));
        assert_eq!(m, snapshot);
    }

    #[test]
    fn every_quota_is_used_exactly_by_match_end() {
        let mut m = started_match();
        play(&mut m, &[Delivery::dot(); 100]);
        for team in m.teams() {
            for p in &team.players {
                assert_eq!(p.balls_faced, p.ball_quota(), "{} faced", p.name);
                assert_eq!(p.balls_bowled, p.bowling_quota(), "{} bowled", p.name);
                assert_eq!(p.balls_in_current_over, 0, "{} mid-over", p.name);
            }
        }
    }
}
