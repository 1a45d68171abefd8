use crate::{Delivery, EngineError, EngineResult, Match, OVER_LENGTH, Player, PlayerId, WICKET_PENALTY};
use log::{debug, warn};

/// What a successfully applied delivery did, for ball-by-ball display.
/// Replacement prompts are still discovered by polling the match afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub striker: PlayerId,
    pub bowler: PlayerId,
    pub strike_rotated: bool,
    pub over_completed: bool,
    pub innings_closed: bool,
}

impl Match {
    /// Applies one delivery. Nothing is mutated unless every check passes;
    /// once they do, the effects run in a fixed order because the strike and
    /// over checks read counters updated by the earlier steps.
    pub fn apply_delivery(&mut self, delivery: Delivery) -> EngineResult<DeliveryOutcome> {
        let (striker, bowler) = self
            .check_delivery(&delivery)
            .inspect_err(|e| warn!("delivery refused: {e}"))?;

        // 1-2. Team total, then the wicket penalty on team and striker.
        self.teams[self.batting].total_runs += delivery.runs;
        if delivery.is_wicket {
            self.teams[self.batting].total_runs -= WICKET_PENALTY;
            if let Some(p) = self.batting_player_mut(striker) {
                p.runs_scored -= WICKET_PENALTY;
            }
        }

        // 3.
        self.balls_completed += 1;

        // 4. Conceded runs are charged on byes and wicket balls too.
        if let Some(b) = self.bowling_player_mut(bowler) {
            b.balls_bowled += 1;
            b.balls_in_current_over += 1;
            b.runs_conceded += delivery.runs;
        }

        // 5.
        if let Some(p) = self.batting_player_mut(striker) {
            p.balls_faced += 1;
            if !delivery.is_byes && !delivery.is_wicket {
                p.runs_scored += delivery.runs;
            }
        }

        // 6. Only runs actually run change ends.
        let before = self.on_strike;
        if !delivery.is_wicket && matches!(delivery.running_component(), 1 | 3) {
            self.rotate_strike();
        }
        let strike_rotated = self.on_strike != before;

        // 7. Over end: always swap ends, independent of step 6.
        let mut over_completed = false;
        if let Some(b) = self.bowling_player_mut(bowler)
            && b.balls_in_current_over >= OVER_LENGTH
        {
            b.balls_in_current_over = 0;
            b.overs_bowled += 1;
            over_completed = true;
        }
        if over_completed {
            self.last_bowler = Some(bowler);
            self.rotate_strike();
        }

        debug!(
            "{} ball {}: {} ({}) -> {} {}",
            self.innings.label(),
            self.balls_completed,
            delivery.label(),
            if over_completed { "over" } else { "in over" },
            self.batting_team().name,
            self.batting_team().total_runs
        );

        // 8.
        let innings_closed = self.balls_completed >= self.innings.ball_cap();
        if innings_closed {
            self.close_innings();
        } else {
            self.release_unreplaceable_batter();
        }

        Ok(DeliveryOutcome {
            striker,
            bowler,
            strike_rotated,
            over_completed,
            innings_closed,
        })
    }

    /// Every refusal happens here, before anything is written.
    fn check_delivery(&self, delivery: &Delivery) -> EngineResult<(PlayerId, PlayerId)> {
        self.ensure_in_progress()?;
        delivery.validate()?;

        let Some(striker) = self.on_strike_batter() else {
            return Err(EngineError::state("no batter on strike"));
        };
        let Some(bowler) = self.active_bowler() else {
            return Err(EngineError::state("no bowler selected"));
        };
        if self.non_strike_batter().is_none() && !self.available_batters().is_empty() {
            return Err(EngineError::state("non-striking batter not selected"));
        }
        if self.batter_to_replace().is_some() && !self.available_batters().is_empty() {
            return Err(EngineError::state("a batter has completed their quota and must be replaced"));
        }
        if self.needs_bowler_change() {
            return Err(EngineError::state("over complete: select the next bowler"));
        }
        if !bowler.can_still_bowl() {
            return Err(EngineError::state(format!("{} has no balls left to bowl", bowler.name)));
        }
        if self.is_only_one_batter_left() {
            delivery.validate_for_lone_batter()?;
        }
        self.check_tallies(delivery, striker, bowler)?;
        Ok((striker.id, bowler.id))
    }

    /// Refuses a ball whose runs would push any tally past the `i32` range.
    fn check_tallies(&self, delivery: &Delivery, striker: &Player, bowler: &Player) -> EngineResult<()> {
        let penalty = if delivery.is_wicket { WICKET_PENALTY } else { 0 };
        let credited = if delivery.is_byes || delivery.is_wicket { 0 } else { delivery.runs };

        let team_total = self
            .batting_team()
            .total_runs
            .checked_add(delivery.runs)
            .and_then(|t| t.checked_sub(penalty));
        let conceded = bowler.runs_conceded.checked_add(delivery.runs);
        let batter = striker
            .runs_scored
            .checked_add(credited)
            .and_then(|r| r.checked_sub(penalty));

        if team_total.is_none() || conceded.is_none() || batter.is_none() {
            return Err(EngineError::input(format!(
                "{} runs would overflow the scoreboard",
                delivery.runs
            )));
        }
        Ok(())
    }

    /// A batter who has faced their quota with nobody left to replace them
    /// walks off, leaving the survivor on strike for the rest of the innings.
    fn release_unreplaceable_batter(&mut self) {
        let Some(slot) = self.batter_to_replace() else {
            return;
        };
        if !self.available_batters().is_empty() {
            return;
        }
        debug!(
            "{:?} retires with no replacement; batting on alone",
            self.crease_batter(slot).map(|p| &p.name)
        );
        self.crease[slot.index()] = None;
        self.on_strike = slot.other();
    }
}
