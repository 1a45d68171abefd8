//! Who may bat and bowl next, and the selection operations gated on it.
//!
//! Queries here never mutate. `start_innings`, `replace_batter` and
//! `select_bowler` only assign slots, and only after the candidate has been
//! found in the matching eligibility set.

use crate::state::CreaseSlot;
use crate::{EngineError, EngineResult, Match, Player, PlayerId};
use log::{debug, warn};

impl Match {
    /// Batting-side players with balls left who are not at the crease.
    pub fn available_batters(&self) -> Vec<&Player> {
        self.batting_team()
            .players
            .iter()
            .filter(|p| p.can_still_bat() && !self.crease.contains(&Some(p.id)))
            .collect()
    }

    /// Bowling-side players with balls left, minus whoever bowled the last over.
    pub fn available_bowlers(&self) -> Vec<&Player> {
        self.bowling_team()
            .players
            .iter()
            .filter(|p| p.can_still_bowl() && Some(p.id) != self.last_bowler)
            .collect()
    }

    /// Candidates for the opening pair, crease occupancy ignored.
    pub fn opening_batter_candidates(&self) -> Vec<&Player> {
        self.batting_team()
            .players
            .iter()
            .filter(|p| p.can_still_bat())
            .collect()
    }

    pub fn opening_bowler_candidates(&self) -> Vec<&Player> {
        self.bowling_team()
            .players
            .iter()
            .filter(|p| p.can_still_bowl())
            .collect()
    }

    /// Exactly one batting-side player still has balls to face, counting the
    /// two at the crease as well as those yet to come in.
    pub fn is_only_one_batter_left(&self) -> bool {
        self.batting_team()
            .players
            .iter()
            .filter(|p| p.can_still_bat())
            .count()
            == 1
    }

    /// The crease slot whose batter has used up their quota. Slot one wins if
    /// both somehow qualify.
    pub fn batter_to_replace(&self) -> Option<CreaseSlot> {
        [CreaseSlot::One, CreaseSlot::Two].into_iter().find(|slot| {
            self.crease_batter(*slot)
                .is_some_and(|p| p.balls_faced >= p.ball_quota())
        })
    }

    /// An over has just finished, the innings is still live and someone else
    /// is able to bowl the next one. The bowler must also be the one who
    /// finished that over: a freshly selected bowler with earlier overs to
    /// their name also sits at zero balls into an over.
    ///
    /// When the bowler who just finished is the only one with balls left,
    /// no change is asked for and they carry on into the next over.
    pub fn needs_bowler_change(&self) -> bool {
        let Some(bowler) = self.active_bowler() else {
            return false;
        };
        !self.completed
            && self.last_bowler == Some(bowler.id)
            && bowler.balls_in_current_over == 0
            && bowler.balls_bowled > 0
            && self.balls_completed < self.innings.ball_cap()
            && !self.available_bowlers().is_empty()
    }

    /// Puts the openers and the first bowler in place at the start of an innings.
    pub fn start_innings(
        &mut self,
        batter1: PlayerId,
        batter2: PlayerId,
        on_strike_index: usize,
        bowler: PlayerId,
    ) -> EngineResult<()> {
        self.ensure_in_progress()?;
        if !self.is_innings_just_started() {
            return Err(EngineError::state(format!(
                "{} is already under way",
                self.innings.label()
            )));
        }
        let Some(on_strike) = CreaseSlot::from_index(on_strike_index) else {
            return Err(EngineError::input(format!(
                "strike must be batter 0 or 1, got {on_strike_index}"
            )));
        };
        if batter1 == batter2 {
            return Err(EngineError::input("the two openers must be different players"));
        }
        for id in [batter1, batter2] {
            let eligible = self
                .opening_batter_candidates()
                .iter()
                .any(|p| p.id == id);
            if !eligible {
                return Err(self.ineligible_batter(id));
            }
        }
        if !self.opening_bowler_candidates().iter().any(|p| p.id == bowler) {
            return Err(self.ineligible_bowler(bowler));
        }

        self.crease = [Some(batter1), Some(batter2)];
        self.on_strike = on_strike;
        self.bowler = Some(bowler);
        debug!(
            "{} opened by {:?}/{:?}, bowler {:?}",
            self.innings.label(),
            self.crease_batter(CreaseSlot::One).map(|p| &p.name),
            self.crease_batter(CreaseSlot::Two).map(|p| &p.name),
            self.active_bowler().map(|p| &p.name),
        );
        Ok(())
    }

    /// Sends `new_batter` in for whoever `batter_to_replace` names.
    /// Returns the slot that was filled.
    pub fn replace_batter(&mut self, new_batter: PlayerId) -> EngineResult<CreaseSlot> {
        self.ensure_in_progress()?;
        let Some(slot) = self.batter_to_replace() else {
            return Err(EngineError::state("no batter has completed their quota"));
        };
        if !self.available_batters().iter().any(|p| p.id == new_batter) {
            return Err(self.ineligible_batter(new_batter));
        }
        let outgoing = self.crease_batter(slot).map(|p| p.name.clone());
        self.crease[slot.index()] = Some(new_batter);
        debug!(
            "{:?} replaced by {:?}",
            outgoing,
            self.crease_batter(slot).map(|p| &p.name)
        );
        Ok(slot)
    }

    /// Hands the ball to `new_bowler` for the next over.
    pub fn select_bowler(&mut self, new_bowler: PlayerId) -> EngineResult<()> {
        self.ensure_in_progress()?;
        if self
            .active_bowler()
            .is_some_and(|b| b.balls_in_current_over > 0)
        {
            return Err(EngineError::state("cannot change bowler in the middle of an over"));
        }
        if !self.available_bowlers().iter().any(|p| p.id == new_bowler) {
            return Err(self.ineligible_bowler(new_bowler));
        }
        self.bowler = Some(new_bowler);
        debug!("new bowler {:?}", self.active_bowler().map(|p| &p.name));
        Ok(())
    }

    fn ineligible_batter(&self, id: PlayerId) -> EngineError {
        let err = match self.batting_team().player(id) {
            None => EngineError::ineligible(id.to_string(), "not in the batting side"),
            Some(p) if !p.role.can_bat() => EngineError::ineligible(&p.name, "bowlers do not bat"),
            Some(p) if !p.can_still_bat() => {
                EngineError::ineligible(&p.name, "ball quota already used")
            }
            Some(p) => EngineError::ineligible(&p.name, "already at the crease"),
        };
        warn!("{err}");
        err
    }

    fn ineligible_bowler(&self, id: PlayerId) -> EngineError {
        let err = match self.bowling_team().player(id) {
            None => EngineError::ineligible(id.to_string(), "not in the bowling side"),
            Some(p) if !p.role.can_bowl() => EngineError::ineligible(&p.name, "batters do not bowl"),
            Some(p) if !p.can_still_bowl() => {
                EngineError::ineligible(&p.name, "bowling quota already used")
            }
            Some(p) => EngineError::ineligible(&p.name, "bowled the previous over"),
        };
        warn!("{err}");
        err
    }
}
