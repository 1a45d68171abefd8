use crate::{BOUNDARY_RUNS, EngineError, EngineResult, SINGLE_BATTER_RUNS};

/// Largest running component the byes dialog accepts.
pub const MAX_RUNNING_BYES: i32 = 4;

/// The outcome of one legal delivery, as handed to `Match::apply_delivery`.
///
/// `runs` is everything credited to the batting side on the ball. For byes,
/// `running_byes` is the part actually run between the wickets; it alone
/// decides whether strike changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    pub runs: i32,
    pub is_wicket: bool,
    pub is_byes: bool,
    pub running_byes: i32,
}

impl Delivery {
    pub fn new(runs: i32, is_wicket: bool, is_byes: bool, running_byes: i32) -> Self {
        Self {
            runs,
            is_wicket,
            is_byes,
            running_byes,
        }
    }

    /// A run button (0-5) or a boundary ladder button (10/15/20/25).
    pub fn runs(runs: i32) -> Self {
        Self::new(runs, false, false, 0)
    }

    pub fn dot() -> Self {
        Self::runs(0)
    }

    pub fn wicket() -> Self {
        Self::new(0, true, false, 0)
    }

    /// No-balls and wides both score a single extra with no special handling.
    pub fn no_ball() -> Self {
        Self::runs(1)
    }

    pub fn wide() -> Self {
        Self::runs(1)
    }

    /// Byes split into what was run (0-4) and a boundary (0 or 4).
    pub fn byes(running: i32, boundary: i32) -> EngineResult<Self> {
        if !(0..=MAX_RUNNING_BYES).contains(&running) {
            return Err(EngineError::input(format!(
                "running byes must be 0-{MAX_RUNNING_BYES}, got {running}"
            )));
        }
        if boundary != 0 && boundary != 4 {
            return Err(EngineError::input(format!(
                "boundary byes must be 0 or 4, got {boundary}"
            )));
        }
        Ok(Self::new(running + boundary, false, true, running))
    }

    /// Parses the free-form custom runs entry. With `lone_batter` set, only
    /// values a single batter can score are accepted.
    pub fn parse_custom(text: &str, lone_batter: bool) -> EngineResult<Self> {
        let trimmed = text.trim();
        let runs: i32 = trimmed
            .parse()
            .map_err(|_| EngineError::input(format!("'{trimmed}' is not a whole number of runs")))?;
        let delivery = Self::runs(runs);
        delivery.validate()?;
        if lone_batter {
            delivery.validate_for_lone_batter()?;
        }
        Ok(delivery)
    }

    pub fn is_boundary(&self) -> bool {
        !self.is_byes && BOUNDARY_RUNS.contains(&self.runs)
    }

    /// Runs that decide a strike change on this ball (before any over-end swap).
    pub fn running_component(&self) -> i32 {
        if self.is_byes { self.running_byes } else { self.runs }
    }

    /// Checks the values alone, independent of match state.
    pub fn validate(&self) -> EngineResult<()> {
        if self.runs < 0 {
            return Err(EngineError::input(format!("runs cannot be negative ({})", self.runs)));
        }
        if self.is_byes
            && (!(0..=MAX_RUNNING_BYES).contains(&self.running_byes) || self.running_byes > self.runs)
        {
            return Err(EngineError::input(format!(
                "running byes {} do not fit in {} byes",
                self.running_byes, self.runs
            )));
        }
        Ok(())
    }

    /// A lone batter cannot run, so only dots and struck boundaries remain.
    pub fn validate_for_lone_batter(&self) -> EngineResult<()> {
        if self.is_byes {
            return Err(EngineError::input("byes need two batters to run"));
        }
        if !SINGLE_BATTER_RUNS.contains(&self.runs) {
            return Err(EngineError::input(format!(
                "only one batter left: runs must be one of {SINGLE_BATTER_RUNS:?}, got {}",
                self.runs
            )));
        }
        Ok(())
    }

    /// Short label for ball-by-ball logs, e.g. "4", "W", "3b (2 run)".
    pub fn label(&self) -> String {
        if self.is_wicket {
            return "W".to_string();
        }
        if self.is_byes {
            return format!("{}b ({} run)", self.runs, self.running_byes);
        }
        match self.runs {
            0 => ".".to_string(),
            r => r.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byes_split_sums_into_runs() {
        let d = Delivery::byes(3, 4).expect("valid byes");
        assert_eq!(d.runs, 7);
        assert_eq!(d.running_byes, 3);
        assert!(d.is_byes);
        assert_eq!(d.running_component(), 3);
    }

    #[test]
    fn byes_reject_out_of_range_parts() {
        assert!(matches!(Delivery::byes(5, 0), Err(EngineError::InvalidInput(_))));
        assert!(matches!(Delivery::byes(-1, 0), Err(EngineError::InvalidInput(_))));
        assert!(matches!(Delivery::byes(1, 2), Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn no_ball_and_wide_are_plain_singles() {
        assert_eq!(Delivery::no_ball(), Delivery::runs(1));
        assert_eq!(Delivery::wide(), Delivery::runs(1));
    }

    #[test]
    fn negative_runs_fail_validation() {
        assert!(matches!(Delivery::runs(-3).validate(), Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn running_byes_cannot_exceed_total() {
        let d = Delivery::new(2, false, true, 3);
        assert!(matches!(d.validate(), Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn custom_runs_parse_and_trim() {
        assert_eq!(Delivery::parse_custom(" 7 ", false), Ok(Delivery::runs(7)));
    }

    #[test]
    fn custom_runs_reject_garbage_and_negatives() {
        assert!(matches!(Delivery::parse_custom("four", false), Err(EngineError::InvalidInput(_))));
        assert!(matches!(Delivery::parse_custom("-2", false), Err(EngineError::InvalidInput(_))));
        assert!(matches!(Delivery::parse_custom("", false), Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn custom_runs_for_lone_batter_use_boundary_ladder() {
        assert_eq!(Delivery::parse_custom("15", true), Ok(Delivery::runs(15)));
        assert_eq!(Delivery::parse_custom("0", true), Ok(Delivery::dot()));
        assert!(matches!(Delivery::parse_custom("3", true), Err(EngineError::InvalidInput(_))));
        assert!(matches!(Delivery::parse_custom("30", true), Err(EngineError::InvalidInput(_))));
    }

    #[test]
    fn lone_batter_cannot_take_byes() {
        let d = Delivery::byes(0, 4).expect("valid byes");
        assert!(d.validate_for_lone_batter().is_err());
    }

    #[test]
    fn boundary_detection_ignores_byes() {
        assert!(Delivery::runs(20).is_boundary());
        assert!(!Delivery::runs(4).is_boundary());
        assert!(!Delivery::new(10, false, true, 2).is_boundary());
    }

    #[test]
    fn labels() {
        assert_eq!(Delivery::dot().label(), ".");
        assert_eq!(Delivery::wicket().label(), "W");
        assert_eq!(Delivery::runs(15).label(), "15");
        assert_eq!(Delivery::byes(2, 4).map(|d| d.label()), Ok("6b (2 run)".to_string()));
    }
}
