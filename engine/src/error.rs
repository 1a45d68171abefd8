use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

/// Refusals from the match engine. None of these are fatal: the match is left
/// untouched and play continues once the caller supplies valid input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Delivery values the rules cannot express (negative runs, bad byes split,
    /// unparseable custom runs, a running outcome for a lone batter).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The call is out of sequence for the current match state.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// The candidate is not in the relevant eligibility set.
    #[error("{name} is not eligible: {reason}")]
    IneligiblePlayer { name: String, reason: String },
}

impl EngineError {
    pub(crate) fn input(msg: impl Into<String>) -> Self {
        EngineError::InvalidInput(msg.into())
    }

    pub(crate) fn state(msg: impl Into<String>) -> Self {
        EngineError::InvalidState(msg.into())
    }

    pub(crate) fn ineligible(name: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::IneligiblePlayer {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Problems with a team sheet, reported before a match can be created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("team name is empty")]
    EmptyTeamName,
    #[error("{team}: expected {expected} players, found {found}")]
    WrongSquadSize {
        team: String,
        expected: usize,
        found: usize,
    },
    #[error("{team}: player {index} has no name")]
    UnnamedPlayer { team: String, index: usize },
    #[error(
        "{team}: needs 4 batters, 2 all-rounders and 4 bowlers (has {batters}B, {all_rounders}AR, {bowlers}Bo)"
    )]
    Composition {
        team: String,
        batters: usize,
        all_rounders: usize,
        bowlers: usize,
    },
    #[error("both teams are named {0}")]
    DuplicateTeamName(String),
}
