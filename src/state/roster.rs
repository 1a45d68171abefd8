//! Optional JSON roster holding both team sheets, so a match can start
//! without typing twenty names.
//!
//! ```json
//! { "teams": [ { "name": "Lions", "players": [ { "name": "Ana", "role": "Batter" }, ... ] }, ... ] }
//! ```

use anyhow::Context;
use dashcricket_engine::TeamSheet;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Roster {
    pub teams: [TeamSheet; 2],
}

impl Roster {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let roster: Roster = serde_json::from_str(content).context("invalid roster json")?;
        for sheet in &roster.teams {
            sheet.validate()?;
        }
        roster.teams[0].ensure_distinct_from(&roster.teams[1])?;
        Ok(roster)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read roster {} failed", path.display()))?;
        Self::parse(&content).with_context(|| format!("roster {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_json(second_name: &str, last_role: &str) -> String {
        let team = |name: &str, last: &str| {
            let mut players = Vec::new();
            for (i, role) in ["Batter", "Batter", "Batter", "Batter", "AllRounder", "AllRounder", "Bowler", "Bowler", "Bowler"]
                .iter()
                .enumerate()
            {
                players.push(format!(r#"{{"name":"{name} {i}","role":"{role}"}}"#));
            }
            players.push(format!(r#"{{"name":"{name} 9","role":"{last}"}}"#));
            format!(r#"{{"name":"{name}","players":[{}]}}"#, players.join(","))
        };
        format!(r#"{{"teams":[{},{}]}}"#, team("Lions", "Bowler"), team(second_name, last_role))
    }

    #[test]
    fn test_parse_valid_roster() {
        let roster = Roster::parse(&roster_json("Tigers", "Bowler")).expect("valid roster");
        assert_eq!(roster.teams[0].name, "Lions");
        assert_eq!(roster.teams[1].players.len(), 10);
        assert!(roster.teams[1].has_valid_composition());
    }

    #[test]
    fn test_rejects_bad_composition() {
        let err = Roster::parse(&roster_json("Tigers", "Batter")).unwrap_err();
        assert!(err.to_string().contains("Tigers"), "{err}");
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = Roster::parse(&roster_json("Lions", "Bowler")).unwrap_err();
        assert_eq!(err.to_string(), "both teams are named Lions");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Roster::parse("{").is_err());
        assert!(Roster::load(Path::new("/nonexistent/roster.json")).is_err());
    }
}
