use log::LevelFilter;
use std::path::PathBuf;

pub const ROSTER_ENV: &str = "DASHCRICKET_ROSTER";
pub const LOG_ENV: &str = "DASHCRICKET_LOG";

#[derive(Debug, Default, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    /// Team sheets to load at startup instead of typing them in.
    pub roster_path: Option<PathBuf>,
}

impl AppSettings {
    pub fn load() -> Self {
        Self {
            full_screen: false,
            log_level: std::env::var(LOG_ENV).ok().and_then(|v| parse_level(&v)),
            roster_path: std::env::var(ROSTER_ENV)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    /// A `--roster` flag wins over the environment.
    pub fn with_roster(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.roster_path = path;
        }
        self
    }
}

fn parse_level(value: &str) -> Option<LevelFilter> {
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("chatty"), None);
    }

    #[test]
    fn test_cli_roster_overrides_env() {
        let settings = AppSettings {
            roster_path: Some(PathBuf::from("env.json")),
            ..Default::default()
        };
        let settings = settings.with_roster(Some(PathBuf::from("cli.json")));
        assert_eq!(settings.roster_path, Some(PathBuf::from("cli.json")));
        let settings = settings.with_roster(None);
        assert_eq!(settings.roster_path, Some(PathBuf::from("cli.json")));
    }
}
