//! Runtime settings, overridable from the environment.
use std::collections::BTreeSet;
use std::env;
use std::str::FromStr;

/// Templates never bound, whatever their components.
pub const DEFAULT_IGNORED: &[&str] = &["TheHive"];

/// Knobs controlling which parameters get bound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TweakSettings {
    /// Template names excluded from discovery.
    pub ignored: BTreeSet<String>,
    /// Bind a `Faction` entry per template.
    pub bind_faction: bool,
    /// Bind the four raw timings as their own entries. When enabled they
    /// replace the captured baseline as the base the multipliers scale.
    pub bind_timings: bool,
}

impl Default for TweakSettings {
    fn default() -> Self {
        Self {
            ignored: DEFAULT_IGNORED.iter().map(|name| name.to_string()).collect(),
            bind_faction: true,
            bind_timings: false,
        }
    }
}

impl TweakSettings {
    /// Defaults overridden by `TWEAKS_IGNORED` (comma separated),
    /// `TWEAKS_BIND_FACTION` and `TWEAKS_BIND_TIMINGS`.
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(raw) = env::var("TWEAKS_IGNORED") {
            settings.ignored = parse_list(&raw);
        }
        if let Some(value) = read_env::<bool>("TWEAKS_BIND_FACTION") {
            settings.bind_faction = value;
        }
        if let Some(value) = read_env::<bool>("TWEAKS_BIND_TIMINGS") {
            settings.bind_timings = value;
        }

        settings
    }
}

fn parse_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_ignore_the_hive() {
        let settings = TweakSettings::default();
        assert!(settings.ignored.contains("TheHive"));
        assert!(!settings.ignored.contains("Troll"));
        assert!(settings.bind_faction);
        assert!(!settings.bind_timings);
    }

    #[test]
    fn ignored_list_trims_and_skips_blanks() {
        let parsed = parse_list(" TheHive, Eikthyr ,,");
        assert_eq!(parsed.len(), 2);
        assert!(parsed.contains("Eikthyr"));
    }
}
