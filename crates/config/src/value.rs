//! Value types that can be stored in a config entry.
//!
//! Values are persisted as TOML scalars. Enums are stored by variant name so
//! the file stays hand-editable.

use std::fmt;
use std::str::FromStr;

use game_core::Faction;
use strum::IntoEnumIterator;

/// A type that can live in a [`ConfigEntry`](crate::ConfigEntry).
pub trait ConfigValue: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Type label written next to each entry in the config file.
    const TYPE_NAME: &'static str;

    fn to_toml(&self) -> toml::Value;

    /// Returns `None` when the persisted value has the wrong shape.
    fn from_toml(value: &toml::Value) -> Option<Self>;

    /// Human-readable list of accepted values, for types with a closed set.
    fn accepted_values() -> Option<String> {
        None
    }
}

impl ConfigValue for f32 {
    const TYPE_NAME: &'static str = "Single";

    fn to_toml(&self) -> toml::Value {
        // Go through the shortest decimal form so 0.1 is written as 0.1, not
        // as its widened f64 expansion.
        let widened = self.to_string().parse::<f64>().unwrap_or(f64::from(*self));
        toml::Value::Float(widened)
    }

    fn from_toml(value: &toml::Value) -> Option<Self> {
        match value {
            toml::Value::Float(f) => Some(*f as f32),
            toml::Value::Integer(i) => Some(*i as f32),
            _ => None,
        }
    }
}

impl ConfigValue for i64 {
    const TYPE_NAME: &'static str = "Int64";

    fn to_toml(&self) -> toml::Value {
        toml::Value::Integer(*self)
    }

    fn from_toml(value: &toml::Value) -> Option<Self> {
        value.as_integer()
    }
}

impl ConfigValue for bool {
    const TYPE_NAME: &'static str = "Boolean";

    fn to_toml(&self) -> toml::Value {
        toml::Value::Boolean(*self)
    }

    fn from_toml(value: &toml::Value) -> Option<Self> {
        value.as_bool()
    }
}

impl ConfigValue for String {
    const TYPE_NAME: &'static str = "String";

    fn to_toml(&self) -> toml::Value {
        toml::Value::String(self.clone())
    }

    fn from_toml(value: &toml::Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl ConfigValue for Faction {
    const TYPE_NAME: &'static str = "Faction";

    fn to_toml(&self) -> toml::Value {
        toml::Value::String(self.to_string())
    }

    fn from_toml(value: &toml::Value) -> Option<Self> {
        Faction::from_str(value.as_str()?).ok()
    }

    fn accepted_values() -> Option<String> {
        Some(
            Faction::iter()
                .map(|faction| faction.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

/// Log verbosity persisted in the global section.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum LogLevel {
    /// Basic information about the bind pass.
    #[default]
    Low,
    /// Per-template detail useful for troubleshooting.
    Medium,
    /// Every applied value. Slows down world loading.
    High,
}

impl LogLevel {
    /// Maps the verbosity onto a tracing level.
    pub fn as_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Low => tracing::Level::INFO,
            LogLevel::Medium => tracing::Level::DEBUG,
            LogLevel::High => tracing::Level::TRACE,
        }
    }
}

impl ConfigValue for LogLevel {
    const TYPE_NAME: &'static str = "LogLevel";

    fn to_toml(&self) -> toml::Value {
        toml::Value::String(self.to_string())
    }

    fn from_toml(value: &toml::Value) -> Option<Self> {
        LogLevel::from_str(value.as_str()?).ok()
    }

    fn accepted_values() -> Option<String> {
        Some(
            LogLevel::iter()
                .map(|level| level.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floats_keep_short_decimal_form() {
        assert_eq!(0.1f32.to_toml().to_string(), "0.1");
        assert_eq!(f32::from_toml(&toml::Value::Integer(3)), Some(3.0));
        assert_eq!(f32::from_toml(&toml::Value::Boolean(true)), None);
    }

    #[test]
    fn enums_use_variant_names() {
        assert_eq!(
            Faction::from_toml(&toml::Value::String("undead".into())),
            Some(Faction::Undead)
        );
        assert_eq!(Faction::from_toml(&toml::Value::Integer(1)), None);
        assert_eq!(LogLevel::High.to_toml().as_str(), Some("High"));
        assert!(Faction::accepted_values().unwrap().contains("Dverger"));
    }

    #[test]
    fn verbosity_is_ordered() {
        assert!(LogLevel::High > LogLevel::Medium);
        assert_eq!(LogLevel::Medium.as_tracing_level(), tracing::Level::DEBUG);
    }
}
