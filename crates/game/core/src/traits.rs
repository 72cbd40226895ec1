//! Allegiance identity for characters.

/// Character faction (relationship/allegiance).
///
/// Factions decide who a character treats as an enemy. The tweak runtime
/// exposes the faction as a direct-replacement knob, so the persisted
/// configuration stores the variant name.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Faction {
    /// Player characters
    Players,
    /// Passive wildlife and plants
    AnimalsVeg,
    /// Black forest and meadows monsters
    #[default]
    ForestMonsters,
    /// Undead forces
    Undead,
    /// Fire creatures
    Demon,
    /// Mountain dwellers
    MountainMonsters,
    /// Ocean creatures
    SeaMonsters,
    /// Plains dwellers
    PlainsMonsters,
    /// Forsaken bosses
    Boss,
    /// Mistlands dwellers
    MistlandsMonsters,
    /// Dwarven explorers
    Dverger,
    /// Tamed or summoned by a player
    PlayerSpawned,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Faction::from_str("undead").unwrap(), Faction::Undead);
        assert_eq!(
            Faction::from_str("MOUNTAINMONSTERS").unwrap(),
            Faction::MountainMonsters
        );
        assert!(Faction::from_str("goblins").is_err());
    }

    #[test]
    fn display_round_trips() {
        let name = Faction::PlainsMonsters.to_string();
        assert_eq!(name, "PlainsMonsters");
        assert_eq!(Faction::from_str(&name).unwrap(), Faction::PlainsMonsters);
    }
}
