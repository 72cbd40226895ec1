use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use game_core::Faction;
use tempfile::TempDir;
use tweak_config::{AcceptableRange, ConfigFile};

#[test]
fn reload_applies_edits_and_notifies_subscribers() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tweaks.toml");

    let config = ConfigFile::open(&path).unwrap();
    let aggression = config
        .bind_with(
            "Deathsquito",
            "Aggression",
            1.0f32,
            "Multiplier for how aggressive the creature is.",
            AcceptableRange::new(0.1, 10.0),
        )
        .unwrap();
    let faction = config
        .bind("Deathsquito", "Faction", Faction::PlainsMonsters, "Faction.")
        .unwrap();

    let notifications = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&notifications);
    aggression.on_changed(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    // Simulate a hand edit: out-of-range aggression, new faction, new section
    let edited = fs::read_to_string(&path)
        .unwrap()
        .replace("Aggression = 1.0", "Aggression = 0.0")
        .replace("Faction = \"PlainsMonsters\"", "Faction = \"Undead\"")
        + "[Troll]\nEvasion = 2.0\n";
    fs::write(&path, edited).unwrap();

    let changed = config.reload().unwrap();

    assert_eq!(changed, 2);
    assert_eq!(aggression.value(), 0.1);
    assert_eq!(faction.value(), Faction::Undead);
    assert_eq!(notifications.load(Ordering::SeqCst), 1);

    // The unknown section is picked up by a later bind
    let evasion = config.bind("Troll", "Evasion", 1.0f32, "").unwrap();
    assert_eq!(evasion.value(), 2.0);

    // Reloading an unchanged file is quiet
    config.save().unwrap();
    assert_eq!(config.reload().unwrap(), 0);
    assert_eq!(notifications.load(Ordering::SeqCst), 1);
}

#[test]
fn values_survive_a_restart() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tweaks.toml");

    {
        let config = ConfigFile::open(&path).unwrap();
        let evasion = config.bind("Neck", "Evasion", 1.0f32, "").unwrap();
        evasion.set(3.5);
    }

    let config = ConfigFile::open(&path).unwrap();
    let evasion = config.bind("Neck", "Evasion", 1.0f32, "").unwrap();
    assert_eq!(evasion.value(), 3.5);
}

#[test]
fn bulk_binding_defers_saving() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("tweaks.toml");
    let config = ConfigFile::open(&path).unwrap();

    config.set_save_on_set(false);
    for name in ["Boar", "Neck", "Greyling"] {
        config.bind(name, "Evasion", 1.0f32, "").unwrap();
    }
    assert!(!path.exists());

    config.save().unwrap();
    config.set_save_on_set(true);

    let written = fs::read_to_string(&path).unwrap();
    for name in ["[Boar]", "[Neck]", "[Greyling]"] {
        assert!(written.contains(name), "missing {name}");
    }
}
