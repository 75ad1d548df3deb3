//! End-to-end lifecycle of a plugin's configuration file
//!
//! First run writes defaults, the user edits the file by hand, the next run
//! picks the edits up and restores what was deleted, and saves only touch
//! what the program changed.

use std::collections::BTreeMap;
use std::fs;

use ezcfg_core::{CfgField, ConfigSync, FieldSet, Persisted, TypeTag};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq)]
struct PluginBase {
    enabled: bool,
}

impl Default for PluginBase {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Persisted for PluginBase {
    fn declare(fields: &mut FieldSet<Self>) {
        fields.field(
            "enabled",
            |b| &b.enabled,
            |b| &mut b.enabled,
            CfgField::auto().comment("Disable to skip loading the plugin"),
        );
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ArenaSettings {
    base: PluginBase,
    arena_name: String,
    max_players: u16,
    rewards: BTreeMap<String, u32>,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            base: PluginBase::default(),
            arena_name: "Colosseum".to_string(),
            max_players: 8,
            rewards: BTreeMap::from([("gold".to_string(), 10), ("xp".to_string(), 50)]),
        }
    }
}

impl Persisted for ArenaSettings {
    fn declare(fields: &mut FieldSet<Self>) {
        fields
            .field(
                "arena_name",
                |s| &s.arena_name,
                |s| &mut s.arena_name,
                CfgField::auto().path("arena.name"),
            )
            .field(
                "max_players",
                |s| &s.max_players,
                |s| &mut s.max_players,
                CfgField::auto()
                    .path("arena.max-players")
                    .comment("Players per match")
                    .comment("")
                    .comment("Values above 64 are not supported"),
            )
            .field(
                "rewards",
                |s| &s.rewards,
                |s| &mut s.rewards,
                CfgField::auto().typed(TypeTag::Map),
            )
            .inherit(|s: &ArenaSettings| &s.base, |s: &mut ArenaSettings| &mut s.base);
    }
}

const DEFAULTS: &str = "\
arena:
  name: Colosseum
  # Players per match
  #
  # Values above 64 are not supported
  max-players: 8
rewards:
  gold: 10
  xp: 50
# Disable to skip loading the plugin
enabled: true
";

#[test]
fn test_first_run_writes_defaults() {
    let temp = TempDir::new().unwrap();
    let sync = ConfigSync::new(temp.path().join("plugins/arena"));
    let mut settings = ArenaSettings::default();

    let report = sync.load(&mut settings).unwrap();

    assert!(report.changed);
    assert!(report.is_clean());
    assert_eq!(settings, ArenaSettings::default());
    assert_eq!(
        fs::read_to_string(temp.path().join("plugins/arena/config.yml")).unwrap(),
        DEFAULTS
    );
}

#[test]
fn test_hand_edits_are_loaded_and_deletions_restored() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.yml");
    fs::write(
        &path,
        "arena:\n  name: Pit\nrewards:\n  gold: 99\nenabled: false\nunrelated: kept\n",
    )
    .unwrap();
    let sync = ConfigSync::new(temp.path());
    let mut settings = ArenaSettings::default();

    let report = sync.load(&mut settings).unwrap();

    assert_eq!(report.touched, vec!["arena.max-players"]);
    assert_eq!(settings.arena_name, "Pit");
    assert_eq!(settings.rewards, BTreeMap::from([("gold".to_string(), 99)]));
    assert!(!settings.base.enabled);
    assert_eq!(settings.max_players, 8);

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("unrelated: kept\n"));
    assert!(written.contains("  max-players: 8\n"));
}

#[test]
fn test_program_changes_are_saved_and_reloaded() {
    let temp = TempDir::new().unwrap();
    let sync = ConfigSync::new(temp.path());

    let mut settings = ArenaSettings::default();
    sync.load(&mut settings).unwrap();

    settings.max_players = 16;
    settings.rewards.insert("gems".to_string(), 1);
    let report = sync.save(&settings).unwrap();
    assert_eq!(report.touched, vec!["arena.max-players", "rewards"]);

    let mut reloaded = ArenaSettings::default();
    let report = sync.load(&mut reloaded).unwrap();
    assert!(!report.changed);
    assert_eq!(reloaded, settings);

    assert!(!sync.save(&reloaded).unwrap().changed);
}

#[test]
fn test_copy_then_save_elsewhere() {
    let temp = TempDir::new().unwrap();
    let sync = ConfigSync::new(temp.path());

    let mut live = ArenaSettings::default();
    live.arena_name = "Dome".to_string();
    live.base.enabled = false;

    let mut snapshot = ArenaSettings::default();
    let copied = sync.copy_from(&mut snapshot, &live);
    assert_eq!(copied.touched, vec!["arena_name", "enabled"]);

    sync.save_to(&snapshot, "backup/arena.json").unwrap();
    let stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("backup/arena.json")).unwrap())
            .unwrap();
    assert_eq!(stored["arena"]["name"], "Dome");
    assert_eq!(stored["enabled"], false);
    assert_eq!(stored["rewards"]["xp"], 50);
}
