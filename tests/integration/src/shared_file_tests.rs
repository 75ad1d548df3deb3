//! Several persisted types sharing one configuration file

use std::fs;

use ezcfg_core::{CfgField, ConfigSync, FieldSet, Persisted, SyncOptions, SyncSettings};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq)]
struct Audio {
    volume: f64,
    muted: bool,
}

impl Default for Audio {
    fn default() -> Self {
        Self {
            volume: 0.8,
            muted: false,
        }
    }
}

impl Persisted for Audio {
    fn declare(fields: &mut FieldSet<Self>) {
        fields
            .field("volume", |a| &a.volume, |a| &mut a.volume, CfgField::auto().path("audio.volume"))
            .field("muted", |a| &a.muted, |a| &mut a.muted, CfgField::auto().path("audio.muted"));
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Video {
    width: u32,
    height: u32,
}

impl Default for Video {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl Persisted for Video {
    fn declare(fields: &mut FieldSet<Self>) {
        fields
            .field("width", |v| &v.width, |v| &mut v.width, CfgField::auto().path("video.width"))
            .field("height", |v| &v.height, |v| &mut v.height, CfgField::auto().path("video.height"));
    }
}

#[test]
fn test_sections_coexist() {
    let temp = TempDir::new().unwrap();
    let sync = ConfigSync::new(temp.path());

    sync.load(&mut Audio::default()).unwrap();
    sync.load(&mut Video::default()).unwrap();

    assert_eq!(
        fs::read_to_string(temp.path().join("config.yml")).unwrap(),
        "audio:\n  volume: 0.8\n  muted: false\nvideo:\n  width: 1920\n  height: 1080\n"
    );
}

#[test]
fn test_saving_one_section_keeps_the_other() {
    let temp = TempDir::new().unwrap();
    let sync = ConfigSync::new(temp.path());
    let mut audio = Audio::default();
    let mut video = Video::default();
    sync.load(&mut audio).unwrap();
    sync.load(&mut video).unwrap();

    video.width = 1280;
    sync.save(&video).unwrap();

    let mut reloaded_audio = Audio {
        volume: 0.0,
        muted: true,
    };
    let report = sync.load(&mut reloaded_audio).unwrap();
    assert!(!report.changed);
    assert_eq!(reloaded_audio, audio);

    let mut reloaded_video = Video::default();
    sync.load(&mut reloaded_video).unwrap();
    assert_eq!(reloaded_video.width, 1280);
}

#[test]
fn test_hosts_with_different_settings() {
    let temp = TempDir::new().unwrap();
    let quiet = ConfigSync::from_settings(SyncSettings {
        base_dir: temp.path().to_path_buf(),
        default_file: "quiet.toml".to_string(),
        options: SyncOptions {
            auto_persist_on_load: false,
            write_comments: false,
        },
    });

    let report = quiet.load(&mut Audio::default()).unwrap();
    assert!(report.changed);
    assert_eq!(fs::read_to_string(temp.path().join("quiet.toml")).unwrap(), "");

    quiet.save(&Audio::default()).unwrap();
    assert_eq!(
        fs::read_to_string(temp.path().join("quiet.toml")).unwrap(),
        "[audio]\nvolume = 0.8\nmuted = false\n"
    );
}
