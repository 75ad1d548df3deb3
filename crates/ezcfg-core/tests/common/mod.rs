//! Persisted types shared by the ezcfg-core integration tests

#![allow(dead_code)]

use std::cell::RefCell;

use ezcfg_core::{
    AccessError, CfgField, DeclaredType, FieldError, FieldSet, FieldType, NormalizedPath,
    Persisted, SyncHooks, TypeTag,
};
use serde::{Deserialize, Serialize};

/// Two fields, one with an explicit path, type and comment
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub volume: f64,
    pub label: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: 1.0,
            label: "default".to_string(),
        }
    }
}

impl Persisted for Settings {
    fn declare(fields: &mut FieldSet<Self>) {
        fields
            .field("volume", |s| &s.volume, |s| &mut s.volume, CfgField::auto())
            .field(
                "label",
                |s| &s.label,
                |s| &mut s.label,
                CfgField::auto()
                    .path("display.label")
                    .typed(TypeTag::String)
                    .comment("Shown in the title bar"),
            );
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Base {
    pub id: i32,
}

impl Persisted for Base {
    fn declare(fields: &mut FieldSet<Self>) {
        fields.field("id", |b| &b.id, |b| &mut b.id, CfgField::auto());
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Middle {
    pub base: Base,
    pub speed: f32,
}

impl Persisted for Middle {
    fn declare(fields: &mut FieldSet<Self>) {
        // Inherited first on purpose: own fields must still come first
        fields
            .inherit(|m: &Middle| &m.base, |m: &mut Middle| &mut m.base)
            .field("speed", |m| &m.speed, |m| &mut m.speed, CfgField::auto());
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Leaf {
    pub middle: Middle,
    pub name: String,
    pub tags: Vec<String>,
}

impl Persisted for Leaf {
    fn declare(fields: &mut FieldSet<Self>) {
        fields
            .field("name", |l| &l.name, |l| &mut l.name, CfgField::auto())
            .field("tags", |l| &l.tags, |l| &mut l.tags, CfgField::auto().path("meta.tags"))
            .inherit(|l: &Leaf| &l.middle, |l: &mut Leaf| &mut l.middle);
    }
}

/// An own field stored at the same path as the inherited `Base.id`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collide {
    pub alias: i32,
    pub base: Base,
}

impl Persisted for Collide {
    fn declare(fields: &mut FieldSet<Self>) {
        fields
            .field("alias", |c| &c.alias, |c| &mut c.alias, CfgField::auto().path("id"))
            .inherit(|c: &Collide| &c.base, |c: &mut Collide| &mut c.base);
    }
}

/// A type whose `secret` accessor fails while `locked` is set
#[derive(Debug, Clone, PartialEq)]
pub struct Guarded {
    pub locked: bool,
    pub secret: String,
    pub volume: f64,
}

impl Guarded {
    pub fn locked() -> Self {
        Self {
            locked: true,
            secret: "hidden".to_string(),
            volume: 0.5,
        }
    }
}

impl Persisted for Guarded {
    fn declare(fields: &mut FieldSet<Self>) {
        fields
            .field_with(
                "secret",
                |g: &Guarded| {
                    if g.locked {
                        Err(AccessError::new("field is locked"))
                    } else {
                        Ok(g.secret.clone())
                    }
                },
                |g: &mut Guarded, value: String| {
                    if g.locked {
                        return Err(AccessError::new("field is locked"));
                    }
                    g.secret = value;
                    Ok(())
                },
                CfgField::auto(),
            )
            .field("volume", |g| &g.volume, |g| &mut g.volume, CfgField::auto());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Fast,
    Slow,
}

impl FieldType for Mode {
    fn declared_type() -> DeclaredType {
        DeclaredType::Enum {
            name: "Mode",
            variants: &["Fast", "Slow"],
        }
    }
}

/// Optional, enumerated and small-integer fields
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub nickname: Option<String>,
    pub mode: Mode,
    pub retries: u8,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            nickname: None,
            mode: Mode::Fast,
            retries: 3,
        }
    }
}

impl Persisted for Profile {
    fn declare(fields: &mut FieldSet<Self>) {
        fields
            .field("nickname", |p| &p.nickname, |p| &mut p.nickname, CfgField::auto())
            .field("mode", |p| &p.mode, |p| &mut p.mode, CfgField::auto())
            .field("retries", |p| &p.retries, |p| &mut p.retries, CfgField::auto());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl FieldType for Point {
    fn declared_type() -> DeclaredType {
        DeclaredType::Other("Point")
    }
}

/// `origin` has no built-in strategy unless one is declared
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub origin: Point,
    pub scale: f64,
}

impl Default for Shape {
    fn default() -> Self {
        Self {
            origin: Point::default(),
            scale: 2.0,
        }
    }
}

impl Persisted for Shape {
    fn declare(fields: &mut FieldSet<Self>) {
        fields
            .field("origin", |s| &s.origin, |s| &mut s.origin, CfgField::auto())
            .field("scale", |s| &s.scale, |s| &mut s.scale, CfgField::auto());
    }
}

/// Shape with the same point field declared as a map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedShape {
    pub origin: Point,
}

impl Persisted for MappedShape {
    fn declare(fields: &mut FieldSet<Self>) {
        fields.field(
            "origin",
            |s| &s.origin,
            |s| &mut s.origin,
            CfgField::auto().typed(TypeTag::Map),
        );
    }
}

/// A field stored in a sequence element that may not exist
#[derive(Debug, Clone, PartialEq)]
pub struct Slotted {
    pub first: String,
}

impl Persisted for Slotted {
    fn declare(fields: &mut FieldSet<Self>) {
        fields.field("first", |s| &s.first, |s| &mut s.first, CfgField::auto().path("slots[0]"));
    }
}

/// Hooks that record every event as a short string
#[derive(Debug, Default)]
pub struct RecordingHooks {
    pub events: RefCell<Vec<String>>,
}

impl RecordingHooks {
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    fn record(&self, event: String) {
        self.events.borrow_mut().push(event);
    }
}

impl SyncHooks for RecordingHooks {
    fn on_dir_created(&self, _path: &NormalizedPath) {
        self.record("dir_created".to_string());
    }

    fn on_file_created(&self, _path: &NormalizedPath) {
        self.record("file_created".to_string());
    }

    fn on_field_read_error(&self, error: &FieldError) {
        self.record(format!("read:{}", error.field()));
    }

    fn on_field_write_error(&self, error: &FieldError) {
        self.record(format!("write:{}", error.field()));
    }

    fn on_field_copy_error(&self, error: &FieldError) {
        self.record(format!("copy:{}", error.field()));
    }

    fn on_unsupported_field(&self, error: &FieldError) {
        self.record(format!("unsupported:{}", error.field()));
    }
}
