//! Path-addressable configuration documents for ezcfg
//!
//! Parses YAML, JSON and TOML sources into an ordered value tree that can be
//! read and written through dotted paths, and renders it back with optional
//! per-key comments.

pub mod document;
pub mod error;
pub mod format;
pub mod handlers;
pub mod path;

pub use document::Document;
pub use error::{Error, Result};
pub use format::{CommentStyle, Format, FormatHandler};
