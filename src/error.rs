//! Error types for loading and running a comic.

use crate::types::Direction;
use std::path::PathBuf;
use thiserror::Error;

/// Anything that can stop a comic from loading or the viewer from starting.
#[derive(Debug, Error)]
pub enum ComicError {
    /// A file couldn't be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config file isn't valid JSON for a comic
    #[error("failed to parse comic config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A panel image couldn't be decoded
    #[error("failed to decode image {}: {source}", .path.display())]
    Image {
        /// Image that failed
        path: PathBuf,
        /// Underlying decode error
        #[source]
        source: image::ImageError,
    },

    /// The config parsed but describes a broken panel graph
    #[error("comic config has {} defect(s)", .0.len())]
    InvalidConfig(Vec<ConfigDefect>),

    /// The window couldn't be created
    #[error("failed to start viewer window: {0}")]
    Window(#[from] eframe::Error),
}

/// A problem with the panel graph described by a config file.
///
/// Defects are collected rather than returned one at a time so a broken
/// config can be fixed in a single pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigDefect {
    /// No panel is marked as root
    #[error("couldn't find the root panel; mark exactly one panel as root")]
    NoRoot,

    /// Several panels are marked as root
    #[error("more than one root panel: {}", .0.join(", "))]
    MultipleRoots(Vec<String>),

    /// Two panels share a name
    #[error("duplicate panel name `{0}`")]
    DuplicateName(String),

    /// A neighbor name matches no panel
    #[error("panel `{panel}` points {direction} to unknown panel `{target}`")]
    UnknownNeighbor {
        /// Panel holding the reference
        panel: String,
        /// Direction of the reference
        direction: Direction,
        /// The name that matched nothing
        target: String,
    },

    /// A panel has neither an image nor non-zero dims
    #[error("panel `{0}` has no image and no usable dimensions")]
    MissingDimensions(String),

    /// An auto-positioned panel would be placed outside the `i32` plane
    #[error("panel `{0}` would be placed outside the representable coordinate range")]
    PositionOutOfRange(String),

    /// An auto-positioned panel can't be reached from any placed panel
    #[error("panel `{0}` is auto-positioned but no placed panel leads to it")]
    Unreachable(String),
}
