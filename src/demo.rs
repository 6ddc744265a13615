//! Built-in demo comic that runs without any image files.
//!
//! Every panel is an image-less placeholder, so the viewer draws them as
//! labelled frames. The layout exercises auto-positioning in all four
//! directions, a blank spacer and a loop back to the start.

use crate::config::{
    build_comic, ComicConfig, ComicSettings, DimsConfig, LoadedComic, PanelDescriptor,
    PositionConfig,
};
use crate::error::ComicError;
use crate::images::FsImageLoader;
use std::path::Path;

fn panel(name: &str, width: u32, height: u32) -> PanelDescriptor {
    PanelDescriptor {
        auto_position: true,
        dims: Some(DimsConfig { width, height }),
        ..PanelDescriptor::new(name)
    }
}

fn link(
    desc: &mut PanelDescriptor,
    up: Option<&str>,
    down: Option<&str>,
    left: Option<&str>,
    right: Option<&str>,
) {
    desc.dirs.up = up.map(str::to_string);
    desc.dirs.down = down.map(str::to_string);
    desc.dirs.left = left.map(str::to_string);
    desc.dirs.right = right.map(str::to_string);
}

/// Describes the demo comic.
///
/// ```text
///            [ sky ]
/// [ title ][ wide    ][gap][ tall ]
///            [ cellar ]
/// ```
pub fn demo_config() -> ComicConfig {
    let mut title = PanelDescriptor {
        root: true,
        position: Some(PositionConfig { x: 0, y: 0 }),
        dims: Some(DimsConfig { width: 800, height: 600 }),
        ..PanelDescriptor::new("title")
    };
    link(&mut title, None, None, None, Some("wide"));

    let mut wide = panel("wide", 1200, 600);
    wide.transition_speed = 20.0;
    link(&mut wide, Some("sky"), Some("cellar"), Some("title"), Some("gap"));

    let mut sky = panel("sky", 600, 300);
    link(&mut sky, None, Some("wide"), None, None);

    let mut cellar = panel("cellar", 600, 900);
    cellar.transition_speed = 15.0;
    link(&mut cellar, Some("wide"), None, None, None);

    let mut gap = panel("gap", 100, 600);
    gap.blank = true;
    link(&mut gap, None, None, Some("wide"), Some("tall"));

    let mut tall = panel("tall", 400, 1200);
    tall.transition_speed = 25.0;
    link(&mut tall, None, None, Some("gap"), Some("title"));

    ComicConfig {
        settings: ComicSettings::default(),
        panels: vec![title, wide, sky, cellar, gap, tall],
    }
}

/// Builds the demo comic.
pub fn load_demo() -> Result<LoadedComic, ComicError> {
    build_comic(demo_config(), Path::new(""), &mut FsImageLoader)
}
