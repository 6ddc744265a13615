//! Comic configuration files.
//!
//! A comic is described by a JSON file listing its panels, how they connect
//! and a few viewer settings. Loading turns that description into a
//! validated [`PanelGraph`] with every position resolved, or a list of
//! everything that is wrong with it.

use crate::constants::{
    DEFAULT_FRAMES_PER_SECOND, DEFAULT_TRANSITION_SPEED, DEFAULT_WINDOW_HEIGHT,
    DEFAULT_WINDOW_WIDTH, FULLSCREEN_COOLDOWN_FRAMES, NULL_NEIGHBOR,
};
use crate::error::{ComicError, ConfigDefect};
use crate::images::{DecodedImage, FsImageLoader, ImageLoader};
use crate::positioning::resolve_all_positions;
use crate::types::{Direction, Panel, PanelGraph, PanelId, PanelPosition, PanelSize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Viewer settings that can be tweaked per comic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComicSettings {
    /// Window width when not fullscreen
    pub window_width: f32,
    /// Window height when not fullscreen
    pub window_height: f32,
    /// Logical frames per second; transition speeds are per logical frame
    pub frames_per_second: f64,
    /// Logical frames between two fullscreen toggles
    pub fullscreen_cooldown_frames: u32,
}

impl Default for ComicSettings {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            frames_per_second: DEFAULT_FRAMES_PER_SECOND,
            fullscreen_cooldown_frames: FULLSCREEN_COOLDOWN_FRAMES,
        }
    }
}

/// Explicit `x`/`y` of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionConfig {
    /// Left edge in world pixels
    pub x: i32,
    /// Top edge in world pixels
    pub y: i32,
}

/// Explicit `width`/`height` of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimsConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Names of the neighboring panels, one per direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeighborNames {
    /// Panel above
    pub up: Option<String>,
    /// Panel below
    pub down: Option<String>,
    /// Panel to the left
    pub left: Option<String>,
    /// Panel to the right
    pub right: Option<String>,
}

impl NeighborNames {
    /// The neighbor named for `direction`, with `"null"` and `""` read as none.
    pub fn get(&self, direction: Direction) -> Option<&str> {
        let name = match direction {
            Direction::Up => self.up.as_deref(),
            Direction::Down => self.down.as_deref(),
            Direction::Left => self.left.as_deref(),
            Direction::Right => self.right.as_deref(),
        }?;
        (!name.is_empty() && name != NULL_NEIGHBOR).then_some(name)
    }
}

fn default_transition_speed() -> f64 {
    DEFAULT_TRANSITION_SPEED
}

/// One panel as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelDescriptor {
    /// Unique name of the panel
    pub name: String,
    /// Top-left corner; ignored for auto-positioned panels
    #[serde(default)]
    pub position: Option<PositionConfig>,
    /// Speed when travelling TO this panel, in pixels per frame
    #[serde(default = "default_transition_speed", alias = "vel")]
    pub transition_speed: f64,
    /// Whether the viewer starts here
    #[serde(default)]
    pub root: bool,
    /// Blank panels take up space but are never drawn
    #[serde(default)]
    pub blank: bool,
    /// Whether the position is derived from neighboring panels
    #[serde(default, alias = "autopos")]
    pub auto_position: bool,
    /// Size for panels without an image
    #[serde(default)]
    pub dims: Option<DimsConfig>,
    /// Image file, relative to the config file
    #[serde(default, alias = "filename")]
    pub image: Option<PathBuf>,
    /// Neighboring panels
    #[serde(default)]
    pub dirs: NeighborNames,
}

impl PanelDescriptor {
    /// Creates a descriptor with every optional field left at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: None,
            transition_speed: DEFAULT_TRANSITION_SPEED,
            root: false,
            blank: false,
            auto_position: false,
            dims: None,
            image: None,
            dirs: NeighborNames::default(),
        }
    }
}

/// The whole config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComicConfig {
    /// Window and timing settings
    #[serde(default)]
    pub settings: ComicSettings,
    /// Panels in load order
    pub panels: Vec<PanelDescriptor>,
}

impl ComicConfig {
    /// Serialize the config to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a config from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads and parses a config file.
    pub fn read(path: &Path) -> Result<Self, ComicError> {
        let json = std::fs::read_to_string(path).map_err(|source| ComicError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded file {} with {} panel(s)", path.display(), config.panels.len());
        Ok(config)
    }
}

/// A validated comic, ready to be viewed.
#[derive(Debug, Clone)]
pub struct LoadedComic {
    /// All panels with resolved positions
    pub graph: PanelGraph,
    /// Where the viewer starts
    pub root: PanelId,
    /// Decoded images for the renderable panels that have one
    pub images: HashMap<PanelId, DecodedImage>,
    /// Viewer settings
    pub settings: ComicSettings,
}

/// Loads a comic from a config file, decoding images from disk.
pub fn load_comic(path: &Path) -> Result<LoadedComic, ComicError> {
    let config = ComicConfig::read(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    build_comic(config, base_dir, &mut FsImageLoader)
}

/// Builds a comic from a parsed config.
///
/// # Arguments
///
/// * `config` - The parsed config file
/// * `base_dir` - Directory image paths are relative to
/// * `loader` - Where image pixels come from
///
/// # Returns
///
/// The loaded comic, or [`ComicError::InvalidConfig`] listing every defect
/// found. Image decoding failures are returned as they happen.
pub fn build_comic(
    config: ComicConfig,
    base_dir: &Path,
    loader: &mut dyn ImageLoader,
) -> Result<LoadedComic, ComicError> {
    let mut graph = PanelGraph::new();
    let mut images = HashMap::new();
    let mut defects = Vec::new();
    let mut ids = Vec::with_capacity(config.panels.len());

    for descriptor in &config.panels {
        let image = load_panel_image(descriptor, base_dir, loader)?;
        let Some(size) = panel_size(descriptor, image.as_ref()) else {
            defects.push(ConfigDefect::MissingDimensions(descriptor.name.clone()));
            ids.push(None);
            continue;
        };

        let panel = panel_from_descriptor(descriptor, size, base_dir);
        if !panel.has_valid_speed() {
            log::warn!(
                "Panel {} has transition speed {}; moving to it will be instant",
                panel.name,
                panel.transition_speed
            );
        }

        match graph.add_panel(panel) {
            Ok(id) => {
                log::info!("Loaded panel {}", descriptor.name);
                if let Some(image) = image.filter(|_| !descriptor.blank) {
                    images.insert(id, image);
                }
                ids.push(Some(id));
            }
            Err(defect) => {
                defects.push(defect);
                ids.push(None);
            }
        }
    }

    wire_neighbors(&config, &ids, &mut graph, &mut defects);

    let roots = graph.roots();
    let root = match roots.as_slice() {
        [only] => Some(*only),
        [] => {
            defects.push(ConfigDefect::NoRoot);
            None
        }
        several => {
            let names = several
                .iter()
                .filter_map(|id| graph.get(*id))
                .map(|panel| panel.name.clone())
                .collect();
            defects.push(ConfigDefect::MultipleRoots(names));
            None
        }
    };

    let report = resolve_all_positions(&mut graph);
    for id in &report.unresolved {
        let Some(panel) = graph.get(*id) else {
            continue;
        };
        let name = panel.name.clone();
        if report.out_of_range.contains(id) {
            defects.push(ConfigDefect::PositionOutOfRange(name));
        } else {
            defects.push(ConfigDefect::Unreachable(name));
        }
    }

    match root {
        Some(root) if defects.is_empty() => Ok(LoadedComic {
            graph,
            root,
            images,
            settings: config.settings,
        }),
        _ => Err(ComicError::InvalidConfig(defects)),
    }
}

/// Decodes the panel's image when its pixels or its size are needed.
fn load_panel_image(
    descriptor: &PanelDescriptor,
    base_dir: &Path,
    loader: &mut dyn ImageLoader,
) -> Result<Option<DecodedImage>, ComicError> {
    let Some(image_path) = &descriptor.image else {
        return Ok(None);
    };
    // Blank panels with explicit dims never need the pixels.
    if descriptor.blank && descriptor.dims.is_some() {
        return Ok(None);
    }
    loader.load(&base_dir.join(image_path)).map(Some)
}

/// Image size for panels with an image, configured dims otherwise.
fn panel_size(descriptor: &PanelDescriptor, image: Option<&DecodedImage>) -> Option<PanelSize> {
    let size = match (image, descriptor.dims) {
        (Some(image), _) => PanelSize::new(image.width, image.height),
        (None, Some(dims)) => PanelSize::new(dims.width, dims.height),
        (None, None) => return None,
    };
    (!size.is_empty()).then_some(size)
}

fn panel_from_descriptor(descriptor: &PanelDescriptor, size: PanelSize, base_dir: &Path) -> Panel {
    let mut panel = if descriptor.auto_position {
        Panel::auto_positioned(descriptor.name.clone(), size)
    } else {
        let position = descriptor
            .position
            .map(|p| PanelPosition::new(p.x, p.y))
            .unwrap_or_default();
        Panel::new(descriptor.name.clone(), position, size)
    };
    panel.transition_speed = descriptor.transition_speed;
    panel.is_root = descriptor.root;
    panel.is_renderable = !descriptor.blank;
    panel.image_path = descriptor.image.as_ref().map(|p| base_dir.join(p));
    panel
}

/// Resolves neighbor names to ids, recording names that match no panel.
fn wire_neighbors(
    config: &ComicConfig,
    ids: &[Option<PanelId>],
    graph: &mut PanelGraph,
    defects: &mut Vec<ConfigDefect>,
) {
    for (descriptor, id) in config.panels.iter().zip(ids) {
        let Some(id) = *id else {
            continue;
        };
        for direction in Direction::ALL {
            let Some(target) = descriptor.dirs.get(direction) else {
                continue;
            };
            match graph.panel_id(target) {
                Some(target_id) => graph.set_neighbor(id, direction, Some(target_id)),
                None => defects.push(ConfigDefect::UnknownNeighbor {
                    panel: descriptor.name.clone(),
                    direction,
                    target: target.to_string(),
                }),
            }
        }
    }
}
