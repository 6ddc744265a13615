//! Core data types for the comic panel graph.
//!
//! This module defines the panels, their geometry and the four-way adjacency
//! between them. Panels live in an arena owned by [`PanelGraph`] and refer to
//! each other by [`PanelId`]; a name index is built as panels are added so
//! lookups by name never scan the whole graph.

use crate::constants::{DEFAULT_TRANSITION_SPEED, NULL_NEIGHBOR};
use crate::error::ConfigDefect;
use crate::vector::Vector2D;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Stable index of a panel inside a [`PanelGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(usize);

impl PanelId {
    /// Position of the panel in load order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The four cardinal directions a viewer can move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards negative y
    Up,
    /// Towards positive y
    Down,
    /// Towards negative x
    Left,
    /// Towards positive x
    Right,
}

impl Direction {
    /// All directions, in the order the resolver expands them.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Lowercase name, matching the config file keys.
    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// The direction pointing back.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Computes where a panel of size `placed` sits when it lies in this
    /// direction from an anchor at `anchor_pos` with size `anchor_size`.
    ///
    /// Panels placed up or left are offset by their own size; panels placed
    /// down or right are offset by the anchor's size.
    ///
    /// # Returns
    ///
    /// `None` if the result doesn't fit in `i32` coordinates.
    pub fn place(
        self,
        anchor_pos: PanelPosition,
        anchor_size: PanelSize,
        placed: PanelSize,
    ) -> Option<PanelPosition> {
        let PanelPosition { x, y } = anchor_pos;
        let offset = |len: u32| i32::try_from(len).ok();
        let position = match self {
            Direction::Up => PanelPosition::new(x, y.checked_sub(offset(placed.height)?)?),
            Direction::Down => PanelPosition::new(x, y.checked_add(offset(anchor_size.height)?)?),
            Direction::Left => PanelPosition::new(x.checked_sub(offset(placed.width)?)?, y),
            Direction::Right => PanelPosition::new(x.checked_add(offset(anchor_size.width)?)?, y),
        };
        Some(position)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Top-left corner of a panel in the shared plane, in pixels at 1:1 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PanelPosition {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
}

impl PanelPosition {
    /// Creates a position from its coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position as a floating-point vector for camera math.
    pub fn to_vector(self) -> Vector2D {
        Vector2D::new(self.x as f64, self.y as f64)
    }
}

/// Width and height of a panel in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PanelSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl PanelSize {
    /// Creates a size from its sides.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The panel reachable in each direction, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighbors {
    up: Option<PanelId>,
    down: Option<PanelId>,
    left: Option<PanelId>,
    right: Option<PanelId>,
}

impl Neighbors {
    /// The panel in `direction`, if any.
    pub fn get(&self, direction: Direction) -> Option<PanelId> {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Replaces the panel in `direction`.
    pub fn set(&mut self, direction: Direction, panel: Option<PanelId>) {
        let slot = match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        };
        *slot = panel;
    }

    /// Iterates over the directions that lead somewhere.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, PanelId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.get(dir).map(|id| (dir, id)))
    }
}

/// A single named, rectangular panel of the comic.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Unique name, used by the config file to wire neighbors
    pub name: String,
    /// Top-left corner; meaningless until `is_position_resolved` is true
    pub position: PanelPosition,
    /// Size in pixels
    pub size: PanelSize,
    /// Pixels per frame travelled when this panel is the transition destination
    pub transition_speed: f64,
    /// Whether the viewer starts on this panel
    pub is_root: bool,
    /// Whether the panel is drawn at all (false for blank frames)
    pub is_renderable: bool,
    /// Whether `position` holds real coordinates
    pub is_position_resolved: bool,
    /// Adjacent panels by direction
    pub neighbors: Neighbors,
    /// Image file backing this panel, if any
    pub image_path: Option<PathBuf>,
}

impl Panel {
    /// Creates a renderable panel with an authored position.
    ///
    /// # Arguments
    ///
    /// * `name` - Unique name of the panel
    /// * `position` - Top-left corner in world space
    /// * `size` - Width and height in pixels
    pub fn new(name: impl Into<String>, position: PanelPosition, size: PanelSize) -> Self {
        Self {
            name: name.into(),
            position,
            size,
            transition_speed: DEFAULT_TRANSITION_SPEED,
            is_root: false,
            is_renderable: true,
            is_position_resolved: true,
            neighbors: Neighbors::default(),
            image_path: None,
        }
    }

    /// Creates a panel whose position will be derived from its neighbors.
    pub fn auto_positioned(name: impl Into<String>, size: PanelSize) -> Self {
        Self {
            is_position_resolved: false,
            ..Self::new(name, PanelPosition::default(), size)
        }
    }

    /// Whether the panel should be drawn this frame.
    pub fn is_visible(&self) -> bool {
        self.is_renderable && self.is_position_resolved
    }

    /// Whether a transition into this panel would actually move.
    pub fn has_valid_speed(&self) -> bool {
        self.transition_speed.is_finite() && self.transition_speed > 0.0
    }
}

/// The loaded set of panels plus a name index.
///
/// Insertion order is load order, which also fixes the order in which the
/// resolver starts its walks.
#[derive(Debug, Clone, Default)]
pub struct PanelGraph {
    panels: Vec<Panel>,
    by_name: HashMap<String, PanelId>,
}

impl PanelGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a panel to the graph.
    ///
    /// # Returns
    ///
    /// The id of the new panel, or [`ConfigDefect::DuplicateName`] if a panel
    /// with the same name already exists.
    pub fn add_panel(&mut self, panel: Panel) -> Result<PanelId, ConfigDefect> {
        if self.by_name.contains_key(&panel.name) {
            return Err(ConfigDefect::DuplicateName(panel.name));
        }
        let id = PanelId(self.panels.len());
        self.by_name.insert(panel.name.clone(), id);
        self.panels.push(panel);
        Ok(id)
    }

    /// Looks up a panel id by name.
    ///
    /// Unknown names, the empty string and the `"null"` sentinel all yield
    /// `None`; callers treat every one of them as "nowhere to go".
    pub fn panel_id(&self, name: &str) -> Option<PanelId> {
        if name.is_empty() || name == NULL_NEIGHBOR {
            return None;
        }
        self.by_name.get(name).copied()
    }

    /// Looks up a panel by name. See [`PanelGraph::panel_id`].
    pub fn find_panel_by_name(&self, name: &str) -> Option<&Panel> {
        self.panel_id(name).and_then(|id| self.get(id))
    }

    /// The panel with id `id`.
    pub fn get(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(id.0)
    }

    /// Mutable access to the panel with id `id`.
    pub fn get_mut(&mut self, id: PanelId) -> Option<&mut Panel> {
        self.panels.get_mut(id.0)
    }

    /// The panel reached from `id` by moving in `direction`.
    pub fn neighbor(&self, id: PanelId, direction: Direction) -> Option<PanelId> {
        self.get(id).and_then(|panel| panel.neighbors.get(direction))
    }

    /// Wires `target` as the neighbor of `id` in `direction`.
    pub fn set_neighbor(&mut self, id: PanelId, direction: Direction, target: Option<PanelId>) {
        if let Some(panel) = self.get_mut(id) {
            panel.neighbors.set(direction, target);
        }
    }

    /// Iterates over all panels in load order.
    pub fn iter(&self) -> impl Iterator<Item = (PanelId, &Panel)> {
        self.panels.iter().enumerate().map(|(i, p)| (PanelId(i), p))
    }

    /// All panel ids in load order.
    pub fn ids(&self) -> impl Iterator<Item = PanelId> {
        (0..self.panels.len()).map(PanelId)
    }

    /// Every panel flagged as root.
    pub fn roots(&self) -> Vec<PanelId> {
        self.iter()
            .filter(|(_, panel)| panel.is_root)
            .map(|(id, _)| id)
            .collect()
    }

    /// The single root panel, or `None` when there are zero or several.
    pub fn root(&self) -> Option<PanelId> {
        match self.roots().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Number of panels.
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Whether the graph has no panels.
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}
