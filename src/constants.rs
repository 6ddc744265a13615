//! Shared application-wide constants.
//! Centralizes tweakable values used by the loader, the camera and the viewer window.

// Window
/// Base window title; the crate version is appended at runtime.
pub const WINDOW_TITLE: &str = "InfScroll-Comic";
/// Default window width in logical pixels when not in fullscreen.
pub const DEFAULT_WINDOW_WIDTH: f32 = 800.0;
/// Default window height in logical pixels when not in fullscreen.
pub const DEFAULT_WINDOW_HEIGHT: f32 = 600.0;

// Frame pacing
/// Target number of logical frames per second.
pub const DEFAULT_FRAMES_PER_SECOND: f64 = 60.0;
/// Upper bound on logical frames run in a single repaint after a stall.
pub const MAX_CATCHUP_FRAMES: u32 = 4;
/// Logical frames to wait between two fullscreen toggles.
pub const FULLSCREEN_COOLDOWN_FRAMES: u32 = 30;

// Panels
/// Transition speed (pixels per frame) used when a panel doesn't configure one.
pub const DEFAULT_TRANSITION_SPEED: f64 = 10.0;
/// Neighbor name that explicitly means "no panel in this direction".
pub const NULL_NEIGHBOR: &str = "null";
/// Name of the panel that gets the colour-cycling treatment.
pub const EASTER_EGG_PANEL: &str = "rickastley";

// Camera
/// Scale returned when there is nothing sensible to fit.
pub const NEUTRAL_SCALE: f64 = 1.0;
/// Remaining distances below this are treated as "already there".
pub const MIN_REMAINING_DISTANCE: f64 = 1e-9;

/// Config file read when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "Comic.json";
