//! Viewer state management structures.
//!
//! This module contains the main [`ComicApp`] plus the smaller pieces of state
//! it drives every frame: frame pacing and the fullscreen toggle.

use super::input::HeldDirections;
use super::textures::PanelTextures;
use crate::camera::{Camera, ViewerFrame};
use crate::config::{ComicSettings, LoadedComic};
use crate::constants::{
    DEFAULT_FRAMES_PER_SECOND, EASTER_EGG_PANEL, MAX_CATCHUP_FRAMES, WINDOW_TITLE,
};
use crate::error::{ComicError, ConfigDefect};
use crate::scaling::Viewport;
use crate::types::{PanelGraph, PanelId};
use eframe::egui;

/// Fixed-step frame pacing.
///
/// Transition speeds are in pixels per logical frame, so the viewer turns
/// real elapsed time into a whole number of logical frames.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameClock {
    interval: f64,
    accumulator: f64,
}

impl FrameClock {
    /// Creates a clock ticking `frames_per_second` times a second.
    ///
    /// Nonsensical rates fall back to the default.
    pub fn new(frames_per_second: f64) -> Self {
        let fps = if frames_per_second.is_finite() && frames_per_second > 0.0 {
            frames_per_second
        } else {
            DEFAULT_FRAMES_PER_SECOND
        };
        Self {
            interval: 1.0 / fps,
            accumulator: 0.0,
        }
    }

    /// Seconds per logical frame.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Adds `dt` seconds of real time.
    ///
    /// # Returns
    ///
    /// How many logical frames to run now, at most [`MAX_CATCHUP_FRAMES`].
    /// Time beyond that is dropped rather than replayed later.
    pub fn tick(&mut self, dt: f64) -> u32 {
        if dt.is_finite() && dt > 0.0 {
            self.accumulator += dt;
        }
        let mut frames = 0;
        while self.accumulator >= self.interval && frames < MAX_CATCHUP_FRAMES {
            self.accumulator -= self.interval;
            frames += 1;
        }
        if frames == MAX_CATCHUP_FRAMES {
            self.accumulator = self.accumulator.min(self.interval);
        }
        frames
    }
}

/// Fullscreen flag and the cooldown between toggles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FullscreenState {
    /// Whether the window is currently fullscreen
    pub enabled: bool,
    /// Logical frames left before the next toggle is accepted
    pub cooldown: u32,
}

/// Builds the window title, flagging comics with the easter egg panel.
pub fn window_title(graph: &PanelGraph) -> String {
    let base = format!("{} {}", WINDOW_TITLE, env!("CARGO_PKG_VERSION"));
    if graph.panel_id(EASTER_EGG_PANEL).is_some() {
        format!("{base} - This comic is Astley-enabled!")
    } else {
        base
    }
}

/// The comic viewer application.
///
/// This struct implements the `eframe::App` trait; each repaint it reads
/// input, runs the due logical frames and draws the visible panels.
pub struct ComicApp {
    /// All panels, positions resolved
    pub graph: PanelGraph,
    /// Viewer position, zoom and transition state
    pub camera: Camera,
    /// Settings from the config file
    pub settings: ComicSettings,
    /// Textures for panels with images
    pub textures: PanelTextures,
    /// Fullscreen flag and toggle cooldown
    pub fullscreen: FullscreenState,
    /// Turns repaint timing into logical frames
    pub clock: FrameClock,
    /// Panel that gets the colour-cycling tint, if the comic has one
    pub easter_egg: Option<PanelId>,
    /// Current tint of the easter egg panel
    pub easter_egg_tint: egui::Color32,
    /// Logical frames run so far
    pub frame_counter: u64,
    /// Whether textures have already been released
    pub shut_down: bool,
}

impl ComicApp {
    /// Creates the viewer for a loaded comic, uploading its images.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context textures are uploaded to
    /// * `comic` - The validated comic
    ///
    /// # Returns
    ///
    /// The app, or an error if the comic's root panel is missing.
    pub fn new(ctx: &egui::Context, comic: LoadedComic) -> Result<Self, ComicError> {
        let LoadedComic {
            graph,
            root,
            images,
            settings,
        } = comic;

        let viewport = Viewport::new(settings.window_width as f64, settings.window_height as f64);
        let camera = Camera::new(&graph, root, viewport)
            .ok_or_else(|| ComicError::InvalidConfig(vec![ConfigDefect::NoRoot]))?;
        let textures = PanelTextures::upload(ctx, &graph, images);
        let easter_egg = graph.panel_id(EASTER_EGG_PANEL);

        Ok(Self {
            clock: FrameClock::new(settings.frames_per_second),
            graph,
            camera,
            settings,
            textures,
            fullscreen: FullscreenState::default(),
            easter_egg,
            easter_egg_tint: egui::Color32::WHITE,
            frame_counter: 0,
            shut_down: false,
        })
    }

    /// Feeds the current drawable size to the camera.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.camera.resize(&self.graph, viewport);
    }

    /// Runs one logical frame: cooldowns, navigation, camera, cosmetics.
    pub fn step_frame(&mut self, held: HeldDirections) -> ViewerFrame {
        self.frame_counter += 1;
        self.fullscreen.cooldown = self.fullscreen.cooldown.saturating_sub(1);

        if !self.camera.is_transitioning() {
            if let Some(direction) = held.preferred() {
                self.camera.on_directional_input(&self.graph, direction);
            }
        }
        let frame = self.camera.advance_frame(&self.graph);

        if self.easter_egg.is_some() {
            self.cycle_easter_egg_tint();
        }
        frame
    }

    /// Whether a fullscreen toggle would be accepted right now.
    pub fn can_toggle_fullscreen(&self) -> bool {
        !self.camera.is_transitioning() && self.fullscreen.cooldown == 0
    }

    /// Flips the fullscreen flag if allowed.
    ///
    /// # Returns
    ///
    /// The viewport commands to send, empty if the toggle was refused.
    pub fn toggle_fullscreen(&mut self) -> Vec<egui::ViewportCommand> {
        if !self.can_toggle_fullscreen() {
            return Vec::new();
        }
        self.fullscreen.enabled = !self.fullscreen.enabled;
        self.fullscreen.cooldown = self.settings.fullscreen_cooldown_frames;
        log::info!("Fullscreen {}", if self.fullscreen.enabled { "on" } else { "off" });

        let mut commands = vec![egui::ViewportCommand::Fullscreen(self.fullscreen.enabled)];
        if !self.fullscreen.enabled {
            commands.push(egui::ViewportCommand::InnerSize(egui::vec2(
                self.settings.window_width,
                self.settings.window_height,
            )));
        }
        commands
    }

    /// Tint to draw `id` with.
    pub fn tint_for(&self, id: PanelId) -> egui::Color32 {
        if self.easter_egg == Some(id) {
            self.easter_egg_tint
        } else {
            egui::Color32::WHITE
        }
    }

    /// Randomizes one colour channel of the easter egg tint.
    fn cycle_easter_egg_tint(&mut self) {
        let roll = getrandom::u32().unwrap_or_default();
        let value = (roll >> 8) as u8;
        let tint = self.easter_egg_tint;
        self.easter_egg_tint = match roll % 3 {
            0 => egui::Color32::from_rgb(value, tint.g(), tint.b()),
            1 => egui::Color32::from_rgb(tint.r(), value, tint.b()),
            _ => egui::Color32::from_rgb(tint.r(), tint.g(), value),
        };
    }

    /// Releases every panel texture. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        log::info!("Freeing images...");
        self.textures.release_all(&self.graph);
        self.shut_down = true;
    }
}

impl Drop for ComicApp {
    fn drop(&mut self) {
        self.shutdown();
    }
}
