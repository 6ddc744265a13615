//! # InfScroll Comic
//!
//! A viewer for comics laid out as a graph of image panels on an implicit 2D
//! grid. The viewer rests on one panel at a time and glides to a neighboring
//! panel when an arrow key is held, easing both position and zoom so every
//! panel fills the window.
//!
//! ## Features
//! - Panels wired up, down, left and right by name in a JSON config
//! - Automatic positioning of panels from their already-placed neighbors
//! - Smooth panel-to-panel transitions that always land exactly on target
//! - Fit-to-window zoom, fullscreen toggle and a built-in demo comic

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod camera;
pub mod config;
pub mod constants;
pub mod demo;
pub mod error;
pub mod images;
pub mod positioning;
pub mod scaling;
pub mod types;
pub mod vector;
mod ui;

// Re-export public types and functions
pub use camera::{Camera, CameraState, ViewerFrame};
pub use config::{build_comic, load_comic, ComicConfig, ComicSettings, LoadedComic};
pub use demo::load_demo;
pub use error::{ComicError, ConfigDefect};
pub use positioning::{resolve_all_positions, ResolveReport};
pub use scaling::{compute_fit_scale, fit_scale, Viewport};
pub use types::*;
pub use ui::{
    panel_screen_rect, window_title, ComicApp, FrameClock, FrameInput, FullscreenState,
    HeldDirections, PanelTextures,
};
pub use vector::Vector2D;

use eframe::egui;

/// Opens the viewer window for a loaded comic and runs until it is closed.
///
/// # Returns
///
/// `Ok(())` once the window closes, or [`ComicError::Window`] if the window
/// could not be created.
///
/// # Example
///
/// ```no_run
/// use infscroll_comic::{load_demo, run_app, ComicError};
///
/// fn main() -> Result<(), ComicError> {
///     run_app(load_demo()?)
/// }
/// ```
pub fn run_app(comic: LoadedComic) -> Result<(), ComicError> {
    let title = window_title(&comic.graph);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([comic.settings.window_width, comic.settings.window_height])
            .with_title(title.clone()),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| {
            let app = ComicApp::new(&cc.egui_ctx, comic).map_err(
                |err| -> Box<dyn std::error::Error + Send + Sync> { err.to_string().into() },
            )?;
            Ok(Box::new(app))
        }),
    )?;
    Ok(())
}
