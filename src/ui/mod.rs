//! The comic viewer window.
//!
//! This module contains the eframe application that reads keyboard input,
//! runs logical frames through the camera and draws the panels.
//!
//! # Module Organization
//!
//! - `input` - Arrow keys, quit and fullscreen requests captured per repaint
//! - `state` - The main ComicApp, frame pacing and fullscreen state
//! - `textures` - Panel images uploaded as egui textures
//! - `rendering` - Drawing panels relative to the camera

mod input;
mod rendering;
mod state;
mod textures;

pub use input::{FrameInput, HeldDirections};
pub use rendering::panel_screen_rect;
pub use state::{window_title, ComicApp, FrameClock, FullscreenState};
pub use textures::PanelTextures;

use crate::scaling::Viewport;
use eframe::egui;
use std::time::Duration;

impl eframe::App for ComicApp {
    /// Main update function called by egui for each repaint.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.run_ui(ctx);
    }
}

impl ComicApp {
    /// One repaint: input, then the due logical frames, then drawing.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context
    pub fn run_ui(&mut self, ctx: &egui::Context) {
        let input = FrameInput::capture(ctx);

        if input.quit || input.close_requested {
            self.shutdown();
            if input.quit {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
            return;
        }

        if input.toggle_fullscreen {
            for command in self.toggle_fullscreen() {
                ctx.send_viewport_cmd(command);
            }
        }

        let dt = ctx.input(|i| i.stable_dt) as f64;
        let frames = self.clock.tick(dt);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                self.set_viewport(Viewport::from_rect(ui.max_rect()));
                for _ in 0..frames {
                    self.step_frame(input.held);
                }
                self.draw_comic(ui);
            });

        ctx.request_repaint_after(Duration::from_secs_f64(self.clock.interval()));
    }
}
