//! Panel drawing.
//!
//! Panels are drawn in load order relative to the camera: the viewer's
//! position maps to the top-left corner of the canvas and every world pixel
//! covers `scale` screen pixels.

use super::state::ComicApp;
use crate::camera::ViewerFrame;
use crate::types::Panel;
use eframe::egui;
use eframe::epaint::StrokeKind;

/// Full texture, top-left to bottom-right.
const FULL_UV: egui::Rect = egui::Rect {
    min: egui::Pos2 { x: 0.0, y: 0.0 },
    max: egui::Pos2 { x: 1.0, y: 1.0 },
};

/// Where `panel` lands on screen for the given camera frame.
///
/// # Arguments
///
/// * `panel` - The panel to place
/// * `frame` - Camera position and scale
/// * `origin` - Screen position of the canvas' top-left corner
pub fn panel_screen_rect(panel: &Panel, frame: ViewerFrame, origin: egui::Pos2) -> egui::Rect {
    let min = egui::pos2(
        origin.x + ((panel.position.x as f64 - frame.x) * frame.scale) as f32,
        origin.y + ((panel.position.y as f64 - frame.y) * frame.scale) as f32,
    );
    let size = egui::vec2(
        (panel.size.width as f64 * frame.scale) as f32,
        (panel.size.height as f64 * frame.scale) as f32,
    );
    egui::Rect::from_min_size(min, size)
}

impl ComicApp {
    /// Draws every visible panel into the available area of `ui`.
    pub fn draw_comic(&self, ui: &mut egui::Ui) {
        let canvas = ui.max_rect();
        let painter = ui.painter_at(canvas);
        let frame = self.camera.frame();

        for (id, panel) in self.graph.iter() {
            if !panel.is_visible() {
                continue;
            }
            let rect = panel_screen_rect(panel, frame, canvas.min);
            if !rect.intersects(canvas) {
                continue;
            }
            match self.textures.get(id) {
                Some(texture) => {
                    painter.image(texture.id(), rect, FULL_UV, self.tint_for(id));
                }
                None => draw_placeholder(&painter, rect, panel, frame.scale),
            }
        }
    }
}

/// Framed stand-in for a panel that has no image.
fn draw_placeholder(painter: &egui::Painter, rect: egui::Rect, panel: &Panel, scale: f64) {
    painter.rect_filled(rect, 0.0, egui::Color32::from_gray(24));
    painter.rect_stroke(
        rect,
        0.0,
        egui::Stroke::new(2.0, egui::Color32::from_gray(200)),
        StrokeKind::Inside,
    );
    let font_size = (32.0 * scale as f32).clamp(8.0, 64.0);
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        &panel.name,
        egui::FontId::proportional(font_size),
        egui::Color32::from_gray(220),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PanelPosition, PanelSize};

    #[test]
    fn test_panel_under_camera_fills_from_origin() {
        let panel = Panel::new("a", PanelPosition::new(100, 50), PanelSize::new(400, 300));
        let frame = ViewerFrame {
            x: 100.0,
            y: 50.0,
            scale: 2.0,
        };
        let rect = panel_screen_rect(&panel, frame, egui::pos2(10.0, 20.0));
        assert_eq!(rect.min, egui::pos2(10.0, 20.0));
        assert_eq!(rect.size(), egui::vec2(800.0, 600.0));
    }

    #[test]
    fn test_neighbor_offset_is_scaled() {
        let panel = Panel::new("b", PanelPosition::new(400, 0), PanelSize::new(400, 300));
        let frame = ViewerFrame {
            x: 0.0,
            y: 0.0,
            scale: 0.5,
        };
        let rect = panel_screen_rect(&panel, frame, egui::Pos2::ZERO);
        assert_eq!(rect.min, egui::pos2(200.0, 0.0));
        assert_eq!(rect.max, egui::pos2(400.0, 150.0));
    }
}
