//! GPU textures for panel images.

use crate::images::DecodedImage;
use crate::types::{PanelGraph, PanelId};
use eframe::egui;
use std::collections::HashMap;

/// Texture handles for every panel that has an image.
///
/// egui frees a texture once its last handle is dropped, so releasing a
/// panel's image means dropping its handle here.
#[derive(Default)]
pub struct PanelTextures {
    handles: HashMap<PanelId, egui::TextureHandle>,
}

impl PanelTextures {
    /// Uploads decoded panel images as textures.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context owning the textures
    /// * `graph` - Panels, used to name the textures
    /// * `images` - Decoded images keyed by panel
    pub fn upload(
        ctx: &egui::Context,
        graph: &PanelGraph,
        images: HashMap<PanelId, DecodedImage>,
    ) -> Self {
        let mut handles = HashMap::with_capacity(images.len());
        for (id, image) in images {
            let name = graph
                .get(id)
                .map(|panel| panel.name.clone())
                .unwrap_or_else(|| format!("panel-{}", id.index()));
            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                [image.width as usize, image.height as usize],
                &image.rgba,
            );
            let handle = ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR);
            handles.insert(id, handle);
        }
        Self { handles }
    }

    /// Texture for panel `id`, if it has an image.
    pub fn get(&self, id: PanelId) -> Option<&egui::TextureHandle> {
        self.handles.get(&id)
    }

    /// Number of live textures.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether every texture has been released.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Drops every texture, logging each panel in load order.
    pub fn release_all(&mut self, graph: &PanelGraph) {
        let mut released: Vec<_> = self.handles.drain().collect();
        released.sort_by_key(|(id, _)| *id);
        for (id, handle) in released {
            if let Some(panel) = graph.get(id) {
                log::info!("Freeing {}...", panel.name);
            }
            drop(handle);
        }
    }
}
