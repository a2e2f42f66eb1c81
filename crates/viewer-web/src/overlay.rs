use viewer_core::{Overlay, Pose};
use web_sys as web;

use crate::dom;

pub const HOTSPOT_SELECTOR: &str = ".hotspot";
pub const ANIM_TOGGLE_ID: &str = "anim-toggle";
pub const TEXTURE_CYCLE_ID: &str = "texture-cycle";

/// Hotspots and control labels in the page around the viewer.
pub struct DomOverlay {
    document: web::Document,
}

impl DomOverlay {
    pub fn new(document: web::Document) -> Self {
        Self { document }
    }

    /// Mark the texture control with the variant now on the model; CSS picks the thumbnail.
    pub fn show_variant(&self, name: &str) {
        if let Some(el) = self.document.get_element_by_id(TEXTURE_CYCLE_ID) {
            _ = el.set_attribute("data-variant", name);
        }
    }
}

impl Overlay for DomOverlay {
    fn set_hotspots_visible(&self, visible: bool) {
        let Ok(nodes) = self.document.query_selector_all(HOTSPOT_SELECTOR) else {
            return;
        };
        for i in 0..nodes.length() {
            if let Some(el) = nodes
                .item(i)
                .and_then(|n| wasm_bindgen::JsCast::dyn_into::<web::Element>(n).ok())
            {
                dom::set_hidden(&el, !visible);
            }
        }
    }

    fn show_pose(&self, pose: Pose) {
        if let Some(el) = self.document.get_element_by_id(ANIM_TOGGLE_ID) {
            let v = match pose {
                Pose::Primary => "primary",
                Pose::Secondary => "secondary",
            };
            _ = el.set_attribute("data-pose", v);
        }
    }
}
