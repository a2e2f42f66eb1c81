// Recording fakes for the host element, the page overlay and the texture factory.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use viewer_core::*;

pub struct FakeHost {
    pub orientation: Option<String>,
    pub clips: Vec<String>,
    pub sent: RefCell<Vec<String>>,
    pub renders: Cell<usize>,
    pub played: RefCell<Vec<(String, u32, u32)>>,
    pub indicators: Result<usize, HostError>,
    pub indicator_calls: Cell<usize>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            orientation: None,
            clips: Vec::new(),
            sent: RefCell::new(Vec::new()),
            renders: Cell::new(0),
            played: RefCell::new(Vec::new()),
            indicators: Err(HostError::Unsupported("scene graph access")),
            indicator_calls: Cell::new(0),
        }
    }
}

impl FakeHost {
    pub fn last_sent(&self) -> Option<String> {
        self.sent.borrow().last().cloned()
    }
}

impl ViewerHost for FakeHost {
    fn orientation_attr(&self) -> Option<String> {
        self.orientation.clone()
    }

    fn set_orientation(&self, orientation: &str) {
        self.sent.borrow_mut().push(orientation.to_string());
    }

    fn request_render(&self) {
        self.renders.set(self.renders.get() + 1);
    }

    fn animation_names(&self) -> Vec<String> {
        self.clips.clone()
    }

    fn play_animation(&self, clip: &str, crossfade_ms: u32, repetitions: u32) {
        self.played
            .borrow_mut()
            .push((clip.to_string(), crossfade_ms, repetitions));
    }

    fn hide_placement_indicators(&self, _patterns: &[&str]) -> Result<usize, HostError> {
        self.indicator_calls.set(self.indicator_calls.get() + 1);
        self.indicators.clone()
    }
}

#[derive(Default)]
pub struct FakeOverlay {
    pub visible: Cell<Option<bool>>,
    pub poses: RefCell<Vec<Pose>>,
}

impl Overlay for FakeOverlay {
    fn set_hotspots_visible(&self, visible: bool) {
        self.visible.set(Some(visible));
    }

    fn show_pose(&self, pose: Pose) {
        self.poses.borrow_mut().push(pose);
    }
}

pub type Controller = ViewerController<FakeHost, FakeOverlay>;

pub fn controller() -> Controller {
    controller_with(FakeHost::default(), ViewerConfig::default())
}

pub fn controller_with(host: FakeHost, config: ViewerConfig) -> Controller {
    ViewerController::new(Some(host), FakeOverlay::default(), config)
}

pub fn host(ctl: &Controller) -> &FakeHost {
    ctl.host().expect("fake host present")
}

/// Tick every `step_ms` from `from_ms` through `to_ms` inclusive; returns the
/// angle after each frame.
pub fn run_frames(ctl: &mut Controller, from_ms: f64, to_ms: f64, step_ms: f64) -> Vec<f64> {
    let mut angles = Vec::new();
    let mut t = from_ms;
    while t <= to_ms {
        ctl.tick(t);
        angles.push(ctl.rotation().current());
        t += step_ms;
    }
    angles
}

// ---------------- Textures ----------------

#[derive(Debug, PartialEq)]
pub struct FakeTexture {
    pub uri: String,
}

#[derive(Default)]
pub struct FakeLoader {
    pub loads: Cell<usize>,
    pub failing: RefCell<Vec<String>>,
    /// URIs whose load never completes.
    pub stalled: RefCell<Vec<String>>,
}

impl TextureLoader for FakeLoader {
    type Texture = Rc<FakeTexture>;

    fn load(&self, uri: &str) -> LocalBoxFuture<'static, Result<Self::Texture, TextureError>> {
        self.loads.set(self.loads.get() + 1);
        if self.stalled.borrow().iter().any(|u| u == uri) {
            return futures::future::pending().boxed_local();
        }
        let result = if self.failing.borrow().iter().any(|u| u == uri) {
            Err(TextureError::Load {
                uri: uri.to_string(),
                reason: "404".to_string(),
            })
        } else {
            Ok(Rc::new(FakeTexture {
                uri: uri.to_string(),
            }))
        };
        futures::future::ready(result).boxed_local()
    }
}

#[derive(Default)]
pub struct FakeSurface {
    pub texture: RefCell<Option<Rc<FakeTexture>>>,
    pub renders: Cell<usize>,
}

impl FakeSurface {
    pub fn with_texture(uri: &str) -> Self {
        Self {
            texture: RefCell::new(Some(Rc::new(FakeTexture {
                uri: uri.to_string(),
            }))),
            renders: Cell::new(0),
        }
    }

    pub fn current(&self) -> Option<Rc<FakeTexture>> {
        self.texture.borrow().clone()
    }
}

impl MaterialSurface for FakeSurface {
    type Texture = Rc<FakeTexture>;

    fn color_texture(&self) -> Option<Self::Texture> {
        self.texture.borrow().clone()
    }

    fn set_color_texture(&self, texture: &Self::Texture) {
        *self.texture.borrow_mut() = Some(texture.clone());
    }

    fn request_render(&self) {
        self.renders.set(self.renders.get() + 1);
    }
}

pub fn variants() -> Vec<TextureVariant> {
    parse_variant_list("beige=tex/beige.jpg,grey=tex/grey.jpg")
}
