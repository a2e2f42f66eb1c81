#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use viewer_core::{
    parse_variant_list, TextureCache, TextureSwitcher, ViewerConfig, ViewerController,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod dom;
mod events;
mod frame;
mod host;
mod overlay;
mod textures;

use host::ModelViewerHost;
use overlay::DomOverlay;
use textures::HostTextureLoader;

pub(crate) type Controller = ViewerController<ModelViewerHost, DomOverlay>;
pub(crate) type Switcher = TextureSwitcher<HostTextureLoader>;

const HOST_SELECTOR: &str = "model-viewer";
const VARIANTS_ATTR: &str = "data-texture-variants";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("viewer-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    // A missing viewer is tolerated; the controller logs it and turns host calls into no-ops.
    let host_el = document
        .query_selector(HOST_SELECTOR)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let config = match &host_el {
        Some(el) => ViewerConfig::from_attributes(|name| el.get_attribute(name)),
        None => ViewerConfig::default(),
    };
    log::info!(
        "[init] auto-rotate={} idle={}ms step={}deg",
        config.auto_rotate,
        config.idle_hide_delay_ms,
        config.rotate_step_deg
    );

    let host = host_el.clone().map(ModelViewerHost::new);
    let controller = Rc::new(RefCell::new(ViewerController::new(
        host.clone(),
        DomOverlay::new(document.clone()),
        config,
    )));

    let switcher = host_el.as_ref().map(|el| {
        let variants = parse_variant_list(&el.get_attribute(VARIANTS_ATTR).unwrap_or_default());
        log::info!("[texture] {} variants", variants.len());
        Rc::new(TextureSwitcher::new(TextureCache::new(
            HostTextureLoader::new(el.clone()),
            variants,
        )))
    });

    events::wire_all(&events::Wiring {
        document,
        controller: controller.clone(),
        host,
        switcher: switcher.clone(),
        material: Rc::new(RefCell::new(None)),
    });

    if let Some(sw) = switcher {
        spawn_local(async move {
            sw.cache().preload_all().await;
        });
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext { controller }));
    frame::start_loop(frame_ctx);

    Ok(())
}
