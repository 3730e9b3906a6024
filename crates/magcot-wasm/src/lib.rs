//! WASM bridge for magcot: binds the viewer core to the live page.
//!
//! Compiled via `wasm-pack build --target web`. The generated page loads the
//! module and calls `boot()` (or `boot_with_config(json)`); from then on the
//! listeners registered here forward clicks to the [`Viewer`].

mod dom;
mod logger;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::future::TimeoutFuture;
use magcot_core::copy::{finish_copy, press_region};
use magcot_core::{CopyCycle, Viewer, ViewerConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Element};

pub use dom::DomSurface;

type SharedViewer = Rc<RefCell<Viewer<DomSurface>>>;

/// A booted page: the viewer plus every listener bound to it. Dropping a
/// session unbinds its listeners.
struct Session {
    viewer: SharedViewer,
    _listeners: Vec<EventListener>,
    _panel: Rc<RefCell<Vec<EventListener>>>,
}

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

// ─── Exports ─────────────────────────────────────────────────────────────

/// Boot the viewer with the default configuration.
#[wasm_bindgen]
pub fn boot() -> Result<(), JsValue> {
    start(ViewerConfig::default())
}

/// Boot the viewer with a JSON configuration. Omitted fields keep their
/// defaults; a blank string is the default configuration.
#[wasm_bindgen]
pub fn boot_with_config(config_json: &str) -> Result<(), JsValue> {
    let config = load_config(config_json).map_err(|e| JsValue::from_str(&e))?;
    start(config)
}

/// Current viewer state as JSON, `null` before boot.
///
/// `{"texture":"…","index":0,"count":3,"magnification":2,"groups":[{"name":"…","on":true}]}`
#[wasm_bindgen]
pub fn viewer_state() -> String {
    SESSION.with(|session| match session.borrow().as_ref() {
        Some(session) => session.viewer.borrow().state().to_string(),
        None => "null".to_string(),
    })
}

// ─── Boot ────────────────────────────────────────────────────────────────

fn load_config(json: &str) -> Result<ViewerConfig, String> {
    if json.trim().is_empty() {
        return Ok(ViewerConfig::default());
    }
    ViewerConfig::from_json(json)
}

fn start(config: ViewerConfig) -> Result<(), JsValue> {
    logger::console_error_panic_hook_setup();
    logger::init(config.level_filter());

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("magcot: no document"))?;
    let ready_state = js_sys::Reflect::get(&document, &JsValue::from_str("readyState"))?;
    if ready_state.as_string().as_deref() == Some("loading") {
        log::debug!("document still loading, deferring boot to DOMContentLoaded");
        let target = document.clone();
        EventListener::once(&target, "DOMContentLoaded", move |_| mount(document, config))
            .forget();
    } else {
        mount(document, config);
    }
    Ok(())
}

fn mount(document: Document, config: ViewerConfig) {
    let cooldown_ms = config.cooldown_ms;
    let viewer: SharedViewer = Rc::new(RefCell::new(Viewer::boot(
        DomSurface::new(document),
        config,
    )));
    let panel = Rc::new(RefCell::new(Vec::new()));

    let mut listeners = Vec::new();
    bind_navigation(&viewer, &mut listeners);
    bind_groups(&viewer, &mut listeners);
    bind_markers(&viewer, &panel, cooldown_ms, &mut listeners);
    {
        let v = viewer.borrow();
        for region in v.copyables() {
            listeners.push(copy_listener(v.surface(), region, cooldown_ms));
        }
    }
    log::debug!("bound {} listeners", listeners.len());

    SESSION.with(|session| {
        if session.borrow().is_some() {
            log::debug!("replacing previous session");
        }
        *session.borrow_mut() = Some(Session {
            viewer,
            _listeners: listeners,
            _panel: panel,
        });
    });
}

// ─── Listeners ───────────────────────────────────────────────────────────

fn bind_navigation(viewer: &SharedViewer, listeners: &mut Vec<EventListener>) {
    let (prev, next) = viewer.borrow().nav_buttons();
    if let Some(prev) = prev {
        let viewer = Rc::clone(viewer);
        listeners.push(EventListener::new(&prev, "click", move |_| {
            viewer.borrow_mut().prev_texture();
        }));
    }
    if let Some(next) = next {
        let viewer = Rc::clone(viewer);
        listeners.push(EventListener::new(&next, "click", move |_| {
            viewer.borrow_mut().next_texture();
        }));
    }
}

fn bind_groups(viewer: &SharedViewer, listeners: &mut Vec<EventListener>) {
    let buttons = viewer.borrow().group_buttons().to_vec();
    for (id, button) in buttons {
        let viewer = Rc::clone(viewer);
        listeners.push(EventListener::new(&button, "click", move |_| {
            if viewer.borrow_mut().toggle_group(id).is_none() {
                log::warn!("group button for unknown group {id}");
            }
        }));
    }
}

/// Each marker click re-renders the info panel and rebinds copy listeners
/// for the fresh regions, dropping the ones bound to the old content.
fn bind_markers(
    viewer: &SharedViewer,
    panel: &Rc<RefCell<Vec<EventListener>>>,
    cooldown_ms: u32,
    listeners: &mut Vec<EventListener>,
) {
    let markers = viewer.borrow().markers();
    for (marker, _) in markers {
        let viewer = Rc::clone(viewer);
        let panel = Rc::clone(panel);
        let target = marker.clone();
        listeners.push(EventListener::new(&marker, "click", move |_| {
            let v = viewer.borrow();
            let fresh: Vec<EventListener> = v
                .show_info(&target)
                .into_iter()
                .map(|region| copy_listener(v.surface(), region, cooldown_ms))
                .collect();
            *panel.borrow_mut() = fresh;
        }));
    }
}

fn copy_listener(surface: &DomSurface, region: Element, cooldown_ms: u32) -> EventListener {
    let surface = surface.clone();
    let cycle = Rc::new(RefCell::new(CopyCycle::new()));
    let target = region.clone();
    EventListener::new(&region, "click", move |_| {
        let Some(text) = press_region(&surface, &target, &mut cycle.borrow_mut()) else {
            return;
        };
        let surface = surface.clone();
        let node = target.clone();
        let cycle = Rc::clone(&cycle);
        spawn_local(async move {
            finish_copy(
                &surface,
                &node,
                &cycle,
                cooldown_ms,
                write_clipboard(&text),
                TimeoutFuture::new,
            )
            .await;
        });
    })
}

async fn write_clipboard(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    JsFuture::from(window.navigator().clipboard().write_text(text)).await?;
    Ok(())
}
