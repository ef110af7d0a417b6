//! Browser bindings for the landing page enhancements.
//!
//! Every component looks up its own elements and disables itself when they are missing.
//! Listener closures and observers are leaked on purpose: they live for the page view.

mod hero;
mod logger;
mod nav;
mod parallax;

use crate::config::{PageConfig, CONFIG_ELEMENT_ID};
use crate::events::EventJournal;
use crate::overrides::{ConfigOverrides, ATTRIBUTE_PREFIX};
use gloo::events::EventListener;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

pub(crate) type Journal = Rc<RefCell<EventJournal>>;

static STARTED: AtomicBool = AtomicBool::new(false);

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    logger::init();
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    if crate::document_loading(&document.ready_state()) {
        let target = document.clone();
        EventListener::once(&target, "DOMContentLoaded", move |_| boot(&document)).forget();
    } else {
        boot(&document);
    }
    Ok(())
}

fn boot(document: &Document) {
    let config = load_config(document);
    let journal: Journal = Rc::new(RefCell::new(EventJournal::default()));
    hero::mount(document, &config, &journal);
    nav::mount(document, &config.nav, &journal);
    flush(&journal);
}

fn load_config(document: &Document) -> PageConfig {
    let raw = document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content());
    let mut config = PageConfig::from_embedded(raw.as_deref());
    if let Some(body) = document.body() {
        match ConfigOverrides::parse(override_pairs(&body)) {
            Ok(overrides) if !overrides.is_empty() => {
                let applied = config.merge_overrides(&overrides);
                if !applied.is_empty() {
                    log::info!("[config] body overrides applied: {}", applied.join(", "));
                }
            }
            Ok(_) => {}
            Err(err) => log::warn!("[config] ignoring body overrides: {err:#}"),
        }
    }
    config
}

fn override_pairs(body: &HtmlElement) -> Vec<(String, String)> {
    body.get_attribute_names()
        .iter()
        .filter_map(|name| name.as_string())
        .filter_map(|name| {
            let key = name.strip_prefix(ATTRIBUTE_PREFIX)?.to_string();
            let value = body.get_attribute(&name)?;
            Some((key, value))
        })
        .collect()
}

/// Logs and clears the transitions recorded since the last flush.
pub(crate) fn flush(journal: &Journal) {
    for event in journal.borrow_mut().drain() {
        log::debug!("[journal] {event}");
    }
}

pub(crate) fn query(document: &Document, selector: &str) -> Option<Element> {
    match document.query_selector(selector) {
        Ok(found) => found,
        Err(err) => {
            log::warn!("[dom] invalid selector '{selector}': {err:?}");
            None
        }
    }
}

pub(crate) fn viewport_width(window: &Window) -> Option<f64> {
    window.inner_width().ok().and_then(|width| width.as_f64())
}

pub(crate) fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        log::warn!("[dom] failed to set {property}: {err:?}");
    }
}

pub(crate) fn set_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let result = if on { classes.add_1(class) } else { classes.remove_1(class) };
    if let Err(err) = result {
        log::warn!("[dom] failed to update class '{class}': {err:?}");
    }
}

pub(crate) fn as_html(element: Element) -> Option<HtmlElement> {
    element.dyn_into::<HtmlElement>().ok()
}
