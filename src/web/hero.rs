use super::{as_html, flush, parallax, query, set_class, set_style, Journal};
use crate::config::{PageConfig, ParallaxConfig};
use crate::hero::{HeroLoader, HeroOutcome, HeroSurface};
use gloo::events::EventListener;
use js_sys::Array;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, HtmlElement, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

impl HeroSurface for HtmlElement {
    fn set_background_image(&self, css_value: &str) {
        set_style(self, "background-image", css_value);
    }

    fn add_class(&self, class: &str) {
        set_class(self, class, true);
    }

    fn set_background_color(&self, color: &str) {
        set_style(self, "background-color", color);
    }
}

struct HeroBinding {
    element: HtmlElement,
    loader: RefCell<HeroLoader>,
    parallax: ParallaxConfig,
    journal: Journal,
    image: RefCell<Option<HtmlImageElement>>,
    image_listeners: RefCell<Vec<EventListener>>,
}

pub(crate) fn mount(document: &Document, config: &PageConfig, journal: &Journal) {
    let Some(element) = query(document, &config.hero.selector).and_then(as_html) else {
        log::debug!("[hero] no element matches '{}', lazy load disabled", config.hero.selector);
        return;
    };
    let url = element.get_attribute(&config.hero.url_attribute);
    let loader = HeroLoader::from_attribute(url, &config.hero);
    let binding = Rc::new(HeroBinding {
        element,
        loader: RefCell::new(loader),
        parallax: config.parallax.clone(),
        journal: Rc::clone(journal),
        image: RefCell::new(None),
        image_listeners: RefCell::new(Vec::new()),
    });
    if let Err(err) = binding.observe(config.hero.visibility_threshold) {
        log::warn!("[hero] IntersectionObserver unavailable: {err:?}");
    }
}

impl HeroBinding {
    fn observe(self: &Rc<Self>, threshold: f64) -> Result<(), JsValue> {
        let binding = Rc::clone(self);
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    binding.on_entry(&entry, &observer);
                }
            },
        );
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        observer.observe(&self.element);
        callback.forget();
        Ok(())
    }

    fn on_entry(self: &Rc<Self>, entry: &IntersectionObserverEntry, observer: &IntersectionObserver) {
        let url = {
            let mut loader = self.loader.borrow_mut();
            let mut journal = self.journal.borrow_mut();
            loader.on_visibility(entry.intersection_ratio(), entry.is_intersecting(), &mut journal).map(str::to_owned)
        };
        let Some(url) = url else {
            return;
        };
        observer.unobserve(&self.element);
        observer.disconnect();
        self.loader.borrow_mut().detach();
        if url.is_empty() {
            self.finish(false);
        } else if let Err(err) = self.fetch(&url) {
            log::warn!("[hero] could not start image request: {err:?}");
            self.finish(false);
        }
        flush(&self.journal);
    }

    fn fetch(self: &Rc<Self>, url: &str) -> Result<(), JsValue> {
        let image = HtmlImageElement::new()?;
        let on_load = {
            let binding = Rc::clone(self);
            EventListener::once(&image, "load", move |_| binding.finish(true))
        };
        let on_error = {
            let binding = Rc::clone(self);
            EventListener::once(&image, "error", move |_| binding.finish(false))
        };
        self.image_listeners.borrow_mut().extend([on_load, on_error]);
        image.set_src(url);
        *self.image.borrow_mut() = Some(image);
        Ok(())
    }

    fn finish(self: &Rc<Self>, loaded: bool) {
        let (was_pending, outcome) = {
            let mut loader = self.loader.borrow_mut();
            let mut journal = self.journal.borrow_mut();
            let was_pending = loader.outcome() == HeroOutcome::Pending;
            let outcome = if loaded {
                loader.on_loaded(&self.element, &mut journal)
            } else {
                loader.on_failed(&self.element, &mut journal)
            };
            (was_pending, outcome)
        };
        if was_pending && outcome == HeroOutcome::Loaded {
            parallax::mount(&self.element, &self.parallax, &self.journal);
        }
        flush(&self.journal);
    }
}
