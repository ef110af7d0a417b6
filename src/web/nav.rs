use super::{as_html, flush, query, set_class, set_style, viewport_width, Journal};
use crate::config::NavConfig;
use crate::nav::{AnchorGeometry, AnchorResolver, LinkDisposition, NavController, NavSurface};
use gloo::events::{EventListener, EventListenerOptions};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, ScrollBehavior, ScrollToOptions, Window};

struct NavDom {
    document: Document,
    window: Window,
    body: HtmlElement,
    burger: Element,
    nav: Element,
    header_selector: String,
    overlay_selector: String,
    active_class: String,
}

impl NavSurface for NavDom {
    fn set_menu_active(&self, active: bool) {
        set_class(&self.nav, &self.active_class, active);
        set_class(&self.burger, &self.active_class, active);
    }

    fn set_scroll_locked(&self, locked: bool) {
        set_style(&self.body, "overflow", if locked { "hidden" } else { "" });
    }

    fn set_overlay_active(&self, active: bool) {
        // Looked up on each transition; the overlay is optional markup.
        if let Some(overlay) = query(&self.document, &self.overlay_selector) {
            set_class(&overlay, &self.active_class, active);
        }
    }

    fn scroll_to_smooth(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

impl AnchorResolver for NavDom {
    fn resolve(&self, id: &str) -> Option<AnchorGeometry> {
        if id.is_empty() {
            return None;
        }
        let target = self.document.get_element_by_id(id)?;
        let header_height = query(&self.document, &self.header_selector)
            .and_then(as_html)
            .map(|header| f64::from(header.offset_height()))
            .unwrap_or(0.0);
        Some(AnchorGeometry {
            rect_top: target.get_bounding_client_rect().top(),
            scroll_y: self.window.page_y_offset().unwrap_or_default(),
            header_height,
        })
    }
}

struct NavBinding {
    dom: NavDom,
    controller: RefCell<NavController>,
    journal: Journal,
}

pub(crate) fn mount(document: &Document, config: &NavConfig, journal: &Journal) {
    let (Some(burger), Some(nav)) =
        (query(document, &config.burger_selector), query(document, &config.nav_selector))
    else {
        log::debug!("[nav] burger or nav panel missing, menu disabled");
        return;
    };
    let (Some(window), Some(body)) = (web_sys::window(), document.body()) else {
        return;
    };
    let binding = Rc::new(NavBinding {
        dom: NavDom {
            document: document.clone(),
            window,
            body,
            burger,
            nav,
            header_selector: config.header_selector.clone(),
            overlay_selector: config.overlay_selector.clone(),
            active_class: config.active_class.clone(),
        },
        controller: RefCell::new(NavController::new(config)),
        journal: Rc::clone(journal),
    });
    binding.install_listeners(&config.link_selector);
}

impl NavBinding {
    fn install_listeners(self: &Rc<Self>, link_selector: &str) {
        let binding = Rc::clone(self);
        EventListener::new(&self.dom.burger, "click", move |_| binding.on_burger()).forget();

        match self.dom.document.query_selector_all(link_selector) {
            Ok(links) => {
                for index in 0..links.length() {
                    let Some(link) = links.item(index).and_then(|node| node.dyn_into::<Element>().ok()) else {
                        continue;
                    };
                    let binding = Rc::clone(self);
                    let target = link.clone();
                    EventListener::new_with_options(
                        &target,
                        "click",
                        EventListenerOptions::enable_prevent_default(),
                        move |event| {
                            let href = link.get_attribute("href");
                            if binding.on_link(href.as_deref()) == LinkDisposition::PreventDefault {
                                event.prevent_default();
                            }
                        },
                    )
                    .forget();
                }
            }
            Err(err) => log::warn!("[nav] invalid link selector '{link_selector}': {err:?}"),
        }

        let binding = Rc::clone(self);
        EventListener::new(&self.dom.window, "resize", move |_| binding.on_resize()).forget();
    }

    fn on_burger(&self) {
        self.controller.borrow_mut().toggle(&self.dom, &mut self.journal.borrow_mut());
        flush(&self.journal);
    }

    fn on_link(&self, href: Option<&str>) -> LinkDisposition {
        let disposition = self.controller.borrow_mut().on_link_click(
            href,
            &self.dom,
            &self.dom,
            &mut self.journal.borrow_mut(),
        );
        flush(&self.journal);
        disposition
    }

    fn on_resize(&self) {
        let Some(width) = viewport_width(&self.dom.window) else {
            return;
        };
        self.controller.borrow_mut().on_resize(width, &self.dom, &mut self.journal.borrow_mut());
        flush(&self.journal);
    }
}
