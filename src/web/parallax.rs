use super::{flush, set_style, viewport_width, Journal};
use crate::config::ParallaxConfig;
use crate::parallax::{FrameScheduler, Parallax, ParallaxSurface};
use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{HtmlElement, Window};

impl ParallaxSurface for HtmlElement {
    fn element_top(&self) -> f64 {
        f64::from(self.offset_top())
    }

    fn set_background_position(&self, value: &str) {
        set_style(self, "background-position", value);
    }
}

struct ParallaxBinding {
    window: Window,
    element: HtmlElement,
    parallax: RefCell<Parallax>,
    // Replaced on the next schedule, never dropped inside its own callback.
    frame: RefCell<Option<AnimationFrame>>,
}

pub(crate) fn mount(element: &HtmlElement, config: &ParallaxConfig, journal: &Journal) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let width = viewport_width(&window).unwrap_or_default();
    let parallax = Parallax::activate(width, config, &mut journal.borrow_mut());
    flush(journal);
    let Some(parallax) = parallax else {
        return;
    };
    let binding = Rc::new(ParallaxBinding {
        window: window.clone(),
        element: element.clone(),
        parallax: RefCell::new(parallax),
        frame: RefCell::new(None),
    });
    // Default gloo options register the listener as passive.
    EventListener::new(&window, "scroll", move |_| binding.on_scroll()).forget();
}

impl ParallaxBinding {
    fn on_scroll(self: &Rc<Self>) {
        self.parallax.borrow_mut().on_scroll(self);
    }

    fn run_frame(&self) {
        let scroll_top = self.window.page_y_offset().unwrap_or_default();
        self.parallax.borrow_mut().on_frame(scroll_top, &self.element);
    }
}

impl FrameScheduler for Rc<ParallaxBinding> {
    fn schedule_frame(&self) {
        let binding = Rc::clone(self);
        let handle = request_animation_frame(move |_| binding.run_frame());
        self.frame.replace(Some(handle));
    }
}
