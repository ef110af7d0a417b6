//! Scroll-driven background offset for the hero, coalesced to one write per frame.

use crate::config::ParallaxConfig;
use crate::events::{EventJournal, PageEvent};

/// Vertical background offset in pixels for the given scroll position.
pub fn background_offset(scroll_top: f64, element_top: f64, speed: f64) -> f64 {
    let offset = -((scroll_top - element_top) * speed);
    if offset == 0.0 {
        0.0
    } else {
        offset
    }
}

pub fn background_position(offset: f64) -> String {
    format!("center {offset}px")
}

/// Parallax only runs on desktop widths. Checked once; widening the window later does not
/// enable it.
pub fn parallax_enabled(viewport_width: f64, min_width: f64) -> bool {
    viewport_width >= min_width
}

/// Pending-frame flag. Many requests between two frames collapse into one.
#[derive(Debug, Default)]
pub struct FrameThrottle {
    ticking: bool,
}

impl FrameThrottle {
    /// Returns `true` when the caller should schedule a frame.
    pub fn request(&mut self) -> bool {
        if self.ticking {
            return false;
        }
        self.ticking = true;
        true
    }

    pub fn complete(&mut self) {
        self.ticking = false;
    }

    pub fn is_pending(&self) -> bool {
        self.ticking
    }
}

pub trait FrameScheduler {
    fn schedule_frame(&self);
}

pub trait ParallaxSurface {
    /// Document offset of the element's top edge.
    fn element_top(&self) -> f64;
    fn set_background_position(&self, value: &str);
}

#[derive(Debug)]
pub struct Parallax {
    throttle: FrameThrottle,
    speed: f64,
}

impl Parallax {
    /// Returns `None` below the desktop width; no scroll listener should be attached then.
    pub fn activate(viewport_width: f64, config: &ParallaxConfig, journal: &mut EventJournal) -> Option<Self> {
        if !parallax_enabled(viewport_width, config.min_viewport_width) {
            log::debug!(
                "[parallax] viewport {viewport_width}px below {}px, parallax disabled",
                config.min_viewport_width
            );
            journal.push(PageEvent::ParallaxSkipped { viewport_width });
            return None;
        }
        journal.push(PageEvent::ParallaxEnabled);
        Some(Self { throttle: FrameThrottle::default(), speed: config.speed })
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn frame_pending(&self) -> bool {
        self.throttle.is_pending()
    }

    /// Handles one scroll event. Returns `true` if a frame was scheduled.
    pub fn on_scroll(&mut self, scheduler: &impl FrameScheduler) -> bool {
        if !self.throttle.request() {
            return false;
        }
        scheduler.schedule_frame();
        true
    }

    /// Runs the scheduled frame: one background-position write, then re-arms the throttle.
    pub fn on_frame(&mut self, scroll_top: f64, surface: &impl ParallaxSurface) -> f64 {
        let offset = background_offset(scroll_top, surface.element_top(), self.speed);
        surface.set_background_position(&background_position(offset));
        self.throttle.complete();
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_moves_at_fraction_of_scroll() {
        assert_eq!(background_offset(1000.0, 0.0, 0.3), -300.0);
        assert_eq!(background_offset(100.0, 200.0, 0.5), 50.0);
        assert_eq!(background_offset(200.0, 200.0, 0.3), 0.0);
    }

    #[test]
    fn zero_offset_is_not_negative_zero() {
        assert_eq!(background_position(background_offset(50.0, 50.0, 0.3)), "center 0px");
        assert_eq!(background_position(-30.0), "center -30px");
        assert_eq!(background_position(-12.5), "center -12.5px");
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(parallax_enabled(769.0, 769.0));
        assert!(parallax_enabled(1440.0, 769.0));
        assert!(!parallax_enabled(768.0, 769.0));
    }

    #[test]
    fn throttle_collapses_requests_until_complete() {
        let mut throttle = FrameThrottle::default();
        assert!(throttle.request());
        assert!(!throttle.request());
        assert!(throttle.is_pending());
        throttle.complete();
        assert!(!throttle.is_pending());
        assert!(throttle.request());
    }
}
