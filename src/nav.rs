//! Mobile menu state machine and header-aware anchor scrolling.

use crate::config::NavConfig;
use crate::events::{EventJournal, PageEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

/// DOM effects of the menu and of anchor scrolling.
pub trait NavSurface {
    /// Active class on both the nav panel and the burger control.
    fn set_menu_active(&self, active: bool);
    fn set_scroll_locked(&self, locked: bool);
    /// No-op when the page has no overlay.
    fn set_overlay_active(&self, active: bool);
    fn scroll_to_smooth(&self, top: f64);
}

/// Layout measurements taken at click time for an anchor target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorGeometry {
    /// Target top relative to the viewport.
    pub rect_top: f64,
    pub scroll_y: f64,
    /// Zero when the page has no header.
    pub header_height: f64,
}

pub trait AnchorResolver {
    fn resolve(&self, id: &str) -> Option<AnchorGeometry>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// Fragment without the leading `#`. May be empty.
    Anchor(String),
    External,
}

impl LinkTarget {
    pub fn parse(href: Option<&str>) -> Self {
        match href.and_then(|href| href.strip_prefix('#')) {
            Some(fragment) => LinkTarget::Anchor(fragment.to_string()),
            None => LinkTarget::External,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDisposition {
    PreventDefault,
    FollowDefault,
}

pub fn anchor_scroll_top(geometry: AnchorGeometry, spacing: f64) -> f64 {
    geometry.rect_top + geometry.scroll_y - geometry.header_height - spacing
}

#[derive(Debug, Clone)]
pub struct NavController {
    state: MenuState,
    desktop_breakpoint: f64,
    anchor_spacing: f64,
}

impl NavController {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            state: MenuState::Closed,
            desktop_breakpoint: config.desktop_breakpoint,
            anchor_spacing: config.anchor_spacing,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == MenuState::Open
    }

    pub fn toggle(&mut self, surface: &impl NavSurface, journal: &mut EventJournal) -> MenuState {
        match self.state {
            MenuState::Closed => self.open(surface, journal),
            MenuState::Open => {
                self.close(surface, journal);
            }
        }
        self.state
    }

    /// Returns `true` if the menu was open. Closing a closed menu touches nothing.
    pub fn close(&mut self, surface: &impl NavSurface, journal: &mut EventJournal) -> bool {
        if self.state == MenuState::Closed {
            return false;
        }
        surface.set_menu_active(false);
        surface.set_scroll_locked(false);
        surface.set_overlay_active(false);
        self.state = MenuState::Closed;
        journal.push(PageEvent::MenuClosed);
        true
    }

    pub fn on_resize(&mut self, viewport_width: f64, surface: &impl NavSurface, journal: &mut EventJournal) -> bool {
        if viewport_width > self.desktop_breakpoint {
            return self.close(surface, journal);
        }
        false
    }

    pub fn on_link_click(
        &mut self,
        href: Option<&str>,
        anchors: &impl AnchorResolver,
        surface: &impl NavSurface,
        journal: &mut EventJournal,
    ) -> LinkDisposition {
        self.close(surface, journal);
        let LinkTarget::Anchor(id) = LinkTarget::parse(href) else {
            return LinkDisposition::FollowDefault;
        };
        match anchors.resolve(&id) {
            Some(geometry) => {
                let top = anchor_scroll_top(geometry, self.anchor_spacing);
                surface.scroll_to_smooth(top);
                journal.push(PageEvent::AnchorScroll { target: id, top });
            }
            None => {
                log::debug!("[nav] no element with id '{id}', staying put");
                journal.push(PageEvent::AnchorMissing { target: id });
            }
        }
        LinkDisposition::PreventDefault
    }

    fn open(&mut self, surface: &impl NavSurface, journal: &mut EventJournal) {
        surface.set_menu_active(true);
        surface.set_scroll_locked(true);
        surface.set_overlay_active(true);
        self.state = MenuState::Open;
        journal.push(PageEvent::MenuOpened);
    }
}
