//! Deferred hero background: one visibility trigger, one image fetch, one outcome.

use crate::config::HeroConfig;
use crate::events::{EventJournal, PageEvent};

/// Slack allowed when the platform reports a ratio just under the configured threshold.
const RATIO_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Armed,
    Fired,
    Detached,
}

/// One-shot visibility trigger. Only an armed watch can fire, and it fires at most once.
#[derive(Debug, Clone)]
pub struct VisibilityWatch {
    state: WatchState,
    threshold: f64,
}

impl VisibilityWatch {
    pub fn new(threshold: f64) -> Self {
        Self { state: WatchState::Armed, threshold }
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Returns `true` exactly once: on the first intersecting entry at or above the threshold.
    pub fn observe(&mut self, ratio: f64, intersecting: bool) -> bool {
        if self.state != WatchState::Armed || !intersecting {
            return false;
        }
        // The initial observer callback reports `isIntersecting` for any overlap.
        if ratio + RATIO_TOLERANCE < self.threshold {
            return false;
        }
        self.state = WatchState::Fired;
        true
    }

    pub fn detach(&mut self) {
        self.state = WatchState::Detached;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroOutcome {
    Pending,
    Loaded,
    Failed,
}

/// Style and class writes on the hero element.
pub trait HeroSurface {
    fn set_background_image(&self, css_value: &str);
    fn add_class(&self, class: &str);
    fn set_background_color(&self, color: &str);
}

#[derive(Debug, Clone)]
pub struct HeroLoader {
    url: String,
    loaded_class: String,
    fallback_color: String,
    watch: VisibilityWatch,
    outcome: HeroOutcome,
}

impl HeroLoader {
    pub fn new(url: impl Into<String>, config: &HeroConfig) -> Self {
        Self {
            url: url.into(),
            loaded_class: config.loaded_class.clone(),
            fallback_color: config.fallback_color.clone(),
            watch: VisibilityWatch::new(config.visibility_threshold),
            outcome: HeroOutcome::Pending,
        }
    }

    /// Builds a loader from the hero's URL attribute. A missing or blank value still arms the
    /// watch; the first qualifying intersection then takes the failure path.
    pub fn from_attribute(value: Option<String>, config: &HeroConfig) -> Self {
        let url = value.as_deref().map(str::trim).unwrap_or_default();
        Self::new(url, config)
    }

    /// `false` when there is no URL to fetch.
    pub fn has_source(&self) -> bool {
        !self.url.is_empty()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn watch_state(&self) -> WatchState {
        self.watch.state()
    }

    pub fn outcome(&self) -> HeroOutcome {
        self.outcome
    }

    /// Feeds one intersection entry. Returns the URL to fetch on the first qualifying entry;
    /// the caller must stop observing and call [`HeroLoader::detach`].
    pub fn on_visibility(&mut self, ratio: f64, intersecting: bool, journal: &mut EventJournal) -> Option<&str> {
        if !self.watch.observe(ratio, intersecting) {
            return None;
        }
        log::debug!("[hero] visible at ratio {ratio:.2}, fetching {}", self.url);
        journal.push(PageEvent::HeroObserved { url: self.url.clone() });
        Some(&self.url)
    }

    pub fn detach(&mut self) {
        self.watch.detach();
    }

    /// Applies the image once the browser reports it loaded.
    pub fn on_loaded(&mut self, surface: &impl HeroSurface, journal: &mut EventJournal) -> HeroOutcome {
        if !self.accepts_outcome() {
            return self.outcome;
        }
        if !self.has_source() {
            return self.on_failed(surface, journal);
        }
        surface.set_background_image(&css_url(&self.url));
        surface.add_class(&self.loaded_class);
        self.outcome = HeroOutcome::Loaded;
        journal.push(PageEvent::HeroLoaded { url: self.url.clone() });
        self.outcome
    }

    pub fn on_failed(&mut self, surface: &impl HeroSurface, journal: &mut EventJournal) -> HeroOutcome {
        if !self.accepts_outcome() {
            return self.outcome;
        }
        if self.has_source() {
            log::warn!("[hero] failed to load background {}", self.url);
        } else {
            log::warn!("[hero] hero has no background url");
        }
        surface.set_background_color(&self.fallback_color);
        self.outcome = HeroOutcome::Failed;
        journal.push(PageEvent::HeroFailed { url: self.url.clone() });
        self.outcome
    }

    // No fetch happens while armed, and the first outcome is final.
    fn accepts_outcome(&self) -> bool {
        self.watch.state() != WatchState::Armed && self.outcome == HeroOutcome::Pending
    }
}

/// Quoted CSS `url()` value.
pub fn css_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len() + 7);
    out.push_str("url(\"");
    for ch in url.chars() {
        match ch {
            '"' | '\\' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' | '\r' => {}
            _ => out.push(ch),
        }
    }
    out.push_str("\")");
    out
}
