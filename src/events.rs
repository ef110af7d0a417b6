use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    HeroObserved { url: String },
    HeroLoaded { url: String },
    HeroFailed { url: String },
    ParallaxEnabled,
    ParallaxSkipped { viewport_width: f64 },
    MenuOpened,
    MenuClosed,
    AnchorScroll { target: String, top: f64 },
    AnchorMissing { target: String },
}

impl fmt::Display for PageEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageEvent::HeroObserved { url } => write!(f, "HeroObserved url={url}"),
            PageEvent::HeroLoaded { url } => write!(f, "HeroLoaded url={url}"),
            PageEvent::HeroFailed { url } => write!(f, "HeroFailed url={url}"),
            PageEvent::ParallaxEnabled => write!(f, "ParallaxEnabled"),
            PageEvent::ParallaxSkipped { viewport_width } => {
                write!(f, "ParallaxSkipped viewport_width={viewport_width:.0}")
            }
            PageEvent::MenuOpened => write!(f, "MenuOpened"),
            PageEvent::MenuClosed => write!(f, "MenuClosed"),
            PageEvent::AnchorScroll { target, top } => {
                write!(f, "AnchorScroll target=#{target} top={top:.1}")
            }
            PageEvent::AnchorMissing { target } => write!(f, "AnchorMissing target=#{target}"),
        }
    }
}

/// Transitions recorded by the components, drained by the host after each DOM event.
#[derive(Debug, Default)]
pub struct EventJournal {
    events: Vec<PageEvent>,
}

impl EventJournal {
    pub fn push(&mut self, event: PageEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<PageEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
