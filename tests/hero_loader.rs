use barcraft_landing::config::HeroConfig;
use barcraft_landing::hero::{HeroLoader, HeroOutcome, HeroSurface, WatchState};
use barcraft_landing::{EventJournal, PageEvent};
use std::cell::RefCell;

#[derive(Default)]
struct RecordingHero {
    background_image: RefCell<Option<String>>,
    background_color: RefCell<Option<String>>,
    classes: RefCell<Vec<String>>,
}

impl HeroSurface for RecordingHero {
    fn set_background_image(&self, css_value: &str) {
        *self.background_image.borrow_mut() = Some(css_value.to_string());
    }

    fn add_class(&self, class: &str) {
        self.classes.borrow_mut().push(class.to_string());
    }

    fn set_background_color(&self, color: &str) {
        *self.background_color.borrow_mut() = Some(color.to_string());
    }
}

fn loader() -> HeroLoader {
    HeroLoader::new("img/hero-bg.jpg", &HeroConfig::default())
}

#[test]
fn no_request_before_ten_percent_visible() {
    let mut loader = loader();
    let mut journal = EventJournal::default();

    assert!(loader.on_visibility(0.0, false, &mut journal).is_none(), "off screen");
    assert!(loader.on_visibility(0.05, true, &mut journal).is_none(), "only 5% visible");
    assert_eq!(loader.watch_state(), WatchState::Armed);
    assert!(journal.is_empty());

    let url = loader.on_visibility(0.1, true, &mut journal).map(str::to_owned);
    assert_eq!(url.as_deref(), Some("img/hero-bg.jpg"));
    assert_eq!(loader.watch_state(), WatchState::Fired);
    assert_eq!(journal.drain(), vec![PageEvent::HeroObserved { url: "img/hero-bg.jpg".to_string() }]);
}

#[test]
fn watch_fires_exactly_once_per_page_view() {
    let mut loader = loader();
    let mut journal = EventJournal::default();

    assert!(loader.on_visibility(0.3, true, &mut journal).is_some());
    loader.detach();
    assert_eq!(loader.watch_state(), WatchState::Detached);

    for ratio in [0.2, 0.6, 1.0] {
        assert!(loader.on_visibility(ratio, true, &mut journal).is_none(), "re-entry must not refetch");
    }
    assert_eq!(journal.len(), 1);
}

#[test]
fn successful_load_sets_image_and_loaded_class() {
    let mut loader = loader();
    let mut journal = EventJournal::default();
    let hero = RecordingHero::default();

    loader.on_visibility(1.0, true, &mut journal);
    loader.detach();
    assert_eq!(loader.on_loaded(&hero, &mut journal), HeroOutcome::Loaded);

    assert_eq!(hero.background_image.borrow().as_deref(), Some(r#"url("img/hero-bg.jpg")"#));
    assert_eq!(*hero.classes.borrow(), vec!["hero--loaded".to_string()]);
    assert!(hero.background_color.borrow().is_none());
    assert!(journal.drain().contains(&PageEvent::HeroLoaded { url: "img/hero-bg.jpg".to_string() }));
}

#[test]
fn failed_load_applies_fallback_and_never_marks_loaded() {
    let mut loader = loader();
    let mut journal = EventJournal::default();
    let hero = RecordingHero::default();

    loader.on_visibility(0.5, true, &mut journal);
    loader.detach();
    assert_eq!(loader.on_failed(&hero, &mut journal), HeroOutcome::Failed);

    // A late load event cannot flip the outcome.
    assert_eq!(loader.on_loaded(&hero, &mut journal), HeroOutcome::Failed);

    assert_eq!(hero.background_color.borrow().as_deref(), Some("#0a0a0a"));
    assert!(hero.background_image.borrow().is_none());
    assert!(hero.classes.borrow().is_empty(), "loaded class must never be applied");
    assert_eq!(loader.outcome(), HeroOutcome::Failed);
}

#[test]
fn outcome_before_visibility_is_ignored() {
    let mut loader = loader();
    let mut journal = EventJournal::default();
    let hero = RecordingHero::default();

    assert_eq!(loader.on_loaded(&hero, &mut journal), HeroOutcome::Pending);
    assert!(hero.background_image.borrow().is_none(), "no speculative swap");
    assert!(journal.is_empty());
}

#[test]
fn custom_fallback_color_is_used() {
    let config = HeroConfig { fallback_color: "#1b1b1b".to_string(), ..HeroConfig::default() };
    let mut loader = HeroLoader::new("missing.jpg", &config);
    let mut journal = EventJournal::default();
    let hero = RecordingHero::default();

    loader.on_visibility(0.4, true, &mut journal);
    loader.detach();
    loader.on_failed(&hero, &mut journal);
    assert_eq!(hero.background_color.borrow().as_deref(), Some("#1b1b1b"));
}

#[test]
fn blank_or_missing_url_stays_armed_then_falls_back() {
    for attribute in [Some(String::new()), Some("  ".to_string()), None] {
        let mut loader = HeroLoader::from_attribute(attribute.clone(), &HeroConfig::default());
        let mut journal = EventJournal::default();
        let hero = RecordingHero::default();

        assert!(!loader.has_source(), "{attribute:?} carries no url");
        assert_eq!(loader.watch_state(), WatchState::Armed, "{attribute:?} keeps the hero armed");
        assert!(loader.on_visibility(0.05, true, &mut journal).is_none(), "threshold still applies");

        assert_eq!(loader.on_visibility(0.5, true, &mut journal), Some(""));
        loader.detach();
        assert_eq!(loader.on_failed(&hero, &mut journal), HeroOutcome::Failed);

        assert_eq!(hero.background_color.borrow().as_deref(), Some("#0a0a0a"));
        assert!(hero.background_image.borrow().is_none());
        assert!(hero.classes.borrow().is_empty(), "loaded class must never be applied");
    }
}

#[test]
fn load_event_without_url_is_treated_as_failure() {
    let mut loader = HeroLoader::from_attribute(None, &HeroConfig::default());
    let mut journal = EventJournal::default();
    let hero = RecordingHero::default();

    loader.on_visibility(1.0, true, &mut journal);
    loader.detach();
    assert_eq!(loader.on_loaded(&hero, &mut journal), HeroOutcome::Failed);
    assert!(hero.classes.borrow().is_empty());
    assert_eq!(hero.background_color.borrow().as_deref(), Some("#0a0a0a"));
}
