use barcraft_landing::overrides::ConfigOverrides;
use barcraft_landing::PageConfig;

#[test]
fn embedded_json_and_body_overrides_compose() {
    let raw = r#"{
        "hero": { "selector": ".promo", "url_attribute": "data-src" },
        "parallax": { "speed": 0.2 },
        "nav": { "overlay_selector": ".backdrop" }
    }"#;
    let mut config = PageConfig::from_json(raw).expect("parse embedded config");
    let overrides = ConfigOverrides::parse([("parallax-speed", "0.45"), ("fallback-color", "#101010")])
        .expect("parse body overrides");

    config.apply_overrides(&overrides);
    config.validate().expect("merged config is valid");

    assert_eq!(config.hero.selector, ".promo");
    assert_eq!(config.hero.url_attribute, "data-src");
    assert_eq!(config.hero.fallback_color, "#101010");
    assert_eq!(config.parallax.speed, 0.45, "body override wins over embedded json");
    assert_eq!(config.nav.overlay_selector, ".backdrop");
    assert_eq!(config.nav.link_selector, ".header__link");
}

#[test]
fn override_can_produce_invalid_config() {
    let mut config = PageConfig::default();
    let overrides = ConfigOverrides::parse([("anchor-spacing", "-8")]).expect("parse");
    config.apply_overrides(&overrides);
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("anchor_spacing"), "validation should name the field: {err}");
}

#[test]
fn wrong_field_type_is_reported_with_context() {
    let err = PageConfig::from_json(r#"{"parallax":{"speed":"fast"}}"#).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse landing config"));
}

#[test]
fn invalid_override_is_dropped_without_losing_embedded_config() {
    let raw = r#"{ "hero": { "selector": ".promo" }, "nav": { "burger_selector": ".menu-toggle" } }"#;
    let mut config = PageConfig::from_embedded(Some(raw));
    let overrides = ConfigOverrides::parse([("anchor-spacing", "-8"), ("parallax-speed", "0.45")])
        .expect("both values parse");

    let applied = config.merge_overrides(&overrides);

    assert_eq!(applied, vec!["parallax_speed"], "only the valid override applies");
    assert_eq!(config.hero.selector, ".promo", "embedded selectors survive");
    assert_eq!(config.nav.burger_selector, ".menu-toggle");
    assert_eq!(config.nav.anchor_spacing, 16.0, "rejected override leaves the field untouched");
    assert_eq!(config.parallax.speed, 0.45);
    config.validate().expect("merged config stays valid");
}

#[test]
fn invalid_embedded_config_falls_back_to_defaults() {
    let config = PageConfig::from_embedded(Some(r#"{ "hero": { "visibility_threshold": 3.0 } }"#));
    assert_eq!(config.hero.visibility_threshold, 0.1);
    assert_eq!(PageConfig::from_embedded(None).hero.selector, ".js-parallax");
    assert_eq!(PageConfig::from_embedded(Some("{ broken")).nav.active_class, "active");
}
