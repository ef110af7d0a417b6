use crate::overrides::ConfigOverrides;
use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Id of the optional `<script type="application/json">` element carrying a [`PageConfig`].
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

#[derive(Debug, Clone, Deserialize)]
pub struct HeroConfig {
    #[serde(default = "HeroConfig::default_selector")]
    pub selector: String,
    #[serde(default = "HeroConfig::default_url_attribute")]
    pub url_attribute: String,
    /// Fraction of the hero that must be visible before the image is requested.
    #[serde(default = "HeroConfig::default_visibility_threshold")]
    pub visibility_threshold: f64,
    #[serde(default = "HeroConfig::default_loaded_class")]
    pub loaded_class: String,
    #[serde(default = "HeroConfig::default_fallback_color")]
    pub fallback_color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParallaxConfig {
    /// Background travel relative to the page scroll.
    #[serde(default = "ParallaxConfig::default_speed")]
    pub speed: f64,
    #[serde(default = "ParallaxConfig::default_min_viewport_width")]
    pub min_viewport_width: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NavConfig {
    #[serde(default = "NavConfig::default_header_selector")]
    pub header_selector: String,
    #[serde(default = "NavConfig::default_burger_selector")]
    pub burger_selector: String,
    #[serde(default = "NavConfig::default_nav_selector")]
    pub nav_selector: String,
    #[serde(default = "NavConfig::default_link_selector")]
    pub link_selector: String,
    #[serde(default = "NavConfig::default_overlay_selector")]
    pub overlay_selector: String,
    #[serde(default = "NavConfig::default_active_class")]
    pub active_class: String,
    /// Gap kept between the fixed header and an anchor target after scrolling.
    #[serde(default = "NavConfig::default_anchor_spacing")]
    pub anchor_spacing: f64,
    /// Widths strictly above this value are treated as the desktop layout.
    #[serde(default = "NavConfig::default_desktop_breakpoint")]
    pub desktop_breakpoint: f64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PageConfig {
    #[serde(default)]
    pub hero: HeroConfig,
    #[serde(default)]
    pub parallax: ParallaxConfig,
    #[serde(default)]
    pub nav: NavConfig,
}

impl HeroConfig {
    fn default_selector() -> String {
        ".js-parallax".to_string()
    }

    fn default_url_attribute() -> String {
        "data-bg".to_string()
    }

    const fn default_visibility_threshold() -> f64 {
        0.1
    }

    fn default_loaded_class() -> String {
        "hero--loaded".to_string()
    }

    fn default_fallback_color() -> String {
        "#0a0a0a".to_string()
    }
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            selector: Self::default_selector(),
            url_attribute: Self::default_url_attribute(),
            visibility_threshold: Self::default_visibility_threshold(),
            loaded_class: Self::default_loaded_class(),
            fallback_color: Self::default_fallback_color(),
        }
    }
}

impl ParallaxConfig {
    const fn default_speed() -> f64 {
        0.3
    }

    const fn default_min_viewport_width() -> f64 {
        769.0
    }
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self { speed: Self::default_speed(), min_viewport_width: Self::default_min_viewport_width() }
    }
}

impl NavConfig {
    fn default_header_selector() -> String {
        ".header".to_string()
    }

    fn default_burger_selector() -> String {
        ".header__burger".to_string()
    }

    fn default_nav_selector() -> String {
        ".header__nav".to_string()
    }

    fn default_link_selector() -> String {
        ".header__link".to_string()
    }

    fn default_overlay_selector() -> String {
        ".overlay".to_string()
    }

    fn default_active_class() -> String {
        "active".to_string()
    }

    const fn default_anchor_spacing() -> f64 {
        16.0
    }

    const fn default_desktop_breakpoint() -> f64 {
        768.0
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            header_selector: Self::default_header_selector(),
            burger_selector: Self::default_burger_selector(),
            nav_selector: Self::default_nav_selector(),
            link_selector: Self::default_link_selector(),
            overlay_selector: Self::default_overlay_selector(),
            active_class: Self::default_active_class(),
            anchor_spacing: Self::default_anchor_spacing(),
            desktop_breakpoint: Self::default_desktop_breakpoint(),
        }
    }
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let cfg = serde_json::from_str(raw).context("Failed to parse landing config")?;
        Ok(cfg)
    }

    pub fn from_json_or_default(raw: &str) -> Self {
        match Self::from_json(raw) {
            Ok(cfg) => cfg,
            Err(err) => {
                log::warn!("[config] {err:#}. Falling back to defaults.");
                Self::default()
            }
        }
    }

    /// Config from the page's embedded JSON. Missing, malformed or invalid input yields defaults.
    pub fn from_embedded(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        let cfg = Self::from_json_or_default(raw);
        if let Err(err) = cfg.validate() {
            log::warn!("[config] {err:#}. Falling back to defaults.");
            return Self::default();
        }
        cfg
    }

    /// Applies overrides one field at a time. A field that would leave the config invalid is
    /// dropped with a warning; the rest still apply. Returns the applied field names.
    pub fn merge_overrides(&mut self, overrides: &ConfigOverrides) -> Vec<&'static str> {
        let mut applied = Vec::new();
        for (field, single) in overrides.split() {
            let mut candidate = self.clone();
            candidate.apply_overrides(&single);
            match candidate.validate() {
                Ok(()) => {
                    *self = candidate;
                    applied.push(field);
                }
                Err(err) => log::warn!("[config] dropping override {field}: {err:#}"),
            }
        }
        applied
    }

    pub fn validate(&self) -> Result<()> {
        let threshold = self.hero.visibility_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            bail!("hero.visibility_threshold must be within 0..=1, got {threshold}");
        }
        if !self.parallax.speed.is_finite() {
            bail!("parallax.speed must be a finite number");
        }
        check_length("parallax.min_viewport_width", self.parallax.min_viewport_width)?;
        check_length("nav.anchor_spacing", self.nav.anchor_spacing)?;
        check_length("nav.desktop_breakpoint", self.nav.desktop_breakpoint)?;
        let required = [
            ("hero.selector", &self.hero.selector),
            ("hero.url_attribute", &self.hero.url_attribute),
            ("hero.loaded_class", &self.hero.loaded_class),
            ("hero.fallback_color", &self.hero.fallback_color),
            ("nav.header_selector", &self.nav.header_selector),
            ("nav.burger_selector", &self.nav.burger_selector),
            ("nav.nav_selector", &self.nav.nav_selector),
            ("nav.link_selector", &self.nav.link_selector),
            ("nav.overlay_selector", &self.nav.overlay_selector),
            ("nav.active_class", &self.nav.active_class),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                bail!("{field} must not be empty");
            }
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(speed) = overrides.parallax_speed {
            self.parallax.speed = speed;
        }
        if let Some(width) = overrides.parallax_min_width {
            self.parallax.min_viewport_width = width;
        }
        if let Some(spacing) = overrides.anchor_spacing {
            self.nav.anchor_spacing = spacing;
        }
        if let Some(color) = &overrides.fallback_color {
            self.hero.fallback_color = color.clone();
        }
    }
}

fn check_length(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        bail!("{field} must be a non-negative number, got {value}");
    }
    Ok(())
}
