//! Per-page tweaks read from `data-landing-*` attributes on `<body>`.

use anyhow::{bail, Context, Result};

/// Attribute prefix stripped before a key reaches [`ConfigOverrides::parse`].
pub const ATTRIBUTE_PREFIX: &str = "data-landing-";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigOverrides {
    pub parallax_speed: Option<f64>,
    pub parallax_min_width: Option<f64>,
    pub anchor_spacing: Option<f64>,
    pub fallback_color: Option<String>,
}

impl ConfigOverrides {
    /// Parses `(key, value)` pairs where keys have the attribute prefix already removed.
    /// Later pairs win over earlier ones.
    pub fn parse<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut overrides = ConfigOverrides::default();
        for (raw_key, raw_value) in pairs {
            let key = raw_key.as_ref().trim();
            let value = raw_value.as_ref().trim();
            match key {
                "parallax-speed" => {
                    overrides.parallax_speed = Some(parse_number(key, value)?);
                }
                "parallax-min-width" => {
                    overrides.parallax_min_width = Some(parse_number(key, value)?);
                }
                "anchor-spacing" => {
                    overrides.anchor_spacing = Some(parse_number(key, value)?);
                }
                "fallback-color" => {
                    if value.is_empty() {
                        bail!("Expected a color value for '{ATTRIBUTE_PREFIX}{key}'");
                    }
                    overrides.fallback_color = Some(value.to_string());
                }
                _ => bail!(
                    "Unknown override '{ATTRIBUTE_PREFIX}{key}'. Supported: parallax-speed, \
                     parallax-min-width, anchor-spacing, fallback-color."
                ),
            }
        }
        Ok(overrides)
    }

    pub fn is_empty(&self) -> bool {
        self.parallax_speed.is_none()
            && self.parallax_min_width.is_none()
            && self.anchor_spacing.is_none()
            && self.fallback_color.is_none()
    }

    pub fn applied_fields(&self) -> Vec<&'static str> {
        self.split().into_iter().map(|(field, _)| field).collect()
    }

    /// One single-field override per set field, in declaration order.
    pub fn split(&self) -> Vec<(&'static str, ConfigOverrides)> {
        let mut parts = Vec::new();
        if let Some(speed) = self.parallax_speed {
            parts.push(("parallax_speed", ConfigOverrides { parallax_speed: Some(speed), ..Self::default() }));
        }
        if let Some(width) = self.parallax_min_width {
            parts
                .push(("parallax_min_width", ConfigOverrides { parallax_min_width: Some(width), ..Self::default() }));
        }
        if let Some(spacing) = self.anchor_spacing {
            parts.push(("anchor_spacing", ConfigOverrides { anchor_spacing: Some(spacing), ..Self::default() }));
        }
        if let Some(color) = &self.fallback_color {
            parts.push((
                "fallback_color",
                ConfigOverrides { fallback_color: Some(color.clone()), ..Self::default() },
            ));
        }
        parts
    }
}

fn parse_number(key: &str, value: &str) -> Result<f64> {
    let parsed = value
        .parse::<f64>()
        .with_context(|| format!("Invalid number '{value}' for '{ATTRIBUTE_PREFIX}{key}'"))?;
    if !parsed.is_finite() {
        bail!("'{ATTRIBUTE_PREFIX}{key}' must be finite, got '{value}'");
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_supported_keys() {
        let pairs = [
            ("parallax-speed", "0.5"),
            ("parallax-min-width", "1024"),
            ("anchor-spacing", "24"),
            ("fallback-color", " #222 "),
        ];
        let overrides = ConfigOverrides::parse(pairs).expect("parse overrides");
        assert_eq!(overrides.parallax_speed, Some(0.5));
        assert_eq!(overrides.parallax_min_width, Some(1024.0));
        assert_eq!(overrides.anchor_spacing, Some(24.0));
        assert_eq!(overrides.fallback_color.as_deref(), Some("#222"));
        assert_eq!(
            overrides.applied_fields(),
            vec!["parallax_speed", "parallax_min_width", "anchor_spacing", "fallback_color"]
        );
    }

    #[test]
    fn latest_pair_wins() {
        let overrides =
            ConfigOverrides::parse([("parallax-speed", "0.1"), ("parallax-speed", "0.2")]).expect("parse");
        assert_eq!(overrides.parallax_speed, Some(0.2));
        assert_eq!(overrides.applied_fields(), vec!["parallax_speed"]);
    }

    #[test]
    fn no_pairs_is_empty() {
        let overrides = ConfigOverrides::parse(Vec::<(String, String)>::new()).expect("parse");
        assert!(overrides.is_empty());
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = ConfigOverrides::parse([("speed", "1")]).unwrap_err();
        assert!(err.to_string().contains("Unknown override"), "unknown keys should error");
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = ConfigOverrides::parse([("anchor-spacing", "wide")]).unwrap_err();
        assert!(err.to_string().contains("Invalid number"));
        let err = ConfigOverrides::parse([("parallax-speed", "inf")]).unwrap_err();
        assert!(err.to_string().contains("must be finite"));
    }

    #[test]
    fn rejects_blank_color() {
        let err = ConfigOverrides::parse([("fallback-color", "  ")]).unwrap_err();
        assert!(err.to_string().contains("Expected a color"));
    }
}
