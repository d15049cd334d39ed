use serde::{Deserialize, Serialize};

use crate::intro::IntroSequence;
use crate::stamp::StampSpec;

const EMBEDDED_CATALOG: &str = include_str!("../catalog.json");

/// Everything the sketch needs besides pixels: intro copy, asset paths, stamps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub intro: IntroSequence,
    pub map: MapAsset,
    pub font: FontAsset,
    pub stamps: Vec<StampSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapAsset {
    pub src: String,
    /// Vertical shift of the map center, in CSS pixels.
    pub top_offset: f64,
}

impl Default for MapAsset {
    fn default() -> Self {
        Self {
            src: "/map/mapFinal.png".to_string(),
            top_offset: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontAsset {
    pub family: String,
    pub src: String,
}

impl Default for FontAsset {
    fn default() -> Self {
        Self {
            family: "Space Mono".to_string(),
            src: "/fonts/SpaceMono-Regular.ttf".to_string(),
        }
    }
}

impl FontAsset {
    /// CSS font shorthand with a monospace fallback.
    pub fn css(&self, size_px: f64) -> String {
        format!("{size_px:.1}px '{}', monospace", self.family)
    }
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn embedded() -> Result<Self, String> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        let catalog: Catalog =
            serde_json::from_str(json).map_err(|e| format!("invalid catalog JSON: {e}"))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), String> {
        let intro = &self.intro;
        if intro.phrases.is_empty() {
            return Err("intro needs at least one phrase".into());
        }
        if intro.phrase_duration_ms.is_nan() || intro.phrase_duration_ms <= 0.0 {
            return Err(format!(
                "phrase_duration_ms must be positive, got {}",
                intro.phrase_duration_ms
            ));
        }
        if intro.fade_duration_ms.is_nan()
            || intro.fade_duration_ms < 0.0
            || intro.fade_duration_ms * 2.0 > intro.phrase_duration_ms
        {
            return Err(format!(
                "fade_duration_ms must be within 0..={}, got {}",
                intro.phrase_duration_ms / 2.0,
                intro.fade_duration_ms
            ));
        }
        if !self.map.top_offset.is_finite() {
            return Err("map.top_offset must be finite".into());
        }

        for (idx, stamp) in self.stamps.iter().enumerate() {
            let in_unit = |v: f64| (0.0..=1.0).contains(&v);
            if !in_unit(stamp.x_percent) || !in_unit(stamp.y_percent) {
                return Err(format!(
                    "stamp {idx}: position ({}, {}) is outside the map",
                    stamp.x_percent, stamp.y_percent
                ));
            }
            if stamp.size_percent.is_nan() || stamp.size_percent <= 0.0 || stamp.size_percent > 1.0 {
                return Err(format!(
                    "stamp {idx}: size_percent must be in (0, 1], got {}",
                    stamp.size_percent
                ));
            }
            if !(stamp.link.starts_with("https://") || stamp.link.starts_with("http://")) {
                return Err(format!("stamp {idx}: link {:?} is not http(s)", stamp.link));
            }
            if stamp.color_src.is_empty() || stamp.mono_src.is_empty() {
                return Err(format!("stamp {idx}: both image sources are required"));
            }
        }
        Ok(())
    }
}
