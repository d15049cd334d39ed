use serde::{Deserialize, Serialize};

pub const DEFAULT_PHRASE_DURATION_MS: f64 = 8000.0;
pub const DEFAULT_FADE_DURATION_MS: f64 = 1000.0;

const MARGIN_FRACTION: f64 = 0.15;
const BOX_HEIGHT_FRACTION: f64 = 0.45;
const FONT_SIZE_FRACTION: f64 = 0.02;
const FONT_SIZE_MIN: f64 = 14.0;
const FONT_SIZE_MAX: f64 = 22.0;
const LINE_HEIGHT_FACTOR: f64 = 1.5;

/// Sequential phrase reveal shown before the map becomes interactive.
///
/// Each phrase owns a fixed time slot. Inside a slot the text fades in over
/// `fade_duration_ms`, holds at full opacity, then fades out over the last
/// `fade_duration_ms` of the slot. The sequence does not loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroSequence {
    pub phrases: Vec<String>,
    pub phrase_duration_ms: f64,
    pub fade_duration_ms: f64,
}

impl Default for IntroSequence {
    fn default() -> Self {
        Self {
            phrases: Vec::new(),
            phrase_duration_ms: DEFAULT_PHRASE_DURATION_MS,
            fade_duration_ms: DEFAULT_FADE_DURATION_MS,
        }
    }
}

/// What the intro wants on screen at a given instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntroFrame<'a> {
    Phrase {
        index: usize,
        text: &'a str,
        /// Opacity on the 0..=255 scale.
        alpha: f64,
    },
    Complete,
}

impl IntroSequence {
    pub fn new(phrases: Vec<String>, phrase_duration_ms: f64, fade_duration_ms: f64) -> Self {
        Self {
            phrases,
            phrase_duration_ms,
            fade_duration_ms,
        }
    }

    pub fn total_duration_ms(&self) -> f64 {
        self.phrase_duration_ms * self.phrases.len() as f64
    }

    pub fn is_active(&self, elapsed_ms: f64) -> bool {
        elapsed_ms.max(0.0) < self.total_duration_ms()
    }

    /// Index of the phrase that owns `elapsed_ms`, or `None` once the sequence is over.
    pub fn phrase_index(&self, elapsed_ms: f64) -> Option<usize> {
        if !self.is_active(elapsed_ms) || self.phrase_duration_ms <= 0.0 {
            return None;
        }
        let index = (elapsed_ms.max(0.0) / self.phrase_duration_ms).floor() as usize;
        (index < self.phrases.len()).then_some(index)
    }

    /// Time inside the current phrase slot.
    pub fn phrase_time(&self, elapsed_ms: f64) -> f64 {
        if self.phrase_duration_ms <= 0.0 {
            return 0.0;
        }
        elapsed_ms.max(0.0) % self.phrase_duration_ms
    }

    /// Linear fade-in / hold / fade-out envelope.
    pub fn alpha_at(&self, phrase_time: f64) -> f64 {
        let fade = self.fade_duration_ms;
        let end = self.phrase_duration_ms;
        if fade <= 0.0 {
            return 255.0;
        }
        let alpha = if phrase_time < fade {
            map_range(phrase_time, 0.0, fade, 0.0, 255.0)
        } else if phrase_time > end - fade {
            map_range(phrase_time, end - fade, end, 255.0, 0.0)
        } else {
            255.0
        };
        alpha.clamp(0.0, 255.0)
    }

    pub fn frame(&self, elapsed_ms: f64) -> IntroFrame<'_> {
        let Some(index) = self.phrase_index(elapsed_ms) else {
            return IntroFrame::Complete;
        };
        IntroFrame::Phrase {
            index,
            text: &self.phrases[index],
            alpha: self.alpha_at(self.phrase_time(elapsed_ms)),
        }
    }
}

/// Re-map `value` from `[in_min, in_max]` onto `[out_min, out_max]` without clamping.
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let span = in_max - in_min;
    if span.abs() < f64::EPSILON {
        return out_min;
    }
    out_min + (value - in_min) / span * (out_max - out_min)
}

/// Text box the intro phrase is centered in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntroLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub line_height: f64,
}

impl IntroLayout {
    pub fn for_canvas(canvas_w: f64, canvas_h: f64) -> Self {
        let margin = canvas_w * MARGIN_FRACTION;
        let width = (canvas_w - margin * 2.0).max(0.0);
        let height = (canvas_h * BOX_HEIGHT_FRACTION).max(0.0);
        let font_size = (canvas_w * FONT_SIZE_FRACTION).clamp(FONT_SIZE_MIN, FONT_SIZE_MAX);
        Self {
            x: (canvas_w - width) / 2.0,
            y: (canvas_h - height) / 2.0,
            width,
            height,
            font_size,
            line_height: font_size * LINE_HEIGHT_FACTOR,
        }
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Baseline-middle y of each line for `line_count` lines centered in the box.
    pub fn line_positions(&self, line_count: usize) -> Vec<f64> {
        let block_h = self.line_height * line_count as f64;
        let top = self.y + (self.height - block_h) / 2.0;
        (0..line_count)
            .map(|i| top + self.line_height * (i as f64 + 0.5))
            .collect()
    }

    /// How many lines fit in the box height (always at least one).
    pub fn max_lines(&self) -> usize {
        if self.line_height <= 0.0 {
            return 1;
        }
        ((self.height / self.line_height).floor() as usize).max(1)
    }

    /// Wrap `text` to the box width, dropping lines that overflow the box height.
    pub fn fit_lines(&self, text: &str, measure: impl FnMut(&str) -> f64) -> Vec<String> {
        let mut lines = wrap_words(text, self.width, measure);
        lines.truncate(self.max_lines());
        lines
    }
}

/// Greedy word wrap against a host-provided width measurement.
///
/// A word wider than `max_width` gets a line of its own.
pub fn wrap_words(text: &str, max_width: f64, mut measure: impl FnMut(&str) -> f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
