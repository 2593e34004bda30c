//! Word packs and their display attributes
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque pack identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackId(Uuid);

impl PackId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PackId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// RGB color with normalized channels, serialized as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct PackColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl PackColor {
    pub const BLUE: Self = Self::raw(0.0, 0.478, 1.0);
    pub const CYAN: Self = Self::raw(0.196, 0.678, 0.902);
    pub const GRAY: Self = Self::raw(0.557, 0.557, 0.576);
    pub const PURPLE: Self = Self::raw(0.686, 0.322, 0.871);
    pub const ORANGE: Self = Self::raw(1.0, 0.584, 0.0);
    pub const PINK: Self = Self::raw(1.0, 0.176, 0.333);
    pub const INDIGO: Self = Self::raw(0.345, 0.337, 0.839);
    pub const GREEN: Self = Self::raw(0.204, 0.78, 0.349);
    pub const RED: Self = Self::raw(1.0, 0.231, 0.188);
    pub const TEAL: Self = Self::raw(0.188, 0.69, 0.78);
    pub const NEON_RED: Self = Self::raw(1.0, 0.3, 0.3);
    pub const NEON_GREEN: Self = Self::raw(0.2, 0.9, 0.5);

    const fn raw(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Build a color, clamping each channel into `[0, 1]`. Non-finite
    /// channels become mid-gray.
    #[must_use]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: normalize_channel(r),
            g: normalize_channel(g),
            b: normalize_channel(b),
        }
    }

    #[must_use]
    pub fn channels(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// 8-bit representation, e.g. for a `#rrggbb` string in a UI layer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgb8(self) -> [u8; 3] {
        self.channels().map(|c| (c * 255.0).round() as u8)
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Default for PackColor {
    fn default() -> Self {
        Self::raw(0.5, 0.5, 0.5)
    }
}

impl From<[f64; 3]> for PackColor {
    fn from([r, g, b]: [f64; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<PackColor> for [f64; 3] {
    fn from(value: PackColor) -> Self {
        value.channels()
    }
}

fn normalize_channel(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.5
    }
}

/// Icon tokens offered by the pack editor.
pub const AVAILABLE_ICONS: [&str; 33] = [
    "shuffle",
    "person.2.fill",
    "globe.europe.africa.fill",
    "building.2.fill",
    "car.fill",
    "pawprint.fill",
    "fork.knife",
    "airplane",
    "sportscourt.fill",
    "lightbulb.fill",
    "gamecontroller.fill",
    "film.fill",
    "cart.fill",
    "briefcase.fill",
    "music.note",
    "star.fill",
    "heart.fill",
    "bolt.fill",
    "flame.fill",
    "snowflake",
    "leaf.fill",
    "flag.fill",
    "map.fill",
    "gift.fill",
    "mustache.fill",
    "house.fill",
    "banknote.fill",
    "laptopcomputer",
    "tv.fill",
    "figure.run",
    "exclamationmark.triangle.fill",
    "mouth.fill",
    "bed.double.fill",
];

/// A named, colored collection of candidate secret words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordPack {
    pub id: PackId,
    pub name: String,
    pub icon: String,
    pub color: PackColor,
    pub words: Vec<String>,
    #[serde(default)]
    pub is_selected: bool,
    /// Synthesized from live inputs; never persisted or exported.
    #[serde(default)]
    pub is_generated: bool,
    #[serde(default)]
    pub is_adult: bool,
}

impl WordPack {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        icon: impl Into<String>,
        color: PackColor,
        words: Vec<String>,
    ) -> Self {
        Self {
            id: PackId::new(),
            name: name.into(),
            icon: icon.into(),
            color,
            words,
            is_selected: false,
            is_generated: false,
            is_adult: false,
        }
    }

    #[must_use]
    pub fn adult(mut self) -> Self {
        self.is_adult = true;
        self
    }

    #[must_use]
    pub fn selected(mut self) -> Self {
        self.is_selected = true;
        self
    }

    #[must_use]
    pub fn contains_word(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// Convenience for building word lists from string literals.
#[must_use]
pub fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| (*w).to_string()).collect()
}
