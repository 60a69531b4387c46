//! Emotion categories.
//!
//! The set of emotions is closed: [`Emotion`] is the identifier, and a
//! [`CategoryTable`] maps every identifier to its display attributes
//! (name, glyph, color). Attributes can be overridden through configuration,
//! identifiers cannot be added.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseEmotionError;

/// Identifier of an emotion category.
///
/// Declaration order is the enumeration order used for summaries and ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Emotion {
    Happy,
    Sad,
    Grateful,
    Angry,
    Excited,
    Anxious,
    Calm,
    Tired,
    Surprised,
}

impl Emotion {
    /// Every category, in enumeration order.
    pub const ALL: [Emotion; 9] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Grateful,
        Emotion::Angry,
        Emotion::Excited,
        Emotion::Anxious,
        Emotion::Calm,
        Emotion::Tired,
        Emotion::Surprised,
    ];

    /// Stable identifier, e.g. `"HAPPY"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "HAPPY",
            Emotion::Sad => "SAD",
            Emotion::Grateful => "GRATEFUL",
            Emotion::Angry => "ANGRY",
            Emotion::Excited => "EXCITED",
            Emotion::Anxious => "ANXIOUS",
            Emotion::Calm => "CALM",
            Emotion::Tired => "TIRED",
            Emotion::Surprised => "SURPRISED",
        }
    }

    /// Position in [`Emotion::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Built-in display attributes.
    pub fn builtin_category(&self) -> EmotionCategory {
        let (display_name, glyph, color_code) = match self {
            Emotion::Happy => ("Happy", "😊", "#FFD700"),
            Emotion::Sad => ("Sad", "😢", "#4682B4"),
            Emotion::Grateful => ("Grateful", "🙏", "#FF69B4"),
            Emotion::Angry => ("Angry", "😠", "#FF4500"),
            Emotion::Excited => ("Excited", "🎉", "#FF8C00"),
            Emotion::Anxious => ("Anxious", "😰", "#9370DB"),
            Emotion::Calm => ("Calm", "😌", "#20B2AA"),
            Emotion::Tired => ("Tired", "😴", "#778899"),
            Emotion::Surprised => ("Surprised", "😲", "#FFD700"),
        };
        EmotionCategory {
            emotion: *self,
            display_name: display_name.to_string(),
            glyph: glyph.to_string(),
            color_code: color_code.to_string(),
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = ParseEmotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseEmotionError {
                input: s.to_string(),
            })
    }
}

/// An RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Neutral gray used when a color code does not parse.
    pub const NEUTRAL: Rgb = Rgb {
        r: 0x80,
        g: 0x80,
        b: 0x80,
    };

    /// Parse `#RRGGBB` or `#AARRGGBB`. Alpha is accepted and dropped.
    pub fn parse(code: &str) -> Option<Rgb> {
        let hex = code.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let rgb = match hex.len() {
            6 => hex,
            8 => &hex[2..],
            _ => return None,
        };
        let channel = |i: usize| u8::from_str_radix(&rgb[i..i + 2], 16).ok();
        Some(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// Parse a color code, substituting `fallback` when it is malformed.
    pub fn parse_or(code: &str, fallback: Rgb) -> Rgb {
        match Rgb::parse(code) {
            Some(rgb) => rgb,
            None => {
                tracing::warn!("invalid color code '{}', using {}", code, fallback);
                fallback
            }
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Display attributes for one emotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionCategory {
    #[serde(rename = "identifier")]
    pub emotion: Emotion,
    pub display_name: String,
    pub glyph: String,
    pub color_code: String,
}

impl EmotionCategory {
    /// `"<glyph> <name>"`, e.g. `😊 Happy`.
    pub fn formatted_display(&self) -> String {
        format!("{} {}", self.glyph, self.display_name)
    }

    /// Resolved display color; malformed codes fall back to [`Rgb::NEUTRAL`].
    pub fn color(&self) -> Rgb {
        self.color_or(Rgb::NEUTRAL)
    }

    pub fn color_or(&self, fallback: Rgb) -> Rgb {
        Rgb::parse_or(&self.color_code, fallback)
    }
}

/// Lookup table holding exactly one [`EmotionCategory`] per [`Emotion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    categories: Vec<EmotionCategory>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CategoryTable {
    /// Table with the built-in attributes for every emotion.
    pub fn builtin() -> Self {
        Self {
            categories: Emotion::ALL.iter().map(Emotion::builtin_category).collect(),
        }
    }

    pub fn get(&self, emotion: Emotion) -> &EmotionCategory {
        &self.categories[emotion.index()]
    }

    /// Replace the attributes of one emotion. `None` keeps the current value.
    pub fn set_attributes(
        &mut self,
        emotion: Emotion,
        display_name: Option<String>,
        glyph: Option<String>,
        color_code: Option<String>,
    ) {
        let category = &mut self.categories[emotion.index()];
        if let Some(name) = display_name {
            category.display_name = name;
        }
        if let Some(glyph) = glyph {
            category.glyph = glyph;
        }
        if let Some(color) = color_code {
            category.color_code = color;
        }
    }

    /// Categories in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = &EmotionCategory> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
