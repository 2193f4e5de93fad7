use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Neutral,
    Mysterious,
    Passionate,
    Warm,
    Cheerful,
    Peaceful,
    Calm,
    Creative,
    Romantic,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Neutral => "neutral",
            Mood::Mysterious => "mysterious",
            Mood::Passionate => "passionate",
            Mood::Warm => "warm",
            Mood::Cheerful => "cheerful",
            Mood::Peaceful => "peaceful",
            Mood::Calm => "calm",
            Mood::Creative => "creative",
            Mood::Romantic => "romantic",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies an HSV triple into a mood label via an ordered rule list.
/// The saturation and value rules must stay in front: hue carries no
/// information for near-grey or near-black colors.
pub struct MoodClassifier;

impl MoodClassifier {
    pub fn new() -> Self {
        Self
    }

    /// `h`, `s` and `v` are in [0, 1]. First matching rule wins.
    pub fn mood(&self, h: f64, s: f64, v: f64) -> Mood {
        if s < 0.15 {
            Mood::Neutral
        } else if v < 0.30 {
            Mood::Mysterious
        } else if h < 0.05 || h > 0.95 {
            Mood::Passionate
        } else if h < 0.12 {
            Mood::Warm
        } else if h < 0.20 {
            Mood::Cheerful
        } else if h < 0.45 {
            Mood::Peaceful
        } else if h < 0.70 {
            Mood::Calm
        } else if h < 0.80 {
            Mood::Creative
        } else {
            Mood::Romantic
        }
    }
}

impl Default for MoodClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_saturation_overrides_hue() {
        let classifier = MoodClassifier::new();
        assert_eq!(classifier.mood(0.5, 0.05, 0.9), Mood::Neutral);
    }

    #[test]
    fn low_value_overrides_hue_for_saturated_colors() {
        let classifier = MoodClassifier::new();
        assert_eq!(classifier.mood(0.5, 0.8, 0.1), Mood::Mysterious);
    }

    #[test]
    fn hue_bands_map_in_order() {
        let classifier = MoodClassifier::new();
        assert_eq!(classifier.mood(0.02, 0.8, 0.8), Mood::Passionate);
        assert_eq!(classifier.mood(0.98, 0.8, 0.8), Mood::Passionate);
        assert_eq!(classifier.mood(0.08, 0.8, 0.8), Mood::Warm);
        assert_eq!(classifier.mood(0.15, 0.8, 0.8), Mood::Cheerful);
        assert_eq!(classifier.mood(0.33, 0.8, 0.8), Mood::Peaceful);
        assert_eq!(classifier.mood(0.60, 0.8, 0.8), Mood::Calm);
        assert_eq!(classifier.mood(0.75, 0.8, 0.8), Mood::Creative);
        assert_eq!(classifier.mood(0.90, 0.8, 0.8), Mood::Romantic);
    }

    #[test]
    fn band_boundaries_are_exclusive() {
        let classifier = MoodClassifier::new();
        // s == 0.15 falls through to the hue rules
        assert_eq!(classifier.mood(0.5, 0.15, 0.9), Mood::Calm);
        // h == 0.05 is past the passionate band
        assert_eq!(classifier.mood(0.05, 0.8, 0.8), Mood::Warm);
    }
}
