use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AnalysisError;
use crate::pipeline::domain::round1;

/// A pixel counts as grey when the spread of its three channels stays
/// below this value.
pub const DEFAULT_GREY_THRESHOLD: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GreynessBand {
    #[serde(rename = "very colorful")]
    VeryColorful,
    #[serde(rename = "colorful")]
    Colorful,
    #[serde(rename = "moderately grey")]
    ModeratelyGrey,
    #[serde(rename = "quite grey")]
    QuiteGrey,
    #[serde(rename = "classic Berlin grey")]
    ClassicBerlinGrey,
}

impl GreynessBand {
    fn from_index(index: f64) -> Self {
        if index < 20.0 {
            GreynessBand::VeryColorful
        } else if index < 40.0 {
            GreynessBand::Colorful
        } else if index < 60.0 {
            GreynessBand::ModeratelyGrey
        } else if index < 80.0 {
            GreynessBand::QuiteGrey
        } else {
            GreynessBand::ClassicBerlinGrey
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GreynessBand::VeryColorful => "very colorful",
            GreynessBand::Colorful => "colorful",
            GreynessBand::ModeratelyGrey => "moderately grey",
            GreynessBand::QuiteGrey => "quite grey",
            GreynessBand::ClassicBerlinGrey => "classic Berlin grey",
        }
    }
}

impl fmt::Display for GreynessBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate grey statistics over a pixel set, all on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreynessSummary {
    pub avg_greyness_level: f64,
    pub grey_percentage: f64,
    pub berlin_grey_index: f64,
    pub description: GreynessBand,
}

/// Scores how grey a pixel set is. A pixel with near-equal channels is
/// grey; the composite index blends the scene-wide channel spread with the
/// share of individually grey pixels.
pub struct GreynessAnalyzer {
    grey_threshold: f64,
}

impl GreynessAnalyzer {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_GREY_THRESHOLD)
    }

    pub fn with_threshold(grey_threshold: f64) -> Self {
        Self { grey_threshold }
    }

    pub fn analyze(&self, pixels: &[Rgb<u8>]) -> Result<GreynessSummary, AnalysisError> {
        if pixels.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "cannot score greyness of an empty pixel set".to_string(),
            ));
        }

        let spreads: Vec<f64> = pixels.iter().map(channel_spread).collect();
        let mean_spread = spreads.iter().sum::<f64>() / spreads.len() as f64;

        // 100 = perfect grey, 0 = maximally split channels
        let avg_greyness_level = 100.0 - (mean_spread / 255.0 * 100.0);
        let grey_pixels = spreads.iter().filter(|s| **s < self.grey_threshold).count();
        let grey_percentage = grey_pixels as f64 / spreads.len() as f64 * 100.0;
        let berlin_grey_index = (avg_greyness_level + grey_percentage) / 2.0;

        Ok(GreynessSummary {
            avg_greyness_level: round1(avg_greyness_level),
            grey_percentage: round1(grey_percentage),
            berlin_grey_index: round1(berlin_grey_index),
            description: GreynessBand::from_index(berlin_grey_index),
        })
    }
}

impl Default for GreynessAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Population standard deviation across the three channels of one pixel.
fn channel_spread(pixel: &Rgb<u8>) -> f64 {
    let r = f64::from(pixel[0]);
    let g = f64::from(pixel[1]);
    let b = f64::from(pixel[2]);
    let mean = (r + g + b) / 3.0;
    let variance = ((r - mean).powi(2) + (g - mean).powi(2) + (b - mean).powi(2)) / 3.0;
    variance.sqrt()
}
