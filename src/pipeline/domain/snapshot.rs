use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pipeline::domain::greyness::GreynessSummary;
use crate::pipeline::domain::mood::Mood;
use crate::pipeline::domain::palette::ColorName;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Temperature {
    Warm,
    Cool,
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Temperature::Warm => "warm",
            Temperature::Cool => "cool",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeOfDayFeel {
    #[serde(rename = "night")]
    Night,
    #[serde(rename = "evening/dawn")]
    EveningDawn,
    #[serde(rename = "day (cloudy)")]
    DayCloudy,
    #[serde(rename = "day (sunny)")]
    DaySunny,
}

impl fmt::Display for TimeOfDayFeel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TimeOfDayFeel::Night => "night",
            TimeOfDayFeel::EveningDawn => "evening/dawn",
            TimeOfDayFeel::DayCloudy => "day (cloudy)",
            TimeOfDayFeel::DaySunny => "day (sunny)",
        })
    }
}

/// Every statistic derived from one reduced grid.
///
/// `color_distribution` keeps first-seen pixel order, so serializing the
/// same grid twice produces byte-identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStats {
    pub average_rgb: [u8; 3],
    pub hex_color: String,
    pub dominant_color: ColorName,
    pub brightness_percent: f64,
    pub color_variety: f64,
    pub hsv: [u16; 3],
    pub mood: Mood,
    pub greyness: GreynessSummary,
    pub color_distribution: IndexMap<ColorName, f64>,
    pub temperature_feel: Temperature,
    pub time_of_day_feel: TimeOfDayFeel,
}

/// The output of one reduction cycle: capture time, the reduced grid and
/// its statistics. Immutable once assembled; the journal owns storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub timestamp: String,
    pub grid: Vec<Vec<[u8; 3]>>,
    pub stats: ColorStats,
}

impl SnapshotRecord {
    pub fn format_timestamp(captured_at: DateTime<Utc>) -> String {
        captured_at.format(TIMESTAMP_FORMAT).to_string()
    }
}
