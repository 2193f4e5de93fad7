use chrono::{DateTime, Utc};
use image::{DynamicImage, Rgb, RgbImage};
use indexmap::IndexMap;

use crate::error::AnalysisError;
use crate::pipeline::domain::greyness::GreynessAnalyzer;
use crate::pipeline::domain::mood::MoodClassifier;
use crate::pipeline::domain::palette::{ColorName, ColorNamer};
use crate::pipeline::domain::round1;
use crate::pipeline::domain::snapshot::{ColorStats, SnapshotRecord, Temperature, TimeOfDayFeel};

pub const DEFAULT_GRID_WIDTH: u32 = 16;
pub const DEFAULT_GRID_HEIGHT: u32 = 16;

const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];
const WARM_COLORS: [ColorName; 4] = [
    ColorName::Red,
    ColorName::Orange,
    ColorName::Yellow,
    ColorName::Pink,
];
const COOL_COLORS: [ColorName; 3] = [ColorName::Blue, ColorName::Green, ColorName::Purple];

/// Tunables for one reducer instance.
#[derive(Debug, Clone)]
pub struct ReducerConfig {
    pub grid_width: u32,
    pub grid_height: u32,
    pub grey_threshold: f64,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            grey_threshold: crate::pipeline::domain::greyness::DEFAULT_GREY_THRESHOLD,
        }
    }
}

/// Reduces a full-resolution frame to a small color grid and derives all
/// descriptive statistics from it. Pure and deterministic: the same image
/// and timestamp always produce the same record.
pub struct FrameReducer {
    config: ReducerConfig,
    namer: ColorNamer,
    mood: MoodClassifier,
    greyness: GreynessAnalyzer,
}

impl FrameReducer {
    pub fn new(config: ReducerConfig) -> Self {
        let greyness = GreynessAnalyzer::with_threshold(config.grey_threshold);
        Self {
            config,
            namer: ColorNamer::new(),
            mood: MoodClassifier::new(),
            greyness,
        }
    }

    pub fn reduce(
        &self,
        image: &DynamicImage,
        captured_at: DateTime<Utc>,
    ) -> Result<SnapshotRecord, AnalysisError> {
        let rgb = image.to_rgb8();
        let grid = downsample(&rgb, self.config.grid_width, self.config.grid_height)?;

        // grid shape only matters for storage; every statistic runs over the
        // flat pixel sequence
        let pixels: Vec<Rgb<u8>> = grid.iter().flatten().map(|cell| Rgb(*cell)).collect();

        let average_rgb = truncated_mean_rgb(&pixels);
        let hex_color = format!(
            "#{:02x}{:02x}{:02x}",
            average_rgb[0], average_rgb[1], average_rgb[2]
        );
        let dominant_color = self.namer.name(&Rgb(average_rgb));

        let brightness_percent = round1(mean_luma_percent(&pixels));
        let color_variety = round1(mean_channel_spread(&pixels));

        let (h, s, v) = rgb_to_hsv(average_rgb);
        let mood = self.mood.mood(h, s, v);
        let hsv = [
            (h * 360.0).round() as u16,
            (s * 100.0).round() as u16,
            (v * 100.0).round() as u16,
        ];

        let greyness = self.greyness.analyze(&pixels)?;
        let color_distribution = self.distribution(&pixels);
        let temperature_feel = temperature(&color_distribution);
        let time_of_day_feel = time_of_day(brightness_percent);

        Ok(SnapshotRecord {
            timestamp: SnapshotRecord::format_timestamp(captured_at),
            grid,
            stats: ColorStats {
                average_rgb,
                hex_color,
                dominant_color,
                brightness_percent,
                color_variety,
                hsv,
                mood,
                greyness,
                color_distribution,
                temperature_feel,
                time_of_day_feel,
            },
        })
    }

    /// Names every pixel and converts the tallies to percentages. Each
    /// share is rounded on its own, so the sum can land slightly off 100.
    fn distribution(&self, pixels: &[Rgb<u8>]) -> IndexMap<ColorName, f64> {
        let mut counts: IndexMap<ColorName, usize> = IndexMap::new();
        for pixel in pixels {
            *counts.entry(self.namer.name(pixel)).or_insert(0) += 1;
        }
        let total = pixels.len() as f64;
        counts
            .into_iter()
            .map(|(name, count)| (name, round1(count as f64 / total * 100.0)))
            .collect()
    }
}

/// Area-averaging downsample: each output cell is the area-weighted mean of
/// the source region it covers, with partial source pixels contributing by
/// their overlap fraction. Preserves overall color balance at extreme
/// ratios where point sampling would not.
fn downsample(
    image: &RgbImage,
    grid_width: u32,
    grid_height: u32,
) -> Result<Vec<Vec<[u8; 3]>>, AnalysisError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(AnalysisError::InvalidInput(format!(
            "cannot reduce a {}x{} image",
            width, height
        )));
    }
    if grid_width == 0 || grid_height == 0 {
        return Err(AnalysisError::ArithmeticDegenerate(format!(
            "target grid {}x{} has no cells",
            grid_width, grid_height
        )));
    }

    let cell_width = f64::from(width) / f64::from(grid_width);
    let cell_height = f64::from(height) / f64::from(grid_height);

    let mut rows = Vec::with_capacity(grid_height as usize);
    for grid_y in 0..grid_height {
        let y0 = f64::from(grid_y) * cell_height;
        let y1 = y0 + cell_height;
        let mut row = Vec::with_capacity(grid_width as usize);
        for grid_x in 0..grid_width {
            let x0 = f64::from(grid_x) * cell_width;
            let x1 = x0 + cell_width;
            row.push(average_region(image, x0, x1, y0, y1));
        }
        rows.push(row);
    }
    Ok(rows)
}

fn average_region(image: &RgbImage, x0: f64, x1: f64, y0: f64, y1: f64) -> [u8; 3] {
    let x_end = (x1.ceil() as u32).min(image.width());
    let y_end = (y1.ceil() as u32).min(image.height());

    let mut acc = [0.0f64; 3];
    let mut covered = 0.0f64;
    for y in (y0.floor() as u32)..y_end {
        let weight_y = overlap(y, y0, y1);
        for x in (x0.floor() as u32)..x_end {
            let weight = overlap(x, x0, x1) * weight_y;
            if weight <= 0.0 {
                continue;
            }
            let pixel = image.get_pixel(x, y);
            for channel in 0..3 {
                acc[channel] += weight * f64::from(pixel[channel]);
            }
            covered += weight;
        }
    }

    [
        (acc[0] / covered).round() as u8,
        (acc[1] / covered).round() as u8,
        (acc[2] / covered).round() as u8,
    ]
}

/// Length of the intersection between source pixel `index` and [lo, hi).
fn overlap(index: u32, lo: f64, hi: f64) -> f64 {
    let start = f64::from(index).max(lo);
    let end = f64::from(index + 1).min(hi);
    (end - start).max(0.0)
}

/// Per-channel arithmetic mean, truncated toward zero. Truncation (not
/// rounding) feeds the hex, HSV and dominant-name derivations.
fn truncated_mean_rgb(pixels: &[Rgb<u8>]) -> [u8; 3] {
    let n = pixels.len() as f64;
    let mut sums = [0.0f64; 3];
    for pixel in pixels {
        for channel in 0..3 {
            sums[channel] += f64::from(pixel[channel]);
        }
    }
    [
        (sums[0] / n) as u8,
        (sums[1] / n) as u8,
        (sums[2] / n) as u8,
    ]
}

fn mean_luma_percent(pixels: &[Rgb<u8>]) -> f64 {
    let total: f64 = pixels
        .iter()
        .map(|pixel| {
            LUMA_WEIGHTS[0] * f64::from(pixel[0])
                + LUMA_WEIGHTS[1] * f64::from(pixel[1])
                + LUMA_WEIGHTS[2] * f64::from(pixel[2])
        })
        .sum();
    total / pixels.len() as f64 / 255.0 * 100.0
}

/// Mean of the three per-channel population standard deviations across the
/// whole pixel set.
fn mean_channel_spread(pixels: &[Rgb<u8>]) -> f64 {
    let n = pixels.len() as f64;
    let mut spread_sum = 0.0;
    for channel in 0..3 {
        let mean: f64 = pixels.iter().map(|p| f64::from(p[channel])).sum::<f64>() / n;
        let variance: f64 = pixels
            .iter()
            .map(|p| (f64::from(p[channel]) - mean).powi(2))
            .sum::<f64>()
            / n;
        spread_sum += variance.sqrt();
    }
    spread_sum / 3.0
}

/// Standard RGB to HSV transform over normalized [0, 1] channels.
fn rgb_to_hsv(rgb: [u8; 3]) -> (f64, f64, f64) {
    let r = f64::from(rgb[0]) / 255.0;
    let g = f64::from(rgb[1]) / 255.0;
    let b = f64::from(rgb[2]) / 255.0;
    let max_c = r.max(g).max(b);
    let min_c = r.min(g).min(b);
    let v = max_c;
    if max_c == min_c {
        return (0.0, 0.0, v);
    }
    let s = (max_c - min_c) / max_c;
    let rc = (max_c - r) / (max_c - min_c);
    let gc = (max_c - g) / (max_c - min_c);
    let bc = (max_c - b) / (max_c - min_c);
    let h = if r == max_c {
        bc - gc
    } else if g == max_c {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    ((h / 6.0).rem_euclid(1.0), s, v)
}

fn temperature(distribution: &IndexMap<ColorName, f64>) -> Temperature {
    let warm: f64 = WARM_COLORS
        .iter()
        .filter_map(|name| distribution.get(name))
        .sum();
    let cool: f64 = COOL_COLORS
        .iter()
        .filter_map(|name| distribution.get(name))
        .sum();
    if warm > cool {
        Temperature::Warm
    } else {
        Temperature::Cool
    }
}

fn time_of_day(brightness_percent: f64) -> TimeOfDayFeel {
    if brightness_percent < 30.0 {
        TimeOfDayFeel::Night
    } else if brightness_percent < 50.0 {
        TimeOfDayFeel::EveningDawn
    } else if brightness_percent < 70.0 {
        TimeOfDayFeel::DayCloudy
    } else {
        TimeOfDayFeel::DaySunny
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::domain::mood::Mood;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0).unwrap()
    }

    fn uniform_image(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    #[test]
    fn uniform_image_reduces_to_a_uniform_record() {
        let reducer = FrameReducer::new(ReducerConfig::default());
        let record = reducer.reduce(&uniform_image(64, 48, [0, 0, 255]), at()).unwrap();

        assert_eq!(record.grid.len(), 16);
        assert!(record.grid.iter().all(|row| row.len() == 16));
        assert!(record
            .grid
            .iter()
            .flatten()
            .all(|cell| *cell == [0, 0, 255]));

        let stats = &record.stats;
        assert_eq!(stats.average_rgb, [0, 0, 255]);
        assert_eq!(stats.hex_color, "#0000ff");
        assert_eq!(stats.dominant_color, ColorName::Blue);
        assert_eq!(stats.brightness_percent, 11.4);
        assert_eq!(stats.color_variety, 0.0);
        assert_eq!(stats.hsv, [240, 100, 100]);
        assert_eq!(stats.mood, Mood::Calm);
        assert_eq!(stats.color_distribution.len(), 1);
        assert_eq!(stats.color_distribution[&ColorName::Blue], 100.0);
        assert_eq!(stats.temperature_feel, Temperature::Cool);
        assert_eq!(stats.time_of_day_feel, TimeOfDayFeel::Night);
    }

    #[test]
    fn reduction_is_idempotent() {
        let reducer = FrameReducer::new(ReducerConfig::default());
        let image = uniform_image(32, 32, [200, 90, 40]);
        let first = reducer.reduce(&image, at()).unwrap();
        let second = reducer.reduce(&image, at()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn average_rgb_is_truncated_not_rounded() {
        let mut image = RgbImage::new(2, 1);
        image.put_pixel(0, 0, Rgb([0, 0, 0]));
        image.put_pixel(1, 0, Rgb([255, 255, 255]));
        let reducer = FrameReducer::new(ReducerConfig {
            grid_width: 2,
            grid_height: 1,
            ..ReducerConfig::default()
        });
        let record = reducer.reduce(&DynamicImage::ImageRgb8(image), at()).unwrap();

        // the mean is 127.5 per channel; the integer cast keeps 127
        assert_eq!(record.stats.average_rgb, [127, 127, 127]);
        assert_eq!(record.stats.hex_color, "#7f7f7f");
        assert_eq!(record.stats.color_variety, 127.5);
        // black and white split the distribution evenly, neither is warm or
        // cool, and the tie lands on cool
        assert_eq!(record.stats.color_distribution[&ColorName::Black], 50.0);
        assert_eq!(record.stats.color_distribution[&ColorName::White], 50.0);
        assert_eq!(record.stats.temperature_feel, Temperature::Cool);
        assert_eq!(record.stats.time_of_day_feel, TimeOfDayFeel::DayCloudy);
    }

    #[test]
    fn downsampling_weights_partial_source_pixels_by_overlap() {
        let mut image = RgbImage::new(3, 1);
        image.put_pixel(0, 0, Rgb([30, 60, 90]));
        image.put_pixel(1, 0, Rgb([90, 120, 150]));
        image.put_pixel(2, 0, Rgb([150, 180, 210]));
        let grid = downsample(&image, 2, 1).unwrap();
        // each cell covers 1.5 source pixels
        assert_eq!(grid[0][0], [50, 80, 110]);
        assert_eq!(grid[0][1], [130, 160, 190]);
    }

    #[test]
    fn zero_sized_image_is_rejected() {
        let reducer = FrameReducer::new(ReducerConfig::default());
        let result = reducer.reduce(&DynamicImage::ImageRgb8(RgbImage::new(0, 0)), at());
        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
    }

    #[test]
    fn zero_cell_grid_is_rejected() {
        let reducer = FrameReducer::new(ReducerConfig {
            grid_width: 0,
            grid_height: 16,
            ..ReducerConfig::default()
        });
        let result = reducer.reduce(&uniform_image(8, 8, [1, 2, 3]), at());
        assert!(matches!(
            result,
            Err(AnalysisError::ArithmeticDegenerate(_))
        ));
    }

    #[test]
    fn saturated_red_reads_as_passionate_and_warm() {
        let reducer = FrameReducer::new(ReducerConfig::default());
        let record = reducer.reduce(&uniform_image(20, 20, [255, 0, 0]), at()).unwrap();
        assert_eq!(record.stats.hsv, [0, 100, 100]);
        assert_eq!(record.stats.mood, Mood::Passionate);
        assert_eq!(record.stats.temperature_feel, Temperature::Warm);
        assert_eq!(record.stats.dominant_color, ColorName::Red);
    }

    #[test]
    fn brightness_bands_pick_the_time_of_day() {
        assert_eq!(time_of_day(10.0), TimeOfDayFeel::Night);
        assert_eq!(time_of_day(30.0), TimeOfDayFeel::EveningDawn);
        assert_eq!(time_of_day(50.0), TimeOfDayFeel::DayCloudy);
        assert_eq!(time_of_day(70.0), TimeOfDayFeel::DaySunny);
    }

    #[test]
    fn hsv_matches_the_standard_transform() {
        assert_eq!(rgb_to_hsv([255, 0, 0]), (0.0, 1.0, 1.0));
        assert_eq!(rgb_to_hsv([0, 255, 0]), (1.0 / 3.0, 1.0, 1.0));
        assert_eq!(rgb_to_hsv([128, 128, 128]), (0.0, 0.0, 128.0 / 255.0));
        let (h, s, v) = rgb_to_hsv([0, 0, 255]);
        assert!((h - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!((s, v), (1.0, 1.0));
    }

    #[test]
    fn timestamp_carries_through_to_the_record() {
        let reducer = FrameReducer::new(ReducerConfig::default());
        let record = reducer.reduce(&uniform_image(8, 8, [5, 5, 5]), at()).unwrap();
        assert_eq!(record.timestamp, "2026-08-07_12-00-00");
    }
}
