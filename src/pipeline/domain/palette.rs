use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of names a pixel can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorName {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Brown,
    Black,
    White,
    Gray,
}

impl ColorName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorName::Red => "red",
            ColorName::Orange => "orange",
            ColorName::Yellow => "yellow",
            ColorName::Green => "green",
            ColorName::Blue => "blue",
            ColorName::Purple => "purple",
            ColorName::Pink => "pink",
            ColorName::Brown => "brown",
            ColorName::Black => "black",
            ColorName::White => "white",
            ColorName::Gray => "gray",
        }
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference values, in evaluation order. Ties resolve to the earliest entry.
pub const REFERENCE_PALETTE: [(ColorName, [u8; 3]); 11] = [
    (ColorName::Red, [255, 0, 0]),
    (ColorName::Orange, [255, 165, 0]),
    (ColorName::Yellow, [255, 255, 0]),
    (ColorName::Green, [0, 255, 0]),
    (ColorName::Blue, [0, 0, 255]),
    (ColorName::Purple, [128, 0, 128]),
    (ColorName::Pink, [255, 192, 203]),
    (ColorName::Brown, [165, 42, 42]),
    (ColorName::Black, [0, 0, 0]),
    (ColorName::White, [255, 255, 255]),
    (ColorName::Gray, [128, 128, 128]),
];

/// Maps a pixel to the nearest named reference color.
pub struct ColorNamer {
    palette: Vec<(ColorName, [u8; 3])>,
}

impl ColorNamer {
    pub fn new() -> Self {
        Self::with_palette(REFERENCE_PALETTE.to_vec())
    }

    pub fn with_palette(palette: Vec<(ColorName, [u8; 3])>) -> Self {
        assert!(!palette.is_empty(), "palette must hold at least one entry");
        Self { palette }
    }

    /// Nearest palette entry by squared Euclidean distance in RGB space.
    pub fn name(&self, pixel: &Rgb<u8>) -> ColorName {
        let mut min_dist = i32::MAX;
        let mut closest = self.palette[0].0;
        for (name, reference) in &self.palette {
            let dist = squared_distance(pixel, reference);
            if dist < min_dist {
                min_dist = dist;
                closest = *name;
            }
        }
        closest
    }
}

impl Default for ColorNamer {
    fn default() -> Self {
        Self::new()
    }
}

fn squared_distance(pixel: &Rgb<u8>, reference: &[u8; 3]) -> i32 {
    (0..3)
        .map(|c| {
            let delta = i32::from(pixel[c]) - i32::from(reference[c]);
            delta * delta
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_reference_values_map_to_their_own_name() {
        let namer = ColorNamer::new();
        assert_eq!(namer.name(&Rgb([0, 0, 0])), ColorName::Black);
        assert_eq!(namer.name(&Rgb([255, 255, 255])), ColorName::White);
        assert_eq!(namer.name(&Rgb([255, 0, 0])), ColorName::Red);
    }

    #[test]
    fn nearby_values_snap_to_the_closest_reference() {
        let namer = ColorNamer::new();
        assert_eq!(namer.name(&Rgb([10, 12, 8])), ColorName::Black);
        assert_eq!(namer.name(&Rgb([120, 130, 125])), ColorName::Gray);
        assert_eq!(namer.name(&Rgb([250, 160, 10])), ColorName::Orange);
    }

    #[test]
    fn naming_is_deterministic() {
        let namer = ColorNamer::new();
        let pixel = Rgb([93, 187, 44]);
        let first = namer.name(&pixel);
        for _ in 0..10 {
            assert_eq!(namer.name(&pixel), first);
        }
    }

    #[test]
    fn every_result_is_a_palette_entry() {
        let namer = ColorNamer::new();
        for value in (0..=255u8).step_by(17) {
            let name = namer.name(&Rgb([value, value.wrapping_mul(3), value.wrapping_add(91)]));
            assert!(REFERENCE_PALETTE.iter().any(|(n, _)| *n == name));
        }
    }

    #[test]
    fn ties_resolve_to_the_earliest_palette_entry() {
        // equidistant from red and green
        let namer = ColorNamer::with_palette(vec![
            (ColorName::Red, [10, 0, 0]),
            (ColorName::Green, [0, 10, 0]),
        ]);
        assert_eq!(namer.name(&Rgb([5, 5, 0])), ColorName::Red);
    }
}
