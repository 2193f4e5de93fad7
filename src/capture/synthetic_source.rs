use async_trait::async_trait;
use chrono::Utc;
use image::{DynamicImage, Rgb, RgbImage};
use rand::Rng;

use crate::capture::frame_source::FrameSource;
use crate::common::frame::Frame;
use crate::error::AppError;

const CHANNEL_JITTER: i16 = 12;

/// Stand-in for a camera: renders an overcast-sky base color with per-pixel
/// noise, so the whole pipeline can run on machines without hardware.
pub struct SyntheticSource {
    width: u32,
    height: u32,
    base_color: Rgb<u8>,
}

impl SyntheticSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            base_color: Rgb([120, 128, 140]),
        }
    }

    pub fn with_base_color(mut self, base_color: Rgb<u8>) -> Self {
        self.base_color = base_color;
        self
    }
}

#[async_trait]
impl FrameSource for SyntheticSource {
    async fn next_frame(&mut self) -> Result<Frame, AppError> {
        let mut rng = rand::rng();
        let mut image = RgbImage::new(self.width, self.height);
        for pixel in image.pixels_mut() {
            for channel in 0..3 {
                let jitter = rng.random_range(-CHANNEL_JITTER..=CHANNEL_JITTER);
                let value = i16::from(self.base_color[channel]) + jitter;
                pixel[channel] = value.clamp(0, 255) as u8;
            }
        }
        Ok(Frame::new(DynamicImage::ImageRgb8(image), Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn frames_have_the_configured_dimensions() {
        let mut source = SyntheticSource::new(320, 240);
        let frame = source.next_frame().await.unwrap();
        let rgb = frame.image().to_rgb8();
        assert_eq!(rgb.dimensions(), (320, 240));
    }

    #[tokio::test]
    async fn pixels_stay_within_jitter_of_the_base_color() {
        let mut source = SyntheticSource::new(32, 32).with_base_color(Rgb([100, 110, 120]));
        let frame = source.next_frame().await.unwrap();
        for pixel in frame.image().to_rgb8().pixels() {
            for channel in 0..3 {
                let base = i16::from([100u8, 110, 120][channel]);
                let value = i16::from(pixel[channel]);
                assert!((value - base).abs() <= CHANNEL_JITTER);
            }
        }
    }
}
