use chrono::{DateTime, Utc};
use image::{DynamicImage, RgbImage};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AnalysisError;

/// One captured image of the scene. Everything downstream of `Frame` works
/// in RGB channel order; sources that deliver other orders convert here.
#[derive(Clone)]
pub struct Frame {
    image: Arc<DynamicImage>,
    captured_at: DateTime<Utc>,
    frame_id: Uuid,
}

impl Frame {
    pub fn new(image: DynamicImage, captured_at: DateTime<Utc>) -> Self {
        Self {
            image: Arc::new(image),
            captured_at,
            frame_id: Uuid::new_v4(),
        }
    }

    /// Builds a frame from a raw BGRA display buffer, the order most camera
    /// stacks hand out. Alpha is dropped and the color channels are swapped
    /// into RGB.
    pub fn from_bgra_buffer(
        width: u32,
        height: u32,
        buffer: &[u8],
        captured_at: DateTime<Utc>,
    ) -> Result<Self, AnalysisError> {
        let expected = width as usize * height as usize * 4;
        if buffer.len() != expected {
            return Err(AnalysisError::InvalidInput(format!(
                "BGRA buffer holds {} bytes, expected {} for {}x{}",
                buffer.len(),
                expected,
                width,
                height
            )));
        }
        let mut rgb_buffer: Vec<u8> = Vec::with_capacity(buffer.len() / 4 * 3);
        // -- pixel order is B G R A; convert to R G B
        for chunk in buffer.chunks_exact(4) {
            rgb_buffer.extend_from_slice(&[chunk[2], chunk[1], chunk[0]]);
        }
        let rgb_image = RgbImage::from_raw(width, height, rgb_buffer).ok_or_else(|| {
            AnalysisError::InvalidInput(format!("{}x{} does not fit the converted buffer", width, height))
        })?;
        Ok(Self::new(DynamicImage::ImageRgb8(rgb_image), captured_at))
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn id(&self) -> Uuid {
        self.frame_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    #[test]
    fn cloning_frame_shares_image_buffer() {
        let img: DynamicImage = DynamicImage::ImageRgb8(
            ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(16, 16, Rgb([1, 2, 3])),
        );
        let f1 = Frame::new(img, Utc::now());
        let f2 = f1.clone();
        assert!(Arc::ptr_eq(&f1.image, &f2.image));
    }

    #[test]
    fn bgra_buffer_swaps_channels_and_drops_alpha() {
        // one pixel: B=10 G=20 R=30 A=255
        let frame = Frame::from_bgra_buffer(1, 1, &[10, 20, 30, 255], Utc::now()).unwrap();
        let rgb = frame.image().to_rgb8();
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([30, 20, 10]));
    }

    #[test]
    fn bgra_buffer_of_wrong_length_is_rejected() {
        let result = Frame::from_bgra_buffer(2, 2, &[0, 0, 0], Utc::now());
        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
    }
}
