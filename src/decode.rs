//! GIF container decoding and frame resampling.

use anyhow::{Context, Result};
use image::codecs::gif::GifDecoder;
use image::imageops::{self, FilterType};
use image::{AnimationDecoder, RgbaImage};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One decoded frame and the display delay the container attached to it.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// Flattened RGBA pixels covering the full logical screen.
    pub image: RgbaImage,
    /// Display duration in milliseconds. Carried for callers that implement
    /// their own pacing; the text writer does not consume it.
    pub delay_ms: u32,
}

/// An ordered sequence of decoded frames.
#[derive(Debug, Clone)]
pub struct AnimatedImage {
    pub frames: Vec<DecodedFrame>,
}

impl AnimatedImage {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Sum of the per-frame display delays.
    pub fn total_duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| f.delay_ms as u64).sum()
    }
}

/// Fully decode the GIF container at `path`.
///
/// Fails if the file cannot be opened or its bytes are not a valid GIF;
/// nothing is returned in that case. The decoder handles frame disposal and
/// compositing, so every returned frame spans the full logical screen.
pub fn decode_animation(path: &Path) -> Result<AnimatedImage> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let decoder =
        GifDecoder::new(BufReader::new(file)).with_context(|| format!("decoding {}", path.display()))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .with_context(|| format!("decoding {}", path.display()))?;

    let frames = frames
        .into_iter()
        .map(|frame| {
            let (numer, denom) = frame.delay().numer_denom_ms();
            DecodedFrame {
                delay_ms: numer / denom.max(1),
                image: frame.into_buffer(),
            }
        })
        .collect();

    Ok(AnimatedImage { frames })
}

/// Resize a frame to exactly `columns` x `rows` cells with a Lanczos3 filter.
///
/// Stretches to fit; callers wanting to keep the source aspect ratio must
/// bake it into the target dimensions. The source frame is left untouched.
pub fn resample_frame(frame: &RgbaImage, columns: u32, rows: u32) -> RgbaImage {
    imageops::resize(frame, columns, rows, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn resample_hits_target_grid_exactly() {
        for (w, h) in [(1, 1), (80, 24), (4000, 3000), (33, 7)] {
            let frame = RgbaImage::from_pixel(w, h, Rgba([120, 130, 140, 255]));
            let resampled = resample_frame(&frame, 80, 24);
            assert_eq!(resampled.dimensions(), (80, 24));
            assert_eq!(resampled.pixels().count(), 80 * 24);
        }
    }

    #[test]
    fn resample_does_not_touch_the_source() {
        let frame = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
        let copy = frame.clone();
        let _ = resample_frame(&frame, 80, 24);
        assert_eq!(frame, copy);
    }

    #[test]
    fn duration_sums_frame_delays() {
        let animation = AnimatedImage {
            frames: vec![
                DecodedFrame {
                    image: RgbaImage::new(1, 1),
                    delay_ms: 40,
                },
                DecodedFrame {
                    image: RgbaImage::new(1, 1),
                    delay_ms: 60,
                },
            ],
        };
        assert_eq!(animation.frame_count(), 2);
        assert_eq!(animation.total_duration_ms(), 100);
    }
}
