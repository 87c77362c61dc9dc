// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Legibility preprocessing applied before OCR submission
//!
//! Two fixed transforms: upscale ×2 with bilinear resampling, then a linear
//! contrast stretch ×2.5 around the image's luminance mean. Both are pure
//! functions of the pixel data, so repeated runs over the same upload
//! produce identical output.

use image::imageops::{self, FilterType};
use image::RgbImage;

/// Fixed upscale factor applied to both dimensions
pub const SCALE_FACTOR: u32 = 2;

/// Fixed contrast enhancement factor
pub const CONTRAST_FACTOR: f32 = 2.5;

/// Preprocess an uploaded image for OCR.
///
/// Steps:
/// 1. Resize to (w × 2, h × 2) with bilinear resampling
/// 2. Contrast stretch: `out = mean + 2.5 · (px − mean)`, clamped to [0, 255]
pub fn preprocess(image: &RgbImage) -> RgbImage {
    let (w, h) = image.dimensions();
    let resized = imageops::resize(image, w * SCALE_FACTOR, h * SCALE_FACTOR, FilterType::Triangle);
    stretch_contrast(&resized, CONTRAST_FACTOR)
}

/// Linear per-pixel contrast stretch around the luminance mean.
///
/// A pixel at the mean is unchanged; values away from the mean move further
/// away by `factor`, clamped to the channel range.
pub fn stretch_contrast(image: &RgbImage, factor: f32) -> RgbImage {
    let mean = luminance_mean(image);
    let mut out = image.clone();

    for px in out.pixels_mut() {
        for channel in px.0.iter_mut() {
            let stretched = mean + factor * (*channel as f32 - mean);
            *channel = stretched.round().clamp(0.0, 255.0) as u8;
        }
    }

    out
}

/// Mean luminance of the image, ITU-R 601-2 luma weights, rounded to the
/// nearest whole gray level.
fn luminance_mean(image: &RgbImage) -> f32 {
    let pixel_count = (image.width() as u64 * image.height() as u64).max(1);

    let total: f64 = image
        .pixels()
        .map(|p| 0.299 * p.0[0] as f64 + 0.587 * p.0[1] as f64 + 0.114 * p.0[2] as f64)
        .sum();

    (total / pixel_count as f64).round() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(w: u32, h: u32, value: u8) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb([value, value, value]))
    }

    #[test]
    fn test_preprocess_doubles_dimensions() {
        let img = solid(3, 2, 128);
        let out = preprocess(&img);
        assert_eq!(out.dimensions(), (6, 4));
    }

    #[test]
    fn test_preprocess_is_deterministic() {
        let mut img = solid(4, 4, 64);
        img.put_pixel(1, 1, Rgb([200, 30, 90]));
        img.put_pixel(2, 3, Rgb([10, 250, 120]));

        let first = preprocess(&img);
        let second = preprocess(&img);
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn test_contrast_leaves_solid_image_unchanged() {
        let img = solid(2, 2, 100);
        let out = stretch_contrast(&img, CONTRAST_FACTOR);
        assert_eq!(out.as_raw(), img.as_raw());
    }

    #[test]
    fn test_contrast_pushes_values_apart() {
        let mut img = solid(2, 1, 0);
        img.put_pixel(0, 0, Rgb([100, 100, 100]));
        img.put_pixel(1, 0, Rgb([200, 200, 200]));

        // mean = 150, so 100 -> 150 + 2.5*(-50) = 25, 200 -> 150 + 2.5*50 = 275 -> 255
        let out = stretch_contrast(&img, 2.5);
        assert_eq!(out.get_pixel(0, 0).0, [25, 25, 25]);
        assert_eq!(out.get_pixel(1, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_contrast_clamps_low_end() {
        let mut img = solid(2, 1, 0);
        img.put_pixel(0, 0, Rgb([10, 10, 10]));
        img.put_pixel(1, 0, Rgb([240, 240, 240]));

        let out = stretch_contrast(&img, 2.5);
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0]);
    }
}
