// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixel operations — proportional resize, rotate-about-center, luma
// conversion and the three smoothing filters. Thin wrappers over the `image`
// and `imageproc` crates.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::definitions::Image;
use imageproc::filter::{median_filter, separable_filter_equal};
use imageproc::geometric_transformations::{Interpolation, Projection, warp};
use imageproc::map::map_colors;
use tracing::{debug, instrument};

/// Window size shared by the averaging, Gaussian and median filters.
pub const SMOOTHING_KERNEL: u32 = 15;

/// Fill colour for pixels a rotation leaves uncovered.
const ROTATION_FILL: Rgb<u8> = Rgb([0, 0, 0]);

/// Dimensions after scaling `width` by `factor` and the height by the same
/// ratio. Both are floored; neither drops below one pixel.
pub fn scaled_dimensions(width: u32, height: u32, factor: f64) -> (u32, u32) {
    let new_width = ((width as f64 * factor).floor() as u32).max(1);
    let new_height = (height as u64 * new_width as u64 / width.max(1) as u64) as u32;
    (new_width, new_height.max(1))
}

/// Resize preserving aspect ratio so the result is `factor` times as wide.
#[instrument(skip(image), fields(from_w = image.width(), from_h = image.height()))]
pub fn resize_by(image: &RgbImage, factor: f64) -> RgbImage {
    let (width, height) = scaled_dimensions(image.width(), image.height(), factor);
    let resized = imageops::resize(image, width, height, FilterType::Triangle);
    debug!(new_w = width, new_h = height, "Resize complete");
    resized
}

/// Rotate by `degrees` (positive is counter-clockwise) about the image center
/// while scaling by `scale`. The canvas keeps its size; corners that fall
/// outside are cut off and uncovered pixels are black.
pub fn rotate_scaled(image: &RgbImage, degrees: f32, scale: f32) -> RgbImage {
    let cx = (image.width() / 2) as f32;
    let cy = (image.height() / 2) as f32;

    // Image rows grow downwards, so a visually counter-clockwise turn is a
    // negative angle in pixel coordinates.
    let projection = Projection::translate(cx, cy)
        * Projection::rotate(-degrees.to_radians())
        * Projection::scale(scale, scale)
        * Projection::translate(-cx, -cy);

    warp(image, &projection, Interpolation::Bilinear, ROTATION_FILL)
}

/// BT.601 luma (0.299 R + 0.587 G + 0.114 B), rounded to nearest.
pub fn luma_bt601(image: &RgbImage) -> GrayImage {
    map_colors(image, |Rgb([r, g, b])| {
        let y = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
        Luma([y.round().clamp(0.0, 255.0) as u8])
    })
}

/// Apply `kernel` horizontally then vertically in f32 and round once.
///
/// Filtering the 8-bit buffer directly truncates after each pass, which
/// shifts flat regions down by a level or two.
fn separable_rounded(image: &RgbImage, kernel: &[f32]) -> RgbImage {
    let widened: Image<Rgb<f32>> = map_colors(image, |Rgb(c)| Rgb(c.map(f32::from)));
    let filtered = separable_filter_equal(&widened, kernel);
    map_colors(&filtered, |Rgb(c)| Rgb(c.map(|v| v.round().clamp(0.0, 255.0) as u8)))
}

/// Mean over a `SMOOTHING_KERNEL` square window.
pub fn averaging_blur(image: &RgbImage) -> RgbImage {
    let weight = 1.0 / SMOOTHING_KERNEL as f32;
    let kernel = vec![weight; SMOOTHING_KERNEL as usize];
    separable_rounded(image, &kernel)
}

/// Standard deviation used for a Gaussian kernel of `size` taps when no
/// explicit sigma is given.
pub fn gaussian_sigma(size: u32) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalised 1-D Gaussian of `size` taps.
pub fn gaussian_kernel(size: u32, sigma: f32) -> Vec<f32> {
    let center = (size as f32 - 1.0) / 2.0;
    let denom = 2.0 * sigma * sigma;
    let raw: Vec<f32> = (0..size)
        .map(|i| {
            let offset = i as f32 - center;
            (-(offset * offset) / denom).exp()
        })
        .collect();
    let total: f32 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}

/// Gaussian blur with a `SMOOTHING_KERNEL` square kernel.
pub fn gaussian_blur(image: &RgbImage) -> RgbImage {
    let kernel = gaussian_kernel(SMOOTHING_KERNEL, gaussian_sigma(SMOOTHING_KERNEL));
    separable_rounded(image, &kernel)
}

/// Per-channel median over a `SMOOTHING_KERNEL` square window.
pub fn median_blur(image: &RgbImage) -> RgbImage {
    let radius = SMOOTHING_KERNEL / 2;
    median_filter(image, radius, radius)
}
