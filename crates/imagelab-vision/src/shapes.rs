// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shape counting — inverse thresholding into a filled-silhouette mask, outer
// contour extraction with run compression, and thick contour outlines.

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::contours::{BorderType, find_contours};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;
use tracing::{debug, info, instrument};

/// Gray levels at or above this are background in the filled mask. Tuned by
/// hand for light backgrounds.
pub const FILL_THRESHOLD: u8 = 230;

/// Stroke width of drawn contour outlines.
pub const CONTOUR_THICKNESS: u32 = 3;

const MASK_ON: u8 = 255;
const MASK_OFF: u8 = 0;

/// Binary-inverse threshold: values `>= FILL_THRESHOLD` become 0, everything
/// else 255.
#[instrument(skip(gray), fields(width = gray.width(), height = gray.height()))]
pub fn fill_shapes(gray: &GrayImage) -> GrayImage {
    let (width, height) = gray.dimensions();
    let mut mask = GrayImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let value = gray.get_pixel(x, y).0[0];
            let filled = if value >= FILL_THRESHOLD { MASK_OFF } else { MASK_ON };
            mask.put_pixel(x, y, Luma([filled]));
        }
    }

    mask
}

/// One outermost boundary, reduced to the end points of its straight runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OuterContour {
    pub points: Vec<Point<i32>>,
}

/// Extract only the outermost contours of `mask` (non-zero is foreground).
///
/// Holes, and shapes nested inside holes, are skipped. Each boundary is
/// compressed so horizontal, vertical and diagonal runs keep only their end
/// points; an upright rectangle comes back as its four corners.
#[instrument(skip(mask), fields(width = mask.width(), height = mask.height()))]
pub fn find_outer_contours(mask: &GrayImage) -> Vec<OuterContour> {
    let contours: Vec<OuterContour> = find_contours::<i32>(mask)
        .into_iter()
        .filter(|c| matches!(c.border_type, BorderType::Outer) && c.parent.is_none())
        .map(|c| OuterContour {
            points: compress_runs(&c.points),
        })
        .collect();

    info!(count = contours.len(), "Outer contours found");
    contours
}

/// Drop every point that continues the step direction of its predecessor,
/// treating the chain as closed.
pub fn compress_runs(points: &[Point<i32>]) -> Vec<Point<i32>> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let step = |from: Point<i32>, to: Point<i32>| (to.x - from.x, to.y - from.y);

    let kept: Vec<Point<i32>> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];
            step(prev, points[i]) != step(points[i], next)
        })
        .map(|i| points[i])
        .collect();

    if kept.is_empty() {
        vec![points[0]]
    } else {
        kept
    }
}

/// Draw `contour` as a closed polyline `CONTOUR_THICKNESS` pixels wide.
pub fn draw_outline(canvas: &mut RgbImage, contour: &OuterContour, color: Rgb<u8>) {
    let reach = (CONTOUR_THICKNESS / 2) as i32;
    let points = &contour.points;

    match points.len() {
        0 => {}
        1 => {
            let p = points[0];
            draw_filled_rect_mut(
                canvas,
                Rect::at(p.x - reach, p.y - reach).of_size(CONTOUR_THICKNESS, CONTOUR_THICKNESS),
                color,
            );
        }
        n => {
            for i in 0..n {
                let a = points[i];
                let b = points[(i + 1) % n];
                for dy in -reach..=reach {
                    for dx in -reach..=reach {
                        draw_line_segment_mut(
                            canvas,
                            ((a.x + dx) as f32, (a.y + dy) as f32),
                            ((b.x + dx) as f32, (b.y + dy) as f32),
                            color,
                        );
                    }
                }
            }
        }
    }
    debug!(vertices = points.len(), "Contour outlined");
}
