// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Caption rendering — fixed-position bitmap text overlays identifying each view.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{Luma, Rgb};
use imageproc::drawing::{Canvas, draw_filled_rect_mut};
use imageproc::rect::Rect;

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const WHITE_LUMA: Luma<u8> = Luma([255]);

/// Each glyph cell pixel becomes a `CAPTION_SCALE` square.
pub const CAPTION_SCALE: u32 = 2;
/// Stroke weight; every glyph pixel is grown by `CAPTION_THICKNESS - 1`.
pub const CAPTION_THICKNESS: u32 = 2;

/// Distance of the caption anchor from the left edge.
pub const CAPTION_MARGIN_X: i32 = 20;
/// Distance of the caption baseline from the bottom edge.
pub const CAPTION_MARGIN_BOTTOM: i32 = 10;

const GLYPH_CELLS: i32 = 8;

/// Bottom-left caption anchor for a raster of the given height.
pub fn caption_anchor(height: u32) -> (i32, i32) {
    (CAPTION_MARGIN_X, height as i32 - CAPTION_MARGIN_BOTTOM)
}

/// Horizontal space taken by `text` in pixels.
pub fn caption_width(text: &str) -> u32 {
    text.chars().count() as u32 * GLYPH_CELLS as u32 * CAPTION_SCALE
}

/// Draw `text` with its bottom-left corner at `anchor`.
///
/// Characters missing from the basic Latin set render as `?`. Pixels falling
/// outside the canvas are dropped.
pub fn draw_caption<C: Canvas>(canvas: &mut C, text: &str, anchor: (i32, i32), color: C::Pixel) {
    let scale = CAPTION_SCALE as i32;
    let dot = CAPTION_SCALE + CAPTION_THICKNESS - 1;
    let top = anchor.1 - GLYPH_CELLS * scale;

    let mut cursor_x = anchor.0;
    for ch in text.chars() {
        let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
            cursor_x += GLYPH_CELLS * scale;
            continue;
        };
        for (row_idx, &row_bits) in glyph.iter().enumerate() {
            for col_idx in 0..GLYPH_CELLS {
                if (row_bits >> col_idx) & 1 == 0 {
                    continue;
                }
                let x = cursor_x + col_idx * scale;
                let y = top + row_idx as i32 * scale;
                draw_filled_rect_mut(canvas, Rect::at(x, y).of_size(dot, dot), color);
            }
        }
        cursor_x += GLYPH_CELLS * scale;
    }
}
