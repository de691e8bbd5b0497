// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// imagelab-vision — The image session and every view it can produce.
//
// Provides the working-image session (rotation grid, smoothing grid,
// grayscale, Canny edges, filled-shape mask, contour counting), the caption
// and 2x2 grid helpers those views share, and the `Viewer` display seam.

pub mod caption;
pub mod filters;
pub mod grid;
pub mod session;
pub mod shapes;
pub mod viewer;

// Re-export the primary types so callers can use `imagelab_vision::ImageSession` etc.
pub use session::{ContourOverlay, ImageSession};
pub use viewer::{Presentation, RecordingViewer, Viewer};
