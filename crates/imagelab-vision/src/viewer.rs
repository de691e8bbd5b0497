// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Display abstraction. A viewer presents one raster under a title and blocks
// until the user dismisses it.

use image::{ColorType, DynamicImage};
use imagelab_core::error::Result;

/// Something that can put a raster in front of the user.
///
/// `present` must not return until the view has been dismissed, and must
/// release whatever it acquired (window, texture) before returning, on the
/// error path as well.
pub trait Viewer {
    fn present(&mut self, title: &str, image: &DynamicImage) -> Result<()>;
}

impl<V: Viewer + ?Sized> Viewer for &mut V {
    fn present(&mut self, title: &str, image: &DynamicImage) -> Result<()> {
        (**self).present(title, image)
    }
}

/// What a `RecordingViewer` saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub color: ColorType,
}

/// Headless viewer that records each presentation and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingViewer {
    presentations: Vec<Presentation>,
    last_image: Option<DynamicImage>,
}

impl RecordingViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presentations(&self) -> &[Presentation] {
        &self.presentations
    }

    /// The most recently presented raster.
    pub fn last_image(&self) -> Option<&DynamicImage> {
        self.last_image.as_ref()
    }
}

impl Viewer for RecordingViewer {
    fn present(&mut self, title: &str, image: &DynamicImage) -> Result<()> {
        tracing::debug!(title, "RecordingViewer::present");
        self.presentations.push(Presentation {
            title: title.to_owned(),
            width: image.width(),
            height: image.height(),
            color: image.color(),
        });
        self.last_image = Some(image.clone());
        Ok(())
    }
}
