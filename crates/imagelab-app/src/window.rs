// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native display window — shows one view in an eframe window and blocks until
// the user presses 0 or closes it.

use eframe::egui;
use image::DynamicImage;
use imagelab_core::error::{ImageLabError, Result};
use imagelab_vision::Viewer;
use tracing::{debug, info};

/// Viewer backed by a native window per presentation.
#[derive(Debug, Default)]
pub struct WindowViewer;

impl WindowViewer {
    pub fn new() -> Self {
        Self
    }
}

impl Viewer for WindowViewer {
    fn present(&mut self, title: &str, image: &DynamicImage) -> Result<()> {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = egui::ColorImage::from_rgb([width as usize, height as usize], rgb.as_raw());

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(title)
                .with_inner_size([width as f32, height as f32])
                .with_resizable(false),
            ..Default::default()
        };

        info!(title, width, height, "Opening view window");
        // `run_native` returns once the window has closed and its resources
        // are dropped, whichever way it closed.
        eframe::run_native(
            title,
            options,
            Box::new(move |cc| {
                let texture =
                    cc.egui_ctx
                        .load_texture("view", pixels, egui::TextureOptions::NEAREST);
                Ok(Box::new(ViewWindow { texture }))
            }),
        )
        .map_err(|err| ImageLabError::Display(err.to_string()))?;
        debug!(title, "View window closed");
        Ok(())
    }
}

/// A single static image filling the window.
struct ViewWindow {
    texture: egui::TextureHandle,
}

impl eframe::App for ViewWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Num0)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                ui.image(&self.texture);
            });
    }
}
