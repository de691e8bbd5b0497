// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// imagelab — interactive image-operations walkthrough
//
// Entry point. Loads configuration, initialises logging, opens the image
// session and hands control to the menu loop.

mod menu;
mod window;

use std::process::ExitCode;

use imagelab_core::AppConfig;
use imagelab_core::error::Result;
use imagelab_core::human_errors::humanize_error;
use imagelab_vision::ImageSession;

use menu::Menu;
use window::WindowViewer;

fn main() -> ExitCode {
    let config = AppConfig::load();

    let default_filter = config
        .as_ref()
        .map(|c| c.log_filter.clone())
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    tracing::info!("imagelab starting");

    match config.and_then(|config| run(&config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "imagelab stopped");
            eprintln!("{}", humanize_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig) -> Result<()> {
    let session = ImageSession::open(&config.image_path)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Menu::new(&session, stdin.lock(), stdout.lock(), WindowViewer::new()).run()
}
