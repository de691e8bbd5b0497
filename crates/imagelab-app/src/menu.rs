// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Interactive menu — prompt for a numbered operation, build the view, show it,
// repeat until 0.

use std::io::{BufRead, Write};

use image::DynamicImage;
use imagelab_core::MenuChoice;
use imagelab_core::error::Result;
use imagelab_vision::{ImageSession, Viewer};
use tracing::{debug, info, warn};

const BANNER: &str = "***Choose from following operations***";
const PROMPT: &str = "Enter choice: ";
const INVALID_CHOICE: &str = "Please enter valid choice!!";

const CONTOUR_STEPS: [&str; 3] = [
    "1. Color to Grayscale conversion",
    "2. Thresholding to fill the shapes",
    "3. Detecting, Counting and Highlighting Objects (contours)",
];

/// Where the loop is between iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuState {
    Prompt,
    Dispatch(MenuChoice),
    Exit,
}

/// Blocking menu loop over a session.
///
/// Reads choices from `input`, writes the menu to `output`, and hands every
/// view to `viewer`. Returns when the user picks 0 or `input` runs dry.
pub struct Menu<'a, R, W, V> {
    session: &'a ImageSession,
    input: R,
    output: W,
    viewer: V,
}

impl<'a, R: BufRead, W: Write, V: Viewer> Menu<'a, R, W, V> {
    pub fn new(session: &'a ImageSession, input: R, output: W, viewer: V) -> Self {
        Self {
            session,
            input,
            output,
            viewer,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut state = MenuState::Prompt;
        loop {
            state = match state {
                MenuState::Prompt => match self.read_choice()? {
                    Some(MenuChoice::Exit) | None => MenuState::Exit,
                    Some(choice) => MenuState::Dispatch(choice),
                },
                MenuState::Dispatch(choice) => {
                    info!(%choice, "Running menu choice");
                    self.dispatch(choice)?;
                    MenuState::Prompt
                }
                MenuState::Exit => {
                    info!("Leaving menu");
                    return Ok(());
                }
            };
        }
    }

    /// Show the menu until a number in range is entered. `None` means end of
    /// input.
    fn read_choice(&mut self) -> Result<Option<MenuChoice>> {
        loop {
            self.print_menu()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                debug!("End of input at menu prompt");
                return Ok(None);
            }

            let entered = line.trim();
            match entered.parse::<i64>() {
                Ok(code) => match MenuChoice::from_code(code) {
                    Some(choice) => return Ok(Some(choice)),
                    None => warn!(code, "Menu choice out of range"),
                },
                Err(_) => {
                    warn!(input = entered, "Menu input is not a number");
                    writeln!(self.output, "{INVALID_CHOICE}\n")?;
                }
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n{BANNER}\n")?;
        for choice in MenuChoice::MENU_ORDER {
            writeln!(self.output, "{choice}")?;
        }
        write!(self.output, "{PROMPT}")?;
        self.output.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        let session = self.session;
        let title = choice.window_title();

        let view = match choice {
            MenuChoice::Exit => return Ok(()),
            MenuChoice::ShowImage => None,
            MenuChoice::Rotation => Some(DynamicImage::ImageRgb8(session.rotate())),
            MenuChoice::Smoothening => Some(DynamicImage::ImageRgb8(session.smoothen())),
            MenuChoice::Grayscale => Some(DynamicImage::ImageLuma8(session.grayscale())),
            MenuChoice::DetectEdges => Some(DynamicImage::ImageLuma8(session.detect_edges())),
            MenuChoice::Thresholding => {
                let filled = session.fill_shapes(&session.grayscale());
                Some(DynamicImage::ImageLuma8(filled))
            }
            MenuChoice::DrawContours => return self.contour_walkthrough(),
        };

        session.show(&mut self.viewer, view, title)
    }

    fn contour_walkthrough(&mut self) -> Result<()> {
        writeln!(self.output, "\nSteps for contour detection:")?;
        for step in CONTOUR_STEPS {
            writeln!(self.output, "{step}")?;
        }
        self.output.flush()?;

        let session = self.session;
        let gray = session.grayscale();
        let filled = session.fill_shapes(&gray);
        let objects = session.draw_contours(&filled);
        info!(count = objects.count, "{}", objects.caption());

        session.show_contours(&mut self.viewer, &gray, &filled, &objects.image)
    }
}
