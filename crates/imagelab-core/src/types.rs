// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for imagelab.

use serde::{Deserialize, Serialize};

/// One entry of the interactive menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuChoice {
    Exit,
    ShowImage,
    Rotation,
    Smoothening,
    Grayscale,
    DetectEdges,
    Thresholding,
    DrawContours,
}

impl MenuChoice {
    /// Menu entries in the order they are printed. `Exit` is listed last even
    /// though its code is 0.
    pub const MENU_ORDER: [MenuChoice; 8] = [
        MenuChoice::ShowImage,
        MenuChoice::Rotation,
        MenuChoice::Smoothening,
        MenuChoice::Grayscale,
        MenuChoice::DetectEdges,
        MenuChoice::Thresholding,
        MenuChoice::DrawContours,
        MenuChoice::Exit,
    ];

    /// Map a typed number to a choice. Numbers outside 0..=7 yield `None`.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Exit),
            1 => Some(Self::ShowImage),
            2 => Some(Self::Rotation),
            3 => Some(Self::Smoothening),
            4 => Some(Self::Grayscale),
            5 => Some(Self::DetectEdges),
            6 => Some(Self::Thresholding),
            7 => Some(Self::DrawContours),
            _ => None,
        }
    }

    /// The number the user types for this choice.
    pub fn code(self) -> u8 {
        match self {
            Self::Exit => 0,
            Self::ShowImage => 1,
            Self::Rotation => 2,
            Self::Smoothening => 3,
            Self::Grayscale => 4,
            Self::DetectEdges => 5,
            Self::Thresholding => 6,
            Self::DrawContours => 7,
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Exit => "Exit",
            Self::ShowImage => "Show Image",
            Self::Rotation => "Rotation",
            Self::Smoothening => "Smoothening",
            Self::Grayscale => "Convert to Grayscale",
            Self::DetectEdges => "Detect Edges",
            Self::Thresholding => "Thresholding",
            Self::DrawContours => "Draw Contours/Count Objects",
        }
    }

    /// Title handed to the display for this choice, before the dismiss suffix.
    /// `DrawContours` is shown through the contouring grid instead.
    pub fn window_title(self) -> Option<&'static str> {
        match self {
            Self::Exit | Self::DrawContours => None,
            Self::ShowImage => Some("Shapes"),
            Self::Rotation => Some("Rotated"),
            Self::Smoothening => Some("Smoother Image"),
            Self::Grayscale => Some("Grayscale Image"),
            Self::DetectEdges => Some("Edges detected"),
            Self::Thresholding => Some("Filled shapes"),
        }
    }
}

impl std::fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.code(), self.label())
    }
}
