// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages printed when imagelab has to stop.
//
// Every technical error is mapped to plain English with a clear suggestion.

use crate::error::ImageLabError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The user must fix something (missing file, bad config) and rerun.
    ActionRequired,
    /// Retrying may help (display server hiccup, terminal glitch).
    Transient,
    /// Nothing the user can do from here.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Severity level.
    pub severity: Severity,
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.message, self.suggestion)
    }
}

/// Convert an `ImageLabError` into a `HumanError`.
pub fn humanize_error(err: &ImageLabError) -> HumanError {
    match err {
        ImageLabError::ImageLoad { path, reason } => {
            let lower = reason.to_ascii_lowercase();
            if lower.contains("no such file") || lower.contains("not found") {
                HumanError {
                    message: format!("The image {path} couldn't be found."),
                    suggestion: "Put the image next to the program, or point image_path in the IMAGELAB_CONFIG file at it.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: format!("The image {path} couldn't be read."),
                    suggestion: "The file may be damaged or in an unusual format. Try saving it as a JPEG or PNG first.".into(),
                    severity: Severity::Permanent,
                }
            }
        }

        ImageLabError::Display(detail) => HumanError {
            message: "The image window couldn't be opened.".into(),
            suggestion: format!("Make sure a graphical session is available, then try again. ({detail})"),
            severity: Severity::Transient,
        },

        ImageLabError::Config(detail) => HumanError {
            message: "The configuration file couldn't be used.".into(),
            suggestion: format!("Check the file named by IMAGELAB_CONFIG. ({detail})"),
            severity: Severity::ActionRequired,
        },

        ImageLabError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The program doesn't have permission to read that file.".into(),
                    suggestion: "Check the file permissions, or copy the file somewhere else first.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading input or writing output.".into(),
                    suggestion: "Try again from an interactive terminal.".into(),
                    severity: Severity::Transient,
                }
            }
        }

        ImageLabError::Serialization(_) => HumanError {
            message: "The configuration file isn't valid JSON.".into(),
            suggestion: "Fix the syntax in the file named by IMAGELAB_CONFIG, or unset the variable.".into(),
            severity: Severity::ActionRequired,
        },
    }
}
