// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for whoever picked the images.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Per-item failures always name the picture so it can be removed or replaced.

use crate::error::BinderyError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Disk blip or similar; trying again may work.
    Transient,
    /// The user must remove or replace something before retrying.
    ActionRequired,
    /// Cannot be fixed by the user; the settings themselves are wrong.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether retrying unchanged could succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `BinderyError` into a `HumanError`.
pub fn humanize_error(err: &BinderyError) -> HumanError {
    match err {
        BinderyError::EmptyInput => HumanError {
            message: "There are no pictures to put in the PDF.".into(),
            suggestion: "Add at least one picture, then try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        BinderyError::Decode { item, reason } => HumanError {
            message: format!("Picture {} ({}) could not be read.", item.position, item.name),
            suggestion: format!(
                "The file may be damaged or not a picture. Remove it or replace it with another copy, then try again. ({reason})"
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        BinderyError::Embed { item, reason } => HumanError {
            message: format!(
                "Picture {} ({}) could not be added to the PDF.",
                item.position, item.name
            ),
            suggestion: format!(
                "Save the picture as JPEG or PNG, or remove it, then try again. ({reason})"
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        BinderyError::Configuration(detail) => HumanError {
            message: "The page settings don't work together.".into(),
            suggestion: format!("Use a smaller margin or a larger paper size. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        BinderyError::Inspect(detail) => HumanError {
            message: "The finished PDF could not be checked.".into(),
            suggestion: format!("Try making the PDF again. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },

        BinderyError::Io(io) => HumanError {
            message: "A file could not be read or written.".into(),
            suggestion: format!("Check that the file exists and the folder is writable. ({io})"),
            retriable: true,
            severity: Severity::Transient,
        },

        BinderyError::Serialization(detail) => HumanError {
            message: "The settings file could not be understood.".into(),
            suggestion: format!("Fix or delete the settings file. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemId, ItemRef};

    fn item(position: usize, name: &str) -> ItemRef {
        ItemRef {
            id: ItemId::new(),
            name: name.into(),
            position,
        }
    }

    #[test]
    fn decode_failure_names_the_picture() {
        let err = BinderyError::Decode {
            item: item(2, "holiday.jpg"),
            reason: "unexpected end of file".into(),
        };
        let human = humanize_error(&err);
        assert!(human.message.contains("Picture 2"));
        assert!(human.message.contains("holiday.jpg"));
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(!human.retriable);
    }

    #[test]
    fn empty_input_is_action_required() {
        let human = humanize_error(&BinderyError::EmptyInput);
        assert_eq!(human.severity, Severity::ActionRequired);
    }

    #[test]
    fn bad_margin_is_permanent() {
        let human = humanize_error(&BinderyError::Configuration("margin 500".into()));
        assert_eq!(human.severity, Severity::Permanent);
    }

    #[test]
    fn io_is_transient() {
        let err = BinderyError::Io(std::io::Error::other("disk full"));
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Transient);
        assert!(human.retriable);
    }
}
