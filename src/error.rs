use quilt_color::ParseColorError;
use thiserror::Error;

use crate::models::ColorId;

/// Broad category of a recoverable failure, for callers that only need to
/// decide how to notify the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An operation's precondition was not met; nothing was mutated.
    Validation,
    /// A brush stroke ran out of fabric part way through.
    CapacityExceeded,
    /// A project file could not be imported; live state is untouched.
    MalformedImport,
    /// Gradient generation was cancelled before any mutation.
    Cancelled,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("No color selected")]
    NoColorSelected,

    #[error("Unknown palette color {0}")]
    UnknownColor(ColorId),

    #[error("No palette color ids left")]
    PaletteFull,

    /// Cells painted before the limit was hit stay painted.
    #[error("Quantity limit reached for color {color_id} after painting {painted} cell(s)")]
    CapacityExceeded { color_id: ColorId, painted: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GradientError {
    #[error("Gradient needs at least 2 anchors, found {found}")]
    NotEnoughAnchors { found: usize },

    #[error("Gradient needs at least one palette color")]
    EmptyPalette,

    #[error("Gradient generation cancelled")]
    Cancelled,
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Grid has {found} cells, expected {expected} (cols x rows)")]
    GridSizeMismatch { expected: usize, found: usize },

    #[error("Grid of {cols} x {rows} cells is too large")]
    GridTooLarge { cols: usize, rows: usize },

    #[error("Palette color id 0 is reserved")]
    ReservedColorId,

    #[error("Palette color id {0} appears more than once")]
    DuplicateColorId(ColorId),

    #[error("Invalid color for palette entry {id}: {source}")]
    InvalidColor {
        id: ColorId,
        #[source]
        source: ParseColorError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum QuiltError {
    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    #[error("Gradient error: {0}")]
    Gradient(#[from] GradientError),

    #[error("Import error: {0}")]
    Import(#[from] ImportError),
}

impl EditError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EditError::NoColorSelected | EditError::UnknownColor(_) | EditError::PaletteFull => {
                ErrorKind::Validation
            }
            EditError::CapacityExceeded { .. } => ErrorKind::CapacityExceeded,
        }
    }
}

impl GradientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GradientError::NotEnoughAnchors { .. } | GradientError::EmptyPalette => {
                ErrorKind::Validation
            }
            GradientError::Cancelled => ErrorKind::Cancelled,
        }
    }
}

impl QuiltError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuiltError::Edit(e) => e.kind(),
            QuiltError::Gradient(e) => e.kind(),
            QuiltError::Import(_) => ErrorKind::MalformedImport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_error_messages() {
        assert_eq!(EditError::NoColorSelected.to_string(), "No color selected");
        assert_eq!(
            EditError::UnknownColor(ColorId(7)).to_string(),
            "Unknown palette color 7"
        );
        assert_eq!(
            EditError::CapacityExceeded {
                color_id: ColorId(2),
                painted: 3
            }
            .to_string(),
            "Quantity limit reached for color 2 after painting 3 cell(s)"
        );
    }

    #[test]
    fn test_gradient_error_messages() {
        assert_eq!(
            GradientError::NotEnoughAnchors { found: 1 }.to_string(),
            "Gradient needs at least 2 anchors, found 1"
        );
        assert_eq!(
            GradientError::EmptyPalette.to_string(),
            "Gradient needs at least one palette color"
        );
    }

    #[test]
    fn test_import_error_messages() {
        assert_eq!(
            ImportError::MissingField("grid").to_string(),
            "Missing required field: grid"
        );
        assert_eq!(
            ImportError::GridSizeMismatch {
                expected: 6,
                found: 5
            }
            .to_string(),
            "Grid has 5 cells, expected 6 (cols x rows)"
        );
        assert_eq!(
            ImportError::DuplicateColorId(ColorId(2)).to_string(),
            "Palette color id 2 appears more than once"
        );
        assert_eq!(
            ImportError::ReservedColorId.to_string(),
            "Palette color id 0 is reserved"
        );
    }

    #[test]
    fn test_import_error_keeps_color_source() {
        use std::error::Error;

        let source = "#12".parse::<quilt_color::Srgb>().unwrap_err();
        let err = ImportError::InvalidColor {
            id: ColorId(4),
            source,
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_kinds() {
        let edit: QuiltError = EditError::NoColorSelected.into();
        assert_eq!(edit.kind(), ErrorKind::Validation);

        let full: QuiltError = EditError::PaletteFull.into();
        assert_eq!(full.kind(), ErrorKind::Validation);

        let capacity: QuiltError = EditError::CapacityExceeded {
            color_id: ColorId(1),
            painted: 0,
        }
        .into();
        assert_eq!(capacity.kind(), ErrorKind::CapacityExceeded);

        let gradient: QuiltError = GradientError::EmptyPalette.into();
        assert_eq!(gradient.kind(), ErrorKind::Validation);

        let cancelled: QuiltError = GradientError::Cancelled.into();
        assert_eq!(cancelled.kind(), ErrorKind::Cancelled);

        let import: QuiltError = ImportError::MissingField("cols").into();
        assert_eq!(import.kind(), ErrorKind::MalformedImport);
    }
}
