//! Error handling for the overlay.
//!
//! Runtime interaction with the overlay never fails: a back press with an
//! empty history, a second `show` while the menu is opening, or a `hide`
//! while hidden are all silent no-ops that report "nothing happened" through
//! `Option` / `bool` return values.
//!
//! Errors only exist at the configuration boundary, where a host hands the
//! overlay values it cannot work with (a NaN trigger rectangle, a progress
//! value of `1.7`, an empty start URL). Those are reported as
//! [`OverlayError`].
//!
//! # Examples
//!
//! ```
//! use gpui_browser_overlay::error::OverlayError;
//!
//! let err = OverlayError::InvalidProgress { value: 1.5 };
//! assert_eq!(err.to_string(), "Progress value 1.5 is outside 0..=1");
//! ```

use std::fmt;
use std::time::Duration;

/// Result alias used by configuration validation.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Configuration problems detected by `validate()` methods.
///
/// Implements [`std::error::Error`] and [`Display`](std::fmt::Display) for
/// idiomatic error handling.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayError {
    /// The initial URL of the overlay is empty
    EmptyUrl,

    /// A geometry value is NaN, infinite, or negative where it must not be
    InvalidGeometry { field: &'static str, value: f32 },

    /// An animation duration that must be positive is zero
    ZeroDuration { field: &'static str },

    /// A progress value outside `0..=1`
    InvalidProgress { value: f32 },

    /// An extra menu item has no title
    EmptyMenuTitle { index: usize },
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayError::EmptyUrl => write!(f, "Overlay URL must not be empty"),
            OverlayError::InvalidGeometry { field, value } => {
                write!(f, "Invalid geometry for '{}': {}", field, value)
            }
            OverlayError::ZeroDuration { field } => {
                write!(f, "Duration '{}' must be greater than zero", field)
            }
            OverlayError::InvalidProgress { value } => {
                write!(f, "Progress value {} is outside 0..=1", value)
            }
            OverlayError::EmptyMenuTitle { index } => {
                write!(f, "Extra menu item {} has an empty title", index)
            }
        }
    }
}

impl std::error::Error for OverlayError {}

/// Check that `value` is finite and not negative.
pub(crate) fn ensure_non_negative(field: &'static str, value: f32) -> OverlayResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(OverlayError::InvalidGeometry { field, value })
    }
}

/// Check that `value` is finite (may be negative, e.g. off-screen origins).
pub(crate) fn ensure_finite(field: &'static str, value: f32) -> OverlayResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(OverlayError::InvalidGeometry { field, value })
    }
}

pub(crate) fn ensure_positive_duration(field: &'static str, value: Duration) -> OverlayResult<()> {
    if value.is_zero() {
        Err(OverlayError::ZeroDuration { field })
    } else {
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            OverlayError::EmptyUrl.to_string(),
            "Overlay URL must not be empty"
        );
        assert_eq!(
            OverlayError::ZeroDuration {
                field: "animation_duration"
            }
            .to_string(),
            "Duration 'animation_duration' must be greater than zero"
        );
        assert_eq!(
            OverlayError::EmptyMenuTitle { index: 2 }.to_string(),
            "Extra menu item 2 has an empty title"
        );
    }

    #[test]
    fn test_ensure_non_negative() {
        assert!(ensure_non_negative("width", 0.0).is_ok());
        assert!(ensure_non_negative("width", 12.5).is_ok());
        assert_eq!(
            ensure_non_negative("width", -1.0),
            Err(OverlayError::InvalidGeometry {
                field: "width",
                value: -1.0
            })
        );
        assert!(ensure_non_negative("width", f32::INFINITY).is_err());
    }

    #[test]
    fn test_ensure_finite_allows_negative() {
        assert!(ensure_finite("x", -40.0).is_ok());
        assert!(ensure_finite("x", f32::NAN).is_err());
    }

    #[test]
    fn test_ensure_positive_duration() {
        assert!(ensure_positive_duration("d", Duration::from_millis(1)).is_ok());
        assert!(ensure_positive_duration("d", Duration::ZERO).is_err());
    }
}
