//! pipeline::errors — error taxonomy for the numeric core.
//!
//! Purpose
//! -------
//! Provide a single error enum and result alias for the differencer, rate
//! smoother, acceleration engine, and milestone projector. Each variant maps
//! to one arithmetic or data edge case so callers can tell "no data" apart
//! from "error" when reporting.
//!
//! Key behaviors
//! -------------
//! - Define [`PipelineResult`] and [`PipelineError`] as the canonical result
//!   and error types of the numeric core.
//! - Attach human-readable `Display` messages that embed the offending
//!   payload (series length, window size, index, milestone label).
//!
//! Invariants & assumptions
//! ------------------------
//! - `UndefinedAcceleration` is raised at the point level and absorbed by
//!   the series builders; it only escapes from the delta-of-means summary.
//! - `DivisionByZero` is per milestone. The orchestrator stores it next to
//!   the milestone and keeps projecting the remaining targets.
//! - Unreachable milestones are not errors; they are reported through
//!   `DaysRemaining::Unreachable`.
//!
//! Conventions
//! -----------
//! - Messages are phrased in terms of domain constraints ("window must be
//!   at least 1") rather than low-level arithmetic details.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that `Display` messages embed their payloads.

/// Result alias for numeric pipeline stages.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// PipelineError — failure modes of the numeric core.
///
/// Variants
/// --------
/// - `InsufficientData { len }`
///   Fewer than 2 observations, so no day-over-day difference exists.
/// - `InvalidWindow { window_size }`
///   Moving-window smoothing requested with a window of 0.
/// - `UndefinedAcceleration { index }`
///   The current rate at `index` is zero, so the percentage change has no
///   denominator.
/// - `EmptySeries`
///   No defined acceleration entries exist to average.
/// - `DivisionByZero { label }`
///   Milestone `label` cannot be projected because both velocity and
///   acceleration are zero.
/// - `InvalidMilestone { label }`
///   A milestone was configured with a zero population threshold.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    // ---- Input shape ----
    InsufficientData { len: usize },
    InvalidWindow { window_size: usize },

    // ---- Acceleration ----
    UndefinedAcceleration { index: usize },
    EmptySeries,

    // ---- Projection ----
    DivisionByZero { label: String },
    InvalidMilestone { label: String },
}

impl std::error::Error for PipelineError {}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::InsufficientData { len } => write!(
                f,
                "Need at least 2 observations to compute daily administered counts, got {len}."
            ),
            PipelineError::InvalidWindow { window_size } => {
                write!(f, "Invalid window size: {window_size}. Must be at least 1.")
            }
            PipelineError::UndefinedAcceleration { index } => {
                write!(f, "Acceleration undefined at index {index}: current rate is zero.")
            }
            PipelineError::EmptySeries => {
                write!(f, "No defined acceleration entries to summarize.")
            }
            PipelineError::DivisionByZero { label } => write!(
                f,
                "Cannot project milestone '{label}': rate and acceleration are both zero."
            ),
            PipelineError::InvalidMilestone { label } => {
                write!(f, "Invalid milestone '{label}': population threshold must be positive.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Payload embedding in `Display` messages for each variant that
    //   carries data.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `InsufficientData` reports the observed series length.
    //
    // Given
    // -----
    // - `PipelineError::InsufficientData { len: 1 }`.
    //
    // Expect
    // ------
    // - The message mentions "1".
    fn insufficient_data_includes_length_in_display() {
        // Arrange
        let err = PipelineError::InsufficientData { len: 1 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("got 1"), "Display should include the length.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `UndefinedAcceleration` reports the offending index.
    //
    // Given
    // -----
    // - `PipelineError::UndefinedAcceleration { index: 7 }`.
    //
    // Expect
    // ------
    // - The message mentions "7".
    fn undefined_acceleration_includes_index_in_display() {
        // Arrange
        let err = PipelineError::UndefinedAcceleration { index: 7 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('7'), "Display should include the index.\nGot: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure milestone errors name the milestone they belong to.
    //
    // Given
    // -----
    // - `DivisionByZero` and `InvalidMilestone` for label "70%".
    //
    // Expect
    // ------
    // - Both messages contain "70%".
    fn milestone_errors_include_label_in_display() {
        // Arrange
        let div = PipelineError::DivisionByZero { label: "70%".to_string() };
        let invalid = PipelineError::InvalidMilestone { label: "70%".to_string() };

        // Act / Assert
        assert!(div.to_string().contains("70%"));
        assert!(invalid.to_string().contains("70%"));
    }
}
