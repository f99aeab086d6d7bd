//! Pipeline options — smoothing, acceleration definition, and milestones.
//!
//! Purpose
//! -------
//! Collect every knob of the numeric pipeline in one explicit value that is
//! passed in at construction time, so no stage reads module-level constants
//! for thresholds or modes.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`PipelineOptions::new`] validates the smoothing mode; milestones are
//!   validated by their own constructor ([`MilestoneTarget::new`]).
//! - An empty milestone list is allowed; the report then carries no
//!   projections.
use crate::pipeline::{
    acceleration::AccelerationDefinition, errors::PipelineResult, projection::MilestoneTarget,
    smoothing::SmoothingMode,
};

/// Reference population used for the default milestones (India, 2020).
pub const DEFAULT_REFERENCE_POPULATION: u64 = 1_380_004_385;

/// Default coverage fractions and their labels.
pub const DEFAULT_MILESTONE_FRACTIONS: [(&str, f64); 3] =
    [("50%", 0.5), ("70%", 0.7), ("100%", 1.0)];

/// PipelineOptions — configuration for one pipeline run.
///
/// Fields
/// ------
/// - `smoothing`: [`SmoothingMode`]
///   Rule turning administered counts into a rate.
/// - `acceleration`: [`AccelerationDefinition`]
///   Aggregate acceleration consumed by the projector.
/// - `milestones`: `Vec<MilestoneTarget>`
///   Targets to project, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    pub smoothing: SmoothingMode,
    pub acceleration: AccelerationDefinition,
    pub milestones: Vec<MilestoneTarget>,
}

impl PipelineOptions {
    /// Bundle options, validating the smoothing mode.
    ///
    /// Errors
    /// ------
    /// - `PipelineError::InvalidWindow` for a zero moving window.
    pub fn new(
        smoothing: SmoothingMode, acceleration: AccelerationDefinition,
        milestones: Vec<MilestoneTarget>,
    ) -> PipelineResult<Self> {
        smoothing.validate()?;
        Ok(PipelineOptions { smoothing, acceleration, milestones })
    }

    /// 50%, 70%, and 100% of `reference_population`.
    pub fn default_milestones(reference_population: u64) -> PipelineResult<Vec<MilestoneTarget>> {
        DEFAULT_MILESTONE_FRACTIONS
            .iter()
            .map(|&(label, fraction)| {
                MilestoneTarget::from_fraction(label, fraction, reference_population)
            })
            .collect()
    }
}

impl Default for PipelineOptions {
    /// Two-day moving window, per-point mean acceleration, and no
    /// milestones.
    fn default() -> Self {
        PipelineOptions {
            smoothing: SmoothingMode::default(),
            acceleration: AccelerationDefinition::default(),
            milestones: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::errors::PipelineError;

    #[test]
    // Purpose
    // -------
    // Verify the default milestones follow the documented fractions.
    //
    // Given
    // -----
    // - Reference population 1000.
    //
    // Expect
    // ------
    // - Thresholds 500, 700, 1000 labelled "50%", "70%", "100%".
    fn default_milestones_scale_reference_population() {
        // Act
        let milestones = PipelineOptions::default_milestones(1000).unwrap();

        // Assert
        let pairs: Vec<(&str, u64)> =
            milestones.iter().map(|m| (m.label.as_str(), m.population_threshold)).collect();
        assert_eq!(pairs, vec![("50%", 500), ("70%", 700), ("100%", 1000)]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure `new` rejects an invalid smoothing window.
    //
    // Given
    // -----
    // - `MovingWindow { window_size: 0 }`.
    //
    // Expect
    // ------
    // - `Err(InvalidWindow { window_size: 0 })`.
    fn new_zero_window_returns_invalid_window() {
        // Act
        let result = PipelineOptions::new(
            SmoothingMode::MovingWindow { window_size: 0 },
            AccelerationDefinition::PerPointMean,
            Vec::new(),
        );

        // Assert
        assert_eq!(result, Err(PipelineError::InvalidWindow { window_size: 0 }));
    }
}
