//! Thread-local phase tracking for diagnostics.
//!
//! Records which pipeline stage is running so failures and log lines can be
//! attributed to it. The context is per-thread and never influences results.

use std::cell::Cell;

thread_local! {
    static CURRENT_PHASE: Cell<Option<PipelinePhase>> = const { Cell::new(None) };
}

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    /// Reading and typing CSV rows
    Loading,
    /// Summing views per region and country
    Aggregation,
    /// Deduplicating and summing population
    Reconciliation,
    /// Per-capita rates and z-scores
    Normalization,
    /// Year/region display projection
    Projection,
    /// Top-N article ranking
    Ranking,
    /// Rendering the report
    OutputGeneration,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Aggregation => write!(f, "aggregation"),
            Self::Reconciliation => write!(f, "reconciliation"),
            Self::Normalization => write!(f, "normalization"),
            Self::Projection => write!(f, "projection"),
            Self::Ranking => write!(f, "ranking"),
            Self::OutputGeneration => write!(f, "output_generation"),
        }
    }
}

/// RAII guard restoring the previous phase on drop.
pub struct PhaseGuard {
    previous: Option<PipelinePhase>,
}

impl Drop for PhaseGuard {
    fn drop(&mut self) {
        CURRENT_PHASE.with(|phase| phase.set(self.previous));
    }
}

/// Set the current pipeline phase.
///
/// Returns a guard that restores the previous phase on drop.
///
/// # Example
///
/// ```
/// use engagemap::observability::{current_phase, set_phase, PipelinePhase};
///
/// {
///     let _phase = set_phase(PipelinePhase::Aggregation);
///     assert_eq!(current_phase(), Some(PipelinePhase::Aggregation));
/// }
/// assert_eq!(current_phase(), None);
/// ```
#[must_use]
pub fn set_phase(phase: PipelinePhase) -> PhaseGuard {
    CURRENT_PHASE.with(|current| {
        let previous = current.replace(Some(phase));
        PhaseGuard { previous }
    })
}

pub fn current_phase() -> Option<PipelinePhase> {
    CURRENT_PHASE.with(Cell::get)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_phases_restore() {
        let outer = set_phase(PipelinePhase::Loading);
        {
            let _inner = set_phase(PipelinePhase::Ranking);
            assert_eq!(current_phase(), Some(PipelinePhase::Ranking));
        }
        assert_eq!(current_phase(), Some(PipelinePhase::Loading));
        drop(outer);
        assert_eq!(current_phase(), None);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(PipelinePhase::OutputGeneration.to_string(), "output_generation");
    }
}
