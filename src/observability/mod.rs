//! Observability infrastructure: logging setup and phase tracking.
//!
//! Install logging once at startup, then mark stages as they run:
//!
//! ```ignore
//! use engagemap::observability::{init_tracing, set_phase, PipelinePhase};
//!
//! init_tracing(1);
//! let _phase = set_phase(PipelinePhase::Normalization);
//! ```

pub mod context;
pub mod tracing;

pub use context::{current_phase, set_phase, PhaseGuard, PipelinePhase};
pub use self::tracing::{init_tracing, verbosity_filter};
