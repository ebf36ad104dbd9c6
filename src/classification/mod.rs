//! Flight phase classification
//!
//! ## Pipeline
//!
//! 1. **PhaseDetector**: four independent scans for Launch, Apogee,
//!    ParachuteDeployed and Landing, each returning a sample index
//! 2. **RangeStageBuilder**: Ascent and Descent spans from those indices
//! 3. **PhaseClassifier**: assembles the pruned, ordered [`PhaseMap`]
//!
//! [`PhaseMap`]: crate::types::PhaseMap

pub mod detector;
pub mod range;
pub mod classifier;

pub use detector::PhaseDetector;
pub use range::{RangeStageBuilder, RangeStages};
pub use classifier::{classify_phases, PhaseClassifier};
