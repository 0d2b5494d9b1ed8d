//! Simulated eye conditions and their visual effects.
//!
//! [`ConditionState`] is the single value object holding the on/off flag
//! for each [`ConditionId`]; [`ConditionOverlayManager`] is its only
//! mutation entry point and derives the lens material and the animated
//! markers from it.

/// Lens material swap and animated condition markers.
pub mod effects;
/// Condition ids, catalog text and on/off flags.
pub mod state;

pub use effects::{ConditionOverlayManager, MarkerInstance, MarkerKind};
pub use state::{ConditionId, ConditionState};
