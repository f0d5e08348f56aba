//! Rules that turn actor data into buildup thresholds.
//!
//! Both halves are pure: the ability resolver reads actor data with fixed
//! fallbacks, and the threshold calculator is plain arithmetic.

pub mod ability;
pub mod threshold;

pub use ability::{
    ability_score, proficiency_bonus, DEFAULT_ABILITY_SCORE, DEFAULT_PROFICIENCY_BONUS,
};
pub use threshold::{effective_bonus, threshold};
