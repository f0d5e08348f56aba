//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Token flag storage (could swap SQLite -> the host's flag API)
//! - Module settings (could swap SQLite -> the host's settings registry)
//! - Token/actor data (read-only view of the host's documents)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;
pub mod types;

pub use error::RepoError;
pub use repos::{ConditionFlagRepo, ModuleSettingsRepo, TokenRepo};
pub use types::TokenSnapshot;

// =============================================================================
// Test-Only Mock Repositories (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockConditionFlagRepo, MockModuleSettingsRepo, MockTokenRepo};

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;
