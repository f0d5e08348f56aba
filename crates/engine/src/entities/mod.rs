//! Entity modules - wrap port traits with the tracker's storage rules.

pub mod conditions;
pub mod settings;

pub use conditions::Conditions;
pub use settings::{Settings, SettingsError};
