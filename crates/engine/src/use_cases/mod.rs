//! Use cases - User story orchestration.
//!
//! `tracker` joins storage, settings and actor data for one token; `hud`
//! is the host-facing button and panel built on top of it.

pub mod hud;
pub mod tracker;

pub use hud::{
    hud_button_for, AbilityOption, HostUser, HudButton, HudColumn, PanelError, PanelOptions,
    PanelOutcome, PanelView, TrackerPanel,
};
pub use tracker::{ConditionTracker, TrackerError};
