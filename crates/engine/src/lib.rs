//! Condition tracker engine library.
//!
//! ## Structure
//!
//! - `entities/` - Entity modules wrapping port operations
//! - `use_cases/` - Tracker orchestration and the HUD/panel shim
//! - `infrastructure/` - Port traits and their SQLite/in-memory adapters
//! - `app` - Application composition

pub mod app;
pub mod entities;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
