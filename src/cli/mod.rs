pub mod context;
pub mod controller;
pub mod prompt;
pub mod session;
pub mod tui;

pub use context::SweepContext;
pub use controller::{CleanupController, CleanupState, Effect, Input, ScrollWindow};
pub use session::{SessionEnd, run_session};
