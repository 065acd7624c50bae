//! Terminal dashboard
//!
//! State, event updaters, key handling and the per-section components

pub mod components;
pub mod input;
pub mod renderer;
pub mod state;
pub mod updaters;
pub mod utils;

pub use input::Command;
pub use renderer::render_dashboard;
pub use state::DashboardState;
