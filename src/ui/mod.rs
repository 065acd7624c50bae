//! Terminal UI: app loop and the dashboard screen

mod app;
pub mod dashboard;

pub use app::{App, UIConfig, run};
