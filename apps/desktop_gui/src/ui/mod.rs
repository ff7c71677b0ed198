//! UI layer for desktop GUI: app shell, form inputs, result panels and alerts.

pub mod alerts;
pub mod app;
pub mod form;
pub mod results;

pub use app::DesktopGuiApp;
