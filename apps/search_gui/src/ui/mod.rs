//! UI layer for the search GUI: app shell and result widgets.

pub mod app;
pub mod widgets;

pub use app::{SearchApp, StartupConfig};
