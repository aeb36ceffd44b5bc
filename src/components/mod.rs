pub mod app;
pub mod hud_panel;
pub mod intro_overlay;

pub use app::{App, AppProps};
