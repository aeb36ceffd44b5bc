use wasm_bindgen::JsValue;

mod components;
mod config;
mod model;
mod state;
mod util;

use components::{App, AppProps};
use config::AppConfig;

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::default();
    if let Err(e) = console_log::init_with_level(config.level()) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logger init failed: {e}")));
    }
    log::info!(
        "gesture playground starting with {}",
        serde_json::to_string(&config).unwrap_or_default()
    );
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
