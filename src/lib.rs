/// search-settings - settings page handlers for the search front end
/// Built with Rust + WASM

pub mod browser;
pub mod config;
pub mod cookie;
pub mod dispatch;
pub mod error;
pub mod operations;
pub mod ports;
pub mod preferences;

#[cfg(test)]
mod fake;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

use crate::config::WidgetConfig;
use crate::dispatch::{Action, Outcome};
use crate::error::SettingsError;

thread_local! {
    static CONFIG: RefCell<WidgetConfig> = RefCell::new(WidgetConfig::default());
}

fn current_config() -> WidgetConfig {
    CONFIG.with(|config| config.borrow().clone())
}

fn to_js(err: SettingsError) -> JsValue {
    log::error!("settings handler failed: {}", err);
    JsValue::from_str(&err.to_string())
}

fn run(action: Action<Element>) -> Result<Outcome, JsValue> {
    browser::widget(current_config())
        .and_then(|mut widget| widget.dispatch(action))
        .map_err(to_js)
}

// Set up panic hook and logging, then apply stored settings for this page load
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Trace));
    log::set_max_level(current_config().log_level);

    // Already logged by `run`.
    let _ = get_client_settings();
}

/// Replace the widget configuration. Omitted fields keep their defaults.
#[wasm_bindgen]
pub fn configure(options: JsValue) -> Result<(), JsValue> {
    let config: WidgetConfig = if options.is_null() || options.is_undefined() {
        WidgetConfig::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| to_js(SettingsError::Config(e.to_string())))?
    };

    log::set_max_level(config.log_level);
    CONFIG.with(|current| *current.borrow_mut() = config);
    Ok(())
}

#[wasm_bindgen(js_name = toggleAllSelection)]
pub fn toggle_all_selection() -> Result<(), JsValue> {
    run(Action::ToggleAll).map(|_| ())
}

#[wasm_bindgen(js_name = setActiveTab)]
pub fn set_active_tab(tab: HtmlElement) -> Result<(), JsValue> {
    run(Action::ActivateTab(Element::from(tab))).map(|_| ())
}

#[wasm_bindgen(js_name = setClientSettings)]
pub fn set_client_settings() -> Result<(), JsValue> {
    run(Action::Save).map(|_| ())
}

#[wasm_bindgen(js_name = getClientSettings)]
pub fn get_client_settings() -> Result<(), JsValue> {
    run(Action::Load).map(|_| ())
}

/// Stored preferences as a plain object, or `undefined` when none are saved.
#[wasm_bindgen(js_name = currentPreferences)]
pub fn current_preferences() -> Result<JsValue, JsValue> {
    let config = current_config();
    let store = browser::document()
        .and_then(browser::DocumentCookies::new)
        .map_err(to_js)?;
    let preferences = operations::stored_preferences(&store, &config).map_err(to_js)?;

    serde_wasm_bindgen::to_value(&preferences).map_err(|e| {
        to_js(SettingsError::Environment(format!(
            "Failed to serialize preferences: {:?}",
            e
        )))
    })
}
