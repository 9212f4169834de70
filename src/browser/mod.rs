/// Browser adapters for the settings ports
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use crate::config::WidgetConfig;
use crate::dispatch::Widget;
use crate::error::SettingsError;
use crate::ports::SystemClock;

pub mod cookies;
pub mod page;
pub mod timer;

pub use cookies::DocumentCookies;
pub use page::WebPage;
pub use timer::WindowTimer;

pub type BrowserWidget = Widget<WebPage, DocumentCookies, WindowTimer, SystemClock>;

pub fn window() -> Result<Window, SettingsError> {
    web_sys::window().ok_or_else(|| SettingsError::Environment("window is unavailable".to_string()))
}

pub fn document() -> Result<Document, SettingsError> {
    window()?
        .document()
        .ok_or_else(|| SettingsError::Environment("document is unavailable".to_string()))
}

/// Widget bound to the current window and document.
pub fn widget(config: WidgetConfig) -> Result<BrowserWidget, SettingsError> {
    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| SettingsError::Environment("document is unavailable".to_string()))?;

    Ok(Widget::new(
        WebPage::new(document.clone()),
        DocumentCookies::new(document)?,
        WindowTimer::new(window, config.clone()),
        SystemClock,
        config,
    ))
}

fn js_error(context: &str, e: JsValue) -> SettingsError {
    SettingsError::Environment(format!("{}: {:?}", context, e))
}
