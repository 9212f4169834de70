/// Widget configuration: every class name, path and constant the handlers use
use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// How the settings cookie is located in `document.cookie`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CookieLookup {
    /// Decode the value of whichever entry comes last, whatever its name.
    /// Breaks as soon as the page carries a second cookie.
    #[default]
    LastEntry,
    /// Decode the value of the entry named `cookie_name`.
    ByName,
}

/// CSS class names the handlers query for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassNames {
    pub select_all: String,
    pub engine: String,
    pub tab: String,
    pub button: String,
    pub message: String,
    pub active: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        ClassNames {
            select_all: "select_all".to_string(),
            engine: "engine".to_string(),
            tab: "tab".to_string(),
            button: "btn".to_string(),
            message: "message".to_string(),
            active: "active".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    pub cookie_name: String,
    pub cookie_lookup: CookieLookup,
    /// Overwrite an undecodable cookie with an empty one.
    pub reset_malformed_cookie: bool,
    pub saved_message: String,
    pub message_timeout_ms: u64,
    pub classes: ClassNames,
    pub theme_select: String,
    pub colorscheme_select: String,
    pub themes_path: String,
    pub colorschemes_path: String,
    /// How many ancestors above an engine checkbox hold its label text.
    pub engine_label_depth: usize,
    pub log_level: LevelFilter,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        WidgetConfig {
            cookie_name: "appCookie".to_string(),
            cookie_lookup: CookieLookup::default(),
            reset_malformed_cookie: false,
            saved_message: "✅ The settings have been saved sucessfully!!".to_string(),
            message_timeout_ms: 10_000,
            classes: ClassNames::default(),
            theme_select: "themes".to_string(),
            colorscheme_select: "colorschemes".to_string(),
            themes_path: "static/themes".to_string(),
            colorschemes_path: "static/colorschemes".to_string(),
            engine_label_depth: 2,
            log_level: LevelFilter::Info,
        }
    }
}

impl WidgetConfig {
    pub fn message_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.message_timeout_ms)
    }

    pub fn theme_href(&self, theme: &str) -> String {
        format!("{}/{}.css", self.themes_path, theme)
    }

    pub fn colorscheme_href(&self, colorscheme: &str) -> String {
        format!("{}/{}.css", self.colorschemes_path, colorscheme)
    }
}
