/// The preferences record persisted in the settings cookie
use serde::{Deserialize, Serialize};

/// Theme, color scheme and enabled engines chosen on the settings page.
///
/// Field order is the serialized key order. Missing keys decode to empty
/// values so a partially written cookie still parses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: String,
    pub colorscheme: String,
    pub engines: Vec<String>,
}

impl Preferences {
    pub fn new(theme: String, colorscheme: String, engines: Vec<String>) -> Preferences {
        Preferences {
            theme,
            colorscheme,
            engines,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Preferences, serde_json::Error> {
        serde_json::from_str(json)
    }
}
