/// Cookie string building and parsing for the settings cookie

use std::fmt;

use chrono::{DateTime, Datelike, Utc};

use crate::config::CookieLookup;
use crate::error::SettingsError;

/// Same calendar date and time one year later.
///
/// 29 February has no counterpart in the next year and rolls over to
/// 1 March, which is what `Date.prototype.setFullYear` does. The date is
/// taken in UTC, not the page's local time zone.
pub fn one_year_after(now: DateTime<Utc>) -> Result<DateTime<Utc>, SettingsError> {
    let year = now.year() + 1;
    now.with_year(year)
        .or_else(|| {
            now.with_day(1)
                .and_then(|d| d.with_month(3))
                .and_then(|d| d.with_year(year))
        })
        .ok_or(SettingsError::ExpiryOutOfRange)
}

/// RFC 1123 date as produced by `Date.prototype.toUTCString`.
pub fn format_expires(expires: &DateTime<Utc>) -> String {
    expires.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// A `name=value; expires=...` assignment for `document.cookie`.
#[derive(Debug, Clone, PartialEq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub expires: Option<DateTime<Utc>>,
}

impl SetCookie {
    pub fn new(name: &str, value: String, expires: DateTime<Utc>) -> SetCookie {
        SetCookie {
            name: name.to_string(),
            value,
            expires: Some(expires),
        }
    }

    /// An empty session cookie that replaces whatever was stored under `name`.
    pub fn cleared(name: &str) -> SetCookie {
        SetCookie {
            name: name.to_string(),
            value: String::new(),
            expires: None,
        }
    }
}

impl fmt::Display for SetCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)?;
        if let Some(expires) = &self.expires {
            write!(f, "; expires={}", format_expires(expires))?;
        }
        Ok(())
    }
}

/// Locate the stored settings value in a `document.cookie` string.
///
/// Returns `None` when there is nothing to decode: an empty cookie string,
/// no matching entry, or an empty value.
pub fn find_value<'a>(cookies: &'a str, name: &str, lookup: CookieLookup) -> Option<&'a str> {
    if cookies.trim().is_empty() {
        return None;
    }

    let value = match lookup {
        // Second `=`-segment of the last entry; a value containing `=` is cut short.
        CookieLookup::LastEntry => cookies.split(';').last()?.split('=').nth(1)?,
        CookieLookup::ByName => cookies.split(';').find_map(|entry| {
            entry
                .trim()
                .split_once('=')
                .filter(|(key, _)| *key == name)
                .map(|(_, value)| value)
        })?,
    };

    let value = value.trim();
    if value.is_empty() { None } else { Some(value) }
}
