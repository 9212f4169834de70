/// `CookieStore` over `document.cookie`

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlDocument};

use crate::error::SettingsError;
use crate::ports::CookieStore;

use super::js_error;

pub struct DocumentCookies {
    document: HtmlDocument,
}

impl DocumentCookies {
    pub fn new(document: Document) -> Result<DocumentCookies, SettingsError> {
        document
            .dyn_into::<HtmlDocument>()
            .map(|document| DocumentCookies { document })
            .map_err(|_| SettingsError::Environment("document has no cookie jar".to_string()))
    }
}

impl CookieStore for DocumentCookies {
    /// Percent-decoded `document.cookie`; the raw string if it does not decode.
    fn cookies(&self) -> Result<String, SettingsError> {
        let raw = self
            .document
            .cookie()
            .map_err(|e| js_error("Failed to read cookies", e))?;

        match js_sys::decode_uri_component(&raw) {
            Ok(decoded) => Ok(decoded.into()),
            Err(e) => {
                log::warn!("cookie string is not URI-encoded: {:?}", e);
                Ok(raw)
            }
        }
    }

    fn set_cookie(&mut self, assignment: &str) -> Result<(), SettingsError> {
        self.document
            .set_cookie(assignment)
            .map_err(|e| js_error("Failed to write cookie", e))
    }
}
