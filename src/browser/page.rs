/// `Page` over the live DOM

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement};

use crate::error::SettingsError;
use crate::ports::{Page, Selector};

pub struct WebPage {
    document: Document,
}

impl WebPage {
    pub fn new(document: Document) -> WebPage {
        WebPage { document }
    }

    pub fn current() -> Result<WebPage, SettingsError> {
        super::document().map(WebPage::new)
    }
}

impl Page for WebPage {
    type Node = Element;

    fn query(&self, selector: &Selector<'_>) -> Option<Element> {
        match self.document.query_selector(&selector.to_string()) {
            Ok(found) => found,
            Err(e) => {
                // Derived tab classes can contain characters CSS rejects.
                log::warn!("invalid selector `{}`: {:?}", selector, e);
                None
            }
        }
    }

    fn query_all(&self, selector: &Selector<'_>) -> Vec<Element> {
        match self.document.query_selector_all(&selector.to_string()) {
            Ok(list) => (0..list.length())
                .filter_map(|i| list.get(i))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .collect(),
            Err(e) => {
                log::warn!("invalid selector `{}`: {:?}", selector, e);
                Vec::new()
            }
        }
    }

    fn is_checked(&self, node: &Element) -> bool {
        node.dyn_ref::<HtmlInputElement>()
            .map_or(false, |input| input.checked())
    }

    fn set_checked(&mut self, node: &Element, checked: bool) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_checked(checked);
        }
    }

    fn add_class(&mut self, node: &Element, class: &str) {
        if let Err(e) = node.class_list().add_1(class) {
            log::warn!("failed to add class `{}`: {:?}", class, e);
        }
    }

    fn remove_class(&mut self, node: &Element, class: &str) {
        if let Err(e) = node.class_list().remove_1(class) {
            log::warn!("failed to remove class `{}`: {:?}", class, e);
        }
    }

    fn text(&self, node: &Element) -> String {
        match node.dyn_ref::<HtmlElement>() {
            Some(element) => element.inner_text(),
            None => node.text_content().unwrap_or_default(),
        }
    }

    fn set_text(&mut self, node: &Element, text: &str) {
        match node.dyn_ref::<HtmlElement>() {
            Some(element) => element.set_inner_text(text),
            None => node.set_text_content(Some(text)),
        }
    }

    fn value(&self, node: &Element) -> String {
        if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else {
            node.get_attribute("value").unwrap_or_default()
        }
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) {
        if let Err(e) = node.set_attribute(name, value) {
            log::warn!("failed to set `{}` attribute: {:?}", name, e);
        }
    }

    fn ancestor(&self, node: &Element, levels: usize) -> Option<Element> {
        (0..levels).try_fold(node.clone(), |current, _| current.parent_element())
    }
}
