/// In-memory implementations of the ports, for unit tests

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use crate::error::SettingsError;
use crate::ports::{Clock, CookieStore, Deferred, Page, Selector, TaskHandle, Timer};

#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    pub value: String,
    pub checked: bool,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

impl FakeElement {
    fn matches(&self, selector: &Selector<'_>) -> bool {
        match selector {
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
            Selector::Tag(tag) => self.tag == *tag,
            Selector::Named { tag, name } => {
                self.tag == *tag && self.attributes.get("name").map(String::as_str) == Some(*name)
            }
        }
    }
}

/// A document tree held in a flat arena. Elements are stored in the order
/// they were added, which the tests keep equal to document order.
#[derive(Debug, Default)]
pub struct FakePage {
    elements: Vec<FakeElement>,
    pub mutations: usize,
}

impl FakePage {
    pub fn new() -> Self {
        FakePage::default()
    }

    pub fn add(&mut self, parent: Option<usize>, tag: &str, classes: &[&str]) -> usize {
        let id = self.elements.len();
        self.elements.push(FakeElement {
            tag: tag.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            parent,
            ..FakeElement::default()
        });
        if let Some(parent) = parent {
            self.elements[parent].children.push(id);
        }
        id
    }

    pub fn with_text(&mut self, id: usize, text: &str) -> usize {
        self.elements[id].text = text.to_string();
        id
    }

    pub fn with_attribute(&mut self, id: usize, name: &str, value: &str) -> usize {
        self.elements[id]
            .attributes
            .insert(name.to_string(), value.to_string());
        id
    }

    pub fn element_mut(&mut self, id: usize) -> &mut FakeElement {
        &mut self.elements[id]
    }

    pub fn has_class(&self, id: usize, class: &str) -> bool {
        self.elements[id].classes.iter().any(|c| c == class)
    }

    pub fn href(&self, id: usize) -> Option<&str> {
        self.elements[id].attributes.get("href").map(String::as_str)
    }
}

impl Page for FakePage {
    type Node = usize;

    fn query(&self, selector: &Selector<'_>) -> Option<usize> {
        self.elements.iter().position(|e| e.matches(selector))
    }

    fn query_all(&self, selector: &Selector<'_>) -> Vec<usize> {
        (0..self.elements.len())
            .filter(|&id| self.elements[id].matches(selector))
            .collect()
    }

    fn is_checked(&self, node: &usize) -> bool {
        self.elements[*node].checked
    }

    fn set_checked(&mut self, node: &usize, checked: bool) {
        self.mutations += 1;
        self.elements[*node].checked = checked;
    }

    fn add_class(&mut self, node: &usize, class: &str) {
        self.mutations += 1;
        let classes = &mut self.elements[*node].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, node: &usize, class: &str) {
        self.mutations += 1;
        self.elements[*node].classes.retain(|c| c != class);
    }

    fn text(&self, node: &usize) -> String {
        let element = &self.elements[*node];
        element
            .children
            .iter()
            .fold(element.text.clone(), |mut text, child| {
                text.push_str(&self.text(child));
                text
            })
    }

    fn set_text(&mut self, node: &usize, text: &str) {
        self.mutations += 1;
        self.elements[*node].text = text.to_string();
    }

    fn value(&self, node: &usize) -> String {
        self.elements[*node].value.clone()
    }

    fn attribute(&self, node: &usize, name: &str) -> Option<String> {
        self.elements[*node].attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: &usize, name: &str, value: &str) {
        self.mutations += 1;
        self.with_attribute(*node, name, value);
    }

    fn ancestor(&self, node: &usize, levels: usize) -> Option<usize> {
        (0..levels).try_fold(*node, |current, _| self.elements[current].parent)
    }
}

/// Cookie jar keyed by name, rendered the way `document.cookie` reads.
#[derive(Debug, Default)]
pub struct FakeCookieJar {
    entries: Vec<(String, String)>,
    pub expires: BTreeMap<String, String>,
    pub writes: Vec<String>,
}

impl FakeCookieJar {
    pub fn new() -> Self {
        FakeCookieJar::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.entries.push((name.to_string(), value.to_string()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl CookieStore for FakeCookieJar {
    fn cookies(&self) -> Result<String, SettingsError> {
        Ok(self
            .entries
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; "))
    }

    fn set_cookie(&mut self, assignment: &str) -> Result<(), SettingsError> {
        self.writes.push(assignment.to_string());

        let mut parts = assignment.split(';');
        let (name, value) = parts
            .next()
            .and_then(|pair| pair.split_once('='))
            .ok_or_else(|| SettingsError::Environment(format!("bad cookie: {}", assignment)))?;

        if let Some(expires) = parts.find_map(|attr| attr.trim().strip_prefix("expires=")) {
            self.expires.insert(name.to_string(), expires.to_string());
        }

        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }
}

/// Timer driven by explicit `advance` calls.
#[derive(Debug, Default)]
pub struct VirtualTimer {
    elapsed: Duration,
    next_id: i32,
    pending: Vec<(TaskHandle, Duration, Deferred)>,
}

impl VirtualTimer {
    pub fn new() -> Self {
        VirtualTimer::default()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Move time forward and hand back every task that came due, oldest first.
    pub fn advance(&mut self, by: Duration) -> Vec<Deferred> {
        self.elapsed += by;
        let now = self.elapsed;
        let (mut due, waiting): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|(_, at, _)| *at <= now);
        self.pending = waiting;
        due.sort_by_key(|(handle, at, _)| (*at, handle.0));
        due.into_iter().map(|(_, _, task)| task).collect()
    }
}

impl Timer for VirtualTimer {
    fn schedule(&mut self, delay: Duration, task: Deferred) -> Result<TaskHandle, SettingsError> {
        self.next_id += 1;
        let handle = TaskHandle(self.next_id);
        self.pending.push((handle, self.elapsed + delay, task));
        Ok(handle)
    }

    fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(h, _, _)| *h != handle);
        self.pending.len() < before
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(year: i32, month: u32, day: u32) -> Self {
        FixedClock(Utc.with_ymd_and_hms(year, month, day, 9, 15, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Element ids of a populated settings page.
#[derive(Debug)]
pub struct SettingsFixture {
    pub theme_link: usize,
    pub colorscheme_link: usize,
    pub other_link: usize,
    pub buttons: Vec<usize>,
    pub panels: Vec<usize>,
    pub select_all: usize,
    pub engines: Vec<usize>,
    pub theme_select: usize,
    pub colorscheme_select: usize,
    pub message: usize,
}

/// Settings page with sidebar buttons, one panel per button, engine
/// toggles nested `div.toggle_btn > label.switch > input.engine`, the two
/// style selects and the stylesheet links.
pub fn settings_page() -> (FakePage, SettingsFixture) {
    let mut page = FakePage::new();
    let root = page.add(None, "html", &[]);

    let theme_link = page.add(Some(root), "link", &[]);
    page.with_attribute(theme_link, "href", "static/themes/simple.css");
    let colorscheme_link = page.add(Some(root), "link", &[]);
    page.with_attribute(colorscheme_link, "href", "static/colorschemes/catppuccin-mocha.css");
    let other_link = page.add(Some(root), "link", &[]);
    page.with_attribute(other_link, "href", "static/index.css");

    let sidebar = page.add(Some(root), "div", &["sidebar"]);
    let labels = ["General", "User interface", "Engines", "Settings"];
    let buttons: Vec<usize> = labels
        .iter()
        .map(|label| {
            let button = page.add(Some(sidebar), "button", &["btn"]);
            page.with_text(button, label)
        })
        .collect();
    page.add_class(&buttons[0], "active");

    let main = page.add(Some(root), "div", &["main_container"]);
    let panels: Vec<usize> = ["general", "user_interface", "engines", "settings"]
        .iter()
        .map(|&name| page.add(Some(main), "div", &["tab", name]))
        .collect();
    page.add_class(&panels[0], "active");

    let engines_panel = panels[2];
    let select_all = page.add(Some(engines_panel), "input", &["select_all"]);
    let engines: Vec<usize> = ["Google", "Bing", "DuckDuckGo"]
        .iter()
        .map(|name| {
            let row = page.add(Some(engines_panel), "div", &["toggle_btn"]);
            page.with_text(row, &format!("\n        {}\n      ", name));
            let label = page.add(Some(row), "label", &["switch"]);
            page.add(Some(label), "input", &["engine"])
        })
        .collect();

    let ui_panel = panels[1];
    let theme_select = page.add(Some(ui_panel), "select", &[]);
    page.with_attribute(theme_select, "name", "themes");
    page.element_mut(theme_select).value = "simple".to_string();
    let colorscheme_select = page.add(Some(ui_panel), "select", &[]);
    page.with_attribute(colorscheme_select, "name", "colorschemes");
    page.element_mut(colorscheme_select).value = "catppuccin-mocha".to_string();

    let message = page.add(Some(root), "p", &["message"]);

    page.mutations = 0;
    (
        page,
        SettingsFixture {
            theme_link,
            colorscheme_link,
            other_link,
            buttons,
            panels,
            select_all,
            engines,
            theme_select,
            colorscheme_select,
            message,
        },
    )
}
