/// Seams between the settings handlers and the browser globals they touch.
///
/// The handlers only ever see these traits. `crate::browser` implements them
/// on top of `web-sys`; the test fakes implement them in memory.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::SettingsError;

/// The handful of CSS selector shapes the handlers need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    /// `.name`
    Class(&'a str),
    /// `tag`
    Tag(&'a str),
    /// `tag[name="name"]`
    Named { tag: &'a str, name: &'a str },
}

impl fmt::Display for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Class(class) => write!(f, ".{}", class),
            Selector::Tag(tag) => write!(f, "{}", tag),
            Selector::Named { tag, name } => write!(f, "{}[name=\"{}\"]", tag, name),
        }
    }
}

/// Read and mutate access to the document tree.
pub trait Page {
    type Node: Clone;

    /// First match in document order.
    fn query(&self, selector: &Selector<'_>) -> Option<Self::Node>;

    /// All matches in document order.
    fn query_all(&self, selector: &Selector<'_>) -> Vec<Self::Node>;

    fn is_checked(&self, node: &Self::Node) -> bool;
    fn set_checked(&mut self, node: &Self::Node, checked: bool);

    fn add_class(&mut self, node: &Self::Node, class: &str);
    fn remove_class(&mut self, node: &Self::Node, class: &str);

    /// Rendered text of the node and its descendants.
    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&mut self, node: &Self::Node, text: &str);

    /// Current value of a form control.
    fn value(&self, node: &Self::Node) -> String;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    /// Walk `levels` parents up; `None` if the tree is shallower.
    fn ancestor(&self, node: &Self::Node, levels: usize) -> Option<Self::Node>;
}

/// `document.cookie`
pub trait CookieStore {
    fn cookies(&self) -> Result<String, SettingsError>;
    fn set_cookie(&mut self, assignment: &str) -> Result<(), SettingsError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub i32);

/// Work run by a `Timer` once its delay elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    ClearMessage,
}

pub trait Timer {
    fn schedule(&mut self, delay: Duration, task: Deferred) -> Result<TaskHandle, SettingsError>;

    /// Returns whether a pending task was dropped.
    fn cancel(&mut self, handle: TaskHandle) -> bool;
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
