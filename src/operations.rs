/// Settings page handlers: bulk engine selection, tab switching, saving and
/// applying the preferences cookie.
///
/// Each handler is generic over the ports in `crate::ports` and runs to
/// completion; the only deferred work is clearing the save confirmation.

use crate::config::WidgetConfig;
use crate::cookie::{SetCookie, find_value, one_year_after};
use crate::error::SettingsError;
use crate::ports::{Clock, CookieStore, Deferred, Page, Selector, TaskHandle, Timer};
use crate::preferences::Preferences;

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedSettings {
    pub preferences: Preferences,
    /// Pending clear of the confirmation message, if a message element exists.
    pub clear_task: Option<TaskHandle>,
}

/// Copy the "select all" checkbox state onto every engine checkbox.
///
/// Returns the number of engine checkboxes updated. Without a "select all"
/// control nothing changes.
pub fn toggle_all_selection<P: Page>(page: &mut P, config: &WidgetConfig) -> usize {
    let Some(select_all) = page.query(&Selector::Class(&config.classes.select_all)) else {
        log::debug!("no .{} control on this page", config.classes.select_all);
        return 0;
    };
    let checked = page.is_checked(&select_all);

    let engines = page.query_all(&Selector::Class(&config.classes.engine));
    for engine in &engines {
        page.set_checked(engine, checked);
    }

    log::debug!("set {} engines to checked={}", engines.len(), checked);
    engines.len()
}

/// Panel class for a tab label: lowercased, first space replaced by `_`.
///
/// Only the first space is replaced, so "Search Engine List" maps to
/// `search_engine list`, which is not a usable class name.
pub fn panel_class(label: &str) -> String {
    label.to_lowercase().replacen(' ', "_", 1)
}

/// Make `tab` the only active tab/button and activate its content panel.
///
/// The tab itself is activated before the panel lookup, so a label with no
/// matching panel still leaves the tab marked active.
pub fn set_active_tab<P: Page>(
    page: &mut P,
    tab: &P::Node,
    config: &WidgetConfig,
) -> Result<String, SettingsError> {
    let active = config.classes.active.as_str();

    for class in [&config.classes.tab, &config.classes.button] {
        for node in page.query_all(&Selector::Class(class)) {
            page.remove_class(&node, active);
        }
    }
    page.add_class(tab, active);

    let panel = panel_class(&page.text(tab));
    let selector = Selector::Class(&panel);
    match page.query(&selector) {
        Some(node) => {
            page.add_class(&node, active);
            Ok(panel)
        }
        None => {
            log::warn!("tab has no content panel matching `{}`", selector);
            Err(SettingsError::MissingElement(selector.to_string()))
        }
    }
}

/// Read theme, color scheme and checked engines off the settings form.
pub fn collect_preferences<P: Page>(page: &P, config: &WidgetConfig) -> Preferences {
    let mut theme = None;
    let mut colorscheme = None;

    for select in page.query_all(&Selector::Tag("select")) {
        match page.attribute(&select, "name") {
            Some(name) if name == config.theme_select => theme = Some(page.value(&select)),
            Some(name) if name == config.colorscheme_select => {
                colorscheme = Some(page.value(&select))
            }
            _ => {}
        }
    }

    let engines = page
        .query_all(&Selector::Class(&config.classes.engine))
        .iter()
        .filter(|engine| page.is_checked(engine))
        .map(|engine| match page.ancestor(engine, config.engine_label_depth) {
            Some(container) => page.text(&container).trim().to_string(),
            None => {
                log::warn!(
                    "engine checkbox is nested less than {} levels deep",
                    config.engine_label_depth
                );
                String::new()
            }
        })
        .collect();

    Preferences::new(
        theme.unwrap_or_else(|| missing_select(&config.theme_select)),
        colorscheme.unwrap_or_else(|| missing_select(&config.colorscheme_select)),
        engines,
    )
}

fn missing_select(name: &str) -> String {
    log::warn!("no select named `{}`, saving an empty value", name);
    String::new()
}

/// Store the current form state in the settings cookie for one year and
/// flash the confirmation message.
pub fn save_client_settings<P, S, T, C>(
    page: &mut P,
    store: &mut S,
    timer: &mut T,
    clock: &C,
    config: &WidgetConfig,
) -> Result<SavedSettings, SettingsError>
where
    P: Page,
    S: CookieStore,
    T: Timer,
    C: Clock,
{
    let preferences = collect_preferences(page, config);

    let expires = one_year_after(clock.now())?;
    let cookie = SetCookie::new(&config.cookie_name, preferences.to_json()?, expires);
    store.set_cookie(&cookie.to_string())?;
    log::debug!("saved preferences: {}", cookie);

    let clear_task = match page.query(&Selector::Class(&config.classes.message)) {
        Some(message) => {
            page.set_text(&message, &config.saved_message);
            Some(timer.schedule(config.message_timeout(), Deferred::ClearMessage)?)
        }
        None => {
            log::warn!("no .{} element for the save confirmation", config.classes.message);
            None
        }
    };

    Ok(SavedSettings {
        preferences,
        clear_task,
    })
}

/// Decode the preferences held in the settings cookie without touching the page.
pub fn stored_preferences<S: CookieStore>(
    store: &S,
    config: &WidgetConfig,
) -> Result<Option<Preferences>, SettingsError> {
    let cookies = store.cookies()?;
    match find_value(&cookies, &config.cookie_name, config.cookie_lookup) {
        Some(value) => Ok(Some(Preferences::from_json(value)?)),
        None => Ok(None),
    }
}

/// Point the theme and color scheme stylesheet links at the chosen files.
///
/// Returns the number of links rewritten. Empty values leave their link alone.
pub fn apply_preferences<P: Page>(
    page: &mut P,
    preferences: &Preferences,
    config: &WidgetConfig,
) -> usize {
    let mut rewritten = 0;

    for link in page.query_all(&Selector::Tag("link")) {
        let href = page.attribute(&link, "href").unwrap_or_default();
        let target = if href.contains(&config.themes_path) {
            Some(&preferences.theme)
                .filter(|t| !t.is_empty())
                .map(|t| config.theme_href(t))
        } else if href.contains(&config.colorschemes_path) {
            Some(&preferences.colorscheme)
                .filter(|c| !c.is_empty())
                .map(|c| config.colorscheme_href(c))
        } else {
            continue;
        };

        match target {
            Some(target) => {
                page.set_attribute(&link, "href", &target);
                rewritten += 1;
            }
            None => log::warn!("stored preferences leave `{}` unset", href),
        }
    }

    log::debug!("rewrote {} stylesheet links", rewritten);
    rewritten
}

/// Apply the stored preferences, if any, to the page's stylesheet links.
pub fn load_client_settings<P, S>(
    page: &mut P,
    store: &mut S,
    config: &WidgetConfig,
) -> Result<Option<Preferences>, SettingsError>
where
    P: Page,
    S: CookieStore,
{
    let preferences = match stored_preferences(store, config) {
        Ok(Some(preferences)) => preferences,
        Ok(None) => return Ok(None),
        Err(err @ SettingsError::Json(_)) => {
            if config.reset_malformed_cookie {
                log::warn!("clearing undecodable {} cookie", config.cookie_name);
                store.set_cookie(&SetCookie::cleared(&config.cookie_name).to_string())?;
            }
            return Err(err);
        }
        Err(err) => return Err(err),
    };

    apply_preferences(page, &preferences, config);
    Ok(Some(preferences))
}

/// Run a task handed back by a `Timer`.
pub fn run_deferred<P: Page>(page: &mut P, task: Deferred, config: &WidgetConfig) {
    match task {
        Deferred::ClearMessage => {
            if let Some(message) = page.query(&Selector::Class(&config.classes.message)) {
                page.set_text(&message, "");
            }
        }
    }
}
