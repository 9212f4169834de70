/// Explicit handler registration: one `Widget` owns a set of ports and routes
/// page events to the settings operations.

use crate::config::WidgetConfig;
use crate::error::SettingsError;
use crate::operations::{
    SavedSettings, load_client_settings, run_deferred, save_client_settings, set_active_tab,
    toggle_all_selection,
};
use crate::ports::{Clock, CookieStore, Deferred, Page, Timer};
use crate::preferences::Preferences;

/// A page event, carrying the element it came from where that matters.
#[derive(Debug, Clone)]
pub enum Action<N> {
    ToggleAll,
    ActivateTab(N),
    Save,
    Load,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Toggled(usize),
    TabActivated(String),
    Saved(SavedSettings),
    Loaded(Option<Preferences>),
}

pub struct Widget<P, S, T, C> {
    page: P,
    store: S,
    timer: T,
    clock: C,
    config: WidgetConfig,
}

impl<P, S, T, C> Widget<P, S, T, C>
where
    P: Page,
    S: CookieStore,
    T: Timer,
    C: Clock,
{
    pub fn new(page: P, store: S, timer: T, clock: C, config: WidgetConfig) -> Self {
        Widget {
            page,
            store,
            timer,
            clock,
            config,
        }
    }

    pub fn dispatch(&mut self, action: Action<P::Node>) -> Result<Outcome, SettingsError> {
        match action {
            Action::ToggleAll => Ok(Outcome::Toggled(toggle_all_selection(
                &mut self.page,
                &self.config,
            ))),
            Action::ActivateTab(tab) => {
                set_active_tab(&mut self.page, &tab, &self.config).map(Outcome::TabActivated)
            }
            Action::Save => save_client_settings(
                &mut self.page,
                &mut self.store,
                &mut self.timer,
                &self.clock,
                &self.config,
            )
            .map(Outcome::Saved),
            Action::Load => load_client_settings(&mut self.page, &mut self.store, &self.config)
                .map(Outcome::Loaded),
        }
    }

    pub fn run_deferred(&mut self, task: Deferred) {
        run_deferred(&mut self.page, task, &self.config);
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }
}
