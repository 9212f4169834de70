/// `Timer` over `window.setTimeout`

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use crate::config::WidgetConfig;
use crate::error::SettingsError;
use crate::operations::run_deferred;
use crate::ports::{Deferred, TaskHandle, Timer};

use super::{WebPage, js_error};

thread_local! {
    // Timeouts armed but not yet fired or cleared, across every `WindowTimer`.
    static PENDING: RefCell<HashSet<i32>> = RefCell::new(HashSet::new());
}

pub struct WindowTimer {
    window: Window,
    config: WidgetConfig,
}

impl WindowTimer {
    pub fn new(window: Window, config: WidgetConfig) -> WindowTimer {
        WindowTimer { window, config }
    }

    pub fn is_pending(handle: TaskHandle) -> bool {
        PENDING.with(|pending| pending.borrow().contains(&handle.0))
    }
}

impl Timer for WindowTimer {
    fn schedule(&mut self, delay: Duration, task: Deferred) -> Result<TaskHandle, SettingsError> {
        let config = self.config.clone();
        let id = Rc::new(Cell::new(0));
        let fired_id = Rc::clone(&id);
        // The page is looked up again when the timeout fires.
        let callback = Closure::once_into_js(move || {
            PENDING.with(|pending| pending.borrow_mut().remove(&fired_id.get()));
            match WebPage::current() {
                Ok(mut page) => run_deferred(&mut page, task, &config),
                Err(e) => log::warn!("dropping {:?}: {}", task, e),
            }
        });

        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
            .map_err(|e| js_error("Failed to schedule task", e))?;

        id.set(handle);
        PENDING.with(|pending| pending.borrow_mut().insert(handle));
        Ok(TaskHandle(handle))
    }

    fn cancel(&mut self, handle: TaskHandle) -> bool {
        let armed = PENDING.with(|pending| pending.borrow_mut().remove(&handle.0));
        if armed {
            self.window.clear_timeout_with_handle(handle.0);
        }
        armed
    }
}
