//! `setTimeout`-backed scheduler for the tooltip show and hide timers

use page_tooltips_core::{Scheduler, TimerId, TimerKind};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Window;

/// Receives fired timers; installed once the manager exists
pub type TimerDispatch = Rc<dyn Fn(TimerKind, TimerId)>;

pub struct BrowserScheduler {
    window: Window,
    next_id: Cell<u64>,
    /// Browser timeout handle per live timer
    handles: Rc<RefCell<HashMap<TimerId, i32>>>,
    dispatch: Rc<RefCell<Option<TimerDispatch>>>,
}

impl BrowserScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            next_id: Cell::new(0),
            handles: Rc::new(RefCell::new(HashMap::new())),
            dispatch: Rc::new(RefCell::new(None)),
        }
    }

    /// Slot the composition root fills with the manager callback
    pub fn dispatch_slot(&self) -> Rc<RefCell<Option<TimerDispatch>>> {
        self.dispatch.clone()
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&self, kind: TimerKind, delay_ms: u32) -> TimerId {
        let id = TimerId(self.next_id.get() + 1);
        self.next_id.set(id.0);

        let handles = self.handles.clone();
        let dispatch = self.dispatch.clone();
        let callback = Closure::once_into_js(move || {
            handles.borrow_mut().remove(&id);
            let dispatch = dispatch.borrow().clone();
            if let Some(dispatch) = dispatch {
                dispatch(kind, id);
            }
        });

        let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), timeout)
        {
            Ok(handle) => {
                self.handles.borrow_mut().insert(id, handle);
            }
            Err(err) => log::warn!("Failed to schedule tooltip {kind:?} timer: {err:?}"),
        }

        id
    }

    fn cancel(&self, id: TimerId) {
        if let Some(handle) = self.handles.borrow_mut().remove(&id) {
            self.window.clear_timeout_with_handle(handle);
        }
    }
}
