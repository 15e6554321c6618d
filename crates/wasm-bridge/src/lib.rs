//! WASM bridge for page tooltips
//! Exposes the tooltip overlay manager to JavaScript and wires it to the
//! live document: `web-sys` DOM access, `setTimeout` timers and
//! document-level listeners.

use page_tooltips_core::{
    TimerId, TimerKind, TooltipConfig, TooltipError, TooltipManager, TooltipPosition,
};
use page_tooltips_shared::errors::ErrorResponse;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::Element;

pub mod browser_scheduler;
pub mod listeners;
pub mod web_dom;

use browser_scheduler::{BrowserScheduler, TimerDispatch};
use listeners::DocumentListeners;
use web_dom::WebDom;

pub type WebManager = TooltipManager<WebDom, BrowserScheduler>;

/// The page's single tooltip overlay.
///
/// Construct exactly one from the page's startup code and hand it to
/// whatever needs to annotate elements.
#[wasm_bindgen]
pub struct TooltipOverlay {
    manager: Rc<RefCell<WebManager>>,
    _listeners: DocumentListeners,
}

#[wasm_bindgen]
impl TooltipOverlay {
    /// Mount the overlay with default timing (500ms hover, 100ms hide settle)
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<TooltipOverlay, JsValue> {
        Self::build(TooltipConfig::default()).map_err(|err| to_js_error(err, "new"))
    }

    /// Mount the overlay with a configuration object, e.g.
    /// `{ default_delay_ms: 300, gap_px: 6 }`. Missing fields take defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<TooltipOverlay, JsValue> {
        let config: TooltipConfig = if config.is_undefined() || config.is_null() {
            TooltipConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|err| {
                to_js_error(
                    TooltipError::ConfigParse {
                        message: err.to_string(),
                    },
                    "withConfig",
                )
            })?
        };

        Self::build(config).map_err(|err| to_js_error(err, "withConfig"))
    }

    /// Annotate `element` and make it keyboard reachable
    #[wasm_bindgen]
    pub fn annotate(
        &self,
        element: &Element,
        text: &str,
        position: Option<String>,
        delay_ms: Option<u32>,
    ) {
        let manager = self.manager.borrow();
        let delay_ms = delay_ms.unwrap_or(manager.config().default_delay_ms);
        manager.annotate(
            element,
            text,
            TooltipPosition::parse_lenient(position.as_deref()),
            delay_ms,
        );
    }

    /// Remove the annotation added by `annotate`
    #[wasm_bindgen]
    pub fn unannotate(&self, element: &Element) {
        self.manager.borrow_mut().unannotate(element);
    }

    /// Show `text` next to `element` right away
    #[wasm_bindgen(js_name = showFor)]
    pub fn show_for(&self, element: Element, text: &str, position: Option<String>) {
        self.manager.borrow_mut().show_for(
            element,
            text,
            TooltipPosition::parse_lenient(position.as_deref()),
        );
    }

    /// Hide after the usual settle delay
    #[wasm_bindgen(js_name = hideFor)]
    pub fn hide_for(&self) {
        self.manager.borrow_mut().hide_for();
    }

    #[wasm_bindgen(js_name = isVisible)]
    pub fn is_visible(&self) -> bool {
        self.manager.borrow().is_visible()
    }

    /// Text currently written into the overlay, shown or not
    #[wasm_bindgen(js_name = currentText)]
    pub fn current_text(&self) -> Option<String> {
        self.manager.borrow().overlay().text()
    }

    /// Active configuration as JSON
    #[wasm_bindgen]
    pub fn config(&self) -> String {
        self.manager.borrow().config().to_json()
    }
}

impl TooltipOverlay {
    fn build(config: TooltipConfig) -> Result<TooltipOverlay, TooltipError> {
        let dom = WebDom::from_window()?;
        let document = dom.document().clone();
        let scheduler = BrowserScheduler::new(dom.window().clone());
        let dispatch_slot = scheduler.dispatch_slot();

        let manager = Rc::new(RefCell::new(TooltipManager::new(dom, scheduler, config)?));

        let weak = Rc::downgrade(&manager);
        let dispatch: TimerDispatch = Rc::new(move |kind: TimerKind, id: TimerId| {
            let Some(manager) = weak.upgrade() else {
                return;
            };
            match manager.try_borrow_mut() {
                Ok(mut manager) => manager.on_timer(kind, id),
                Err(_) => log::warn!("Tooltip manager busy, dropped {kind:?} timer"),
            };
        });
        *dispatch_slot.borrow_mut() = Some(dispatch);

        let listeners = DocumentListeners::attach(&document, Rc::downgrade(&manager))
            .map_err(|err| TooltipError::JsInterop {
                message: format!("{err:?}"),
            })?;

        log::info!("Tooltip overlay ready");
        Ok(TooltipOverlay {
            manager,
            _listeners: listeners,
        })
    }
}

fn to_js_error(error: TooltipError, operation: &str) -> JsValue {
    let response = ErrorResponse::new(error, js_sys::Date::now() as u64)
        .with_context("TooltipOverlay", operation);
    JsValue::from_str(&response.to_json())
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Export version info
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
