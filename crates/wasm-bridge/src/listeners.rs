//! Document-level event listeners feeding the tooltip manager
//!
//! Every listener sits on the document in the capture phase, so annotated
//! elements need no listeners of their own and may appear at any time.

use crate::WebManager;
use page_tooltips_core::{Key, PageEvent, PageEventKind};
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, FocusEvent, KeyboardEvent,
    MouseEvent, TouchEvent,
};

type Translate<E> = fn(&E) -> Option<PageEvent<Element>>;

struct Listener {
    name: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Registered listeners; removed from the document on drop
pub struct DocumentListeners {
    document: Document,
    listeners: Vec<Listener>,
}

impl DocumentListeners {
    pub fn attach(document: &Document, manager: Weak<RefCell<WebManager>>) -> Result<Self, JsValue> {
        let mut attached = Self {
            document: document.clone(),
            listeners: Vec::new(),
        };

        attached.listen::<MouseEvent>("mouseenter", false, &manager, pointer_enter)?;
        attached.listen::<MouseEvent>("mouseleave", false, &manager, pointer_leave)?;
        attached.listen::<MouseEvent>("mousemove", true, &manager, pointer_move)?;
        attached.listen::<FocusEvent>("focusin", false, &manager, focus_in)?;
        attached.listen::<FocusEvent>("focusout", false, &manager, focus_out)?;
        attached.listen::<TouchEvent>("touchstart", true, &manager, touch_start)?;
        attached.listen::<TouchEvent>("touchend", true, &manager, touch_end)?;
        attached.listen::<KeyboardEvent>("keydown", false, &manager, key_down)?;

        log::debug!("Attached {} tooltip listeners", attached.listeners.len());
        Ok(attached)
    }

    fn listen<E: JsCast + 'static>(
        &mut self,
        name: &'static str,
        passive: bool,
        manager: &Weak<RefCell<WebManager>>,
        translate: Translate<E>,
    ) -> Result<(), JsValue> {
        let manager = manager.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(page_event) = event.dyn_ref::<E>().and_then(translate) else {
                return;
            };
            let Some(manager) = manager.upgrade() else {
                return;
            };
            match manager.try_borrow_mut() {
                Ok(mut manager) => manager.handle_event(page_event),
                Err(_) => log::warn!("Tooltip manager busy, dropped {name} event"),
            };
        });

        let options = AddEventListenerOptions::new();
        options.set_capture(true);
        options.set_passive(passive);
        self.document
            .add_event_listener_with_callback_and_add_event_listener_options(
                name,
                closure.as_ref().unchecked_ref(),
                &options,
            )?;

        self.listeners.push(Listener { name, closure });
        Ok(())
    }
}

impl Drop for DocumentListeners {
    fn drop(&mut self) {
        for listener in &self.listeners {
            let _ = self.document.remove_event_listener_with_callback_and_bool(
                listener.name,
                listener.closure.as_ref().unchecked_ref(),
                true,
            );
        }
    }
}

fn element_of(target: Option<EventTarget>) -> Option<Element> {
    target?.dyn_into::<Element>().ok()
}

fn mouse_event(kind: PageEventKind, event: &MouseEvent) -> Option<PageEvent<Element>> {
    let target = element_of(event.target())?;
    Some(
        PageEvent::new(kind, target)
            .at(f64::from(event.client_x()), f64::from(event.client_y()))
            .with_related(element_of(event.related_target())),
    )
}

fn pointer_enter(event: &MouseEvent) -> Option<PageEvent<Element>> {
    mouse_event(PageEventKind::PointerEnter, event)
}

fn pointer_leave(event: &MouseEvent) -> Option<PageEvent<Element>> {
    mouse_event(PageEventKind::PointerLeave, event)
}

fn pointer_move(event: &MouseEvent) -> Option<PageEvent<Element>> {
    mouse_event(PageEventKind::PointerMove, event)
}

fn focus_in(event: &FocusEvent) -> Option<PageEvent<Element>> {
    Some(PageEvent::new(PageEventKind::FocusIn, element_of(event.target())?))
}

fn focus_out(event: &FocusEvent) -> Option<PageEvent<Element>> {
    Some(PageEvent::new(PageEventKind::FocusOut, element_of(event.target())?))
}

fn touch_event(kind: PageEventKind, event: &TouchEvent) -> Option<PageEvent<Element>> {
    let target = element_of(event.target())?;
    let page_event = PageEvent::new(kind, target);
    Some(match event.changed_touches().get(0) {
        Some(touch) => page_event.at(f64::from(touch.client_x()), f64::from(touch.client_y())),
        None => page_event,
    })
}

fn touch_start(event: &TouchEvent) -> Option<PageEvent<Element>> {
    touch_event(PageEventKind::TouchStart, event)
}

fn touch_end(event: &TouchEvent) -> Option<PageEvent<Element>> {
    touch_event(PageEventKind::TouchEnd, event)
}

fn key_down(event: &KeyboardEvent) -> Option<PageEvent<Element>> {
    let target = element_of(event.target())?;
    Some(PageEvent::new(
        PageEventKind::KeyDown(Key::from_key_name(&event.key())),
        target,
    ))
}
