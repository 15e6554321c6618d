//! `web-sys` implementation of the manager's DOM seam

use page_tooltips_core::{Dom, Overlay, Point, Rect, Size, TooltipError, TooltipPosition, TooltipResult};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

/// The live page document
#[derive(Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    pub fn from_window() -> TooltipResult<Self> {
        let window = web_sys::window().ok_or_else(|| TooltipError::HostUnavailable {
            resource: "window".to_string(),
        })?;
        let document = window.document().ok_or_else(|| TooltipError::HostUnavailable {
            resource: "document".to_string(),
        })?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Dom for WebDom {
    type Node = Element;
    type Overlay = WebOverlay;

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(err) = node.set_attribute(name, value) {
            log::warn!("Failed to set {name} on tooltip target: {err:?}");
        }
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        if let Err(err) = node.remove_attribute(name) {
            log::warn!("Failed to remove {name} from tooltip target: {err:?}");
        }
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn bounding_rect(&self, node: &Element) -> Rect {
        let rect = node.get_bounding_client_rect();
        Rect::new(rect.x(), rect.y(), rect.width(), rect.height())
    }

    fn is_connected(&self, node: &Element) -> bool {
        node.is_connected()
    }

    fn viewport(&self) -> Size {
        let width = self.window.inner_width().ok().and_then(|v| v.as_f64());
        let height = self.window.inner_height().ok().and_then(|v| v.as_f64());

        match (width, height) {
            (Some(width), Some(height)) => Size::new(width, height),
            _ => {
                let root = self.document.document_element();
                let width = root.as_ref().map_or(0, |el| el.client_width());
                let height = root.as_ref().map_or(0, |el| el.client_height());
                Size::new(f64::from(width), f64::from(height))
            }
        }
    }

    fn create_overlay(&self, class_name: &str) -> TooltipResult<WebOverlay> {
        let body = self.document.body().ok_or_else(|| TooltipError::HostUnavailable {
            resource: "document.body".to_string(),
        })?;

        let element = self
            .document
            .create_element("div")
            .map_err(js_error)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| TooltipError::JsInterop {
                message: "overlay element is not an HtmlElement".to_string(),
            })?;

        element.set_class_name(class_name);
        element.set_attribute("role", "tooltip").map_err(js_error)?;
        element.set_attribute("aria-hidden", "true").map_err(js_error)?;

        let style = element.style();
        for (property, value) in [
            ("position", "fixed"),
            ("left", "0px"),
            ("top", "0px"),
            ("pointer-events", "none"),
            ("visibility", "hidden"),
            ("z-index", "10000"),
        ] {
            style.set_property(property, value).map_err(js_error)?;
        }

        body.append_child(&element).map_err(js_error)?;
        Ok(WebOverlay { element })
    }
}

/// The overlay `<div>` appended to `document.body`
pub struct WebOverlay {
    element: HtmlElement,
}

impl WebOverlay {
    pub fn text(&self) -> Option<String> {
        self.element.text_content()
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Err(err) = self.element.style().set_property(property, value) {
            log::warn!("Failed to set overlay {property}: {err:?}");
        }
    }
}

impl Overlay for WebOverlay {
    fn set_text(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn set_side(&self, side: TooltipPosition) {
        if let Err(err) = self.element.set_attribute("data-side", side.as_str()) {
            log::warn!("Failed to set overlay side: {err:?}");
        }
    }

    fn set_visible(&self, visible: bool) {
        self.set_style("visibility", if visible { "visible" } else { "hidden" });
        let aria_hidden = if visible { "false" } else { "true" };
        if let Err(err) = self.element.set_attribute("aria-hidden", aria_hidden) {
            log::warn!("Failed to set overlay aria-hidden: {err:?}");
        }
        if let Err(err) = self.element.class_list().toggle_with_force("visible", visible) {
            log::warn!("Failed to toggle overlay class: {err:?}");
        }
    }

    fn size(&self) -> Size {
        Size::new(
            f64::from(self.element.offset_width()),
            f64::from(self.element.offset_height()),
        )
    }

    fn move_to(&self, top_left: Point) {
        self.set_style("left", &format!("{}px", top_left.x));
        self.set_style("top", &format!("{}px", top_left.y));
    }
}

fn js_error(err: wasm_bindgen::JsValue) -> TooltipError {
    TooltipError::JsInterop {
        message: format!("{err:?}"),
    }
}
