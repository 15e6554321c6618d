//! Host seams between the overlay manager and the page environment
//!
//! The browser bridge implements these with `web-sys`; tests use the
//! in-memory host from [`crate::testing`].

use page_tooltips_shared::{Point, Rect, Size, TooltipPosition, TooltipResult};
use std::fmt;

/// Read and write access to page elements
pub trait Dom {
    /// Handle to a page element. Equality means "same element".
    type Node: Clone + PartialEq + fmt::Debug;
    type Overlay: Overlay;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&self, node: &Self::Node, name: &str);
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;
    fn bounding_rect(&self, node: &Self::Node) -> Rect;
    /// False once the element has been removed from the document
    fn is_connected(&self, node: &Self::Node) -> bool;
    fn viewport(&self) -> Size;

    /// Create and mount the overlay element, hidden and non-interactive
    fn create_overlay(&self, class_name: &str) -> TooltipResult<Self::Overlay>;
}

/// The single floating label element
pub trait Overlay {
    fn set_text(&self, text: &str);
    fn set_side(&self, side: TooltipPosition);
    /// Toggle visibility together with the accessibility-hidden flag
    fn set_visible(&self, visible: bool);
    /// Rendered size; valid after `set_text`
    fn size(&self) -> Size;
    fn move_to(&self, top_left: Point);
}

/// The two kinds of deferred work the manager schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Show,
    Hide,
}

/// Identifier handed out by a [`Scheduler`] for one scheduled callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// One-shot timers. When a timer fires the host must call
/// [`crate::TooltipManager::on_timer`] with the kind and id it returned.
pub trait Scheduler {
    fn schedule(&self, kind: TimerKind, delay_ms: u32) -> TimerId;
    fn cancel(&self, id: TimerId);
}
