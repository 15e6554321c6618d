//! Page event types fed to the overlay manager, independent of web-sys

use crate::Point;

/// How the user interacted with an element
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageEventKind {
    PointerEnter,
    PointerLeave,
    PointerMove,
    FocusIn,
    FocusOut,
    TouchStart,
    TouchEnd,
    KeyDown(Key),
}

/// Keys the manager reacts to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

impl Key {
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// What started a show request; decides delay and anchoring
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShowOrigin {
    Pointer,
    Keyboard,
    Touch,
}

impl ShowOrigin {
    /// Keyboard and touch are discrete interactions and show without delay
    pub fn is_immediate(&self) -> bool {
        matches!(self, ShowOrigin::Keyboard | ShowOrigin::Touch)
    }
}

/// A DOM event translated into host-neutral form.
///
/// `N` is the host's node handle. `related` is the node the pointer came
/// from (enter) or went to (leave), when the host knows it.
#[derive(Clone, Debug, PartialEq)]
pub struct PageEvent<N> {
    pub kind: PageEventKind,
    pub target: N,
    pub client: Option<Point>,
    pub related: Option<N>,
}

impl<N> PageEvent<N> {
    pub fn new(kind: PageEventKind, target: N) -> Self {
        Self {
            kind,
            target,
            client: None,
            related: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.client = Some(Point::new(x, y));
        self
    }

    pub fn with_related(mut self, related: Option<N>) -> Self {
        self.related = related;
        self
    }
}
