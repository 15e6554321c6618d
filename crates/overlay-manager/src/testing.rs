//! In-memory host for driving the manager without a browser
//!
//! [`FakeDom`] is a tiny element tree with attributes and fixed geometry.
//! [`ManualClock`] is a [`Scheduler`] whose time only moves when told to.

use crate::host::{Dom, Overlay, Scheduler, TimerId, TimerKind};
use crate::manager::TooltipManager;
use page_tooltips_shared::{Point, Rect, Size, TooltipPosition, TooltipResult};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

/// Handle to an element in a [`FakeDom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug)]
struct FakeElement {
    parent: Option<NodeId>,
    attributes: HashMap<String, String>,
    rect: Rect,
    connected: bool,
}

#[derive(Debug)]
struct DomState {
    elements: Vec<FakeElement>,
    viewport: Size,
    overlay_size: Size,
    overlays: Vec<Rc<RefCell<OverlaySnapshot>>>,
}

/// Everything the overlay has been told, plus a count of hide transitions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlaySnapshot {
    pub class_name: String,
    pub text: String,
    pub side: TooltipPosition,
    pub visible: bool,
    pub top_left: Point,
    pub size: Size,
    pub times_shown: usize,
    pub times_hidden: usize,
}

impl OverlaySnapshot {
    pub fn rect(&self) -> Rect {
        Rect::new(self.top_left.x, self.top_left.y, self.size.width, self.size.height)
    }
}

/// Shared-state element tree; clones see the same document
#[derive(Debug, Clone)]
pub struct FakeDom {
    state: Rc<RefCell<DomState>>,
}

impl FakeDom {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(DomState {
                elements: Vec::new(),
                viewport: Size::new(viewport_width, viewport_height),
                overlay_size: Size::new(100.0, 30.0),
                overlays: Vec::new(),
            })),
        }
    }

    pub fn add_element(&self, parent: Option<NodeId>, rect: Rect) -> NodeId {
        let mut state = self.state.borrow_mut();
        state.elements.push(FakeElement {
            parent,
            attributes: HashMap::new(),
            rect,
            connected: true,
        });
        NodeId(state.elements.len() - 1)
    }

    pub fn set_rect(&self, node: NodeId, rect: Rect) {
        self.state.borrow_mut().elements[node.0].rect = rect;
    }

    /// Remove `node` from the document
    pub fn detach(&self, node: NodeId) {
        self.state.borrow_mut().elements[node.0].connected = false;
    }

    /// Size every overlay reports from now on
    pub fn set_overlay_size(&self, size: Size) {
        let mut state = self.state.borrow_mut();
        state.overlay_size = size;
        for overlay in &state.overlays {
            overlay.borrow_mut().size = size;
        }
    }

    pub fn overlay_count(&self) -> usize {
        self.state.borrow().overlays.len()
    }

    /// Snapshot of the most recently created overlay
    pub fn overlay(&self) -> OverlaySnapshot {
        self.state
            .borrow()
            .overlays
            .last()
            .map(|overlay| overlay.borrow().clone())
            .unwrap_or_default()
    }
}

impl Dom for FakeDom {
    type Node = NodeId;
    type Overlay = FakeOverlay;

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.state.borrow().elements[node.0].attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.state.borrow_mut().elements[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        self.state.borrow_mut().elements[node.0].attributes.remove(name);
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.state.borrow().elements[node.0].parent
    }

    fn bounding_rect(&self, node: &NodeId) -> Rect {
        self.state.borrow().elements[node.0].rect
    }

    fn is_connected(&self, node: &NodeId) -> bool {
        let state = self.state.borrow();
        let mut current = Some(*node);
        while let Some(id) = current {
            let element = &state.elements[id.0];
            if !element.connected {
                return false;
            }
            current = element.parent;
        }
        true
    }

    fn viewport(&self) -> Size {
        self.state.borrow().viewport
    }

    fn create_overlay(&self, class_name: &str) -> TooltipResult<FakeOverlay> {
        let mut state = self.state.borrow_mut();
        let snapshot = Rc::new(RefCell::new(OverlaySnapshot {
            class_name: class_name.to_string(),
            size: state.overlay_size,
            ..OverlaySnapshot::default()
        }));
        state.overlays.push(snapshot.clone());
        Ok(FakeOverlay { state: snapshot })
    }
}

/// Overlay half of the in-memory host
#[derive(Debug)]
pub struct FakeOverlay {
    state: Rc<RefCell<OverlaySnapshot>>,
}

impl Overlay for FakeOverlay {
    fn set_text(&self, text: &str) {
        self.state.borrow_mut().text = text.to_string();
    }

    fn set_side(&self, side: TooltipPosition) {
        self.state.borrow_mut().side = side;
    }

    fn set_visible(&self, visible: bool) {
        let mut state = self.state.borrow_mut();
        if state.visible != visible {
            if visible {
                state.times_shown += 1;
            } else {
                state.times_hidden += 1;
            }
        }
        state.visible = visible;
    }

    fn size(&self) -> Size {
        self.state.borrow().size
    }

    fn move_to(&self, top_left: Point) {
        self.state.borrow_mut().top_left = top_left;
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    due: u64,
    kind: TimerKind,
}

#[derive(Debug, Default)]
struct ClockState {
    now: u64,
    next_id: u64,
    pending: BTreeMap<TimerId, PendingTimer>,
}

/// Virtual-time scheduler; clones share the same clock
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    state: Rc<RefCell<ClockState>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Milliseconds elapsed since the clock was created
    pub fn now(&self) -> u64 {
        self.state.borrow().now
    }

    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Move time forward by `ms`, firing due timers into `manager` in order
    pub fn advance<D: Dom>(&self, manager: &mut TooltipManager<D, ManualClock>, ms: u64) {
        let target = self.now() + ms;

        loop {
            let next = {
                let state = self.state.borrow();
                state
                    .pending
                    .iter()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(id, timer)| (timer.due, **id))
                    .map(|(id, timer)| (*id, *timer))
            };

            let Some((id, timer)) = next else {
                break;
            };

            {
                let mut state = self.state.borrow_mut();
                state.pending.remove(&id);
                state.now = timer.due;
            }
            manager.on_timer(timer.kind, id);
        }

        self.state.borrow_mut().now = target;
    }
}

impl Scheduler for ManualClock {
    fn schedule(&self, kind: TimerKind, delay_ms: u32) -> TimerId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = TimerId(state.next_id);
        let due = state.now + u64::from(delay_ms);
        state.pending.insert(id, PendingTimer { due, kind });
        id
    }

    fn cancel(&self, id: TimerId) {
        self.state.borrow_mut().pending.remove(&id);
    }
}
