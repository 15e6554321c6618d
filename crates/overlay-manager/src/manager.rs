//! The tooltip overlay state machine
//!
//! One manager owns one overlay. Page events and timer callbacks run to
//! completion one at a time, so every transition below is atomic with
//! respect to the others.

use crate::annotation::{self, closest_annotated, is_within, read_annotation};
use crate::config::TooltipConfig;
use crate::host::{Dom, Overlay, Scheduler, TimerId, TimerKind};
use crate::placement;
use crate::timers::TimerSlot;
use page_tooltips_shared::events::{Key, PageEvent, PageEventKind, ShowOrigin};
use page_tooltips_shared::{Point, TooltipPosition, TooltipResult};

/// Lifecycle of the shared overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No target, overlay hidden
    Idle,
    /// Target chosen, show timer running, overlay hidden
    PendingShow,
    /// Overlay shown for the current target
    Visible,
    /// Hide timer running, overlay still shown
    PendingHide,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Anchor {
    Pointer(Point),
    Element,
}

pub struct TooltipManager<D: Dom, S: Scheduler> {
    dom: D,
    overlay: D::Overlay,
    scheduler: S,
    config: TooltipConfig,
    phase: Phase,
    current_target: Option<D::Node>,
    anchor: Anchor,
    side: TooltipPosition,
    pending_show: TimerSlot,
    pending_hide: TimerSlot,
}

impl<D: Dom, S: Scheduler> TooltipManager<D, S> {
    /// Validate `config` and mount the overlay element
    pub fn new(dom: D, scheduler: S, config: TooltipConfig) -> TooltipResult<Self> {
        config.validate()?;
        let overlay = dom.create_overlay(&config.overlay_class)?;
        overlay.set_visible(false);
        log::debug!("Tooltip overlay mounted with class {}", config.overlay_class);

        Ok(Self {
            dom,
            overlay,
            scheduler,
            config,
            phase: Phase::Idle,
            current_target: None,
            anchor: Anchor::Element,
            side: TooltipPosition::default(),
            pending_show: TimerSlot::new(TimerKind::Show),
            pending_hide: TimerSlot::new(TimerKind::Hide),
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_target(&self) -> Option<&D::Node> {
        self.current_target.as_ref()
    }

    /// True while the overlay is shown, including the hide settle window
    pub fn is_visible(&self) -> bool {
        matches!(self.phase, Phase::Visible | Phase::PendingHide)
    }

    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn overlay(&self) -> &D::Overlay {
        &self.overlay
    }

    /// Feed one page event through delegation and the state machine
    pub fn handle_event(&mut self, event: PageEvent<D::Node>) {
        match event.kind {
            PageEventKind::PointerEnter => {
                let Some(target) = closest_annotated(&self.dom, &event.target) else {
                    return;
                };
                if self.came_from_inside(&target, event.related.as_ref()) {
                    return;
                }
                self.request_show(target, ShowOrigin::Pointer, event.client);
            }
            PageEventKind::PointerLeave => {
                let Some(target) = closest_annotated(&self.dom, &event.target) else {
                    return;
                };
                if self.came_from_inside(&target, event.related.as_ref()) {
                    return;
                }
                if self.is_current(&target) {
                    self.request_hide();
                }
            }
            PageEventKind::PointerMove => {
                let Some(point) = event.client else {
                    return;
                };
                if self.phase == Phase::Idle {
                    return;
                }
                let over_current = closest_annotated(&self.dom, &event.target)
                    .is_some_and(|target| self.is_current(&target));
                if !over_current {
                    return;
                }
                // A pending show picks up the latest pointer when it fires
                self.anchor = Anchor::Pointer(point);
                if self.is_visible() {
                    self.reposition();
                }
            }
            PageEventKind::FocusIn => {
                if let Some(target) = closest_annotated(&self.dom, &event.target) {
                    self.request_show(target, ShowOrigin::Keyboard, None);
                }
            }
            PageEventKind::TouchStart => {
                if let Some(target) = closest_annotated(&self.dom, &event.target) {
                    self.request_show(target, ShowOrigin::Touch, None);
                }
            }
            PageEventKind::FocusOut | PageEventKind::TouchEnd => {
                let leaving_current = closest_annotated(&self.dom, &event.target)
                    .is_some_and(|target| self.is_current(&target));
                if leaving_current {
                    self.request_hide();
                }
            }
            PageEventKind::KeyDown(Key::Escape) => {
                if self.config.dismiss_on_escape && self.phase != Phase::Idle {
                    self.dismiss();
                }
            }
            PageEventKind::KeyDown(Key::Other) => {}
        }
    }

    /// Ask for the overlay to show for `target`.
    ///
    /// Silently ignored when `target` has no text annotation. Keyboard and
    /// touch show at once; pointer requests wait for the annotation's delay
    /// unless the overlay is already showing for the same target.
    pub fn request_show(&mut self, target: D::Node, origin: ShowOrigin, pointer: Option<Point>) {
        let Some(annotation) = read_annotation(&self.dom, &target, self.config.default_delay_ms)
        else {
            return;
        };

        self.pending_hide.cancel(&self.scheduler);

        let same_target = self.is_current(&target);
        let showing = self.is_visible();

        self.anchor = match (origin, pointer) {
            (ShowOrigin::Pointer, Some(point)) => Anchor::Pointer(point),
            _ => Anchor::Element,
        };
        self.current_target = Some(target);

        if origin.is_immediate() || (showing && same_target) {
            self.pending_show.cancel(&self.scheduler);
            self.reveal(&annotation.text, annotation.position);
            return;
        }

        if showing {
            self.overlay.set_visible(false);
        }
        self.phase = Phase::PendingShow;
        self.pending_show.schedule(&self.scheduler, annotation.delay_ms);
        log::debug!("Tooltip show scheduled in {}ms", annotation.delay_ms);
    }

    /// Ask for the overlay to hide after the settle delay
    pub fn request_hide(&mut self) {
        self.pending_show.cancel(&self.scheduler);

        match self.phase {
            Phase::Idle => {}
            Phase::PendingShow => {
                self.current_target = None;
                self.phase = Phase::Idle;
                log::debug!("Pending tooltip show cancelled");
            }
            Phase::Visible | Phase::PendingHide => {
                self.pending_hide
                    .schedule(&self.scheduler, self.config.hide_delay_ms);
                self.phase = Phase::PendingHide;
            }
        }
    }

    /// Deliver a fired timer. Stale or superseded ids are ignored.
    pub fn on_timer(&mut self, kind: TimerKind, id: TimerId) {
        match kind {
            TimerKind::Show => {
                if !self.pending_show.claim(id) || self.phase != Phase::PendingShow {
                    return;
                }
                self.fire_show();
            }
            TimerKind::Hide => {
                if !self.pending_hide.claim(id) || self.phase != Phase::PendingHide {
                    return;
                }
                self.conceal();
            }
        }
    }

    /// Annotate `node` so it shows `text` on hover, focus or touch
    pub fn annotate(&self, node: &D::Node, text: &str, position: TooltipPosition, delay_ms: u32) {
        annotation::annotate(&self.dom, node, text, position, delay_ms);
    }

    /// Remove the annotation from `node`, hiding its tooltip if it is the current target
    pub fn unannotate(&mut self, node: &D::Node) {
        annotation::unannotate(&self.dom, node);
        if self.is_current(node) {
            self.request_hide();
        }
    }

    /// Show `text` for `node` immediately, bypassing hover delays
    pub fn show_for(&mut self, node: D::Node, text: &str, position: TooltipPosition) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        self.pending_show.cancel(&self.scheduler);
        self.pending_hide.cancel(&self.scheduler);
        self.anchor = Anchor::Element;
        self.current_target = Some(node);
        self.reveal(text, position);
    }

    /// Hide through the same debounced path as pointer leave
    pub fn hide_for(&mut self) {
        self.request_hide();
    }

    /// Hide at once and forget the target
    pub fn dismiss(&mut self) {
        self.pending_show.cancel(&self.scheduler);
        self.pending_hide.cancel(&self.scheduler);
        self.conceal();
    }

    fn fire_show(&mut self) {
        let Some(target) = self.current_target.clone() else {
            self.phase = Phase::Idle;
            return;
        };

        if !self.dom.is_connected(&target) {
            log::debug!("Tooltip target left the document before showing");
            self.current_target = None;
            self.phase = Phase::Idle;
            return;
        }

        match read_annotation(&self.dom, &target, self.config.default_delay_ms) {
            Some(annotation) => self.reveal(&annotation.text, annotation.position),
            None => {
                self.current_target = None;
                self.phase = Phase::Idle;
            }
        }
    }

    fn reveal(&mut self, text: &str, side: TooltipPosition) {
        self.side = side;
        self.overlay.set_text(text);
        self.overlay.set_side(side);
        self.reposition();
        self.overlay.set_visible(true);
        self.phase = Phase::Visible;
        log::debug!("Tooltip visible: {text:?} ({side})");
    }

    fn conceal(&mut self) {
        self.overlay.set_visible(false);
        self.current_target = None;
        self.phase = Phase::Idle;
        log::debug!("Tooltip hidden");
    }

    fn reposition(&self) {
        let Some(target) = self.current_target.as_ref() else {
            return;
        };

        let anchor = match self.anchor {
            Anchor::Pointer(point) => point,
            Anchor::Element => {
                placement::element_anchor(&self.dom.bounding_rect(target), self.side)
            }
        };

        let top_left = placement::place(
            anchor,
            self.side,
            self.overlay.size(),
            self.dom.viewport(),
            self.config.gap_px,
        );
        log::trace!("Tooltip moved to ({}, {})", top_left.x, top_left.y);
        self.overlay.move_to(top_left);
    }

    fn is_current(&self, node: &D::Node) -> bool {
        self.current_target.as_ref() == Some(node)
    }

    fn came_from_inside(&self, target: &D::Node, related: Option<&D::Node>) -> bool {
        related.is_some_and(|node| is_within(&self.dom, target, node))
    }
}
