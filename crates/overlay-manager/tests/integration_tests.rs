//! Integration tests for the tooltip overlay state machine

use page_tooltips_core::testing::{FakeDom, ManualClock, NodeId};
use page_tooltips_core::{
    Dom, Key, PageEvent, PageEventKind, Phase, Point, Rect, Size, TooltipConfig, TooltipManager,
    TooltipPosition,
};
use page_tooltips_shared::attributes;

type Manager = TooltipManager<FakeDom, ManualClock>;

/// Helper to build a manager over an 800x600 viewport
fn setup() -> (FakeDom, ManualClock, Manager) {
    let _ = env_logger::builder().is_test(true).try_init();

    let dom = FakeDom::new(800.0, 600.0);
    let clock = ManualClock::new();
    let manager = TooltipManager::new(dom.clone(), clock.clone(), TooltipConfig::default())
        .expect("default config is valid");
    (dom, clock, manager)
}

fn annotated(dom: &FakeDom, manager: &Manager, text: &str, rect: Rect) -> NodeId {
    let node = dom.add_element(None, rect);
    manager.annotate(&node, text, TooltipPosition::Top, 500);
    node
}

fn enter(node: NodeId) -> PageEvent<NodeId> {
    PageEvent::new(PageEventKind::PointerEnter, node)
}

fn leave(node: NodeId) -> PageEvent<NodeId> {
    PageEvent::new(PageEventKind::PointerLeave, node)
}

#[test]
fn test_hover_shows_after_delay_with_fresh_text() {
    let (dom, clock, mut manager) = setup();
    let node = annotated(&dom, &manager, "Old label", Rect::new(100.0, 100.0, 80.0, 40.0));

    manager.handle_event(enter(node).at(120.0, 110.0));
    assert_eq!(manager.phase(), Phase::PendingShow);

    clock.advance(&mut manager, 300);
    dom.set_attribute(&node, attributes::TEXT, "New label");
    assert!(!dom.overlay().visible);

    clock.advance(&mut manager, 200);
    let overlay = dom.overlay();
    assert!(overlay.visible);
    assert_eq!(overlay.text, "New label");
    assert_eq!(manager.phase(), Phase::Visible);
    assert_eq!(manager.current_target(), Some(&node));
}

#[test]
fn test_unannotated_element_never_shows() {
    let (dom, clock, mut manager) = setup();
    let plain = dom.add_element(None, Rect::new(0.0, 0.0, 50.0, 50.0));

    manager.handle_event(enter(plain).at(10.0, 10.0));
    manager.handle_event(PageEvent::new(PageEventKind::FocusIn, plain));
    manager.handle_event(PageEvent::new(PageEventKind::TouchStart, plain));
    clock.advance(&mut manager, 5_000);

    assert!(!dom.overlay().visible);
    assert_eq!(manager.phase(), Phase::Idle);
    assert!(manager.current_target().is_none());
}

#[test]
fn test_rapid_hover_never_shows_first_target() {
    let (dom, clock, mut manager) = setup();
    let a = annotated(&dom, &manager, "Alpha", Rect::new(0.0, 0.0, 50.0, 50.0));
    let b = annotated(&dom, &manager, "Beta", Rect::new(60.0, 0.0, 50.0, 50.0));

    manager.handle_event(enter(a).at(10.0, 10.0));
    clock.advance(&mut manager, 200);
    manager.handle_event(leave(a).with_related(Some(b)));
    manager.handle_event(enter(b).at(70.0, 10.0).with_related(Some(a)));

    clock.advance(&mut manager, 400);
    assert_eq!(dom.overlay().times_shown, 0, "Alpha must never appear");

    clock.advance(&mut manager, 100);
    let overlay = dom.overlay();
    assert!(overlay.visible);
    assert_eq!(overlay.text, "Beta");
    assert_eq!(overlay.times_shown, 1);
}

#[test]
fn test_reenter_within_settle_window_does_not_flicker() {
    let (dom, clock, mut manager) = setup();
    let node = annotated(&dom, &manager, "Stable", Rect::new(100.0, 100.0, 80.0, 40.0));

    manager.handle_event(enter(node).at(120.0, 110.0));
    clock.advance(&mut manager, 500);
    assert!(dom.overlay().visible);

    manager.handle_event(leave(node));
    assert_eq!(manager.phase(), Phase::PendingHide);
    clock.advance(&mut manager, 60);
    manager.handle_event(enter(node).at(121.0, 111.0));
    assert_eq!(manager.phase(), Phase::Visible);

    clock.advance(&mut manager, 1_000);
    let overlay = dom.overlay();
    assert!(overlay.visible);
    assert_eq!(overlay.times_hidden, 0);
    assert_eq!(overlay.times_shown, 1);
}

#[test]
fn test_keyboard_focus_is_immediate_and_blur_settles() {
    let (dom, clock, mut manager) = setup();
    let node = annotated(&dom, &manager, "Keyboard hint", Rect::new(100.0, 100.0, 80.0, 40.0));

    manager.handle_event(PageEvent::new(PageEventKind::FocusIn, node));
    let overlay = dom.overlay();
    assert!(overlay.visible);
    assert_eq!(overlay.text, "Keyboard hint");
    // Anchored on the element: centered above it
    assert_eq!(overlay.top_left, Point::new(90.0, 62.0));

    manager.handle_event(PageEvent::new(PageEventKind::FocusOut, node));
    clock.advance(&mut manager, 99);
    assert!(dom.overlay().visible);
    clock.advance(&mut manager, 1);
    assert!(!dom.overlay().visible);
    assert_eq!(manager.phase(), Phase::Idle);
}

#[test]
fn test_touch_is_immediate_and_touch_end_settles() {
    let (dom, clock, mut manager) = setup();
    let node = annotated(&dom, &manager, "Tap hint", Rect::new(300.0, 300.0, 40.0, 40.0));

    manager.handle_event(PageEvent::new(PageEventKind::TouchStart, node).at(310.0, 310.0));
    assert!(dom.overlay().visible);

    manager.handle_event(PageEvent::new(PageEventKind::TouchEnd, node));
    assert!(dom.overlay().visible);
    clock.advance(&mut manager, 100);
    assert!(!dom.overlay().visible);
}

#[test]
fn test_overlay_stays_inside_viewport_near_edges() {
    let (dom, clock, mut manager) = setup();
    dom.set_overlay_size(Size::new(180.0, 40.0));
    let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);

    let sides = [
        TooltipPosition::Top,
        TooltipPosition::Bottom,
        TooltipPosition::Left,
        TooltipPosition::Right,
    ];
    let pointers = [
        (0.0, 0.0),
        (799.0, 0.0),
        (0.0, 599.0),
        (799.0, 599.0),
        (400.0, 2.0),
        (3.0, 300.0),
    ];

    for side in sides {
        let node = dom.add_element(None, viewport);
        manager.annotate(&node, "Edge case", side, 0);

        for (x, y) in pointers {
            manager.handle_event(enter(node).at(x, y));
            clock.advance(&mut manager, 0);
            manager.handle_event(PageEvent::new(PageEventKind::PointerMove, node).at(x, y));

            let overlay = dom.overlay();
            assert!(overlay.visible);
            assert!(
                viewport.contains_rect(&overlay.rect()),
                "{side} at ({x}, {y}) escaped: {:?}",
                overlay.rect()
            );
        }

        manager.dismiss();
    }
}

#[test]
fn test_engine_status_scenario() {
    let (dom, clock, mut manager) = setup();
    let engine = dom.add_element(None, Rect::new(100.0, 100.0, 80.0, 40.0));
    dom.set_attribute(&engine, attributes::TEXT, "Engine status");
    dom.set_attribute(&engine, attributes::POSITION, "right");
    dom.set_attribute(&engine, attributes::DELAY, "500");

    manager.handle_event(enter(engine));

    clock.advance(&mut manager, 499);
    assert!(!dom.overlay().visible);

    clock.advance(&mut manager, 1);
    let overlay = dom.overlay();
    assert!(overlay.visible);
    assert_eq!(overlay.text, "Engine status");
    assert_eq!(overlay.side, TooltipPosition::Right);
    // Right edge (180) + 8px gap, vertically centered on the element
    assert_eq!(overlay.top_left, Point::new(188.0, 105.0));
}

#[test]
fn test_show_for_then_hide_for() {
    let (dom, clock, mut manager) = setup();
    let node = dom.add_element(None, Rect::new(200.0, 200.0, 60.0, 20.0));

    manager.show_for(node, "Quick hint", TooltipPosition::Top);
    manager.hide_for();

    let overlay = dom.overlay();
    assert!(overlay.visible);
    assert_eq!(overlay.text, "Quick hint");

    clock.advance(&mut manager, 100);
    assert!(!dom.overlay().visible);
    assert_eq!(manager.phase(), Phase::Idle);
}

#[test]
fn test_pointer_move_follows_while_visible() {
    let (dom, clock, mut manager) = setup();
    let node = annotated(&dom, &manager, "Follow me", Rect::new(100.0, 100.0, 300.0, 200.0));

    manager.handle_event(enter(node).at(200.0, 200.0));
    clock.advance(&mut manager, 500);
    assert_eq!(dom.overlay().top_left, Point::new(150.0, 162.0));

    manager.handle_event(PageEvent::new(PageEventKind::PointerMove, node).at(250.0, 220.0));
    assert_eq!(dom.overlay().top_left, Point::new(200.0, 182.0));
    assert_eq!(clock.pending_count(), 0);
}

#[test]
fn test_pending_show_uses_latest_pointer() {
    let (dom, clock, mut manager) = setup();
    let node = annotated(&dom, &manager, "Latest", Rect::new(100.0, 100.0, 300.0, 200.0));

    manager.handle_event(enter(node).at(110.0, 110.0));
    clock.advance(&mut manager, 250);
    manager.handle_event(PageEvent::new(PageEventKind::PointerMove, node).at(300.0, 250.0));
    assert!(!dom.overlay().visible);

    clock.advance(&mut manager, 250);
    assert_eq!(dom.overlay().top_left, Point::new(250.0, 212.0));
}

#[test]
fn test_moving_between_descendants_keeps_state() {
    let (dom, clock, mut manager) = setup();
    let card = annotated(&dom, &manager, "Card", Rect::new(0.0, 0.0, 300.0, 300.0));
    let icon = dom.add_element(Some(card), Rect::new(10.0, 10.0, 20.0, 20.0));

    manager.handle_event(enter(card).at(5.0, 5.0));
    clock.advance(&mut manager, 400);

    // Pointer slides onto the child: leave from the card's perspective is internal
    manager.handle_event(leave(card).with_related(Some(icon)));
    manager.handle_event(enter(icon).at(15.0, 15.0).with_related(Some(card)));
    assert_eq!(manager.phase(), Phase::PendingShow);

    clock.advance(&mut manager, 100);
    assert!(dom.overlay().visible);
    assert_eq!(dom.overlay().text, "Card");
}

#[test]
fn test_escape_dismisses_immediately() {
    let (dom, clock, mut manager) = setup();
    let node = annotated(&dom, &manager, "Dismiss me", Rect::new(10.0, 300.0, 40.0, 40.0));

    manager.handle_event(PageEvent::new(PageEventKind::FocusIn, node));
    assert!(dom.overlay().visible);

    manager.handle_event(PageEvent::new(PageEventKind::KeyDown(Key::Other), node));
    assert!(dom.overlay().visible);

    manager.handle_event(PageEvent::new(PageEventKind::KeyDown(Key::Escape), node));
    assert!(!dom.overlay().visible);
    assert_eq!(manager.phase(), Phase::Idle);
    assert_eq!(clock.pending_count(), 0);
}

#[test]
fn test_escape_ignored_when_disabled() {
    let dom = FakeDom::new(800.0, 600.0);
    let clock = ManualClock::new();
    let config = TooltipConfig {
        dismiss_on_escape: false,
        ..TooltipConfig::default()
    };
    let mut manager = TooltipManager::new(dom.clone(), clock, config).unwrap();
    let node = dom.add_element(None, Rect::new(10.0, 300.0, 40.0, 40.0));
    manager.annotate(&node, "Sticky", TooltipPosition::Top, 500);

    manager.handle_event(PageEvent::new(PageEventKind::FocusIn, node));
    manager.handle_event(PageEvent::new(PageEventKind::KeyDown(Key::Escape), node));
    assert!(dom.overlay().visible);
}

#[test]
fn test_detached_target_is_dropped() {
    let (dom, clock, mut manager) = setup();
    let node = annotated(&dom, &manager, "Gone soon", Rect::new(0.0, 0.0, 50.0, 50.0));

    manager.handle_event(enter(node).at(10.0, 10.0));
    dom.detach(node);
    clock.advance(&mut manager, 500);

    assert!(!dom.overlay().visible);
    assert_eq!(manager.phase(), Phase::Idle);
    assert!(manager.current_target().is_none());
}

#[test]
fn test_text_removed_before_delay_stays_hidden() {
    let (dom, clock, mut manager) = setup();
    let node = annotated(&dom, &manager, "Ephemeral", Rect::new(0.0, 0.0, 50.0, 50.0));

    manager.handle_event(enter(node).at(10.0, 10.0));
    dom.remove_attribute(&node, attributes::TEXT);
    clock.advance(&mut manager, 500);

    assert!(!dom.overlay().visible);
    assert_eq!(manager.phase(), Phase::Idle);
}

#[test]
fn test_hide_during_pending_show_goes_idle() {
    let (dom, clock, mut manager) = setup();
    let node = annotated(&dom, &manager, "Never", Rect::new(0.0, 0.0, 50.0, 50.0));

    manager.handle_event(enter(node).at(10.0, 10.0));
    manager.handle_event(leave(node));

    assert_eq!(manager.phase(), Phase::Idle);
    assert_eq!(clock.pending_count(), 0);
    clock.advance(&mut manager, 1_000);
    assert_eq!(dom.overlay().times_shown, 0);
}

#[test]
fn test_new_target_during_pending_hide_waits_for_delay() {
    let (dom, clock, mut manager) = setup();
    let a = annotated(&dom, &manager, "Alpha", Rect::new(0.0, 0.0, 50.0, 50.0));
    let b = annotated(&dom, &manager, "Beta", Rect::new(60.0, 0.0, 50.0, 50.0));

    manager.handle_event(PageEvent::new(PageEventKind::FocusIn, a));
    manager.handle_event(PageEvent::new(PageEventKind::FocusOut, a));
    assert_eq!(manager.phase(), Phase::PendingHide);

    manager.handle_event(enter(b).at(70.0, 10.0));
    assert_eq!(manager.phase(), Phase::PendingShow);
    assert!(!dom.overlay().visible);

    clock.advance(&mut manager, 500);
    assert_eq!(dom.overlay().text, "Beta");
    assert!(dom.overlay().visible);
}

#[test]
fn test_unannotate_current_target_hides() {
    let (dom, clock, mut manager) = setup();
    let node = annotated(&dom, &manager, "Temporary", Rect::new(0.0, 0.0, 50.0, 50.0));

    manager.handle_event(PageEvent::new(PageEventKind::FocusIn, node));
    manager.unannotate(&node);
    assert!(dom.attribute(&node, attributes::FOCUS_INDEX).is_none());

    clock.advance(&mut manager, 100);
    assert!(!dom.overlay().visible);

    manager.handle_event(PageEvent::new(PageEventKind::FocusIn, node));
    assert!(!dom.overlay().visible);
}

#[test]
fn test_stale_leave_does_not_hide_other_target() {
    let (dom, clock, mut manager) = setup();
    let a = annotated(&dom, &manager, "Alpha", Rect::new(0.0, 0.0, 50.0, 50.0));
    let b = annotated(&dom, &manager, "Beta", Rect::new(60.0, 0.0, 50.0, 50.0));

    manager.handle_event(PageEvent::new(PageEventKind::FocusIn, b));
    manager.handle_event(leave(a));
    clock.advance(&mut manager, 200);

    assert!(dom.overlay().visible);
    assert_eq!(dom.overlay().text, "Beta");
}

#[test]
fn test_single_overlay_for_manager_lifetime() {
    let (dom, clock, mut manager) = setup();
    let a = annotated(&dom, &manager, "Alpha", Rect::new(0.0, 0.0, 50.0, 50.0));
    let b = annotated(&dom, &manager, "Beta", Rect::new(60.0, 0.0, 50.0, 50.0));

    for _ in 0..5 {
        manager.handle_event(enter(a).at(10.0, 10.0));
        clock.advance(&mut manager, 500);
        manager.handle_event(leave(a));
        manager.show_for(b, "Direct", TooltipPosition::Bottom);
        manager.hide_for();
        clock.advance(&mut manager, 100);
    }

    assert_eq!(dom.overlay_count(), 1);
    assert_eq!(dom.overlay().class_name, "tooltip-overlay");
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let dom = FakeDom::new(800.0, 600.0);
    let config = TooltipConfig {
        gap_px: f64::NAN,
        ..TooltipConfig::default()
    };

    assert!(TooltipManager::new(dom.clone(), ManualClock::new(), config).is_err());
    assert_eq!(dom.overlay_count(), 0);
}
