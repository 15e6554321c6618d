//! Overlay placement: anchor selection, side offset and viewport clamping

use page_tooltips_shared::{Point, Rect, Size, TooltipPosition};

/// Anchor derived from an element's geometry: the midpoint of the edge on
/// the requested side. For `Top` this is the horizontal center of the top edge.
pub fn element_anchor(rect: &Rect, side: TooltipPosition) -> Point {
    match side {
        TooltipPosition::Top => Point::new(rect.center_x(), rect.top()),
        TooltipPosition::Bottom => Point::new(rect.center_x(), rect.bottom()),
        TooltipPosition::Left => Point::new(rect.left(), rect.center_y()),
        TooltipPosition::Right => Point::new(rect.right(), rect.center_y()),
    }
}

/// Top-left corner of the overlay before clamping: `gap` away from the
/// anchor on `side`, centered on the perpendicular axis.
pub fn raw_top_left(anchor: Point, side: TooltipPosition, overlay: Size, gap: f64) -> Point {
    match side {
        TooltipPosition::Top => Point::new(
            anchor.x - overlay.width / 2.0,
            anchor.y - overlay.height - gap,
        ),
        TooltipPosition::Bottom => Point::new(anchor.x - overlay.width / 2.0, anchor.y + gap),
        TooltipPosition::Left => Point::new(
            anchor.x - overlay.width - gap,
            anchor.y - overlay.height / 2.0,
        ),
        TooltipPosition::Right => Point::new(anchor.x + gap, anchor.y - overlay.height / 2.0),
    }
}

/// Clamp each axis independently so the overlay stays inside the viewport.
///
/// No side flipping. An overlay larger than the viewport is pinned to 0.
pub fn clamp_to_viewport(top_left: Point, overlay: Size, viewport: Size) -> Point {
    Point::new(
        clamp_axis(top_left.x, overlay.width, viewport.width),
        clamp_axis(top_left.y, overlay.height, viewport.height),
    )
}

fn clamp_axis(start: f64, extent: f64, limit: f64) -> f64 {
    start.min(limit - extent).max(0.0)
}

/// Final overlay position for an anchor and side
pub fn place(
    anchor: Point,
    side: TooltipPosition,
    overlay: Size,
    viewport: Size,
    gap: f64,
) -> Point {
    clamp_to_viewport(raw_top_left(anchor, side, overlay, gap), overlay, viewport)
}
