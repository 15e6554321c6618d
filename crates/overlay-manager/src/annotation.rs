//! Reading and writing tooltip annotations on page elements

use crate::host::Dom;
use page_tooltips_shared::{attributes, Annotation, TooltipPosition};

/// Current annotation of `node`, read straight from its attributes
pub fn read_annotation<D: Dom>(dom: &D, node: &D::Node, default_delay_ms: u32) -> Option<Annotation> {
    Annotation::from_attributes(
        dom.attribute(node, attributes::TEXT).as_deref(),
        dom.attribute(node, attributes::POSITION).as_deref(),
        dom.attribute(node, attributes::DELAY).as_deref(),
        default_delay_ms,
    )
}

/// Nearest ancestor-or-self carrying a tooltip text attribute
pub fn closest_annotated<D: Dom>(dom: &D, node: &D::Node) -> Option<D::Node> {
    let mut current = Some(node.clone());
    while let Some(candidate) = current {
        if dom.attribute(&candidate, attributes::TEXT).is_some() {
            return Some(candidate);
        }
        current = dom.parent(&candidate);
    }
    None
}

/// True when `node` is `ancestor` or lies beneath it
pub fn is_within<D: Dom>(dom: &D, ancestor: &D::Node, node: &D::Node) -> bool {
    let mut current = Some(node.clone());
    while let Some(candidate) = current {
        if &candidate == ancestor {
            return true;
        }
        current = dom.parent(&candidate);
    }
    false
}

/// Write a full annotation and make the element keyboard reachable
pub fn annotate<D: Dom>(
    dom: &D,
    node: &D::Node,
    text: &str,
    position: TooltipPosition,
    delay_ms: u32,
) {
    dom.set_attribute(node, attributes::TEXT, text);
    dom.set_attribute(node, attributes::POSITION, position.as_str());
    dom.set_attribute(node, attributes::DELAY, &delay_ms.to_string());

    if dom.attribute(node, attributes::FOCUS_INDEX).is_none() {
        dom.set_attribute(node, attributes::FOCUS_INDEX, "0");
        dom.set_attribute(node, attributes::MANAGED_FOCUS, "");
    }
}

/// Remove the annotation. `tabindex` is only removed when `annotate` added it.
pub fn unannotate<D: Dom>(dom: &D, node: &D::Node) {
    dom.remove_attribute(node, attributes::TEXT);
    dom.remove_attribute(node, attributes::POSITION);
    dom.remove_attribute(node, attributes::DELAY);

    if dom.attribute(node, attributes::MANAGED_FOCUS).is_some() {
        dom.remove_attribute(node, attributes::FOCUS_INDEX);
        dom.remove_attribute(node, attributes::MANAGED_FOCUS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDom;
    use page_tooltips_shared::Rect;

    #[test]
    fn test_closest_annotated_walks_up() {
        let dom = FakeDom::new(800.0, 600.0);
        let card = dom.add_element(None, Rect::new(0.0, 0.0, 200.0, 100.0));
        let button = dom.add_element(Some(card), Rect::new(10.0, 10.0, 50.0, 20.0));
        let icon = dom.add_element(Some(button), Rect::new(12.0, 12.0, 10.0, 10.0));
        dom.set_attribute(&button, attributes::TEXT, "Launch");

        assert_eq!(closest_annotated(&dom, &icon), Some(button));
        assert_eq!(closest_annotated(&dom, &button), Some(button));
        assert_eq!(closest_annotated(&dom, &card), None);
    }

    #[test]
    fn test_read_annotation_is_fresh() {
        let dom = FakeDom::new(800.0, 600.0);
        let node = dom.add_element(None, Rect::default());
        assert!(read_annotation(&dom, &node, 500).is_none());

        dom.set_attribute(&node, attributes::TEXT, "First");
        assert_eq!(read_annotation(&dom, &node, 500).unwrap().text, "First");

        dom.set_attribute(&node, attributes::TEXT, "Second");
        dom.set_attribute(&node, attributes::POSITION, "bottom");
        let annotation = read_annotation(&dom, &node, 500).unwrap();
        assert_eq!(annotation.text, "Second");
        assert_eq!(annotation.position, TooltipPosition::Bottom);
    }

    #[test]
    fn test_annotate_round_trip_restores_focusability() {
        let dom = FakeDom::new(800.0, 600.0);
        let plain = dom.add_element(None, Rect::default());

        annotate(&dom, &plain, "Help", TooltipPosition::Left, 250);
        assert_eq!(dom.attribute(&plain, attributes::FOCUS_INDEX).as_deref(), Some("0"));
        assert_eq!(dom.attribute(&plain, attributes::DELAY).as_deref(), Some("250"));
        assert_eq!(dom.attribute(&plain, attributes::POSITION).as_deref(), Some("left"));

        unannotate(&dom, &plain);
        assert!(dom.attribute(&plain, attributes::TEXT).is_none());
        assert!(dom.attribute(&plain, attributes::FOCUS_INDEX).is_none());
        assert!(dom.attribute(&plain, attributes::MANAGED_FOCUS).is_none());
    }

    #[test]
    fn test_unannotate_keeps_page_tabindex() {
        let dom = FakeDom::new(800.0, 600.0);
        let link = dom.add_element(None, Rect::default());
        dom.set_attribute(&link, attributes::FOCUS_INDEX, "2");

        annotate(&dom, &link, "Docs", TooltipPosition::Top, 500);
        assert_eq!(dom.attribute(&link, attributes::FOCUS_INDEX).as_deref(), Some("2"));

        unannotate(&dom, &link);
        assert_eq!(dom.attribute(&link, attributes::FOCUS_INDEX).as_deref(), Some("2"));
    }

    #[test]
    fn test_is_within() {
        let dom = FakeDom::new(800.0, 600.0);
        let outer = dom.add_element(None, Rect::default());
        let inner = dom.add_element(Some(outer), Rect::default());
        let sibling = dom.add_element(None, Rect::default());

        assert!(is_within(&dom, &outer, &inner));
        assert!(is_within(&dom, &outer, &outer));
        assert!(!is_within(&dom, &inner, &outer));
        assert!(!is_within(&dom, &outer, &sibling));
    }
}
