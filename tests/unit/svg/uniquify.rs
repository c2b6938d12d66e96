use pretty_assertions::assert_eq;

use super::*;

fn frame_root() -> Element {
    Element::new("svg").with_attr("id", "frame0")
}

#[test]
fn forward_references_are_rewritten() {
    // The <use> points at an id defined later in document order; a single
    // combined pass would miss it.
    let mut root = frame_root()
        .with_child(Element::new("use").with_attr("xlink:href", "#later"))
        .with_child(Element::new("rect").with_attr("id", "later"));
    uniquify_ids(&mut root, "frame0_");

    let children: Vec<&Element> = root.child_elements().collect();
    assert_eq!(children[0].attr("xlink:href"), Some("#frame0_later"));
    assert_eq!(children[1].attr("id"), Some("frame0_later"));
}

#[test]
fn root_id_is_left_alone() {
    let mut root = frame_root().with_child(Element::new("rect").with_attr("id", "r"));
    uniquify_ids(&mut root, "frame0_");
    assert_eq!(root.attr("id"), Some("frame0"));
}

#[test]
fn references_embedded_in_larger_values_are_rewritten() {
    let mut root = frame_root()
        .with_child(Element::new("linearGradient").with_attr("id", "a"))
        .with_child(Element::new("linearGradient").with_attr("id", "b"))
        .with_child(Element::new("rect").with_attr("style", "fill:url(#a);stroke:url(#b)"));
    uniquify_ids(&mut root, "frame1_");

    let rect = root.find_child("rect").unwrap();
    assert_eq!(
        rect.attr("style"),
        Some("fill:url(#frame1_a);stroke:url(#frame1_b)")
    );
}

#[test]
fn ids_apply_in_collection_order_without_rematching() {
    // "a" is collected before "ab"; replacing "#a" inside "#ab" must leave a
    // reference that still resolves to the prefixed "ab".
    let mut root = frame_root()
        .with_child(Element::new("rect").with_attr("id", "a"))
        .with_child(Element::new("rect").with_attr("id", "ab"))
        .with_child(Element::new("use").with_attr("xlink:href", "#ab"));
    uniquify_ids(&mut root, "p_");

    let ids: Vec<Option<&str>> = root.child_elements().map(|el| el.attr("id")).collect();
    assert_eq!(ids[0], Some("p_a"));
    assert_eq!(ids[1], Some("p_ab"));
    let use_el = root.find_child("use").unwrap();
    assert_eq!(use_el.attr("xlink:href"), Some("#p_ab"));
}

#[test]
fn nested_subtrees_are_covered_by_both_passes() {
    let inner = Element::new("g")
        .with_child(Element::new("circle").with_attr("id", "dot"))
        .with_child(Element::new("use").with_attr("xlink:href", "#dot"));
    let mut root = frame_root().with_child(Element::new("g").with_child(inner));
    uniquify_ids(&mut root, "frame2_");

    let outer = root.find_child("g").unwrap();
    let inner = outer.find_child("g").unwrap();
    assert_eq!(
        inner.find_child("circle").unwrap().attr("id"),
        Some("frame2_dot")
    );
    assert_eq!(
        inner.find_child("use").unwrap().attr("xlink:href"),
        Some("#frame2_dot")
    );
}
