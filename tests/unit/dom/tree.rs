use super::*;

#[test]
fn attributes_keep_document_order() {
    let mut el = Element::new("svg");
    el.set_attr("id", "frame0");
    el.set_attr("width", "64px");
    el.set_attr("height", "64px");

    let keys: Vec<&str> = el.attributes().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["id", "width", "height"]);

    el.set_attr("width", "32px");
    let keys: Vec<&str> = el.attributes().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["id", "width", "height"]);
    assert_eq!(el.attr("width"), Some("32px"));
}

#[test]
fn child_queries_skip_non_elements() {
    let mut g = Element::new("g");
    g.push_node(XmlNode::Text("hello".to_string()));
    g.push_element(Element::new("rect"));
    g.push_node(XmlNode::Comment(" note ".to_string()));
    g.push_element(Element::new("use"));
    g.push_element(Element::new("rect"));

    assert_eq!(g.children().len(), 5);
    assert_eq!(g.child_elements().count(), 3);
    assert_eq!(g.find_children("rect").count(), 2);
    assert_eq!(g.find_child("use").map(Element::name), Some("use"));
    assert!(g.find_child("circle").is_none());
}

#[test]
fn namespaces_come_from_own_xmlns_attributes() {
    let el = Element::new("svg")
        .with_attr("xmlns", "http://www.w3.org/2000/svg")
        .with_attr("xmlns:xlink", "http://www.w3.org/1999/xlink")
        .with_attr("width", "64px");

    let ns = el.namespaces();
    assert_eq!(ns.len(), 2);
    assert_eq!(ns.get("xmlns").map(String::as_str), Some("http://www.w3.org/2000/svg"));
    assert_eq!(ns.get("xlink").map(String::as_str), Some("http://www.w3.org/1999/xlink"));

    let keys: Vec<&String> = ns.keys().collect();
    assert_eq!(keys, vec!["xmlns", "xlink"]);
}

#[test]
fn clones_are_independent() {
    let original = Element::new("g").with_child(Element::new("rect").with_attr("id", "r1"));
    let mut copy = original.clone();
    for child in copy.child_elements_mut() {
        child.set_attr("id", "changed");
    }
    assert_eq!(original.find_child("rect").unwrap().attr("id"), Some("r1"));
    assert_eq!(copy.find_child("rect").unwrap().attr("id"), Some("changed"));
}
