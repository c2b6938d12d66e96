use pretty_assertions::assert_eq;

use super::*;

#[test]
fn writes_declaration_comments_and_indentation() {
    let root = Element::new("svg")
        .with_attr("width", "64px")
        .with_child(Element::new("rect").with_attr("id", "r1"));
    let text = to_xml_string(&root, &[" Generated by phantom_svg. "]).unwrap();
    assert_eq!(
        text,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <!-- Generated by phantom_svg. -->\n\
         <svg width=\"64px\">\n\
         \x20 <rect id=\"r1\"/>\n\
         </svg>"
    );
}

#[test]
fn parse_drops_whitespace_only_text() {
    let root = parse_root("<g>\n  <rect/>\n  <use/>\n</g>").unwrap();
    assert_eq!(root.children().len(), 2);
    assert_eq!(root.child_elements().count(), 2);
}

#[test]
fn text_and_attributes_unescape_and_reescape() {
    let root = parse_root("<t a=\"x &amp; y\">hi &lt;there&gt;</t>").unwrap();
    assert_eq!(root.attr("a"), Some("x & y"));
    assert_eq!(root.children().len(), 1);
    assert_eq!(root.children()[0], XmlNode::Text("hi <there>".to_string()));

    let text = to_xml_string(&root, &[]).unwrap();
    assert!(text.contains("a=\"x &amp; y\""));
    assert!(text.contains("hi &lt;there&gt;"));
}

#[test]
fn cdata_becomes_text() {
    let root = parse_root("<t><![CDATA[a < b]]></t>").unwrap();
    assert_eq!(root.children().len(), 1);
    assert_eq!(root.children()[0], XmlNode::Text("a < b".to_string()));
}

#[test]
fn comments_inside_the_root_are_kept() {
    let root = parse_root("<g><!-- note --><rect/></g>").unwrap();
    assert_eq!(root.children().len(), 2);
    assert_eq!(root.children()[0], XmlNode::Comment(" note ".to_string()));

    let text = to_xml_string(&root, &[]).unwrap();
    assert!(text.contains("<!-- note -->"));
}

#[test]
fn structural_round_trip_is_stable() {
    let source = "<svg id=\"a\" width=\"64px\"><defs><svg id=\"frame0\"><path d=\"M0 0\"/>\
                  </svg></defs><use xlink:href=\"#frame0\"/></svg>";
    let first = parse_root(source).unwrap();
    let text = to_xml_string(&first, &[]).unwrap();
    let second = parse_root(&text).unwrap();
    assert_eq!(first, second);
}

#[test]
fn malformed_inputs_are_rejected() {
    for bad in ["", "plain text", "<a><b></a>", "<a/><b/>", "<a>"] {
        match parse_root(bad) {
            Err(PhantomError::MalformedDocument(_)) => {}
            other => panic!("expected MalformedDocument for {bad:?}, got {other:?}"),
        }
    }
}
