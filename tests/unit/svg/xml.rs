use super::*;

fn parse(src: &str) -> (Vec<XmlElement>, Vec<SvgDiagnostic>) {
    let mut diags = Vec::new();
    let roots = parse_tree(src, 64, &mut diags);
    (roots, diags)
}

#[test]
fn builds_nested_tree_with_local_names() {
    let (roots, diags) = parse(
        r#"<?xml version="1.0"?><svg:svg xmlns:svg="http://www.w3.org/2000/svg">
           <g id="a"><rect width="1"/></g></svg:svg>"#,
    );
    assert!(diags.is_empty());
    assert_eq!(roots.len(), 1);
    let svg = &roots[0];
    assert_eq!(svg.name, "svg");
    let g = &svg.children[0];
    assert_eq!(g.name, "g");
    assert_eq!(g.attr("id"), Some("a"));
    assert_eq!(g.children[0].name, "rect");
    assert_eq!(g.children[0].attr("width"), Some("1"));
}

#[test]
fn unclosed_elements_are_closed_at_end_of_input() {
    let (roots, _) = parse("<svg><g><rect/>");
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].children[0].children[0].name, "rect");
}

#[test]
fn stray_end_tags_are_ignored() {
    let (roots, _) = parse("<svg></g><rect/></svg>");
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].children.len(), 1);
    assert_eq!(roots[0].children[0].name, "rect");
}

#[test]
fn end_tag_closes_back_to_matching_element() {
    let (roots, _) = parse("<svg><g><rect></g><circle/></svg>");
    let svg = &roots[0];
    assert_eq!(svg.children.len(), 2);
    assert_eq!(svg.children[0].name, "g");
    assert_eq!(svg.children[0].children[0].name, "rect");
    assert_eq!(svg.children[1].name, "circle");
}

#[test]
fn subtrees_past_the_depth_limit_are_dropped() {
    let mut diags = Vec::new();
    let roots = parse_tree(
        "<g><g><g><g><g/></g></g><rect/></g></g>",
        3,
        &mut diags,
    );
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::ResourceExhaustion);
    let g2 = &roots[0].children[0];
    let g3 = &g2.children[0];
    assert!(g3.children.is_empty());
    // The sibling after the skipped subtree is kept.
    assert_eq!(g2.children[1].name, "rect");
}

#[test]
fn self_closing_elements_past_the_depth_limit_are_reported() {
    let mut diags = Vec::new();
    let roots = parse_tree("<g><g><rect/><circle/></g></g>", 2, &mut diags);
    assert_eq!(diags.len(), 2);
    assert!(diags.iter().all(|d| d.kind == DiagnosticKind::ResourceExhaustion));
    assert_eq!(diags[0].element, "rect");
    assert_eq!(diags[1].element, "circle");
    assert!(roots[0].children[0].children.is_empty());

    // Inside an already skipped subtree nothing more is reported.
    let mut diags = Vec::new();
    parse_tree("<g><g><rect/></g></g>", 1, &mut diags);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].element, "g");
}

#[test]
fn duplicate_attributes_keep_the_last_value() {
    let (roots, _) = parse(r#"<rect x="1" x="2"/>"#);
    assert_eq!(roots[0].attr("x"), Some("2"));
}

#[test]
fn attribute_entities_are_unescaped() {
    let (roots, _) = parse(r#"<desc title="a &lt; b &amp; c"/>"#);
    assert_eq!(roots[0].attr("title"), Some("a < b & c"));
}

#[test]
fn syntax_error_keeps_partial_tree() {
    let (roots, diags) = parse("<svg><rect/><!-- never closed");
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].children[0].name, "rect");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::MalformedMarkup);
}
