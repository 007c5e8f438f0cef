use super::*;

fn doc(src: &str) -> SvgDocument {
    SvgDocument::parse(src).unwrap()
}

fn assert_rect_eq(a: Rect, b: Rect) {
    let close = |x: f64, y: f64| (x - y).abs() < 1e-6;
    assert!(
        close(a.x0, b.x0) && close(a.y0, b.y0) && close(a.x1, b.x1) && close(a.y1, b.y1),
        "{a:?} != {b:?}"
    );
}

#[test]
fn rect_bounds() {
    let d = doc(
        r#"<svg xmlns="http://www.w3.org/2000/svg">
           <rect x="10" y="10" width="40" height="30"/></svg>"#,
    );
    assert_eq!(d.bounding_rect(), Some(Rect::new(10.0, 10.0, 50.0, 40.0)));
    assert!(d.diagnostics().is_empty());
}

#[test]
fn bounds_union_and_transforms() {
    let d = doc(
        r#"<svg><g transform="translate(100 0)"><circle cx="0" cy="0" r="5"/></g>
           <line x1="0" y1="0" x2="10" y2="20"/></svg>"#,
    );
    assert_rect_eq(d.bounding_rect().unwrap(), Rect::new(0.0, -5.0, 105.0, 20.0));
}

#[test]
fn empty_documents_have_no_bounds() {
    assert_eq!(doc("<svg/>").bounding_rect(), None);
    assert_eq!(doc(r#"<svg><rect width="0" height="10"/></svg>"#).bounding_rect(), None);
}

#[test]
fn display_none_is_excluded_from_bounds() {
    let d = doc(
        r#"<svg><rect width="10" height="10"/>
           <rect x="100" width="10" height="10" display="none"/></svg>"#,
    );
    assert_eq!(d.bounding_rect(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
}

#[test]
fn malformed_element_is_skipped_with_a_diagnostic() {
    let d = doc(r#"<svg><path d="Z Z Z $$$"/><circle cx="5" cy="5" r="2"/></svg>"#);
    let NodeKind::Group(children) = &d.root().kind else {
        panic!("root is not a group");
    };
    assert_eq!(children.len(), 1);
    assert!(matches!(children[0].kind, NodeKind::Circle { .. }));
    assert_eq!(d.diagnostics().len(), 1);
    assert_eq!(d.diagnostics()[0].element, "path");
    assert!(matches!(d.diagnostics()[0].to_error(), DrawError::MalformedMarkup(_)));
}

#[test]
fn bad_attribute_values_fail_the_element_only() {
    let d = doc(
        r#"<svg><rect width="-4" height="2"/><rect width="3" height="3" fill="nonsense"/>
           <rect width="1" height="1" transform="spin(3)"/><rect width="2" height="2"/></svg>"#,
    );
    assert_eq!(d.diagnostics().len(), 3);
    assert_eq!(d.bounding_rect(), Some(Rect::new(0.0, 0.0, 2.0, 2.0)));
}

#[test]
fn unknown_elements_are_skipped_silently() {
    let d = doc(
        r##"<svg><title>t</title><use href="#a"/><text x="1">hi</text>
            <g><rect width="1" height="1"/></g></svg>"##,
    );
    assert!(d.diagnostics().is_empty());
    assert_eq!(d.bounding_rect(), Some(Rect::new(0.0, 0.0, 1.0, 1.0)));
}

#[test]
fn documents_without_elements_fail() {
    assert!(matches!(SvgDocument::parse(""), Err(DrawError::MalformedMarkup(_))));
    assert!(SvgDocument::parse("just some text").is_err());
    assert!("<svg/>".parse::<SvgDocument>().is_ok());
}

#[test]
fn forward_gradient_references_resolve() {
    let d = doc(
        r##"<svg><rect width="10" height="10" fill="url(#g)"/>
           <defs><linearGradient id="g"><stop offset="0" stop-color="red"/>
           <stop offset="100%" stop-color="blue"/></linearGradient></defs></svg>"##,
    );
    assert!(d.diagnostics().is_empty());
    let g = d.gradient("g").unwrap();
    assert_eq!(g.stops.len(), 2);
    assert_eq!(g.stops[1].offset, 1.0);
    assert_eq!(g.units, GradientUnits::ObjectBoundingBox);
    assert_eq!(
        g.geometry,
        GradientGeometry::Linear {
            start: Point::new(0.0, 0.0),
            end: Point::new(1.0, 0.0),
        }
    );
}

#[test]
fn href_chains_inherit_and_survive_cycles() {
    let d = doc(
        r##"<svg><defs>
           <radialGradient id="a" href="#b" r="0.25"/>
           <radialGradient id="b" xlink:href="#a" spreadMethod="reflect" cx="0.2">
             <stop offset="0.5" stop-color="#fff" stop-opacity="0.5"/>
           </radialGradient>
           <linearGradient id="c" href="#b" x1="0.3"/>
           </defs></svg>"##,
    );
    let a = d.gradient("a").unwrap();
    assert_eq!(a.stops.len(), 1);
    assert_eq!(a.stops[0].opacity, 0.5);
    assert_eq!(a.spread, SpreadMethod::Reflect);
    assert_eq!(
        a.geometry,
        GradientGeometry::Radial {
            center: Point::new(0.2, 0.5),
            radius: 0.25,
            focal: None,
        }
    );
    // Geometry does not cross gradient kinds; stops and spread do.
    let c = d.gradient("c").unwrap();
    assert_eq!(c.spread, SpreadMethod::Reflect);
    assert_eq!(
        c.geometry,
        GradientGeometry::Linear {
            start: Point::new(0.3, 0.0),
            end: Point::new(1.0, 0.0),
        }
    );
}

#[test]
fn user_space_gradient_percentages_use_the_viewport() {
    let d = doc(
        r#"<svg viewBox="0 0 200 100"><linearGradient id="g" gradientUnits="userSpaceOnUse"
           x1="10%" x2="50%" y2="100%" gradientTransform="scale(2)"/></svg>"#,
    );
    let g = d.gradient("g").unwrap();
    assert_eq!(g.units, GradientUnits::UserSpaceOnUse);
    assert_eq!(g.transform, Affine::scale(2.0));
    assert_eq!(
        g.geometry,
        GradientGeometry::Linear {
            start: Point::new(20.0, 0.0),
            end: Point::new(100.0, 100.0),
        }
    );
}

#[test]
fn unresolved_paint_reference_is_reported() {
    let d = doc(r##"<svg><rect id="r" width="1" height="1" fill="url(#missing) green"/></svg>"##);
    assert_eq!(d.diagnostics().len(), 1);
    assert!(d.diagnostics()[0].message.contains("#missing"));
    // The element itself is kept.
    assert!(d.bounding_rect().is_some());
}

#[test]
fn view_box_maps_into_width_and_height() {
    let meet = doc(
        r#"<svg width="200" height="100" viewBox="0 0 100 100">
           <rect width="100" height="100"/></svg>"#,
    );
    assert_rect_eq(meet.bounding_rect().unwrap(), Rect::new(50.0, 0.0, 150.0, 100.0));
    assert_eq!(meet.size(), Some((200.0, 100.0)));
    assert_eq!(meet.view_box(), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));

    let stretch = doc(
        r#"<svg width="200" height="100" viewBox="0 0 100 100" preserveAspectRatio="none">
           <rect width="100" height="100"/></svg>"#,
    );
    assert_rect_eq(stretch.bounding_rect().unwrap(), Rect::new(0.0, 0.0, 200.0, 100.0));

    let min = doc(
        r#"<svg width="200" height="100" viewBox="10 10 100 100" preserveAspectRatio="xMinYMin">
           <rect x="10" y="10" width="100" height="100"/></svg>"#,
    );
    assert_rect_eq(min.bounding_rect().unwrap(), Rect::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn view_box_without_size_keeps_user_coordinates() {
    let d = doc(r#"<svg viewBox="0 0 10 10"><rect x="2" y="2" width="3" height="3"/></svg>"#);
    assert_eq!(d.bounding_rect(), Some(Rect::new(2.0, 2.0, 5.0, 5.0)));
}

#[test]
fn style_attribute_overrides_presentation_attributes() {
    let d = doc(r#"<svg><rect width="1" height="1" fill="red" style="fill: blue"/></svg>"#);
    let NodeKind::Group(children) = &d.root().kind else {
        panic!("root is not a group");
    };
    assert_eq!(
        children[0].common.style.fill,
        Some(SvgPaint::Color(Color::rgb(0, 0, 255)))
    );
}

#[test]
fn rect_corner_radius_defaults_to_the_other_axis() {
    let d = doc(r#"<svg><rect width="10" height="10" ry="2"/></svg>"#);
    let NodeKind::Group(children) = &d.root().kind else {
        panic!("root is not a group");
    };
    assert!(matches!(children[0].kind, NodeKind::Rect { rx, ry, .. } if rx == 2.0 && ry == 2.0));
}

#[test]
fn deep_nesting_is_truncated() {
    let src = format!("<svg>{}{}</svg>", "<g>".repeat(200), "</g>".repeat(200));
    let d = doc(&src);
    assert!(
        d.diagnostics()
            .iter()
            .any(|x| x.kind == DiagnosticKind::ResourceExhaustion)
    );
    let nested = "<svg><g><g><rect width='1' height='1'/></g></g></svg>";
    let shallow = SvgDocument::parse_with_depth(nested, 2).unwrap();
    assert_eq!(shallow.bounding_rect(), None);
}
