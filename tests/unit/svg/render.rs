use super::*;
use crate::foundation::core::Point;

#[derive(Debug, PartialEq)]
enum Call {
    Fill { transform: Affine, brush: Brush },
    Stroke { transform: Affine, pen: Pen, gradient: bool },
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
    fail_fills: bool,
}

impl ShapeSink for Recorder {
    fn draw(
        &mut self,
        _path: &Path,
        transform: Affine,
        brush: Option<&Brush>,
        pen: Option<&Pen>,
        stroke_paint: Option<&Paint>,
    ) -> DrawResult<()> {
        if self.fail_fills && brush.is_some() {
            return Err(DrawError::geometry("rejected"));
        }
        if let Some(brush) = brush {
            self.calls.push(Call::Fill {
                transform,
                brush: brush.clone(),
            });
        }
        if let Some(pen) = pen {
            self.calls.push(Call::Stroke {
                transform,
                pen: pen.clone(),
                gradient: stroke_paint.is_some(),
            });
        }
        Ok(())
    }
}

fn render(src: &str) -> (Vec<Call>, SvgRenderStats) {
    let doc = SvgDocument::parse(src).unwrap();
    let mut rec = Recorder::default();
    let stats = render_document(&doc, Affine::IDENTITY, &mut rec);
    (rec.calls, stats)
}

#[test]
fn default_fill_is_black_without_stroke() {
    let (calls, stats) = render(r#"<svg><rect width="4" height="4"/></svg>"#);
    assert_eq!(stats.drawn, 1);
    assert_eq!(
        calls,
        vec![Call::Fill {
            transform: Affine::IDENTITY,
            brush: Brush::new(Color::BLACK),
        }]
    );
}

#[test]
fn styles_inherit_and_opacity_multiplies() {
    let (calls, _) = render(
        r#"<svg><g fill="red" stroke="blue" stroke-width="3" opacity="0.5">
           <g opacity="0.5"><circle r="2" fill-opacity="0.5" stroke-linejoin="round"/>
           </g></g></svg>"#,
    );
    assert_eq!(calls.len(), 2);
    let Call::Fill { brush, .. } = &calls[0] else {
        panic!("expected a fill first");
    };
    assert_eq!(brush.paint, Paint::Solid(Color::rgb(255, 0, 0)));
    assert!((brush.opacity - 0.125).abs() < 1e-12);
    let Call::Stroke { pen, gradient, .. } = &calls[1] else {
        panic!("expected a stroke second");
    };
    assert!(!gradient);
    assert_eq!(pen.color, Color::rgb(0, 0, 255));
    assert_eq!(pen.width, 3.0);
    assert_eq!(pen.join, LineJoin::Round);
    assert!((pen.opacity - 0.25).abs() < 1e-12);
}

#[test]
fn transforms_nest_outside_in() {
    let doc = SvgDocument::parse(
        r#"<svg><g transform="translate(10 0)">
           <rect transform="scale(2)" width="1" height="1"/></g></svg>"#,
    )
    .unwrap();
    let mut rec = Recorder::default();
    render_document(&doc, Affine::translate((0.0, 5.0)), &mut rec);
    let Call::Fill { transform, .. } = &rec.calls[0] else {
        panic!("expected a fill");
    };
    assert_eq!(*transform * Point::new(1.0, 1.0), Point::new(12.0, 7.0));
}

#[test]
fn current_color_and_fallbacks() {
    let (calls, _) = render(
        r##"<svg color="lime"><rect width="1" height="1" fill="currentColor"/>
           <rect width="1" height="1" fill="url(#nope) #00f"/>
           <rect width="1" height="1" fill="url(#nope)"/></svg>"##,
    );
    let fills: Vec<_> = calls
        .iter()
        .map(|c| match c {
            Call::Fill { brush, .. } => brush.paint.clone(),
            Call::Stroke { .. } => panic!("unexpected stroke"),
        })
        .collect();
    assert_eq!(
        fills,
        vec![
            Paint::Solid(Color::rgb(0, 255, 0)),
            Paint::Solid(Color::rgb(0, 0, 255)),
        ]
    );
}

#[test]
fn gradient_strokes_pass_the_paint() {
    let (calls, _) = render(
        r##"<svg><linearGradient id="g"><stop stop-color="red"/></linearGradient>
           <line x2="10" stroke="url(#g)" fill="red"/></svg>"##,
    );
    // Lines never fill.
    assert_eq!(calls.len(), 1);
    assert!(matches!(&calls[0], Call::Stroke { gradient: true, .. }));
}

#[test]
fn hidden_and_undisplayed_shapes_are_not_drawn() {
    let (calls, stats) = render(
        r#"<svg><g visibility="hidden"><rect width="1" height="1"/>
           <rect width="1" height="1" visibility="visible" fill="red"/></g>
           <g display="none"><rect width="1" height="1"/></g>
           <defs><rect width="1" height="1"/></defs></svg>"#,
    );
    assert_eq!(stats.drawn, 1);
    assert_eq!(calls.len(), 1);
}

#[test]
fn dashes_and_zero_widths() {
    let (calls, _) = render(
        r#"<svg><path d="M0 0 H10" stroke="black" fill="none"
           stroke-dasharray="2 1" stroke-dashoffset="1"/>
           <path d="M0 0 H10" stroke="black" fill="none" stroke-width="0"/></svg>"#,
    );
    assert_eq!(calls.len(), 1);
    let Call::Stroke { pen, .. } = &calls[0] else {
        panic!("expected a stroke");
    };
    let dash = pen.dash.as_ref().unwrap();
    assert_eq!(dash.intervals.as_slice(), &[2.0, 1.0]);
    assert_eq!(dash.offset, 1.0);
}

#[test]
fn sink_failures_are_isolated() {
    let doc = SvgDocument::parse(
        r#"<svg><rect width="1" height="1"/><path d="M0 0 H5" fill="none" stroke="red"/></svg>"#,
    )
    .unwrap();
    let mut rec = Recorder {
        fail_fills: true,
        ..Recorder::default()
    };
    let stats = render_document(&doc, Affine::IDENTITY, &mut rec);
    assert_eq!(stats.drawn, 1);
    assert_eq!(stats.skipped.len(), 1);
    assert_eq!(stats.skipped[0].element, "rect");
    assert_eq!(rec.calls.len(), 1);
}

#[test]
fn fill_and_stroke_reach_the_sink_together() {
    let doc = SvgDocument::parse(
        r#"<svg><rect width="2" height="2" fill="red" stroke="blue"/>
           <path d="M0 0 H5" fill="red" stroke="blue"/></svg>"#,
    )
    .unwrap();
    let mut rec = Recorder {
        fail_fills: true,
        ..Recorder::default()
    };
    let stats = render_document(&doc, Affine::IDENTITY, &mut rec);
    assert_eq!(stats.drawn, 0);
    assert_eq!(stats.skipped.len(), 2);
    // A rejected element hands over neither its fill nor its stroke.
    assert!(rec.calls.is_empty());
}
