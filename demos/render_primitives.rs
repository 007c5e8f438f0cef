use anyhow::Context as _;
use vecdraw::{
    Brush, Color, DashPattern, Draw, FillRule, Gradient, GradientStop, GradientUnits, LineCap,
    LineJoin, Pen, PixelFormat, Point, Rect, SpreadMethod,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let mut draw = Draw::new_owned(640, 400, PixelFormat::Rgba8, Color::WHITE)?;
    let ink = Pen::new(Color::rgb(30, 30, 40), 3.0)?.with_join(LineJoin::Round);
    let warm = Brush::new(Color::rgb(240, 140, 40));
    let cool = Brush::new(Color::rgba(40, 120, 220, 180));

    // Row 1: closed shapes.
    draw.rectangle(Rect::new(20.0, 20.0, 140.0, 120.0), Some(&warm), Some(&ink))?;
    draw.rounded_rectangle(Rect::new(170.0, 20.0, 290.0, 120.0), 18.0, Some(&cool), Some(&ink))?;
    draw.ellipse(Rect::new(320.0, 20.0, 460.0, 120.0), Some(&warm), Some(&ink))?;
    draw.chord(Rect::new(490.0, 20.0, 620.0, 120.0), 200.0, 20.0, Some(&cool), Some(&ink))?;

    // Row 2: arcs, pie slices and polygons.
    let round_ink = ink.clone().with_cap(LineCap::Round);
    draw.arc(Rect::new(20.0, 150.0, 140.0, 270.0), 30.0, 300.0, &round_ink)?;
    draw.pieslice(Rect::new(170.0, 150.0, 290.0, 270.0), -60.0, 200.0, Some(&warm), Some(&ink))?;
    let star: Vec<Point> = (0..5)
        .map(|i| {
            let a = -std::f64::consts::FRAC_PI_2 + f64::from(i) * 4.0 * std::f64::consts::PI / 5.0;
            Point::new(390.0 + 60.0 * a.cos(), 210.0 + 60.0 * a.sin())
        })
        .collect();
    draw.polygon(&star, Some(&cool.clone().with_fill_rule(FillRule::EvenOdd)), Some(&ink))?;
    let gradient = Gradient::linear(
        (0.0, 0.0),
        (0.5, 0.0),
        vec![
            GradientStop::new(0.0, Color::rgb(220, 30, 90)),
            GradientStop::new(1.0, Color::rgb(250, 220, 60)),
        ],
    )
    .with_units(GradientUnits::ObjectBoundingBox)
    .with_spread(SpreadMethod::Reflect);
    draw.rectangle(Rect::new(490.0, 150.0, 620.0, 270.0), Some(&Brush::new(gradient)), None)?;

    // Row 3: polylines, dashes and a hairline under a transform.
    let zigzag: Vec<Point> = (0..9)
        .map(|i| Point::new(20.0 + f64::from(i) * 30.0, if i % 2 == 0 { 300.0 } else { 370.0 }))
        .collect();
    draw.line(&zigzag, &Pen::new(Color::rgb(20, 140, 80), 6.0)?.with_join(LineJoin::Miter))?;
    let dashed = Pen::new(Color::rgb(120, 40, 160), 4.0)?
        .with_cap(LineCap::Round)
        .with_dash(DashPattern::new([14.0, 10.0], 0.0)?);
    draw.ellipse(Rect::new(320.0, 295.0, 460.0, 385.0), None, Some(&dashed))?;
    draw.push_transform(vecdraw::Affine::translate((555.0, 340.0)) * vecdraw::Affine::scale(8.0))?;
    let cross = "M0 0 L10 10 M10 0 L0 10";
    draw.symbol(Point::new(-5.0, -5.0), cross, None, Some(&Pen::hairline(Color::BLACK)))?;
    draw.pop_transform()?;

    let out = std::path::PathBuf::from("target").join("primitives.png");
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    draw.to_rgba_image()
        .save(&out)
        .with_context(|| format!("write png '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
