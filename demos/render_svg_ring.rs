use anyhow::Context as _;
use vecdraw::{Affine, Color, Draw, PixelFormat, SvgDocument};

const BADGE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg"
     width="60" height="60" viewBox="0 0 120 120">
  <defs>
    <radialGradient id="glow" cx="50%" cy="40%" r="60%">
      <stop offset="0" stop-color="#fff6c8"/>
      <stop offset="1" stop-color="#f0a020"/>
    </radialGradient>
  </defs>
  <g stroke="#402000" stroke-width="4" stroke-linejoin="round">
    <circle cx="60" cy="60" r="52" fill="url(#glow)"/>
    <path d="M60 22 L71 48 L99 50 L77 68 L84 96 L60 80 L36 96 L43 68 L21 50 L49 48 Z"
          fill="#d04020" fill-opacity="0.85"/>
  </g>
</svg>"##;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let doc = SvgDocument::parse(BADGE)?;
    let (w, h) = doc.size().unwrap_or((60.0, 60.0));

    let size = 480u32;
    let center = f64::from(size) * 0.5;
    let mut draw = Draw::new_owned(size, size, PixelFormat::Rgba8, Color::rgb(24, 26, 34))?;

    let copies = 16;
    for i in 0..copies {
        let angle = std::f64::consts::TAU * f64::from(i) / f64::from(copies);
        let placement = Affine::translate((center, center))
            * Affine::rotate(angle)
            * Affine::translate((0.0, -170.0))
            * Affine::rotate(-angle)
            * Affine::translate((-w * 0.5, -h * 0.5));
        draw.svg(placement, &doc)?;
    }
    let stats = draw.svg(
        Affine::translate((center - w, center - h)) * Affine::scale(2.0),
        &doc,
    )?;
    eprintln!("center badge: {} shapes", stats.drawn);

    let out = std::path::PathBuf::from("target").join("svg_ring.png");
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    draw.to_rgba_image()
        .save(&out)
        .with_context(|| format!("write png '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}
