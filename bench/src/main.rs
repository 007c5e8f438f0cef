use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Context as _;
use serde_json::json;
use sha2::Digest as _;

#[derive(Clone, Debug)]
struct BenchArgs {
    width: u32,
    height: u32,
    shapes: u32,
    warmup: u32,
    repeats: u32,
    seed: u64,
    svg: Option<PathBuf>,
    antialias: bool,
    json_out: Option<PathBuf>,
}

#[derive(Clone, Debug, Default)]
struct RunMetrics {
    queue_total: Duration,
    svg_total: Duration,
    flush_total: Duration,
    wall_total: Duration,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = parse_args()?;
    if args.width == 0 || args.height == 0 {
        anyhow::bail!("--width/--height must be > 0");
    }
    if args.repeats == 0 {
        anyhow::bail!("--repeats must be > 0");
    }

    let svg = match &args.svg {
        Some(path) => {
            let src = std::fs::read_to_string(path)
                .with_context(|| format!("read svg '{}'", path.display()))?;
            Some(vecdraw::SvgDocument::parse(&src).with_context(|| "parse svg")?)
        }
        None => None,
    };

    eprintln!(
        "vecdraw-bench: {}x{} shapes={} svg={} warmup={} repeats={} antialias={}",
        args.width,
        args.height,
        args.shapes,
        args.svg
            .as_ref()
            .map_or_else(|| "-".to_string(), |p| p.display().to_string()),
        args.warmup,
        args.repeats,
        args.antialias
    );

    let mut digest = String::new();
    for _ in 0..args.warmup {
        run_once(&args, svg.as_ref())?;
    }
    let mut runs = Vec::<RunMetrics>::with_capacity(args.repeats as usize);
    for i in 0..args.repeats {
        let (metrics, bytes) = run_once(&args, svg.as_ref())?;
        let hex = sha256_hex(&bytes);
        if i == 0 {
            digest = hex;
        } else if hex != digest {
            anyhow::bail!("run {i} produced different pixels ({hex} vs {digest})");
        }
        runs.push(metrics);
    }

    eprintln!("output sha256: {digest}");
    let report = report_percentiles(&runs);
    if let Some(path) = &args.json_out {
        let body = json!({
            "width": args.width,
            "height": args.height,
            "shapes": args.shapes,
            "repeats": args.repeats,
            "sha256": digest,
            "percentiles_ms": report,
        });
        std::fs::write(path, serde_json::to_string_pretty(&body)?)
            .with_context(|| format!("write report '{}'", path.display()))?;
    }
    Ok(())
}

/// Deterministic xorshift so every run draws the same scene.
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.unit()
    }

    fn color(&mut self) -> vecdraw::Color {
        let v = self.next_u64();
        vecdraw::Color::rgba(v as u8, (v >> 8) as u8, (v >> 16) as u8, 96 + (v >> 24) as u8 % 160)
    }
}

fn queue_scene(draw: &mut vecdraw::Draw<'_>, args: &BenchArgs) -> anyhow::Result<()> {
    let mut rng = Rng(args.seed.max(1));
    let (w, h) = (f64::from(args.width), f64::from(args.height));
    let gradient = vecdraw::Gradient::linear(
        (0.0, 0.0),
        (1.0, 1.0),
        vec![
            vecdraw::GradientStop::new(0.0, vecdraw::Color::rgb(250, 120, 20)),
            vecdraw::GradientStop::new(1.0, vecdraw::Color::rgb(20, 80, 220)),
        ],
    )
    .with_units(vecdraw::GradientUnits::ObjectBoundingBox);
    let gradient = vecdraw::Paint::from(gradient);

    for i in 0..args.shapes {
        let x = rng.range(-0.1 * w, w);
        let y = rng.range(-0.1 * h, h);
        let (rw, rh) = (rng.range(4.0, w * 0.25), rng.range(4.0, h * 0.25));
        let rect = vecdraw::Rect::new(x, y, x + rw, y + rh);
        let brush = if i % 5 == 0 {
            vecdraw::Brush::new(gradient.clone())
        } else {
            vecdraw::Brush::new(rng.color())
        };
        let pen = vecdraw::Pen::new(rng.color(), rng.range(0.0, 6.0))?
            .with_cap(vecdraw::LineCap::Round)
            .with_join(vecdraw::LineJoin::Round);
        match i % 4 {
            0 => draw.rectangle(rect, Some(&brush), Some(&pen))?,
            1 => draw.ellipse(rect, Some(&brush), Some(&pen))?,
            2 => {
                let (start, end) = (rng.range(0.0, 360.0), rng.range(0.0, 360.0));
                draw.pieslice(rect, start, end, Some(&brush), None)?;
            }
            _ => {
                let pts: Vec<vecdraw::Point> = (0..6)
                    .map(|_| vecdraw::Point::new(rng.range(0.0, w), rng.range(0.0, h)))
                    .collect();
                let pen = pen.with_dash(vecdraw::DashPattern::new([12.0, 6.0], 0.0)?);
                draw.line(&pts, &pen)?;
            }
        }
    }
    Ok(())
}

fn run_once(
    args: &BenchArgs,
    svg: Option<&vecdraw::SvgDocument>,
) -> anyhow::Result<(RunMetrics, Vec<u8>)> {
    let wall = Instant::now();
    let mut metrics = RunMetrics::default();
    let opts = vecdraw::DrawOpts::from_env().with_antialias(args.antialias);
    let mut draw = vecdraw::Draw::new_owned(
        args.width,
        args.height,
        vecdraw::PixelFormat::Rgba8,
        vecdraw::Color::WHITE,
    )?
    .with_opts(opts)?;

    let t = Instant::now();
    queue_scene(&mut draw, args)?;
    metrics.queue_total = t.elapsed();

    if let Some(doc) = svg {
        let t = Instant::now();
        draw.svg((0.0, 0.0), doc)?;
        metrics.svg_total = t.elapsed();
    }

    let t = Instant::now();
    draw.flush();
    metrics.flush_total = t.elapsed();

    let bytes = draw.into_owned_bytes()?;
    metrics.wall_total = wall.elapsed();
    Ok((metrics, bytes))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

fn parse_args() -> anyhow::Result<BenchArgs> {
    let mut args = std::env::args().skip(1);

    let mut out = BenchArgs {
        width: 640,
        height: 360,
        shapes: 500,
        warmup: 1,
        repeats: 50,
        seed: 0x5EED,
        svg: None,
        antialias: true,
        json_out: None,
    };

    while let Some(a) = args.next() {
        match a.as_str() {
            "--width" => out.width = parse_u32(args.next(), "--width")?,
            "--height" => out.height = parse_u32(args.next(), "--height")?,
            "--shapes" => out.shapes = parse_u32(args.next(), "--shapes")?,
            "--warmup" => out.warmup = parse_u32(args.next(), "--warmup")?,
            "--repeats" => out.repeats = parse_u32(args.next(), "--repeats")?,
            "--seed" => {
                let v = args.next().ok_or_else(|| anyhow::anyhow!("missing value for --seed"))?;
                out.seed = v
                    .parse::<u64>()
                    .with_context(|| format!("parse --seed value '{v}'"))?;
            }
            "--svg" => {
                out.svg = Some(PathBuf::from(args.next().ok_or_else(|| {
                    anyhow::anyhow!("missing value for --svg (expected a path)")
                })?))
            }
            "--json" => {
                out.json_out = Some(PathBuf::from(args.next().ok_or_else(|| {
                    anyhow::anyhow!("missing value for --json (expected a path)")
                })?))
            }
            "--no-aa" => out.antialias = false,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => anyhow::bail!("unknown arg '{a}' (try --help)"),
        }
    }

    Ok(out)
}

fn print_help() {
    eprintln!(
        r#"vecdraw-bench

Draws a generated scene repeatedly and reports p50/p90/p99 for each stage.

Usage:
  cargo run -q --release
  cargo run -q --release -- --shapes 2000 --repeats 100
  cargo run -q --release -- --svg assets/tiger.svg

Args:
  --width N        (default 640)
  --height N       (default 360)
  --shapes N       generated primitives per run (default 500)
  --warmup N       (default 1)
  --repeats N      (default 50)
  --seed N         scene seed (default 24301)
  --svg PATH       also render this SVG document each run
  --json PATH      write the percentile report as JSON
  --no-aa          disable anti-aliasing
"#
    );
}

fn parse_u32(v: Option<String>, flag: &str) -> anyhow::Result<u32> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<u32>()
        .with_context(|| format!("parse {flag} value '{v}'"))
}

fn report_percentiles(runs: &[RunMetrics]) -> serde_json::Value {
    type Getter = fn(&RunMetrics) -> Duration;
    type Field = (&'static str, Getter);

    fn collect(runs: &[RunMetrics], f: fn(&RunMetrics) -> Duration) -> Vec<Duration> {
        let mut v = runs.iter().map(f).collect::<Vec<_>>();
        v.sort_by_key(|d| d.as_nanos());
        v
    }

    fn p(v: &[Duration], p: f64) -> Duration {
        if v.is_empty() {
            return Duration::ZERO;
        }
        let n = v.len();
        let rank = (p * (n as f64)).ceil().clamp(1.0, n as f64) as usize;
        v[rank - 1]
    }

    fn ms(d: Duration) -> f64 {
        d.as_secs_f64() * 1000.0
    }

    let fields: &[Field] = &[
        ("queue_total", |m| m.queue_total),
        ("svg_total", |m| m.svg_total),
        ("flush_total", |m| m.flush_total),
        ("wall_total", |m| m.wall_total),
    ];

    let mut report = serde_json::Map::new();
    eprintln!("\npercentiles across runs (p50/p90/p99):");
    for (name, getter) in fields {
        let v = collect(runs, *getter);
        let (p50, p90, p99) = (p(&v, 0.50), p(&v, 0.90), p(&v, 0.99));
        eprintln!(
            "  {name:12} p50={:>10.3}ms  p90={:>10.3}ms  p99={:>10.3}ms",
            ms(p50),
            ms(p90),
            ms(p99),
            name = *name,
        );
        report.insert(
            (*name).to_string(),
            json!({ "p50": ms(p50), "p90": ms(p90), "p99": ms(p99) }),
        );
    }
    serde_json::Value::Object(report)
}
