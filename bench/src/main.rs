use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Context as _;
use serde_json::json;
use sha2::Digest as _;

/// Outline used when neither `--svg` nor `--font` is given: a rounded frame
/// with a star cut out, enough corners and curves to exercise every stage.
const DEFAULT_PATH: &str = "M10,2 L90,2 Q98,2 98,10 L98,90 Q98,98 90,98 L10,98 Q2,98 2,90 L2,10 Q2,2 10,2 Z \
     M50,15 L58,40 L85,40 L63,56 L71,82 L50,66 L29,82 L37,56 L15,40 L42,40 Z";

#[derive(Clone, Debug)]
struct BenchArgs {
    width: u32,
    height: u32,
    range_px: f64,
    warmup: u32,
    repeats: u32,
    kind: Kind,
    coloring: msdf::ColoringStrategy,
    correction: msdf::ErrorCorrectionMode,
    svg: Option<PathBuf>,
    font: Option<PathBuf>,
    glyph: char,
    out: Option<PathBuf>,
    parallel: bool,
    threads: Option<usize>,
}

#[derive(Clone, Copy, Debug)]
enum Kind {
    Sdf,
    Psdf,
    Msdf,
    Mtsdf,
}

#[derive(Clone, Debug, Default)]
struct RunMetrics {
    color_total: Duration,
    generate_total: Duration,
    export_total: Duration,
    wall_total: Duration,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;

    if args.width == 0 || args.height == 0 {
        anyhow::bail!("--width/--height must be > 0");
    }
    if !(args.range_px.is_finite() && args.range_px > 0.0) {
        anyhow::bail!("--range must be finite and > 0");
    }
    if let Some(n) = args.threads
        && n == 0
    {
        anyhow::bail!("--threads must be >= 1 when set");
    }

    let mut shape = load_shape(&args)?;
    shape.normalize();
    shape.orient_contours();
    eprintln!(
        "shape: {} contour(s), {} edge(s)",
        shape.contour_count(),
        shape.edge_count()
    );

    let framing = msdf::auto_frame(&shape, args.width, args.height, args.range_px)?;
    let transform = framing.transform(args.range_px)?;

    let config = msdf::MsdfGeneratorConfig {
        generator: msdf::GeneratorConfig {
            threading: msdf::Threading {
                parallel: args.parallel,
                threads: args.threads,
            },
            ..msdf::GeneratorConfig::default()
        },
        error_correction: msdf::ErrorCorrectionConfig {
            mode: args.correction,
            ..msdf::ErrorCorrectionConfig::default()
        },
    };

    if args.warmup > 0 {
        eprintln!("warmup: {} run(s)", args.warmup);
        for i in 0..args.warmup {
            let _ = run_once(&args, &shape, &transform, &config, i, /*is_warmup=*/ true)?;
        }
    }

    let mut runs = Vec::with_capacity(args.repeats as usize);
    let mut digest = None;
    for i in 0..args.repeats {
        let (m, d) = run_once(&args, &shape, &transform, &config, i, false)?;
        if let Some(prev) = &digest
            && prev != &d
        {
            anyhow::bail!("run {i:03} produced different output ({d} vs {prev})");
        }
        digest = Some(d);
        runs.push(m);
    }

    report_percentiles(&runs);

    let summary = json!({
        "kind": format!("{:?}", args.kind),
        "width": args.width,
        "height": args.height,
        "range_px": args.range_px,
        "framing": framing,
        "config": config,
        "repeats": args.repeats,
        "sha256": digest,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn load_shape(args: &BenchArgs) -> anyhow::Result<msdf::Shape> {
    if let Some(path) = &args.svg {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read svg path data '{}'", path.display()))?;
        return Ok(msdf::parse_svg_path(text.trim(), 0.0)?);
    }
    if let Some(path) = &args.font {
        use msdf::GlyphSource as _;
        let font = msdf::TtfFont::open(path)?;
        let (shape, advance) =
            font.load_glyph(msdf::GlyphRef::Char(args.glyph), msdf::FontScaling::EmNormalized)?;
        eprintln!("glyph '{}': advance {advance:.4} em", args.glyph);
        return Ok(shape);
    }
    Ok(msdf::parse_svg_path(DEFAULT_PATH, 0.0)?)
}

fn parse_args() -> anyhow::Result<BenchArgs> {
    let mut args = std::env::args().skip(1);

    let mut out = BenchArgs {
        width: 64,
        height: 64,
        range_px: 4.0,
        warmup: 1,
        repeats: 100,
        kind: Kind::Msdf,
        coloring: msdf::ColoringStrategy::Simple,
        correction: msdf::ErrorCorrectionMode::EdgePriority,
        svg: None,
        font: None,
        glyph: 'A',
        out: None,
        parallel: false,
        threads: None,
    };

    while let Some(a) = args.next() {
        match a.as_str() {
            "--width" => out.width = parse_u32(args.next(), "--width")?,
            "--height" => out.height = parse_u32(args.next(), "--height")?,
            "--range" => out.range_px = parse_f64(args.next(), "--range")?,
            "--warmup" => out.warmup = parse_u32(args.next(), "--warmup")?,
            "--repeats" => out.repeats = parse_u32(args.next(), "--repeats")?,
            "--kind" => {
                let v = next_value(args.next(), "--kind")?;
                out.kind = match v.as_str() {
                    "sdf" => Kind::Sdf,
                    "psdf" => Kind::Psdf,
                    "msdf" => Kind::Msdf,
                    "mtsdf" => Kind::Mtsdf,
                    _ => anyhow::bail!("unknown --kind '{v}' (expected sdf|psdf|msdf|mtsdf)"),
                };
            }
            "--coloring" => {
                let v = next_value(args.next(), "--coloring")?;
                out.coloring = match v.as_str() {
                    "simple" => msdf::ColoringStrategy::Simple,
                    "inktrap" => msdf::ColoringStrategy::InkTrap,
                    "distance" => msdf::ColoringStrategy::ByDistance,
                    _ => anyhow::bail!(
                        "unknown --coloring '{v}' (expected simple|inktrap|distance)"
                    ),
                };
            }
            "--correction" => {
                let v = next_value(args.next(), "--correction")?;
                out.correction = match v.as_str() {
                    "disabled" => msdf::ErrorCorrectionMode::Disabled,
                    "indiscriminate" => msdf::ErrorCorrectionMode::Indiscriminate,
                    "edge-priority" => msdf::ErrorCorrectionMode::EdgePriority,
                    "edge-only" => msdf::ErrorCorrectionMode::EdgeOnly,
                    _ => anyhow::bail!(
                        "unknown --correction '{v}' (expected disabled|indiscriminate|edge-priority|edge-only)"
                    ),
                };
            }
            "--svg" => out.svg = Some(PathBuf::from(next_value(args.next(), "--svg")?)),
            "--font" => out.font = Some(PathBuf::from(next_value(args.next(), "--font")?)),
            "--glyph" => {
                let v = next_value(args.next(), "--glyph")?;
                let mut chars = v.chars();
                out.glyph = match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => anyhow::bail!("--glyph expects exactly one character, got '{v}'"),
                };
            }
            "--out" => out.out = Some(PathBuf::from(next_value(args.next(), "--out")?)),
            "--parallel" => out.parallel = true,
            "--threads" => out.threads = Some(parse_usize(args.next(), "--threads")?),
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
        r#"msdf-bench

Generates one distance field repeatedly and reports p50/p90/p99 for each stage.
Prints a JSON summary (config, framing, output digest) on stdout.

Usage:
  cargo run -q --release
  cargo run -q --release -- --kind mtsdf --width 128 --height 128
  cargo run -q --release -- --font path/to/font.ttf --glyph g
  cargo run -q --release -- --parallel --threads 4

Args:
  --width N          (default 64)
  --height N         (default 64)
  --range PX         distance range in pixels (default 4)
  --warmup N         (default 1)
  --repeats N        (default 100)
  --kind K           sdf|psdf|msdf|mtsdf (default msdf)
  --coloring S       simple|inktrap|distance (default simple)
  --correction M     disabled|indiscriminate|edge-priority|edge-only (default edge-priority)
  --svg PATH         file holding SVG path data
  --font PATH        TrueType/OpenType font
  --glyph C          glyph to load with --font (default A)
  --out PATH         write the last run as PNG
  --parallel         row-parallel generation and error correction
  --threads N        worker threads for parallel mode (default auto)
"#
    );
}

fn next_value(v: Option<String>, flag: &str) -> anyhow::Result<String> {
    v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn parse_u32(v: Option<String>, flag: &str) -> anyhow::Result<u32> {
    let v = next_value(v, flag)?;
    v.parse::<u32>()
        .with_context(|| format!("parse {flag} value '{v}'"))
}

fn parse_usize(v: Option<String>, flag: &str) -> anyhow::Result<usize> {
    let v = next_value(v, flag)?;
    v.parse::<usize>()
        .with_context(|| format!("parse {flag} value '{v}'"))
}

fn parse_f64(v: Option<String>, flag: &str) -> anyhow::Result<f64> {
    let v = next_value(v, flag)?;
    v.parse::<f64>()
        .with_context(|| format!("parse {flag} value '{v}'"))
}

fn run_once(
    args: &BenchArgs,
    shape: &msdf::Shape,
    transform: &msdf::SdfTransform,
    config: &msdf::MsdfGeneratorConfig,
    run_idx: u32,
    is_warmup: bool,
) -> anyhow::Result<(RunMetrics, String)> {
    let wall = Instant::now();
    let mut m = RunMetrics::default();

    let t0 = Instant::now();
    let mut shape = shape.clone();
    msdf::color_edges(
        &mut shape,
        &msdf::ColoringConfig {
            strategy: args.coloring,
            ..msdf::ColoringConfig::default()
        },
    )?;
    m.color_total = t0.elapsed();

    let t1 = Instant::now();
    let (w, h) = (args.width, args.height);
    let bitmap = match args.kind {
        Kind::Sdf => msdf::generate_sdf(&shape, w, h, transform, &config.generator)?,
        Kind::Psdf => msdf::generate_psdf(&shape, w, h, transform, &config.generator)?,
        Kind::Msdf => msdf::generate_msdf(&shape, w, h, transform, config)?,
        Kind::Mtsdf => msdf::generate_mtsdf(&shape, w, h, transform, config)?,
    };
    m.generate_total = t1.elapsed();

    let t2 = Instant::now();
    let bytes = bitmap.to_bytes(128);
    if let Some(path) = &args.out
        && !is_warmup
        && run_idx + 1 == args.repeats
    {
        let written = match bitmap.channels() {
            1 => bitmap.to_luma8(128)?.save(path),
            3 => bitmap.to_rgb8(128)?.save(path),
            _ => bitmap.to_rgba8(128)?.save(path),
        };
        written.with_context(|| format!("write '{}'", path.display()))?;
    }
    m.export_total = t2.elapsed();

    m.wall_total = wall.elapsed();

    if !is_warmup {
        eprintln!(
            "run {run_idx:03}: wall={wall:.3}ms color={co:.3}ms generate={ge:.3}ms export={ex:.3}ms mode={mode}",
            wall = m.wall_total.as_secs_f64() * 1000.0,
            co = m.color_total.as_secs_f64() * 1000.0,
            ge = m.generate_total.as_secs_f64() * 1000.0,
            ex = m.export_total.as_secs_f64() * 1000.0,
            mode = if args.parallel { "parallel" } else { "sequential" },
        );
    }

    Ok((m, sha256_hex(&bytes)))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut s = String::with_capacity(digest.len() * 2);
    for b in digest {
        s.push_str(&format!("{b:02x}"));
    }
    s
}

fn report_percentiles(runs: &[RunMetrics]) {
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

    fn fmt_ms(d: Duration) -> String {
        format!("{:.3}ms", d.as_secs_f64() * 1000.0)
    }

    let fields: &[Field] = &[
        ("color_total", |m| m.color_total),
        ("generate_total", |m| m.generate_total),
        ("export_total", |m| m.export_total),
        ("wall_total", |m| m.wall_total),
    ];

    eprintln!("\npercentiles across runs (p50/p90/p99):");
    for (name, getter) in fields {
        let v = collect(runs, *getter);
        eprintln!(
            "  {name:14} p50={p50:>10}  p90={p90:>10}  p99={p99:>10}",
            name = *name,
            p50 = fmt_ms(p(&v, 0.50)),
            p90 = fmt_ms(p(&v, 0.90)),
            p99 = fmt_ms(p(&v, 0.99))
        );
    }
}
