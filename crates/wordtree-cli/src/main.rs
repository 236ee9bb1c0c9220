use serde::Serialize;
use serde_json::{Value, json};
use std::io::{Read, Write};
use std::str::FromStr;
use std::sync::Arc;
use wordtree::render::raster::{self, ExportFormat, RasterError, RasterOptions};
use wordtree::render::{
    DeterministicTextMeasurer, HeadlessError, LayoutOptions, RadialLayout, TextMeasurer, Tooltip,
    TreeView,
};
use wordtree::{LabelMode, LayoutConfig, SiteConfig};

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Load(wordtree::Error),
    Render(HeadlessError),
    Raster(RasterError),
    Json(serde_json::Error),
    NoData,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Load(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::NoData => write!(f, "No records in input"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<wordtree::Error> for CliError {
    fn from(value: wordtree::Error) -> Self {
        Self::Load(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Render(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Stratify,
    Layout,
    List,
    Summary,
}

#[derive(Debug, Clone, Copy, Default)]
enum TextMeasurerKind {
    #[default]
    Deterministic,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Raster(ExportFormat),
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            other => other.parse::<ExportFormat>().map(Self::Raster).map_err(|_| ()),
        }
    }
}

#[derive(Debug)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    config_path: Option<String>,
    overrides: SiteConfig,
    text_measurer: TextMeasurerKind,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    diagram_id: Option<String>,
    tooltip: Option<String>,
    data_url: bool,
    out: Option<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            command: Command::default(),
            input: None,
            pretty: false,
            config_path: None,
            overrides: SiteConfig::empty_object(),
            text_measurer: TextMeasurerKind::default(),
            render_format: RenderFormat::default(),
            render_scale: 1.0,
            background: None,
            diagram_id: None,
            tooltip: None,
            data_url: false,
            out: None,
        }
    }
}

#[derive(Serialize)]
struct LayoutOut<'a> {
    layout: &'a RadialLayout,
    #[serde(skip_serializing_if = "Option::is_none")]
    tooltip: Option<Tooltip>,
}

fn usage() -> &'static str {
    "wordtree-cli\n\
\n\
USAGE:\n\
  wordtree-cli stratify [--pretty] [<path>|-]\n\
  wordtree-cli layout [--pretty] [LAYOUT OPTIONS] [--tooltip <id>] [<path>|-]\n\
  wordtree-cli [render] [--format svg|png|jpg] [--scale <n>] [--background <css-color>] [--id <diagram-id>] [--tooltip <id>] [--data-url] [--out <path>] [LAYOUT OPTIONS] [<path>|-]\n\
  wordtree-cli list [<path>|-]\n\
  wordtree-cli summary [<path>|-]\n\
\n\
LAYOUT OPTIONS:\n\
  --radius <px>  --angle <deg>  --font-size <px>  --labels words|steals  --playability\n\
  --size <px>  --config <json-file>  --text-measurer deterministic\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - --config is merged first; individual layout flags override it.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG output defaults to writing next to the input file (or ./out.png for stdin).\n\
  - Set RUST_LOG (e.g. RUST_LOG=debug) for diagnostics on stderr.\n\
"
}

fn parse_f64(value: Option<&String>) -> Result<f64, CliError> {
    let Some(v) = value else {
        return Err(CliError::Usage(usage()));
    };
    v.parse::<f64>().map_err(|_| CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "stratify" => args.command = Command::Stratify,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "list" => args.command = Command::List,
            "summary" => args.command = Command::Summary,
            "--pretty" => args.pretty = true,
            "--playability" => args.overrides.set_value("playability", json!(true)),
            "--data-url" => args.data_url = true,
            "--radius" => {
                let v = parse_f64(it.next())?;
                args.overrides.set_value("radius", json!(v));
            }
            "--angle" => {
                let v = parse_f64(it.next())?;
                args.overrides.set_value("angle", json!(v));
            }
            "--font-size" => {
                let v = parse_f64(it.next())?;
                args.overrides.set_value("fontSize", json!(v));
            }
            "--size" => {
                let v = parse_f64(it.next())?;
                args.overrides.set_value("imageSize", json!(v));
            }
            "--labels" => {
                let Some(mode) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let mode = mode
                    .parse::<LabelMode>()
                    .map_err(|_| CliError::Usage(usage()))?;
                args.overrides
                    .set_value("labelMode", serde_json::to_value(mode)?);
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config_path = Some(path.clone());
            }
            "--text-measurer" => {
                let Some(kind) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.text_measurer = match kind.as_str() {
                    "deterministic" => TextMeasurerKind::Deterministic,
                    _ => return Err(CliError::Usage(usage())),
                };
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--tooltip" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.tooltip = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

fn build_text_measurer(kind: TextMeasurerKind) -> Arc<dyn TextMeasurer + Send + Sync> {
    match kind {
        TextMeasurerKind::Deterministic => Arc::new(DeterministicTextMeasurer::default()),
    }
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            std::io::stdout().lock().write_all(text.as_bytes())?;
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension(ext),
        _ => std::path::PathBuf::from(format!("out.{ext}")),
    }
}

/// File config first, then the command line flags on top.
fn resolve_config(args: &Args) -> Result<LayoutConfig, CliError> {
    let mut site = match args.config_path.as_deref() {
        Some(path) => {
            let raw: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
            SiteConfig::from_value(raw)
        }
        None => SiteConfig::empty_object(),
    };
    site.deep_merge(args.overrides.as_value());
    Ok(LayoutConfig::from_site_config(&site)?)
}

fn summary_table(view: &TreeView) -> String {
    let mut out = String::from("length\twords\n");
    for (len, count) in view.length_summary() {
        out.push_str(&format!("{len}\t{count}\n"));
    }
    out
}

fn run(mut args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;

    if let Command::Stratify = args.command {
        let Some(tree) = wordtree::load(&text)? else {
            return Err(CliError::NoData);
        };
        return write_json(&tree, args.pretty);
    }

    let config = resolve_config(&args)?;
    let layout_options = LayoutOptions {
        text_measurer: build_text_measurer(args.text_measurer),
    };
    let mut view = TreeView::from_json_with(&text, config, layout_options)?;
    if view.is_empty() {
        return Err(CliError::NoData);
    }
    tracing::debug!(nodes = view.layout().nodes.len(), "loaded word tree");

    match args.command {
        Command::Stratify => Ok(()),
        Command::List => {
            let mut out = view.word_list().join("\n");
            out.push('\n');
            write_text(&out, args.out.as_deref())
        }
        Command::Summary => write_text(&summary_table(&view), args.out.as_deref()),
        Command::Layout => {
            let tooltip = match args.tooltip.as_deref() {
                Some(id) => Some(view.tooltip(id)?),
                None => None,
            };
            write_json(
                &LayoutOut {
                    layout: view.layout(),
                    tooltip,
                },
                args.pretty,
            )
        }
        Command::Render => {
            {
                let svg = view.svg_options_mut();
                svg.diagram_id = args.diagram_id.take();
                svg.tooltip_for = args.tooltip.take();
            }

            let format = match args.render_format {
                RenderFormat::Svg => {
                    let svg = view.to_svg()?;
                    return write_text(&svg, args.out.as_deref());
                }
                RenderFormat::Raster(format) => format,
            };

            let options = RasterOptions {
                scale: args.render_scale,
                background: args.background.clone(),
                ..Default::default()
            };
            let bytes = raster::export(&mut view, format, &options)?;

            if args.data_url {
                let url = raster::data_url(&bytes, format);
                return write_text(&format!("{url}\n"), args.out.as_deref());
            }

            let out = args.out.clone().unwrap_or_else(|| {
                default_raster_out_path(args.input.as_deref(), format.extension())
                    .to_string_lossy()
                    .to_string()
            });
            if out == "-" {
                std::io::stdout().lock().write_all(&bytes)?;
            } else {
                std::fs::write(out, bytes)?;
            }
            Ok(())
        }
    }
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::NoData) => {
            eprintln!("{}", CliError::NoData);
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
