use panelcraft::render::{RasterFormat, RasterImage, RenderError};
use panelcraft::{
    Configurator, ConfiguratorError, EngineConfig, MotifSpec, Plate, PlateList, RowLayout,
    SocketBoard, SocketCircle, SocketGroup, SurfaceBox,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Config(panelcraft::Error),
    Configurator(ConfiguratorError),
    Render(RenderError),
    NothingToRender(&'static str),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Config(err) => write!(f, "invalid config: {err}"),
            CliError::Configurator(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::NothingToRender(why) => write!(f, "nothing to render: {why}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<ConfiguratorError> for CliError {
    fn from(value: ConfiguratorError) -> Self {
        Self::Configurator(value)
    }
}

impl From<RenderError> for CliError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Render,
}

#[derive(Debug, Clone, Copy, Default)]
enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(()),
        }
    }
}

impl From<OutputFormat> for RasterFormat {
    fn from(value: OutputFormat) -> Self {
        match value {
            OutputFormat::Png => RasterFormat::Png,
            OutputFormat::Jpeg => RasterFormat::Jpeg,
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    format: OutputFormat,
    box_width: f64,
    box_height: f64,
    motif: Option<String>,
    socket_icon: Option<String>,
    background: Option<String>,
    out: Option<String>,
}

/// Scene file: the plate row, its socket groups and optional motif size/config overrides.
#[derive(Debug, Deserialize)]
struct SceneFile {
    plates: Vec<Plate>,
    #[serde(default)]
    socket_groups: Vec<SocketGroup>,
    #[serde(default)]
    sockets_enabled: bool,
    #[serde(default)]
    motif: Option<MotifSpec>,
    #[serde(default)]
    config: Option<Value>,
}

#[derive(Serialize)]
struct ViolationOut {
    group_id: String,
    message: String,
}

#[derive(Serialize)]
struct LayoutOut<'a> {
    layout: Option<&'a RowLayout>,
    sockets_enabled: bool,
    sockets: Vec<SocketCircle>,
    violations: Vec<ViolationOut>,
}

fn usage() -> &'static str {
    "panelcraft-cli\n\
\n\
USAGE:\n\
  panelcraft-cli [layout] [--pretty] [--box-width <w>] [--box-height <h>] [<scene.json>|-]\n\
  panelcraft-cli render --motif <image> [--format png|jpg] [--socket-icon <image>] [--box-width <w>] [--box-height <h>] [--background <css-color>] [--out <path>] [<scene.json>|-]\n\
\n\
NOTES:\n\
  - If <scene.json> is omitted or '-', the scene is read from stdin.\n\
  - layout prints plate geometry, socket circles and rule violations as JSON.\n\
  - render output defaults to writing next to the scene file (or ./out.<ext> for stdin).\n\
  - Set PANELCRAFT_LOG (e.g. debug) for diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        box_width: 800.0,
        box_height: 200.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<OutputFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--box-width" | "--box-height" => {
                let Some(v) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let v = v.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(v.is_finite() && v > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
                if a == "--box-width" {
                    args.box_width = v;
                } else {
                    args.box_height = v;
                }
            }
            "--motif" | "--socket-icon" | "--out" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let slot = match a.as_str() {
                    "--motif" => &mut args.motif,
                    "--socket-icon" => &mut args.socket_icon,
                    _ => &mut args.out,
                };
                *slot = Some(path.clone());
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
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
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension(ext),
        _ => std::path::PathBuf::from(format!("out.{ext}")),
    }
}

fn load_image(path: &str) -> Result<RasterImage, CliError> {
    let bytes = std::fs::read(path)?;
    Ok(RasterImage::decode(&bytes)?)
}

fn build_session(scene: SceneFile, surface: SurfaceBox) -> Result<Configurator, CliError> {
    let config = match scene.config {
        Some(value) => EngineConfig::from_value(value).map_err(CliError::Config)?,
        None => EngineConfig::default(),
    };
    let board = SocketBoard::new(scene.sockets_enabled, scene.socket_groups);
    let plates = PlateList::new(scene.plates);
    let mut session = Configurator::from_parts(config, plates, board, surface);
    if let Some(spec) = scene.motif {
        session.set_motif_spec(spec)?;
    }
    Ok(session)
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let scene: SceneFile = serde_json::from_str(&text)?;
    tracing::debug!(
        plates = scene.plates.len(),
        groups = scene.socket_groups.len(),
        "scene loaded"
    );
    let surface = SurfaceBox::new(args.box_width, args.box_height);
    let mut session = build_session(scene, surface)?;

    match args.command {
        Command::Layout => {
            let layout = session.layout();
            let violations = session
                .violations()
                .into_iter()
                .map(|(group_id, err)| ViolationOut {
                    group_id,
                    message: err.to_string(),
                })
                .collect();
            let out = LayoutOut {
                layout: layout.as_ref(),
                sockets_enabled: session.board().is_enabled(),
                sockets: session.socket_circles(),
                violations,
            };
            write_json(&out, args.pretty)
        }
        Command::Render => {
            let Some(motif_path) = args.motif.as_deref() else {
                return Err(CliError::NothingToRender("no motif image given (--motif)"));
            };
            session.set_motif_image(load_image(motif_path)?);
            if let Some(icon_path) = args.socket_icon.as_deref() {
                session.set_socket_icon(Some(load_image(icon_path)?));
            }

            let mut options = session.render_options();
            if let Some(bg) = args.background {
                options.style.background = bg;
            }
            let format = RasterFormat::from(args.format);
            let Some(bytes) = session.render(format, &options)? else {
                return Err(CliError::NothingToRender("no drawable plates"));
            };

            let out = match args.out.as_deref() {
                Some(path) => std::path::PathBuf::from(path),
                None => default_raster_out_path(args.input.as_deref(), format.extension()),
            };
            std::fs::write(&out, bytes)?;
            tracing::info!(path = %out.display(), "raster written");
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("PANELCRAFT_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

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
        Err(err @ CliError::NothingToRender(_)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
