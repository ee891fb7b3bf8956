//! Purpose: `scenekeys` CLI entry point.
//! Role: Binary crate root; parses flags, scans the fixed scene file, prints pairs on stdout.
//! Invariants: The input path is fixed; no flag or env var changes it.
//! Invariants: Errors are emitted on stderr (human text on a tty, JSON otherwise).
//! Invariants: Process exit code is derived from `to_exit_code`.
use std::error::Error as StdError;
use std::io::{self, IsTerminal, Write};

use clap::{Parser, ValueEnum, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

use scenekeys::render::{OutputFormat, render_pairs};
use scenekeys::scene::{self, SCENE_PATH};
use scenekeys::{Error, ErrorKind, scan, to_exit_code};

#[derive(Parser)]
#[command(
    name = "scenekeys",
    version,
    about = "List the distinct key/value-type pairs of the scene's objects",
    long_about = None,
    after_help = r#"INPUT
  Reads ./test/output/scene.json relative to the working directory.

EXAMPLES
  $ scenekeys
  ("alpha", number)
  ("name", string)
  $ scenekeys --format jsonl"#
)]
struct Cli {
    #[arg(
        long,
        default_value = "text",
        value_enum,
        help = "Line format for each pair: text|jsonl"
    )]
    format: FormatArg,
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize text output and stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FormatArg {
    Text,
    Jsonl,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Jsonl => OutputFormat::Jsonl,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(exit_code) => exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<i32, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Internal)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                return Ok(0);
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint("Run `scenekeys --help` for the accepted flags."),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    scan_scene(cli.format.into(), color_mode).map_err(|err| (err, color_mode))?;
    Ok(0)
}

fn scan_scene(format: OutputFormat, color_mode: ColorMode) -> Result<(), Error> {
    let document = scene::load(SCENE_PATH)?;
    let observed = scan::scan_document(&document);
    if observed.is_empty() {
        tracing::debug!("no key/type pairs observed");
        return Ok(());
    }

    let use_color = color_mode.use_color(io::stdout().is_terminal());
    let lines = render_pairs(&observed, format, use_color);
    write_lines(&mut io::stdout().lock(), &lines)
}

// A closed reader (e.g. `| head -1`) ends output quietly.
fn write_lines(out: &mut impl Write, lines: &[String]) -> Result<(), Error> {
    let result = lines
        .iter()
        .try_for_each(|line| writeln!(out, "{line}"))
        .and_then(|()| out.flush());
    match result {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!("stdout closed before all pairs were written");
            Ok(())
        }
        Err(err) => Err(Error::new(ErrorKind::Internal)
            .with_message("failed to write to stdout")
            .with_source(err)),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn clap_error_summary(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.trim_start_matches("error: ").to_string())
        .unwrap_or_else(|| "invalid arguments".to_string())
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Input => "cannot load scene file".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    let mut headline = format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    );
    if let Some(path) = err.path() {
        headline.push_str(&format!(" ({})", path.display()));
    }
    lines.push(headline);

    for cause in error_causes(err) {
        lines.push(format!("  caused by: {cause}"));
    }

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}
