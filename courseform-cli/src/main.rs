use std::fmt::Write as FmtWrite;
use std::fs::{self, File};
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Report, Result, WrapErr, eyre};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use courseform::{
    Course, CourseFormUi,
    io::{
        DocumentFormat, OutputDestination, OutputOptions, course_from_value, emit,
        parse_document_str,
    },
};

const LOG_ENV: &str = "COURSEFORM_LOG";

#[derive(Debug, Parser)]
#[command(
    name = "courseform",
    version,
    about = "Create or edit a course record in an interactive terminal form"
)]
struct Cli {
    /// Course to edit: file path, inline payload, or "-" for stdin. Omit to create a new course
    #[arg(short = 'c', long = "course", value_name = "SOURCE")]
    course: Option<String>,

    /// Output destinations ("-" writes to stdout). Defaults to stdout
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Emit compact JSON/TOML rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Overwrite output files even if they already exist
    #[arg(short = 'f', long = "force", short_alias = 'y', alias = "yes")]
    force: bool,

    /// Start with the submit button showing the busy marker
    #[arg(long = "loading")]
    loading: bool,

    /// Append diagnostic logs to this file (filter with COURSEFORM_LOG)
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Some(path) = cli.log_file.as_deref() {
        init_logging(path)?;
    }

    let mut diagnostics = DiagnosticCollector::default();

    let course_arg = cli.course.as_deref();
    let course_hint = resolve_format_hint(course_arg, &mut diagnostics);
    let course = load_course(course_arg, course_hint, &mut diagnostics);

    let (output_options, output_paths) = build_output_options(&cli, course_hint, &mut diagnostics);
    ensure_output_paths_available(&output_paths, cli.force, &mut diagnostics);

    if !io::stdout().is_terminal() && output_options.writes_stdout() {
        diagnostics.push_output(
            "stdout is not a terminal; pass --output <FILE> so the form can draw on the terminal",
        );
    }

    diagnostics.into_result()?;

    let mut ui = CourseFormUi::new().with_loading(cli.loading);
    if let Some(course) = course {
        info!(code = %course.code, "editing existing course");
        ui = ui.with_initial_values(course);
    }

    let Some(payload) = ui.run().map_err(Report::msg)? else {
        return Err(eyre!("exited without submitting a course"));
    };

    let written = emit(&payload, &output_options).map_err(Report::msg)?;
    info!(destinations = written, "payload written");
    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .try_init()
        .wrap_err("failed to install log subscriber")?;
    Ok(())
}

trait StdoutTarget {
    fn writes_stdout(&self) -> bool;
}

impl StdoutTarget for OutputOptions {
    fn writes_stdout(&self) -> bool {
        self.destinations
            .iter()
            .any(|dest| matches!(dest, OutputDestination::Stdout))
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct FormatHint {
    format: DocumentFormat,
    from_extension: bool,
}

impl FormatHint {
    fn extension_value(&self) -> Option<DocumentFormat> {
        self.from_extension.then_some(self.format)
    }
}

fn resolve_format_hint(source: Option<&str>, diagnostics: &mut DiagnosticCollector) -> FormatHint {
    let Some(path) = source.filter(|path| *path != "-") else {
        return FormatHint::default();
    };
    match probe_format_from_extension(Path::new(path)) {
        ExtensionFormat::Known(format) => FormatHint {
            format,
            from_extension: true,
        },
        ExtensionFormat::UnsupportedFeature {
            format_name,
            feature_flag,
        } => {
            diagnostics.push_input(format!(
                "course '{path}' requires {format_name} support, but this build lacks the '{feature_flag}' feature"
            ));
            FormatHint::default()
        }
        ExtensionFormat::Unknown => FormatHint::default(),
    }
}

fn load_course(
    source: Option<&str>,
    hint: FormatHint,
    diagnostics: &mut DiagnosticCollector,
) -> Option<Course> {
    let raw = source?;
    let loaded = load_value(raw, hint.format)
        .and_then(|value| course_from_value(value).map_err(Report::msg));
    match loaded {
        Ok(course) => Some(course),
        Err(err) => {
            diagnostics.push_input(err.to_string());
            None
        }
    }
}

fn load_value(source: &str, format: DocumentFormat) -> Result<Value> {
    if source == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .wrap_err("failed to read from stdin")?;
        return parse_contents(&buffer, format, "course");
    }

    let path = PathBuf::from(source);
    match fs::read_to_string(&path) {
        Ok(contents) => parse_contents(&contents, format, "course"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            parse_contents(source, format, "inline course")
        }
        Err(err) => Err(err)
            .wrap_err_with(|| format!("failed to load course from {}", path.display())),
    }
}

fn parse_contents(contents: &str, format: DocumentFormat, label: &str) -> Result<Value> {
    match parse_document_str(contents, format) {
        Ok(value) => Ok(value),
        Err(primary) => {
            for candidate in DocumentFormat::available_formats() {
                if candidate == format {
                    continue;
                }
                if let Ok(value) = parse_document_str(contents, candidate) {
                    return Ok(value);
                }
            }
            Err(eyre!(
                "failed to parse {label}: tried {} (first error: {primary})",
                format_list()
            ))
        }
    }
}

fn format_list() -> String {
    DocumentFormat::available_formats()
        .into_iter()
        .map(|fmt| fmt.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_input(&mut self, message: impl Into<String>) {
        self.messages
            .push(format!("input (course): {}", message.into()));
    }

    fn push_output(&mut self, message: impl Into<String>) {
        self.messages.push(format!("output: {}", message.into()));
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered input/output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}

fn build_output_options(
    cli: &Cli,
    course_hint: FormatHint,
    diagnostics: &mut DiagnosticCollector,
) -> (OutputOptions, Vec<PathBuf>) {
    let mut destinations = Vec::new();
    for raw in &cli.outputs {
        if raw.trim().is_empty() {
            diagnostics.push_output("output destination cannot be empty");
        } else if raw == "-" {
            destinations.push(OutputDestination::Stdout);
        } else {
            destinations.push(OutputDestination::file(raw));
        }
    }
    if destinations.is_empty() {
        destinations.push(OutputDestination::Stdout);
    }

    let file_paths: Vec<PathBuf> = destinations
        .iter()
        .filter_map(|dest| match dest {
            OutputDestination::File(path) => Some(path.clone()),
            OutputDestination::Stdout => None,
        })
        .collect();

    let format = if file_paths.is_empty() {
        course_hint.extension_value().unwrap_or_default()
    } else {
        infer_format_from_files(&file_paths, diagnostics).unwrap_or_default()
    };

    let options = OutputOptions::new(format)
        .with_pretty(!cli.no_pretty)
        .with_destinations(destinations);
    (options, file_paths)
}

fn infer_format_from_files(
    file_paths: &[PathBuf],
    diagnostics: &mut DiagnosticCollector,
) -> Option<DocumentFormat> {
    let mut detected: Option<DocumentFormat> = None;
    for path in file_paths {
        match probe_format_from_extension(path) {
            ExtensionFormat::Known(format) => match detected {
                Some(existing) if existing != format => diagnostics.push_output(format!(
                    "output file {} uses {format} but other destinations use {existing}; align extensions",
                    path.display()
                )),
                Some(_) => {}
                None => detected = Some(format),
            },
            ExtensionFormat::UnsupportedFeature {
                format_name,
                feature_flag,
            } => diagnostics.push_output(format!(
                "output file {} requires {format_name} support, but this build was compiled without the '{feature_flag}' feature",
                path.display()
            )),
            ExtensionFormat::Unknown => diagnostics.push_output(format!(
                "cannot infer format from output file {}; use .json/.yaml/.toml",
                path.display()
            )),
        }
    }
    detected
}

#[derive(Debug)]
enum ExtensionFormat {
    Known(DocumentFormat),
    #[allow(dead_code)]
    UnsupportedFeature {
        format_name: &'static str,
        feature_flag: &'static str,
    },
    Unknown,
}

fn probe_format_from_extension(path: &Path) -> ExtensionFormat {
    if let Some(format) = DocumentFormat::from_extension(path) {
        return ExtensionFormat::Known(format);
    }
    let normalized = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match normalized.as_str() {
        "yaml" | "yml" => ExtensionFormat::UnsupportedFeature {
            format_name: "yaml",
            feature_flag: "yaml",
        },
        "toml" => ExtensionFormat::UnsupportedFeature {
            format_name: "toml",
            feature_flag: "toml",
        },
        _ => ExtensionFormat::Unknown,
    }
}

fn ensure_output_paths_available(
    paths: &[PathBuf],
    force: bool,
    diagnostics: &mut DiagnosticCollector,
) {
    if force {
        return;
    }
    for path in paths {
        if path.exists() {
            diagnostics.push_output(format!(
                "file {} already exists (pass --force to overwrite)",
                path.display()
            ));
        }
    }
}
