use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::Course;

use super::DocumentFormat;

/// Where a submitted course is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputDestination {
    Stdout,
    File(PathBuf),
}

impl OutputDestination {
    pub fn file(path: impl AsRef<Path>) -> Self {
        OutputDestination::File(path.as_ref().to_path_buf())
    }

    fn open(&self) -> io::Result<Box<dyn Write>> {
        match self {
            OutputDestination::Stdout => Ok(Box::new(io::stdout().lock())),
            OutputDestination::File(path) => Ok(Box::new(File::create(path)?)),
        }
    }

    fn describe(&self) -> String {
        match self {
            OutputDestination::Stdout => "stdout".to_string(),
            OutputDestination::File(path) => format!("file {}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: DocumentFormat,
    pub pretty: bool,
    pub destinations: Vec<OutputDestination>,
}

impl OutputOptions {
    /// Pretty output to stdout in `format`.
    pub fn new(format: DocumentFormat) -> Self {
        Self {
            format,
            pretty: true,
            destinations: vec![OutputDestination::Stdout],
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_destinations(mut self, destinations: Vec<OutputDestination>) -> Self {
        self.destinations = destinations;
        self
    }
}

/// Write `course` to every destination. Returns how many were written.
pub fn emit(course: &Course, options: &OutputOptions) -> Result<usize> {
    if options.destinations.is_empty() {
        return Ok(0);
    }
    let payload = serialize_course(course, options)?;
    for destination in &options.destinations {
        let mut writer = destination
            .open()
            .with_context(|| format!("failed to open {}", destination.describe()))?;
        writeln!(writer, "{payload}")
            .and_then(|()| writer.flush())
            .with_context(|| format!("failed to write to {}", destination.describe()))?;
    }
    Ok(options.destinations.len())
}

pub fn serialize_course(course: &Course, options: &OutputOptions) -> Result<String> {
    let text = match (options.format, options.pretty) {
        (DocumentFormat::Json, true) => serde_json::to_string_pretty(course)?,
        (DocumentFormat::Json, false) => serde_json::to_string(course)?,
        #[cfg(feature = "yaml")]
        (DocumentFormat::Yaml, _) => serde_yaml::to_string(course)?,
        #[cfg(feature = "toml")]
        (DocumentFormat::Toml, true) => toml::to_string_pretty(course)?,
        #[cfg(feature = "toml")]
        (DocumentFormat::Toml, false) => toml::to_string(course)?,
    };
    Ok(text)
}
