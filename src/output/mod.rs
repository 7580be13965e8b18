//! Rendering of extraction results and writing of the final artifact
//!
//! Two mutually exclusive formats are supported:
//! - [`OutputFormat::Text`]: a human-readable report listing both annotation
//!   and OkHttp3 field matches
//! - [`OutputFormat::Postman`]: a Postman v2.1 collection holding one request
//!   per annotation match

pub mod postman;
pub mod schema;
pub mod text;

use crate::aggregate::ExtractionResult;
use crate::fs::FileSystem;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to render {format:?} output: {reason}")]
    Render { format: OutputFormat, reason: String },
    #[error("Failed to write output file {path}: {reason}")]
    Write { path: PathBuf, reason: String },
    #[error("Failed to write to stdout: {0}")]
    Stdout(#[from] io::Error),
}

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain-text report (default)
    #[default]
    Text,
    /// Postman collection JSON
    Postman,
}

/// Renders extraction results in the configured format
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, result: &ExtractionResult) -> Result<String, OutputError> {
        match self.format {
            OutputFormat::Text => Ok(text::render(result)),
            OutputFormat::Postman => {
                postman::render(result).map_err(|err| OutputError::Render {
                    format: self.format,
                    reason: format!("{:#}", err),
                })
            }
        }
    }
}

/// Writes the artifact to `destination`, or to stdout when there is none.
///
/// File output goes through [`FileSystem::write_atomic`], so a failed write
/// leaves any existing file untouched.
pub fn write_artifact<F: FileSystem>(
    fs: &F,
    destination: Option<&Path>,
    contents: &str,
) -> Result<(), OutputError> {
    match destination {
        Some(path) => {
            fs.write_atomic(path, contents)
                .map_err(|err| OutputError::Write {
                    path: path.to_path_buf(),
                    reason: format!("{:#}", err),
                })?;
            info!(path = %path.display(), bytes = contents.len(), "Output file created");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{HttpAnnotationMatch, HttpVerb};
    use crate::fs::MockFileSystem;

    fn sample() -> ExtractionResult {
        ExtractionResult {
            annotations: vec![HttpAnnotationMatch::new(HttpVerb::Get, "/users")],
            client_fields: vec![],
        }
    }

    #[test]
    fn test_default_format_is_text() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_formatter_text() {
        let output = OutputFormatter::new(OutputFormat::Text)
            .format(&sample())
            .unwrap();
        assert!(output.contains("HTTP Method: GET"));
    }

    #[test]
    fn test_formatter_postman() {
        let output = OutputFormatter::new(OutputFormat::Postman)
            .format(&sample())
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["item"][0]["item"][0]["request"]["url"], "{{base_url}}/users");
    }

    #[test]
    fn test_formatter_is_deterministic() {
        for format in [OutputFormat::Text, OutputFormat::Postman] {
            let formatter = OutputFormatter::new(format);
            assert_eq!(
                formatter.format(&sample()).unwrap(),
                formatter.format(&sample()).unwrap()
            );
        }
    }

    #[test]
    fn test_write_artifact_to_file() {
        let fs = MockFileSystem::new();
        write_artifact(&fs, Some(Path::new("/mock/report.txt")), "data").unwrap();
        assert_eq!(fs.contents("report.txt").as_deref(), Some("data"));
    }

    #[test]
    fn test_write_artifact_empty_contents() {
        let fs = MockFileSystem::new();
        write_artifact(&fs, Some(Path::new("/mock/report.txt")), "").unwrap();
        assert_eq!(fs.contents("report.txt").as_deref(), Some(""));
    }

    #[test]
    fn test_write_artifact_failure_is_reported() {
        let fs = MockFileSystem::new();
        let err = write_artifact(&fs, Some(Path::new("/mock/missing/out.json")), "{}")
            .unwrap_err();
        assert!(matches!(err, OutputError::Write { .. }));
        assert!(err.to_string().contains("/mock/missing/out.json"));
    }
}
