//! APK decoding through an external decompiler
//!
//! The scan core never looks inside an archive. It asks a [`Decompiler`] for a
//! directory of smali files and walks that.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum DecompileError {
    #[error("Could not find apktool on PATH. Install it or pass --apktool-path")]
    ToolNotFound,
    #[error("apktool is configured as a JAR ({0}) but java could not be found on PATH")]
    JavaNotFound(PathBuf),
    #[error("Archive path has no file name: {0}")]
    InvalidArchive(PathBuf),
    #[error("Failed to resolve working directory: {0}")]
    WorkingDir(#[source] io::Error),
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("apktool exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
}

/// Turns an application archive into a directory of disassembly files.
pub trait Decompiler {
    fn decompile(&self, archive: &Path) -> Result<PathBuf, DecompileError>;
}

/// Runs `apktool d` and waits for it to finish. There is no timeout.
#[derive(Debug, Clone, Default)]
pub struct ApktoolDecompiler {
    tool_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
}

impl ApktoolDecompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an explicit apktool executable, or `apktool.jar` run through java.
    pub fn with_tool_path(mut self, tool_path: Option<PathBuf>) -> Self {
        self.tool_path = tool_path;
        self
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = Some(output_dir);
        self
    }

    /// Where apktool puts its output: `<cwd>/<archive stem>` unless overridden.
    pub fn output_dir_for(&self, archive: &Path) -> Result<PathBuf, DecompileError> {
        if let Some(dir) = &self.output_dir {
            return Ok(dir.clone());
        }

        let stem = archive
            .file_stem()
            .ok_or_else(|| DecompileError::InvalidArchive(archive.to_path_buf()))?;
        let cwd = std::env::current_dir().map_err(DecompileError::WorkingDir)?;
        Ok(cwd.join(stem))
    }

    fn command(&self) -> Result<Command, DecompileError> {
        match &self.tool_path {
            Some(path) if path.extension().is_some_and(|ext| ext == "jar") => {
                let java = which::which("java")
                    .map_err(|_| DecompileError::JavaNotFound(path.clone()))?;
                let mut command = Command::new(java);
                command.arg("-jar").arg(path);
                Ok(command)
            }
            Some(path) => Ok(Command::new(path)),
            None => which::which("apktool")
                .map(Command::new)
                .map_err(|_| DecompileError::ToolNotFound),
        }
    }
}

impl Decompiler for ApktoolDecompiler {
    fn decompile(&self, archive: &Path) -> Result<PathBuf, DecompileError> {
        let output_dir = self.output_dir_for(archive)?;
        let mut command = self.command()?;
        command
            .arg("d")
            .arg("-f")
            .arg("-o")
            .arg(&output_dir)
            .arg(archive);

        let program = command.get_program().to_string_lossy().to_string();
        info!(
            archive = %archive.display(),
            output_dir = %output_dir.display(),
            program = %program,
            "Decoding archive with apktool"
        );

        // Captured so apktool's progress lines never mix with a report on stdout.
        let output = command
            .output()
            .map_err(|source| DecompileError::Spawn { program, source })?;

        debug!(stdout = %String::from_utf8_lossy(&output.stdout), "apktool output");

        if !output.status.success() {
            return Err(DecompileError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output_dir)
    }
}
