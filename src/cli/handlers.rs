use super::commands::CliArgs;
use crate::aggregate::ExtractionResult;
use crate::analyzer::ApiSurfaceAnalyzer;
use crate::config::ApkscanConfig;
use crate::decompile::{ApktoolDecompiler, Decompiler};
use crate::fs::{FileSystem, RealFileSystem};
use crate::output::{write_artifact, OutputFormat, OutputFormatter};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Where the smali tree came from. Decoded trees are best-effort: if they
/// cannot be scanned the run still produces an (empty) artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanInput {
    SmaliDir(PathBuf),
    Decoded(PathBuf),
    Nothing,
}

/// Applies CLI overrides on top of the environment configuration.
pub fn resolve_config(args: &CliArgs, mut config: ApkscanConfig) -> Result<ApkscanConfig> {
    if args.sorted {
        config.sorted = true;
    }
    if args.apktool_path.is_some() {
        config.apktool_path = args.apktool_path.clone();
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.to_lowercase();
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Picks the tree to scan. An explicit smali directory wins; otherwise the APK
/// is decoded. A failed decode is logged and yields [`ScanInput::Nothing`].
pub fn resolve_input<D: Decompiler>(args: &CliArgs, decompiler: &D) -> ScanInput {
    if let Some(dir) = &args.smali_dir {
        return ScanInput::SmaliDir(dir.clone());
    }

    let Some(apk) = &args.apk_path else {
        warn!("No --smali-dir or --apk given, nothing to scan");
        return ScanInput::Nothing;
    };

    match decompiler.decompile(apk) {
        Ok(dir) => ScanInput::Decoded(dir),
        Err(err) => {
            error!(apk = %apk.display(), error = %err, "APK decoding failed, continuing with no results");
            ScanInput::Nothing
        }
    }
}

/// Scans, renders, and writes the artifact.
pub fn run<F: FileSystem, D: Decompiler>(
    args: &CliArgs,
    config: &ApkscanConfig,
    fs: &F,
    decompiler: &D,
) -> Result<()> {
    let analyzer = ApiSurfaceAnalyzer::with_config(fs, config.analyzer_config());

    let result = match resolve_input(args, decompiler) {
        ScanInput::SmaliDir(dir) => analyzer
            .analyze(&dir)
            .with_context(|| format!("Cannot scan smali directory {}", dir.display()))?,
        ScanInput::Decoded(dir) => analyzer.analyze(&dir).unwrap_or_else(|err| {
            error!(error = %err, "Decoded output could not be scanned, continuing with no results");
            ExtractionResult::default()
        }),
        ScanInput::Nothing => ExtractionResult::default(),
    };

    let format = OutputFormat::from(args.format);
    let rendered = OutputFormatter::new(format).format(&result)?;
    write_artifact(fs, args.output.as_deref(), &rendered)?;

    info!(
        format = ?format,
        annotations = result.annotations.len(),
        client_fields = result.client_fields.len(),
        "Done"
    );

    Ok(())
}

/// Entry point used by the binary; returns the process exit code.
pub fn handle_scan(args: &CliArgs, config: ApkscanConfig) -> i32 {
    let config = match resolve_config(args, config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            return 1;
        }
    };

    let decompiler = ApktoolDecompiler::new().with_tool_path(config.apktool_path.clone());

    match run(args, &config, &RealFileSystem::new(), &decompiler) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    }
}
