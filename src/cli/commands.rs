use crate::output::OutputFormat;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Retrofit and OkHttp3 surface extractor for decompiled Android apps
#[derive(Parser, Debug)]
#[command(
    name = "apkscan",
    about = "Retrofit and OkHttp3 surface extractor for decompiled Android apps",
    version,
    long_about = "apkscan walks an apktool smali tree, extracts Retrofit HTTP verb \
                  annotations and OkHttp3-typed fields, and writes them as a text report \
                  or a Postman collection.\n\n\
                  Examples:\n  \
                  apkscan --smali-dir ./app -o report.txt\n  \
                  apkscan --apk app.apk --format postman -o app.postman.json\n  \
                  apkscan -s ./app --sorted"
)]
pub struct CliArgs {
    #[arg(
        long = "apk",
        value_name = "APK",
        help = "APK to decode with apktool first (ignored when --smali-dir is given)"
    )]
    pub apk_path: Option<PathBuf>,

    #[arg(
        short = 's',
        long,
        value_name = "DIR",
        help = "Directory of smali files to scan"
    )]
    pub smali_dir: Option<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "txt",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        long,
        help = "Visit directory entries in name order for diff-stable output"
    )]
    pub sorted: bool,

    #[arg(
        long,
        value_name = "PATH",
        help = "apktool executable or apktool.jar (defaults to apktool on PATH)"
    )]
    pub apktool_path: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    #[value(alias = "text")]
    Txt,
    Postman,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Txt => OutputFormat::Text,
            OutputFormatArg::Postman => OutputFormat::Postman,
        }
    }
}
