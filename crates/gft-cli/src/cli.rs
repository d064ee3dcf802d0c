//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use gft_model::{NamespaceSelector, ResourceKind};

#[derive(Parser)]
#[command(
    name = "german-fhir-terminology",
    version,
    about = "Convert German ICD-10-GM and OPS catalogs into FHIR CodeSystems",
    long_about = "Convert an official ICD-10-GM or OPS catalog archive into flat FHIR\n\
                  CodeSystem JSON resources, one per publisher namespace (DIMDI, BFARM)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert a catalog archive into CodeSystem JSON files.
    Convert(ConvertArgs),

    /// List resource types and their canonical URLs.
    Kinds,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Catalog archive (zip) as published.
    #[arg(short = 'i', long = "input", value_name = "ZIP")]
    pub input: PathBuf,

    /// Catalog version, e.g. 2023 or 1.3.
    #[arg(short = 'V', long = "version", value_name = "VERSION")]
    pub catalog_version: String,

    /// Resource type contained in the archive.
    #[arg(short = 't', long = "type", value_enum, ignore_case = true)]
    pub kind: KindArg,

    /// Publisher namespaces to emit.
    #[arg(
        short = 'u',
        long = "url",
        value_enum,
        ignore_case = true,
        default_value = "BOTH"
    )]
    pub url: NamespaceArg,

    /// Output directory, created if missing.
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    #[value(name = "ICD10GM")]
    Icd10Gm,
    #[value(name = "OPS")]
    Ops,
    #[value(name = "ALPHAID")]
    AlphaId,
    #[value(name = "ICDO")]
    IcdO,
}

impl From<KindArg> for ResourceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Icd10Gm => ResourceKind::Icd10Gm,
            KindArg::Ops => ResourceKind::Ops,
            KindArg::AlphaId => ResourceKind::AlphaId,
            KindArg::IcdO => ResourceKind::IcdO,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum NamespaceArg {
    #[value(name = "DIMDI")]
    Dimdi,
    #[value(name = "BFARM")]
    Bfarm,
    #[value(name = "BOTH")]
    Both,
}

impl From<NamespaceArg> for NamespaceSelector {
    fn from(selector: NamespaceArg) -> Self {
        match selector {
            NamespaceArg::Dimdi => NamespaceSelector::Dimdi,
            NamespaceArg::Bfarm => NamespaceSelector::Bfarm,
            NamespaceArg::Both => NamespaceSelector::Both,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_convert_with_short_flags() {
        let cli = Cli::try_parse_from([
            "german-fhir-terminology",
            "convert",
            "-i",
            "icd.zip",
            "-V",
            "2023",
            "-t",
            "icd10gm",
            "-o",
            "out",
        ])
        .unwrap();
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.catalog_version, "2023");
        assert_eq!(ResourceKind::from(args.kind), ResourceKind::Icd10Gm);
        assert_eq!(NamespaceSelector::from(args.url), NamespaceSelector::Both);
    }

    #[test]
    fn rejects_unknown_namespace() {
        let result = Cli::try_parse_from([
            "german-fhir-terminology",
            "convert",
            "-i",
            "ops.zip",
            "-V",
            "2021",
            "-t",
            "OPS",
            "-u",
            "WHO",
            "-o",
            "out",
        ]);
        assert!(result.is_err());
    }
}
