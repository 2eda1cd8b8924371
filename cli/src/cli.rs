//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Detect near-duplicate APIs from their OpenAPI descriptions.
#[derive(Parser, Debug)]
#[command(name = "apiscope", version)]
pub struct Cli {
    /// Settings file (TOML). Defaults to <config dir>/apiscope/config.toml.
    #[arg(long, global = true, env = "APISCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare a spec against a directory of previously analyzed specs.
    Scan(ScanArgs),

    /// Print the text a spec is embedded from.
    Summarize(SummarizeArgs),

    /// Compare the paths and schemas of two specs, without embeddings.
    Overlap(OverlapArgs),
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// The spec under analysis (YAML or JSON).
    pub spec: PathBuf,

    /// Directory of existing specs; each file's stem is its API id.
    #[arg(long)]
    pub corpus: PathBuf,

    /// Id of the spec under analysis; the corpus entry with this id is skipped.
    #[arg(long)]
    pub id: Option<String>,

    /// Minimum similarity to report.
    #[arg(long, env = "APISCOPE_THRESHOLD")]
    pub threshold: Option<f32>,

    /// Embedding model.
    #[arg(long, env = "APISCOPE_EMBEDDING_MODEL")]
    pub model: Option<String>,
}

#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// Spec to summarize.
    pub spec: PathBuf,
}

#[derive(Args, Debug)]
pub struct OverlapArgs {
    /// First spec; its paths are matched against the second's.
    pub spec_a: PathBuf,

    /// Second spec.
    pub spec_b: PathBuf,
}
