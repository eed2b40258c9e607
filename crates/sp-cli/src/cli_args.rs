use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sp_api::WarningPolicy;

#[derive(Debug, Parser)]
#[command(name = "sp-map")]
#[command(about = "Validate and normalize Strategic Primer map files")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    /// Read every map under the given paths and report problems.
    Check(CheckArgs),
    /// Read one map and write it back in canonical form.
    Normalize(NormalizeArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PolicyArg {
    Ignore,
    Warn,
    Die,
}

impl From<PolicyArg> for WarningPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Ignore => WarningPolicy::Ignore,
            PolicyArg::Warn => WarningPolicy::Warn,
            PolicyArg::Die => WarningPolicy::Die,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct CheckArgs {
    #[arg(required = true)]
    pub(crate) paths: Vec<PathBuf>,
    #[arg(long = "warnings", value_enum, default_value_t = PolicyArg::Warn)]
    pub(crate) warnings: PolicyArg,
    #[arg(long = "json")]
    pub(crate) json: bool,
}

#[derive(Debug, Args)]
pub(crate) struct NormalizeArgs {
    pub(crate) input: PathBuf,
    /// Defaults to standard output.
    #[arg(long = "output")]
    pub(crate) output: Option<PathBuf>,
    #[arg(long = "warnings", value_enum, default_value_t = PolicyArg::Warn)]
    pub(crate) warnings: PolicyArg,
}
