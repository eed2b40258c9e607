use std::ffi::OsString;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod check;
mod cli_args;
mod error_map;
mod normalize;
mod source_scan;

pub(crate) use check::{check_file, run_check};
pub(crate) use cli_args::{CheckArgs, Cli, Mode, NormalizeArgs};
#[cfg(test)]
pub(crate) use cli_args::PolicyArg;
pub(crate) use error_map::{
    category_name, emit_error, map_cli_output_write, map_cli_report_json, map_cli_source_scan,
    CliError,
};
pub(crate) use normalize::run_normalize;
pub(crate) use source_scan::collect_map_files;

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default
/// `warn` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, CliError> {
    match cli.command {
        Mode::Check(args) => run_check(args),
        Mode::Normalize(args) => run_normalize(args),
    }
}

#[cfg(test)]
mod tests;
