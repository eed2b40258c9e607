use std::io::{self, Write};

use sp_api::{normalize_map_file, read_map_file, write_map_to_string, ReadOptions};

use crate::{map_cli_output_write, CliError, NormalizeArgs};

pub(crate) fn run_normalize(args: NormalizeArgs) -> Result<i32, CliError> {
    let options = ReadOptions {
        policy: args.warnings.into(),
    };
    let Some(output) = args.output else {
        let outcome = read_map_file(&args.input, &options)?;
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(write_map_to_string(&outcome.value).as_bytes())
            .map_err(map_cli_output_write)?;
        return Ok(0);
    };

    let outcome = normalize_map_file(&args.input, &output, &options)?;
    println!("RESULT:OK");
    println!("ADVISORIES:{}", outcome.advisories.len());
    println!("OUTPUT:{}", output.display());
    Ok(0)
}
