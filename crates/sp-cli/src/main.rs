fn main() {
    sp_cli::init_tracing();
    std::process::exit(sp_cli::run_cli_from_args(std::env::args_os()));
}
