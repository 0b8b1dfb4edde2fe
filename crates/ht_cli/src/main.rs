use std::process::ExitCode;

fn main() -> ExitCode {
    ht_cli::run()
}
