use std::process::ExitCode;

fn main() -> ExitCode {
    match billing_console::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
