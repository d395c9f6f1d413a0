#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = fcell_playground::run_from_env() {
        tracing::error!(%error, exit_code = error.exit_code(), "fcell-playground failed");
        eprintln!("{error}");
        std::process::exit(error.exit_code());
    }
}
