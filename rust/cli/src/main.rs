//! `baccarat` binary
//!
//! Usage: cargo run -p baccarat_cli --bin baccarat -- sim --rounds 100

fn main() {
    // Initialize logging
    baccarat_cli::logging::init_logging();

    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    let code = baccarat_cli::run(std::env::args(), &mut out, &mut err);
    std::process::exit(code);
}
