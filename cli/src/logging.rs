//! Tracing setup. Logs go to stderr so stdout carries only the report.

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins when set; otherwise `-v` count picks the level.
pub fn init(verbose: u8) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => EnvFilter::new(level_for(verbose)),
    };

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Err(err) = init_result {
        eprintln!("tracing already initialized: {err}");
    }
}

fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
