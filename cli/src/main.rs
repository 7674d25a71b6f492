//! `reqprobe`: send one GET or POST and print the response.
//!
//! ```text
//! reqprobe <URL> [key=value ...]
//! ```
//! No params means GET; any params means POST with a JSON object body.
//! Exit code 0 for any HTTP status, 1 for URL or network errors.

mod logging;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use reqprobe_core::{write_report, ClientError, RequestClient};
use thiserror::Error;
use tracing::{debug, info};

/// Send a single HTTP request and print the status and body.
///
/// JSON bodies are pretty-printed; anything else is printed as-is.
#[derive(Parser, Debug)]
#[command(name = "reqprobe", author, version, about, long_about)]
struct Args {
    /// http:// or https:// URL to request
    url: String,

    /// Body parameters as key=value; any present switches the request to POST
    #[arg(value_parser = parse_param)]
    params: Vec<(String, String)>,

    /// Extra request header as 'Name: value' (repeatable)
    #[arg(short = 'H', long = "header", value_name = "HEADER", value_parser = parse_header)]
    headers: Vec<(String, String)>,

    /// Increase log output on stderr (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{s}`"))?;
    if key.is_empty() {
        return Err(format!("empty key in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected 'Name: value', got `{s}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in `{s}`"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Send the request, then print. Nothing reaches `out` unless the response
/// arrived in full.
fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), RunError> {
    let client = args
        .headers
        .iter()
        .try_fold(RequestClient::new(), |client, (name, value)| {
            client.with_header(name, value)
        })?;

    let request = client.build(&args.url, &args.params)?;
    info!(method = %request.method, url = %request.target, "sending request");

    let response = client.send(&request)?;
    info!(status = response.status, bytes = response.body.len(), "response received");

    write_report(out, &response)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);
    debug!(?args, "parsed arguments");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run(&args, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
