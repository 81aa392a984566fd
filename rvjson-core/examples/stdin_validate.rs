//! Example: Validate JSON from stdin and print the event stream.
//!
//! Run with: cargo run --example stdin_validate < file.json

use std::io::Read;
use std::process::ExitCode;

use rvjson_core::{parse_events, Validator};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let mut input = Vec::new();
    if let Err(e) = std::io::stdin().read_to_end(&mut input) {
        eprintln!("failed to read stdin: {}", e);
        return ExitCode::FAILURE;
    }

    let mut keys = Validator::new();
    let result = parse_events(&input, |event| {
        eprintln!("EVENT: {:?}", event);
        event.forward(&mut keys)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let at = err.location(&input);
            eprintln!("error: {} (line {}, column {})", err, at.line, at.column);
            ExitCode::FAILURE
        }
    }
}
