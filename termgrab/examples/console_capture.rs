//! Capture a command over a raw TCP console connection.
//!
//! Console servers expose device serial consoles on plain TCP ports;
//! any such stream works directly. The session must already be logged in
//! and sitting at a device prompt.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example console_capture -- --host 10.0.0.5 --port 2004 \
//!     --command "show version"
//! ```

use std::env;
use std::time::Duration;

use termgrab::{OutputNaming, RunOutcome, StreamSession};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    println!("Connecting to {}:{}...", args.host, args.port);
    let stream = tokio::net::TcpStream::connect((args.host.as_str(), args.port)).await?;
    let (reader, writer) = stream.into_split();

    let mut session =
        StreamSession::with_timeout(reader, writer, Duration::from_secs(args.timeout));

    println!("Capturing: {}", args.command);
    match termgrab::run(&mut session, &args.command, &OutputNaming::default()).await? {
        RunOutcome::Saved { path } => println!("Saved to {}", path.display()),
        RunOutcome::NotPrivileged { prompt } => {
            eprintln!("You must be in enable mode to capture (prompt was {prompt:?})");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Simple argument parser (avoiding external dependencies)
struct Args {
    host: String,
    port: u16,
    command: String,
    timeout: u64,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut host = "localhost".to_string();
        let mut port = 23u16;
        let mut command = "show version".to_string();
        let mut timeout = 30u64;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--host" | "-h" => {
                    i += 1;
                    if i < args.len() {
                        host = args[i].clone();
                    }
                }
                "--port" | "-p" => {
                    i += 1;
                    if i < args.len() {
                        port = args[i].parse().unwrap_or(23);
                    }
                }
                "--command" | "-c" => {
                    i += 1;
                    if i < args.len() {
                        command = args[i].clone();
                    }
                }
                "--timeout" | "-t" => {
                    i += 1;
                    if i < args.len() {
                        timeout = args[i].parse().unwrap_or(30);
                    }
                }
                "--help" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("Unknown argument: {}", args[i]);
                }
            }
            i += 1;
        }

        Self {
            host,
            port,
            command,
            timeout,
        }
    }

    fn print_help() {
        println!(
            r#"termgrab console_capture example

USAGE:
    cargo run --example console_capture -- [OPTIONS]

OPTIONS:
    -h, --host <HOST>        Console server host [default: localhost]
    -p, --port <PORT>        TCP port [default: 23]
    -c, --command <CMD>      Command to capture [default: "show version"]
    -t, --timeout <SECS>     Per-operation timeout [default: 30]
    --help                   Print this help message
"#
        );
    }
}
