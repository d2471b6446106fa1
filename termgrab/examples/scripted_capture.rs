//! Scripted example: a full capture run against a fake device.
//!
//! No hardware needed — the device's side of the conversation is
//! pre-recorded in a `ScriptedSession`. Useful for seeing the exact
//! send/read sequence a run performs.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --example scripted_capture
//! ```

use termgrab::{OutputNaming, RunOutcome, ScriptedSession};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // The device starts out in configuration mode; the run normalizes it
    // back to enable mode before capturing.
    let mut session = ScriptedSession::new()
        .on_send("\n\n", b"\r\nrouter1(config)#\r\nrouter1(config)#")
        .on_send("end\n", b"end\r\nrouter1#")
        .on_send("term length 0\n", b"term length 0\r\nrouter1#")
        .on_send(
            "show version\r\n",
            b"show version\r\n\
              Cisco IOS Software, Version 15.2(4)M7\r\n\
              router1 uptime is 3 weeks, 2 days\r\n\
              router1#",
        )
        .on_send("term length 24\n", b"term length 24\r\nrouter1#");

    let naming = OutputNaming {
        save_dir: std::env::temp_dir().join("termgrab-demo"),
        ..OutputNaming::default()
    };

    match termgrab::run(&mut session, "show version", &naming).await? {
        RunOutcome::Saved { path } => {
            println!("Capture saved to {}", path.display());
            println!("{}", "-".repeat(50));
            print!("{}", tokio::fs::read_to_string(&path).await?);
            println!("{}", "-".repeat(50));
        }
        RunOutcome::NotPrivileged { prompt } => {
            eprintln!("Device is not in enable mode (prompt was {prompt:?})");
        }
    }

    Ok(())
}
