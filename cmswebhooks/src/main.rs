use std::io::Read;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use cmswebhooks::config::{Args, Command, Config};
use cmswebhooks::{WebhookVerifier, telemetry};

/// Read the raw body from a file, or stdin for `-`. Bytes are kept as-is.
fn read_payload(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut payload = String::new();
        std::io::stdin().read_to_string(&mut payload).context("Failed to read payload from stdin")?;
        return Ok(payload);
    }

    std::fs::read_to_string(path).with_context(|| format!("Failed to read payload from {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load(&args)?;

    if args.validate {
        println!("Configuration is valid.");
        return Ok(());
    }

    telemetry::init_telemetry(config.log_format)?;

    tracing::debug!("{:?}", args);

    let verifier = WebhookVerifier::from_config(&config);

    match args.command {
        Some(Command::Verify { signature, payload }) => {
            let payload = read_payload(&payload)?;
            let response = verifier.parse(&payload, &signature)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Some(Command::Sign { payload }) => {
            let payload = read_payload(&payload)?;
            let signature = verifier.sign(&payload).context("Failed to sign payload")?;
            println!("{signature}");
        }
        None => {
            anyhow::bail!("No command given. Run with --help to see the available commands.");
        }
    }

    Ok(())
}
