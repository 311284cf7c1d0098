//! # Invite Studio Replay
//!
//! Replays an editing script without a browser and prints the final state.

use anyhow::Context;
use clap::Parser;
use invite_replay::{CliArgs, OutputFormat, Replay, ReplayConfig, Script};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ReplayConfig::from(CliArgs::parse());
    tracing::info!(
        "Replaying {} on {}x{} cards",
        config.script.display(),
        config.card_width,
        config.card_height
    );

    let editor_config = config
        .editor_config()
        .context("Failed to load editor configuration")?;
    let script = Script::load(&config.script)
        .with_context(|| format!("Failed to load script {}", config.script.display()))?;

    let mut replay = Replay::new(editor_config, config.layout())?;
    let outcome = replay.run(&script, config.strict)?;

    match config.output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&replay.report(outcome))?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{}", replay.summary(outcome)),
    }
    Ok(())
}

/// Logs go to stderr so the printed state stays machine-readable.
///
/// Set `RUST_LOG` to control levels and `RUST_LOG_FORMAT=json` for JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("invite_replay=info,invite_core=info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}
