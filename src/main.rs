//! iris - entity interaction tracker
//!
//! Headless driver that plays a frame script against the example registrations

mod config;
mod demo;
mod headless;

use anyhow::Result;
use headless::HeadlessConfig;
use std::{env, path::PathBuf};
use tracing::info;

const USAGE: &str = "\
usage: iris [options]

  --config <path>        iris settings (default: config/iris.toml)
  --frames <path>        JSON frame script to play (default: built-in walkthrough)
  --event-log <path>     write every dispatched event as JSON lines
  --resolution <WxH>     screen size used for menu layout (default: 1920x1080)
  --help                 print this message";

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting iris v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1));
    if cli.help {
        println!("{USAGE}");
        return Ok(());
    }

    let iris = match cli.config.as_deref() {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };

    let report = headless::run(HeadlessConfig {
        iris,
        frames: cli.frames,
        event_log: cli.event_log,
        resolution: cli.resolution,
    })?;

    println!(
        "played {} frames, {} events, {} selections",
        report.frames, report.events, report.selections
    );
    Ok(())
}

#[derive(Clone, Debug)]
struct CliOptions {
    config: Option<PathBuf>,
    frames: Option<PathBuf>,
    event_log: Option<PathBuf>,
    resolution: (u32, u32),
    help: bool,
}

impl CliOptions {
    fn parse<I: Iterator<Item = String>>(mut args: I) -> Self {
        let mut opts = CliOptions {
            config: None,
            frames: None,
            event_log: None,
            resolution: (1920, 1080),
            help: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--config" => {
                    if let Some(path) = args.next() {
                        opts.config = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--config requires a file path");
                    }
                }
                "--frames" => {
                    if let Some(path) = args.next() {
                        opts.frames = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--frames requires a file path");
                    }
                }
                "--event-log" => {
                    if let Some(path) = args.next() {
                        opts.event_log = Some(PathBuf::from(path));
                    } else {
                        tracing::error!("--event-log requires a file path");
                    }
                }
                "--resolution" => {
                    if let Some(raw) = args.next() {
                        match raw.split_once('x') {
                            Some((w, h)) => match (w.parse::<u32>(), h.parse::<u32>()) {
                                (Ok(width), Ok(height)) if width > 0 && height > 0 => {
                                    opts.resolution = (width, height);
                                }
                                _ => {
                                    tracing::error!(value = %raw, "--resolution must be like 1920x1080");
                                }
                            },
                            None => {
                                tracing::error!(value = %raw, "--resolution must be like 1920x1080");
                            }
                        }
                    } else {
                        tracing::error!("--resolution requires a value like 1920x1080");
                    }
                }
                other => tracing::warn!(arg = other, "ignoring unknown argument"),
            }
        }

        opts
    }
}
