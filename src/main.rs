//! Binary entrypoint for photo-loop.
//!
//! Resolves configuration, scans the folder and hands the queue to the viewer.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use photoloop::config::{Configuration, PlaybackConfig};
use photoloop::events::StopSignal;
use photoloop::loader::DecodingLoader;
use photoloop::render::{self, ViewerOptions};
use photoloop::scan::scan_with_options;
use photoloop::sequence::PlaybackQueue;

#[derive(Debug, Parser)]
#[command(
    name = "photo-loop",
    version,
    about = "Fullscreen photo slideshow over a folder tree"
)]
struct Cli {
    /// Folder to scan recursively for images
    #[arg(value_name = "FOLDER")]
    folder: Option<PathBuf>,

    /// Path to YAML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seconds each image stays on screen
    #[arg(short, long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=60))]
    delay: Option<u64>,

    /// Shuffle the images once at startup
    #[arg(long, overrides_with = "no_shuffle")]
    shuffle: bool,

    /// Play the images in scan order
    #[arg(long = "no-shuffle", overrides_with = "shuffle")]
    no_shuffle: bool,

    /// Deterministic RNG seed for the startup shuffle
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Open a regular window instead of going fullscreen
    #[arg(long)]
    windowed: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    const fn shuffle_override(&self) -> Option<bool> {
        if self.shuffle {
            Some(true)
        } else if self.no_shuffle {
            Some(false)
        } else {
            None
        }
    }
}

const DEFAULT_FILTER: &str = "info,wgpu=warn,winit=warn";

/// `RUST_LOG` (or the default) plus, with `-v`, a crate-level override.
fn log_filter(env: Option<&str>, verbosity: u8) -> Result<EnvFilter> {
    let mut filter = match env.filter(|s| !s.trim().is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::new(DEFAULT_FILTER),
    };
    let level = match verbosity {
        0 => return Ok(filter),
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    for target in ["photoloop", "photo_loop"] {
        filter = filter.add_directive(format!("{target}={level}").parse()?);
    }
    Ok(filter)
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(env.as_deref(), verbosity).context("invalid RUST_LOG directives")?;
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
    Ok(())
}

/// Forward Ctrl-C and (on a terminal) Ctrl-D to the viewer as stop signals.
fn spawn_stop_watchers(stop_tx: &mpsc::Sender<StopSignal>) {
    {
        let stop_tx = stop_tx.clone();
        tokio::spawn(async move {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!("ctrl-c handler failed: {err}");
                return;
            }
            info!("ctrl-c received; initiating shutdown");
            let _ = stop_tx.send(StopSignal::Interrupt).await;
        });
    }

    if io::stdin().is_terminal() {
        let stop_tx = stop_tx.clone();
        // Plain thread: a pending stdin read must not hold up runtime shutdown.
        std::thread::spawn(move || {
            let mut sink = Vec::new();
            match io::stdin().read_to_end(&mut sink) {
                Ok(_) => info!("stdin closed; initiating shutdown"),
                Err(err) => {
                    warn!("stdin watcher failed: {err}");
                    return;
                }
            }
            let _ = stop_tx.blocking_send(StopSignal::StdinClosed);
        });
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let cfg = match &cli.config {
        Some(path) => Configuration::from_yaml_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?
            .validated()
            .context("invalid configuration values")?,
        None => Configuration::default(),
    };

    let Some(folder) = cli.folder.clone().or_else(|| cfg.photo_library_path.clone()) else {
        eprintln!("No folder selected. Exiting.");
        std::process::exit(1);
    };

    let mut playback = cfg.playback();
    if let Some(secs) = cli.delay {
        playback = PlaybackConfig::from_secs(secs, playback.shuffle)?;
    }
    if let Some(shuffle) = cli.shuffle_override() {
        playback.shuffle = shuffle;
    }
    info!(
        folder = %folder.display(),
        delay_s = playback.delay.as_secs(),
        shuffle = playback.shuffle,
        "configuration resolved"
    );

    let files = scan_with_options(&folder, &cfg.scan)
        .with_context(|| format!("failed to scan {}", folder.display()))?;
    info!(count = files.len(), "scanned images");

    let queue = match cli.seed.or(cfg.shuffle_seed) {
        Some(seed) => {
            PlaybackQueue::build_with_rng(files, playback.shuffle, &mut StdRng::seed_from_u64(seed))
        }
        None => PlaybackQueue::build(files, playback.shuffle),
    }
    .with_context(|| format!("nothing to show in {}", folder.display()))?;

    let cancel = CancellationToken::new();
    let (stop_tx, stop_rx) = mpsc::channel::<StopSignal>(4);
    spawn_stop_watchers(&stop_tx);

    let options = ViewerOptions {
        delay: playback.delay,
        fullscreen: cfg.fullscreen && !cli.windowed,
    };
    // Run the windowed viewer on the main thread; returns once playback ends.
    let result = render::run_slideshow(queue, DecodingLoader, options, cancel.clone(), stop_rx);
    cancel.cancel();
    result.context("slideshow failed")?;

    info!("bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_controls_crate_level_without_verbose() {
        let filter = log_filter(Some("photoloop=debug"), 0).unwrap().to_string().to_lowercase();
        assert!(filter.contains("photoloop=debug"), "{filter}");
        assert!(!filter.contains("photoloop=info"), "{filter}");

        let filter = log_filter(Some("debug"), 0).unwrap().to_string().to_lowercase();
        assert!(!filter.contains("photoloop"), "{filter}");
    }

    #[test]
    fn default_filter_quiets_gpu_and_windowing() {
        let filter = log_filter(None, 0).unwrap().to_string().to_lowercase();
        assert!(filter.contains("wgpu=warn"), "{filter}");
        assert!(filter.contains("winit=warn"), "{filter}");
        assert!(!filter.contains("photoloop"), "{filter}");
    }

    #[test]
    fn verbose_flag_raises_crate_level() {
        let filter = log_filter(None, 1).unwrap().to_string().to_lowercase();
        assert!(filter.contains("photoloop=debug"), "{filter}");
        let filter = log_filter(Some("warn"), 2).unwrap().to_string().to_lowercase();
        assert!(filter.contains("photoloop=trace"), "{filter}");
    }

    #[test]
    fn malformed_rust_log_is_rejected() {
        assert!(log_filter(Some("photoloop=loud"), 0).is_err());
    }
}
