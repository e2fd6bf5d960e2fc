//! FaceMotion CLI
//!
//! Usage:
//!   facemotion --input frames.jsonl                 # Replay a landmark stream
//!   producer | facemotion --json                    # Event stream on stdout
//!   facemotion --input - --output-file status.json  # Mirror status to a file
//!   facemotion --serve                              # HTTP + WebSocket ingestion

use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

use facemotion::core::{run_replay, run_server, JsonLinesSource, LandmarkSource, ReplayOptions, Tracker};
use facemotion::types::{FrameOutput, TouchMode};
use facemotion::{Result, TrackerConfig, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "facemotion",
    version = VERSION,
    about = "FaceMotion - Stable behavioral signals from face and hand landmarks",
    long_about = "FaceMotion turns a stream of face/hand landmark frames into smoothed\n\
                  signals (smile, sadness, looking away, hand gestures) and a stable\n\
                  dialog line.\n\n\
                  Input: one JSON landmark frame per line (file or stdin).\n\n\
                  Outputs:\n  \
                  --json         Event records on stdout (JSON lines)\n  \
                  --output-file  Status snapshot, refreshed every 500 ms\n  \
                  --debug        HUD lines on stderr\n  \
                  --serve        HTTP API server mode\n\n\
                  Logging goes to stderr; filter with RUST_LOG."
)]
struct Args {
    /// Landmark frames, one JSON object per line ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    input: String,

    /// Emit event records as JSON lines on stdout
    #[arg(long)]
    json: bool,

    /// Event records per second
    #[arg(long)]
    json_rate_hz: Option<f64>,

    /// Status snapshot file (written periodically and on exit)
    #[arg(long)]
    output_file: Option<PathBuf>,

    /// Ignore hand landmarks entirely
    #[arg(long)]
    no_hand: bool,

    /// Minimum interval between accepted hand results (milliseconds)
    #[arg(long)]
    hand_interval_ms: Option<f64>,

    /// Two-hand heart sensitivity (>1 easier, <1 stricter)
    #[arg(long)]
    heart_sensitivity: Option<f64>,

    /// Heart: fingertip clusters may touch by centroid OR by a tip pair
    #[arg(long)]
    heart_touch_either: bool,

    /// Show the signal HUD on stderr
    #[arg(long)]
    debug: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("facemotion=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = build_config(&args);
    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(2);
    }

    if args.serve {
        run_serve(&args, config).await;
    } else if let Err(e) = run_cli(&args, config) {
        error!("{}", e);
        std::process::exit(1);
    }
}

/// Environment first, then command-line overrides
fn build_config(args: &Args) -> TrackerConfig {
    let mut config = TrackerConfig::from_env();
    if let Some(s) = args.heart_sensitivity {
        config.heart_sensitivity = s;
    }
    if args.heart_touch_either {
        config.heart_touch = TouchMode::Either;
    }
    if args.no_hand {
        config.hand_tracking = false;
    }
    if let Some(ms) = args.hand_interval_ms {
        config.hand_interval_ms = ms;
    }
    if let Some(hz) = args.json_rate_hz {
        config.event_rate_hz = hz;
    }
    config
}

/// Replay a landmark stream through one tracking session
fn run_cli(args: &Args, config: TrackerConfig) -> Result<()> {
    let mut source: Box<dyn LandmarkSource> = if args.input == "-" {
        Box::new(JsonLinesSource::stdin())
    } else {
        Box::new(JsonLinesSource::open(&args.input)?)
    };

    let mut tracker = Tracker::new(config);
    let options = ReplayOptions {
        emit_events: args.json,
        status_path: args.output_file.clone(),
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();

    run_replay(source.as_mut(), &mut tracker, &options, &mut out, |output| {
        if args.debug {
            print_hud(output, args.no_color);
        }
    })?;
    Ok(())
}

/// HUD lines on stderr (stdout carries the event stream)
fn print_hud(output: &FrameOutput, no_color: bool) {
    if no_color {
        eprintln!("{}", output.to_parseable_string());
    } else {
        eprintln!("{}", output.to_terminal_string());
    }
    eprintln!("  {}", output.to_debug_string());
}

/// Run HTTP API server
async fn run_serve(args: &Args, config: TrackerConfig) {
    if let Err(e) = run_server(&args.addr, config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
