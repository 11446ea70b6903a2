use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use geo::Polygon;
use liner_core::animation::Scheduler;
use liner_core::render::RenderSink;
use liner_map::{prepare_route, DataSources, DemoConfig, FileFetcher, GeometryKind, HttpFetcher};
use liner_transit::network::DataFetcher;
use liner_transit::TrainIdentifier;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::FilterFn, layer::SubscriberExt, util::SubscriberInitExt};

mod output;

use output::{frame_features, write_frames_geojson};

#[derive(Parser, Debug)]
#[command(
    name = "train-replay",
    author,
    version,
    about = "Replay the rail line animation offline and write its frames as GeoJSON",
    long_about = "Resolves the stretch of route between two named stops, runs the train \
                  animation on a simulated frame clock and writes every marker of every \
                  recorded frame as a GeoJSON polygon feature.\n\n\
                  Each feature carries the train id and frame number, so the output can be \
                  filtered by frame to step through the animation in any GeoJSON viewer."
)]
struct Args {
    /// Stops GeoJSON file or http(s) URL
    #[arg(short, long)]
    stops: String,

    /// Route GeoJSON file or http(s) URL
    #[arg(short, long)]
    route: String,

    /// Output GeoJSON file for the recorded frames
    #[arg(short, long)]
    output: PathBuf,

    /// Demo config JSON; the flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Name of the stop the segment starts at
    #[arg(long)]
    from: Option<String>,

    /// Name of the stop the segment ends at
    #[arg(long)]
    to: Option<String>,

    /// Measure in raw coordinate units instead of kilometers
    #[arg(long)]
    planar: bool,

    /// Record only every Nth frame
    #[arg(long, default_value = "1")]
    every: usize,

    /// Give up after this many frames
    #[arg(long, default_value = "200000")]
    max_frames: usize,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

/// Mirrors the map's train sources, keyed by train id.
#[derive(Default)]
struct FrameRecorder {
    markers: BTreeMap<String, Polygon>,
}

impl RenderSink for FrameRecorder {
    fn has_geometry(&self, id: &TrainIdentifier) -> bool {
        self.markers.contains_key(id.as_str())
    }

    fn upsert(&mut self, id: &TrainIdentifier, polygon: &Polygon) {
        self.markers.insert(id.to_string(), polygon.clone());
    }

    fn remove(&mut self, id: &TrainIdentifier) {
        self.markers.remove(id.as_str());
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let filter = FilterFn::new(|meta| {
        let module = meta.module_path().unwrap_or_default();
        module.starts_with("liner") || module.starts_with("train_replay")
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().without_time())
        .with(filter)
        .with(level)
        .init();
}

fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn load_config(args: &Args) -> Result<DemoConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            DemoConfig::from_json(&json).context("Failed to parse config")?
        }
        None => DemoConfig::default(),
    };

    config.sources = DataSources {
        stops: args.stops.clone(),
        route: args.route.clone(),
        ..config.sources
    };
    if let Some(from) = &args.from {
        config.origin = from.clone();
    }
    if let Some(to) = &args.to {
        config.destination = to.clone();
    }
    if args.planar {
        config.geometry = GeometryKind::Planar;
    }

    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    if args.every == 0 {
        bail!("--every must be at least 1");
    }

    tracing::info!(stops = %args.stops, route = %args.route, output = %args.output.display(), "=== Train replay ===");

    let config = load_config(&args)?;

    let fetcher: Box<dyn DataFetcher> = if is_remote(&config.sources.stops) || is_remote(&config.sources.route) {
        Box::new(HttpFetcher::new())
    } else {
        Box::new(FileFetcher::new(""))
    };

    // Phase 1: resolve the segment between the two stops
    tracing::info!(from = %config.origin, to = %config.destination, "Phase 1: resolving route segment");
    let geometry = config.geometry.adapter();
    let prepared = prepare_route(fetcher.as_ref(), &config, geometry.as_ref())
        .await
        .context("Failed to prepare route")?;

    // Phase 2: run the animation on a simulated frame clock
    tracing::info!(length = prepared.segment.length(), "Phase 2: replaying animation");
    let mut scheduler = Scheduler::new(geometry, prepared.segment, config.animation.clone())
        .context("Invalid animation config")?;

    let frame_interval = config.frame_interval();
    let mut recorder = FrameRecorder::default();
    let mut features = Vec::new();
    let mut frame = 0;

    while !scheduler.is_finished() {
        if frame >= args.max_frames {
            tracing::warn!(frames = frame, "animation still running at --max-frames, stopping early");
            break;
        }

        let now = frame_interval * u32::try_from(frame).context("Frame count overflow")?;
        scheduler.tick(now, &mut recorder);

        if frame % args.every == 0 {
            features.extend(frame_features(frame, &recorder.markers));
        }
        frame += 1;
    }

    tracing::info!(frames = frame, trains = scheduler.trains().len(), "replay finished");

    // Phase 3: write output
    tracing::info!("Phase 3: writing output");
    write_frames_geojson(features, &args.output)?;

    tracing::info!("=== Complete ===");
    Ok(())
}
