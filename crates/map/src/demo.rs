//! Loading the route and driving animation runs against a map.

use std::sync::Arc;
use std::time::Duration;

use liner_core::animation::{AnimationConfig, ConfigError, Scheduler, TickReport};
use liner_core::geometry::GeometryAdapter;
use liner_core::render::RenderSink;
use liner_core::segment::{Segment, SegmentError, resolve_segment};
use liner_transit::network::{DataFetcher, fetch_route, fetch_stops};
use liner_transit::{Route, StaticTransitProvider, TransitError, TransitProvider, TransitStation};
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::campaign::CampaignGate;
use crate::config::DemoConfig;
use crate::state::MapState;
use crate::style::MapStyle;

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("failed to load {url}")]
    DataFetchFailure {
        url: String,
        #[source]
        source: TransitError,
    },

    #[error(transparent)]
    Transit(#[from] TransitError),

    #[error("cannot animate along the route: {0}")]
    DegenerateSegment(#[from] SegmentError),

    #[error("invalid animation config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("invalid map style: {0}")]
    Style(#[from] serde_json::Error),
}

/// The two stations and the stretch of line between them.
#[derive(Clone)]
pub struct PreparedRoute {
    pub origin: Arc<dyn TransitStation>,
    pub destination: Arc<dyn TransitStation>,
    pub segment: Segment,
}

impl std::fmt::Debug for PreparedRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedRoute")
            .field("origin", &self.origin.name())
            .field("destination", &self.destination.name())
            .field("segment", &self.segment)
            .finish()
    }
}

/// Fetch stops and route, look up both configured stations and cut the
/// route down to the stretch between them.
///
/// Every failure is logged before it is returned; nothing is retried.
pub async fn prepare_route(
    fetcher: &dyn DataFetcher,
    config: &DemoConfig,
    geometry: &dyn GeometryAdapter,
) -> Result<PreparedRoute, DemoError> {
    let stops = fetch_stops(fetcher, &config.sources.stops)
        .await
        .map_err(|source| data_fetch_failure(&config.sources.stops, source))?;

    let provider = StaticTransitProvider::from_stations(stops);
    let find = |name: &str| {
        provider
            .station_by_name(name)
            .inspect_err(|e| tracing::error!(station = name, error = %e, "station lookup failed"))
    };
    let origin = find(&config.origin)?;
    let destination = find(&config.destination)?;

    let route = fetch_route(fetcher, &config.sources.route)
        .await
        .map_err(|source| data_fetch_failure(&config.sources.route, source))?;

    let segment = resolve_segment(geometry, route.geometry(), origin.location(), destination.location())
        .inspect_err(|e| tracing::error!(error = %e, "could not resolve route segment"))?;

    tracing::info!(
        origin = origin.name(),
        destination = destination.name(),
        route = %route.id(),
        length = segment.length(),
        "route segment ready"
    );

    Ok(PreparedRoute {
        origin,
        destination,
        segment,
    })
}

fn data_fetch_failure(url: &str, source: TransitError) -> DemoError {
    tracing::error!(url, error = %source, "failed to load data");
    DemoError::DataFetchFailure {
        url: url.to_string(),
        source,
    }
}

/// Owns at most one animation run at a time.
///
/// [`start`](Self::start) is the user trigger: it clears whatever the
/// previous run left on the map and launches a fresh batch of trains.
pub struct AnimationController {
    geometry: Arc<dyn GeometryAdapter>,
    segment: Segment,
    config: AnimationConfig,
    run: Option<(Scheduler, Instant)>,
}

impl AnimationController {
    pub fn new(
        geometry: Arc<dyn GeometryAdapter>,
        segment: Segment,
        config: AnimationConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            geometry,
            segment,
            config,
            run: None,
        })
    }

    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Whether a run has been started and still has trains to move.
    pub fn is_running(&self) -> bool {
        self.run
            .as_ref()
            .is_some_and(|(scheduler, _)| !scheduler.is_finished())
    }

    pub fn start(&mut self, sink: &mut dyn RenderSink) -> Result<(), ConfigError> {
        self.stop(sink);

        let scheduler = Scheduler::new(
            self.geometry.clone(),
            self.segment.clone(),
            self.config.clone(),
        )?;
        self.run = Some((scheduler, Instant::now()));
        Ok(())
    }

    /// Remove every marker of the current run. Returns how many were removed.
    pub fn stop(&mut self, sink: &mut dyn RenderSink) -> usize {
        match self.run.take() {
            Some((mut scheduler, _)) => scheduler.stop(sink),
            None => 0,
        }
    }

    /// Advance the current run to the present. `None` when nothing runs.
    pub fn tick(&mut self, sink: &mut dyn RenderSink) -> Option<TickReport> {
        let (scheduler, started) = self.run.as_mut()?;
        Some(scheduler.tick(started.elapsed(), sink))
    }

    /// Tick the current run every `frame_interval` until all of its trains
    /// have completed. Returns the number of frames drawn.
    ///
    /// The sink is locked once per frame, so other tasks may read the map
    /// between frames.
    pub async fn run<S>(&mut self, sink: &Mutex<S>, frame_interval: Duration) -> usize
    where
        S: RenderSink + Send,
    {
        let mut interval = tokio::time::interval(frame_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut frames = 0;
        while self.is_running() {
            interval.tick().await;

            let mut guard = sink.lock().await;
            if let Some(report) = self.tick(&mut *guard) {
                frames += 1;
                if report.launched > 0 || report.completed > 0 {
                    tracing::debug!(?report, "frame");
                }
            }
        }

        tracing::info!(frames, "animation run finished");
        frames
    }
}

/// Everything the demo page holds once the map has loaded.
pub struct DemoSession {
    pub map: Mutex<MapState>,
    pub route: PreparedRoute,
    pub controller: AnimationController,
    pub gate: CampaignGate,
    pub frame_interval: Duration,
}

impl DemoSession {
    pub async fn load(fetcher: &dyn DataFetcher, config: &DemoConfig) -> Result<Self, DemoError> {
        let style = MapStyle::bundled(&config.sources)?;
        let map = MapState::new(style, config.camera.clone(), config.paint.clone());

        let geometry = config.geometry.adapter();
        let route = prepare_route(fetcher, config, geometry.as_ref()).await?;
        let controller =
            AnimationController::new(geometry, route.segment.clone(), config.animation.clone())?;

        Ok(Self {
            map: Mutex::new(map),
            route,
            controller,
            gate: CampaignGate::new(config.geofence.clone(), config.operating_hours),
            frame_interval: config.frame_interval(),
        })
    }

    /// Start a fresh run and animate it to completion.
    pub async fn play(&mut self) -> Result<usize, DemoError> {
        self.controller.start(&mut *self.map.lock().await)?;
        Ok(self.controller.run(&self.map, self.frame_interval).await)
    }
}
