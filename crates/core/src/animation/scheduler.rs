use std::sync::Arc;
use std::time::Duration;

use crate::animation::train::{Train, TrainState, TrainStep};
use crate::animation::{AnimationConfig, ConfigError};
use crate::geometry::GeometryAdapter;
use crate::render::RenderSink;
use crate::segment::Segment;

/// Counts of what happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub launched: usize,
    pub rendered: usize,
    pub completed: usize,
    pub pending: usize,
    pub active: usize,
}

/// Central loop for one animation run.
///
/// Every train of the run is created up front in the pending state with a
/// staggered launch time; [`Scheduler::tick`] is called once per frame with
/// the time elapsed since the run started.
pub struct Scheduler {
    geometry: Arc<dyn GeometryAdapter>,
    segment: Segment,
    config: AnimationConfig,
    trains: Vec<Train>,
}

impl Scheduler {
    pub fn new(
        geometry: Arc<dyn GeometryAdapter>,
        segment: Segment,
        config: AnimationConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let trains = (0..config.planned_trains())
            .map(|sequence| {
                config
                    .launch_at(sequence)
                    .map(|launch_at| Train::new(sequence, launch_at))
                    .ok_or(ConfigError::LaunchInterval(config.launch_interval_ms))
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!(
            trains = trains.len(),
            length = segment.length(),
            "scheduled animation run"
        );

        Ok(Self {
            geometry,
            segment,
            config,
            trains,
        })
    }

    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    pub fn is_finished(&self) -> bool {
        self.trains
            .iter()
            .all(|t| t.state() == TrainState::Completed)
    }

    /// Advance every train to `now` (elapsed since the run started).
    ///
    /// Trains are independent; only the sink is shared between them.
    pub fn tick(&mut self, now: Duration, sink: &mut dyn RenderSink) -> TickReport {
        let mut report = TickReport::default();

        for train in &mut self.trains {
            let was = train.state();
            if was == TrainState::Completed {
                continue;
            }

            match train.step(now, self.geometry.as_ref(), &self.segment, &self.config) {
                TrainStep::Waiting => report.pending += 1,
                TrainStep::Moved(polygon) => {
                    if was == TrainState::Pending {
                        report.launched += 1;
                    }
                    sink.upsert(train.id(), &polygon);
                    report.rendered += 1;
                    report.active += 1;
                }
                TrainStep::Finished => {
                    sink.remove(train.id());
                    report.completed += 1;
                }
            }
        }

        report
    }

    /// Remove every live marker and discard all trains of the run.
    ///
    /// Returns how many markers were removed.
    pub fn stop(&mut self, sink: &mut dyn RenderSink) -> usize {
        let mut removed = 0;
        for train in self.trains.drain(..) {
            if train.state() == TrainState::Active || sink.has_geometry(train.id()) {
                sink.remove(train.id());
                removed += 1;
            }
        }

        tracing::info!(removed, "stopped animation run");
        removed
    }
}
