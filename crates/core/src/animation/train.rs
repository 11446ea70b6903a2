use std::time::Duration;

use geo::Polygon;
use liner_transit::TrainIdentifier;

use crate::animation::{AnimationConfig, Pace};
use crate::geometry::GeometryAdapter;
use crate::segment::Segment;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrainState {
    /// Launch delay still running
    Pending,
    Active,
    /// Ran past the end of the segment; its marker has been removed
    Completed,
}

/// Outcome of one tick for a single train.
#[derive(Debug, Clone, PartialEq)]
pub enum TrainStep {
    Waiting,
    Moved(Polygon),
    Finished,
}

#[derive(Clone, Debug)]
pub struct Train {
    id: TrainIdentifier,
    sequence: usize,
    launch_at: Duration,
    state: TrainState,
    progress: f64,
    heading: f64,
}

impl Train {
    pub fn new(sequence: usize, launch_at: Duration) -> Self {
        Self {
            id: TrainIdentifier::from_sequence(sequence),
            sequence,
            launch_at,
            state: TrainState::Pending,
            progress: 0.0,
            heading: 0.0,
        }
    }

    pub fn id(&self) -> &TrainIdentifier {
        &self.id
    }

    pub fn sequence(&self) -> usize {
        self.sequence
    }

    pub fn launch_at(&self) -> Duration {
        self.launch_at
    }

    pub fn state(&self) -> TrainState {
        self.state
    }

    /// Progress the next frame will be drawn at.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Heading of the last drawn frame, in degrees.
    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub(crate) fn step(
        &mut self,
        now: Duration,
        geometry: &dyn GeometryAdapter,
        segment: &Segment,
        config: &AnimationConfig,
    ) -> TrainStep {
        match self.state {
            TrainState::Completed => return TrainStep::Finished,
            TrainState::Pending if now < self.launch_at => return TrainStep::Waiting,
            TrainState::Pending => {
                tracing::debug!(train = %self.id, "launching train");
                self.state = TrainState::Active;
            }
            TrainState::Active => {}
        }

        if let Pace::PerSecond { rate } = config.pace {
            self.progress = now.saturating_sub(self.launch_at).as_secs_f64() * rate;
        }

        if self.progress > 1.0 {
            tracing::debug!(train = %self.id, "train reached the end of the segment");
            self.state = TrainState::Completed;
            return TrainStep::Finished;
        }

        let point = segment.point_at(geometry, self.progress);
        let ahead = segment.point_at(geometry, (self.progress + config.lookahead).min(1.0));

        // At the end of the segment both points coincide; keep facing forward.
        if geometry.distance(point, ahead) > 0.0 {
            self.heading = geometry.bearing(point, ahead);
        }

        let polygon = config.marker.build(geometry, point, self.heading);

        if let Pace::PerFrame { step } = config.pace {
            self.progress += step;
        }

        TrainStep::Moved(polygon)
    }
}
