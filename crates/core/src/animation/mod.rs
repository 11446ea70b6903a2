//! Trains moving along a route segment.
//!
//! A run launches a bounded batch of trains at a fixed interval. Each tick
//! of the [`Scheduler`] advances every active train, pushes its marker into a
//! [`RenderSink`](crate::render::RenderSink) and removes the markers of
//! trains that ran off the end of the segment.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::marker::MarkerShape;

pub mod scheduler;
pub mod train;

pub use scheduler::{Scheduler, TickReport};
pub use train::{Train, TrainState};

/// How progress advances between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pace {
    /// Fixed fraction of the segment per tick. Visual speed follows the
    /// display refresh rate.
    PerFrame { step: f64 },

    /// Fraction of the segment per second of elapsed time since launch.
    PerSecond { rate: f64 },
}

impl Default for Pace {
    fn default() -> Self {
        Pace::PerFrame { step: 0.0005 }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("train spacing must be a positive number, got {0}")]
    TrainSpacing(f64),

    #[error("progress per tick or per second must be a positive number, got {0}")]
    Pace(f64),

    #[error("lookahead must be a positive number, got {0}")]
    Lookahead(f64),

    #[error(
        "train spacing {spacing} plans {planned} trains per run, at most {max} are allowed",
        max = MAX_TRAINS
    )]
    TooManyTrains { spacing: f64, planned: usize },

    #[error("launch interval of {0} ms overflows the launch time of the last train")]
    LaunchInterval(u64),
}

/// Upper bound on the trains of one run; every tick walks all of them.
pub const MAX_TRAINS: usize = 10_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Delay between consecutive launches.
    pub launch_interval_ms: u64,

    /// Progress counted per launch when deciding how many trains a run has.
    pub train_spacing: f64,

    pub pace: Pace,

    /// Progress offset of the point the heading is aimed at.
    pub lookahead: f64,

    pub marker: MarkerShape,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            launch_interval_ms: 10_000,
            train_spacing: 2.0 * 0.002,
            pace: Pace::default(),
            lookahead: 0.002,
            marker: MarkerShape::default(),
        }
    }
}

impl AnimationConfig {
    pub fn launch_interval(&self) -> Duration {
        Duration::from_millis(self.launch_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.train_spacing.is_finite() && self.train_spacing > 0.0) {
            return Err(ConfigError::TrainSpacing(self.train_spacing));
        }

        let rate = match self.pace {
            Pace::PerFrame { step } => step,
            Pace::PerSecond { rate } => rate,
        };
        if !(rate.is_finite() && rate > 0.0) {
            return Err(ConfigError::Pace(rate));
        }

        if !(self.lookahead.is_finite() && self.lookahead > 0.0) {
            return Err(ConfigError::Lookahead(self.lookahead));
        }

        let planned = self.planned_trains();
        if planned > MAX_TRAINS {
            return Err(ConfigError::TooManyTrains {
                spacing: self.train_spacing,
                planned,
            });
        }

        if self.launch_at(planned - 1).is_none() {
            return Err(ConfigError::LaunchInterval(self.launch_interval_ms));
        }

        Ok(())
    }

    /// Launch time of the `sequence`-th train, `None` on overflow.
    pub fn launch_at(&self, sequence: usize) -> Option<Duration> {
        let sequence = u32::try_from(sequence).ok()?;
        self.launch_interval().checked_mul(sequence)
    }

    /// Number of trains in one run: launches continue while the progress
    /// covered by earlier launches (`train_spacing` each) is below one.
    pub fn planned_trains(&self) -> usize {
        ((1.0 / self.train_spacing) - 1e-9).ceil().max(1.0) as usize
    }
}
