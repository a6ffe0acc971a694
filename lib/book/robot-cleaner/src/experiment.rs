/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

//! Parameter sweeps that compare the two movement strategies.
//!
//! Each sweep runs [`run_simulation`] for every strategy at every point of a swept parameter and
//! hands the finished [`Plot`] to a [`PlotSink`]. Drawing the plot is the sink's business.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::simulation::run_simulation;
use crate::{CleaningError, Float, MovementStrategy, Result, Rng, SimulationConfig};

/// Robot counts swept by default.
pub const DEFAULT_ROBOT_COUNTS: [usize; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// Room widths swept by default. Heights are chosen to keep the area near
/// [`DEFAULT_ROOM_AREA`].
pub const DEFAULT_ROOM_WIDTHS: [usize; 4] = [10, 20, 25, 50];

/// Room area used by the aspect ratio sweep.
pub const DEFAULT_ROOM_AREA: usize = 300;

/// One line on a plot: the average time-steps of one strategy at each x value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Legend label.
    pub label: String,
    /// Strategy the series was measured with.
    pub strategy: MovementStrategy,
    /// Swept parameter values.
    pub x: Vec<Float>,
    /// Mean time-steps at each x value.
    pub y: Vec<u64>,
}

/// A finished plot, ready to be drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plot {
    /// Plot title.
    pub title: String,
    /// X axis label.
    pub x_label: String,
    /// Y axis label.
    pub y_label: String,
    /// One series per strategy.
    pub series: Vec<Series>,
}

/// Receives finished plots. Nothing is read back.
pub trait PlotSink {
    /// Draw, store or print the plot.
    fn plot(&mut self, plot: &Plot);
}

impl PlotSink for Vec<Plot> {
    fn plot(&mut self, plot: &Plot) {
        self.push(plot.clone());
    }
}

/// Base configuration for the robot count sweep: one to ten robots at speed 1.0 in a 20x20
/// room, cleaning 80%, 20 trials per point.
pub fn robot_count_base() -> SimulationConfig {
    SimulationConfig::new(1, 1.0, 20, 20, 0.8, 20, MovementStrategy::Standard)
}

/// Base configuration for the aspect ratio sweep: two robots at speed 1.0 cleaning 80%, 200
/// trials per point.
pub fn aspect_ratio_base() -> SimulationConfig {
    SimulationConfig::new(2, 1.0, 20, 15, 0.8, 200, MovementStrategy::Standard)
}

fn empty_series(x_len: usize) -> Vec<Series> {
    MovementStrategy::all()
        .iter()
        .map(|&strategy| Series {
            label: strategy.to_string(),
            strategy,
            x: Vec::with_capacity(x_len),
            y: Vec::with_capacity(x_len),
        })
        .collect()
}

fn coverage_percent(config: &SimulationConfig) -> Float {
    (config.min_coverage * 100.0).round()
}

/// Time to clean the room as a function of the number of robots.
///
/// `robot_count` and `strategy` in `base` are overridden at every point.
pub fn plot_by_robot_count(
    robot_counts: &[usize],
    base: &SimulationConfig,
    rng: &mut Rng,
    sink: &mut dyn PlotSink,
) -> Result<Plot> {
    let (first, last) = match (robot_counts.first(), robot_counts.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => {
            return Err(CleaningError::InvalidArgument(
                "robot_counts must not be empty".to_string(),
            ))
        }
    };

    let mut series = empty_series(robot_counts.len());
    for &robot_count in robot_counts {
        info!(robots = robot_count, "plotting robot count");
        for line in series.iter_mut() {
            let config = SimulationConfig {
                robot_count,
                strategy: line.strategy,
                ..base.clone()
            };
            line.x.push(robot_count as Float);
            line.y.push(run_simulation(&config, rng)?);
        }
    }

    let plot = Plot {
        title: format!(
            "Time It Takes {} - {} Robots To Clean {}% Of A Room",
            first,
            last,
            coverage_percent(base)
        ),
        x_label: "Number of Robots".to_string(),
        y_label: "Time-steps".to_string(),
        series,
    };
    sink.plot(&plot);
    Ok(plot)
}

/// Time to clean rooms of roughly equal area but different shapes.
///
/// For each width the height is `area / width` and the x value is `width / height`. `width`,
/// `height` and `strategy` in `base` are overridden at every point.
pub fn plot_by_aspect_ratio(
    widths: &[usize],
    area: usize,
    base: &SimulationConfig,
    rng: &mut Rng,
    sink: &mut dyn PlotSink,
) -> Result<Plot> {
    if widths.is_empty() {
        return Err(CleaningError::InvalidArgument(
            "widths must not be empty".to_string(),
        ));
    }

    let mut series = empty_series(widths.len());
    for &width in widths {
        let height = if width == 0 { 0 } else { area / width };
        if height == 0 {
            return Err(CleaningError::InvalidArgument(format!(
                "width {} leaves no room for a row in area {}",
                width, area
            )));
        }
        info!(width, height, "plotting aspect ratio");
        let aspect_ratio = width as Float / height as Float;
        for line in series.iter_mut() {
            let config = SimulationConfig {
                width,
                height,
                strategy: line.strategy,
                ..base.clone()
            };
            line.x.push(aspect_ratio);
            line.y.push(run_simulation(&config, rng)?);
        }
    }

    let plot = Plot {
        title: format!(
            "Time It Takes {} Robots To Clean {}% Of Variously Shaped Rooms",
            base.robot_count,
            coverage_percent(base)
        ),
        x_label: "Aspect Ratio".to_string(),
        y_label: "Time-steps".to_string(),
        series,
    };
    sink.plot(&plot);
    Ok(plot)
}
