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

//! Trials and simulations.
//!
//! A trial drops `robot_count` robots into a fresh room and steps them until the room is
//! cleaned to `min_coverage`. A simulation runs `trial_count` trials and averages the step
//! counts.

use tracing::debug;

use crate::observer::{NoopObserver, TrialObserver};
use crate::robot::DEFAULT_MAX_HEADING_ATTEMPTS;
use crate::room::checked_tile_count;
use crate::{CleaningError, Float, MovementStrategy, Result, Rng, Robot, Room};

/// Default ceiling on the number of time-steps in one trial.
pub const DEFAULT_MAX_STEPS: u64 = 10_000_000;

/// Parameters for a simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Number of robots in the room.
    pub robot_count: usize,
    /// Distance every robot covers per time-step.
    pub speed: Float,
    /// Room width in tiles.
    pub width: usize,
    /// Room height in tiles.
    pub height: usize,
    /// Fraction of tiles, in `[0, 1]`, that must be clean to end a trial.
    pub min_coverage: Float,
    /// Number of trials to average over.
    pub trial_count: usize,
    /// How the robots move.
    pub strategy: MovementStrategy,
    /// Random headings a robot tries after hitting a wall before the trial fails.
    pub max_heading_attempts: u32,
    /// Time-steps after which a trial fails. `None` means no limit.
    pub max_steps: Option<u64>,
}

impl SimulationConfig {
    /// Create a config with the default retry and step ceilings.
    pub fn new(
        robot_count: usize,
        speed: Float,
        width: usize,
        height: usize,
        min_coverage: Float,
        trial_count: usize,
        strategy: MovementStrategy,
    ) -> Self {
        Self {
            robot_count,
            speed,
            width,
            height,
            min_coverage,
            trial_count,
            strategy,
            max_heading_attempts: DEFAULT_MAX_HEADING_ATTEMPTS,
            max_steps: Some(DEFAULT_MAX_STEPS),
        }
    }

    /// Check every parameter, returning [`CleaningError::InvalidArgument`] for the first bad one.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(CleaningError::InvalidArgument(msg));
        if self.robot_count == 0 {
            return invalid("robot_count must be positive".to_string());
        }
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return invalid(format!("speed must be positive and finite, got {}", self.speed));
        }
        checked_tile_count(self.width, self.height)?;
        if !(0.0..=1.0).contains(&self.min_coverage) {
            return invalid(format!(
                "min_coverage must be in [0, 1], got {}",
                self.min_coverage
            ));
        }
        if self.trial_count == 0 {
            return invalid("trial_count must be positive".to_string());
        }
        if self.max_heading_attempts == 0 {
            return invalid("max_heading_attempts must be positive".to_string());
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new(1, 1.0, 20, 20, 0.8, 20, MovementStrategy::Standard)
    }
}

/// Run one trial and return how many time-steps it took to reach `min_coverage`.
///
/// Every robot moves once per time-step, always in the same order, and each robot sees the
/// tiles cleaned by the robots before it.
pub fn run_trial(
    config: &SimulationConfig,
    rng: &mut Rng,
    observer: &mut dyn TrialObserver,
) -> Result<u64> {
    config.validate()?;
    trial(config, rng, observer)
}

fn trial(
    config: &SimulationConfig,
    rng: &mut Rng,
    observer: &mut dyn TrialObserver,
) -> Result<u64> {
    let mut room = Room::new(config.width, config.height)?;
    let mut robots = Vec::with_capacity(config.robot_count);
    for _ in 0..config.robot_count {
        let robot = Robot::new(&mut room, config.speed, config.strategy, rng)?;
        robots.push(robot.with_max_heading_attempts(config.max_heading_attempts));
    }

    observer.start(config.robot_count, config.width, config.height);

    let mut steps: u64 = 0;
    while room.coverage() < config.min_coverage {
        if let Some(max_steps) = config.max_steps {
            if steps >= max_steps {
                return Err(CleaningError::StepLimitExceeded {
                    steps: max_steps,
                    coverage: room.coverage(),
                });
            }
        }
        steps += 1;
        for robot in robots.iter_mut() {
            robot.step(&mut room, rng)?;
        }
        observer.update(&room, &robots);
    }
    observer.done();

    debug!(
        steps,
        coverage = room.coverage(),
        robots = config.robot_count,
        strategy = config.strategy.name(),
        "trial finished"
    );
    Ok(steps)
}

/// Run `trial_count` trials and return the mean number of time-steps, truncated toward zero.
pub fn run_simulation(config: &SimulationConfig, rng: &mut Rng) -> Result<u64> {
    run_simulation_with_observer(config, rng, &mut NoopObserver)
}

/// Like [`run_simulation`], but every trial reports to `observer`.
pub fn run_simulation_with_observer(
    config: &SimulationConfig,
    rng: &mut Rng,
    observer: &mut dyn TrialObserver,
) -> Result<u64> {
    config.validate()?;
    let mut total: u64 = 0;
    for _ in 0..config.trial_count {
        total += trial(config, rng, observer)?;
    }
    let mean = total / config.trial_count as u64;
    debug!(
        trials = config.trial_count,
        mean,
        strategy = config.strategy.name(),
        "simulation finished"
    );
    Ok(mean)
}
