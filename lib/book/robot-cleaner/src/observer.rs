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

//! Hooks for watching a trial as it runs.

use crate::{Float, Robot, Room};

/// Watches a trial as it runs, e.g. to animate it.
///
/// The trial only ever calls into the observer and never reads anything back.
pub trait TrialObserver {
    /// Called once before the first time-step.
    fn start(&mut self, _robot_count: usize, _width: usize, _height: usize) {}

    /// Called after every time-step, once every robot has moved.
    fn update(&mut self, room: &Room, robots: &[Robot]);

    /// Called once the trial has reached its coverage target.
    fn done(&mut self) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TrialObserver for NoopObserver {
    fn update(&mut self, _room: &Room, _robots: &[Robot]) {}
}

/// Records the coverage ratio after every time-step of every trial it watches.
#[derive(Debug, Default, Clone)]
pub struct CoverageHistory {
    trials: Vec<Vec<Float>>,
}

impl CoverageHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Coverage per time-step, one vector per trial.
    pub fn trials(&self) -> &[Vec<Float>] {
        &self.trials
    }
}

impl TrialObserver for CoverageHistory {
    fn start(&mut self, _robot_count: usize, _width: usize, _height: usize) {
        self.trials.push(Vec::new());
    }

    fn update(&mut self, room: &Room, _robots: &[Robot]) {
        if let Some(current) = self.trials.last_mut() {
            current.push(room.coverage());
        }
    }
}
