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

#![warn(missing_docs)]

//! Robot cleaning simulation.
//!
//! Autonomous cleaning robots move around a rectangular room until some fraction of the floor
//! tiles have been cleaned. A trial counts how many time-steps that takes, and a simulation
//! averages the count over many trials.
//!
//! The pieces, leaf first:
//!
//! - [`Position`] is a point in the room that can be translated by a heading and a speed.
//! - [`Room`] is a grid of tiles that remembers which tiles have been cleaned.
//! - [`Robot`] has a position, heading and speed, and moves according to a
//!   [`MovementStrategy`].
//! - [`simulation`] runs trials and averages them.
//! - [`experiment`] sweeps a parameter across both strategies and hands the series to a
//!   [`PlotSink`].
//!
//! Randomness always comes in as a `&mut Rng`, so seeding the generator makes every result
//! reproducible.

pub mod experiment;
pub mod observer;
pub mod position;
pub mod robot;
pub mod room;
pub mod simulation;

pub use experiment::{Plot, PlotSink, Series};
pub use observer::{CoverageHistory, NoopObserver, TrialObserver};
pub use position::Position;
pub use robot::{MovementStrategy, Robot};
pub use room::{Room, Tile};
pub use simulation::{run_simulation, run_simulation_with_observer, run_trial, SimulationConfig};

/// Real-valued coordinates, headings and speeds.
pub type Float = f64;

/// Pseudorandom source used for every draw in the simulation.
pub type Rng = rand_pcg::Pcg64;

/// Set type used for visited tiles.
pub type HashSet<T> = rustc_hash::FxHashSet<T>;

/// Robot cleaning error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CleaningError {
    /// An argument broke a precondition, e.g. a zero-sized room or a non-positive speed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No random heading led back inside the room within the allowed number of attempts.
    #[error("no valid heading found from {position} at speed {speed} after {attempts} attempts")]
    NoValidHeadingFound {
        /// Where the robot was standing.
        position: Position,
        /// The robot's speed.
        speed: Float,
        /// How many headings were tried.
        attempts: u32,
    },

    /// A trial ran for the maximum number of time-steps without reaching its coverage target.
    #[error("step limit of {steps} reached at coverage {coverage:.3}")]
    StepLimitExceeded {
        /// The step ceiling that was hit.
        steps: u64,
        /// Coverage ratio when the trial stopped.
        coverage: Float,
    },
}

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, CleaningError>;
