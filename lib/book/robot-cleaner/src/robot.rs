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

//! Robots and how they move.

use rand::Rng as _;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{CleaningError, Float, Position, Result, Rng, Room};

/// How many random headings a robot tries after hitting a wall before giving up.
pub const DEFAULT_MAX_HEADING_ATTEMPTS: u32 = 10_000;

/// The rule a robot follows on every time-step.
///
/// Both strategies move straight ahead when they can. When the next position would be outside
/// the room, they keep drawing random headings from the current position until one lands
/// inside, then move there. The difference is what happens after a normal move:
///
/// - `Standard` keeps its heading, so it travels in straight lines and bounces off walls.
/// - `RandomWalk` picks a new random heading after every move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementStrategy {
    /// Straight lines, new heading only at walls.
    Standard,

    /// New heading after every step.
    RandomWalk,
}

impl MovementStrategy {
    /// Short machine-friendly name.
    pub fn name(&self) -> &'static str {
        match self {
            MovementStrategy::Standard => "standard",
            MovementStrategy::RandomWalk => "random_walk",
        }
    }

    /// Every strategy, in a fixed order.
    pub fn all() -> [MovementStrategy; 2] {
        [MovementStrategy::Standard, MovementStrategy::RandomWalk]
    }

    /// Advance `robot` by one time-step in `room`, cleaning the tile it lands on.
    ///
    /// Returns the robot's new position. If no heading leads back inside the room within the
    /// robot's attempt budget the robot is left untouched and
    /// [`CleaningError::NoValidHeadingFound`] is returned.
    pub fn step(self, robot: &mut Robot, room: &mut Room, rng: &mut Rng) -> Result<Position> {
        let candidate = robot.position.translate(robot.heading, robot.speed);
        if room.contains_point(&candidate) {
            robot.position = candidate;
            room.mark_visited(&candidate);
            if self == MovementStrategy::RandomWalk {
                robot.heading = random_heading(rng);
            }
            return Ok(candidate);
        }

        let (heading, candidate) = robot.find_heading_into(room, rng)?;
        robot.heading = heading;
        robot.position = candidate;
        room.mark_visited(&candidate);
        Ok(candidate)
    }
}

impl std::fmt::Display for MovementStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovementStrategy::Standard => write!(f, "StandardRobot"),
            MovementStrategy::RandomWalk => write!(f, "RandomWalkRobot"),
        }
    }
}

impl std::str::FromStr for MovementStrategy {
    type Err = CleaningError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(MovementStrategy::Standard),
            "random_walk" | "random-walk" | "randomwalk" => Ok(MovementStrategy::RandomWalk),
            _ => Err(CleaningError::InvalidArgument(format!(
                "unknown movement strategy: {}",
                s
            ))),
        }
    }
}

/// A uniformly random heading in `[0, 360)`.
pub fn random_heading(rng: &mut Rng) -> Float {
    rng.gen_range(0.0..360.0)
}

/// A cleaning robot. It has a position, a heading in degrees and a fixed speed.
///
/// A robot doesn't own its room. The trial owns the room and lends it to each robot when the
/// robot steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Robot {
    position: Position,
    heading: Float,
    speed: Float,
    strategy: MovementStrategy,
    max_heading_attempts: u32,
}

impl Robot {
    /// Place a robot at a random position with a random heading, and clean the tile it starts on.
    pub fn new(
        room: &mut Room,
        speed: Float,
        strategy: MovementStrategy,
        rng: &mut Rng,
    ) -> Result<Self> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(CleaningError::InvalidArgument(format!(
                "speed must be positive and finite, got {}",
                speed
            )));
        }
        let position = room.random_position(rng);
        let heading = random_heading(rng);
        room.mark_visited(&position);
        Ok(Self {
            position,
            heading,
            speed,
            strategy,
            max_heading_attempts: DEFAULT_MAX_HEADING_ATTEMPTS,
        })
    }

    /// Limit how many random headings are tried after hitting a wall. At least one is always
    /// tried.
    pub fn with_max_heading_attempts(mut self, attempts: u32) -> Self {
        self.max_heading_attempts = attempts.max(1);
        self
    }

    /// Current position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Current heading in degrees.
    pub fn heading(&self) -> Float {
        self.heading
    }

    /// Distance covered per time-step.
    pub fn speed(&self) -> Float {
        self.speed
    }

    /// The movement strategy.
    pub fn strategy(&self) -> MovementStrategy {
        self.strategy
    }

    /// Move the robot without cleaning anything.
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Point the robot at `heading` degrees, wrapped into `[0, 360)`.
    pub fn set_heading(&mut self, heading: Float) {
        let heading = heading.rem_euclid(360.0);
        // rem_euclid rounds tiny negative inputs up to exactly 360.
        self.heading = if heading >= 360.0 { 0.0 } else { heading };
    }

    /// Simulate one time-step with this robot's strategy.
    pub fn step(&mut self, room: &mut Room, rng: &mut Rng) -> Result<Position> {
        let strategy = self.strategy;
        strategy.step(self, room, rng)
    }

    fn find_heading_into(&self, room: &Room, rng: &mut Rng) -> Result<(Float, Position)> {
        for _ in 0..self.max_heading_attempts {
            let heading = random_heading(rng);
            let candidate = self.position.translate(heading, self.speed);
            if room.contains_point(&candidate) {
                return Ok((heading, candidate));
            }
        }
        warn!(
            position = %self.position,
            speed = self.speed,
            attempts = self.max_heading_attempts,
            "no heading leads back into the room"
        );
        Err(CleaningError::NoValidHeadingFound {
            position: self.position,
            speed: self.speed,
            attempts: self.max_heading_attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use rand::SeedableRng;

    use crate::Rng;

    fn placed_robot(
        room: &mut Room,
        strategy: MovementStrategy,
        position: Position,
        heading: Float,
        rng: &mut Rng,
    ) -> Robot {
        let mut robot = Robot::new(room, 1.0, strategy, rng).unwrap();
        robot.set_position(position);
        robot.set_heading(heading);
        robot
    }

    #[test]
    fn test_new_robot_cleans_starting_tile() {
        let mut rng = Rng::seed_from_u64(42);
        let mut room = Room::new(5, 5).unwrap();
        let robot = Robot::new(&mut room, 1.0, MovementStrategy::Standard, &mut rng).unwrap();
        assert_eq!(room.visited_count(), 1);
        let tile = crate::Tile::from_position(&robot.position());
        assert!(room.is_visited(tile.x, tile.y));
        assert!(room.contains_point(&robot.position()));
        assert!((0.0..360.0).contains(&robot.heading()));
    }

    #[test]
    fn test_new_robot_rejects_bad_speed() {
        let mut rng = Rng::seed_from_u64(42);
        let mut room = Room::new(5, 5).unwrap();
        for speed in [0.0, -1.0, Float::NAN, Float::INFINITY] {
            let result = Robot::new(&mut room, speed, MovementStrategy::Standard, &mut rng);
            assert!(
                matches!(result, Err(CleaningError::InvalidArgument(_))),
                "speed {} should be rejected",
                speed
            );
        }
        assert_eq!(room.visited_count(), 0);
    }

    #[test]
    fn test_set_heading_wraps() {
        let mut rng = Rng::seed_from_u64(42);
        let mut room = Room::new(5, 5).unwrap();
        let mut robot = Robot::new(&mut room, 1.0, MovementStrategy::Standard, &mut rng).unwrap();
        robot.set_heading(450.0);
        assert_abs_diff_eq!(robot.heading(), 90.0);
        robot.set_heading(-90.0);
        assert_abs_diff_eq!(robot.heading(), 270.0);
        robot.set_heading(-1e-20);
        assert!((0.0..360.0).contains(&robot.heading()), "{}", robot.heading());
        robot.set_heading(360.0);
        assert_eq!(robot.heading(), 0.0);
    }

    #[test]
    fn test_standard_keeps_heading_on_successful_step() {
        let mut rng = Rng::seed_from_u64(42);
        let mut room = Room::new(5, 5).unwrap();
        let mut robot = placed_robot(
            &mut room,
            MovementStrategy::Standard,
            Position::new(2.5, 2.5),
            90.0,
            &mut rng,
        );

        let new_position = robot.step(&mut room, &mut rng).unwrap();
        assert_eq!(new_position, robot.position());
        assert_abs_diff_eq!(new_position.x(), 3.5, epsilon = 1e-12);
        assert_abs_diff_eq!(new_position.y(), 2.5, epsilon = 1e-12);
        assert_eq!(robot.heading(), 90.0);
        assert!(room.is_visited(3, 2));
    }

    #[test]
    fn test_random_walk_changes_heading_on_successful_step() {
        let mut rng = Rng::seed_from_u64(42);
        let mut room = Room::new(5, 5).unwrap();
        let mut robot = placed_robot(
            &mut room,
            MovementStrategy::RandomWalk,
            Position::new(2.5, 2.5),
            0.0,
            &mut rng,
        );

        let new_position = robot.step(&mut room, &mut rng).unwrap();
        assert_abs_diff_eq!(new_position.x(), 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(new_position.y(), 3.5, epsilon = 1e-12);
        assert_ne!(robot.heading(), 0.0);
        assert!((0.0..360.0).contains(&robot.heading()));
        assert!(room.is_visited(2, 3));
    }

    #[test]
    fn test_wall_hit_picks_new_heading_and_moves() {
        for strategy in MovementStrategy::all() {
            let mut rng = Rng::seed_from_u64(7);
            let mut room = Room::new(5, 5).unwrap();
            let start = Position::new(4.5, 2.5);
            let mut robot = placed_robot(&mut room, strategy, start, 90.0, &mut rng);

            let new_position = robot.step(&mut room, &mut rng).unwrap();
            assert!(room.contains_point(&new_position));
            assert_eq!(new_position, robot.position());
            assert_abs_diff_eq!(start.distance(&new_position), 1.0, epsilon = 1e-9);
            assert_ne!(robot.heading(), 90.0);

            // The committed heading is the one that produced the new position.
            let replayed = start.translate(robot.heading(), robot.speed());
            assert_abs_diff_eq!(replayed.x(), new_position.x(), epsilon = 1e-9);
            assert_abs_diff_eq!(replayed.y(), new_position.y(), epsilon = 1e-9);

            let tile = crate::Tile::from_position(&new_position);
            assert!(room.is_visited(tile.x, tile.y));
        }
    }

    #[test]
    fn test_no_valid_heading_is_reported() {
        let mut rng = Rng::seed_from_u64(42);
        let mut room = Room::new(1, 1).unwrap();
        let mut robot = Robot::new(&mut room, 5.0, MovementStrategy::Standard, &mut rng)
            .unwrap()
            .with_max_heading_attempts(100);
        let before = robot.clone();

        let result = robot.step(&mut room, &mut rng);
        assert_eq!(
            result,
            Err(CleaningError::NoValidHeadingFound {
                position: before.position(),
                speed: 5.0,
                attempts: 100,
            })
        );
        assert_eq!(robot, before);
        assert_eq!(room.visited_count(), 1);
    }

    #[test]
    fn test_strategy_names_round_trip_through_from_str() {
        for strategy in MovementStrategy::all() {
            assert_eq!(strategy.name().parse::<MovementStrategy>(), Ok(strategy));
        }
        assert_eq!(
            "Random-Walk".parse::<MovementStrategy>(),
            Ok(MovementStrategy::RandomWalk)
        );
        assert!("diagonal".parse::<MovementStrategy>().is_err());
    }

    #[test]
    fn test_strategy_serializes_as_snake_case() {
        let json = serde_json::to_string(&MovementStrategy::RandomWalk).unwrap();
        assert_eq!(json, "\"random_walk\"");
    }

    proptest! {
        #[test]
        fn test_step_always_stays_inside(
            seed in any::<u64>(),
            width in 1..10usize,
            height in 1..10usize,
            speed in 0.05..0.5f64,
            random_walk in any::<bool>(),
        ) {
            let strategy = if random_walk {
                MovementStrategy::RandomWalk
            } else {
                MovementStrategy::Standard
            };
            let mut rng = Rng::seed_from_u64(seed);
            let mut room = Room::new(width, height).unwrap();
            let mut robot = Robot::new(&mut room, speed, strategy, &mut rng).unwrap();
            for _ in 0..50 {
                let before = robot.position();
                let after = robot.step(&mut room, &mut rng).unwrap();
                prop_assert!(room.contains_point(&after));
                prop_assert!((before.distance(&after) - speed).abs() < 1e-9);
                prop_assert!(room.visited_count() <= room.tile_count());
            }
        }
    }
}
