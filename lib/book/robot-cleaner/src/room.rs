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

//! The room and its tiles.

use rand::Rng as _;

use crate::{CleaningError, Float, HashSet, Position, Result, Rng};

/// One unit cell of the room's floor, identified by its integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tile {
    /// Column, counted from the left wall.
    pub x: i64,
    /// Row, counted from the bottom wall.
    pub y: i64,
}

impl Tile {
    /// The tile under a position. Coordinates are truncated toward zero.
    pub fn from_position(pos: &Position) -> Self {
        Self {
            x: pos.x().trunc() as i64,
            y: pos.y().trunc() as i64,
        }
    }
}

/// Number of tiles in a `width` x `height` room, or [`CleaningError::InvalidArgument`] if a
/// dimension is zero or the product overflows.
pub fn checked_tile_count(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(CleaningError::InvalidArgument(format!(
            "room dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    width.checked_mul(height).ok_or_else(|| {
        CleaningError::InvalidArgument(format!("room of {}x{} tiles is too large", width, height))
    })
}

/// A rectangular room made of `width * height` tiles, each either clean or dirty.
///
/// The room spans `[0, width) x [0, height)`. Every tile starts dirty, and a tile is cleaned
/// once a robot has stood on it.
#[derive(Debug, Clone)]
pub struct Room {
    width: usize,
    height: usize,
    tile_count: usize,
    visited: HashSet<Tile>,
}

impl Room {
    /// Create a room where every tile is dirty. Both dimensions must be positive and the tile
    /// count must fit in a `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let tile_count = checked_tile_count(width, height)?;
        Ok(Self {
            width,
            height,
            tile_count,
            visited: HashSet::default(),
        })
    }

    /// Width of the room in tiles.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the room in tiles.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Mark the tile under `pos` as cleaned. Returns true if the tile was dirty before.
    ///
    /// Positions outside the room are ignored, so the number of cleaned tiles can never exceed
    /// [`Room::tile_count`].
    pub fn mark_visited(&mut self, pos: &Position) -> bool {
        if !self.contains_point(pos) {
            return false;
        }
        self.visited.insert(Tile::from_position(pos))
    }

    /// Whether the tile at column `m`, row `n` has been cleaned.
    pub fn is_visited(&self, m: i64, n: i64) -> bool {
        self.visited.contains(&Tile { x: m, y: n })
    }

    /// Total number of tiles in the room.
    pub fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Number of cleaned tiles.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Fraction of the room that has been cleaned, in `[0, 1]`.
    pub fn coverage(&self) -> Float {
        self.visited_count() as Float / self.tile_count() as Float
    }

    /// Iterate over the cleaned tiles in no particular order.
    pub fn visited_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.visited.iter()
    }

    /// A uniformly random position inside the room.
    pub fn random_position(&self, rng: &mut Rng) -> Position {
        Position::new(
            rng.gen_range(0.0..self.width as Float),
            rng.gen_range(0.0..self.height as Float),
        )
    }

    /// Whether `pos` is inside the room. The lower walls are inside, the upper walls are not.
    pub fn contains_point(&self, pos: &Position) -> bool {
        (0.0..self.width as Float).contains(&pos.x())
            && (0.0..self.height as Float).contains(&pos.y())
    }

    /// Draw the room as text, top row first: `R` for a robot, `#` for a clean tile and `.` for
    /// a dirty one.
    pub fn render(&self, robots: &[Position]) -> String {
        let robot_tiles: HashSet<Tile> = robots
            .iter()
            .filter(|pos| self.contains_point(pos))
            .map(Tile::from_position)
            .collect();

        let mut s = String::with_capacity((self.width + 1) * self.height);
        for row in (0..self.height as i64).rev() {
            for col in 0..self.width as i64 {
                let tile = Tile { x: col, y: row };
                let c = if robot_tiles.contains(&tile) {
                    'R'
                } else if self.visited.contains(&tile) {
                    '#'
                } else {
                    '.'
                };
                s.push(c);
            }
            if row > 0 {
                s.push('\n');
            }
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use rand::SeedableRng;

    use crate::Rng;

    #[test]
    fn test_new_room_is_dirty() {
        let room = Room::new(4, 3).unwrap();
        assert_eq!(room.tile_count(), 12);
        assert_eq!(room.visited_count(), 0);
        assert_abs_diff_eq!(room.coverage(), 0.0);
        for m in 0..4 {
            for n in 0..3 {
                assert!(!room.is_visited(m, n));
            }
        }
    }

    #[test]
    fn test_zero_sized_room_is_rejected() {
        assert!(matches!(
            Room::new(0, 5),
            Err(CleaningError::InvalidArgument(_))
        ));
        assert!(matches!(
            Room::new(5, 0),
            Err(CleaningError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_oversized_room_is_rejected() {
        assert!(matches!(
            Room::new(usize::MAX / 2, 3),
            Err(CleaningError::InvalidArgument(_))
        ));
        assert!(matches!(
            checked_tile_count(usize::MAX, 2),
            Err(CleaningError::InvalidArgument(_))
        ));
        let room = Room::new(usize::MAX, 1).unwrap();
        assert_eq!(room.tile_count(), usize::MAX);
    }

    #[test]
    fn test_mark_visited_truncates_toward_zero() {
        let mut room = Room::new(5, 5).unwrap();
        assert!(room.mark_visited(&Position::new(1.99, 3.01)));
        assert!(room.is_visited(1, 3));
        assert!(!room.is_visited(2, 3));
        assert!(!room.is_visited(1, 4));
        assert_eq!(room.visited_count(), 1);
    }

    #[test]
    fn test_mark_visited_is_idempotent() {
        let mut room = Room::new(5, 5).unwrap();
        assert!(room.mark_visited(&Position::new(2.2, 2.2)));
        assert!(!room.mark_visited(&Position::new(2.8, 2.9)));
        assert!(!room.mark_visited(&Position::new(2.2, 2.2)));
        assert_eq!(room.visited_count(), 1);
    }

    #[test]
    fn test_mark_visited_ignores_outside_positions() {
        let mut room = Room::new(2, 2).unwrap();
        assert!(!room.mark_visited(&Position::new(-0.5, 0.5)));
        assert!(!room.mark_visited(&Position::new(2.0, 0.5)));
        assert!(!room.mark_visited(&Position::new(0.5, 7.0)));
        assert_eq!(room.visited_count(), 0);
    }

    #[test]
    fn test_contains_point_boundaries() {
        let room = Room::new(5, 3).unwrap();
        assert!(room.contains_point(&Position::new(0.0, 0.0)));
        assert!(room.contains_point(&Position::new(4.999, 2.999)));
        assert!(!room.contains_point(&Position::new(5.0, 0.0)));
        assert!(!room.contains_point(&Position::new(0.0, 3.0)));
        assert!(!room.contains_point(&Position::new(-0.001, 1.0)));
        assert!(!room.contains_point(&Position::new(1.0, -0.001)));
        assert!(!room.contains_point(&Position::new(Float::NAN, 1.0)));
    }

    #[test]
    fn test_full_coverage() {
        let mut room = Room::new(3, 2).unwrap();
        for m in 0..3 {
            for n in 0..2 {
                room.mark_visited(&Position::new(m as Float + 0.5, n as Float + 0.5));
            }
        }
        assert_eq!(room.visited_count(), room.tile_count());
        assert_abs_diff_eq!(room.coverage(), 1.0);
    }

    #[test]
    fn test_render() {
        let mut room = Room::new(3, 2).unwrap();
        room.mark_visited(&Position::new(0.5, 0.5));
        room.mark_visited(&Position::new(2.5, 1.5));
        let rendered = room.render(&[Position::new(1.5, 0.2)]);
        assert_eq!(rendered, "..#\n#R.");
    }

    #[test]
    fn test_visited_tiles() {
        let mut room = Room::new(3, 3).unwrap();
        room.mark_visited(&Position::new(0.5, 0.5));
        room.mark_visited(&Position::new(2.5, 1.5));
        let mut tiles: Vec<Tile> = room.visited_tiles().copied().collect();
        tiles.sort();
        assert_eq!(tiles, vec![Tile { x: 0, y: 0 }, Tile { x: 2, y: 1 }]);
    }

    proptest! {
        #[test]
        fn test_random_position_is_inside(
            seed in any::<u64>(),
            width in 1..50usize,
            height in 1..50usize,
        ) {
            let mut rng = Rng::seed_from_u64(seed);
            let room = Room::new(width, height).unwrap();
            for _ in 0..20 {
                let pos = room.random_position(&mut rng);
                prop_assert!(room.contains_point(&pos), "{} outside {}x{}", pos, width, height);
            }
        }

        #[test]
        fn test_contains_point_near_upper_corner(
            width in 1..100usize,
            height in 1..100usize,
            eps in 1e-6..0.5f64,
        ) {
            let room = Room::new(width, height).unwrap();
            let w = width as Float;
            let h = height as Float;
            prop_assert!(room.contains_point(&Position::new(w - eps, h - eps)));
            prop_assert!(!room.contains_point(&Position::new(w, 0.0)));
            prop_assert!(!room.contains_point(&Position::new(0.0, h)));
            prop_assert!(room.contains_point(&Position::new(0.0, 0.0)));
        }

        #[test]
        fn test_visited_count_never_exceeds_tile_count(
            width in 1..8usize,
            height in 1..8usize,
            points in prop::collection::vec((-2.0..10.0f64, -2.0..10.0f64), 0..200),
        ) {
            let mut room = Room::new(width, height).unwrap();
            for (x, y) in points {
                let before = room.visited_count();
                let newly = room.mark_visited(&Position::new(x, y));
                let after = room.visited_count();
                prop_assert_eq!(after, before + usize::from(newly));
                prop_assert!(after <= room.tile_count());
            }
        }
    }
}
