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

//! Points in the room.

use crate::Float;

/// A location in a two-dimensional room.
///
/// Positions are not bounded to any room; use [`crate::Room::contains_point`] to check. A
/// heading of 0 degrees points along +y ("north"), and headings grow clockwise, so 90 degrees
/// points along +x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    x: Float,
    y: Float,
}

impl Position {
    /// Create a new position.
    pub fn new(x: Float, y: Float) -> Self {
        Self { x, y }
    }

    /// The x coordinate.
    pub fn x(&self) -> Float {
        self.x
    }

    /// The y coordinate.
    pub fn y(&self) -> Float {
        self.y
    }

    /// Return the position reached by moving `speed` units along `angle_degrees`.
    ///
    /// The receiver is unchanged. Any real angle works, though callers normally keep it in
    /// `[0, 360)`.
    pub fn translate(&self, angle_degrees: Float, speed: Float) -> Position {
        let angle = angle_degrees.to_radians();
        let delta_x = speed * angle.sin();
        let delta_y = speed * angle.cos();
        Position::new(self.x + delta_x, self.y + delta_y)
    }

    /// Euclidean distance to another position.
    pub fn distance(&self, other: &Position) -> Float {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
