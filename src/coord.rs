//! World-space coordinate used for every position the model owns.
//!
//! `z` never takes part in gameplay; it is carried so positions can be
//! handed to a 3D-aware presentation layer unchanged.

use std::ops::{Add, AddAssign, Mul};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Coord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Coord {
    pub const ZERO: Coord = Coord::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Coord {
        Coord { x, y, z }
    }

    /// Vertical offset of `distance` towards the top of the play field.
    pub const fn up(distance: f32) -> Coord {
        Coord::new(0.0, distance, 0.0)
    }

    /// Unit step towards the bottom of the play field.
    pub const fn down() -> Coord {
        Coord::new(0.0, -1.0, 0.0)
    }

    pub const fn down_by(distance: f32) -> Coord {
        Coord::new(0.0, -distance, 0.0)
    }

    pub const fn left() -> Coord {
        Coord::new(-1.0, 0.0, 0.0)
    }

    pub const fn right() -> Coord {
        Coord::new(1.0, 0.0, 0.0)
    }

    pub fn add(self, other: Coord) -> Coord {
        self + other
    }

    pub fn scale(self, k: f32) -> Coord {
        self * k
    }

    /// Limit `value` to `[min, max]`. Unlike `f32::clamp` this never panics
    /// on an inverted range; `min` wins.
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Coord {
    fn add_assign(&mut self, rhs: Coord) {
        *self = *self + rhs;
    }
}

impl Mul<f32> for Coord {
    type Output = Coord;

    fn mul(self, k: f32) -> Coord {
        Coord::new(self.x * k, self.y * k, self.z * k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_inverted_range_prefers_min() {
        assert_eq!(Coord::clamp(0.0, 3.0, -3.0), 3.0);
    }

    #[test]
    fn add_assign_matches_add() {
        let mut a = Coord::new(1.0, 2.0, 0.0);
        a += Coord::up(0.5);
        assert_eq!(a, Coord::new(1.0, 2.5, 0.0));
    }
}
