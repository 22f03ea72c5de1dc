use serde::{Deserialize, Serialize};
use std::ops::Add;

/// A 2-d cartesian value, used both as an absolute position and as a per-tick velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Heading of length `magnitude` pointing at `angle` radians.
    pub fn from_polar(angle: f64, magnitude: f64) -> Self {
        Self {
            x: angle.cos() * magnitude,
            y: angle.sin() * magnitude,
        }
    }

    pub fn add(self, other: Vector2) -> Vector2 {
        Vector2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    pub fn distance(self, other: Vector2) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    pub fn magnitude(self) -> f64 {
        self.distance(Vector2::ZERO)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, other: Vector2) -> Vector2 {
        Vector2::add(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_componentwise() {
        let a = Vector2::new(1.5, -2.0);
        let b = Vector2::new(0.5, 4.0);

        assert_eq!(a.add(b), Vector2::new(2.0, 2.0));
        assert_eq!(a + b, Vector2::new(2.0, 2.0));
        // operands are untouched
        assert_eq!(a, Vector2::new(1.5, -2.0));
    }

    #[test]
    fn zero_is_additive_identity() {
        let a = Vector2::new(-7.25, 3.0);
        assert_eq!(a + Vector2::ZERO, a);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(3.0, 4.0);

        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.distance(a), 5.0);
        assert_eq!(a.distance(a), 0.0);
    }

    #[test]
    fn polar_heading_has_requested_magnitude() {
        let v = Vector2::from_polar(1.234, 5.0);
        assert!((v.magnitude() - 5.0).abs() < 1e-9);

        let east = Vector2::from_polar(0.0, 2.0);
        assert_eq!(east, Vector2::new(2.0, 0.0));
    }
}
