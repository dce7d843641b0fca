//! Immutable 2D point/vector value used by every geometry and layout pass.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Z component of the 2D cross product `self × other`.
    pub fn cross(self, other: Point) -> f32 {
        self.x * other.y - self.y * other.x
    }

    pub fn dot(self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn distance(self, other: Point) -> f32 {
        (other - self).length()
    }

    pub fn distance_sq(self, other: Point) -> f32 {
        let d = other - self;
        d.dot(d)
    }

    /// Linear interpolation between `self` (t = 0) and `other` (t = 1).
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    pub fn midpoint(self, other: Point) -> Point {
        self.lerp(other, 0.5)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    fn mul(self, s: f32) -> Point {
        Point::new(self.x * s, self.y * s)
    }
}

/// Angle at vertex `b` of the triangle `a, b, c`, in radians.
///
/// Returns NaN when either leg has zero length; callers skip whatever depends
/// on the angle in that case. The cosine is clamped so nearly collinear
/// points do not fall outside the domain of `acos` through rounding.
pub fn angle(a: Point, b: Point, c: Point) -> f32 {
    let ab = b.distance(a);
    let bc = b.distance(c);
    let denom = ab * bc;
    if denom == 0.0 {
        return f32::NAN;
    }
    let cos = (a - b).dot(c - b) / denom;
    cos.max(-1.0).min(1.0).acos()
}
