//! Fundamental geometric types for planar truss modelling.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Position in the plane measured in consistent length units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Distance along the global X axis.
    pub x: f64,
    /// Distance along the global Y axis.
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Return `true` when both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Vector2<f64>> for Point {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Point> for Vector2<f64> {
    fn from(value: Point) -> Self {
        value.to_vector()
    }
}

/// Cartesian vector representing a planar force.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Force {
    /// Force component acting along the global X axis.
    pub x: f64,
    /// Force component acting along the global Y axis.
    pub y: f64,
}

impl Force {
    /// Create a [`Force`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the force into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Return `true` when both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Force {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl std::ops::Add for Force {
    type Output = Force;

    fn add(self, rhs: Force) -> Force {
        Force::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::iter::Sum for Force {
    fn sum<I: Iterator<Item = Force>>(iter: I) -> Force {
        iter.fold(Force::default(), |acc, f| acc + f)
    }
}

impl From<Vector2<f64>> for Force {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Force> for Vector2<f64> {
    fn from(value: Force) -> Self {
        value.to_vector()
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use trussx_joints::point;
///
/// let origin = point(0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Convenience helper for creating [`Force`] instances.
///
/// # Examples
/// ```
/// use trussx_joints::force;
///
/// let load = force(1.0, -5.0);
/// assert_eq!(load.y, -5.0);
/// ```
#[must_use]
pub const fn force(x: f64, y: f64) -> Force {
    Force::new(x, y)
}
