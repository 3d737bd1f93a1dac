//! Planar coordinate type.
//!
//! Network coordinates are simulator metres on a flat plane, so `Point` uses
//! `f64` and plain Euclidean geometry.  Double precision also guarantees the
//! XML rendering re-parses to the identical value.

use std::fmt;

/// An immutable 2-D position in metres.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in metres.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Bearing from `self` toward `to`, in radians within (-π, π].
    ///
    /// 0 points along +x (east), π/2 along +y (north).
    #[inline]
    pub fn direction(self, to: Point) -> f64 {
        (to.y - self.y).atan2(to.x - self.x)
    }
}

/// Renders as `x,y`, the simulator's shape-point syntax.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}
