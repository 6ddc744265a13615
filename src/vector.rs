//! A small 2D vector with polar and Cartesian accessors.
//!
//! The camera uses it to turn "head towards that panel at N pixels per frame"
//! into a per-frame step.

use std::ops::{Add, Sub};

/// 2D vector in world (pixel) space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    x: f64,
    y: f64,
}

impl Vector2D {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a vector from Cartesian components.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a vector pointing at `angle` radians with length `magnitude`.
    pub fn from_polar(angle: f64, magnitude: f64) -> Self {
        let mut v = Self::ZERO;
        v.set_polar(angle, magnitude);
        v
    }

    /// Horizontal component.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Vertical component.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Sets the horizontal component.
    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    /// Sets the vertical component.
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Sets both Cartesian components.
    pub fn set(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Length of the vector.
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Direction of the vector in radians, as `atan2(y, x)`.
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Replaces the vector with one at `angle` radians of length `magnitude`.
    pub fn set_polar(&mut self, angle: f64, magnitude: f64) {
        self.x = magnitude * angle.cos();
        self.y = magnitude * angle.sin();
    }

    /// Points the vector at `angle` radians, keeping its current length.
    pub fn set_angle(&mut self, angle: f64) {
        let magnitude = self.magnitude();
        self.set_polar(angle, magnitude);
    }

    /// Rescales the vector to `magnitude`, keeping its direction.
    ///
    /// The zero vector has no direction, so it stays zero whatever the
    /// requested magnitude.
    pub fn set_magnitude(&mut self, magnitude: f64) {
        let current = self.magnitude();
        if current == 0.0 {
            *self = Self::ZERO;
            return;
        }
        let factor = magnitude / current;
        self.x *= factor;
        self.y *= factor;
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}
