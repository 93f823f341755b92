//! Geometry primitives shared by every layout operation.
//!
//! Everything here is plain `f64` math in page or parent space. Rotation is
//! always expressed in radians and applied counter-clockwise in a y-down
//! canvas (matching the host's page transforms).

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A point or offset vector in either page or parent space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate this vector about the origin by `angle` radians.
    #[must_use]
    pub fn rotate(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Componentwise product.
    #[must_use]
    pub fn mul_v(self, other: Self) -> Self {
        Self { x: self.x * other.x, y: self.y * other.y }
    }

    /// Componentwise minimum.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self { x: self.x.min(other.x), y: self.y.min(other.y) }
    }

    /// Componentwise maximum.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self { x: self.x.max(other.x), y: self.y.max(other.y) }
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y }
    }
}

/// Axis-aligned bounding rectangle in page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    #[must_use]
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Build bounds from a top-left corner and a size.
    #[must_use]
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { min_x: x, min_y: y, max_x: x + width, max_y: y + height }
    }

    /// Smallest bounds containing every point in `points`. `None` when empty.
    #[must_use]
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let init = Self::new(first.x, first.y, first.x, first.y);
        Some(rest.iter().fold(init, |b, p| Self {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        }))
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn mid_x(&self) -> f64 {
        (self.min_x + self.max_x) / 2.0
    }

    #[must_use]
    pub fn mid_y(&self) -> f64 {
        (self.min_y + self.max_y) / 2.0
    }

    /// Top-left corner.
    #[must_use]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.min_x, self.min_y)
    }

    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.mid_x(), self.mid_y())
    }

    /// Whether the vertical extents intersect. Touching edges count as overlap.
    #[must_use]
    pub fn overlaps_vertically(&self, other: &Self) -> bool {
        !(other.max_y < self.min_y || other.min_y > self.max_y)
    }

    /// Whether the two rectangles intersect. Touching edges count as overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.overlaps_vertically(other) && !(other.max_x < self.min_x || other.min_x > self.max_x)
    }

    #[must_use]
    pub fn translate(&self, delta: Vec2) -> Self {
        Self {
            min_x: self.min_x + delta.x,
            min_y: self.min_y + delta.y,
            max_x: self.max_x + delta.x,
            max_y: self.max_y + delta.y,
        }
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Rigid 2D transform: rotate about the origin, then translate.
///
/// A shape's page transform maps its local coordinates into page space;
/// `page_to_local` is the inverse mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec2,
    pub rotation: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self { translation: Vec2::ZERO, rotation: 0.0 };

    #[must_use]
    pub const fn new(translation: Vec2, rotation: f64) -> Self {
        Self { translation, rotation }
    }

    /// Map a local point into the outer (page) space.
    #[must_use]
    pub fn local_to_page(&self, point: Vec2) -> Vec2 {
        self.translation + point.rotate(self.rotation)
    }

    /// Map a page-space point into this transform's local space.
    #[must_use]
    pub fn page_to_local(&self, point: Vec2) -> Vec2 {
        (point - self.translation).rotate(-self.rotation)
    }

    /// Compose `self` (outer) with `inner`: the result maps `inner`-local
    /// points straight to the outer space.
    #[must_use]
    pub fn then(&self, inner: &Self) -> Self {
        Self {
            translation: self.local_to_page(inner.translation),
            rotation: self.rotation + inner.rotation,
        }
    }
}
