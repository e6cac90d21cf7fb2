//! Axis-aligned bounds math shared by the composite containers.
//!
//! Bounds queries on individual actors belong to the rendering engine;
//! this module only merges and translates boxes the containers already
//! know about.

use glam::Vec3;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Bounds3 {
    /// Create a box from explicit corners. No ordering check is performed.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing the given points, or `None` for an empty set.
    #[must_use]
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = Self::new(first, first);
        for p in iter {
            b.min = b.min.min(p);
            b.max = b.max.max(p);
        }
        Some(b)
    }

    /// Smallest box enclosing both boxes.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Box midpoint.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Per-axis extents.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Width along the x axis.
    #[must_use]
    pub fn x_extent(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// The box shifted by `delta`.
    #[must_use]
    pub fn translated(self, delta: Vec3) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_encloses_all() {
        let b = Bounds3::from_points([
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-3.0, 4.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
        ])
        .unwrap();
        assert_eq!(b.min, Vec3::new(-3.0, -2.0, -1.0));
        assert_eq!(b.max, Vec3::new(1.0, 4.0, 0.5));
    }

    #[test]
    fn from_points_empty_is_none() {
        assert!(Bounds3::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn union_and_center() {
        let a = Bounds3::new(Vec3::ZERO, Vec3::ONE);
        let b = Bounds3::new(Vec3::splat(2.0), Vec3::splat(3.0));
        let u = a.union(b);
        assert_eq!(u.min, Vec3::ZERO);
        assert_eq!(u.max, Vec3::splat(3.0));
        assert_eq!(u.center(), Vec3::splat(1.5));
        assert_eq!(u.x_extent(), 3.0);
    }

    #[test]
    fn translated_moves_both_corners() {
        let b = Bounds3::new(Vec3::ZERO, Vec3::ONE)
            .translated(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.min, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.max, Vec3::new(2.0, 3.0, 4.0));
    }
}
