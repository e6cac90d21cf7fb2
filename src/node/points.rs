//! Point-bearing renderable props.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::overlay::{Overlay, REFERENCE_WIDTH};
use super::{HasScalarbar, Nameable, SharedNode};
use crate::math::Bounds3;
use crate::render::ActorId;

/// How an actor's surface is drawn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    /// Filled surface.
    #[default]
    Surface,
    /// Edges only.
    Wireframe,
    /// Vertices only.
    Points,
}

/// Display properties mirrored onto the engine-side actor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayProperties {
    /// Surface representation mode.
    pub representation: Representation,
    /// RGB color in [0, 1].
    pub color: [f32; 3],
    /// Opacity in [0, 1].
    pub alpha: f32,
    /// Line width in pixels (wireframe and edge rendering).
    pub line_width: f32,
}

impl Default for DisplayProperties {
    fn default() -> Self {
        Self {
            representation: Representation::Surface,
            color: [0.8, 0.8, 0.8],
            alpha: 1.0,
            line_width: 1.0,
        }
    }
}

/// A named renderable entity backed by explicit geometric points.
///
/// This is the logical wrapper around one engine-side actor: troupe keeps
/// the points, the position offset, and the display properties; the engine
/// keeps the GPU-resident geometry the [`ActorId`] stands for.
pub struct PointSet {
    actor: ActorId,
    name: String,
    points: Vec<Vec3>,
    position: Vec3,
    /// Display properties forwarded to the actor.
    pub properties: DisplayProperties,
    scalarbar: Option<SharedNode>,
    pickable: bool,
}

impl PointSet {
    /// Wrap a set of points with default display properties.
    #[must_use]
    pub fn new(points: Vec<Vec3>) -> Self {
        Self {
            actor: ActorId::fresh(),
            name: String::new(),
            points,
            position: Vec3::ZERO,
            properties: DisplayProperties::default(),
            scalarbar: None,
            pickable: true,
        }
    }

    /// Builder-style name assignment.
    #[must_use]
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    /// Engine-side actor handle.
    #[must_use]
    pub fn actor(&self) -> ActorId {
        self.actor
    }

    /// Number of points.
    #[must_use]
    pub fn npoints(&self) -> usize {
        self.points.len()
    }

    /// Local-frame points (position offset not applied).
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Position offset.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Set the position offset.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Translate by `delta`.
    pub fn shift(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Pickability flag mirrored onto the actor.
    #[must_use]
    pub fn pickable(&self) -> bool {
        self.pickable
    }

    /// Set the pickability flag.
    pub fn set_pickable(&mut self, pickable: bool) {
        self.pickable = pickable;
    }

    /// World-frame bounds, or `None` when the set is empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds3> {
        Bounds3::from_points(self.points.iter().map(|p| *p + self.position))
    }

    /// Rotate the points about `around` (world frame) in the xy plane.
    pub fn rotate_z(&mut self, degrees: f32, around: Vec3) {
        let (sin, cos) = degrees.to_radians().sin_cos();
        for p in &mut self.points {
            let w = *p + self.position - around;
            let r = Vec3::new(
                w.x.mul_add(cos, -(w.y * sin)),
                w.x.mul_add(sin, w.y * cos),
                w.z,
            );
            *p = r + around - self.position;
        }
    }

    /// Deep copy with a fresh actor handle.
    ///
    /// The scalarbar reference is shared, not copied: legends are
    /// engine-owned overlays and a copy would desynchronize them.
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        Self {
            actor: ActorId::fresh(),
            name: self.name.clone(),
            points: self.points.clone(),
            position: self.position,
            properties: self.properties,
            scalarbar: self.scalarbar.clone(),
            pickable: self.pickable,
        }
    }

    /// Boundary-edge stand-in used when projecting wireframe props to 2D.
    ///
    /// Geometric edge extraction is the engine's job; the stand-in keeps
    /// the same points with line width 1 and the original color and
    /// opacity, drawn as a surface so the 2D projection is well-defined.
    #[must_use]
    pub fn boundaries(&self) -> Self {
        let mut b = self.deep_clone();
        b.properties.representation = Representation::Surface;
        b.properties.line_width = 1.0;
        b
    }

    /// Project onto the view plane, producing a screen-space copy.
    ///
    /// `offset` is subtracted in the source frame, then coordinates are
    /// scaled by `scale / REFERENCE_WIDTH` into normalized view units: a
    /// prop of x-extent `w` projected with `scale = k * REFERENCE_WIDTH / w`
    /// spans `k` normalized units.
    #[must_use]
    pub fn project_2d(&self, scale: f32, offset: Vec2) -> Overlay {
        let k = scale / REFERENCE_WIDTH;
        let points = self
            .points
            .iter()
            .map(|p| {
                let w = *p + self.position;
                Vec2::new((w.x - offset.x) * k, (w.y - offset.y) * k)
            })
            .collect();
        let mut overlay = Overlay::new(points, self.properties);
        overlay.set_name(&self.name);
        overlay
    }
}

impl Nameable for PointSet {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }
}

impl HasScalarbar for PointSet {
    fn scalarbar(&self) -> Option<&SharedNode> {
        self.scalarbar.as_ref()
    }

    fn set_scalarbar(&mut self, scalarbar: Option<SharedNode>) {
        self.scalarbar = scalarbar;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_include_position_offset() {
        let mut ps = PointSet::new(vec![Vec3::ZERO, Vec3::new(2.0, 1.0, 0.0)]);
        ps.shift(Vec3::new(10.0, 0.0, 0.0));
        let b = ps.bounds().unwrap();
        assert_eq!(b.min, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(b.max, Vec3::new(12.0, 1.0, 0.0));
    }

    #[test]
    fn rotate_z_quarter_turn_about_origin() {
        let mut ps = PointSet::new(vec![Vec3::new(1.0, 0.0, 0.5)]);
        ps.rotate_z(90.0, Vec3::ZERO);
        let p = ps.points()[0];
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 1.0).abs() < 1e-6);
        assert_eq!(p.z, 0.5);
    }

    #[test]
    fn deep_clone_mints_new_actor() {
        let ps = PointSet::new(vec![Vec3::ONE]).named("a");
        let cl = ps.deep_clone();
        assert_ne!(ps.actor(), cl.actor());
        assert_eq!(cl.name(), "a");
        assert_eq!(cl.points(), ps.points());
    }

    #[test]
    fn boundaries_preserve_color_and_reset_width() {
        let mut ps = PointSet::new(vec![Vec3::ONE]);
        ps.properties.representation = Representation::Wireframe;
        ps.properties.line_width = 4.0;
        ps.properties.color = [0.1, 0.2, 0.3];
        let b = ps.boundaries();
        assert_eq!(b.properties.representation, Representation::Surface);
        assert_eq!(b.properties.line_width, 1.0);
        assert_eq!(b.properties.color, [0.1, 0.2, 0.3]);
    }

    #[test]
    fn project_2d_scales_about_offset() {
        let ps = PointSet::new(vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 5.0, 3.0),
        ]);
        // scale chosen so 10 world units span 1.0 normalized units
        let ov = ps.project_2d(REFERENCE_WIDTH / 10.0, Vec2::ZERO);
        assert_eq!(ov.points()[0], Vec2::ZERO);
        assert!((ov.points()[1].x - 1.0).abs() < 1e-6);
        assert!((ov.points()[1].y - 0.5).abs() < 1e-6);
    }
}
