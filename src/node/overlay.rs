//! Screen-space copies of projected props.

use glam::Vec2;

use super::points::DisplayProperties;
use super::Nameable;
use crate::render::ActorId;

/// Reference viewport width, in pixels, that overlay scales are
/// normalized against.
pub const REFERENCE_WIDTH: f32 = 500.0;

/// A 2D copy of a point-bearing prop, living in normalized view
/// coordinates (the view center is `[0, 0]`, top-right is `[1, 1]`).
pub struct Overlay {
    actor: ActorId,
    name: String,
    points: Vec<Vec2>,
    position: Vec2,
    ontop: bool,
    /// Display properties carried over from the source prop.
    pub properties: DisplayProperties,
}

impl Overlay {
    /// Wrap projected points.
    #[must_use]
    pub fn new(points: Vec<Vec2>, properties: DisplayProperties) -> Self {
        Self {
            actor: ActorId::fresh(),
            name: String::new(),
            points,
            position: Vec2::ZERO,
            ontop: false,
            properties,
        }
    }

    /// Engine-side actor handle.
    #[must_use]
    pub fn actor(&self) -> ActorId {
        self.actor
    }

    /// Number of projected points.
    #[must_use]
    pub fn npoints(&self) -> usize {
        self.points.len()
    }

    /// Projected points, relative to the anchor position.
    #[must_use]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Anchor position in normalized view coordinates.
    #[must_use]
    pub fn pos(&self) -> Vec2 {
        self.position
    }

    /// Place the overlay at a normalized view position.
    pub fn set_pos(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Whether the overlay is drawn over the 3D scene.
    #[must_use]
    pub fn ontop(&self) -> bool {
        self.ontop
    }

    /// Set the draw-over-scene ordering flag.
    pub fn set_ontop(&mut self, ontop: bool) {
        self.ontop = ontop;
    }
}

impl Nameable for Overlay {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }
}
