//! Legend/color-scale overlays associated with colored props.

use super::Nameable;
use crate::render::ActorId;

/// A legend overlay mapping a scalar range to a color scale.
///
/// The gradient itself is engine-owned; troupe only tracks the handle,
/// the title, and the mapped range so containers can aggregate legends.
pub struct Scalarbar {
    actor: ActorId,
    name: String,
    /// Title drawn alongside the color scale.
    pub title: String,
    /// Scalar range mapped onto the color scale.
    pub range: (f32, f32),
}

impl Scalarbar {
    /// New legend for the given scalar range.
    #[must_use]
    pub fn new(title: &str, range: (f32, f32)) -> Self {
        Self {
            actor: ActorId::fresh(),
            name: title.to_owned(),
            title: title.to_owned(),
            range,
        }
    }

    /// Engine-side actor handle.
    #[must_use]
    pub fn actor(&self) -> ActorId {
        self.actor
    }
}

impl Nameable for Scalarbar {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }
}
