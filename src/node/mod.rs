//! The renderable-wrapper sum type and its shared handles.
//!
//! Every object a container can hold is one [`SceneNode`] kind: a
//! point-bearing prop, a nested assembly, a group, a scalarbar, or a 2D
//! overlay. Nodes are shared through [`SharedNode`] handles because the
//! containers rely on reference semantics: flattening yields the *same*
//! children when no positional offset applies, and 2D projection
//! deduplicates elements by handle identity.

mod overlay;
mod points;
mod scalarbar;

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
pub use overlay::{Overlay, REFERENCE_WIDTH};
pub use points::{DisplayProperties, PointSet, Representation};
pub use scalarbar::Scalarbar;

use crate::assembly::Assembly;
use crate::group::Group;
use crate::math::Bounds3;
use crate::render::ActorId;

// ---------------------------------------------------------------------------
// Capability traits
// ---------------------------------------------------------------------------

/// Anything that carries a human-readable name.
pub trait Nameable {
    /// Current name (possibly empty).
    fn name(&self) -> &str;
    /// Replace the name.
    fn set_name(&mut self, name: &str);
}

/// Anything that may carry a scalarbar legend.
///
/// Presence is an explicit optional, not a reflective probe: wrapper kinds
/// without the capability simply do not implement this trait.
pub trait HasScalarbar {
    /// The attached scalarbar, if any.
    fn scalarbar(&self) -> Option<&SharedNode>;
    /// Attach or detach a scalarbar.
    fn set_scalarbar(&mut self, scalarbar: Option<SharedNode>);
}

// ---------------------------------------------------------------------------
// SceneNode
// ---------------------------------------------------------------------------

/// A single renderable wrapper held by a container.
pub enum SceneNode {
    /// Point-bearing renderable prop.
    Points(PointSet),
    /// Nested assembly.
    Assembly(Assembly),
    /// Flat group of props.
    Group(Group),
    /// Legend overlay.
    Scalarbar(Scalarbar),
    /// Screen-space copy of a projected prop.
    Overlay(Overlay),
}

/// Shared single-threaded handle to a [`SceneNode`].
pub type SharedNode = Rc<RefCell<SceneNode>>;

/// Wrap a node kind into a shared handle.
pub fn share<N: Into<SceneNode>>(node: N) -> SharedNode {
    Rc::new(RefCell::new(node.into()))
}

impl SceneNode {
    /// Engine-side actor handle of this wrapper.
    #[must_use]
    pub fn actor(&self) -> ActorId {
        match self {
            Self::Points(p) => p.actor(),
            Self::Assembly(a) => a.actor(),
            Self::Group(g) => g.actor(),
            Self::Scalarbar(s) => s.actor(),
            Self::Overlay(o) => o.actor(),
        }
    }

    /// Current name of the wrapper.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Points(p) => p.name(),
            Self::Assembly(a) => a.name(),
            Self::Group(g) => g.name(),
            Self::Scalarbar(s) => s.name(),
            Self::Overlay(o) => o.name(),
        }
    }

    /// Rename the wrapper.
    pub fn set_name(&mut self, name: &str) {
        match self {
            Self::Points(p) => p.set_name(name),
            Self::Assembly(a) => a.set_name(name),
            Self::Group(g) => g.set_name(name),
            Self::Scalarbar(s) => s.set_name(name),
            Self::Overlay(o) => o.set_name(name),
        }
    }

    /// The wrapper's scalarbar, for kinds with the capability.
    #[must_use]
    pub fn scalarbar(&self) -> Option<SharedNode> {
        match self {
            Self::Points(p) => p.scalarbar().cloned(),
            Self::Assembly(a) => a.scalarbar().cloned(),
            Self::Group(g) => g.scalarbar().cloned(),
            Self::Scalarbar(_) | Self::Overlay(_) => None,
        }
    }

    /// Whether the engine recognizes this wrapper's actor as a 3D prop.
    ///
    /// Groups and 2D actors (scalarbars, overlays) are not 3D props and
    /// are skipped when an assembly registers parts.
    #[must_use]
    pub fn is_prop3d(&self) -> bool {
        matches!(self, Self::Points(_) | Self::Assembly(_))
    }

    /// World-frame bounds, when the wrapper occupies 3D space.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds3> {
        match self {
            Self::Points(p) => p.bounds(),
            Self::Assembly(a) => a.bounds(),
            Self::Group(g) => g.bounds(),
            Self::Scalarbar(_) | Self::Overlay(_) => None,
        }
    }

    /// Set the pickability flag. Assemblies cascade to every flattened
    /// element; groups set the container flag only.
    pub fn set_pickable(&mut self, pickable: bool) {
        match self {
            Self::Points(p) => p.set_pickable(pickable),
            Self::Assembly(a) => a.pickable(pickable),
            Self::Group(g) => g.pickable(pickable),
            Self::Scalarbar(_) | Self::Overlay(_) => {}
        }
    }

    /// Position offset for kinds that carry one.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        match self {
            Self::Points(p) => p.position(),
            Self::Assembly(a) => a.position(),
            Self::Group(_) | Self::Scalarbar(_) | Self::Overlay(_) => {
                Vec3::ZERO
            }
        }
    }
}

impl From<PointSet> for SceneNode {
    fn from(p: PointSet) -> Self {
        Self::Points(p)
    }
}

impl From<Assembly> for SceneNode {
    fn from(a: Assembly) -> Self {
        Self::Assembly(a)
    }
}

impl From<Group> for SceneNode {
    fn from(g: Group) -> Self {
        Self::Group(g)
    }
}

impl From<Scalarbar> for SceneNode {
    fn from(s: Scalarbar) -> Self {
        Self::Scalarbar(s)
    }
}

impl From<Overlay> for SceneNode {
    fn from(o: Overlay) -> Self {
        Self::Overlay(o)
    }
}

// ---------------------------------------------------------------------------
// Auxiliary metadata
// ---------------------------------------------------------------------------

/// Auxiliary metadata attached to containers, keyed by name.
///
/// Alignment stores its mean shape under `"mean"`.
#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    /// Free-form text.
    Text(String),
    /// A single scalar.
    Scalar(f64),
    /// A point array.
    Points(Vec<Vec3>),
}
