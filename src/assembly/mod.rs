//! Ordered, named collections of scene props treated as one object.

mod clone2d;

use std::fmt;
use std::rc::{Rc, Weak};

use glam::{Affine3A, Vec3};
pub use clone2d::Anchor;
use rustc_hash::FxHashMap;

use crate::group::Group;
use crate::math::Bounds3;
use crate::node::{
    share, HasScalarbar, InfoValue, Nameable, SceneNode, SharedNode,
};
use crate::render::{ActorId, CompositeContainer, PropComposite};
use crate::stats::HistogramSummary;

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// An ordered collection of logical objects grouped into a single
/// compound prop.
///
/// The assembly tracks a parallel list of object handles and engine-side
/// actors (`objects.len() == actors.len()`, same index correspondence);
/// every mutation keeps both lists and the underlying composite in sync.
pub struct Assembly {
    actor: ActorId,
    name: String,
    composite: Box<dyn CompositeContainer>,
    objects: Vec<SharedNode>,
    actors: Vec<ActorId>,
    /// Non-owning back-references from actor handles to their wrappers.
    by_actor: FxHashMap<ActorId, Weak<std::cell::RefCell<SceneNode>>>,
    /// Affine transform applied by the engine when drawing the compound.
    pub transform: Affine3A,
    origin: Vec3,
    scalarbar: Option<SharedNode>,
    /// Auxiliary metadata (e.g. alignment mean points under `"mean"`).
    pub info: FxHashMap<String, InfoValue>,
    /// Histogram summary, for histogram-like assemblies.
    pub summary: Option<HistogramSummary>,
}

impl Assembly {
    /// Group the given objects, preserving order.
    ///
    /// Only nodes the engine recognizes as 3D props (point sets and
    /// nested assemblies) are registered; scalarbars and overlays are
    /// skipped. Child scalarbars aggregate onto the assembly: none leaves
    /// the field empty, exactly one is adopted as-is, several are wrapped
    /// in a flat [`Group`].
    #[must_use]
    pub fn new<I>(objects: I) -> Self
    where
        I: IntoIterator<Item = SharedNode>,
    {
        Self::with_composite(objects, Box::new(PropComposite::new()))
    }

    /// Like [`new`](Self::new), driving an engine-provided composite.
    #[must_use]
    pub fn with_composite<I>(
        objects: I,
        composite: Box<dyn CompositeContainer>,
    ) -> Self
    where
        I: IntoIterator<Item = SharedNode>,
    {
        let mut assembly = Self {
            actor: ActorId::fresh(),
            name: "Assembly".to_owned(),
            composite,
            objects: Vec::new(),
            actors: Vec::new(),
            by_actor: FxHashMap::default(),
            transform: Affine3A::IDENTITY,
            origin: Vec3::ZERO,
            scalarbar: None,
            info: FxHashMap::default(),
            summary: None,
        };
        let mut bars = Vec::new();
        for node in objects {
            if let Some(bar) = assembly.register(node) {
                bars.push(bar);
            }
        }
        assembly.scalarbar = aggregate_scalarbars(bars);
        assembly
    }

    /// Group a name-to-object mapping, assigning each name to its object
    /// before registration.
    #[must_use]
    pub fn from_named<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, SharedNode)>,
    {
        let nodes: Vec<SharedNode> = pairs
            .into_iter()
            .map(|(name, node)| {
                node.borrow_mut().set_name(&name);
                node
            })
            .collect();
        Self::new(nodes)
    }

    /// Register one node into both lists and the composite. Returns the
    /// node's scalarbar when the node was accepted.
    fn register(&mut self, node: SharedNode) -> Option<SharedNode> {
        let (prop3d, actor, scalarbar) = {
            let n = node.borrow();
            (n.is_prop3d(), n.actor(), n.scalarbar())
        };
        if !prop3d {
            log::debug!(
                "assembly '{}': skipping non-3D prop '{}'",
                self.name,
                node.borrow().name()
            );
            return None;
        }
        self.composite.add_child(actor);
        self.actors.push(actor);
        let _ = self.by_actor.insert(actor, Rc::downgrade(&node));
        self.objects.push(node);
        scalarbar
    }

    /// Append one object, keeping lists, composite, and scalarbar
    /// aggregation in sync. Nodes without a 3D-prop actor are ignored.
    pub fn push(&mut self, node: SharedNode) {
        if let Some(bar) = self.register(node) {
            self.merge_scalarbar(bar);
        }
    }

    /// Fold an incoming scalarbar into the aggregate, unwrapping any
    /// group-typed scalarbar into its flat members first so groups never
    /// nest.
    fn merge_scalarbar(&mut self, incoming: SharedNode) {
        let Some(current) = self.scalarbar.take() else {
            self.scalarbar = Some(incoming);
            return;
        };
        let mut members = unwrap_scalarbar_group(&current);
        members.extend(unwrap_scalarbar_group(&incoming));
        self.scalarbar = Some(share(Group::from_nodes(members)));
    }

    // -- Access --

    /// Engine-side actor handle of the assembly itself.
    #[must_use]
    pub fn actor(&self) -> ActorId {
        self.actor
    }

    /// Number of objects in the assembly.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the assembly holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The ordered object list.
    #[must_use]
    pub fn unpack(&self) -> &[SharedNode] {
        &self.objects
    }

    /// The parallel actor list (same index correspondence as
    /// [`unpack`](Self::unpack)).
    #[must_use]
    pub fn actors(&self) -> &[ActorId] {
        &self.actors
    }

    /// The i-th object.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<SharedNode> {
        self.objects.get(i).map(Rc::clone)
    }

    /// The first object whose name matches `name` exactly, or `None`.
    #[must_use]
    pub fn get_named(&self, name: &str) -> Option<SharedNode> {
        self.objects
            .iter()
            .find(|o| o.borrow().name() == name)
            .map(Rc::clone)
    }

    /// Identity membership test against the raw object list (names play
    /// no part).
    #[must_use]
    pub fn contains(&self, node: &SharedNode) -> bool {
        self.objects.iter().any(|o| Rc::ptr_eq(o, node))
    }

    /// Resolve an actor handle back to its wrapper, if the wrapper is
    /// still alive.
    #[must_use]
    pub fn find_by_actor(&self, actor: ActorId) -> Option<SharedNode> {
        self.by_actor.get(&actor).and_then(Weak::upgrade)
    }

    /// The aggregated scalarbar (see [`new`](Self::new)).
    #[must_use]
    pub fn scalarbar_node(&self) -> Option<&SharedNode> {
        self.scalarbar.as_ref()
    }

    // -- Spatial state --

    /// Position (the transform's translation part).
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::from(self.transform.translation)
    }

    /// Set the position, leaving the rest of the transform untouched.
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.translation = position.into();
    }

    /// Translate by `delta`.
    pub fn shift(&mut self, delta: Vec3) {
        self.transform.translation += glam::Vec3A::from(delta);
    }

    /// Rotation pivot used by 2D projection.
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Set the rotation pivot.
    pub fn set_origin(&mut self, origin: Vec3) {
        self.origin = origin;
    }

    /// Union of the children's world bounds, shifted by the assembly
    /// position. Rotation/scale parts of the transform are the engine's
    /// concern and are not folded in here.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds3> {
        let merged = self
            .objects
            .iter()
            .filter_map(|n| n.borrow().bounds())
            .reduce(Bounds3::union)?;
        Some(merged.translated(self.position()))
    }

    // -- Flattening --

    /// Depth-first flatten of the assembly's contents.
    ///
    /// Direct children replace the assembly itself. A child that is an
    /// assembly contributes its own children: translated clones when the
    /// child sits at a nonzero position offset, the same handles (shared,
    /// not copied) otherwise. Non-assembly children are yielded as-is.
    #[must_use]
    pub fn recursive_unpack(&self) -> Vec<SharedNode> {
        let mut flat = Vec::new();
        for child in &self.objects {
            let nested = match &*child.borrow() {
                SceneNode::Assembly(a) => {
                    Some((a.position(), a.unpack().to_vec()))
                }
                _ => None,
            };
            match nested {
                Some((offset, grandchildren)) => {
                    if offset == Vec3::ZERO {
                        flat.extend(grandchildren);
                    } else {
                        flat.extend(
                            grandchildren
                                .iter()
                                .map(|g| clone_shifted(g, offset)),
                        );
                    }
                }
                None => flat.push(Rc::clone(child)),
            }
        }
        flat
    }

    /// Switch on visibility of the compound.
    pub fn on(&mut self) {
        self.composite.set_visible(true);
    }

    /// Switch off visibility of the compound.
    pub fn off(&mut self) {
        self.composite.set_visible(false);
    }

    /// Container visibility flag.
    #[must_use]
    pub fn visible(&self) -> bool {
        self.composite.visible()
    }

    /// Set the pickability flag on the assembly and on every flattened
    /// element. A full cascade, unlike [`Group::pickable`].
    pub fn pickable(&mut self, value: bool) {
        self.composite.set_pickable(value);
        for node in self.recursive_unpack() {
            node.borrow_mut().set_pickable(value);
        }
    }

    /// Whether the assembly container is pickable.
    #[must_use]
    pub fn is_pickable(&self) -> bool {
        self.composite.pickable()
    }

    // -- Cloning --

    /// Deep copy: every direct child is cloned and the clones are
    /// regrouped through [`new`](Self::new).
    ///
    /// The top-level transform is not carried over; the scalarbar
    /// aggregation is re-derived from the clones (which share their
    /// originals' scalarbar references).
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        let mut clone = Self::new(self.objects.iter().map(clone_node));
        clone.name.clone_from(&self.name);
        clone
    }
}

impl Nameable for Assembly {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }
}

impl HasScalarbar for Assembly {
    fn scalarbar(&self) -> Option<&SharedNode> {
        self.scalarbar.as_ref()
    }

    fn set_scalarbar(&mut self, scalarbar: Option<SharedNode>) {
        self.scalarbar = scalarbar;
    }
}

impl fmt::Debug for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assembly")
            .field("actor", &self.actor)
            .field("name", &self.name)
            .field("len", &self.len())
            .finish()
    }
}

impl fmt::Display for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Assembly: {} ({} objects)", self.name, self.len())?;
        let names: Vec<String> = self
            .objects
            .iter()
            .map(|n| n.borrow().name().to_owned())
            .filter(|n| !n.is_empty())
            .collect();
        if !names.is_empty() {
            write!(f, " [{}]", names.join(", "))?;
        }
        let p = self.position();
        write!(f, "\n  position: ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z)?;
        if let Some(b) = self.bounds() {
            write!(
                f,
                "\n  bounds  : x=({:.3}, {:.3}), y=({:.3}, {:.3}), z=({:.3}, {:.3})",
                b.min.x, b.max.x, b.min.y, b.max.y, b.min.z, b.max.z
            )?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Scalarbar aggregation per child-count: none, the one child's own bar,
/// or a flat group of all of them.
fn aggregate_scalarbars(mut bars: Vec<SharedNode>) -> Option<SharedNode> {
    match bars.len() {
        0 => None,
        1 => bars.pop(),
        _ => Some(share(Group::from_nodes(bars))),
    }
}

/// Flat members of a group-typed scalarbar; any other node stands alone.
fn unwrap_scalarbar_group(node: &SharedNode) -> Vec<SharedNode> {
    match &*node.borrow() {
        SceneNode::Group(g) => g.unpack(),
        _ => vec![Rc::clone(node)],
    }
}

/// Deep-clone one child node. Kinds without a deep-copy operation are
/// shared as-is.
fn clone_node(node: &SharedNode) -> SharedNode {
    match &*node.borrow() {
        SceneNode::Points(p) => share(p.deep_clone()),
        SceneNode::Assembly(a) => share(a.deep_clone()),
        _ => Rc::clone(node),
    }
}

/// Deep-clone and translate one flattened element.
fn clone_shifted(node: &SharedNode, delta: Vec3) -> SharedNode {
    match &*node.borrow() {
        SceneNode::Points(p) => {
            let mut c = p.deep_clone();
            c.shift(delta);
            share(c)
        }
        SceneNode::Assembly(a) => {
            let mut c = a.deep_clone();
            c.shift(delta);
            share(c)
        }
        _ => Rc::clone(node),
    }
}
