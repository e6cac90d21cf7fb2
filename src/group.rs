//! Flat, unordered grouping of arbitrary renderable props.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::math::Bounds3;
use crate::node::{HasScalarbar, Nameable, SharedNode};
use crate::render::{ActorId, CompositeContainer, PropComposite};
use crate::stats::HistogramSummary;

/// A flat bag of props toggled (shown, hidden, picked) as one.
///
/// Unlike [`Assembly`](crate::assembly::Assembly), a group keeps no
/// parallel object list and no name index: membership is whatever the
/// underlying composite currently holds. Pickability is a container-level
/// flag and does not cascade into members.
pub struct Group {
    actor: ActorId,
    name: String,
    composite: Box<dyn CompositeContainer>,
    registry: FxHashMap<ActorId, SharedNode>,
    scalarbar: Option<SharedNode>,
    /// Histogram summary carried over from a projected assembly.
    pub summary: Option<HistogramSummary>,
}

impl Group {
    /// Empty group. Groups start out non-pickable.
    #[must_use]
    pub fn new() -> Self {
        Self::with_composite(Box::new(PropComposite::new()))
    }

    /// Empty group driving an engine-provided composite.
    #[must_use]
    pub fn with_composite(mut composite: Box<dyn CompositeContainer>) -> Self {
        composite.set_pickable(false);
        Self {
            actor: ActorId::fresh(),
            name: "Group".to_owned(),
            composite,
            registry: FxHashMap::default(),
            scalarbar: None,
            summary: None,
        }
    }

    /// Group the given nodes, preserving order.
    #[must_use]
    pub fn from_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = SharedNode>,
    {
        let mut group = Self::new();
        group.add(nodes);
        group
    }

    /// Group a name-to-node mapping, assigning each name to its node.
    #[must_use]
    pub fn from_named<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, SharedNode)>,
    {
        let mut group = Self::new();
        for (name, node) in pairs {
            node.borrow_mut().set_name(&name);
            group.add_node(node);
        }
        group
    }

    /// Engine-side actor handle of the group itself.
    #[must_use]
    pub fn actor(&self) -> ActorId {
        self.actor
    }

    /// Append each node's actor to the composite. No duplicate check;
    /// order preserved.
    pub fn add<I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = SharedNode>,
    {
        for node in nodes {
            self.add_node(node);
        }
    }

    /// Append a single node.
    pub fn add_node(&mut self, node: SharedNode) {
        let actor = node.borrow().actor();
        self.composite.add_child(actor);
        let _ = self.registry.insert(actor, node);
    }

    /// Remove all parts. Idempotent.
    pub fn clear(&mut self) {
        self.composite.remove_all();
        self.registry.clear();
    }

    /// Switch on visibility.
    pub fn on(&mut self) {
        self.composite.set_visible(true);
    }

    /// Switch off visibility.
    pub fn off(&mut self) {
        self.composite.set_visible(false);
    }

    /// Container visibility flag.
    #[must_use]
    pub fn visible(&self) -> bool {
        self.composite.visible()
    }

    /// Set the pickability flag of the group container only. Members are
    /// left untouched.
    pub fn pickable(&mut self, value: bool) {
        self.composite.set_pickable(value);
    }

    /// Whether the group container is pickable.
    #[must_use]
    pub fn is_pickable(&self) -> bool {
        self.composite.pickable()
    }

    /// Set whether the group participates in scene bounds computation.
    pub fn use_bounds(&mut self, value: bool) {
        self.composite.set_use_bounds(value);
    }

    /// The flat member list, by traversing the composite's current
    /// children. Membership reflects actual current parts, not
    /// construction history.
    #[must_use]
    pub fn unpack(&self) -> Vec<SharedNode> {
        self.composite
            .children()
            .into_iter()
            .filter_map(|actor| self.registry.get(&actor).map(Rc::clone))
            .collect()
    }

    /// Number of parts currently in the composite.
    #[must_use]
    pub fn len(&self) -> usize {
        self.composite.children().len()
    }

    /// Whether the composite currently holds no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Union of the members' world bounds.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds3> {
        self.unpack()
            .iter()
            .filter_map(|n| n.borrow().bounds())
            .reduce(Bounds3::union)
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

impl Nameable for Group {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: &str) {
        self.name = name.to_owned();
    }
}

impl HasScalarbar for Group {
    fn scalarbar(&self) -> Option<&SharedNode> {
        self.scalarbar.as_ref()
    }

    fn set_scalarbar(&mut self, scalarbar: Option<SharedNode>) {
        self.scalarbar = scalarbar;
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("actor", &self.actor)
            .field("name", &self.name)
            .field("len", &self.len())
            .finish()
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Group: {} ({} props)", self.name, self.len())?;
        let names: Vec<String> = self
            .unpack()
            .iter()
            .map(|n| n.borrow().name().to_owned())
            .filter(|n| !n.is_empty())
            .collect();
        if !names.is_empty() {
            write!(f, " [{}]", names.join(", "))?;
        }
        Ok(())
    }
}
