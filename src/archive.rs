//! Archived prop descriptors.
//!
//! An archive is a JSON array of [`PropDescriptor`] entries. Loading
//! reconstructs one point set per entry; saving writes the point-set
//! children of an assembly back out. Anything richer (mesh topology,
//! textures) belongs to the engine's own file formats.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::assembly::Assembly;
use crate::error::TroupeError;
use crate::node::{
    share, DisplayProperties, Nameable, PointSet, SceneNode, SharedNode,
};

/// Serialized description of one point-bearing prop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PropDescriptor {
    /// Prop name.
    pub name: String,
    /// Position offset.
    pub position: [f32; 3],
    /// Local-frame points.
    pub points: Vec<[f32; 3]>,
    /// Display properties.
    pub properties: DisplayProperties,
}

impl PropDescriptor {
    /// Describe an existing point set.
    #[must_use]
    pub fn from_point_set(ps: &PointSet) -> Self {
        Self {
            name: ps.name().to_owned(),
            position: ps.position().to_array(),
            points: ps.points().iter().map(|p| p.to_array()).collect(),
            properties: ps.properties,
        }
    }

    /// Reconstruct the described point set.
    #[must_use]
    pub fn into_point_set(self) -> PointSet {
        let mut ps = PointSet::new(
            self.points.into_iter().map(Vec3::from).collect(),
        )
        .named(&self.name);
        ps.set_position(Vec3::from(self.position));
        ps.properties = self.properties;
        ps
    }
}

/// Load a descriptor array from a JSON archive.
///
/// # Errors
///
/// [`TroupeError::Io`] when the file cannot be read and
/// [`TroupeError::ArchiveParse`] when it is not a descriptor array.
pub fn load_descriptors(
    path: &Path,
) -> Result<Vec<PropDescriptor>, TroupeError> {
    let content = std::fs::read_to_string(path)?;
    let descriptors: Vec<PropDescriptor> = serde_json::from_str(&content)?;
    if descriptors.is_empty() {
        log::warn!("archive '{}' holds no props", path.display());
    }
    Ok(descriptors)
}

/// Save a descriptor array to a JSON archive (pretty-printed).
///
/// # Errors
///
/// [`TroupeError::Io`] when the file cannot be written and
/// [`TroupeError::ArchiveParse`] on serialization failure.
pub fn save_descriptors(
    path: &Path,
    descriptors: &[PropDescriptor],
) -> Result<(), TroupeError> {
    let content = serde_json::to_string_pretty(descriptors)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

impl Assembly {
    /// Build an assembly from an archived descriptor array.
    ///
    /// # Errors
    ///
    /// Propagates [`load_descriptors`] failures.
    pub fn from_archive(path: &Path) -> Result<Self, TroupeError> {
        let descriptors = load_descriptors(path)?;
        log::debug!(
            "loaded {} props from '{}'",
            descriptors.len(),
            path.display()
        );
        let nodes: Vec<SharedNode> = descriptors
            .into_iter()
            .map(|d| share(d.into_point_set()))
            .collect();
        Ok(Self::new(nodes))
    }

    /// Save the assembly's point-set children as a descriptor array.
    /// Children of other kinds are skipped.
    ///
    /// # Errors
    ///
    /// Propagates [`save_descriptors`] failures.
    pub fn write_archive(&self, path: &Path) -> Result<(), TroupeError> {
        let descriptors: Vec<PropDescriptor> = self
            .unpack()
            .iter()
            .filter_map(|node| match &*node.borrow() {
                SceneNode::Points(ps) => {
                    Some(PropDescriptor::from_point_set(ps))
                }
                _ => None,
            })
            .collect();
        save_descriptors(path, &descriptors)
    }
}
