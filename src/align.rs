//! Point-set alignment packaged as an assembly.
//!
//! The iterative least-squares solve itself lives behind
//! [`AlignmentFilter`]; this module validates the inputs, runs the
//! filter, and wraps its output blocks back into troupe props.

use glam::{Affine3A, Vec3};

use crate::assembly::Assembly;
use crate::error::TroupeError;
use crate::node::{share, InfoValue, Nameable, PointSet, SceneNode, SharedNode};

/// Result of one alignment run.
pub struct AlignmentOutput {
    /// Aligned point blocks, one per source, in source order.
    pub blocks: Vec<Vec<Vec3>>,
    /// Landmark transform of the final iteration.
    pub transform: Affine3A,
    /// Mean shape the sources were aligned to.
    pub mean: Vec<Vec3>,
}

/// External least-squares alignment filter (Procrustes).
///
/// Implementations align N equally-sized point sets to their mutual mean
/// in a least-squares sense, iterating until convergence (the mean is
/// recomputed after each alignment), starting from the centroid. With
/// `rigid` set, scaling is disabled.
pub trait AlignmentFilter {
    /// Align `sources` (all the same length) to their mutual mean.
    fn align(&self, sources: &[Vec<Vec3>], rigid: bool) -> AlignmentOutput;
}

/// Align source point sets with the Procrustes algorithm and return them
/// as a new [`Assembly`].
///
/// The output assembly is normalized in size by the filter. Each aligned
/// object keeps its source's name and display properties; the assembly's
/// transform is the filter's landmark transform, and the mean shape is
/// stored under `info["mean"]`.
///
/// # Errors
///
/// [`TroupeError::PointCountMismatch`] when the sources carry different
/// numbers of points, and [`TroupeError::AlignmentSource`] when a source
/// is not a point-bearing prop. Both abort the call with no partial
/// result.
pub fn procrustes_alignment(
    sources: &[SharedNode],
    rigid: bool,
    filter: &dyn AlignmentFilter,
) -> Result<Assembly, TroupeError> {
    let mut inputs: Vec<Vec<Vec3>> = Vec::with_capacity(sources.len());
    let mut expected = 0;
    for (index, source) in sources.iter().enumerate() {
        let guard = source.borrow();
        let SceneNode::Points(ps) = &*guard else {
            log::error!("alignment source {index} is not point-bearing");
            return Err(TroupeError::AlignmentSource { index });
        };
        if index == 0 {
            expected = ps.npoints();
        } else if ps.npoints() != expected {
            log::error!("sources have different nr of points");
            return Err(TroupeError::PointCountMismatch {
                index,
                expected,
                found: ps.npoints(),
            });
        }
        inputs.push(
            ps.points().iter().map(|p| *p + ps.position()).collect(),
        );
    }

    let output = filter.align(&inputs, rigid);

    let aligned = sources.iter().zip(output.blocks).map(|(source, block)| {
        let mut ps = PointSet::new(block);
        if let SceneNode::Points(src) = &*source.borrow() {
            ps.properties = src.properties;
            ps.set_name(src.name());
        }
        share(ps)
    });
    let mut assembly = Assembly::new(aligned.collect::<Vec<_>>());
    assembly.transform = output.transform;
    let _ = assembly
        .info
        .insert("mean".to_owned(), InfoValue::Points(output.mean));
    Ok(assembly)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    /// Centers every source on the common centroid. Not a real Procrustes
    /// solve, but shape-preserving and deterministic, which is all the
    /// packaging layer needs.
    struct CentroidFilter;

    impl AlignmentFilter for CentroidFilter {
        fn align(
            &self,
            sources: &[Vec<Vec3>],
            _rigid: bool,
        ) -> AlignmentOutput {
            let center = |points: &[Vec3]| {
                points.iter().copied().sum::<Vec3>() / points.len() as f32
            };
            let blocks: Vec<Vec<Vec3>> = sources
                .iter()
                .map(|points| {
                    let c = center(points);
                    points.iter().map(|p| *p - c).collect()
                })
                .collect();
            let mean: Vec<Vec3> = (0..sources[0].len())
                .map(|i| {
                    blocks.iter().map(|b| b[i]).sum::<Vec3>()
                        / blocks.len() as f32
                })
                .collect();
            AlignmentOutput {
                blocks,
                transform: Affine3A::IDENTITY,
                mean,
            }
        }
    }

    fn source(name: &str, offset: Vec3) -> SharedNode {
        share(
            PointSet::new(vec![
                offset,
                offset + Vec3::X,
                offset + Vec3::Y,
            ])
            .named(name),
        )
    }

    #[test]
    fn mismatched_point_counts_abort() {
        let a = source("a", Vec3::ZERO);
        let b = share(PointSet::new(vec![Vec3::ZERO]).named("b"));
        let err = procrustes_alignment(
            &[a, b],
            false,
            &CentroidFilter,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TroupeError::PointCountMismatch {
                index: 1,
                expected: 3,
                found: 1
            }
        ));
    }

    #[test]
    fn non_point_sources_abort() {
        let a = source("a", Vec3::ZERO);
        let bar = share(crate::node::Scalarbar::new("bar", (0.0, 1.0)));
        let err =
            procrustes_alignment(&[a, bar], false, &CentroidFilter)
                .unwrap_err();
        assert!(matches!(err, TroupeError::AlignmentSource { index: 1 }));
    }

    #[test]
    fn aligned_assembly_keeps_names_and_records_mean() {
        let a = source("a", Vec3::ZERO);
        let b = source("b", Vec3::new(10.0, -3.0, 1.0));
        let assembly =
            procrustes_alignment(&[a, b], false, &CentroidFilter)
                .unwrap();
        assert_eq!(assembly.len(), 2);
        assert!(assembly.get_named("a").is_some());
        assert!(assembly.get_named("b").is_some());

        // both sources collapse onto the same centered triangle
        let first = assembly.get(0).unwrap();
        let second = assembly.get(1).unwrap();
        let (g1, g2) = (first.borrow(), second.borrow());
        let (SceneNode::Points(p1), SceneNode::Points(p2)) =
            (&*g1, &*g2)
        else {
            unreachable!("aligned outputs are point sets")
        };
        for (x, y) in p1.points().iter().zip(p2.points()) {
            assert!((*x - *y).length() < 1e-5);
        }

        let Some(InfoValue::Points(mean)) = assembly.info.get("mean")
        else {
            unreachable!("mean shape is recorded")
        };
        assert_eq!(mean.len(), 3);
    }

    #[test]
    fn alignment_result_is_a_regular_assembly() {
        let a = source("a", Vec3::ZERO);
        let b = source("b", Vec3::X);
        let assembly =
            procrustes_alignment(&[a, b], true, &CentroidFilter)
                .unwrap();
        assert_eq!(assembly.len(), assembly.actors().len());
        assert!(!Rc::ptr_eq(
            &assembly.get(0).unwrap(),
            &assembly.get(1).unwrap()
        ));
    }
}
