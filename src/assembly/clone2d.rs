//! 2D-overlay projection of an assembly.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use super::Assembly;
use crate::error::TroupeError;
use crate::group::Group;
use crate::math::Bounds3;
use crate::node::{
    share, Nameable, Representation, SceneNode, SharedNode, REFERENCE_WIDTH,
};

/// Inset from the view edges applied to symbolic anchor positions.
const PADDING: f32 = 0.05;

/// Where a projected assembly is anchored in the view.
///
/// The view center is `[0, 0]` and the top-right corner is `[1, 1]`.
/// Keywords are scanned for the tokens `cent`, `top`, `bottom`, `left`,
/// and `right`, so `"bottom-left"`, `"top right"`, and `"centered"` all
/// parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Anchor {
    /// Explicit position in normalized view coordinates.
    Position(Vec2),
    /// Symbolic placement keyword.
    Keyword(String),
}

impl From<Vec2> for Anchor {
    fn from(pos: Vec2) -> Self {
        Self::Position(pos)
    }
}

impl From<[f32; 2]> for Anchor {
    fn from(pos: [f32; 2]) -> Self {
        Self::Position(Vec2::from(pos))
    }
}

impl From<&str> for Anchor {
    fn from(pos: &str) -> Self {
        Self::Keyword(pos.to_owned())
    }
}

impl From<String> for Anchor {
    fn from(pos: String) -> Self {
        Self::Keyword(pos)
    }
}

/// Resolve an anchor against local-frame bounds into a normalized view
/// position and a source-frame offset.
fn resolve_anchor(
    anchor: &Anchor,
    bounds: &Bounds3,
) -> Result<(Vec2, Vec2), TroupeError> {
    let (x0, x1) = (bounds.min.x, bounds.max.x);
    let (y0, y1) = (bounds.min.y, bounds.max.y);
    let keyword = match anchor {
        Anchor::Position(pos) => {
            return Ok((*pos, Vec2::new(x0, y0)));
        }
        Anchor::Keyword(k) => k.as_str(),
    };

    if keyword.contains("cent") {
        let mut offset =
            Vec2::new((x0 + x1) / 2.0, (y0 + y1) / 2.0);
        let mut position = Vec2::ZERO;
        if keyword.contains("right") {
            offset.x = x1;
            position.x = 1.0 - PADDING;
        }
        if keyword.contains("left") {
            offset.x = x0;
            position.x = -1.0 + PADDING;
        }
        if keyword.contains("top") {
            offset.y = y1;
            position.y = 1.0 - PADDING;
        }
        if keyword.contains("bottom") {
            offset.y = y0;
            position.y = -1.0 + PADDING;
        }
        return Ok((position, offset));
    }

    let vertical = if keyword.contains("top") {
        Some((y1, 1.0 - PADDING))
    } else if keyword.contains("bottom") {
        Some((y0, -1.0 + PADDING))
    } else {
        None
    };
    let Some((off_y, pos_y)) = vertical else {
        log::error!("unrecognized position keyword '{keyword}'");
        return Err(TroupeError::IncompletePosition(keyword.to_owned()));
    };

    if keyword.contains("right") {
        Ok((Vec2::new(1.0 - PADDING, pos_y), Vec2::new(x1, off_y)))
    } else if keyword.contains("left") {
        Ok((Vec2::new(-1.0 + PADDING, pos_y), Vec2::new(x0, off_y)))
    } else {
        log::error!("incomplete position keyword '{keyword}'");
        Err(TroupeError::IncompletePosition(keyword.to_owned()))
    }
}

impl Assembly {
    /// Convert the assembly into a [`Group`] of 2D overlays.
    ///
    /// The anchor resolves to a normalized view position and a
    /// source-frame offset (see [`Anchor`]); `size` magnifies the result,
    /// normalized to the assembly's x-extent; `rotation` (degrees) spins
    /// each element about the assembly origin before projecting; `ontop`
    /// draws the overlays over the 3D scene.
    ///
    /// Flattened elements are deduplicated by handle identity, and only
    /// point-bearing elements with at least one point are projected.
    /// Wireframe elements project through a boundary-edge stand-in, since
    /// wireframe mode does not project correctly to 2D. Histogram summary
    /// attributes and the assembly name carry over to the result.
    ///
    /// # Errors
    ///
    /// [`TroupeError::IncompletePosition`] when a keyword names `top` or
    /// `bottom` without a horizontal qualifier, or is not recognized.
    pub fn clone2d(
        &self,
        anchor: impl Into<Anchor>,
        size: f32,
        rotation: f32,
        ontop: bool,
    ) -> Result<Group, TroupeError> {
        let mut group = Group::new();
        group.set_name(self.name());

        let Some(bounds) = self.bounds() else {
            log::warn!("clone2d on empty assembly '{}'", self.name());
            return Ok(group);
        };
        // bounds relative to the assembly position
        let local = bounds.translated(-self.position());
        let (position, offset) = resolve_anchor(&anchor.into(), &local)?;

        let x_extent = local.x_extent();
        if x_extent <= 0.0 {
            log::warn!(
                "clone2d on assembly '{}' with degenerate x-extent",
                self.name()
            );
            return Ok(group);
        }
        let scale = size * REFERENCE_WIDTH / x_extent;

        let mut scanned: Vec<*const RefCell<SceneNode>> = Vec::new();
        for node in self.recursive_unpack() {
            let key = Rc::as_ptr(&node);
            if scanned.contains(&key) {
                continue;
            }
            scanned.push(key);

            let mut guard = node.borrow_mut();
            let SceneNode::Points(element) = &mut *guard else {
                continue;
            };
            if element.npoints() == 0 {
                continue;
            }

            let mut overlay = if element.properties.representation
                == Representation::Wireframe
            {
                let mut edges = element.boundaries();
                if rotation != 0.0 {
                    edges.rotate_z(rotation, self.origin());
                }
                edges.project_2d(scale, offset)
            } else {
                if rotation != 0.0 {
                    element.rotate_z(rotation, self.origin());
                }
                element.project_2d(scale, offset)
            };
            overlay.set_pos(position);
            overlay.set_ontop(ontop);
            group.add_node(share(overlay));
        }

        group.summary.clone_from(&self.summary);
        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::node::PointSet;

    fn span(name: &str, min: Vec3, max: Vec3) -> SharedNode {
        share(PointSet::new(vec![min, max]).named(name))
    }

    /// Assembly with a bounding box symmetric about the origin.
    fn symmetric_assembly() -> Assembly {
        Assembly::new([span(
            "body",
            Vec3::new(-5.0, -2.0, 0.0),
            Vec3::new(5.0, 2.0, 0.0),
        )])
    }

    fn resolve(asm: &Assembly, keyword: &str) -> (Vec2, Vec2) {
        let local = asm.bounds().unwrap().translated(-asm.position());
        resolve_anchor(&Anchor::from(keyword), &local).unwrap()
    }

    #[test]
    fn pure_center_is_exact_origin() {
        let asm = symmetric_assembly();
        let (position, offset) = resolve(&asm, "center");
        assert_eq!(position, Vec2::ZERO);
        assert_eq!(offset, Vec2::ZERO);
    }

    #[test]
    fn center_with_edge_token_nudges_by_padding() {
        let asm = symmetric_assembly();
        let (position, offset) = resolve(&asm, "center-left");
        assert_eq!(position, Vec2::new(-1.0 + PADDING, 0.0));
        assert_eq!(offset, Vec2::new(-5.0, 0.0));

        let (position, offset) = resolve(&asm, "top-center");
        assert_eq!(position, Vec2::new(0.0, 1.0 - PADDING));
        assert_eq!(offset, Vec2::new(0.0, 2.0));
    }

    #[test]
    fn corner_keywords_snap_to_bounds_corners() {
        let asm = symmetric_assembly();
        let (position, offset) = resolve(&asm, "bottom-left");
        assert_eq!(
            position,
            Vec2::new(-1.0 + PADDING, -1.0 + PADDING)
        );
        assert_eq!(offset, Vec2::new(-5.0, -2.0));

        let (position, offset) = resolve(&asm, "top right");
        assert_eq!(position, Vec2::new(1.0 - PADDING, 1.0 - PADDING));
        assert_eq!(offset, Vec2::new(5.0, 2.0));
    }

    #[test]
    fn vertical_edge_without_horizontal_qualifier_errors() {
        let asm = symmetric_assembly();
        let err = asm.clone2d("top", 1.0, 0.0, false).unwrap_err();
        assert!(matches!(err, TroupeError::IncompletePosition(_)));
        let err = asm.clone2d("bottom", 1.0, 0.0, false).unwrap_err();
        assert!(matches!(err, TroupeError::IncompletePosition(_)));
    }

    #[test]
    fn unrecognized_keyword_errors() {
        let asm = symmetric_assembly();
        let err = asm.clone2d("middle", 1.0, 0.0, false).unwrap_err();
        assert!(matches!(err, TroupeError::IncompletePosition(_)));
    }

    #[test]
    fn explicit_position_used_verbatim_with_lower_left_offset() {
        // x-bounds (0, 10): scale = 2 * 500 / 10 = 100
        let asm = Assembly::new([span(
            "bar",
            Vec3::ZERO,
            Vec3::new(10.0, 4.0, 0.0),
        )]);
        let group =
            asm.clone2d([0.5, 0.5], 2.0, 0.0, false).unwrap();
        assert_eq!(group.len(), 1);
        let member = group.unpack().pop().unwrap();
        let guard = member.borrow();
        let SceneNode::Overlay(overlay) = &*guard else {
            unreachable!("expected an overlay")
        };
        assert_eq!(overlay.pos(), Vec2::new(0.5, 0.5));
        // offset = lower-left bound (0, 0); scale 100 maps the 10-unit
        // extent onto 2.0 normalized units
        assert_eq!(overlay.points()[0], Vec2::ZERO);
        assert!((overlay.points()[1].x - 2.0).abs() < 1e-6);
        assert!((overlay.points()[1].y - 0.8).abs() < 1e-6);
    }

    #[test]
    fn overlay_count_matches_point_bearing_elements() {
        let empty = share(PointSet::new(Vec::new()).named("empty"));
        let asm = Assembly::new([
            span("a", Vec3::ZERO, Vec3::ONE),
            span("b", Vec3::ONE, Vec3::splat(2.0)),
            empty,
        ]);
        let group = asm.clone2d("center", 1.0, 0.0, false).unwrap();
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn shared_elements_are_deduplicated_by_identity() {
        let shared = span("shared", Vec3::ZERO, Vec3::ONE);
        // two unshifted nested assemblies contribute the same handle
        let first = Assembly::new([Rc::clone(&shared)]);
        let second = Assembly::new([Rc::clone(&shared)]);
        let outer = Assembly::new([share(first), share(second)]);
        let group = outer.clone2d("center", 1.0, 0.0, false).unwrap();
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn ontop_and_name_carry_over() {
        let mut asm = symmetric_assembly();
        asm.set_name("histo");
        asm.summary = Some(crate::stats::HistogramSummary {
            entries: 42,
            mean: 1.5,
            ..Default::default()
        });
        let group = asm.clone2d("center", 1.0, 0.0, true).unwrap();
        assert_eq!(group.name(), "histo");
        let summary = group.summary.as_ref().unwrap();
        assert_eq!(summary.entries, 42);
        assert_eq!(summary.mean, 1.5);
        let member = group.unpack().pop().unwrap();
        let guard = member.borrow();
        let SceneNode::Overlay(overlay) = &*guard else {
            unreachable!("expected an overlay")
        };
        assert!(overlay.ontop());
    }

    #[test]
    fn wireframe_elements_project_via_boundary_stand_in() {
        let mut ps = PointSet::new(vec![Vec3::ZERO, Vec3::ONE]);
        ps.properties.representation = Representation::Wireframe;
        ps.properties.line_width = 3.0;
        let wire = share(ps);
        let asm = Assembly::new([Rc::clone(&wire)]);
        let group = asm.clone2d("center", 1.0, 0.0, false).unwrap();
        let member = group.unpack().pop().unwrap();
        let guard = member.borrow();
        let SceneNode::Overlay(overlay) = &*guard else {
            unreachable!("expected an overlay")
        };
        assert_eq!(
            overlay.properties.representation,
            Representation::Surface
        );
        assert_eq!(overlay.properties.line_width, 1.0);
        // the original element keeps its wireframe representation
        let guard = wire.borrow();
        let SceneNode::Points(original) = &*guard else {
            unreachable!()
        };
        assert_eq!(
            original.properties.representation,
            Representation::Wireframe
        );
    }

    #[test]
    fn rotation_spins_elements_about_the_assembly_origin() {
        let asm = Assembly::new([span(
            "arm",
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
        )]);
        let group = asm.clone2d([0.0, 0.0], 1.0, 90.0, false).unwrap();
        let member = group.unpack().pop().unwrap();
        let guard = member.borrow();
        let SceneNode::Overlay(overlay) = &*guard else {
            unreachable!("expected an overlay")
        };
        // after a quarter turn the far endpoint lies on the y axis;
        // offset is the (pre-rotation) lower-left bound (0, 0)
        let far = overlay.points()[1];
        assert!(far.x.abs() < 1e-5);
        assert!((far.y - 1.0).abs() < 1e-5);
    }
}
