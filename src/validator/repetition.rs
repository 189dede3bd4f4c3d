//! Repeated consecutive points in curve segments

use crate::messages::{MessageKey, affected_coordinates, format_message, problem_location};
use crate::model::{Curve, Geometry, SurfacePatch};

use super::CheckContext;

/// Check that no curve segment under `geometry` repeats a point consecutively
///
/// Points are compared within each segment only. The first repetition
/// records one error and ends the check. Rings of polygon patches are
/// checked, other patch kinds and solids are skipped.
pub fn check_no_repetition_in_curve_segments(geometry: &Geometry, ctx: &mut CheckContext) -> bool {
    match geometry {
        Geometry::Curve(curve) => check_curve(curve, ctx),
        Geometry::Surface(surface) => {
            for patch in &surface.patches {
                match patch {
                    SurfacePatch::Polygon(polygon) => {
                        if !check_curve(&polygon.exterior, ctx) {
                            return false;
                        }
                        for interior in &polygon.interiors {
                            if !check_curve(interior, ctx) {
                                return false;
                            }
                        }
                    }
                    SurfacePatch::Other { .. } => {}
                }
            }
            true
        }
        Geometry::MultiGeometry(collection) | Geometry::CompositeGeometry(collection) => collection
            .members
            .iter()
            .all(|member| check_no_repetition_in_curve_segments(member, ctx)),
        Geometry::Point(_)
        | Geometry::Solid(_)
        | Geometry::MultiSolid(_)
        | Geometry::CompositeSolid(_) => true,
    }
}

fn check_curve(curve: &Curve, ctx: &mut CheckContext) -> bool {
    for segment in &curve.segments {
        let points = segment.control_points();
        for pair in points.windows(2) {
            if pair[0] == pair[1] {
                let id = ctx.resolve_id(curve.id.as_deref());
                let coordinates = affected_coordinates(segment);
                let location = problem_location(pair[1]);
                let message = format_message(
                    MessageKey::RepetitionInCurveSegment,
                    &[id.as_str(), coordinates.as_str(), location.as_str()],
                );
                ctx.sink.add_error(message, Some(id));
                return false;
            }
        }
    }
    true
}
