//! Curves and curve segments

use crate::dom::Element;
use crate::error::{Error, Result};
use crate::model::{ArcSegment, Curve, CurveSegment, Position};

use super::coordinates::read_positions;
use super::{ParseContext, Scope, element_id, inline_member};

/// Parse `LineString`, `LinearRing`, `Ring`, `Curve`, `CompositeCurve` or
/// `OrientableCurve`
///
/// Composite, orientable and ring curves are flattened into the segments of
/// their members.
pub(crate) fn parse_curve_element(
    element: &Element,
    ctx: &ParseContext,
    scope: &Scope,
) -> Result<Curve> {
    let name = element.local_name();
    let mut curve = Curve::new(name);
    curve.id = element_id(element);

    match name {
        "LineString" => {
            let points = read_positions(element, ctx, scope)?;
            require_points(name, &points, 2)?;
            curve.segments.push(CurveSegment::LineStringSegment(points));
        }
        "LinearRing" => {
            let points = read_positions(element, ctx, scope)?;
            require_points(name, &points, 4)?;
            curve.segments.push(CurveSegment::LineStringSegment(points));
        }
        "Curve" => {
            let segments = element
                .child("segments")
                .ok_or_else(|| Error::invalid_geometry(name, "missing segments"))?;
            for segment in segments.child_elements() {
                curve.segments.push(parse_segment(segment, ctx, scope)?);
            }
        }
        "Ring" | "CompositeCurve" => {
            for member in element
                .child_elements()
                .filter(|child| child.local_name() == "curveMember")
            {
                let member = curve_from_property(member, ctx, scope)?;
                curve.segments.extend(member.segments);
            }
        }
        "OrientableCurve" => {
            let base = element
                .child("baseCurve")
                .ok_or_else(|| Error::invalid_geometry(name, "missing baseCurve"))?;
            let mut base = curve_from_property(base, ctx, scope)?;
            if element.attribute("orientation") == Some("-") {
                reverse_segments(&mut base.segments);
            }
            curve.segments = base.segments;
        }
        other => {
            return Err(Error::Unsupported(format!(
                "Curve element '{}' is not supported",
                other
            )));
        }
    }

    if curve.segments.is_empty() {
        return Err(Error::invalid_geometry(name, "no curve segments"));
    }
    Ok(curve)
}

/// The curve inside a curve property (`curveMember`, `baseCurve`, ...)
pub(crate) fn curve_from_property(
    property: &Element,
    ctx: &ParseContext,
    scope: &Scope,
) -> Result<Curve> {
    let member = inline_member(property)?;
    ctx.expect_gml(member)?;
    let scope = scope.enter(member, ctx)?;
    parse_curve_element(member, ctx, &scope)
}

fn parse_segment(element: &Element, ctx: &ParseContext, scope: &Scope) -> Result<CurveSegment> {
    let name = element.local_name();
    let segment = match name {
        "LineStringSegment" => {
            let points = read_positions(element, ctx, scope)?;
            require_points(name, &points, 2)?;
            CurveSegment::LineStringSegment(points)
        }
        "Arc" | "Circle" => {
            let points = read_positions(element, ctx, scope)?;
            CurveSegment::Arc(ArcSegment::new(points, name == "Circle")?)
        }
        "ArcString" => {
            let points = read_positions(element, ctx, scope)?;
            require_points(name, &points, 3)?;
            CurveSegment::ArcString(points)
        }
        "CubicSpline" => {
            let points = read_positions(element, ctx, scope)?;
            require_points(name, &points, 2)?;
            CurveSegment::CubicSpline(points)
        }
        "GeodesicString" | "Geodesic" => {
            let points = read_positions(element, ctx, scope)?;
            require_points(name, &points, 2)?;
            CurveSegment::GeodesicString(points)
        }
        other => CurveSegment::Other {
            name: other.to_string(),
        },
    };
    Ok(segment)
}

fn require_points(element: &str, points: &[Position], minimum: usize) -> Result<()> {
    if points.len() < minimum {
        return Err(Error::invalid_geometry(
            element,
            &format!(
                "{} positions given, at least {} required",
                points.len(),
                minimum
            ),
        ));
    }
    Ok(())
}

/// Reverse the direction of a sequence of segments
fn reverse_segments(segments: &mut [CurveSegment]) {
    segments.reverse();
    for segment in segments.iter_mut() {
        match segment {
            CurveSegment::Arc(arc) => arc.reverse(),
            CurveSegment::ArcString(points)
            | CurveSegment::CubicSpline(points)
            | CurveSegment::GeodesicString(points)
            | CurveSegment::LineStringSegment(points) => points.reverse(),
            CurveSegment::Other { .. } => {}
        }
    }
}
