//! Message catalog for validation findings
//!
//! Every message recorded in a [`crate::ValidationSink`] is produced from a
//! [`MessageKey`] and positional arguments. Templates use `{0}`, `{1}`, ...
//! placeholders; a placeholder without a matching argument is left as is.

use crate::model::{CurveSegment, Position};

/// Identifies a message template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// The element namespace is not a GML namespace; `{0}` namespace
    NoGml,
    /// Detected GML version; `{0}` version label
    GmlVersion,
    /// Location of a geometry element; `{0}` element name, `{1}` occurrence
    /// counter, `{2}` main element name, `{3}` gml:id
    CoordinatesPosition,
    /// Disconnected surface patches; `{0}` gml:id
    SurfacePatchesNotConnected,
    /// Repeated consecutive point; `{0}` gml:id, `{1}` affected coordinates,
    /// `{2}` problem location
    RepetitionInCurveSegment,
    /// Surface with a patch that is not a polygon; `{0}` gml:id, `{1}` detail
    PatchNotPolygonal,
    /// srsDimension prevalidation found no element; `{0}` gml:id
    SrsDimensionParseError,
    /// srsDimension on an element other than pos/posList; `{0}` gml:id
    SrsDimensionBadTag,
    /// srsDimension disagrees with the CRS dimension; `{0}` gml:id
    SrsDimensionWrong,
}

impl MessageKey {
    /// Stable identifier of the message
    pub fn id(&self) -> &'static str {
        match self {
            MessageKey::NoGml => "geometry.no-gml",
            MessageKey::GmlVersion => "geometry.gmlversion",
            MessageKey::CoordinatesPosition => "geometry.coordinates-position",
            MessageKey::SurfacePatchesNotConnected => "geometry.surfacepatchesnotconnected",
            MessageKey::RepetitionInCurveSegment => "geometry.repetitionincurvesegment",
            MessageKey::PatchNotPolygonal => "geometry.patchnotpolygonal",
            MessageKey::SrsDimensionParseError => "geometry.srsdimension.parse-error",
            MessageKey::SrsDimensionBadTag => "geometry.srsdimension.bad-tag",
            MessageKey::SrsDimensionWrong => "geometry.srsdimension.wrong",
        }
    }

    fn template(&self) -> &'static str {
        match self {
            MessageKey::NoGml => "Unable to determine the GML version of namespace '{0}'.",
            MessageKey::GmlVersion => "Geometries are validated as GML {0}.",
            MessageKey::CoordinatesPosition => {
                "{0} number {1} in the current feature (main geometry {2}, gml:id '{3}')"
            }
            MessageKey::SurfacePatchesNotConnected => {
                "The patches of the surface with gml:id '{0}' are not connected."
            }
            MessageKey::RepetitionInCurveSegment => {
                "A curve segment of the geometry with gml:id '{0}' contains two identical \
                 consecutive points. Affected coordinates: {1}. Repeated point: {2}."
            }
            MessageKey::PatchNotPolygonal => {
                "The connectivity of the surface with gml:id '{0}' cannot be tested: {1}"
            }
            MessageKey::SrsDimensionParseError => {
                "The srsDimension declarations of the geometry with gml:id '{0}' cannot be \
                 read."
            }
            MessageKey::SrsDimensionBadTag => {
                "The geometry with gml:id '{0}' declares srsDimension on an element other \
                 than pos or posList."
            }
            MessageKey::SrsDimensionWrong => {
                "The srsDimension declared in the geometry with gml:id '{0}' does not match \
                 the dimension of its coordinate reference system."
            }
        }
    }
}

/// Format the message for `key` with positional arguments
///
/// # Example
///
/// ```
/// use gmlgeom::messages::{MessageKey, format_message};
///
/// let message = format_message(MessageKey::SurfacePatchesNotConnected, &["s1"]);
/// assert!(message.contains("'s1'"));
/// ```
pub fn format_message(key: MessageKey, args: &[&str]) -> String {
    let template = key.template();
    let mut message = String::with_capacity(template.len() + 32);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        message.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let index = after[..close].parse::<usize>().ok()?;
            let arg = args.get(index)?;
            Some((arg, close))
        });
        match substituted {
            Some((arg, close)) => {
                message.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                message.push('{');
                rest = after;
            }
        }
    }
    message.push_str(rest);
    message
}

/// Coordinates of a curve segment, for locating a finding
///
/// Each control point is written as its space separated ordinates; points are
/// separated by commas.
pub fn affected_coordinates(segment: &CurveSegment) -> String {
    let points = segment.control_points();
    if points.is_empty() {
        return format!("({})", segment.name());
    }
    points
        .into_iter()
        .map(format_ordinates)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Location of a single offending point
pub fn problem_location(point: &Position) -> String {
    format!("({})", format_ordinates(point))
}

fn format_ordinates(point: &Position) -> String {
    point
        .ordinates
        .iter()
        .map(|o| o.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
