//! Geometry tree produced by the GML parser
//!
//! The tree is a closed set of sum types. Every check matches exhaustively on
//! these variants, so adding a new kind is a compile-time gap rather than a
//! silent fallthrough.

use crate::error::{Error, Result};

/// A coordinate tuple
///
/// Two positions are equal iff all ordinates are equal. Equality does not
/// depend on the CRS or on any identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// Ordinates in axis order
    pub ordinates: Vec<f64>,
}

impl Position {
    /// Create a new position from its ordinates
    pub fn new(ordinates: Vec<f64>) -> Self {
        Self { ordinates }
    }

    /// Create a 2D position
    pub fn xy(x: f64, y: f64) -> Self {
        Self {
            ordinates: vec![x, y],
        }
    }

    /// Create a 3D position
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self {
            ordinates: vec![x, y, z],
        }
    }

    /// Number of ordinates
    pub fn dimension(&self) -> usize {
        self.ordinates.len()
    }

    /// First ordinate (0.0 for an empty position)
    pub fn x(&self) -> f64 {
        self.ordinates.first().copied().unwrap_or(0.0)
    }

    /// Second ordinate (0.0 when absent)
    pub fn y(&self) -> f64 {
        self.ordinates.get(1).copied().unwrap_or(0.0)
    }
}

/// A GML point geometry
#[derive(Debug, Clone, PartialEq)]
pub struct PointGeometry {
    /// `gml:id` of the point element
    pub id: Option<String>,
    /// The point position
    pub position: Position,
}

/// Arc defined by three points (GML `Arc` and `Circle`)
///
/// Construct with [`ArcSegment::new`], which guarantees the three defining
/// points are present.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSegment {
    control_points: Vec<Position>,
    circle: bool,
}

impl ArcSegment {
    /// Create an arc from its control points, `circle` for a `gml:Circle`
    ///
    /// # Errors
    ///
    /// [`Error::InvalidGeometry`] if fewer than three points are given.
    pub fn new(control_points: Vec<Position>, circle: bool) -> Result<Self> {
        if control_points.len() < 3 {
            let name = if circle { "Circle" } else { "Arc" };
            return Err(Error::invalid_geometry(
                name,
                &format!(
                    "{} positions given, at least 3 required",
                    control_points.len()
                ),
            ));
        }
        Ok(Self {
            control_points,
            circle,
        })
    }

    /// Control points as given in the document
    pub fn control_points(&self) -> &[Position] {
        &self.control_points
    }

    /// `true` for a `gml:Circle`
    pub fn is_circle(&self) -> bool {
        self.circle
    }

    /// Start point
    pub fn point1(&self) -> &Position {
        &self.control_points[0]
    }

    /// Mid point
    pub fn point2(&self) -> &Position {
        &self.control_points[1]
    }

    /// End point
    pub fn point3(&self) -> &Position {
        &self.control_points[2]
    }

    pub(crate) fn reverse(&mut self) {
        self.control_points.reverse();
    }
}

/// One continuous piece of a curve
#[derive(Debug, Clone, PartialEq)]
pub enum CurveSegment {
    /// Circular arc through three points
    Arc(ArcSegment),
    /// Sequence of arcs sharing end points
    ArcString(Vec<Position>),
    /// Cubic spline through its control points
    CubicSpline(Vec<Position>),
    /// Geodesic string (also used for `gml:Geodesic`)
    GeodesicString(Vec<Position>),
    /// Straight line string segment
    LineStringSegment(Vec<Position>),
    /// Any other segment kind; carries the element name only
    Other {
        /// Local element name of the segment
        name: String,
    },
}

impl CurveSegment {
    /// Control points in document order
    ///
    /// An arc contributes exactly its three defining points. Unrecognized
    /// segment kinds contribute none.
    pub fn control_points(&self) -> Vec<&Position> {
        match self {
            CurveSegment::Arc(arc) => vec![arc.point1(), arc.point2(), arc.point3()],
            CurveSegment::ArcString(points)
            | CurveSegment::CubicSpline(points)
            | CurveSegment::GeodesicString(points)
            | CurveSegment::LineStringSegment(points) => points.iter().collect(),
            CurveSegment::Other { .. } => Vec::new(),
        }
    }

    /// GML element name of this segment kind
    pub fn name(&self) -> &str {
        match self {
            CurveSegment::Arc(arc) if arc.is_circle() => "Circle",
            CurveSegment::Arc(_) => "Arc",
            CurveSegment::ArcString(_) => "ArcString",
            CurveSegment::CubicSpline(_) => "CubicSpline",
            CurveSegment::GeodesicString(_) => "GeodesicString",
            CurveSegment::LineStringSegment(_) => "LineStringSegment",
            CurveSegment::Other { name } => name,
        }
    }
}

/// A curve: `Curve`, `LineString`, `LinearRing`, `Ring`, `CompositeCurve`
/// or `OrientableCurve`
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// `gml:id` of the curve element
    pub id: Option<String>,
    /// Local element name the curve was read from
    pub name: String,
    /// Segments in document order
    pub segments: Vec<CurveSegment>,
}

impl Curve {
    /// Create an empty curve
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            segments: Vec::new(),
        }
    }

    /// Create a curve holding a single line string segment
    pub fn line_string(name: impl Into<String>, points: Vec<Position>) -> Self {
        Self {
            id: None,
            name: name.into(),
            segments: vec![CurveSegment::LineStringSegment(points)],
        }
    }

    /// All control points of all segments, with the shared end/start point of
    /// adjacent segments collapsed
    pub fn positions(&self) -> Vec<&Position> {
        let mut result: Vec<&Position> = Vec::new();
        for segment in &self.segments {
            for point in segment.control_points() {
                if result.last() != Some(&point) {
                    result.push(point);
                }
            }
        }
        result
    }
}

/// A closed ring (the boundary of a polygon patch)
pub type Ring = Curve;

/// A flat polygon panel
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonPatch {
    /// Exterior boundary
    pub exterior: Ring,
    /// Interior boundaries (holes)
    pub interiors: Vec<Ring>,
}

impl PolygonPatch {
    /// Create a polygon patch without holes
    pub fn new(exterior: Ring) -> Self {
        Self {
            exterior,
            interiors: Vec::new(),
        }
    }
}

/// One panel of a surface
#[derive(Debug, Clone, PartialEq)]
pub enum SurfacePatch {
    /// Polygon patch
    Polygon(PolygonPatch),
    /// Any other patch kind (`Triangle`, `Rectangle`, `Cone`, ...)
    Other {
        /// Local element name of the patch
        name: String,
    },
}

/// A surface: `Polygon`, `Surface`, `PolyhedralSurface`,
/// `TriangulatedSurface`, `Tin`, `CompositeSurface` or `OrientableSurface`
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    /// `gml:id` of the surface element
    pub id: Option<String>,
    /// Local element name the surface was read from
    pub name: String,
    /// Patches in document order
    pub patches: Vec<SurfacePatch>,
}

impl Surface {
    /// Create an empty surface
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            patches: Vec::new(),
        }
    }
}

/// A solid; its shells are never traversed by the structural checks
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    /// `gml:id` of the solid element
    pub id: Option<String>,
    /// Exterior shell
    pub exterior: Option<Surface>,
    /// Interior shells
    pub interiors: Vec<Surface>,
}

/// Members of a multi or composite geometry
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollection {
    /// `gml:id` of the collection element
    pub id: Option<String>,
    /// Local element name the collection was read from
    pub name: String,
    /// Members in document order
    pub members: Vec<Geometry>,
}

impl GeometryCollection {
    /// Create an empty collection
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            members: Vec::new(),
        }
    }
}

/// A parsed GML geometry
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Point
    Point(PointGeometry),
    /// Curve and its specializations
    Curve(Curve),
    /// Surface and its specializations
    Surface(Surface),
    /// Solid
    Solid(Solid),
    /// `MultiPoint`, `MultiCurve`, `MultiSurface`, `MultiGeometry`, ...
    MultiGeometry(GeometryCollection),
    /// Composite geometries that are not curves, surfaces or solids
    CompositeGeometry(GeometryCollection),
    /// `MultiSolid`
    MultiSolid(GeometryCollection),
    /// `CompositeSolid`
    CompositeSolid(GeometryCollection),
}

impl Geometry {
    /// `gml:id` of the geometry, if any
    pub fn id(&self) -> Option<&str> {
        match self {
            Geometry::Point(p) => p.id.as_deref(),
            Geometry::Curve(c) => c.id.as_deref(),
            Geometry::Surface(s) => s.id.as_deref(),
            Geometry::Solid(s) => s.id.as_deref(),
            Geometry::MultiGeometry(c)
            | Geometry::CompositeGeometry(c)
            | Geometry::MultiSolid(c)
            | Geometry::CompositeSolid(c) => c.id.as_deref(),
        }
    }

    /// Local element name the geometry was read from
    pub fn name(&self) -> &str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::Curve(c) => &c.name,
            Geometry::Surface(s) => &s.name,
            Geometry::Solid(_) => "Solid",
            Geometry::MultiGeometry(c)
            | Geometry::CompositeGeometry(c)
            | Geometry::MultiSolid(c)
            | Geometry::CompositeSolid(c) => &c.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_equality_is_value_based() {
        assert_eq!(Position::xy(1.0, 2.0), Position::xy(1.0, 2.0));
        assert_ne!(Position::xy(1.0, 2.0), Position::xy(2.0, 1.0));
        assert_ne!(Position::xy(1.0, 2.0), Position::xyz(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_arc_exposes_three_points() {
        let arc = ArcSegment::new(
            vec![
                Position::xy(0.0, 0.0),
                Position::xy(1.0, 1.0),
                Position::xy(2.0, 0.0),
                Position::xy(3.0, 3.0),
            ],
            false,
        )
        .unwrap();
        let arc = CurveSegment::Arc(arc);
        let points = arc.control_points();
        assert_eq!(points.len(), 3);
        assert_eq!(points[2], &Position::xy(2.0, 0.0));
    }

    #[test]
    fn test_other_segment_has_no_points() {
        let other = CurveSegment::Other {
            name: "Clothoid".to_string(),
        };
        assert!(other.control_points().is_empty());
        assert_eq!(other.name(), "Clothoid");
    }

    #[test]
    fn test_curve_positions_collapse_shared_points() {
        let mut curve = Curve::new("CompositeCurve");
        curve.segments.push(CurveSegment::LineStringSegment(vec![
            Position::xy(0.0, 0.0),
            Position::xy(1.0, 0.0),
        ]));
        curve.segments.push(CurveSegment::LineStringSegment(vec![
            Position::xy(1.0, 0.0),
            Position::xy(1.0, 1.0),
        ]));
        assert_eq!(curve.positions().len(), 3);
    }

    #[test]
    fn test_arc_needs_three_control_points() {
        let two = vec![Position::xy(0.0, 0.0), Position::xy(1.0, 1.0)];
        assert!(matches!(
            ArcSegment::new(two, true),
            Err(Error::InvalidGeometry(_))
        ));

        let arc = ArcSegment::new(
            vec![
                Position::xy(0.0, 0.0),
                Position::xy(1.0, 1.0),
                Position::xy(2.0, 0.0),
            ],
            true,
        )
        .unwrap();
        assert!(arc.is_circle());
        assert_eq!(arc.point3(), &Position::xy(2.0, 0.0));
        assert_eq!(CurveSegment::Arc(arc).name(), "Circle");
    }
}
