//! GML geometry reader
//!
//! Turns a GML geometry element into a [`Geometry`] tree. Only the structure
//! the validators need is read: identifiers, coordinates, curve segments,
//! surface patches and collection members. The reader is bound to one GML
//! version; constructs deprecated in GML 3.2 are rejected when reading 3.2.
//!
//! The active CRS and `srsDimension` are threaded down the recursion in a
//! [`Scope`]: a geometry element may override either for its subtree.

mod coordinates;
mod curve;
mod surface;

use crate::crs::CrsRegistry;
use crate::dom::Element;
use crate::error::{Error, Result};
use crate::model::{
    Crs, Geometry, GeometryCollection, GmlVersion, PointGeometry, Solid, Surface,
};

use coordinates::read_point_position;
use curve::parse_curve_element;
use surface::{parse_shell, parse_surface_element};

/// Parse a GML geometry element
///
/// `default_crs` is used for geometries that do not carry an `srsName`.
///
/// # Errors
///
/// - [`Error::Unsupported`] for elements that are not GML geometries of the
///   given version, and for deprecated constructs in GML 3.2
/// - [`Error::InvalidGeometry`] for structurally broken geometries
/// - [`Error::ParseError`] for unparseable numbers
/// - [`Error::UnknownCrs`] if an `srsName` cannot be resolved
///
/// # Example
///
/// ```
/// use gmlgeom::dom::Document;
/// use gmlgeom::parser::parse_geometry;
/// use gmlgeom::{Geometry, GmlVersion, StaticCrsRegistry};
///
/// let xml = r#"<gml:LineString xmlns:gml="http://www.opengis.net/gml/3.2" gml:id="l1">
///     <gml:posList>0 0 1 1 2 2</gml:posList>
/// </gml:LineString>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let geometry =
///     parse_geometry(&doc.root, GmlVersion::Gml32, None, &StaticCrsRegistry::new()).unwrap();
/// assert!(matches!(geometry, Geometry::Curve(ref c) if c.positions().len() == 3));
/// ```
pub fn parse_geometry(
    element: &Element,
    version: GmlVersion,
    default_crs: Option<&Crs>,
    registry: &dyn CrsRegistry,
) -> Result<Geometry> {
    let ctx = ParseContext { version, registry };
    let scope = Scope {
        crs: default_crs.cloned(),
        srs_dimension: None,
    };
    parse_geometry_element(element, &ctx, &scope)
}

/// Settings fixed for one parse run
pub(crate) struct ParseContext<'a> {
    pub(crate) version: GmlVersion,
    pub(crate) registry: &'a dyn CrsRegistry,
}

impl ParseContext<'_> {
    /// Fail unless the element is in the namespace of the GML version read
    pub(crate) fn expect_gml(&self, element: &Element) -> Result<()> {
        if element.namespace() == Some(self.version.namespace()) {
            Ok(())
        } else {
            Err(Error::Unsupported(format!(
                "Element '{}' is not in the GML {} namespace",
                element.name,
                self.version.label()
            )))
        }
    }

    /// Fail for constructs that were removed in GML 3.2
    pub(crate) fn deprecated(&self, element: &Element) -> Result<()> {
        match self.version {
            GmlVersion::Gml31 => Ok(()),
            GmlVersion::Gml32 => Err(Error::Unsupported(format!(
                "Element '{}' is not allowed in GML 3.2",
                element.local_name()
            ))),
        }
    }
}

/// CRS and srsDimension in effect for a subtree
#[derive(Debug, Clone)]
pub(crate) struct Scope {
    pub(crate) crs: Option<Crs>,
    pub(crate) srs_dimension: Option<usize>,
}

impl Scope {
    /// Scope for the children of a geometry element
    ///
    /// An `srsName` equal to the current alias is not resolved again. A new
    /// CRS drops an `srsDimension` inherited from outside.
    pub(crate) fn enter(&self, element: &Element, ctx: &ParseContext) -> Result<Scope> {
        let mut scope = self.clone();

        if let Some(srs_name) = element.non_empty_attribute("srsName") {
            let same = self.crs.as_ref().is_some_and(|crs| crs.alias == srs_name);
            if !same {
                scope.crs = Some(ctx.registry.resolve(srs_name)?);
                scope.srs_dimension = None;
            }
        }

        if let Some(declared) = element.non_empty_attribute("srsDimension") {
            scope.srs_dimension = Some(parse_srs_dimension(declared)?);
        }

        Ok(scope)
    }
}

pub(crate) fn parse_srs_dimension(value: &str) -> Result<usize> {
    match value.trim().parse::<usize>() {
        Ok(dimension) if dimension > 0 => Ok(dimension),
        _ => Err(Error::parse_error_with_context(
            "srsDimension",
            value,
            "positive integer",
        )),
    }
}

pub(crate) fn element_id(element: &Element) -> Option<String> {
    element.gml_id().map(str::to_string)
}

/// Parse any supported geometry element
pub(crate) fn parse_geometry_element(
    element: &Element,
    ctx: &ParseContext,
    scope: &Scope,
) -> Result<Geometry> {
    ctx.expect_gml(element)?;
    let scope = scope.enter(element, ctx)?;

    match element.local_name() {
        "Point" => Ok(Geometry::Point(PointGeometry {
            id: element_id(element),
            position: read_point_position(element, ctx, &scope)?,
        })),
        "LineString" | "LinearRing" | "Ring" | "Curve" | "CompositeCurve" | "OrientableCurve" => {
            parse_curve_element(element, ctx, &scope).map(Geometry::Curve)
        }
        "Polygon" | "Surface" | "PolyhedralSurface" | "TriangulatedSurface" | "Tin"
        | "CompositeSurface" | "OrientableSurface" | "Shell" => {
            parse_surface_element(element, ctx, &scope).map(Geometry::Surface)
        }
        "Solid" => parse_solid(element, ctx, &scope).map(Geometry::Solid),
        "MultiPoint" | "MultiCurve" | "MultiSurface" | "MultiPolygon" | "MultiLineString"
        | "MultiGeometry" => {
            parse_collection(element, ctx, &scope).map(Geometry::MultiGeometry)
        }
        "GeometricComplex" => {
            parse_collection(element, ctx, &scope).map(Geometry::CompositeGeometry)
        }
        "MultiSolid" => parse_collection(element, ctx, &scope).map(Geometry::MultiSolid),
        "CompositeSolid" => parse_collection(element, ctx, &scope).map(Geometry::CompositeSolid),
        other => Err(Error::Unsupported(format!(
            "Geometry element '{}' is not supported",
            other
        ))),
    }
}

/// Property element names holding members, per collection kind
fn member_properties(collection: &str) -> &'static [&'static str] {
    match collection {
        "MultiPoint" => &["pointMember", "pointMembers"],
        "MultiCurve" => &["curveMember", "curveMembers"],
        "MultiSurface" => &["surfaceMember", "surfaceMembers"],
        "MultiPolygon" => &["polygonMember"],
        "MultiLineString" => &["lineStringMember"],
        "MultiGeometry" => &["geometryMember", "geometryMembers"],
        "MultiSolid" | "CompositeSolid" => &["solidMember", "solidMembers"],
        "GeometricComplex" => &["element"],
        _ => &[],
    }
}

fn parse_collection(
    element: &Element,
    ctx: &ParseContext,
    scope: &Scope,
) -> Result<GeometryCollection> {
    let name = element.local_name();
    if matches!(name, "MultiPolygon" | "MultiLineString") {
        ctx.deprecated(element)?;
    }

    let properties = member_properties(name);
    let mut collection = GeometryCollection::new(name);
    collection.id = element_id(element);

    for property in element
        .child_elements()
        .filter(|child| properties.contains(&child.local_name()))
    {
        for member in inline_members(property)? {
            collection
                .members
                .push(parse_geometry_element(member, ctx, scope)?);
        }
    }

    Ok(collection)
}

/// Inline children of a property element
///
/// Referenced members (`xlink:href`) cannot be resolved from a single
/// geometry element and are rejected.
pub(crate) fn inline_members(property: &Element) -> Result<Vec<&Element>> {
    let members: Vec<&Element> = property.child_elements().collect();
    if members.is_empty() {
        let reason = if property.attribute("href").is_some() {
            "references via xlink:href are not supported"
        } else {
            "no inline geometry"
        };
        return Err(Error::Unsupported(format!(
            "Property '{}': {}",
            property.local_name(),
            reason
        )));
    }
    Ok(members)
}

/// Single inline child of a property element
pub(crate) fn inline_member(property: &Element) -> Result<&Element> {
    let mut members = inline_members(property)?;
    if members.len() > 1 {
        return Err(Error::invalid_geometry(
            property.local_name(),
            "expected exactly one child element",
        ));
    }
    Ok(members.remove(0))
}

fn parse_solid(element: &Element, ctx: &ParseContext, scope: &Scope) -> Result<Solid> {
    let mut solid = Solid {
        id: element_id(element),
        exterior: None,
        interiors: Vec::new(),
    };

    for child in element.child_elements() {
        match child.local_name() {
            "exterior" => solid.exterior = Some(parse_shell_property(child, ctx, scope)?),
            "interior" => solid.interiors.push(parse_shell_property(child, ctx, scope)?),
            _ => {}
        }
    }

    Ok(solid)
}

fn parse_shell_property(property: &Element, ctx: &ParseContext, scope: &Scope) -> Result<Surface> {
    let shell = inline_member(property)?;
    ctx.expect_gml(shell)?;
    let scope = scope.enter(shell, ctx)?;
    parse_shell(shell, ctx, &scope)
}
