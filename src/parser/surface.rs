//! Surfaces, surface patches and shells

use crate::dom::Element;
use crate::error::{Error, Result};
use crate::model::{PolygonPatch, Ring, Surface, SurfacePatch};

use super::curve::curve_from_property;
use super::{ParseContext, Scope, element_id, inline_member};

/// Element names of patch arrays
const PATCH_ARRAYS: &[&str] = &["patches", "polygonPatches", "trianglePatches"];

/// Parse `Polygon`, `Surface`, `PolyhedralSurface`, `TriangulatedSurface`,
/// `Tin`, `CompositeSurface`, `OrientableSurface` or `Shell`
///
/// Composite and orientable surfaces and shells collect the patches of their
/// member surfaces.
pub(crate) fn parse_surface_element(
    element: &Element,
    ctx: &ParseContext,
    scope: &Scope,
) -> Result<Surface> {
    let name = element.local_name();
    let mut surface = Surface::new(name);
    surface.id = element_id(element);

    match name {
        "Polygon" => {
            let patch = parse_polygon_rings(element, ctx, scope)?;
            surface.patches.push(SurfacePatch::Polygon(patch));
        }
        "Surface" | "PolyhedralSurface" | "TriangulatedSurface" | "Tin" => {
            let array = element
                .child_elements()
                .find(|child| PATCH_ARRAYS.contains(&child.local_name()));
            match array {
                Some(array) => {
                    for patch in array.child_elements() {
                        surface.patches.push(parse_patch(patch, ctx, scope)?);
                    }
                }
                // A Tin may be given by its control points only
                None if name == "Tin" => {}
                None => return Err(Error::invalid_geometry(name, "missing patches")),
            }
        }
        "CompositeSurface" | "Shell" => {
            return parse_shell(element, ctx, scope);
        }
        "OrientableSurface" => {
            let base = element
                .child("baseSurface")
                .ok_or_else(|| Error::invalid_geometry(name, "missing baseSurface"))?;
            surface.patches = surface_from_property(base, ctx, scope)?.patches;
        }
        other => {
            return Err(Error::Unsupported(format!(
                "Surface element '{}' is not supported",
                other
            )));
        }
    }

    Ok(surface)
}

/// Parse a surface made of `surfaceMember`s (`Shell`, `CompositeSurface`)
pub(crate) fn parse_shell(element: &Element, ctx: &ParseContext, scope: &Scope) -> Result<Surface> {
    let mut surface = Surface::new(element.local_name());
    surface.id = element_id(element);

    for member in element
        .child_elements()
        .filter(|child| child.local_name() == "surfaceMember")
    {
        let member = surface_from_property(member, ctx, scope)?;
        surface.patches.extend(member.patches);
    }

    Ok(surface)
}

fn surface_from_property(property: &Element, ctx: &ParseContext, scope: &Scope) -> Result<Surface> {
    let member = inline_member(property)?;
    ctx.expect_gml(member)?;
    let scope = scope.enter(member, ctx)?;
    parse_surface_element(member, ctx, &scope)
}

fn parse_patch(element: &Element, ctx: &ParseContext, scope: &Scope) -> Result<SurfacePatch> {
    match element.local_name() {
        "PolygonPatch" => parse_polygon_rings(element, ctx, scope).map(SurfacePatch::Polygon),
        other => Ok(SurfacePatch::Other {
            name: other.to_string(),
        }),
    }
}

/// Rings of a `Polygon` or `PolygonPatch`
fn parse_polygon_rings(element: &Element, ctx: &ParseContext, scope: &Scope) -> Result<PolygonPatch> {
    let mut exterior: Option<Ring> = None;
    let mut interiors = Vec::new();

    for child in element.child_elements() {
        match child.local_name() {
            "exterior" => exterior = Some(curve_from_property(child, ctx, scope)?),
            "interior" => interiors.push(curve_from_property(child, ctx, scope)?),
            "outerBoundaryIs" => {
                ctx.deprecated(child)?;
                exterior = Some(curve_from_property(child, ctx, scope)?);
            }
            "innerBoundaryIs" => {
                ctx.deprecated(child)?;
                interiors.push(curve_from_property(child, ctx, scope)?);
            }
            _ => {}
        }
    }

    let exterior =
        exterior.ok_or_else(|| Error::invalid_geometry(element.local_name(), "missing exterior"))?;
    for ring in std::iter::once(&exterior).chain(interiors.iter()) {
        if !matches!(ring.name.as_str(), "LinearRing" | "Ring") {
            return Err(Error::invalid_geometry(
                element.local_name(),
                &format!("boundary must be a LinearRing or Ring, found '{}'", ring.name),
            ));
        }
    }

    Ok(PolygonPatch {
        exterior,
        interiors,
    })
}

#[cfg(test)]
mod tests {
    use super::super::tests::{GML31, GML32, parse};
    use crate::error::Error;
    use crate::model::{Geometry, GmlVersion, Surface, SurfacePatch};

    fn surface(xml: &str, version: GmlVersion) -> Surface {
        match parse(xml, version).unwrap() {
            Geometry::Surface(surface) => surface,
            other => panic!("Expected surface, got {:?}", other),
        }
    }

    const SQUARE: &str =
        r#"<gml:exterior><gml:LinearRing><gml:posList>0 0 1 0 1 1 0 1 0 0</gml:posList></gml:LinearRing></gml:exterior>"#;
    const HOLE: &str = r#"<gml:interior><gml:LinearRing><gml:posList>0.2 0.2 0.2 0.4 0.4 0.4 0.2 0.2</gml:posList></gml:LinearRing></gml:interior>"#;

    #[test]
    fn test_polygon_with_hole() {
        let xml = format!(r#"<gml:Polygon {} gml:id="p">{}{}</gml:Polygon>"#, GML32, SQUARE, HOLE);
        let polygon = surface(&xml, GmlVersion::Gml32);
        assert_eq!(polygon.name, "Polygon");
        assert_eq!(polygon.id.as_deref(), Some("p"));
        match &polygon.patches[..] {
            [SurfacePatch::Polygon(patch)] => {
                assert_eq!(patch.exterior.positions().len(), 5);
                assert_eq!(patch.interiors.len(), 1);
            }
            other => panic!("Expected one polygon patch, got {:?}", other),
        }
    }

    #[test]
    fn test_polygon_without_exterior_is_invalid() {
        let xml = format!(r#"<gml:Polygon {}>{}</gml:Polygon>"#, GML32, HOLE);
        assert!(matches!(
            parse(&xml, GmlVersion::Gml32),
            Err(Error::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_gml31_boundaries() {
        let xml = format!(
            r#"<gml:Polygon {}><gml:outerBoundaryIs><gml:LinearRing><gml:coordinates>0,0 1,0 1,1 0,0</gml:coordinates></gml:LinearRing></gml:outerBoundaryIs></gml:Polygon>"#,
            GML31
        );
        assert_eq!(surface(&xml, GmlVersion::Gml31).patches.len(), 1);
    }

    #[test]
    fn test_surface_with_mixed_patches() {
        let xml = format!(
            r#"<gml:Surface {}><gml:patches>
  <gml:PolygonPatch>{}</gml:PolygonPatch>
  <gml:Rectangle>{}</gml:Rectangle>
  <gml:Triangle>{}</gml:Triangle>
</gml:patches></gml:Surface>"#,
            GML32, SQUARE, SQUARE, SQUARE
        );
        let surface = surface(&xml, GmlVersion::Gml32);
        assert_eq!(surface.patches.len(), 3);
        assert!(matches!(surface.patches[0], SurfacePatch::Polygon(_)));
        assert!(matches!(surface.patches[1], SurfacePatch::Other { ref name } if name == "Rectangle"));
        assert!(matches!(surface.patches[2], SurfacePatch::Other { ref name } if name == "Triangle"));
    }

    #[test]
    fn test_surface_without_patches_is_invalid() {
        let xml = format!(r#"<gml:Surface {}/>"#, GML32);
        assert!(matches!(
            parse(&xml, GmlVersion::Gml32),
            Err(Error::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_polyhedral_surface() {
        let xml = format!(
            r#"<gml:PolyhedralSurface {}><gml:polygonPatches><gml:PolygonPatch>{}</gml:PolygonPatch><gml:PolygonPatch>{}</gml:PolygonPatch></gml:polygonPatches></gml:PolyhedralSurface>"#,
            GML32, SQUARE, SQUARE
        );
        let surface = surface(&xml, GmlVersion::Gml32);
        assert_eq!(surface.name, "PolyhedralSurface");
        assert_eq!(surface.patches.len(), 2);
    }

    #[test]
    fn test_composite_and_orientable_surface_collect_patches() {
        let polygon = format!("<gml:Polygon>{}</gml:Polygon>", SQUARE);
        let xml = format!(
            r#"<gml:CompositeSurface {} gml:id="cs">
  <gml:surfaceMember>{}</gml:surfaceMember>
  <gml:surfaceMember><gml:OrientableSurface orientation="-"><gml:baseSurface>{}</gml:baseSurface></gml:OrientableSurface></gml:surfaceMember>
</gml:CompositeSurface>"#,
            GML32, polygon, polygon
        );
        let surface = surface(&xml, GmlVersion::Gml32);
        assert_eq!(surface.name, "CompositeSurface");
        assert_eq!(surface.id.as_deref(), Some("cs"));
        assert_eq!(surface.patches.len(), 2);
    }

    #[test]
    fn test_boundary_must_be_a_ring() {
        let xml = format!(
            r#"<gml:Polygon {}><gml:exterior><gml:LineString><gml:posList>0 0 1 0 1 1 0 0</gml:posList></gml:LineString></gml:exterior></gml:Polygon>"#,
            GML32
        );
        assert!(matches!(
            parse(&xml, GmlVersion::Gml32),
            Err(Error::InvalidGeometry(_))
        ));
    }
}
