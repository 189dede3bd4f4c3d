//! Planar union of surface patches
//!
//! The patch connectivity check needs the union of a surface's polygon
//! patches and whether that union is a single polygon. Patches are projected
//! onto the XY plane and unioned with the Clipper2 library.
//!
//! Clipper2 works on fixed precision coordinates, so all rings of a union are
//! first mapped by one uniform scale and translation into a fixed range.
//! Connectivity does not change under such a mapping, and vertices shared by
//! two patches stay shared.

use clipper2::*;

use crate::error::Error;
use crate::model::{PolygonPatch, Position, Ring, SurfacePatch};

/// Extent of the normalized coordinate range
const NORMALIZED_EXTENT: f64 = 1.0e6;

/// Error type for polygon union operations
#[derive(Debug, thiserror::Error)]
pub enum ClippingError {
    /// A patch is not a polygon patch and cannot be unioned
    #[error("Patch '{0}' is not a polygon patch")]
    NotPolygonal(String),

    /// Invalid polygon data
    #[error("Invalid polygon: {0}")]
    InvalidPolygon(String),

    /// Clipper operation failed
    #[error("Clipper operation failed: {0}")]
    Clipper(String),
}

impl From<ClippingError> for Error {
    fn from(err: ClippingError) -> Self {
        match err {
            ClippingError::NotPolygonal(name) => Error::NotPolygonal(name),
            other => Error::Clipping(other.to_string()),
        }
    }
}

/// Shape of a union result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnionShape {
    /// The union has no area
    Empty,
    /// A single polygon, possibly with holes
    Polygon,
    /// The given number of disjoint polygons
    MultiPolygon(usize),
}

impl UnionShape {
    /// Returns `true` if the union is a single polygon
    pub fn is_polygon(&self) -> bool {
        *self == UnionShape::Polygon
    }
}

type Path2D = Vec<(f64, f64)>;

/// Union the given patches and classify the result
///
/// # Errors
///
/// - [`ClippingError::NotPolygonal`] if any patch is not a polygon patch
/// - [`ClippingError::InvalidPolygon`] for rings with fewer than three
///   distinct positions or non-finite coordinates
/// - [`ClippingError::Clipper`] if the union itself fails
///
/// # Example
///
/// ```
/// use gmlgeom::model::{Curve, PolygonPatch, Position, SurfacePatch};
/// use gmlgeom::polygon_union::{UnionShape, union_patches};
///
/// let square = |x: f64| {
///     SurfacePatch::Polygon(PolygonPatch::new(Curve::line_string(
///         "LinearRing",
///         vec![
///             Position::xy(x, 0.0),
///             Position::xy(x + 1.0, 0.0),
///             Position::xy(x + 1.0, 1.0),
///             Position::xy(x, 1.0),
///             Position::xy(x, 0.0),
///         ],
///     )))
/// };
///
/// let (a, b, c) = (square(0.0), square(1.0), square(5.0));
/// assert_eq!(union_patches(&[&a, &b]).unwrap(), UnionShape::Polygon);
/// assert_eq!(union_patches(&[&a, &c]).unwrap(), UnionShape::MultiPolygon(2));
/// ```
pub fn union_patches(patches: &[&SurfacePatch]) -> Result<UnionShape, ClippingError> {
    let mut polygons = Vec::with_capacity(patches.len());
    for patch in patches {
        match patch {
            SurfacePatch::Polygon(polygon) => polygons.push(polygon_to_paths(polygon)?),
            SurfacePatch::Other { name } => return Err(ClippingError::NotPolygonal(name.clone())),
        }
    }

    if polygons.is_empty() {
        return Ok(UnionShape::Empty);
    }

    normalize(&mut polygons);

    let subject = polygons.remove(0);
    let clip: Vec<Path2D> = polygons.into_iter().flatten().collect();

    let result = union::<Centi>(subject, clip, FillRule::NonZero)
        .map_err(|e| ClippingError::Clipper(format!("{:?}", e)))?;

    let result_paths: Vec<Path2D> = result.into();
    Ok(classify(&result_paths))
}

/// Rings of a polygon patch as 2D paths: exterior counter-clockwise first,
/// then the interiors clockwise
fn polygon_to_paths(polygon: &PolygonPatch) -> Result<Vec<Path2D>, ClippingError> {
    let mut paths = Vec::with_capacity(1 + polygon.interiors.len());
    paths.push(ring_to_path(&polygon.exterior, true)?);
    for interior in &polygon.interiors {
        paths.push(ring_to_path(interior, false)?);
    }
    Ok(paths)
}

fn ring_to_path(ring: &Ring, counter_clockwise: bool) -> Result<Path2D, ClippingError> {
    let positions: Vec<&Position> = ring.positions();
    let mut path: Path2D = Vec::with_capacity(positions.len());

    for position in positions {
        let point = (position.x(), position.y());
        if !point.0.is_finite() || !point.1.is_finite() {
            return Err(ClippingError::InvalidPolygon(format!(
                "Ring '{}' has a non-finite coordinate",
                ring.name
            )));
        }
        // Rings repeat their start point at the end; the projection may also
        // collapse vertices that only differ in height
        if path.last() != Some(&point) {
            path.push(point);
        }
    }
    if path.len() > 1 && path.first() == path.last() {
        path.pop();
    }

    if path.len() < 3 {
        return Err(ClippingError::InvalidPolygon(format!(
            "Ring '{}' has {} distinct positions, expected at least 3",
            ring.name,
            path.len()
        )));
    }

    if (signed_area(&path) > 0.0) != counter_clockwise {
        path.reverse();
    }
    Ok(path)
}

/// Map every path uniformly into `[0, NORMALIZED_EXTENT]`
fn normalize(polygons: &mut [Vec<Path2D>]) {
    let mut min = (f64::INFINITY, f64::INFINITY);
    let mut max = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for &(x, y) in polygons.iter().flatten().flatten() {
        min = (min.0.min(x), min.1.min(y));
        max = (max.0.max(x), max.1.max(y));
    }

    let extent = (max.0 - min.0).max(max.1 - min.1);
    let scale = if extent > 0.0 {
        NORMALIZED_EXTENT / extent
    } else {
        1.0
    };

    for point in polygons.iter_mut().flatten().flatten() {
        *point = ((point.0 - min.0) * scale, (point.1 - min.1) * scale);
    }
}

/// Count result polygons: outer rings share the orientation of the ring
/// with the largest area, holes have the opposite one
fn classify(paths: &[Path2D]) -> UnionShape {
    let areas: Vec<f64> = paths
        .iter()
        .map(|p| signed_area(p))
        .filter(|a| *a != 0.0)
        .collect();

    let Some(largest) = areas
        .iter()
        .copied()
        .max_by(|a, b| a.abs().total_cmp(&b.abs()))
    else {
        return UnionShape::Empty;
    };

    let outer_count = areas
        .iter()
        .filter(|a| a.is_sign_positive() == largest.is_sign_positive())
        .count();

    match outer_count {
        1 => UnionShape::Polygon,
        n => UnionShape::MultiPolygon(n),
    }
}

/// Shoelace formula; positive for counter-clockwise paths
fn signed_area(path: &[(f64, f64)]) -> f64 {
    let n = path.len();
    let mut twice_area = 0.0;
    for i in 0..n {
        let (x1, y1) = path[i];
        let (x2, y2) = path[(i + 1) % n];
        twice_area += x1 * y2 - x2 * y1;
    }
    twice_area / 2.0
}
