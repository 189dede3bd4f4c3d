//! Data structures for GML geometries, CRS descriptors and validation settings

mod core;
mod geometry;

pub use core::{
    Crs, DEFAULT_FEATURE_MEMBER_NAMES, GML31_NAMESPACE, GML32_NAMESPACE, GmlVersion,
    ValidatorConfig, is_gml_namespace, is_gml31_namespace, is_gml32_namespace,
};

pub use geometry::{
    ArcSegment, Curve, CurveSegment, Geometry, GeometryCollection, PointGeometry, PolygonPatch,
    Position, Ring, Solid, Surface, SurfacePatch,
};
