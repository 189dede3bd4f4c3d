//! Shared utilities for integration tests
//!
//! Builders for small GML documents and a helper that runs a validator over
//! a document and returns its report.

#![allow(dead_code)]

use gmlgeom::{GeometryValidator, ValidationReport, ValidatorConfig, validate_document};

/// Namespace declarations used by the document builders
pub const NAMESPACES: &str = r#"xmlns:wfs="http://www.opengis.net/wfs/2.0" xmlns:gml="http://www.opengis.net/gml/3.2" xmlns:app="urn:example:app""#;

/// Namespace declarations for GML 3.1 documents
pub const NAMESPACES_31: &str =
    r#"xmlns:gml="http://www.opengis.net/gml" xmlns:app="urn:example:app""#;

/// Wrap features into a WFS 2.0 feature collection
pub fn feature_collection(features: &[String]) -> String {
    let members: String = features
        .iter()
        .map(|f| format!("<wfs:member>{}</wfs:member>", f))
        .collect();
    format!(
        "<wfs:FeatureCollection {}>{}</wfs:FeatureCollection>",
        NAMESPACES, members
    )
}

/// A feature with one geometry property
pub fn feature(id: &str, geometry: &str) -> String {
    format!(
        r#"<app:Feature gml:id="{}"><app:geometry>{}</app:geometry></app:Feature>"#,
        id, geometry
    )
}

/// A `LinearRing` with the given flat ordinates
pub fn linear_ring(ordinates: &str) -> String {
    format!(
        "<gml:LinearRing><gml:posList>{}</gml:posList></gml:LinearRing>",
        ordinates
    )
}

/// Ordinates of an axis-aligned closed square
pub fn square(x: f64, y: f64, size: f64) -> String {
    let (x2, y2) = (x + size, y + size);
    format!("{x} {y} {x2} {y} {x2} {y2} {x} {y2} {x} {y}")
}

/// A `PolygonPatch` with an exterior ring only
pub fn polygon_patch(ordinates: &str) -> String {
    format!(
        "<gml:PolygonPatch><gml:exterior>{}</gml:exterior></gml:PolygonPatch>",
        linear_ring(ordinates)
    )
}

/// A `Surface` made of the given patches
pub fn surface(id: &str, patches: &[String]) -> String {
    format!(
        r#"<gml:Surface gml:id="{}"><gml:patches>{}</gml:patches></gml:Surface>"#,
        id,
        patches.concat()
    )
}

/// A `LineString` with the given flat ordinates
pub fn line_string(ordinates: &str) -> String {
    format!(
        "<gml:LineString><gml:posList>{}</gml:posList></gml:LineString>",
        ordinates
    )
}

/// Route library logs to the test output; repeated calls are harmless
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Validate a document with the given configuration
pub fn validate_with(xml: &str, config: ValidatorConfig) -> (GeometryValidator, ValidationReport) {
    init_logging();
    let mut validator = GeometryValidator::new(config);
    let mut report = ValidationReport::new();
    validate_document(xml, &mut validator, &mut report).expect("document should be well-formed");
    (validator, report)
}

/// Validate a document with every check enabled
pub fn validate(xml: &str) -> (GeometryValidator, ValidationReport) {
    validate_with(xml, ValidatorConfig::new())
}
