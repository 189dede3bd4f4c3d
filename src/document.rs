//! Validation of whole GML documents
//!
//! Drives a [`GeometryValidator`] over a parsed document: feature starts are
//! signalled before a feature's subtree is visited, element ends after.

use std::path::Path;

use crate::dom::{Document, Element, ElementPath};
use crate::error::Result;
use crate::report::ValidationSink;
use crate::validator::GeometryValidator;

/// Validate every main geometry of a GML document
///
/// Findings go to `sink`; the validator's summaries reflect the whole
/// document afterwards.
///
/// # Errors
///
/// Returns an error if the document is not well-formed XML. Problems with
/// individual geometries are recorded in `sink` instead.
///
/// # Example
///
/// ```
/// use gmlgeom::{GeometryValidator, ValidationReport, ValidatorConfig, validate_document};
///
/// let xml = r#"<wfs:FeatureCollection xmlns:wfs="http://www.opengis.net/wfs/2.0"
///         xmlns:gml="http://www.opengis.net/gml/3.2" xmlns:app="urn:app">
///     <wfs:member>
///         <app:Road gml:id="road1">
///             <app:axis>
///                 <gml:LineString gml:id="axis1">
///                     <gml:posList>0 0 10 0 10 10</gml:posList>
///                 </gml:LineString>
///             </app:axis>
///         </app:Road>
///     </wfs:member>
/// </wfs:FeatureCollection>"#;
///
/// let mut validator = GeometryValidator::new(ValidatorConfig::new());
/// let mut report = ValidationReport::new();
/// validate_document(xml, &mut validator, &mut report).unwrap();
///
/// assert!(!report.has_errors());
/// assert!(validator.is_no_repetition_in_curve_segments());
/// ```
pub fn validate_document(
    xml: &str,
    validator: &mut GeometryValidator,
    sink: &mut dyn ValidationSink,
) -> Result<()> {
    let document = Document::parse(xml)?;
    let mut ancestors = Vec::new();
    visit(&document.root, &mut ancestors, validator, sink);
    Ok(())
}

/// Read a GML file and validate it with [`validate_document`]
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not well-formed XML.
pub fn validate_file<P: AsRef<Path>>(
    path: P,
    validator: &mut GeometryValidator,
    sink: &mut dyn ValidationSink,
) -> Result<()> {
    let path = path.as_ref();
    tracing::debug!("Validating {}", path.display());
    let xml = std::fs::read_to_string(path)?;
    validate_document(&xml, validator, sink)
}

/// Validate a single standalone geometry element
///
/// The element is treated as its own feature, so occurrence counters start
/// at zero.
///
/// # Errors
///
/// Returns an error if the fragment is not well-formed XML.
pub fn validate_fragment(
    xml: &str,
    validator: &mut GeometryValidator,
    sink: &mut dyn ValidationSink,
) -> Result<()> {
    let document = Document::parse(xml)?;
    validator.on_feature_start();
    validator.on_element_end(&ElementPath::root(&document.root), sink);
    Ok(())
}

fn visit<'a>(
    element: &'a Element,
    ancestors: &mut Vec<&'a Element>,
    validator: &mut GeometryValidator,
    sink: &mut dyn ValidationSink,
) {
    if let Some(parent) = ancestors.last()
        && validator.config().is_feature_member_name(parent.local_name())
    {
        tracing::trace!("Feature {} started", element.local_name());
        validator.on_feature_start();
    }

    ancestors.push(element);
    for child in element.child_elements() {
        visit(child, ancestors, validator, sink);
    }
    ancestors.pop();

    let path = ElementPath {
        ancestors: ancestors.as_slice(),
        current: element,
    };
    validator.on_element_end(&path, sink);
}
