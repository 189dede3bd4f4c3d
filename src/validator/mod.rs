//! Validation of GML geometry elements
//!
//! [`GeometryValidator`] is driven element by element while a document is
//! traversed (see [`crate::document`]). For each *main* geometry element it:
//! - copies the element's `srsDimension` down to its `pos` and `posList`
//!   descendants
//! - determines the GML version from the namespace
//! - optionally prevalidates the srsDimension declarations
//! - parses the geometry and runs the connectivity and repetition checks,
//!   whatever the prevalidation found
//!
//! Failures that prevent a single geometry from being checked are recorded
//! as one error for that geometry; validation of the rest of the document
//! continues. The outcome of each check is also folded into a document-wide
//! summary that stays `false` once a violation has been seen.

mod connectivity;
mod repetition;

pub use connectivity::check_polygon_patch_connectivity;
pub use repetition::check_no_repetition_in_curve_segments;

use std::sync::Arc;

use crate::crs::{CrsRegistry, StaticCrsRegistry};
use crate::cursor::TreeCursor;
use crate::dom::{Element, ElementPath, get_local_name};
use crate::error::{Error, Result};
use crate::messages::{MessageKey, format_message};
use crate::model::{GmlVersion, ValidatorConfig};
use crate::parser::parse_geometry;
use crate::prevalidator::prevalidate;
use crate::report::ValidationSink;
use crate::selector::GeometryRootSelector;

/// Elements receiving an inherited `srsDimension`
const COORDINATE_ELEMENTS: &[&str] = &["pos", "posList"];

/// State shared by the recursive structural checks
pub struct CheckContext<'a> {
    /// Receiver of findings
    pub sink: &'a mut dyn ValidationSink,
    /// Identifier used for geometries without their own `gml:id`
    pub enclosing_id: Option<&'a str>,
}

impl<'a> CheckContext<'a> {
    /// Create a context reporting to `sink`
    pub fn new(sink: &'a mut dyn ValidationSink, enclosing_id: Option<&'a str>) -> Self {
        Self { sink, enclosing_id }
    }

    /// Identifier for a finding: the geometry's own id, else the enclosing
    /// element's id, else `"null"`
    pub fn resolve_id(&self, geometry_id: Option<&str>) -> String {
        geometry_id
            .or(self.enclosing_id)
            .unwrap_or("null")
            .to_string()
    }
}

/// Validates main geometry elements and keeps document-wide summaries
///
/// One validator serves one document (or session); it is not shared across
/// concurrent validations.
///
/// # Example
///
/// ```
/// use gmlgeom::dom::{Document, ElementPath};
/// use gmlgeom::{GeometryValidator, ValidationReport, ValidatorConfig};
///
/// let xml = r#"<gml:LineString xmlns:gml="http://www.opengis.net/gml/3.2" gml:id="l1">
///     <gml:posList>0 0 1 1 1 1 2 2</gml:posList>
/// </gml:LineString>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let mut validator = GeometryValidator::new(ValidatorConfig::new());
/// let mut report = ValidationReport::new();
/// validator.on_element_end(&ElementPath::root(&doc.root), &mut report);
///
/// assert!(!validator.is_no_repetition_in_curve_segments());
/// assert_eq!(report.error_count(), 1);
/// ```
pub struct GeometryValidator {
    config: ValidatorConfig,
    registry: Arc<dyn CrsRegistry>,
    selector: GeometryRootSelector,
    gml_version_reported: bool,
    no_repetition_in_curve_segments: bool,
    polygon_patches_connected: bool,
}

impl GeometryValidator {
    /// Create a validator using the built-in [`StaticCrsRegistry`]
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            config,
            registry: Arc::new(StaticCrsRegistry::new()),
            selector: GeometryRootSelector::new(),
            gml_version_reported: false,
            no_repetition_in_curve_segments: true,
            polygon_patches_connected: true,
        }
    }

    /// Use a different CRS registry
    pub fn with_registry(mut self, registry: Arc<dyn CrsRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// The configuration in use
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// The main geometry selector
    pub fn selector(&self) -> &GeometryRootSelector {
        &self.selector
    }

    /// Mutable access to the selector, e.g. to register more geometry names
    pub fn selector_mut(&mut self) -> &mut GeometryRootSelector {
        &mut self.selector
    }

    /// Signal the start of a new feature; resets the occurrence counters
    pub fn on_feature_start(&mut self) {
        self.selector.reset_for_new_feature();
    }

    /// Signal that an element and its subtree have been read
    ///
    /// Registered main geometry elements are validated; everything else is
    /// ignored.
    pub fn on_element_end(&mut self, path: &ElementPath, sink: &mut dyn ValidationSink) {
        let name = path.current.local_name();
        if !self.selector.is_registered(name) {
            return;
        }

        if !self.selector.is_main_geometry(path) {
            tracing::trace!("Element {} is part of another geometry", name);
            return;
        }

        self.selector.raise_counter(name);
        self.validate(path, sink);
    }

    /// `true` while no repeated consecutive point has been found
    pub fn is_no_repetition_in_curve_segments(&self) -> bool {
        self.no_repetition_in_curve_segments
    }

    /// `true` while no disconnected surface has been found
    pub fn are_polygon_patches_connected(&self) -> bool {
        self.polygon_patches_connected
    }

    fn validate(&mut self, path: &ElementPath, sink: &mut dyn ValidationSink) {
        let element = with_inherited_srs_dimension(path.current);

        let namespace = element.namespace();
        let Some(version) = namespace.and_then(GmlVersion::from_namespace) else {
            let namespace = namespace.unwrap_or_default();
            tracing::error!("{}", Error::UnknownGmlVersion(namespace.to_string()));
            sink.add_error(format_message(MessageKey::NoGml, &[namespace]), None);
            return;
        };

        if !self.gml_version_reported {
            tracing::debug!("Validating geometries as GML {}", version.label());
            sink.add_notice(format_message(MessageKey::GmlVersion, &[version.label()]));
            self.gml_version_reported = true;
        }

        if let Err(err) = self.check_geometry(&element, version, path, sink) {
            self.report_failure(&element, path, err, sink);
        }
    }

    fn check_geometry(
        &mut self,
        element: &Element,
        version: GmlVersion,
        path: &ElementPath,
        sink: &mut dyn ValidationSink,
    ) -> Result<()> {
        let registry = &*self.registry;
        let default_crs = self
            .config
            .default_srs_name()
            .map(|name| registry.resolve(name))
            .transpose()?;

        // Dimension findings are reported alongside the structural ones
        if self.config.check_srs_dimension() {
            let mut cursor = TreeCursor::new(element);
            let outcome = prevalidate(&mut cursor, default_crs.as_ref(), registry)?;
            if let Some(key) = outcome.message_key() {
                let id = path.nearest_id().unwrap_or("null");
                tracing::debug!("srsDimension prevalidation of {} failed: {:?}", id, outcome);
                sink.add_error(format_message(key, &[id]), Some(id.to_string()));
            }
        }

        let geometry = parse_geometry(element, version, default_crs.as_ref(), registry)?;
        let mut ctx = CheckContext::new(sink, path.nearest_id());

        if self.config.test_polygon_patch_connectivity()
            && !check_polygon_patch_connectivity(&geometry, &mut ctx)?
            && self.polygon_patches_connected
        {
            tracing::debug!("Polygon patches are not connected");
            self.polygon_patches_connected = false;
        }

        if self.config.test_repetition_in_curve_segments()
            && !check_no_repetition_in_curve_segments(&geometry, &mut ctx)
            && self.no_repetition_in_curve_segments
        {
            tracing::debug!("Repetition in curve segments found");
            self.no_repetition_in_curve_segments = false;
        }

        Ok(())
    }

    fn report_failure(
        &self,
        element: &Element,
        path: &ElementPath,
        err: Error,
        sink: &mut dyn ValidationSink,
    ) {
        let id = path.nearest_id();

        if let Error::NotPolygonal(patch) = &err {
            tracing::warn!("Surface connectivity not testable: {}", err);
            let id = id.unwrap_or("null");
            let detail = format!("it contains a '{}' patch", patch);
            sink.add_error(
                format_message(MessageKey::PatchNotPolygonal, &[id, detail.as_str()]),
                Some(id.to_string()),
            );
            return;
        }

        tracing::error!("Unexpected error detected while validating geometry: {}", err);
        let name = element.local_name();
        let counter = self.selector.counter(name).to_string();
        let location = format_message(
            MessageKey::CoordinatesPosition,
            &[name, counter.as_str(), path.current.local_name(), id.unwrap_or("null")],
        );
        sink.add_error(format!("{}: {}", location, err), id.map(str::to_string));
    }
}

/// Working copy of a geometry element with its `srsDimension` moved down
///
/// Every `pos` and `posList` descendant without its own declaration receives
/// the element's value. The attribute is removed from the element itself,
/// where it would not be a coordinate declaration.
fn with_inherited_srs_dimension(element: &Element) -> Element {
    let mut working = element.clone();
    if let Some(dimension) = element.non_empty_attribute("srsDimension") {
        let injected = working.inherit_attribute(COORDINATE_ELEMENTS, "srsDimension", dimension);
        working
            .attributes
            .retain(|(key, _)| get_local_name(key) != "srsDimension");
        tracing::trace!(
            "srsDimension {} inherited by {} coordinate elements",
            dimension,
            injected
        );
    }
    working
}
