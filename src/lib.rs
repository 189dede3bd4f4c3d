//! # gmlgeom
//!
//! Structural validation of GML 3.1 and 3.2 geometries.
//!
//! This library inspects the geometry elements embedded in GML documents and
//! reports violations of rules that schema validation cannot express.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Surface patch connectivity: the patches of a surface must form one
//!   connected polygon
//! - No repeated consecutive points inside curve segments
//! - `srsDimension` prevalidation against the coordinate reference system
//! - Pluggable CRS lookup through the [`CrsRegistry`] trait
//!
//! Findings are sent to a [`ValidationSink`]; [`ValidationReport`] collects
//! them in memory.
//!
//! ## Example
//!
//! ```
//! use gmlgeom::{GeometryValidator, ValidationReport, ValidatorConfig, validate_document};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let xml = r#"<app:Parcel xmlns:app="urn:app" xmlns:gml="http://www.opengis.net/gml/3.2"
//!     gml:id="parcel1">
//!   <app:extent>
//!     <gml:Surface>
//!       <gml:patches>
//!         <gml:PolygonPatch><gml:exterior><gml:LinearRing>
//!           <gml:posList>0 0 1 0 1 1 0 1 0 0</gml:posList>
//!         </gml:LinearRing></gml:exterior></gml:PolygonPatch>
//!         <gml:PolygonPatch><gml:exterior><gml:LinearRing>
//!           <gml:posList>5 0 6 0 6 1 5 1 5 0</gml:posList>
//!         </gml:LinearRing></gml:exterior></gml:PolygonPatch>
//!       </gml:patches>
//!     </gml:Surface>
//!   </app:extent>
//! </app:Parcel>"#;
//!
//! let mut validator = GeometryValidator::new(ValidatorConfig::new());
//! let mut report = ValidationReport::new();
//! validate_document(xml, &mut validator, &mut report)?;
//!
//! assert!(!validator.are_polygon_patches_connected());
//! for entry in report.errors() {
//!     println!("{}", entry);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod crs;
pub mod cursor;
pub mod document;
pub mod dom;
pub mod error;
pub mod messages;
pub mod model;
pub mod parser;
pub mod polygon_union;
pub mod prevalidator;
pub mod report;
pub mod selector;
pub mod validator;

pub use crs::{CrsRegistry, StaticCrsRegistry};
pub use cursor::{CursorEvent, ReaderCursor, TreeCursor, XmlCursor};
pub use document::{validate_document, validate_file, validate_fragment};
pub use error::{Error, Result};
pub use messages::MessageKey;
pub use model::{
    ArcSegment, Crs, Curve, CurveSegment, Geometry, GeometryCollection, GmlVersion, PointGeometry,
    PolygonPatch, Position, Ring, Solid, Surface, SurfacePatch, ValidatorConfig,
};
pub use parser::parse_geometry;
pub use prevalidator::{PrevalidationResult, prevalidate, prevalidate_str};
pub use report::{ReportEntry, Severity, ValidationReport, ValidationSink};
pub use selector::GeometryRootSelector;
pub use validator::{
    CheckContext, GeometryValidator, check_no_repetition_in_curve_segments,
    check_polygon_patch_connectivity,
};
