//! Error types for GML geometry validation
//!
//! This module provides the error type shared by the prevalidator, the GML
//! parser, the polygon union and the validation orchestration. All errors carry
//! an error code for categorization.
//!
//! Note that geometric rule violations (disconnected patches, repeated points)
//! are *findings* and are reported through a [`crate::ValidationSink`], never
//! as an [`Error`]. Only conditions that prevent a check from running use this
//! type.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O errors
//! - **E2xxx**: XML parsing and structure errors
//! - **E3xxx**: Geometry content errors
//! - **E4xxx**: Unsupported or unresolvable input
//!
//! ## Common Error Codes
//!
//! - `E1001`: I/O error
//! - `E2001`: XML parsing error
//! - `E2002`: XML attribute error
//! - `E2003`: Invalid XML structure
//! - `E3001`: Invalid geometry content
//! - `E3002`: Numeric parse error
//! - `E3003`: Surface patch is not a polygon patch
//! - `E3004`: Polygon union failed
//! - `E4001`: Unsupported geometry element
//! - `E4002`: Unknown coordinate reference system
//! - `E4003`: Unknown GML version

use std::io;
use thiserror::Error;

/// Result type for GML validation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating GML geometries
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading input
    ///
    /// **Error Code**: E1001
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// XML parsing error
    ///
    /// **Error Code**: E2001
    ///
    /// **Common Causes**:
    /// - Malformed XML syntax
    /// - Invalid character encoding
    /// - Unclosed tags
    #[error("[E2001] XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute error
    ///
    /// **Error Code**: E2002
    ///
    /// **Common Causes**:
    /// - Duplicate attribute
    /// - Attribute without value
    #[error("[E2002] XML attribute error: {0}")]
    XmlAttr(String),

    /// Invalid XML structure
    ///
    /// **Error Code**: E2003
    ///
    /// **Common Causes**:
    /// - Mismatched end tags
    /// - Undeclared namespace prefix
    /// - Empty document
    #[error("[E2003] Invalid XML structure: {0}")]
    InvalidXml(String),

    /// Geometry content that cannot be turned into a geometry
    ///
    /// **Error Code**: E3001
    ///
    /// **Common Causes**:
    /// - Ordinate count of a `posList` not divisible by the dimension
    /// - Missing exterior ring of a polygon
    /// - Arc with fewer than three control points
    #[error("[E3001] Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Parse error for numeric values
    ///
    /// **Error Code**: E3002
    ///
    /// **Suggestions**:
    /// - Verify numeric values use proper format (e.g., "1.5" not "1,5")
    /// - Check `srsDimension` holds a plain positive integer
    #[error("[E3002] Parse error: {0}")]
    ParseError(String),

    /// A surface patch taking part in a union is not a polygon patch
    ///
    /// **Error Code**: E3003
    ///
    /// Only polygon patches can be unioned; surfaces made of other patch
    /// kinds cannot be checked for connectivity.
    #[error("[E3003] Surface patch is not a polygon patch: {0}")]
    NotPolygonal(String),

    /// The polygon union engine failed
    ///
    /// **Error Code**: E3004
    #[error("[E3004] Polygon union failed: {0}")]
    Clipping(String),

    /// Unsupported geometry element or construct
    ///
    /// **Error Code**: E4001
    #[error("[E4001] Unsupported: {0}")]
    Unsupported(String),

    /// A CRS identifier could not be resolved by the registry
    ///
    /// **Error Code**: E4002
    ///
    /// **Suggestions**:
    /// - Check the `srsName` spelling
    /// - Register the CRS with the registry in use
    #[error("[E4002] Unknown CRS: {0}")]
    UnknownCrs(String),

    /// The namespace of a geometry element is neither GML 3.1 nor GML 3.2
    ///
    /// **Error Code**: E4003
    #[error("[E4003] Unable to determine GML version for namespace '{0}'")]
    UnknownGmlVersion(String),
}

impl From<std::num::ParseFloatError> for Error {
    fn from(err: std::num::ParseFloatError) -> Self {
        Error::ParseError(format!("Failed to parse floating-point number: {}", err))
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Self {
        Error::ParseError(format!("Failed to parse integer: {}", err))
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttr(format!("Attribute parsing failed: {}", err))
    }
}

impl Error {
    /// Create an InvalidXml error with element context
    ///
    /// # Example
    /// ```ignore
    /// Error::invalid_xml_element("posList", "Unexpected child element")
    /// ```
    pub fn invalid_xml_element(element: &str, message: &str) -> Self {
        Error::InvalidXml(format!("Element '<{}>': {}", element, message))
    }

    /// Create an InvalidGeometry error with element context
    pub fn invalid_geometry(element: &str, message: &str) -> Self {
        Error::InvalidGeometry(format!("Element '<{}>': {}", element, message))
    }

    /// Create a ParseError with context about what was being parsed
    ///
    /// # Arguments
    /// * `field_name` - The name of the field being parsed (e.g., "srsDimension")
    /// * `value` - The value that failed to parse
    /// * `expected_type` - The expected type (e.g., "positive integer")
    pub fn parse_error_with_context(field_name: &str, value: &str, expected_type: &str) -> Self {
        Error::ParseError(format!(
            "Failed to parse '{}': expected {}, got '{}'. \
             Verify the value is properly formatted.",
            field_name, expected_type, value
        ))
    }
}
