//! CRS registry trait and a static default implementation
//!
//! The registry maps an SRS identifier (the value of an `srsName` attribute)
//! to a [`Crs`] descriptor. Validation only needs the dimension of a CRS, so
//! the default registry is a lookup table over common EPSG codes and the
//! compound AdV identifiers used in German cadastral data.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::Crs;

/// Trait for resolving SRS identifiers into CRS descriptors
///
/// Implement this trait to plug in your own CRS database.
///
/// # Example
///
/// ```
/// use gmlgeom::{Crs, CrsRegistry, Error, Result};
///
/// struct LocalOnly;
///
/// impl CrsRegistry for LocalOnly {
///     fn resolve(&self, identifier: &str) -> Result<Crs> {
///         match identifier {
///             "local:grid" => Ok(Crs::new(identifier, 2)),
///             other => Err(Error::UnknownCrs(other.to_string())),
///         }
///     }
/// }
///
/// assert_eq!(LocalOnly.resolve("local:grid").unwrap().dimension, 2);
/// ```
pub trait CrsRegistry: Send + Sync {
    /// Resolve an identifier into a CRS descriptor
    ///
    /// The returned descriptor's alias is the identifier as given, so that a
    /// later `srsName` with the same spelling is recognised as the same CRS.
    ///
    /// Returns [`Error::UnknownCrs`] if the identifier cannot be resolved.
    fn resolve(&self, identifier: &str) -> Result<Crs>;
}

/// EPSG codes known to be three-dimensional (geographic 3D, compound, geocentric)
const EPSG_3D_CODES: &[u32] = &[
    4936, 4937, 4978, 4979, 4985, 4987, 5554, 5555, 5556, 5597, 5598, 5599, 5628, 5629, 5631,
    5632, 5633, 5634, 5665, 5666, 5667, 5668, 5669, 5783, 6697, 6698, 7405, 7409, 7415, 7416,
    7417, 7423, 9518, 9519, 9520, 9705,
];

/// Registry backed by a static table of EPSG codes
///
/// Recognised identifier forms:
/// - `EPSG:25832`
/// - `urn:ogc:def:crs:EPSG::25832` and `urn:ogc:def:crs:EPSG:6.12:25832`
/// - `urn:x-ogc:def:crs:EPSG:25832`
/// - `http://www.opengis.net/def/crs/EPSG/0/25832`
/// - `http://www.opengis.net/gml/srs/epsg.xml#25832`
/// - `urn:adv:crs:ETRS89_UTM32*DE_DHHN2016_NH` (and other AdV names)
///
/// Identifiers are percent-decoded before matching, so `%2A` in an AdV
/// name is accepted.
#[derive(Debug, Clone, Default)]
pub struct StaticCrsRegistry {
    custom: HashMap<String, usize>,
}

impl StaticCrsRegistry {
    /// Create a registry with only the built-in table
    pub fn new() -> Self {
        Self {
            custom: HashMap::new(),
        }
    }

    /// Register an additional identifier with its dimension
    ///
    /// Custom entries are matched on the exact (percent-decoded) identifier
    /// and take precedence over the built-in table.
    pub fn with_crs(mut self, identifier: impl Into<String>, dimension: usize) -> Self {
        let identifier = identifier.into();
        let key = decode_identifier(&identifier);
        self.custom.insert(key, dimension);
        self
    }

    fn lookup_dimension(&self, identifier: &str) -> Option<usize> {
        if let Some(dimension) = self.custom.get(identifier) {
            return Some(*dimension);
        }

        if let Some(name) = identifier.strip_prefix("urn:adv:crs:") {
            return Some(adv_dimension(name));
        }

        epsg_code(identifier).map(|code| {
            if EPSG_3D_CODES.contains(&code) {
                3
            } else {
                2
            }
        })
    }
}

impl CrsRegistry for StaticCrsRegistry {
    fn resolve(&self, identifier: &str) -> Result<Crs> {
        let decoded = decode_identifier(identifier);
        self.lookup_dimension(decoded.trim())
            .map(|dimension| Crs::new(identifier, dimension))
            .ok_or_else(|| Error::UnknownCrs(identifier.to_string()))
    }
}

fn decode_identifier(identifier: &str) -> String {
    urlencoding::decode(identifier)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| identifier.to_string())
}

/// AdV names join position and height system with `*`; those are compound 3D
fn adv_dimension(name: &str) -> usize {
    if name.contains('*') { 3 } else { 2 }
}

/// Extract the EPSG code from the supported identifier forms
fn epsg_code(identifier: &str) -> Option<u32> {
    let lower = identifier.to_ascii_lowercase();

    let code = if let Some(rest) = lower.strip_prefix("epsg:") {
        rest
    } else if let Some(rest) = lower.strip_prefix("urn:ogc:def:crs:epsg:") {
        // Optional version between the authority and the code
        rest.rsplit(':').next()?
    } else if let Some(rest) = lower.strip_prefix("urn:x-ogc:def:crs:epsg:") {
        rest.rsplit(':').next()?
    } else if let Some(rest) = lower.strip_prefix("http://www.opengis.net/def/crs/epsg/") {
        rest.rsplit('/').next()?
    } else if let Some(rest) = lower.strip_prefix("http://www.opengis.net/gml/srs/epsg.xml#") {
        rest
    } else {
        return None;
    };

    code.parse::<u32>().ok()
}
