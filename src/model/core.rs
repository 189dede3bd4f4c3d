//! Core GML validation types and configuration

/// Namespace URI of GML 3.1
pub const GML31_NAMESPACE: &str = "http://www.opengis.net/gml";

/// Namespace URI of GML 3.2
pub const GML32_NAMESPACE: &str = "http://www.opengis.net/gml/3.2";

/// GML version of a geometry element
///
/// Determined from the namespace of the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GmlVersion {
    /// GML 3.1 (`http://www.opengis.net/gml`)
    Gml31,
    /// GML 3.2 (`http://www.opengis.net/gml/3.2`)
    Gml32,
}

impl GmlVersion {
    /// Get the namespace URI for this version
    pub fn namespace(&self) -> &'static str {
        match self {
            GmlVersion::Gml31 => GML31_NAMESPACE,
            GmlVersion::Gml32 => GML32_NAMESPACE,
        }
    }

    /// Get the GML version from a namespace URI
    pub fn from_namespace(namespace: &str) -> Option<Self> {
        match namespace {
            GML31_NAMESPACE => Some(GmlVersion::Gml31),
            GML32_NAMESPACE => Some(GmlVersion::Gml32),
            _ => None,
        }
    }

    /// Human-readable version number ("3.1" or "3.2")
    pub fn label(&self) -> &'static str {
        match self {
            GmlVersion::Gml31 => "3.1",
            GmlVersion::Gml32 => "3.2",
        }
    }
}

/// Returns `true` if the namespace is the GML 3.1 namespace
pub fn is_gml31_namespace(namespace: Option<&str>) -> bool {
    namespace == Some(GML31_NAMESPACE)
}

/// Returns `true` if the namespace is the GML 3.2 namespace
pub fn is_gml32_namespace(namespace: Option<&str>) -> bool {
    namespace == Some(GML32_NAMESPACE)
}

/// Returns `true` if the namespace is either GML namespace
pub fn is_gml_namespace(namespace: Option<&str>) -> bool {
    is_gml31_namespace(namespace) || is_gml32_namespace(namespace)
}

/// Coordinate reference system descriptor
///
/// Identity against an `srsName` attribute is decided by comparing the alias
/// string, not by structural equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crs {
    /// The identifier this CRS was resolved from
    pub alias: String,
    /// Number of ordinates per coordinate tuple
    pub dimension: usize,
}

impl Crs {
    /// Create a new CRS descriptor
    pub fn new(alias: impl Into<String>, dimension: usize) -> Self {
        Self {
            alias: alias.into(),
            dimension,
        }
    }
}

/// Default names of elements whose children are features
pub const DEFAULT_FEATURE_MEMBER_NAMES: &[&str] = &["featureMember", "featureMembers", "member"];

/// Configuration for geometry validation
///
/// Selects which structural checks run and supplies the default SRS used for
/// geometries that do not declare their own `srsName`.
///
/// # Example
///
/// ```
/// use gmlgeom::ValidatorConfig;
///
/// let config = ValidatorConfig::new()
///     .with_repetition_check(false)
///     .with_default_srs_name("EPSG:25832");
///
/// assert!(config.test_polygon_patch_connectivity());
/// assert!(!config.test_repetition_in_curve_segments());
/// ```
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    test_polygon_patch_connectivity: bool,
    test_repetition_in_curve_segments: bool,
    check_srs_dimension: bool,
    default_srs_name: Option<String>,
    feature_member_names: Vec<String>,
}

impl ValidatorConfig {
    /// Create a configuration with every check enabled and no default SRS
    pub fn new() -> Self {
        Self {
            test_polygon_patch_connectivity: true,
            test_repetition_in_curve_segments: true,
            check_srs_dimension: true,
            default_srs_name: None,
            feature_member_names: DEFAULT_FEATURE_MEMBER_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Enable or disable the surface patch connectivity check
    pub fn with_connectivity_check(mut self, enabled: bool) -> Self {
        self.test_polygon_patch_connectivity = enabled;
        self
    }

    /// Enable or disable the curve segment repetition check
    pub fn with_repetition_check(mut self, enabled: bool) -> Self {
        self.test_repetition_in_curve_segments = enabled;
        self
    }

    /// Enable or disable the srsDimension prevalidation of each geometry
    pub fn with_srs_dimension_check(mut self, enabled: bool) -> Self {
        self.check_srs_dimension = enabled;
        self
    }

    /// Set the SRS used for geometries without their own `srsName`
    pub fn with_default_srs_name(mut self, srs_name: impl Into<String>) -> Self {
        self.default_srs_name = Some(srs_name.into());
        self
    }

    /// Add an element name whose children start a new feature
    pub fn with_feature_member_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.feature_member_names.contains(&name) {
            self.feature_member_names.push(name);
        }
        self
    }

    /// Whether the connectivity check runs
    pub fn test_polygon_patch_connectivity(&self) -> bool {
        self.test_polygon_patch_connectivity
    }

    /// Whether the repetition check runs
    pub fn test_repetition_in_curve_segments(&self) -> bool {
        self.test_repetition_in_curve_segments
    }

    /// Whether srsDimension prevalidation runs
    pub fn check_srs_dimension(&self) -> bool {
        self.check_srs_dimension
    }

    /// The default SRS name, if configured
    pub fn default_srs_name(&self) -> Option<&str> {
        self.default_srs_name.as_deref()
    }

    /// Returns `true` if children of an element with this local name are features
    pub fn is_feature_member_name(&self, local_name: &str) -> bool {
        self.feature_member_names.iter().any(|n| n == local_name)
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
