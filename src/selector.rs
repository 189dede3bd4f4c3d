//! Selection of main geometry elements
//!
//! A GML geometry nested inside another GML element is part of that
//! element's geometry and is validated with it. Only the outermost GML
//! geometry below non-GML content (or a standalone GML fragment) is a main
//! geometry. The selector also counts main geometries per element name
//! within the current feature, for use in diagnostics.

use std::collections::{HashMap, HashSet};

use crate::dom::ElementPath;
use crate::model::is_gml_namespace;

/// Geometry element names registered by default
pub const DEFAULT_GEOMETRY_NAMES: &[&str] = &[
    "Point",
    "Polygon",
    "Surface",
    "Curve",
    "LinearRing",
    "MultiPoint",
    "MultiPolygon",
    "MultiGeometry",
    "MultiSurface",
    "MultiCurve",
    "Ring",
    "LineString",
];

/// Decides which elements are main geometries and counts them per feature
#[derive(Debug, Clone)]
pub struct GeometryRootSelector {
    geometries: HashSet<String>,
    counters: HashMap<String, usize>,
}

impl GeometryRootSelector {
    /// Create a selector with the default geometry names registered
    pub fn new() -> Self {
        let mut selector = Self::empty();
        for name in DEFAULT_GEOMETRY_NAMES {
            selector.register_geometry(*name);
        }
        selector
    }

    /// Create a selector without any registered geometry names
    pub fn empty() -> Self {
        Self {
            geometries: HashSet::new(),
            counters: HashMap::new(),
        }
    }

    /// Register a geometry element name; its counter starts at zero
    pub fn register_geometry(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.counters.insert(name.clone(), 0);
        self.geometries.insert(name);
    }

    /// Unregister a geometry element name and drop its counter
    pub fn unregister_geometry(&mut self, name: &str) {
        self.geometries.remove(name);
        self.counters.remove(name);
    }

    /// Unregister every geometry element name
    pub fn unregister_all_geometries(&mut self) {
        self.geometries.clear();
        self.counters.clear();
    }

    /// Returns `true` if the local name is a registered geometry element
    pub fn is_registered(&self, name: &str) -> bool {
        self.geometries.contains(name)
    }

    /// Returns `true` if the element at `path` is a main geometry
    ///
    /// A standalone element is main iff it is in a GML namespace. An element
    /// with a parent is main iff the parent is not in a GML namespace.
    pub fn is_main_geometry(&self, path: &ElementPath) -> bool {
        match path.parent() {
            None => is_gml_namespace(path.current.namespace()),
            Some(parent) => !is_gml_namespace(parent.namespace()),
        }
    }

    /// Increment the counter of a geometry element name
    ///
    /// Returns the new count.
    pub fn raise_counter(&mut self, name: &str) -> usize {
        let counter = self.counters.entry(name.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Current count for a geometry element name
    pub fn counter(&self, name: &str) -> usize {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// Reset every counter to zero at the start of a new feature
    pub fn reset_for_new_feature(&mut self) {
        for counter in self.counters.values_mut() {
            *counter = 0;
        }
        tracing::trace!("Geometry counters reset");
    }
}

impl Default for GeometryRootSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, Element};
    use crate::model::{GML31_NAMESPACE, GML32_NAMESPACE};

    fn gml(name: &str, namespace: &str) -> Element {
        Element::new(format!("gml:{}", name), Some(namespace.to_string()))
    }

    #[test]
    fn test_standalone_gml_element_is_main() {
        let polygon = gml("Polygon", GML32_NAMESPACE);
        let selector = GeometryRootSelector::new();
        assert!(selector.is_main_geometry(&ElementPath::root(&polygon)));

        let polygon = gml("Polygon", GML31_NAMESPACE);
        assert!(selector.is_main_geometry(&ElementPath::root(&polygon)));

        let foreign = Element::new("Polygon", Some("urn:other".to_string()));
        assert!(!selector.is_main_geometry(&ElementPath::root(&foreign)));
        let bare = Element::new("Polygon", None);
        assert!(!selector.is_main_geometry(&ElementPath::root(&bare)));
    }

    #[test]
    fn test_nested_gml_element_is_not_main() {
        let parent = gml("exterior", GML32_NAMESPACE);
        let ring = gml("LinearRing", GML32_NAMESPACE);
        let ancestors = [&parent];
        let path = ElementPath {
            ancestors: &ancestors,
            current: &ring,
        };
        assert!(!GeometryRootSelector::new().is_main_geometry(&path));
    }

    #[test]
    fn test_geometry_below_feature_property_is_main() {
        let xml = r#"<app:Building xmlns:app="urn:app" xmlns:gml="http://www.opengis.net/gml/3.2">
  <app:footprint><gml:Polygon/></app:footprint>
</app:Building>"#;
        let doc = Document::parse(xml).unwrap();
        let property = doc.root.child("footprint").unwrap();
        let polygon = property.child("Polygon").unwrap();
        let ancestors = [&doc.root, property];
        let path = ElementPath {
            ancestors: &ancestors,
            current: polygon,
        };
        assert!(GeometryRootSelector::new().is_main_geometry(&path));
    }

    #[test]
    fn test_registration() {
        let mut selector = GeometryRootSelector::new();
        for name in DEFAULT_GEOMETRY_NAMES {
            assert!(selector.is_registered(name));
        }
        assert!(!selector.is_registered("Solid"));

        selector.register_geometry("Solid");
        assert!(selector.is_registered("Solid"));
        selector.unregister_geometry("Point");
        assert!(!selector.is_registered("Point"));

        selector.unregister_all_geometries();
        assert!(!selector.is_registered("Polygon"));
    }

    #[test]
    fn test_counters_reset_per_feature() {
        let mut selector = GeometryRootSelector::new();
        assert_eq!(selector.raise_counter("Polygon"), 1);
        assert_eq!(selector.raise_counter("Polygon"), 2);
        assert_eq!(selector.raise_counter("Point"), 1);
        assert_eq!(selector.counter("Polygon"), 2);

        selector.reset_for_new_feature();
        assert_eq!(selector.counter("Polygon"), 0);
        assert_eq!(selector.counter("Point"), 0);
        assert!(selector.is_registered("Polygon"));
    }
}
