//! End-to-end validation tests over complete GML documents

mod common;

use common::*;
use gmlgeom::{MessageKey, Severity, ValidatorConfig};

#[test]
fn test_sibling_geometries_only_disconnected_one_reported() {
    let valid = format!(
        r#"<gml:Polygon gml:id="p1"><gml:exterior>{}</gml:exterior></gml:Polygon>"#,
        linear_ring(&square(0.0, 0.0, 1.0))
    );
    let disconnected = surface(
        "s2",
        &[
            polygon_patch(&square(0.0, 0.0, 1.0)),
            polygon_patch(&square(5.0, 5.0, 1.0)),
        ],
    );
    let xml = feature_collection(&[feature(
        "f1",
        &format!("{}</app:geometry><app:geometry>{}", valid, disconnected),
    )]);

    let (validator, report) = validate(&xml);

    assert!(!validator.are_polygon_patches_connected());
    assert!(validator.is_no_repetition_in_curve_segments());
    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].location.as_deref(), Some("s2"));
    assert!(errors[0].message.contains("'s2'"));
}

#[test]
fn test_touching_patches_are_connected() {
    let xml = feature_collection(&[feature(
        "f1",
        &surface(
            "s1",
            &[
                polygon_patch(&square(0.0, 0.0, 1.0)),
                polygon_patch(&square(1.0, 0.0, 1.0)),
                polygon_patch(&square(0.0, 1.0, 2.0)),
            ],
        ),
    )]);
    let (validator, report) = validate(&xml);
    assert!(validator.are_polygon_patches_connected());
    assert!(!report.has_errors());
}

#[test]
fn test_repetition_reported_with_coordinates() {
    let xml = feature_collection(&[feature("f1", &line_string("0 0 1 1 1 1 2 2"))]);
    let (validator, report) = validate(&xml);

    assert!(!validator.is_no_repetition_in_curve_segments());
    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("0 0, 1 1, 1 1, 2 2"));
    assert!(errors[0].message.contains("(1 1)"));
    assert_eq!(errors[0].location.as_deref(), Some("f1"));
}

#[test]
fn test_disabled_checks_leave_summaries_true() {
    let xml = feature_collection(&[
        feature("f1", &line_string("0 0 0 0")),
        feature(
            "f2",
            &surface(
                "s1",
                &[
                    polygon_patch(&square(0.0, 0.0, 1.0)),
                    polygon_patch(&square(9.0, 9.0, 1.0)),
                ],
            ),
        ),
    ]);
    let config = ValidatorConfig::new()
        .with_connectivity_check(false)
        .with_repetition_check(false);
    let (validator, report) = validate_with(&xml, config);

    assert!(validator.are_polygon_patches_connected());
    assert!(validator.is_no_repetition_in_curve_segments());
    assert!(!report.has_errors());
}

#[test]
fn test_version_notice_once_per_session() {
    let xml = feature_collection(&[
        feature("f1", &line_string("0 0 1 1")),
        feature("f2", &line_string("0 0 2 2")),
    ]);
    let (_, report) = validate(&xml);
    let notices: Vec<_> = report
        .entries()
        .iter()
        .filter(|e| e.severity == Severity::Notice)
        .collect();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].message.contains("GML 3.2"));
}

#[test]
fn test_gml31_document() {
    let xml = format!(
        r#"<app:Collection {}><gml:featureMember><app:Feature gml:id="f1"><app:geometry>
<gml:LineString><gml:coordinates>0,0 1,1 1,1</gml:coordinates></gml:LineString>
</app:geometry></app:Feature></gml:featureMember></app:Collection>"#,
        NAMESPACES_31
    );
    let (validator, report) = validate(&xml);
    assert!(!validator.is_no_repetition_in_curve_segments());
    assert!(report.notices().any(|n| n.message.contains("GML 3.1")));
}

#[test]
fn test_unknown_namespace_yields_single_no_gml_error() {
    let xml = r#"<app:Collection xmlns:app="urn:example:app" xmlns:gml="http://www.opengis.net/gml/4.0">
<app:member><app:Feature><app:geometry><gml:Point><gml:pos>1 2</gml:pos></gml:Point></app:geometry></app:Feature></app:member>
</app:Collection>"#;
    let (_, report) = validate(xml);
    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("http://www.opengis.net/gml/4.0"));
    assert!(report.notices().next().is_none());
}

#[test]
fn test_mixed_patch_kinds_do_not_latch_connectivity() {
    let rectangle = format!(
        "<gml:Rectangle><gml:exterior>{}</gml:exterior></gml:Rectangle>",
        linear_ring(&square(1.0, 0.0, 1.0))
    );
    let xml = feature_collection(&[feature(
        "f1",
        &surface("s1", &[polygon_patch(&square(0.0, 0.0, 1.0)), rectangle]),
    )]);
    let (validator, report) = validate(&xml);

    assert!(validator.are_polygon_patches_connected());
    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("cannot be tested"));
}

#[test]
fn test_srs_dimension_on_polygon_is_inherited() {
    // With three ordinates per point the first two points are identical
    let polygon = r#"<gml:Polygon srsName="EPSG:4979" srsDimension="3"><gml:exterior><gml:LinearRing>
<gml:posList>0 0 0 0 0 0 1 0 0 1 1 0 0 0 0</gml:posList></gml:LinearRing></gml:exterior></gml:Polygon>"#;
    let xml = feature_collection(&[feature("f1", polygon)]);
    let (validator, report) = validate(&xml);
    assert!(!validator.is_no_repetition_in_curve_segments());
    assert_eq!(report.error_count(), 1);
}

#[test]
fn test_explicit_pos_list_dimension_is_kept() {
    // The posList keeps its own srsDimension; the mismatch is detected
    let polygon = r#"<gml:Polygon srsName="EPSG:4979" srsDimension="3"><gml:exterior><gml:LinearRing>
<gml:posList srsDimension="2">0 0 1 0 1 1 0 0</gml:posList></gml:LinearRing></gml:exterior></gml:Polygon>"#;
    let xml = feature_collection(&[feature("f1", polygon)]);
    let (validator, report) = validate(&xml);
    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("does not match"));
    assert!(validator.is_no_repetition_in_curve_segments());
}

#[test]
fn test_default_srs_name_applies_to_geometries_without_one() {
    let xml = feature_collection(&[feature(
        "f1",
        r#"<gml:LineString><gml:posList srsDimension="3">0 0 0 1 1 1</gml:posList></gml:LineString>"#,
    )]);

    let (_, report) = validate(&xml);
    assert!(!report.has_errors());

    let config = ValidatorConfig::new().with_default_srs_name("EPSG:25832");
    let (_, report) = validate_with(&xml, config);
    assert_eq!(report.error_count(), 1);
}

#[test]
fn test_custom_feature_member_name_resets_counters() {
    let broken = line_string("0 0 1");
    let xml = format!(
        r#"<app:Collection {}><app:item><app:Feature gml:id="a"><app:g>{b}</app:g></app:Feature></app:item><app:item><app:Feature gml:id="b"><app:g>{b}</app:g></app:Feature></app:item></app:Collection>"#,
        NAMESPACES,
        b = broken
    );

    let (_, report) = validate(&xml);
    let second = report.errors().nth(1).map(|e| e.message.clone()).unwrap();
    assert!(second.starts_with("LineString number 2"));

    let config = ValidatorConfig::new().with_feature_member_name("item");
    let (_, report) = validate_with(&xml, config);
    let second = report.errors().nth(1).map(|e| e.message.clone()).unwrap();
    assert!(second.starts_with("LineString number 1"));
}

#[test]
fn test_message_keys_are_stable() {
    assert_eq!(
        MessageKey::SurfacePatchesNotConnected.id(),
        "geometry.surfacepatchesnotconnected"
    );
    assert_eq!(
        MessageKey::RepetitionInCurveSegment.id(),
        "geometry.repetitionincurvesegment"
    );
}

#[test]
fn test_disconnected_surface_below_member_with_srs_dimension() {
    let disconnected = surface(
        "s1",
        &[
            polygon_patch(&square(0.0, 0.0, 1.0)),
            polygon_patch(&square(5.0, 5.0, 1.0)),
        ],
    )
    .replacen(r#"gml:id="s1""#, r#"gml:id="s1" srsDimension="2""#, 1);
    let multi = format!(
        r#"<gml:MultiSurface gml:id="ms"><gml:surfaceMember>{}</gml:surfaceMember></gml:MultiSurface>"#,
        disconnected
    );
    let xml = feature_collection(&[feature("f1", &multi)]);

    let (validator, report) = validate(&xml);

    assert!(!validator.are_polygon_patches_connected());
    let errors: Vec<_> = report.errors().collect();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].message.contains("srsDimension"));
    assert_eq!(errors[1].location.as_deref(), Some("s1"));
}
