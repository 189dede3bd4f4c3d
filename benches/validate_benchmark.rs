use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gmlgeom::{
    GeometryValidator, StaticCrsRegistry, ValidationReport, ValidatorConfig, prevalidate_str,
    validate_document,
};
use std::hint::black_box;

/// Generate a feature collection with `features` parcels, each a surface made
/// of a row of `patches` edge-sharing squares
fn generate_gml(features: usize, patches: usize) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<wfs:FeatureCollection xmlns:wfs="http://www.opengis.net/wfs/2.0" xmlns:gml="http://www.opengis.net/gml/3.2" xmlns:app="urn:example:app">
"#,
    );

    for f in 0..features {
        let y = (f * 20) as f64;
        xml.push_str(&format!(
            "  <wfs:member><app:Parcel gml:id=\"parcel_{}\"><app:extent>\n    <gml:Surface srsName=\"EPSG:25832\"><gml:patches>\n",
            f
        ));
        for p in 0..patches {
            let x = (p * 10) as f64;
            xml.push_str(&format!(
                "      <gml:PolygonPatch><gml:exterior><gml:LinearRing><gml:posList>{x} {y} {x2} {y} {x2} {y2} {x} {y2} {x} {y}</gml:posList></gml:LinearRing></gml:exterior></gml:PolygonPatch>\n",
                x = x,
                y = y,
                x2 = x + 10.0,
                y2 = y + 10.0
            ));
        }
        xml.push_str("    </gml:patches></gml:Surface>\n  </app:extent></app:Parcel></wfs:member>\n");
    }

    xml.push_str("</wfs:FeatureCollection>\n");
    xml
}

fn bench_validate_documents(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_document");

    for &(features, patches) in &[(10, 2), (100, 4), (100, 16)] {
        let xml = generate_gml(features, patches);

        group.bench_with_input(
            BenchmarkId::new("features_patches", format!("{}f_{}p", features, patches)),
            &xml,
            |b, xml| {
                b.iter(|| {
                    let mut validator = GeometryValidator::new(ValidatorConfig::new());
                    let mut report = ValidationReport::new();
                    validate_document(xml, &mut validator, &mut report).unwrap();
                    black_box(validator.are_polygon_patches_connected())
                });
            },
        );
    }

    group.finish();
}

fn bench_prevalidate(c: &mut Criterion) {
    let mut group = c.benchmark_group("prevalidate");
    let registry = StaticCrsRegistry::new();

    for &patches in &[4, 64] {
        let xml = generate_gml(1, patches);
        let start = xml.find("<gml:Surface").unwrap_or(0);
        let surface = &xml[start..];

        group.bench_with_input(BenchmarkId::new("patches", patches), &surface, |b, xml| {
            b.iter(|| black_box(prevalidate_str(xml, None, &registry).unwrap()));
        });
    }

    group.finish();
}

fn bench_conformance_files(c: &mut Criterion) {
    let mut group = c.benchmark_group("conformance_files");

    // Only files that exist are benchmarked
    let test_files = [
        "test_files/positive/connected_surface.gml",
        "test_files/positive/srs_dimension_3d.gml",
    ];

    for file_path in &test_files {
        let Ok(xml) = std::fs::read_to_string(file_path) else {
            continue;
        };
        let file_name = std::path::Path::new(file_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(file_path);

        group.bench_function(file_name, |b| {
            b.iter(|| {
                let mut validator = GeometryValidator::new(ValidatorConfig::new());
                let mut report = ValidationReport::new();
                validate_document(&xml, &mut validator, &mut report).unwrap();
                black_box(report)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_validate_documents,
    bench_prevalidate,
    bench_conformance_files
);
criterion_main!(benches);
