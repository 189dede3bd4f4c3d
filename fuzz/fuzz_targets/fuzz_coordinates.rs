#![no_main]

use gmlgeom::{GeometryValidator, ValidationReport, ValidatorConfig, validate_fragment};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary posList content inside an otherwise valid surface
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.contains('<') || text.contains('&') {
        return;
    }

    let xml = format!(
        r#"<gml:Surface xmlns:gml="http://www.opengis.net/gml/3.2"><gml:patches>
<gml:PolygonPatch><gml:exterior><gml:LinearRing><gml:posList>{}</gml:posList></gml:LinearRing></gml:exterior></gml:PolygonPatch>
<gml:PolygonPatch><gml:exterior><gml:LinearRing><gml:posList>0 0 1 0 1 1 0 0</gml:posList></gml:LinearRing></gml:exterior></gml:PolygonPatch>
</gml:patches></gml:Surface>"#,
        text
    );
    let mut validator = GeometryValidator::new(ValidatorConfig::new());
    let mut report = ValidationReport::new();
    let _ = validate_fragment(&xml, &mut validator, &mut report);
});
