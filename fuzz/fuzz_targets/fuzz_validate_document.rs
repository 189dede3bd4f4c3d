#![no_main]

use gmlgeom::{GeometryValidator, ValidationReport, ValidatorConfig, validate_document};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(xml) = std::str::from_utf8(data) {
        let mut validator = GeometryValidator::new(ValidatorConfig::new());
        let mut report = ValidationReport::new();
        let _ = validate_document(xml, &mut validator, &mut report);
    }
});
