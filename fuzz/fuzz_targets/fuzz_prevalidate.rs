#![no_main]

use gmlgeom::{Crs, StaticCrsRegistry, prevalidate_str};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Malformed XML must end in a result value, never a panic
    if let Ok(xml) = std::str::from_utf8(data) {
        let registry = StaticCrsRegistry::new();
        let _ = prevalidate_str(xml, None, &registry);
        let _ = prevalidate_str(xml, Some(&Crs::new("EPSG:25832", 2)), &registry);
    }
});
