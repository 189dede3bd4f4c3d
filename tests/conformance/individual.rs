//! Individual conformance tests - each .gml file is a separate test
//!
//! This test binary uses libtest-mimic to generate one test case per GML
//! document under `test_files/`. Documents in `positive/` must validate
//! without errors; documents in `negative/` must produce at least one error.
//!
//! Run with: cargo test --test conformance_individual
//! Run one category: cargo test --test conformance_individual negative

use gmlgeom::{GeometryValidator, ValidationReport, ValidatorConfig, validate_file};
use libtest_mimic::{Arguments, Failed, Trial};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Get all .gml files in a directory recursively, sorted by name
fn get_test_files(test_dir: &str) -> Vec<PathBuf> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("test_files")
        .join(test_dir);
    if !path.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(&path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("gml"))
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    files
}

fn run_file(path: &Path) -> Result<ValidationReport, Failed> {
    let mut validator = GeometryValidator::new(ValidatorConfig::new());
    let mut report = ValidationReport::new();
    validate_file(path, &mut validator, &mut report)
        .map_err(|e| format!("Failed to validate: {}", e))?;
    Ok(report)
}

/// Test that a positive document produces no errors
fn test_positive_file(path: PathBuf) -> Result<(), Failed> {
    let report = run_file(&path)?;
    if report.has_errors() {
        let errors: Vec<String> = report.errors().map(|e| e.to_string()).collect();
        return Err(format!("Unexpected errors:\n{}", errors.join("\n")).into());
    }
    Ok(())
}

/// Test that a negative document produces at least one error
fn test_negative_file(path: PathBuf) -> Result<(), Failed> {
    let report = run_file(&path)?;
    if !report.has_errors() {
        return Err("Expected validation errors, but none were reported".into());
    }
    Ok(())
}

/// Create test trials for one category of documents
fn create_tests(category: &str, test: fn(PathBuf) -> Result<(), Failed>) -> Vec<Trial> {
    get_test_files(category)
        .into_iter()
        .map(|path| {
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown")
                .to_string();
            Trial::test(format!("{}::{}", category, file_name), move || test(path))
        })
        .collect()
}

fn main() {
    let args = Arguments::from_args();

    let mut tests = create_tests("positive", test_positive_file);
    tests.extend(create_tests("negative", test_negative_file));

    libtest_mimic::run(&args, tests).exit();
}
