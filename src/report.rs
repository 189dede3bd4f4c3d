//! Validation findings accumulator
//!
//! Checks never fail on a rule violation; they record an entry through a
//! [`ValidationSink`] and keep going. [`ValidationReport`] is the in-memory
//! sink used by default.

use std::fmt;

/// Severity of a report entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A rule violation or a geometry that could not be validated
    Error,
    /// Informational message
    Notice,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Notice => write!(f, "NOTICE"),
        }
    }
}

/// A single finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// Severity of the finding
    pub severity: Severity,
    /// Formatted message
    pub message: String,
    /// Identifier of the element the finding refers to
    pub location: Option<String>,
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "[{}] {} (at {})", self.severity, self.message, location),
            None => write!(f, "[{}] {}", self.severity, self.message),
        }
    }
}

/// Append-only receiver of validation findings
///
/// Implement this to forward findings to your own reporting.
pub trait ValidationSink {
    /// Record an error, optionally referencing an element identifier
    fn add_error(&mut self, message: String, location: Option<String>);

    /// Record a notice
    fn add_notice(&mut self, message: String);
}

/// Ordered list of findings
///
/// # Example
///
/// ```
/// use gmlgeom::{ValidationReport, ValidationSink};
///
/// let mut report = ValidationReport::new();
/// report.add_notice("GML 3.2".to_string());
/// report.add_error("bad".to_string(), Some("p1".to_string()));
///
/// assert_eq!(report.error_count(), 1);
/// assert!(report.has_errors());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    entries: Vec<ReportEntry>,
}

impl ValidationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in the order they were recorded
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Error entries in order
    pub fn errors(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries
            .iter()
            .filter(|e| e.severity == Severity::Error)
    }

    /// Notice entries in order
    pub fn notices(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries
            .iter()
            .filter(|e| e.severity == Severity::Notice)
    }

    /// Number of error entries
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Returns `true` if at least one error was recorded
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Returns `true` if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl ValidationSink for ValidationReport {
    fn add_error(&mut self, message: String, location: Option<String>) {
        self.entries.push(ReportEntry {
            severity: Severity::Error,
            message,
            location,
        });
    }

    fn add_notice(&mut self, message: String) {
        self.entries.push(ReportEntry {
            severity: Severity::Notice,
            message,
            location: None,
        });
    }
}
