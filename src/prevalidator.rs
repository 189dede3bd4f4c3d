//! Streaming srsDimension prevalidation
//!
//! Before a geometry is materialized, its XML is walked once to verify that
//! every `srsDimension` declaration sits on a coordinate element (`pos` or
//! `posList`) and agrees with the dimension of the CRS active at that point.
//! The active CRS is threaded down the recursion as a parameter: an
//! `srsName` on an element overrides the ambient CRS for that element and
//! its descendants.
//!
//! The first failure at any depth ends the walk; later siblings are not
//! examined.

use crate::crs::CrsRegistry;
use crate::cursor::{CursorEvent, ReaderCursor, XmlCursor};
use crate::error::{Error, Result};
use crate::messages::MessageKey;
use crate::model::Crs;

/// Local names of the elements allowed to carry `srsDimension`
const COORDINATE_ELEMENTS: &[&str] = &["pos", "posList"];

/// Outcome of a prevalidation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrevalidationResult {
    /// No start element could be found, or the XML is malformed
    ParseError,
    /// `srsDimension` on an element other than `pos` or `posList`
    BadTagForSrsDimension,
    /// `srsDimension` differs from the dimension of the active CRS
    WrongSrsDimension,
    /// No problem found
    PrevalidationOk,
}

impl PrevalidationResult {
    /// Returns `true` for [`PrevalidationResult::PrevalidationOk`]
    pub fn is_ok(&self) -> bool {
        *self == PrevalidationResult::PrevalidationOk
    }

    /// Message key used to report a failed prevalidation
    ///
    /// Returns `None` for [`PrevalidationResult::PrevalidationOk`].
    pub fn message_key(&self) -> Option<MessageKey> {
        match self {
            PrevalidationResult::ParseError => Some(MessageKey::SrsDimensionParseError),
            PrevalidationResult::BadTagForSrsDimension => Some(MessageKey::SrsDimensionBadTag),
            PrevalidationResult::WrongSrsDimension => Some(MessageKey::SrsDimensionWrong),
            PrevalidationResult::PrevalidationOk => None,
        }
    }
}

/// Prevalidate the element the cursor is positioned on (or the next one)
///
/// `default_crs` is the ambient CRS for the element; `None` means no CRS is
/// known, in which case dimension mismatches cannot be detected until an
/// `srsName` is encountered.
///
/// Malformed XML encountered while advancing the cursor yields
/// [`PrevalidationResult::ParseError`]. An unresolvable `srsName` and a
/// non-integer `srsDimension` are returned as errors.
pub fn prevalidate(
    cursor: &mut dyn XmlCursor,
    default_crs: Option<&Crs>,
    registry: &dyn CrsRegistry,
) -> Result<PrevalidationResult> {
    let mut result = PrevalidationResult::PrevalidationOk;

    if cursor.event() != CursorEvent::StartElement {
        while cursor.has_next() && cursor.event() != CursorEvent::StartElement {
            if cursor.advance().is_err() {
                return Ok(PrevalidationResult::ParseError);
            }
        }
        if cursor.event() != CursorEvent::StartElement {
            return Ok(PrevalidationResult::ParseError);
        }
    }

    let crs = active_crs(cursor, default_crs, registry)?;

    if let Some(declared) = cursor.attribute("srsDimension").filter(|v| !v.is_empty()) {
        let is_coordinate_element = cursor
            .local_name()
            .is_some_and(|name| COORDINATE_ELEMENTS.contains(&name));

        if !is_coordinate_element {
            result = PrevalidationResult::BadTagForSrsDimension;
        } else if let Some(crs) = &crs {
            let dimension = declared.parse::<usize>().map_err(|_| {
                Error::parse_error_with_context("srsDimension", declared, "positive integer")
            })?;
            if dimension != crs.dimension {
                result = PrevalidationResult::WrongSrsDimension;
            }
        }
    }

    while cursor.has_next() && result.is_ok() {
        match cursor.advance() {
            Ok(CursorEvent::StartElement) => {
                result = prevalidate(cursor, crs.as_ref(), registry)?;
            }
            Ok(CursorEvent::EndElement) => break,
            Ok(_) => {}
            Err(_) => return Ok(PrevalidationResult::ParseError),
        }
    }

    Ok(result)
}

/// Prevalidate the first element of an XML string
pub fn prevalidate_str(
    xml: &str,
    default_crs: Option<&Crs>,
    registry: &dyn CrsRegistry,
) -> Result<PrevalidationResult> {
    let mut cursor = ReaderCursor::from_str(xml);
    prevalidate(&mut cursor, default_crs, registry)
}

/// CRS in effect for the current element
///
/// A non-empty `srsName` overrides the ambient CRS unless it spells the same
/// alias; identity is decided on the alias string alone.
fn active_crs(
    cursor: &dyn XmlCursor,
    default_crs: Option<&Crs>,
    registry: &dyn CrsRegistry,
) -> Result<Option<Crs>> {
    match cursor.attribute("srsName").filter(|v| !v.is_empty()) {
        Some(srs_name) if default_crs.is_none_or(|crs| crs.alias != srs_name) => {
            registry.resolve(srs_name).map(Some)
        }
        _ => Ok(default_crs.cloned()),
    }
}
