//! Coordinate reading: `pos`, `posList`, `coordinates` and point properties

use crate::dom::Element;
use crate::error::{Error, Result};
use crate::model::Position;

use super::{ParseContext, Scope, inline_member, parse_srs_dimension};

/// Ordinates per tuple when neither the document nor the CRS says otherwise
const DEFAULT_DIMENSION: usize = 2;

/// Dimension declared for a coordinate element, if any
///
/// `srsDimension` on the element wins over the geometry scope, which wins
/// over the CRS dimension.
fn declared_dimension(element: &Element, scope: &Scope) -> Result<Option<usize>> {
    if let Some(value) = element.non_empty_attribute("srsDimension") {
        return parse_srs_dimension(value).map(Some);
    }
    Ok(scope
        .srs_dimension
        .or_else(|| scope.crs.as_ref().map(|crs| crs.dimension)))
}

fn parse_ordinates(element: &Element) -> Result<Vec<f64>> {
    element
        .text()
        .split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| {
                Error::parse_error_with_context(element.local_name(), token, "number")
            })
        })
        .collect()
}

/// Read a single `pos`
fn parse_pos(element: &Element, scope: &Scope) -> Result<Position> {
    let ordinates = parse_ordinates(element)?;
    if ordinates.is_empty() {
        return Err(Error::invalid_geometry("pos", "no ordinates"));
    }
    if let Some(dimension) = declared_dimension(element, scope)? {
        if ordinates.len() != dimension {
            return Err(Error::invalid_geometry(
                "pos",
                &format!(
                    "{} ordinates given, srsDimension is {}",
                    ordinates.len(),
                    dimension
                ),
            ));
        }
    }
    Ok(Position::new(ordinates))
}

/// Read a `posList` into positions
fn parse_pos_list(element: &Element, scope: &Scope) -> Result<Vec<Position>> {
    let ordinates = parse_ordinates(element)?;
    let dimension = declared_dimension(element, scope)?.unwrap_or(DEFAULT_DIMENSION);

    if ordinates.len() % dimension != 0 {
        return Err(Error::invalid_geometry(
            "posList",
            &format!(
                "{} ordinates cannot be split into tuples of dimension {}",
                ordinates.len(),
                dimension
            ),
        ));
    }

    Ok(ordinates
        .chunks(dimension)
        .map(|tuple| Position::new(tuple.to_vec()))
        .collect())
}

/// Read a GML 3.1 `coordinates` element (`cs`, `ts` and `decimal` aware)
fn parse_coordinates(element: &Element) -> Result<Vec<Position>> {
    let cs = element.attribute("cs").unwrap_or(",");
    let ts = element.attribute("ts").unwrap_or(" ");
    let decimal = element.attribute("decimal").unwrap_or(".");
    let text = element.text();

    let tuples: Vec<&str> = if ts.trim().is_empty() {
        text.split_whitespace().collect()
    } else {
        text.split(ts).map(str::trim).filter(|t| !t.is_empty()).collect()
    };

    let mut positions = Vec::with_capacity(tuples.len());
    for tuple in tuples {
        let ordinates = tuple
            .split(cs)
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(|o| {
                let normalized = if decimal == "." {
                    o.to_string()
                } else {
                    o.replace(decimal, ".")
                };
                normalized
                    .parse::<f64>()
                    .map_err(|_| Error::parse_error_with_context("coordinates", o, "number"))
            })
            .collect::<Result<Vec<f64>>>()?;
        positions.push(Position::new(ordinates));
    }

    Ok(positions)
}

/// Position of a `Point` element
pub(crate) fn read_point_position(
    point: &Element,
    ctx: &ParseContext,
    scope: &Scope,
) -> Result<Position> {
    for child in point.child_elements() {
        match child.local_name() {
            "pos" => return parse_pos(child, scope),
            "coordinates" => {
                ctx.deprecated(child)?;
                let mut positions = parse_coordinates(child)?;
                if positions.len() != 1 {
                    return Err(Error::invalid_geometry(
                        "Point",
                        "coordinates must hold exactly one tuple",
                    ));
                }
                return Ok(positions.remove(0));
            }
            _ => {}
        }
    }
    Err(Error::invalid_geometry(point.local_name(), "missing pos"))
}

/// Positions of a line string like element, in document order
///
/// Accepts one `posList`, any sequence of `pos` and point properties, and in
/// GML 3.1 `coordinates`.
pub(crate) fn read_positions(
    element: &Element,
    ctx: &ParseContext,
    scope: &Scope,
) -> Result<Vec<Position>> {
    let mut positions = Vec::new();

    for child in element.child_elements() {
        match child.local_name() {
            "posList" => positions.extend(parse_pos_list(child, scope)?),
            "pos" => positions.push(parse_pos(child, scope)?),
            "pointProperty" | "pointRep" => {
                if child.local_name() == "pointRep" {
                    ctx.deprecated(child)?;
                }
                let point = inline_member(child)?;
                ctx.expect_gml(point)?;
                let point_scope = scope.enter(point, ctx)?;
                positions.push(read_point_position(point, ctx, &point_scope)?);
            }
            "coordinates" => {
                ctx.deprecated(child)?;
                positions.extend(parse_coordinates(child)?);
            }
            _ => {}
        }
    }

    Ok(positions)
}
