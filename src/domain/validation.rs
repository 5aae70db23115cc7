//! Input validation for coordinates, prize values, radii and treasure creation.
//!
//! Every validator takes raw text as it arrives from a query string or a
//! coerced body field and either returns a typed domain value or an
//! [`InvalidInput`] carrying the client-facing message.

use thiserror::Error;

use super::{Coordinate, PrizeValue, RadiusClass, TreasureId};
use crate::constants::{geo, prize};
use crate::models::{NewTreasure, SearchQuery};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvalidInput(pub String);

impl InvalidInput {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Empty strings count as missing.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Numeric coercion of query text: blank text is zero, only the exact
/// spelling `Infinity` names an infinity, and unsigned `0x`/`0o`/`0b`
/// literals are integers. Anything else must be a decimal literal.
fn parse_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    if let Some(value) = parse_radix_literal(trimmed) {
        return Some(value);
    }

    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return (unsigned == "Infinity").then(|| {
            if trimmed.starts_with('-') {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }
        });
    }

    trimmed.parse::<f64>().ok()
}

fn parse_radix_literal(text: &str) -> Option<f64> {
    let (radix, digits) = match text.get(..2)? {
        "0x" | "0X" => (16, &text[2..]),
        "0o" | "0O" => (8, &text[2..]),
        "0b" | "0B" => (2, &text[2..]),
        _ => return None,
    };
    if digits.is_empty() {
        return None;
    }

    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc.mul_add(f64::from(radix), f64::from(d)))
    })
}

pub fn validate_coordinate(
    latitude: Option<&str>,
    longitude: Option<&str>,
) -> Result<Coordinate, InvalidInput> {
    let latitude = present(latitude).ok_or_else(|| InvalidInput::new("Latitude is required."))?;
    let longitude =
        present(longitude).ok_or_else(|| InvalidInput::new("Longitude is required"))?;

    let latitude = parse_float(latitude)
        .ok_or_else(|| InvalidInput::new("Latitude should be a float number."))?;
    let longitude = parse_float(longitude)
        .ok_or_else(|| InvalidInput::new("Longitude should be a float number."))?;

    if latitude.abs() > geo::MAX_LATITUDE {
        return Err(InvalidInput::new(
            "Latitude should be in range between -90 and 90.",
        ));
    }

    if longitude.abs() > geo::MAX_LONGITUDE {
        return Err(InvalidInput::new(
            "Longitude should be in range between -180 and 180.",
        ));
    }

    Ok(Coordinate::new(latitude, longitude))
}

/// Accepts only plain decimal digits; signs and decimal points are rejected
/// before the range is considered.
pub fn validate_prize_value(value: Option<&str>) -> Result<PrizeValue, InvalidInput> {
    let raw = value.unwrap_or_default();

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidInput::new("Prize value should be a whole number."));
    }

    // Overlong digit strings fail to parse and land in the range error.
    raw.parse::<u32>()
        .ok()
        .filter(|v| (prize::MIN_VALUE..=prize::MAX_VALUE).contains(v))
        .map(PrizeValue::new_unchecked)
        .ok_or_else(|| InvalidInput::new("Prize value should be in range between 10 to 30."))
}

pub fn validate_radius_class(value: Option<&str>) -> Result<RadiusClass, InvalidInput> {
    match present(value) {
        None => Err(InvalidInput::new("Distance is required.")),
        Some("1") => Ok(RadiusClass::OneKm),
        Some("10") => Ok(RadiusClass::TenKm),
        Some(_) => Err(InvalidInput::new(
            "Distance should be either 1 or 10 in km.",
        )),
    }
}

/// Validates the fields of a treasure creation request.
///
/// An id of `0` is reported as missing, the same as an absent id.
pub fn validate_treasure_create(
    id: Option<&str>,
    latitude: Option<&str>,
    longitude: Option<&str>,
    name: Option<&str>,
) -> Result<NewTreasure, InvalidInput> {
    let id = present(id).ok_or_else(|| InvalidInput::new("Treasure id is required."))?;
    let id = id
        .trim()
        .parse::<i32>()
        .map_err(|_| InvalidInput::new("Treasure id should be a whole number."))?;
    if id == 0 {
        return Err(InvalidInput::new("Treasure id is required."));
    }

    let coordinate = validate_coordinate(latitude, longitude)?;

    let name = present(name).ok_or_else(|| InvalidInput::new("Treasure name is required."))?;

    Ok(NewTreasure {
        id: TreasureId::new(id),
        name: name.to_string(),
        coordinate,
    })
}

/// Builds a [`SearchQuery`] from raw query parameters. A present but empty
/// `prize_value` is validated (and rejected) rather than treated as absent.
pub fn validate_search_query(
    latitude: Option<&str>,
    longitude: Option<&str>,
    distance: Option<&str>,
    prize_value: Option<&str>,
) -> Result<SearchQuery, InvalidInput> {
    let origin = validate_coordinate(latitude, longitude)?;
    let radius = validate_radius_class(distance)?;
    let prize_floor = prize_value
        .map(|value| validate_prize_value(Some(value)))
        .transpose()?;

    Ok(SearchQuery {
        origin,
        radius,
        prize_floor,
    })
}
