//! Parse-and-validate step between raw `data-*` strings and typed chart input.
//!
//! Every helper reports the anchor id and attribute name so a failed chart
//! can say exactly which markup is wrong instead of rendering NaN.

use serde::de::DeserializeOwned;

use crate::dom::Anchor;
use crate::error::{DashboardError, DashboardResult};

/// Parses a signed decimal integer, allowing surrounding whitespace.
pub fn parse_int(anchor: &str, attribute: &str, raw: &str) -> DashboardResult<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DashboardError::invalid_attribute(
            anchor,
            attribute,
            "value is empty",
        ));
    }
    trimmed.parse::<i64>().map_err(|err| {
        DashboardError::invalid_attribute(anchor, attribute, format!("`{trimmed}`: {err}"))
    })
}

/// Parses a non-negative count.
pub fn parse_count(anchor: &str, attribute: &str, raw: &str) -> DashboardResult<u32> {
    let value = parse_int(anchor, attribute, raw)?;
    u32::try_from(value).map_err(|_| {
        DashboardError::invalid_attribute(
            anchor,
            attribute,
            format!("count must be in 0..={}, got {value}", u32::MAX),
        )
    })
}

/// Parses a JSON array whose elements deserialize into `T`.
pub fn parse_json_array<T: DeserializeOwned>(
    anchor: &str,
    attribute: &str,
    raw: &str,
) -> DashboardResult<Vec<T>> {
    serde_json::from_str::<Vec<T>>(raw)
        .map_err(|err| DashboardError::invalid_attribute(anchor, attribute, err.to_string()))
}

/// Typed read access to one anchor's attributes.
pub struct AnchorAttributes<'a> {
    anchor: &'a dyn Anchor,
}

impl<'a> AnchorAttributes<'a> {
    #[must_use]
    pub fn new(anchor: &'a dyn Anchor) -> Self {
        Self { anchor }
    }

    pub fn required(&self, attribute: &str) -> DashboardResult<&'a str> {
        self.anchor
            .attribute(attribute)
            .ok_or_else(|| DashboardError::MissingAttribute {
                anchor: self.anchor.id().to_owned(),
                attribute: attribute.to_owned(),
            })
    }

    pub fn int(&self, attribute: &str) -> DashboardResult<i64> {
        parse_int(self.anchor.id(), attribute, self.required(attribute)?)
    }

    pub fn count(&self, attribute: &str) -> DashboardResult<u32> {
        parse_count(self.anchor.id(), attribute, self.required(attribute)?)
    }

    pub fn json_array<T: DeserializeOwned>(&self, attribute: &str) -> DashboardResult<Vec<T>> {
        parse_json_array(self.anchor.id(), attribute, self.required(attribute)?)
    }
}
