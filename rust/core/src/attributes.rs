// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute bags and typed field access.
//!
//! Survey exports encode every field as an attribute string. The accessors
//! here do the type coercion (string → float, comma lists → vectors) and
//! report failures as [`FieldError`] so the record builder can turn them into
//! diagnostics at the parse boundary.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::records::Coord;

/// Why a single attribute could not be read.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("attribute {0} is missing")]
    Missing(String),

    #[error("attribute {attribute} has malformed value {value:?}")]
    Malformed { attribute: String, value: String },
}

impl FieldError {
    /// Name of the attribute that failed.
    pub fn attribute(&self) -> &str {
        match self {
            FieldError::Missing(attribute) => attribute,
            FieldError::Malformed { attribute, .. } => attribute,
        }
    }

    fn malformed(attribute: &str, value: &str) -> Self {
        FieldError::Malformed {
            attribute: attribute.to_string(),
            value: value.to_string(),
        }
    }
}

/// The attributes of one element, keyed by attribute name.
/// Repeated attributes keep the last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeBag {
    values: FxHashMap<String, String>,
}

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Required string attribute.
    pub fn text(&self, key: &str) -> Result<&str, FieldError> {
        self.get(key).ok_or_else(|| FieldError::Missing(key.to_string()))
    }

    /// Descriptive string attribute; absent means empty.
    pub fn text_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Required finite float.
    pub fn float(&self, key: &str) -> Result<f64, FieldError> {
        let raw = self.text(key)?;
        parse_finite(raw).ok_or_else(|| FieldError::malformed(key, raw))
    }

    /// Required comma-separated list of finite floats (at least one).
    pub fn float_list(&self, key: &str) -> Result<Coord, FieldError> {
        let raw = self.text(key)?;
        raw.split(',')
            .map(parse_finite)
            .collect::<Option<SmallVec<_>>>()
            .ok_or_else(|| FieldError::malformed(key, raw))
    }

    /// Required comma-separated identifier list. Items are trimmed and empty
    /// items dropped, so an empty attribute yields an empty list.
    pub fn id_list(&self, key: &str) -> Result<Vec<String>, FieldError> {
        Ok(split_ids(self.text(key)?))
    }
}

impl FromIterator<(String, String)> for AttributeBag {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Parses one trimmed float, rejecting NaN and infinities so that exact
/// coordinate equality stays reflexive.
fn parse_finite(raw: &str) -> Option<f64> {
    fast_float::parse::<f64, _>(raw.trim())
        .ok()
        .filter(|v| v.is_finite())
}

fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(pairs: &[(&str, &str)]) -> AttributeBag {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_float_coercion() {
        let attrs = bag(&[("LENGTH", " 12.5 "), ("BAD", "twelve"), ("NAN", "nan")]);
        assert_eq!(attrs.float("LENGTH"), Ok(12.5));
        assert_eq!(
            attrs.float("BAD"),
            Err(FieldError::Malformed {
                attribute: "BAD".to_string(),
                value: "twelve".to_string()
            })
        );
        assert!(attrs.float("NAN").is_err());
        assert_eq!(attrs.float("SIZE"), Err(FieldError::Missing("SIZE".to_string())));
    }

    #[test]
    fn test_float_list() {
        let attrs = bag(&[
            ("DATA", "1.5,-2,3e2"),
            ("FLAT", "4,5"),
            ("GAP", "1,,2"),
            ("EMPTY", ""),
        ]);
        assert_eq!(attrs.float_list("DATA").unwrap().as_slice(), &[1.5, -2.0, 300.0]);
        assert_eq!(attrs.float_list("FLAT").unwrap().len(), 2);
        assert!(attrs.float_list("GAP").is_err());
        assert!(attrs.float_list("EMPTY").is_err());
    }

    #[test]
    fn test_id_list() {
        let attrs = bag(&[("PATH", "L1, L2 ,,L3"), ("NONE", "")]);
        assert_eq!(attrs.id_list("PATH").unwrap(), ["L1", "L2", "L3"]);
        assert!(attrs.id_list("NONE").unwrap().is_empty());
        assert_eq!(attrs.id_list("MISSING").unwrap_err().attribute(), "MISSING");
    }

    #[test]
    fn test_text_or_empty() {
        let attrs = bag(&[("TYPE", "RIDGE")]);
        assert_eq!(attrs.text_or_empty("TYPE"), "RIDGE");
        assert_eq!(attrs.text_or_empty("STOREY"), "");
    }
}
