//! Numeric coercion for identifiers.
//!
//! Clients send ids as JSON numbers or as strings (path and query values are
//! always strings). Both forms are accepted as long as they denote an integer.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

struct IdVisitor;

impl<'de> Visitor<'de> for IdVisitor {
    type Value = i32;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer identifier or a string holding one")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i32, E> {
        i32::try_from(v).map_err(|_| E::custom(format!("identifier {v} is out of range")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i32, E> {
        i32::try_from(v).map_err(|_| E::custom(format!("identifier {v} is out of range")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<i32, E> {
        if v.fract() == 0.0 && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) {
            Ok(v as i32)
        } else {
            Err(E::custom(format!("identifier {v} is not an integer")))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i32, E> {
        let trimmed = v.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return self.visit_i64(n);
        }
        match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() => self.visit_f64(f),
            _ => Err(E::custom(format!("{v:?} is not a number"))),
        }
    }
}

struct OptionalIdVisitor;

impl<'de> Visitor<'de> for OptionalIdVisitor {
    type Value = Option<i32>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an optional integer identifier")
    }

    fn visit_none<E: de::Error>(self) -> Result<Option<i32>, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Option<i32>, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Option<i32>, D::Error> {
        id(deserializer).map(Some)
    }
}

/// Deserialize a required identifier
pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    deserializer.deserialize_any(IdVisitor)
}

/// Deserialize an identifier that may be absent or `null`.
///
/// Pair with `#[serde(default)]` so a missing field also yields `None`.
pub fn optional_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    deserializer.deserialize_option(OptionalIdVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(deserialize_with = "id")]
        id: i32,
        #[serde(default, deserialize_with = "optional_id")]
        parent: Option<i32>,
    }

    fn parse(json: &str) -> Result<Body, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn numbers_and_numeric_strings_coerce() {
        assert_eq!(parse(r#"{"id": 4}"#).unwrap().id, 4);
        assert_eq!(parse(r#"{"id": "17"}"#).unwrap().id, 17);
        assert_eq!(parse(r#"{"id": " 8 "}"#).unwrap().id, 8);
        assert_eq!(parse(r#"{"id": 3.0}"#).unwrap().id, 3);
    }

    #[test]
    fn non_numeric_or_fractional_ids_fail() {
        assert!(parse(r#"{"id": "abc"}"#).is_err());
        assert!(parse(r#"{"id": 1.5}"#).is_err());
        assert!(parse(r#"{"id": true}"#).is_err());
        assert!(parse(r#"{"id": 99999999999}"#).is_err());
    }

    #[test]
    fn optional_id_accepts_missing_null_and_values() {
        assert_eq!(parse(r#"{"id": 1}"#).unwrap().parent, None);
        assert_eq!(parse(r#"{"id": 1, "parent": null}"#).unwrap().parent, None);
        assert_eq!(parse(r#"{"id": 1, "parent": "2"}"#).unwrap().parent, Some(2));
        assert!(parse(r#"{"id": 1, "parent": "x"}"#).is_err());
    }
}
