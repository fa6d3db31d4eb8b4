// HD wallet payload model and JSON codec.
//
// SPDX-License-Identifier: Apache-2.0
//
// Written in 2020-2024 by
//     Dr Maxim Orlovsky <orlovsky@lnp-bp.org>
//
// Copyright (C) 2020-2024 LNP/BP Standards Association. All rights reserved.
// Copyright (C) 2020-2024 Dr Maxim Orlovsky. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Typed access to the dynamically-typed JSON tree.

use serde::de::IgnoredAny;
use serde_json::{Map, Value};

use crate::PayloadError;

/// Type of a JSON value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display)]
pub enum JsonType {
    #[display("null")]
    Null,
    #[display("a boolean")]
    Bool,
    #[display("a number")]
    Number,
    #[display("a string")]
    String,
    #[display("an array")]
    Array,
    #[display("an object")]
    Object,
}

impl JsonType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Bool,
            Value::Number(_) => JsonType::Number,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }
}

/// Checks whether the string is a single well-formed JSON value.
pub fn is_valid_json(s: &str) -> bool { serde_json::from_str::<IgnoredAny>(s).is_ok() }

fn mismatch(path: impl Into<String>, expected: JsonType, value: &Value) -> PayloadError {
    PayloadError::TypeMismatch {
        path: path.into(),
        expected,
        found: JsonType::of(value),
    }
}

pub(crate) fn expect_str<'v>(
    value: &'v Value,
    path: impl Into<String>,
) -> Result<&'v str, PayloadError> {
    value.as_str().ok_or_else(|| mismatch(path, JsonType::String, value))
}

pub(crate) fn expect_bool(value: &Value, path: impl Into<String>) -> Result<bool, PayloadError> {
    value.as_bool().ok_or_else(|| mismatch(path, JsonType::Bool, value))
}

pub(crate) fn expect_object<'v>(
    value: &'v Value,
    path: impl Into<String>,
) -> Result<&'v Map<String, Value>, PayloadError> {
    value.as_object().ok_or_else(|| mismatch(path, JsonType::Object, value))
}

pub(crate) fn expect_array<'v>(
    value: &'v Value,
    path: impl Into<String>,
) -> Result<&'v Vec<Value>, PayloadError> {
    value.as_array().ok_or_else(|| mismatch(path, JsonType::Array, value))
}

/// Reads an integer, truncating it to 32 bits the way a 64-bit signed read
/// followed by a narrowing cast does. Fractional numbers are truncated toward
/// zero. Strings holding a decimal number are accepted as well.
pub(crate) fn expect_i32(value: &Value, path: impl Into<String>) -> Result<i32, PayloadError> {
    let wide = match value {
        Value::Number(number) => match (number.as_i64(), number.as_u64(), number.as_f64()) {
            (Some(int), _, _) => Some(int),
            (None, Some(uint), _) => Some(uint as i64),
            (None, None, float) => float.map(|float| float as i64),
        },
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        _ => None,
    };
    wide.map(|wide| wide as i32)
        .ok_or_else(|| mismatch(path, JsonType::Number, value))
}

/// Optional typed members of a JSON object.
///
/// A missing key yields `Ok(None)`; a key holding a value of a different type,
/// `null` included, is a [`PayloadError::TypeMismatch`].
pub(crate) trait ObjectExt {
    fn opt_str(&self, key: &'static str) -> Result<Option<&str>, PayloadError>;
    fn opt_bool(&self, key: &'static str) -> Result<Option<bool>, PayloadError>;
    fn opt_object(&self, key: &'static str) -> Result<Option<&Map<String, Value>>, PayloadError>;
    fn opt_array(&self, key: &'static str) -> Result<Option<&Vec<Value>>, PayloadError>;
}

impl ObjectExt for Map<String, Value> {
    fn opt_str(&self, key: &'static str) -> Result<Option<&str>, PayloadError> {
        self.get(key).map(|v| expect_str(v, key)).transpose()
    }

    fn opt_bool(&self, key: &'static str) -> Result<Option<bool>, PayloadError> {
        self.get(key).map(|v| expect_bool(v, key)).transpose()
    }

    fn opt_object(&self, key: &'static str) -> Result<Option<&Map<String, Value>>, PayloadError> {
        self.get(key).map(|v| expect_object(v, key)).transpose()
    }

    fn opt_array(&self, key: &'static str) -> Result<Option<&Vec<Value>>, PayloadError> {
        self.get(key).map(|v| expect_array(v, key)).transpose()
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn validity() {
        assert!(is_valid_json(r#"{"guid":"g"}"#));
        assert!(is_valid_json("[1, 2, {\"a\": null}]"));
        assert!(is_valid_json("42"));
        assert!(!is_valid_json(r#"{"guid":"g""#));
        assert!(!is_valid_json("{} {}"));
        assert!(!is_valid_json(""));
        assert!(!is_valid_json("{'guid': 'g'}"));
    }

    #[test]
    fn integer_narrowing() {
        assert_eq!(expect_i32(&json!(7), "t").unwrap(), 7);
        assert_eq!(expect_i32(&json!(-7), "t").unwrap(), -7);
        assert_eq!(expect_i32(&json!(4.9), "t").unwrap(), 4);
        assert_eq!(expect_i32(&json!(4_294_967_297i64), "t").unwrap(), 1);
        assert_eq!(expect_i32(&json!(2_147_483_648i64), "t").unwrap(), i32::MIN);
        assert_eq!(expect_i32(&json!("7"), "t").unwrap(), 7);
        assert_eq!(expect_i32(&json!(" -3 "), "t").unwrap(), -3);
        assert_eq!(expect_i32(&json!("2.5"), "t").unwrap(), 2);
        assert!(matches!(
            expect_i32(&json!("seven"), "tx_tags.a[0]"),
            Err(PayloadError::TypeMismatch { expected: JsonType::Number, found: JsonType::String, .. })
        ));
        assert!(matches!(
            expect_i32(&json!(true), "tx_tags.a[0]"),
            Err(PayloadError::TypeMismatch { expected: JsonType::Number, found: JsonType::Bool, .. })
        ));
    }

    #[test]
    fn optional_members() {
        let value = json!({ "s": "x", "b": true, "o": {}, "a": [], "n": null });
        let obj = value.as_object().unwrap();
        assert_eq!(obj.opt_str("s").unwrap(), Some("x"));
        assert_eq!(obj.opt_bool("b").unwrap(), Some(true));
        assert!(obj.opt_object("o").unwrap().unwrap().is_empty());
        assert!(obj.opt_array("a").unwrap().unwrap().is_empty());
        assert_eq!(obj.opt_str("missing").unwrap(), None);
        assert!(obj.opt_bool("n").is_err());
        match obj.opt_array("o") {
            Err(PayloadError::TypeMismatch { path, expected, found }) => {
                assert_eq!(path, "o");
                assert_eq!(expected, JsonType::Array);
                assert_eq!(found, JsonType::Object);
            }
            _ => panic!("type mismatch expected"),
        }
    }

    #[test]
    fn type_names() {
        assert_eq!(JsonType::of(&json!(null)).to_string(), "null");
        assert_eq!(JsonType::of(&json!({})).to_string(), "an object");
    }
}
