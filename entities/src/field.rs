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

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Optional member of a JSON object which distinguishes a missing key from a
/// key explicitly set to `null`, so that both forms are emitted back as they
/// were read.
///
/// Use with `#[serde(default, skip_serializing_if = "Field::is_absent")]`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Field<T> {
    /// The key is not present.
    Absent,
    /// The key is present with a `null` value.
    Null,
    /// The key is present with a value.
    Present(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self { Field::Absent }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Field::Present(value),
            None => Field::Absent,
        }
    }
}

impl<T> Field<T> {
    #[inline]
    pub fn is_absent(&self) -> bool { matches!(self, Field::Absent) }

    #[inline]
    pub fn is_null(&self) -> bool { matches!(self, Field::Null) }

    #[inline]
    pub fn get(&self) -> Option<&T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Absent | Field::Null => None,
        }
    }

    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Field::Present(value) => Some(value),
            Field::Absent | Field::Null => None,
        }
    }

    pub fn set(&mut self, value: T) { *self = Field::Present(value) }

    /// Returns the value, storing the result of `f` first if there is none.
    pub fn get_or_insert_with(&mut self, f: impl FnOnce() -> T) -> &mut T {
        if !matches!(self, Field::Present(_)) {
            *self = Field::Present(f());
        }
        match self {
            Field::Present(value) => value,
            Field::Absent | Field::Null => unreachable!("value was stored above"),
        }
    }
}

impl<T: Copy> Field<T> {
    #[inline]
    pub fn copied(&self) -> Option<T> { self.get().copied() }
}

impl<T: std::ops::Deref> Field<T> {
    #[inline]
    pub fn as_deref(&self) -> Option<&T::Target> { self.get().map(T::deref) }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Present(value) => value.serialize(serializer),
            Field::Absent | Field::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Field::Present(value),
            None => Field::Null,
        })
    }
}

#[cfg(test)]
mod test {
    use serde_json::{json, Value};

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(crate = "serde_crate")]
    struct Holder {
        #[serde(default, skip_serializing_if = "Field::is_absent")]
        name: Field<String>,
    }

    fn reemit(value: Value) -> Value {
        let holder = Holder::deserialize(&value).unwrap();
        serde_json::to_value(holder).unwrap()
    }

    #[test]
    fn three_states() {
        assert!(Holder::deserialize(&json!({})).unwrap().name.is_absent());
        assert!(Holder::deserialize(&json!({ "name": null })).unwrap().name.is_null());
        assert_eq!(Holder::deserialize(&json!({ "name": "x" })).unwrap().name.as_deref(), Some("x"));
    }

    #[test]
    fn emitted_as_read() {
        for value in [json!({}), json!({ "name": null }), json!({ "name": "x" })] {
            assert_eq!(reemit(value.clone()), value);
        }
    }

    #[test]
    fn insert_replaces_null() {
        let mut field = Field::<Vec<u8>>::Null;
        field.get_or_insert_with(Vec::new).push(1);
        assert_eq!(field, Field::Present(vec![1]));
        assert_eq!(Field::from(None::<u8>), Field::Absent);
    }
}
