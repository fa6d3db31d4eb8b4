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

use serde_json::{Map, Value};

use crate::codec::require_non_empty;
use crate::{EntityError, Field, JsonEntity};

/// Tag of an address in active use.
pub const NORMAL_ADDRESS: i64 = 0;
/// Tag of an address hidden from the active address list by the user.
pub const ARCHIVED_ADDRESS: i64 = 2;

/// Imported, non-derived address.
///
/// An address without a private key is watch-only.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(crate = "serde_crate")]
pub struct LegacyAddress {
    addr: String,

    /// Private key, encrypted with the second password when double encryption is on.
    #[serde(rename = "priv", default, skip_serializing_if = "Field::is_absent")]
    private_key: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    label: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    tag: Field<i64>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    created_time: Field<u64>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    created_device_name: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    created_device_version: Field<String>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl JsonEntity for LegacyAddress {
    const NAME: &'static str = "legacy address";

    fn validate(&self) -> Result<(), EntityError> {
        require_non_empty(Self::NAME, "addr", &self.addr)
    }
}

impl LegacyAddress {
    pub fn new(addr: impl Into<String>, private_key: impl Into<String>) -> Self {
        LegacyAddress {
            private_key: Field::Present(private_key.into()),
            ..Self::watch_only(addr)
        }
    }

    pub fn watch_only(addr: impl Into<String>) -> Self {
        LegacyAddress {
            addr: addr.into(),
            private_key: Field::Absent,
            label: Field::Absent,
            tag: Field::Absent,
            created_time: Field::Absent,
            created_device_name: Field::Absent,
            created_device_version: Field::Absent,
            extra: none!(),
        }
    }

    #[inline]
    pub fn address(&self) -> &str { &self.addr }

    #[inline]
    pub fn private_key(&self) -> Option<&str> { self.private_key.as_deref() }

    pub fn set_private_key(&mut self, private_key: Option<String>) {
        self.private_key = private_key.into()
    }

    #[inline]
    pub fn is_watch_only(&self) -> bool {
        self.private_key.as_deref().map(str::is_empty).unwrap_or(true)
    }

    #[inline]
    pub fn label(&self) -> Option<&str> { self.label.as_deref() }

    pub fn set_label(&mut self, label: impl Into<String>) { self.label.set(label.into()) }

    #[inline]
    pub fn tag(&self) -> i64 { self.tag.copied().unwrap_or(NORMAL_ADDRESS) }

    pub fn set_tag(&mut self, tag: i64) { self.tag.set(tag) }

    #[inline]
    pub fn is_archived(&self) -> bool { self.tag() == ARCHIVED_ADDRESS }

    #[inline]
    pub fn created_time(&self) -> Option<u64> { self.created_time.copied() }

    pub fn set_created(&mut self, time: u64, device_name: String, device_version: String) {
        self.created_time.set(time);
        self.created_device_name.set(device_name);
        self.created_device_version.set(device_version);
    }

    #[inline]
    pub fn created_device_name(&self) -> Option<&str> { self.created_device_name.as_deref() }

    #[inline]
    pub fn created_device_version(&self) -> Option<&str> { self.created_device_version.as_deref() }
}
