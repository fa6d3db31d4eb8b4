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

/// Address saved by the user together with a human-readable label.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(crate = "serde_crate")]
pub struct AddressBookEntry {
    addr: String,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    label: Field<String>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl JsonEntity for AddressBookEntry {
    const NAME: &'static str = "address book entry";

    fn validate(&self) -> Result<(), EntityError> {
        require_non_empty(Self::NAME, "addr", &self.addr)
    }
}

impl AddressBookEntry {
    pub fn new(addr: impl Into<String>, label: impl Into<String>) -> Self {
        AddressBookEntry {
            addr: addr.into(),
            label: Field::Present(label.into()),
            extra: none!(),
        }
    }

    #[inline]
    pub fn address(&self) -> &str { &self.addr }

    #[inline]
    pub fn label(&self) -> Option<&str> { self.label.as_deref() }

    pub fn set_label(&mut self, label: impl Into<String>) { self.label.set(label.into()) }
}
