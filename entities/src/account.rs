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

/// User label attached to a receive address of an account.
#[derive(Getters, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(crate = "serde_crate")]
pub struct AddressLabel {
    #[getter(as_copy)]
    index: u32,
    label: String,
}

impl AddressLabel {
    pub fn new(index: u32, label: impl Into<String>) -> Self {
        AddressLabel {
            index,
            label: label.into(),
        }
    }
}

/// Extended public keys of the receive and change chains of an account.
#[derive(Getters, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(crate = "serde_crate", rename_all = "camelCase")]
pub struct AccountCache {
    receive_account: String,
    change_account: String,
}

impl AccountCache {
    pub fn new(receive_account: impl Into<String>, change_account: impl Into<String>) -> Self {
        AccountCache {
            receive_account: receive_account.into(),
            change_account: change_account.into(),
        }
    }
}

/// Account of an HD wallet.
///
/// The account index ([`Account::real_index`]) is not a part of the JSON
/// object: it is the position of the account inside its wallet and is assigned
/// by [`crate::HdWallet`].
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(crate = "serde_crate")]
pub struct Account {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    label: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    archived: Field<bool>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    xpriv: Field<String>,

    xpub: String,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    address_labels: Field<Vec<AddressLabel>>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    cache: Field<AccountCache>,

    #[serde(skip)]
    real_index: u32,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl JsonEntity for Account {
    const NAME: &'static str = "account";

    fn validate(&self) -> Result<(), EntityError> {
        require_non_empty(Self::NAME, "xpub", &self.xpub)
    }
}

impl Account {
    pub fn new(label: impl Into<String>, xpub: impl Into<String>, xpriv: Option<String>) -> Self {
        Account {
            label: Field::Present(label.into()),
            archived: Field::Absent,
            xpriv: xpriv.into(),
            xpub: xpub.into(),
            address_labels: Field::Absent,
            cache: Field::Absent,
            real_index: 0,
            extra: none!(),
        }
    }

    #[inline]
    pub fn xpub(&self) -> &str { &self.xpub }

    #[inline]
    pub fn xpriv(&self) -> Option<&str> { self.xpriv.as_deref() }

    /// Index of the account inside its wallet.
    #[inline]
    pub fn real_index(&self) -> u32 { self.real_index }

    pub(crate) fn set_real_index(&mut self, index: u32) { self.real_index = index }

    #[inline]
    pub fn label(&self) -> Option<&str> { self.label.as_deref() }

    pub fn set_label(&mut self, label: impl Into<String>) { self.label.set(label.into()) }

    #[inline]
    pub fn is_archived(&self) -> bool { self.archived.copied().unwrap_or_default() }

    pub fn set_archived(&mut self, archived: bool) { self.archived.set(archived) }

    pub fn address_labels(&self) -> &[AddressLabel] {
        self.address_labels.as_deref().unwrap_or_default()
    }

    /// Labels the receive address with the given index, replacing the previous label if any.
    pub fn set_address_label(&mut self, index: u32, label: impl Into<String>) {
        let labels = self.address_labels.get_or_insert_with(Vec::new);
        let label = AddressLabel::new(index, label);
        match labels.iter_mut().find(|l| l.index == index) {
            Some(existing) => *existing = label,
            None => labels.push(label),
        }
    }

    #[inline]
    pub fn cache(&self) -> Option<&AccountCache> { self.cache.get() }

    pub fn set_cache(&mut self, cache: AccountCache) { self.cache.set(cache) }
}
