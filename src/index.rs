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

use std::collections::BTreeMap;

use entities::HdWallet;
use indexmap::IndexMap;

/// Two-way map between account extended public keys and account indexes.
///
/// The index is a cache over the accounts of HD wallets: it is built when a
/// payload is parsed and has to be rebuilt by the payload owner after accounts
/// change. Both directions are kept mutually inverse.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct AccountIndex {
    by_xpub: IndexMap<String, u32>,
    by_index: BTreeMap<u32, String>,
}

impl AccountIndex {
    pub fn new() -> Self { none!() }

    pub fn with_wallets<'w>(wallets: impl IntoIterator<Item = &'w HdWallet>) -> Self {
        let mut index = AccountIndex::new();
        for wallet in wallets {
            for account in wallet.accounts() {
                index.insert(account.xpub(), account.real_index());
            }
        }
        index
    }

    /// Links `xpub` with account `index`, dropping links either of them had
    /// before.
    pub fn insert(&mut self, xpub: impl Into<String>, index: u32) {
        let xpub = xpub.into();
        if let Some(prev_index) = self.by_xpub.shift_remove(&xpub) {
            self.by_index.remove(&prev_index);
        }
        if let Some(prev_xpub) = self.by_index.remove(&index) {
            self.by_xpub.shift_remove(&prev_xpub);
        }
        self.by_xpub.insert(xpub.clone(), index);
        self.by_index.insert(index, xpub);
    }

    #[inline]
    pub fn index_of(&self, xpub: &str) -> Option<u32> { self.by_xpub.get(xpub).copied() }

    #[inline]
    pub fn xpub_at(&self, index: u32) -> Option<&str> {
        self.by_index.get(&index).map(String::as_str)
    }

    /// Account indexes keyed by xpub, in account order.
    #[inline]
    pub fn xpub_to_index(&self) -> &IndexMap<String, u32> { &self.by_xpub }

    #[inline]
    pub fn index_to_xpub(&self) -> &BTreeMap<u32, String> { &self.by_index }

    #[inline]
    pub fn len(&self) -> usize { self.by_xpub.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.by_xpub.is_empty() }

    pub fn clear(&mut self) {
        self.by_xpub.clear();
        self.by_index.clear();
    }
}
