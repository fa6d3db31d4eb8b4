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

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{Account, EntityError, Field, JsonEntity};

/// Hierarchical-deterministic wallet: a seed and the ordered list of accounts
/// derived from it.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(crate = "serde_crate")]
pub struct HdWallet {
    /// Hex-encoded BIP39 entropy, encrypted with the second password when
    /// double encryption is on.
    seed_hex: String,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    passphrase: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    mnemonic_verified: Field<bool>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    default_account_idx: Field<u32>,

    #[serde(default)]
    accounts: Vec<Account>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl JsonEntity for HdWallet {
    const NAME: &'static str = "hd wallet";

    fn validate(&self) -> Result<(), EntityError> {
        let mut xpubs = HashSet::with_capacity(self.accounts.len());
        for account in &self.accounts {
            account.validate()?;
            if !xpubs.insert(account.xpub()) {
                return Err(EntityError::DuplicateXpub(account.real_index()));
            }
        }
        Ok(())
    }

    fn from_json(value: &Value) -> Result<Self, EntityError> {
        let mut wallet = HdWallet::deserialize(value)
            .map_err(|err| EntityError::malformed(Self::NAME, err))?;
        wallet.reindex();
        wallet.validate()?;
        Ok(wallet)
    }
}

impl HdWallet {
    pub fn new(seed_hex: impl Into<String>) -> Self {
        HdWallet {
            seed_hex: seed_hex.into(),
            passphrase: Field::Absent,
            mnemonic_verified: Field::Absent,
            default_account_idx: Field::Absent,
            accounts: empty!(),
            extra: none!(),
        }
    }

    #[inline]
    pub fn seed_hex(&self) -> &str { &self.seed_hex }

    #[inline]
    pub fn passphrase(&self) -> &str { self.passphrase.as_deref().unwrap_or_default() }

    #[inline]
    pub fn is_mnemonic_verified(&self) -> bool { self.mnemonic_verified.copied().unwrap_or_default() }

    pub fn set_mnemonic_verified(&mut self, verified: bool) {
        self.mnemonic_verified.set(verified)
    }

    #[inline]
    pub fn default_account_idx(&self) -> u32 { self.default_account_idx.copied().unwrap_or_default() }

    pub fn set_default_account_idx(&mut self, index: u32) { self.default_account_idx.set(index) }

    #[inline]
    pub fn accounts(&self) -> &[Account] { &self.accounts }

    pub fn account(&self, index: u32) -> Option<&Account> { self.accounts.get(index as usize) }

    pub fn account_mut(&mut self, index: u32) -> Option<&mut Account> {
        self.accounts.get_mut(index as usize)
    }

    pub fn default_account(&self) -> Option<&Account> { self.account(self.default_account_idx()) }

    /// Appends an account to the wallet and returns the index assigned to it.
    pub fn add_account(&mut self, mut account: Account) -> Result<u32, EntityError> {
        let index = self.accounts.len() as u32;
        if self.accounts.iter().any(|a| a.xpub() == account.xpub()) {
            return Err(EntityError::DuplicateXpub(index));
        }
        account.set_real_index(index);
        account.validate()?;
        self.accounts.push(account);
        Ok(index)
    }

    fn reindex(&mut self) {
        for (index, account) in self.accounts.iter_mut().enumerate() {
            account.set_real_index(index as u32);
        }
    }
}
