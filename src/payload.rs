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
use std::fmt::{self, Debug, Formatter};
use std::num::NonZeroU32;

use entities::{AddressBookEntry, HdWallet, LegacyAddress, Options, PaidTo, NORMAL_ADDRESS};

use crate::AccountIndex;

/// Top-level keys of the payload JSON document.
/// Largest tag id which can be written to the `tag_names` list.
pub const MAX_TAG_ID: u32 = 0xF_FFFF;

pub(crate) mod key {
    pub const GUID: &str = "guid";
    pub const SHARED_KEY: &str = "sharedKey";
    pub const DOUBLE_ENCRYPTION: &str = "double_encryption";
    pub const DPASSWORD_HASH: &str = "dpasswordhash";
    pub const PBKDF2_ITERATIONS: &str = "pbkdf2_iterations";
    pub const OPTIONS: &str = "options";
    pub const WALLET_OPTIONS: &str = "wallet_options";
    pub const TX_NOTES: &str = "tx_notes";
    pub const TX_TAGS: &str = "tx_tags";
    pub const TAG_NAMES: &str = "tag_names";
    pub const PAID_TO: &str = "paidTo";
    pub const HD_WALLETS: &str = "hd_wallets";
    pub const KEYS: &str = "keys";
    pub const ADDRESS_BOOK: &str = "address_book";
}

/// Decrypted wallet payload.
///
/// Constructed either empty with [`Payload::new`] or by parsing a JSON
/// document (see [`Payload::parse`]); emitted back to JSON with
/// [`Payload::to_json`].
///
/// Collection accessors return snapshots, except for the `*_mut` methods which
/// give live access to the underlying collections.
#[derive(Clone, Eq, PartialEq)]
pub struct Payload {
    pub(crate) guid: String,
    pub(crate) shared_key: String,
    pub(crate) second_password_hash: Option<String>,
    pub(crate) double_encrypted: bool,
    pub(crate) upgraded: bool,
    pub(crate) decrypted_payload: Option<String>,
    pub(crate) options: Options,
    pub(crate) legacy_addresses: Vec<LegacyAddress>,
    pub(crate) address_book: Vec<AddressBookEntry>,
    pub(crate) hd_wallets: Vec<HdWallet>,
    pub(crate) tx_notes: BTreeMap<String, String>,
    pub(crate) tx_tags: BTreeMap<String, Vec<i32>>,
    pub(crate) tag_names: BTreeMap<u32, String>,
    pub(crate) paid_to: BTreeMap<String, PaidTo>,
    pub(crate) account_index: AccountIndex,
}

impl Debug for Payload {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        const REDACTED: &str = "<redacted>";
        f.debug_struct("Payload")
            .field("guid", &REDACTED)
            .field("shared_key", &REDACTED)
            .field("second_password_hash", &self.second_password_hash.as_ref().map(|_| REDACTED))
            .field("double_encrypted", &self.double_encrypted)
            .field("upgraded", &self.upgraded)
            .field("decrypted_payload", &self.decrypted_payload.as_ref().map(|_| REDACTED))
            .field("options", &self.options)
            .field("legacy_addresses", &self.legacy_addresses.len())
            .field("address_book", &self.address_book.len())
            .field("hd_wallets", &self.hd_wallets.len())
            .field("tx_notes", &self.tx_notes.len())
            .field("tx_tags", &self.tx_tags.len())
            .field("tag_names", &self.tag_names)
            .field("paid_to", &self.paid_to.len())
            .field("account_index", &self.account_index.len())
            .finish()
    }
}

impl Payload {
    /// Constructs an empty payload whose options use `iterations` PBKDF2 rounds.
    pub fn new(iterations: NonZeroU32) -> Self {
        Payload {
            guid: empty!(),
            shared_key: empty!(),
            second_password_hash: None,
            double_encrypted: false,
            upgraded: false,
            decrypted_payload: None,
            options: Options::with_iterations(iterations),
            legacy_addresses: empty!(),
            address_book: empty!(),
            hd_wallets: empty!(),
            tx_notes: empty!(),
            tx_tags: empty!(),
            tag_names: empty!(),
            paid_to: empty!(),
            account_index: none!(),
        }
    }

    #[inline]
    pub fn guid(&self) -> &str { &self.guid }

    pub fn set_guid(&mut self, guid: impl Into<String>) { self.guid = guid.into() }

    #[inline]
    pub fn shared_key(&self) -> &str { &self.shared_key }

    pub fn set_shared_key(&mut self, shared_key: impl Into<String>) {
        self.shared_key = shared_key.into()
    }

    #[inline]
    pub fn is_double_encrypted(&self) -> bool { self.double_encrypted }

    pub fn set_double_encrypted(&mut self, double_encrypted: bool) {
        self.double_encrypted = double_encrypted
    }

    /// Hash of the second password; present only on parsed payloads or after
    /// being set explicitly.
    #[inline]
    pub fn second_password_hash(&self) -> Option<&str> { self.second_password_hash.as_deref() }

    pub fn set_second_password_hash(&mut self, hash: Option<String>) {
        self.second_password_hash = hash
    }

    #[inline]
    pub fn is_upgraded(&self) -> bool { self.upgraded }

    /// Marks the payload as upgraded to an HD wallet. The flag may temporarily
    /// disagree with the wallet list while outer code mutates the payload.
    pub fn set_upgraded(&mut self, upgraded: bool) { self.upgraded = upgraded }

    /// Source text the payload was parsed from.
    #[inline]
    pub fn decrypted_payload(&self) -> Option<&str> { self.decrypted_payload.as_deref() }

    pub fn set_decrypted_payload(&mut self, text: Option<String>) { self.decrypted_payload = text }

    #[inline]
    pub fn options(&self) -> &Options { &self.options }

    #[inline]
    pub fn options_mut(&mut self) -> &mut Options { &mut self.options }

    pub fn set_options(&mut self, options: Options) { self.options = options }

    /// PBKDF2 iteration count applied to the second password.
    #[inline]
    pub fn iterations(&self) -> Option<NonZeroU32> { self.options.iterations() }

    pub fn set_iterations(&mut self, iterations: NonZeroU32) {
        self.options.set_iterations(iterations)
    }

    #[inline]
    pub fn hd_wallets(&self) -> &[HdWallet] { &self.hd_wallets }

    /// Live access to the HD wallet list. Changing accounts through it leaves
    /// the account index stale until [`Payload::reindex_accounts`] is called.
    #[inline]
    pub fn hd_wallets_mut(&mut self) -> &mut Vec<HdWallet> { &mut self.hd_wallets }

    /// First (and normally the only) HD wallet.
    #[inline]
    pub fn hd_wallet(&self) -> Option<&HdWallet> { self.hd_wallets.first() }

    /// Replaces all HD wallets with `wallet`, marks the payload upgraded and
    /// rebuilds the account index.
    pub fn set_hd_wallet(&mut self, wallet: HdWallet) {
        self.hd_wallets = vec![wallet];
        self.upgraded = true;
        self.reindex_accounts();
    }

    #[inline]
    pub fn account_index(&self) -> &AccountIndex { &self.account_index }

    pub fn reindex_accounts(&mut self) {
        self.account_index = AccountIndex::with_wallets(&self.hd_wallets);
    }

    #[inline]
    pub fn account_for_xpub(&self, xpub: &str) -> Option<u32> { self.account_index.index_of(xpub) }

    #[inline]
    pub fn xpub_for_account(&self, index: u32) -> Option<&str> { self.account_index.xpub_at(index) }

    #[inline]
    pub fn legacy_addresses(&self) -> &[LegacyAddress] { &self.legacy_addresses }

    /// Live access to imported addresses; the caller keeps addresses unique.
    #[inline]
    pub fn legacy_addresses_mut(&mut self) -> &mut Vec<LegacyAddress> { &mut self.legacy_addresses }

    /// Adds an imported address unless an entry with the same address string
    /// is already present. Returns whether the address was added.
    pub fn add_legacy_address(&mut self, address: LegacyAddress) -> bool {
        if self.contains_legacy_address(address.address()) {
            return false;
        }
        self.legacy_addresses.push(address);
        true
    }

    pub fn remove_legacy_address(&mut self, address: &str) -> Option<LegacyAddress> {
        let pos = self.legacy_addresses.iter().position(|a| a.address() == address)?;
        Some(self.legacy_addresses.remove(pos))
    }

    /// Imported addresses matching `predicate`, in list order.
    pub fn legacy_addresses_where(
        &self,
        predicate: impl Fn(&LegacyAddress) -> bool,
    ) -> impl Iterator<Item = &LegacyAddress> {
        self.legacy_addresses.iter().filter(move |a| predicate(*a))
    }

    pub fn legacy_addresses_by_tag(&self, tag: i64) -> Vec<LegacyAddress> {
        self.legacy_addresses_where(|a| a.tag() == tag).cloned().collect()
    }

    /// Addresses with normal tag which are not watch-only.
    pub fn active_legacy_addresses(&self) -> Vec<LegacyAddress> {
        self.legacy_addresses_where(|a| a.tag() == NORMAL_ADDRESS && !a.is_watch_only())
            .cloned()
            .collect()
    }

    pub fn legacy_address_strings(&self) -> Vec<String> { self.address_strings(|_| true) }

    pub fn legacy_address_strings_by_tag(&self, tag: i64) -> Vec<String> {
        self.address_strings(|a| a.tag() == tag)
    }

    pub fn watch_only_address_strings(&self) -> Vec<String> {
        self.address_strings(LegacyAddress::is_watch_only)
    }

    /// Addresses with normal tag, watch-only addresses included.
    pub fn active_legacy_address_strings(&self) -> Vec<String> {
        self.address_strings(|a| a.tag() == NORMAL_ADDRESS)
    }

    pub fn contains_legacy_address(&self, address: &str) -> bool {
        self.legacy_addresses.iter().any(|a| a.address() == address)
    }

    fn address_strings(&self, predicate: impl Fn(&LegacyAddress) -> bool) -> Vec<String> {
        self.legacy_addresses_where(predicate).map(|a| a.address().to_owned()).collect()
    }

    #[inline]
    pub fn address_book(&self) -> &[AddressBookEntry] { &self.address_book }

    #[inline]
    pub fn address_book_mut(&mut self) -> &mut Vec<AddressBookEntry> { &mut self.address_book }

    #[inline]
    pub fn tx_notes(&self) -> &BTreeMap<String, String> { &self.tx_notes }

    #[inline]
    pub fn tx_notes_mut(&mut self) -> &mut BTreeMap<String, String> { &mut self.tx_notes }

    #[inline]
    pub fn tx_tags(&self) -> &BTreeMap<String, Vec<i32>> { &self.tx_tags }

    #[inline]
    pub fn tx_tags_mut(&mut self) -> &mut BTreeMap<String, Vec<i32>> { &mut self.tx_tags }

    #[inline]
    pub fn tag_names(&self) -> &BTreeMap<u32, String> { &self.tag_names }

    /// Tag names are written as a list indexed by tag id, so ids are expected
    /// to be dense and may not exceed [`MAX_TAG_ID`].
    #[inline]
    pub fn tag_names_mut(&mut self) -> &mut BTreeMap<u32, String> { &mut self.tag_names }

    #[inline]
    pub fn paid_to(&self) -> &BTreeMap<String, PaidTo> { &self.paid_to }

    #[inline]
    pub fn paid_to_mut(&mut self) -> &mut BTreeMap<String, PaidTo> { &mut self.paid_to }
}
