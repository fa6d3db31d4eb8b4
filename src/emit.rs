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

use entities::{EntityError, JsonEntity};
use serde_json::{Map, Value};

use crate::payload::key;
use crate::{Payload, PayloadError, MAX_TAG_ID};

impl Payload {
    /// Emits the payload as a JSON object ready to be encrypted and uploaded.
    ///
    /// Options are always written under `options` and their iteration count is
    /// mirrored in the top-level `pbkdf2_iterations` field. Keys which were
    /// not recognized during parsing are not emitted.
    pub fn to_json(&self) -> Result<Value, PayloadError> {
        let iterations = self
            .options
            .iterations()
            .ok_or(PayloadError::EmitFailure(key::OPTIONS, EntityError::MissingIterations))?;

        let mut root = Map::new();
        root.insert(key::GUID.into(), self.guid.as_str().into());
        root.insert(key::SHARED_KEY.into(), self.shared_key.as_str().into());
        root.insert(key::PBKDF2_ITERATIONS.into(), iterations.get().into());

        if self.double_encrypted {
            let hash = self.second_password_hash.as_deref().unwrap_or_default();
            root.insert(key::DOUBLE_ENCRYPTION.into(), true.into());
            root.insert(key::DPASSWORD_HASH.into(), hash.into());
        }

        if self.upgraded {
            root.insert(key::HD_WALLETS.into(), emit_list(key::HD_WALLETS, &self.hd_wallets)?);
        }

        root.insert(key::KEYS.into(), emit_list(key::KEYS, &self.legacy_addresses)?);
        root.insert(key::OPTIONS.into(), emit_section(key::OPTIONS, &self.options)?);
        root.insert(key::ADDRESS_BOOK.into(), emit_list(key::ADDRESS_BOOK, &self.address_book)?);

        let notes = self
            .tx_notes
            .iter()
            .map(|(txid, note)| (txid.clone(), Value::from(note.as_str())))
            .collect::<Map<String, Value>>();
        root.insert(key::TX_NOTES.into(), notes.into());

        let tags = self
            .tx_tags
            .iter()
            .map(|(txid, ids)| {
                let ids = ids.iter().copied().map(Value::from).collect::<Value>();
                (txid.clone(), ids)
            })
            .collect::<Map<String, Value>>();
        root.insert(key::TX_TAGS.into(), tags.into());

        root.insert(key::TAG_NAMES.into(), tag_name_list(&self.tag_names)?.into());

        let mut paid_to = Map::new();
        for (id, record) in &self.paid_to {
            paid_to.insert(id.clone(), emit_section(key::PAID_TO, record)?);
        }
        root.insert(key::PAID_TO.into(), paid_to.into());

        debug!(
            "emitted wallet payload with {} HD wallet(s) and {} imported address(es)",
            if self.upgraded { self.hd_wallets.len() } else { 0 },
            self.legacy_addresses.len()
        );

        Ok(root.into())
    }

    pub fn to_json_string(&self) -> Result<String, PayloadError> { Ok(self.to_json()?.to_string()) }
}

fn emit_section<E: JsonEntity>(name: &'static str, entity: &E) -> Result<Value, PayloadError> {
    entity.to_json().map_err(|err| PayloadError::EmitFailure(name, err))
}

fn emit_list<E: JsonEntity>(name: &'static str, entities: &[E]) -> Result<Value, PayloadError> {
    entities
        .iter()
        .map(|entity| emit_section(name, entity))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

/// Tag names indexed by tag id; ids missing from the map become `null`.
fn tag_name_list(names: &BTreeMap<u32, String>) -> Result<Vec<Value>, PayloadError> {
    let len = match names.keys().next_back() {
        None => 0,
        Some(max) if *max > MAX_TAG_ID => return Err(PayloadError::TagIdOutOfRange(*max as usize)),
        Some(max) => *max as usize + 1,
    };
    let mut list = vec![Value::Null; len];
    for (id, name) in names {
        list[*id as usize] = name.as_str().into();
    }
    Ok(list)
}
