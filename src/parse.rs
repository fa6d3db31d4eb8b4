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

use std::collections::{BTreeMap, HashSet};
use std::num::NonZeroU32;

use entities::{AddressBookEntry, HdWallet, JsonEntity, LegacyAddress, Options, PaidTo};
use serde_json::{Map, Value};

use crate::json::{expect_array, expect_i32, expect_object, expect_str, ObjectExt};
use crate::payload::key;
use crate::{AccountIndex, Payload, PayloadConfig, PayloadError, MAX_TAG_ID};

type Object = Map<String, Value>;

impl Payload {
    /// Parses payload text, keeping it in [`Payload::decrypted_payload`].
    pub fn from_json_str(text: &str, default_iterations: NonZeroU32) -> Result<Self, PayloadError> {
        let root = serde_json::from_str::<Value>(text)?;
        let mut payload = Payload::parse(&root, default_iterations)?;
        payload.decrypted_payload = Some(text.to_owned());
        Ok(payload)
    }

    pub fn with_config(text: &str, config: &PayloadConfig) -> Result<Self, PayloadError> {
        Payload::from_json_str(text, config.default_iterations)
    }

    /// Parses payload from a JSON object.
    ///
    /// Sections are looked up by key; unknown keys are ignored. If the wallet
    /// options do not specify a PBKDF2 iteration count, `default_iterations`
    /// is used. The first error aborts parsing.
    pub fn parse(root: &Value, default_iterations: NonZeroU32) -> Result<Self, PayloadError> {
        let root = expect_object(root, "$")?;

        let guid = required_str(root, key::GUID, PayloadError::MissingField(key::GUID))?;
        let shared_key = required_str(root, key::SHARED_KEY, PayloadError::MissingSharedKey)?;
        let double_encrypted = root.opt_bool(key::DOUBLE_ENCRYPTION)?.unwrap_or_default();
        let second_password_hash = root.opt_str(key::DPASSWORD_HASH)?.unwrap_or_default();

        let options = parse_options(root, default_iterations)?;
        let tx_notes = parse_tx_notes(root)?;
        let tx_tags = parse_tx_tags(root)?;
        let tag_names = parse_tag_names(root)?;
        let paid_to = parse_paid_to(root)?;
        let hd_wallets = parse_hd_wallets(root)?;
        let account_index = AccountIndex::with_wallets(&hd_wallets);
        let legacy_addresses = parse_legacy_addresses(root)?;
        let address_book = parse_list::<AddressBookEntry>(root, key::ADDRESS_BOOK)?;

        debug!(
            "parsed wallet payload with {} HD wallet(s), {} account(s), {} imported address(es), \
             {} address book entries",
            hd_wallets.len(),
            account_index.len(),
            legacy_addresses.len(),
            address_book.len()
        );

        Ok(Payload {
            guid: guid.to_owned(),
            shared_key: shared_key.to_owned(),
            second_password_hash: Some(second_password_hash.to_owned()),
            double_encrypted,
            upgraded: !hd_wallets.is_empty(),
            decrypted_payload: None,
            options,
            legacy_addresses,
            address_book,
            hd_wallets,
            tx_notes,
            tx_tags,
            tag_names,
            paid_to,
            account_index,
        })
    }
}

fn section<E: JsonEntity>(name: &'static str, value: &Value) -> Result<E, PayloadError> {
    E::from_json(value).map_err(|err| PayloadError::MalformedSection(name, err))
}

fn required_str<'v>(
    root: &'v Object,
    name: &'static str,
    missing: PayloadError,
) -> Result<&'v str, PayloadError> {
    match root.get(name) {
        None => Err(missing),
        Some(value) => match expect_str(value, name)? {
            "" => Err(missing),
            s => Ok(s),
        },
    }
}

fn parse_options(root: &Object, default_iterations: NonZeroU32) -> Result<Options, PayloadError> {
    // older wallets store options under a different key
    let source = [key::OPTIONS, key::WALLET_OPTIONS]
        .into_iter()
        .find_map(|name| root.get(name).map(|value| (name, value)));
    let mut options = match source {
        Some((name, value)) => {
            expect_object(value, name)?;
            section::<Options>(name, value)?
        }
        None => Options::default(),
    };
    if options.ensure_iterations(default_iterations) {
        debug!("wallet options carry no PBKDF2 iteration count; using {default_iterations}");
    }
    Ok(options)
}

fn parse_tx_notes(root: &Object) -> Result<BTreeMap<String, String>, PayloadError> {
    let Some(notes) = root.opt_object(key::TX_NOTES)? else {
        return Ok(empty!());
    };
    let mut tx_notes = BTreeMap::new();
    for (txid, note) in notes {
        let note = expect_str(note, format!("{}.{txid}", key::TX_NOTES))?;
        tx_notes.insert(txid.clone(), note.to_owned());
    }
    Ok(tx_notes)
}

fn parse_tx_tags(root: &Object) -> Result<BTreeMap<String, Vec<i32>>, PayloadError> {
    let Some(tags) = root.opt_object(key::TX_TAGS)? else {
        return Ok(empty!());
    };
    let mut tx_tags = BTreeMap::new();
    for (txid, list) in tags {
        let list = expect_array(list, format!("{}.{txid}", key::TX_TAGS))?;
        let ids = list
            .iter()
            .enumerate()
            .map(|(pos, id)| expect_i32(id, format!("{}.{txid}[{pos}]", key::TX_TAGS)))
            .collect::<Result<Vec<_>, _>>()?;
        tx_tags.insert(txid.clone(), ids);
    }
    Ok(tx_tags)
}

fn parse_tag_names(root: &Object) -> Result<BTreeMap<u32, String>, PayloadError> {
    let Some(names) = root.opt_array(key::TAG_NAMES)? else {
        return Ok(empty!());
    };
    let mut tag_names = BTreeMap::new();
    for (pos, name) in names.iter().enumerate() {
        // holes left by emitting a sparse tag list
        if name.is_null() {
            continue;
        }
        let name = expect_str(name, format!("{}[{pos}]", key::TAG_NAMES))?;
        let id = u32::try_from(pos)
            .ok()
            .filter(|id| *id <= MAX_TAG_ID)
            .ok_or(PayloadError::TagIdOutOfRange(pos))?;
        tag_names.insert(id, name.to_owned());
    }
    Ok(tag_names)
}

fn parse_paid_to(root: &Object) -> Result<BTreeMap<String, PaidTo>, PayloadError> {
    let Some(paid_to) = root.opt_object(key::PAID_TO)? else {
        return Ok(empty!());
    };
    let mut records = BTreeMap::new();
    for (id, value) in paid_to {
        records.insert(id.clone(), section::<PaidTo>(key::PAID_TO, value)?);
    }
    Ok(records)
}

fn parse_hd_wallets(root: &Object) -> Result<Vec<HdWallet>, PayloadError> {
    let Some(wallets) = root.opt_array(key::HD_WALLETS)? else {
        return Ok(empty!());
    };
    let Some(first) = wallets.first() else {
        return Ok(empty!());
    };
    if wallets.len() > 1 {
        warn!("payload lists {} HD wallets; all but the first one are ignored", wallets.len());
    }
    Ok(vec![section(key::HD_WALLETS, first)?])
}

fn parse_legacy_addresses(root: &Object) -> Result<Vec<LegacyAddress>, PayloadError> {
    let Some(keys) = root.opt_array(key::KEYS)? else {
        return Ok(empty!());
    };
    let mut seen = HashSet::with_capacity(keys.len());
    let mut addresses = Vec::with_capacity(keys.len());
    for value in keys {
        let address = section::<LegacyAddress>(key::KEYS, value)?;
        if seen.insert(address.address().to_owned()) {
            addresses.push(address);
        }
    }
    if addresses.len() < keys.len() {
        debug!("skipped {} duplicated imported address(es)", keys.len() - addresses.len());
    }
    Ok(addresses)
}

fn parse_list<E: JsonEntity>(root: &Object, name: &'static str) -> Result<Vec<E>, PayloadError> {
    let Some(list) = root.opt_array(name)? else {
        return Ok(empty!());
    };
    list.iter().map(|value| section(name, value)).collect()
}

#[cfg(test)]
mod test {
    use entities::EntityError;
    use serde_json::json;

    use super::*;
    use crate::JsonType;

    fn parse(value: Value) -> Result<Payload, PayloadError> {
        Payload::parse(&value, NonZeroU32::new(5000).unwrap())
    }

    #[test]
    fn root_must_be_object() {
        assert!(matches!(
            parse(json!(["guid"])),
            Err(PayloadError::TypeMismatch { expected: JsonType::Object, .. })
        ));
    }

    #[test]
    fn required_fields() {
        assert!(matches!(parse(json!({ "sharedKey": "s" })), Err(PayloadError::MissingField("guid"))));
        assert!(matches!(parse(json!({ "guid": "", "sharedKey": "s" })), Err(PayloadError::MissingField("guid"))));
        assert!(matches!(parse(json!({ "guid": "g", "sharedKey": "" })), Err(PayloadError::MissingSharedKey)));
        match parse(json!({ "guid": 42, "sharedKey": "s" })) {
            Err(PayloadError::TypeMismatch { path, expected, found }) => {
                assert_eq!(path, "guid");
                assert_eq!(expected, JsonType::String);
                assert_eq!(found, JsonType::Number);
            }
            _ => panic!("type mismatch expected"),
        }
    }

    #[test]
    fn guid_checked_before_shared_key() {
        assert!(matches!(parse(json!({})), Err(PayloadError::MissingField("guid"))));
    }

    #[test]
    fn scalar_type_mismatches() {
        let err = parse(json!({ "guid": "g", "sharedKey": "s", "double_encryption": "yes" })).unwrap_err();
        assert!(matches!(err, PayloadError::TypeMismatch { expected: JsonType::Bool, .. }));

        let err = parse(json!({ "guid": "g", "sharedKey": "s", "options": [] })).unwrap_err();
        assert!(matches!(err, PayloadError::TypeMismatch { ref path, .. } if path == "options"));
    }

    #[test]
    fn nested_paths() {
        let err = parse(json!({ "guid": "g", "sharedKey": "s", "tx_notes": { "ab12": 5 } })).unwrap_err();
        assert!(matches!(err, PayloadError::TypeMismatch { ref path, .. } if path == "tx_notes.ab12"));

        let err = parse(json!({ "guid": "g", "sharedKey": "s", "tx_tags": { "ab12": [1, "x"] } })).unwrap_err();
        assert!(matches!(err, PayloadError::TypeMismatch { ref path, .. } if path == "tx_tags.ab12[1]"));

        let err = parse(json!({ "guid": "g", "sharedKey": "s", "tag_names": ["a", 1] })).unwrap_err();
        assert!(matches!(err, PayloadError::TypeMismatch { ref path, .. } if path == "tag_names[1]"));
    }

    #[test]
    fn malformed_sections() {
        let err = parse(json!({ "guid": "g", "sharedKey": "s", "keys": [{ "label": "no addr" }] })).unwrap_err();
        assert_eq!(err.section(), Some("keys"));

        let err = parse(json!({
            "guid": "g", "sharedKey": "s",
            "hd_wallets": [{ "seed_hex": "00", "accounts": [{ "xpub": "" }] }]
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            PayloadError::MalformedSection("hd_wallets", EntityError::EmptyField { field: "xpub", .. })
        ));

        let err = parse(json!({ "guid": "g", "sharedKey": "s", "wallet_options": { "pbkdf2_iterations": 0 } }))
            .unwrap_err();
        assert_eq!(err.section(), Some("wallet_options"));

        let err = parse(json!({ "guid": "g", "sharedKey": "s", "paidTo": { "tx": 5 } })).unwrap_err();
        assert_eq!(err.section(), Some("paidTo"));

        let err = parse(json!({ "guid": "g", "sharedKey": "s", "address_book": [{ "addr": "" }] })).unwrap_err();
        assert_eq!(err.section(), Some("address_book"));
    }

    #[test]
    fn options_take_precedence_over_wallet_options() {
        let payload = parse(json!({
            "guid": "g", "sharedKey": "s",
            "options": { "pbkdf2_iterations": 7000 },
            "wallet_options": { "pbkdf2_iterations": 9000 }
        }))
        .unwrap();
        assert_eq!(payload.iterations(), NonZeroU32::new(7000));
    }

    #[test]
    fn empty_hd_wallet_list() {
        let payload = parse(json!({ "guid": "g", "sharedKey": "s", "hd_wallets": [] })).unwrap();
        assert!(!payload.is_upgraded());
        assert!(payload.hd_wallets().is_empty());
    }

    #[test]
    fn only_first_hd_wallet_is_used() {
        let payload = parse(json!({
            "guid": "g", "sharedKey": "s",
            "hd_wallets": [
                { "seed_hex": "01", "accounts": [{ "xpub": "xpub-first" }] },
                { "seed_hex": "02", "accounts": [{ "xpub": "xpub-second" }] }
            ]
        }))
        .unwrap();
        assert_eq!(payload.hd_wallets().len(), 1);
        assert_eq!(payload.hd_wallet().unwrap().seed_hex(), "01");
        assert_eq!(payload.account_for_xpub("xpub-second"), None);
    }

    #[test]
    fn tag_name_holes() {
        let payload = parse(json!({ "guid": "g", "sharedKey": "s", "tag_names": ["a", null, "c"] })).unwrap();
        assert_eq!(payload.tag_names().len(), 2);
        assert_eq!(payload.tag_names()[&2], "c");
    }

    #[test]
    fn source_text_is_kept() {
        let text = r#"{"guid":"g","sharedKey":"s","unknown":1}"#;
        let payload = Payload::from_json_str(text, NonZeroU32::new(5000).unwrap()).unwrap();
        assert_eq!(payload.decrypted_payload(), Some(text));
        assert!(parse(json!({ "guid": "g", "sharedKey": "s" })).unwrap().decrypted_payload().is_none());
    }

    #[test]
    fn invalid_text() {
        assert!(matches!(
            Payload::from_json_str("{\"guid\":", NonZeroU32::new(5000).unwrap()),
            Err(PayloadError::InvalidJson(_))
        ));
    }
}
