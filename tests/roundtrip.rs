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

use std::num::NonZeroU32;

use payload::{is_valid_json, Payload, PayloadConfig};
use serde_json::{json, Map, Value};

const HD_WALLET: &str = include_str!("data/hd_wallet.json");
const LEGACY_WALLET: &str = include_str!("data/legacy_wallet.json");

const KNOWN_KEYS: [&str; 14] = [
    "guid",
    "sharedKey",
    "double_encryption",
    "dpasswordhash",
    "pbkdf2_iterations",
    "options",
    "wallet_options",
    "tx_notes",
    "tx_tags",
    "tag_names",
    "paidTo",
    "hd_wallets",
    "keys",
    "address_book",
];

fn default_iterations() -> NonZeroU32 { NonZeroU32::new(5000).unwrap() }

/// Brings a source document to the form the emitter is expected to produce:
/// unknown keys dropped, `wallet_options` renamed to `options`, iteration count
/// mirrored at the top level and always-written sections present.
fn canonicalize(text: &str, iterations: u32) -> Value {
    let source: Map<String, Value> = serde_json::from_str(text).unwrap();
    let mut doc = source
        .into_iter()
        .filter(|(key, _)| KNOWN_KEYS.contains(&key.as_str()))
        .collect::<Map<String, Value>>();
    if let Some(options) = doc.remove("wallet_options") {
        doc.entry("options").or_insert(options);
    }
    doc.insert("pbkdf2_iterations".to_owned(), json!(iterations));
    for (key, empty) in [
        ("keys", json!([])),
        ("address_book", json!([])),
        ("tx_notes", json!({})),
        ("tx_tags", json!({})),
        ("tag_names", json!([])),
        ("paidTo", json!({})),
    ] {
        doc.entry(key).or_insert(empty);
    }
    Value::Object(doc)
}

fn roundtrip(text: &str, iterations: u32) {
    assert!(is_valid_json(text));
    let payload = Payload::from_json_str(text, default_iterations()).unwrap();
    assert_eq!(payload.to_json().unwrap(), canonicalize(text, iterations));
}

fn reparse(text: &str) {
    let root: Value = serde_json::from_str(text).unwrap();
    let payload = Payload::parse(&root, default_iterations()).unwrap();
    let again = Payload::parse(&payload.to_json().unwrap(), default_iterations()).unwrap();
    assert_eq!(again, payload);
}

#[test]
fn hd_wallet_roundtrip() { roundtrip(HD_WALLET, 5000); }

#[test]
fn legacy_wallet_roundtrip() { roundtrip(LEGACY_WALLET, 10000); }

#[test]
fn hd_wallet_reparse() { reparse(HD_WALLET); }

#[test]
fn legacy_wallet_reparse() { reparse(LEGACY_WALLET); }

#[test]
fn explicit_nulls_roundtrip() {
    let text = r#"{
        "guid": "5f3b9c1e-2a4d-4e8f-9b6a-7c0d1e2f3a4b",
        "sharedKey": "8a7b6c5d-4e3f-4a1b-9c8d-7e6f5a4b3c2d",
        "options": { "pbkdf2_iterations": 5000, "fee_per_kb": null },
        "keys": [
            { "addr": "1W", "priv": null, "label": null },
            { "addr": "1S", "priv": "5KJvsngHeMpm", "created_device_name": null }
        ],
        "address_book": [{ "addr": "1B", "label": null }],
        "paidTo": {
            "tx-1": { "email": "alice@example.com", "mobile": null, "redeemedAt": null, "address": null }
        },
        "hd_wallets": [{
            "seed_hex": "00",
            "passphrase": null,
            "accounts": [{ "label": "A", "xpriv": null, "xpub": "xpub-a", "cache": null }]
        }]
    }"#;
    roundtrip(text, 5000);
    reparse(text);

    let payload = Payload::from_json_str(text, default_iterations()).unwrap();
    assert_eq!(payload.watch_only_address_strings(), vec!["1W".to_owned()]);
    assert_eq!(payload.paid_to()["tx-1"].mobile(), None);
}

#[test]
fn source_text_retained() {
    let payload = Payload::with_config(HD_WALLET, &PayloadConfig::default()).unwrap();
    assert_eq!(payload.decrypted_payload(), Some(HD_WALLET));
}

#[test]
fn xpub_index_bijection() {
    let payload = Payload::from_json_str(HD_WALLET, default_iterations()).unwrap();
    let wallet = payload.hd_wallet().unwrap();
    assert_eq!(wallet.accounts().len(), 2);
    assert_eq!(payload.account_index().len(), 2);
    for account in wallet.accounts() {
        assert_eq!(payload.account_for_xpub(account.xpub()), Some(account.real_index()));
        assert_eq!(payload.xpub_for_account(account.real_index()), Some(account.xpub()));
    }
    let index = payload.account_index();
    assert_eq!(index.xpub_to_index().len(), index.index_to_xpub().len());
}

#[test]
fn upgrade_flag() {
    let payload = Payload::from_json_str(HD_WALLET, default_iterations()).unwrap();
    assert!(payload.is_upgraded());
    assert_eq!(payload.hd_wallets().len(), 1);

    let payload = Payload::from_json_str(LEGACY_WALLET, default_iterations()).unwrap();
    assert!(!payload.is_upgraded());
    assert!(payload.to_json().unwrap().get("hd_wallets").is_none());
}

#[test]
fn hd_wallet_contents() {
    let payload = Payload::from_json_str(HD_WALLET, default_iterations()).unwrap();
    let wallet = payload.hd_wallet().unwrap();
    assert_eq!(wallet.default_account().unwrap().label(), Some("My Bitcoin Wallet"));
    assert!(wallet.accounts()[1].is_archived());
    assert_eq!(payload.legacy_addresses().len(), 3);
    assert_eq!(payload.watch_only_address_strings(), vec!["1BitcoinEaterAddressDontSendf59kuE"]);
    assert_eq!(payload.active_legacy_addresses().len(), 1);
    assert_eq!(payload.address_book()[1].label(), Some("friend"));
    assert_eq!(payload.tag_names().values().collect::<Vec<_>>(), vec!["work", "family"]);
    assert_eq!(payload.options().extra().get("always_keep_local_backup"), Some(&json!(false)));
    let paid = payload
        .paid_to()
        .get("0a0b0c0d0e0f101112131415161718191a1b1c1d1e1f20212223242526272829")
        .unwrap();
    assert_eq!(paid.email(), Some("alice@example.com"));
}

#[test]
fn legacy_wallet_contents() {
    let payload = Payload::from_json_str(LEGACY_WALLET, default_iterations()).unwrap();
    assert!(payload.is_double_encrypted());
    assert_eq!(payload.iterations(), NonZeroU32::new(10000));
    assert_eq!(payload.active_legacy_address_strings().len(), 2);
    assert_eq!(payload.active_legacy_addresses().len(), 1);
    assert!(payload.paid_to().is_empty());
}

#[test]
fn mutation_survives_emission() {
    let mut payload = Payload::from_json_str(LEGACY_WALLET, default_iterations()).unwrap();
    payload.tx_notes_mut().insert("ff".repeat(32), "rent".to_owned());
    payload.tx_tags_mut().insert("ff".repeat(32), vec![0]);
    payload.tag_names_mut().insert(0, "bills".to_owned());
    assert!(payload.remove_legacy_address("1Q1pE5vPGEEMqRcVRMbtBK842Y6Pzo6nK9").is_some());

    let again = Payload::parse(&payload.to_json().unwrap(), default_iterations()).unwrap();
    assert_eq!(again.tx_notes()[&"ff".repeat(32)], "rent");
    assert_eq!(again.tx_tags()[&"ff".repeat(32)], vec![0]);
    assert_eq!(again.tag_names()[&0], "bills");
    assert_eq!(again.legacy_address_strings(), vec!["1JryTePceSiWVpoNBU8SbwiT7J4ghzijzW"]);
}
