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

//! JSON codecs for the entities enclosed in an HD wallet payload: wallet
//! options, imported (legacy) addresses, address book entries, payment
//! recipients and HD wallets with their accounts.
//!
//! Every entity keeps the keys it does not model in a flattened map and
//! remembers which optional keys were explicitly `null`, so that a document
//! parsed and emitted again does not lose information.

#[macro_use]
extern crate amplify;
#[macro_use]
extern crate serde_crate as serde;

mod codec;
mod field;
mod options;
mod legacy;
mod address_book;
mod paid_to;
mod account;
mod hd_wallet;

pub use account::{Account, AccountCache, AddressLabel};
pub use address_book::AddressBookEntry;
pub use codec::{EntityError, JsonEntity};
pub use field::Field;
pub use hd_wallet::HdWallet;
pub use legacy::{LegacyAddress, ARCHIVED_ADDRESS, NORMAL_ADDRESS};
pub use options::{Options, DEFAULT_PBKDF2_ITERATIONS};
pub use paid_to::PaidTo;
