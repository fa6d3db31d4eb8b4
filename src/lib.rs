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

//! In-memory model of a decrypted HD wallet payload together with its JSON
//! parser and emitter.
//!
//! The payload is the document a remote wallet service stores (encrypted) for
//! a user: wallet identity, options, imported addresses, the HD wallet with its
//! accounts, address book, transaction notes and tags. This crate turns the
//! decrypted JSON into a [`Payload`] and a [`Payload`] back into JSON, keeping
//! the two derived maps between account extended public keys and account
//! indexes.
//!
//! ```
//! use payload::{Payload, PayloadConfig};
//!
//! let payload =
//!     Payload::with_config(r#"{"guid":"g","sharedKey":"s"}"#, &PayloadConfig::default()).unwrap();
//! assert!(!payload.is_upgraded());
//! let json = payload.to_json().unwrap();
//! assert_eq!(json["pbkdf2_iterations"], 5000);
//! ```

#[macro_use]
extern crate amplify;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_crate as serde;

mod config;
mod error;
mod json;
mod index;
mod payload;
mod parse;
mod emit;

pub use config::PayloadConfig;
pub use entities::*;
pub use error::PayloadError;
pub use index::AccountIndex;
pub use json::{is_valid_json, JsonType};
pub use payload::{Payload, MAX_TAG_ID};
