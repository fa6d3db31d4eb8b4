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

use serde_json::{Map, Value};

use crate::{Field, JsonEntity};

/// Number of PBKDF2 rounds used by wallets which do not state it explicitly.
pub const DEFAULT_PBKDF2_ITERATIONS: NonZeroU32 = match NonZeroU32::new(5000) {
    Some(iterations) => iterations,
    None => unreachable!(),
};

/// Wallet-wide options.
///
/// The only option the payload relies upon is the PBKDF2 iteration count used
/// for the second (double-encryption) password; the rest are kept for the
/// outer layers and re-emitted as they were read.
#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(crate = "serde_crate")]
pub struct Options {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    pbkdf2_iterations: Field<NonZeroU32>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    fee_per_kb: Field<u64>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    html5_notifications: Field<bool>,

    /// Milliseconds of inactivity after which the wallet UI logs out.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    logout_time: Field<u64>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    enable_multiple_accounts: Field<bool>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    additional_seeds: Field<Vec<String>>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl JsonEntity for Options {
    const NAME: &'static str = "options";
}

impl Options {
    pub fn with_iterations(iterations: NonZeroU32) -> Self {
        Options {
            pbkdf2_iterations: Field::Present(iterations),
            ..none!()
        }
    }

    #[inline]
    pub fn iterations(&self) -> Option<NonZeroU32> { self.pbkdf2_iterations.copied() }

    #[inline]
    pub fn set_iterations(&mut self, iterations: NonZeroU32) {
        self.pbkdf2_iterations.set(iterations)
    }

    /// Sets iteration count to `fallback` if the options do not carry one.
    /// Returns whether the fallback was applied.
    pub fn ensure_iterations(&mut self, fallback: NonZeroU32) -> bool {
        if self.pbkdf2_iterations.get().is_some() {
            return false;
        }
        self.pbkdf2_iterations.set(fallback);
        true
    }

    #[inline]
    pub fn fee_per_kb(&self) -> Option<u64> { self.fee_per_kb.copied() }

    #[inline]
    pub fn set_fee_per_kb(&mut self, fee: u64) { self.fee_per_kb.set(fee) }

    #[inline]
    pub fn logout_time(&self) -> Option<u64> { self.logout_time.copied() }

    #[inline]
    pub fn set_logout_time(&mut self, millis: u64) { self.logout_time.set(millis) }

    #[inline]
    pub fn html5_notifications(&self) -> bool { self.html5_notifications.copied().unwrap_or_default() }

    #[inline]
    pub fn multiple_accounts_enabled(&self) -> bool {
        self.enable_multiple_accounts.copied().unwrap_or_default()
    }

    pub fn additional_seeds(&self) -> &[String] { self.additional_seeds.as_deref().unwrap_or_default() }

    /// Keys present in the source document which are not modelled here.
    pub fn extra(&self) -> &Map<String, Value> { &self.extra }
}
