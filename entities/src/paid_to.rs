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

use crate::{Field, JsonEntity};

/// Recipient details of a payment sent to an email address or phone number
/// rather than to a bitcoin address.
#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(crate = "serde_crate", rename_all = "camelCase")]
pub struct PaidTo {
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    email: Field<String>,

    #[serde(default, skip_serializing_if = "Field::is_absent")]
    mobile: Field<String>,

    /// Unix timestamp at which the recipient claimed the funds.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    redeemed_at: Field<u64>,

    /// Address the funds were eventually swept to.
    #[serde(default, skip_serializing_if = "Field::is_absent")]
    address: Field<String>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl JsonEntity for PaidTo {
    const NAME: &'static str = "paid-to record";
}

impl PaidTo {
    pub fn with_email(email: impl Into<String>) -> Self {
        PaidTo {
            email: Field::Present(email.into()),
            ..none!()
        }
    }

    pub fn with_mobile(mobile: impl Into<String>) -> Self {
        PaidTo {
            mobile: Field::Present(mobile.into()),
            ..none!()
        }
    }

    #[inline]
    pub fn email(&self) -> Option<&str> { self.email.as_deref() }

    #[inline]
    pub fn mobile(&self) -> Option<&str> { self.mobile.as_deref() }

    #[inline]
    pub fn redeemed_at(&self) -> Option<u64> { self.redeemed_at.copied() }

    #[inline]
    pub fn address(&self) -> Option<&str> { self.address.as_deref() }

    #[inline]
    pub fn is_redeemed(&self) -> bool { self.redeemed_at.get().is_some() }

    pub fn redeem(&mut self, timestamp: u64, address: impl Into<String>) {
        self.redeemed_at.set(timestamp);
        self.address.set(address.into());
    }
}
