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

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Display, Error)]
#[display(doc_comments)]
pub enum EntityError {
    /// invalid {entity} structure - {reason}
    Malformed {
        entity: &'static str,
        /// Serde error message with quoted string values removed.
        reason: String,
    },

    /// {entity} field '{field}' must not be empty.
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },

    /// account {0} repeats an extended public key already used by another account of the
    /// same wallet.
    DuplicateXpub(u32),

    /// wallet options carry no PBKDF2 iteration count.
    MissingIterations,
}

/// Entity which can be read from and written to a JSON object of the wallet
/// payload.
///
/// The default implementations go through the serde representation of the
/// entity and run [`JsonEntity::validate`] in both directions, so a value
/// which does not satisfy entity rules is never produced nor emitted.
pub trait JsonEntity: Serialize + DeserializeOwned {
    /// Entity name used in error messages.
    const NAME: &'static str;

    /// Checks entity-level rules which can't be expressed in the type system.
    fn validate(&self) -> Result<(), EntityError> { Ok(()) }

    fn from_json(value: &Value) -> Result<Self, EntityError> {
        let entity = <Self as Deserialize>::deserialize(value)
            .map_err(|err| EntityError::malformed(Self::NAME, err))?;
        entity.validate()?;
        Ok(entity)
    }

    fn to_json(&self) -> Result<Value, EntityError> {
        self.validate()?;
        serde_json::to_value(self).map_err(|err| EntityError::malformed(Self::NAME, err))
    }
}

impl EntityError {
    /// Wraps a serde error, dropping the string values serde quotes in its
    /// messages since those may be keys or seeds.
    pub fn malformed(entity: &'static str, err: serde_json::Error) -> Self {
        let message = err.to_string();
        let mut reason = String::with_capacity(message.len());
        let mut chars = message.chars();
        while let Some(c) = chars.next() {
            if c != '"' {
                reason.push(c);
                continue;
            }
            reason.truncate(reason.trim_end().len());
            while let Some(c) = chars.next() {
                match c {
                    '\\' => {
                        chars.next();
                    }
                    '"' => break,
                    _ => {}
                }
            }
        }
        EntityError::Malformed { entity, reason }
    }
}

pub(crate) fn require_non_empty(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), EntityError> {
    if value.is_empty() {
        return Err(EntityError::EmptyField { entity, field });
    }
    Ok(())
}
