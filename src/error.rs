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

use entities::EntityError;

use crate::JsonType;

/// Errors happening during payload parsing and emission.
///
/// Messages name the offending section or JSON path, but never include values
/// of wallet identity, shared key, password hash or the payload text.
#[derive(Debug, Display, Error, From)]
#[display(doc_comments)]
pub enum PayloadError {
    /// payload is not a well-formed JSON document - {0}
    #[from]
    InvalidJson(serde_json::Error),

    /// required field '{0}' is absent from the payload.
    MissingField(&'static str),

    /// payload contains no shared key.
    MissingSharedKey,

    /// value at '{path}' must be {expected}, but {found} was found.
    TypeMismatch {
        path: String,
        expected: JsonType,
        found: JsonType,
    },

    /// malformed '{0}' section - {1}
    MalformedSection(&'static str, EntityError),

    /// unable to emit '{0}' section - {1}
    EmitFailure(&'static str, EntityError),

    /// tag id {0} is above the largest supported tag id 1048575.
    TagIdOutOfRange(usize),
}

impl PayloadError {
    /// Name of the required top-level field whose absence caused the error.
    pub fn missing_field(&self) -> Option<&'static str> {
        match self {
            PayloadError::MissingField(name) => Some(*name),
            PayloadError::MissingSharedKey => Some(crate::payload::key::SHARED_KEY),
            _ => None,
        }
    }

    /// Name of the section whose entity codec failed.
    pub fn section(&self) -> Option<&'static str> {
        match self {
            PayloadError::MalformedSection(section, _) | PayloadError::EmitFailure(section, _) => {
                Some(*section)
            }
            _ => None,
        }
    }
}
