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

use entities::DEFAULT_PBKDF2_ITERATIONS;

/// Settings the embedding application passes to the payload parser.
///
/// Deserializable, so it may be a part of the application configuration file;
/// missing fields take their default values.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(crate = "serde_crate", rename_all = "camelCase", default)]
pub struct PayloadConfig {
    /// PBKDF2 iteration count used when the payload options do not specify one.
    pub default_iterations: NonZeroU32,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        PayloadConfig {
            default_iterations: DEFAULT_PBKDF2_ITERATIONS,
        }
    }
}

impl PayloadConfig {
    pub fn with_iterations(default_iterations: NonZeroU32) -> Self {
        PayloadConfig { default_iterations }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let config: PayloadConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PayloadConfig::default());
        assert_eq!(config.default_iterations.get(), 5000);
    }

    #[test]
    fn custom_iterations() {
        let config: PayloadConfig = serde_json::from_str(r#"{"defaultIterations":10000}"#).unwrap();
        assert_eq!(config, PayloadConfig::with_iterations(NonZeroU32::new(10000).unwrap()));
        assert!(serde_json::from_str::<PayloadConfig>(r#"{"defaultIterations":0}"#).is_err());
    }
}
