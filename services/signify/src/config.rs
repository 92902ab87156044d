// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};

use httpsig_cesr_core::hash::DigestAlgorithm;
use httpsig_cesr_core::utils::Redact;
use httpsig_cesr_core::{Context, Error, Result};
use log::debug;

use crate::constants::*;
use crate::key::signing_key_from_qb64_seed;
use crate::{KeyPair, SignatureFields};

/// Config for signing requests.
///
/// Values set explicitly take precedence over values loaded by
/// [`Config::from_env`].
#[derive(Clone, Default)]
pub struct Config {
    /// Key id announced to verifiers, derived from the private key if unset.
    pub key_id: Option<String>,
    /// CESR encoded Ed25519 seed (code `A`).
    pub private_key: Option<String>,
    /// Comma separated list of signed fields.
    pub signature_fields: Option<String>,
    /// Digest algorithm for `content-digest`, `sha-256` or `sha-512`.
    pub digest_algorithm: Option<String>,
    /// Encode the digest with url-safe base64 without padding.
    pub digest_url_safe: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("key_id", &self.key_id)
            .field("private_key", &Redact::from(&self.private_key))
            .field("signature_fields", &self.signature_fields)
            .field("digest_algorithm", &self.digest_algorithm)
            .field("digest_url_safe", &self.digest_url_safe)
            .finish()
    }
}

impl Config {
    /// Fill unset values from environment variables.
    ///
    /// - `HTTPSIG_KEY_ID`
    /// - `HTTPSIG_PRIVATE_KEY`
    /// - `HTTPSIG_SIGNATURE_FIELDS`
    /// - `HTTPSIG_DIGEST_ALGORITHM`
    /// - `HTTPSIG_DIGEST_URL_SAFE`
    pub fn from_env(mut self, ctx: &Context) -> Self {
        let envs = ctx.env_vars();

        if self.key_id.is_none() {
            self.key_id = envs.get(HTTPSIG_KEY_ID).cloned();
        }
        if self.private_key.is_none() {
            self.private_key = envs.get(HTTPSIG_PRIVATE_KEY).cloned();
        }
        if self.signature_fields.is_none() {
            self.signature_fields = envs.get(HTTPSIG_SIGNATURE_FIELDS).cloned();
        }
        if self.digest_algorithm.is_none() {
            self.digest_algorithm = envs.get(HTTPSIG_DIGEST_ALGORITHM).cloned();
        }
        if self.digest_url_safe.is_none() {
            self.digest_url_safe = envs.get(HTTPSIG_DIGEST_URL_SAFE).cloned();
        }

        debug!("signing config loaded from env: {self:?}");
        self
    }

    /// Build the key pair.
    pub fn key_pair(&self) -> Result<KeyPair> {
        let seed = self
            .private_key
            .as_deref()
            .ok_or_else(|| Error::config_invalid("private key is not configured"))?;
        let signing_key = signing_key_from_qb64_seed(seed)?;

        match self.key_id.as_deref() {
            Some(key_id) => KeyPair::new(key_id, signing_key),
            None => KeyPair::from_signing_key(signing_key),
        }
    }

    /// Signed fields, the signify defaults if unset.
    pub fn signature_fields(&self) -> Result<SignatureFields> {
        match self.signature_fields.as_deref() {
            Some(v) => v.parse(),
            None => Ok(SignatureFields::default()),
        }
    }

    /// Digest algorithm, `sha-256` if unset.
    pub fn digest_algorithm(&self) -> Result<DigestAlgorithm> {
        match self.digest_algorithm.as_deref() {
            Some(v) => v.parse(),
            None => Ok(DigestAlgorithm::default()),
        }
    }

    /// Whether the digest uses url-safe base64 without padding, `false` if unset.
    pub fn digest_url_safe(&self) -> Result<bool> {
        match self.digest_url_safe.as_deref().map(str::trim) {
            None => Ok(false),
            Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
            Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
            Some(v) => Err(Error::config_invalid(format!(
                "{HTTPSIG_DIGEST_URL_SAFE} must be true or false, got {v}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpsig_cesr_core::cesr::{self, Code};
    use httpsig_cesr_core::{ErrorKind, StaticEnv};
    use std::collections::HashMap;

    fn seed() -> String {
        cesr::encode(&[7u8; 32], Code::Ed25519Seed).expect("seed must encode")
    }

    fn context(envs: &[(&str, &str)]) -> Context {
        Context::new().with_env(StaticEnv {
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
    }

    #[test]
    fn test_config_from_env() -> anyhow::Result<()> {
        let seed = seed();
        let ctx = context(&[
            (HTTPSIG_PRIVATE_KEY, seed.as_str()),
            (HTTPSIG_SIGNATURE_FIELDS, "@method,@path"),
            (HTTPSIG_DIGEST_ALGORITHM, "sha-512"),
            (HTTPSIG_DIGEST_URL_SAFE, "true"),
        ]);

        let config = Config::default().from_env(&ctx);
        let key = config.key_pair()?;
        assert!(key.key_id().starts_with('D'));
        assert_eq!(
            config.signature_fields()?.iter().collect::<Vec<_>>(),
            vec!["@method", "@path"]
        );
        assert_eq!(config.digest_algorithm()?, DigestAlgorithm::Sha512);
        assert!(config.digest_url_safe()?);
        Ok(())
    }

    #[test]
    fn test_config_defaults() -> anyhow::Result<()> {
        let config = Config::default().from_env(&context(&[]));

        assert_eq!(config.signature_fields()?, SignatureFields::default());
        assert_eq!(config.digest_algorithm()?, DigestAlgorithm::Sha256);
        assert!(!config.digest_url_safe()?);

        let err = config.key_pair().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        Ok(())
    }

    #[test]
    fn test_explicit_values_win_over_env() -> anyhow::Result<()> {
        let seed = seed();
        let ctx = context(&[
            (HTTPSIG_KEY_ID, "env-key"),
            (HTTPSIG_PRIVATE_KEY, seed.as_str()),
        ]);

        let config = Config {
            key_id: Some("explicit-key".to_string()),
            ..Default::default()
        }
        .from_env(&ctx);

        assert_eq!(config.key_pair()?.key_id(), "explicit-key");
        Ok(())
    }

    #[test]
    fn test_config_invalid_values() {
        let ctx = context(&[
            (HTTPSIG_PRIVATE_KEY, "DAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"),
            (HTTPSIG_SIGNATURE_FIELDS, "@method,with space"),
            (HTTPSIG_DIGEST_ALGORITHM, "md5"),
            (HTTPSIG_DIGEST_URL_SAFE, "maybe"),
        ]);
        let config = Config::default().from_env(&ctx);

        assert_eq!(config.key_pair().unwrap_err().kind(), ErrorKind::KeyInvalid);
        assert_eq!(
            config.signature_fields().unwrap_err().kind(),
            ErrorKind::ConfigInvalid
        );
        assert_eq!(
            config.digest_algorithm().unwrap_err().kind(),
            ErrorKind::DigestComputation
        );
        assert_eq!(
            config.digest_url_safe().unwrap_err().kind(),
            ErrorKind::ConfigInvalid
        );
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let config = Config {
            private_key: Some(seed()),
            ..Default::default()
        };
        let s = format!("{config:?}");
        assert!(!s.contains(&seed()));
    }
}
