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

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use httpsig_cesr_core::cesr::{self, Code};
use httpsig_cesr_core::utils::Redact;
use httpsig_cesr_core::{Error, Result};

/// Ed25519 signing key and the key id announced to verifiers.
///
/// The private key never leaves this type: there is no accessor for it and
/// `Debug` output is redacted.
pub struct KeyPair {
    key_id: String,
    signing_key: SigningKey,
}

impl Debug for KeyPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("key_id", &self.key_id)
            .field("signing_key", &Redact::from(&self.signing_key.as_bytes()[..]))
            .finish()
    }
}

impl KeyPair {
    /// Create a key pair with an explicit key id.
    ///
    /// The key id is sent in headers and quoted in the signature params, so it
    /// must be non-empty visible ASCII without `"` or `\`.
    pub fn new(key_id: impl Into<String>, signing_key: SigningKey) -> Result<Self> {
        let key_id = key_id.into();
        if key_id.is_empty()
            || !key_id
                .bytes()
                .all(|b| b.is_ascii_graphic() && b != b'"' && b != b'\\')
        {
            return Err(Error::key_invalid(format!("invalid key id {key_id:?}")));
        }

        Ok(Self {
            key_id,
            signing_key,
        })
    }

    /// Create a key pair whose key id is the CESR encoded verification key.
    pub fn from_signing_key(signing_key: SigningKey) -> Result<Self> {
        let key_id = cesr::encode(signing_key.verifying_key().as_bytes(), Code::Ed25519)?;
        Self::new(key_id, signing_key)
    }

    /// Load the signing key from a CESR encoded Ed25519 seed (code `A`).
    ///
    /// The key id is derived from the verification key.
    pub fn from_qb64_seed(seed: &str) -> Result<Self> {
        Self::from_signing_key(signing_key_from_qb64_seed(seed)?)
    }

    /// Key id announced as `keyid` and in `signify-resource`.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Verification key matching this signing key.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Sign the message, returning raw signature bytes.
    pub(crate) fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }
}

/// Decode a CESR encoded Ed25519 seed into a signing key.
pub(crate) fn signing_key_from_qb64_seed(seed: &str) -> Result<SigningKey> {
    let (code, raw) = cesr::decode(seed)
        .map_err(|e| Error::key_invalid("private key is not valid CESR").with_source(e))?;
    if code != Code::Ed25519Seed {
        return Err(Error::key_invalid(format!(
            "private key must use code {}, got {code}",
            Code::Ed25519Seed
        )));
    }

    let raw: [u8; 32] = raw
        .try_into()
        .map_err(|_| Error::key_invalid("private key seed must be 32 bytes"))?;
    Ok(SigningKey::from_bytes(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signature, Verifier};
    use httpsig_cesr_core::ErrorKind;

    fn signing_key() -> SigningKey {
        SigningKey::from_bytes(&[7u8; 32])
    }

    #[test]
    fn test_key_id_derived_from_verifying_key() -> Result<()> {
        let key = KeyPair::from_signing_key(signing_key())?;

        assert!(key.key_id().starts_with('D'));
        assert_eq!(key.key_id().len(), 44);
        let (code, raw) = cesr::decode(key.key_id())?;
        assert_eq!(code, Code::Ed25519);
        assert_eq!(raw, key.verifying_key().as_bytes().to_vec());
        Ok(())
    }

    #[test]
    fn test_from_qb64_seed() -> Result<()> {
        let seed = cesr::encode(&[7u8; 32], Code::Ed25519Seed)?;
        let key = KeyPair::from_qb64_seed(&seed)?;
        assert_eq!(key.verifying_key(), signing_key().verifying_key());
        Ok(())
    }

    #[test]
    fn test_from_qb64_seed_wrong_code() -> Result<()> {
        let verkey = cesr::encode(&[7u8; 32], Code::Ed25519)?;
        let err = KeyPair::from_qb64_seed(&verkey).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyInvalid);

        let err = KeyPair::from_qb64_seed("not-a-seed").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::KeyInvalid);
        Ok(())
    }

    #[test]
    fn test_invalid_key_id() {
        for key_id in ["", "with space", "quo\"te", "back\\slash"] {
            let err = KeyPair::new(key_id, signing_key()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::KeyInvalid, "key id: {key_id:?}");
        }
    }

    #[test]
    fn test_sign_verifies() -> Result<()> {
        let key = KeyPair::new("my-key", signing_key())?;
        let sig = key.sign(b"signature base");
        key.verifying_key()
            .verify(b"signature base", &Signature::from_bytes(&sig))
            .expect("signature must verify");
        Ok(())
    }

    #[test]
    fn test_debug_is_redacted() -> Result<()> {
        let key = KeyPair::new("my-key", signing_key())?;
        let s = format!("{key:?}");
        assert!(s.contains("my-key"));
        assert!(s.contains("<32 bytes redacted>"));
        assert!(!s.contains("[7, 7"));
        Ok(())
    }
}
