//! Symmetric payload cipher.
//!
//! Tokens are `<ivBase64>:<ciphertextBase64>`, encrypted with AES-256-CBC
//! (PKCS#7 padding) under `SHA-256(secret)`.
//!
//! This is confidentiality only: there is no authentication tag, so a
//! tampered ciphertext can still unpad cleanly and decrypt to garbage. The
//! JSON parse in the token manager is the only backstop, and it is not a
//! cryptographic one.

use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};
use thiserror::Error;

use bizdash_core::RawToken;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES block (and CBC IV) length in bytes.
pub const IV_LEN: usize = 16;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("invalid base64 in {segment} segment")]
    Base64 { segment: &'static str },

    #[error("iv must be 16 bytes, got {0}")]
    IvLength(usize),

    #[error("decryption failed (wrong key or corrupted ciphertext)")]
    Unpad,

    #[error("plaintext is not valid utf-8")]
    Utf8,
}

/// Cipher bound to a key derived once from the shared secret.
#[derive(Clone)]
pub struct SessionCipher {
    key: [u8; 32],
}

impl SessionCipher {
    pub fn new(secret: &str) -> Self {
        let digest = Sha256::digest(secret.as_bytes());
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        Self { key }
    }

    /// Decrypt a raw token into its plaintext.
    pub fn decrypt(&self, token: &RawToken) -> Result<String, CipherError> {
        let segments = token
            .segments()
            .map_err(|e| CipherError::Malformed(e.to_string()))?;

        let iv = STANDARD
            .decode(segments.iv)
            .map_err(|_| CipherError::Base64 { segment: "iv" })?;
        if iv.len() != IV_LEN {
            return Err(CipherError::IvLength(iv.len()));
        }

        let ciphertext = STANDARD
            .decode(segments.ciphertext)
            .map_err(|_| CipherError::Base64 { segment: "ciphertext" })?;

        let plaintext = Aes256CbcDec::new_from_slices(&self.key, &iv)
            .map_err(|_| CipherError::IvLength(iv.len()))?
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| CipherError::Unpad)?;

        String::from_utf8(plaintext).map_err(|_| CipherError::Utf8)
    }

    /// Reference encryption matching the backend's token format.
    ///
    /// Tokens are issued by the backend; this exists for parity checks and
    /// tests. Callers supply the IV and are responsible for its randomness.
    pub fn encrypt_with_iv(&self, plaintext: &str, iv: &[u8; IV_LEN]) -> RawToken {
        let ciphertext = Aes256CbcEnc::new(&self.key.into(), &(*iv).into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        RawToken::new(format!(
            "{}:{}",
            STANDARD.encode(iv),
            STANDARD.encode(ciphertext)
        ))
    }
}

impl core::fmt::Debug for SessionCipher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionCipher").finish_non_exhaustive()
    }
}

/// Decrypt `token` with a key derived from `secret`.
///
/// Never panics; every failure is logged and collapses to `None`.
pub fn decrypt(token: &RawToken, secret: &str) -> Option<String> {
    match SessionCipher::new(secret).decrypt(token) {
        Ok(plaintext) => Some(plaintext),
        Err(err) => {
            tracing::warn!(error = %err, "session token decryption failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const IV: [u8; IV_LEN] = *b"0123456789abcdef";

    #[test]
    fn round_trip() {
        let cipher = SessionCipher::new("s3cret");
        let token = cipher.encrypt_with_iv(r#"{"tokens":"abc123","role":"manager"}"#, &IV);
        assert_eq!(
            decrypt(&token, "s3cret").as_deref(),
            Some(r#"{"tokens":"abc123","role":"manager"}"#)
        );
    }

    #[test]
    fn token_has_iv_colon_ciphertext_shape() {
        let token = SessionCipher::new("k").encrypt_with_iv("hello", &IV);
        let seg = token.segments().unwrap();
        assert_eq!(STANDARD.decode(seg.iv).unwrap(), IV);
        // one 16-byte block for a 5-byte plaintext
        assert_eq!(STANDARD.decode(seg.ciphertext).unwrap().len(), 16);
    }

    #[test]
    fn deterministic_for_same_input() {
        let cipher = SessionCipher::new("s3cret");
        let token = cipher.encrypt_with_iv("payload", &IV);
        assert_eq!(cipher.decrypt(&token), cipher.decrypt(&token));
    }

    #[test]
    fn wrong_secret_is_rejected_or_garbled() {
        let token = SessionCipher::new("right").encrypt_with_iv(r#"{"tokens":"t"}"#, &IV);
        // CBC without a tag may unpad by chance; it must never yield the plaintext.
        assert_ne!(
            decrypt(&token, "wrong").as_deref(),
            Some(r#"{"tokens":"t"}"#)
        );
    }

    #[test]
    fn short_iv_is_rejected() {
        // "iv1" / "cipher" base64: structurally valid, cryptographically not.
        let token = RawToken::new("aXYx:Y2lwaGVy");
        assert_eq!(
            SessionCipher::new("s3cret").decrypt(&token),
            Err(CipherError::IvLength(3))
        );
    }

    #[test]
    fn malformed_shapes_are_rejected() {
        let cipher = SessionCipher::new("s3cret");
        for raw in ["", "abc", ":", "a:", ":b", "a:b:c"] {
            assert!(matches!(
                cipher.decrypt(&RawToken::new(raw)),
                Err(CipherError::Malformed(_))
            ));
        }
    }

    #[test]
    fn bad_base64_is_rejected() {
        let cipher = SessionCipher::new("s3cret");
        assert_eq!(
            cipher.decrypt(&RawToken::new("%%%:AAAA")),
            Err(CipherError::Base64 { segment: "iv" })
        );
        let iv = STANDARD.encode(IV);
        assert_eq!(
            cipher.decrypt(&RawToken::new(format!("{iv}:%%%"))),
            Err(CipherError::Base64 { segment: "ciphertext" })
        );
    }

    #[test]
    fn partial_block_is_rejected() {
        let iv = STANDARD.encode(IV);
        let ct = STANDARD.encode([7u8; 10]);
        assert_eq!(
            SessionCipher::new("s3cret").decrypt(&RawToken::new(format!("{iv}:{ct}"))),
            Err(CipherError::Unpad)
        );
    }

    proptest! {
        #[test]
        fn prop_round_trip(plaintext in ".*", secret in ".{1,64}", iv in any::<[u8; IV_LEN]>()) {
            let token = SessionCipher::new(&secret).encrypt_with_iv(&plaintext, &iv);
            prop_assert_eq!(decrypt(&token, &secret), Some(plaintext));
        }

        #[test]
        fn prop_garbage_never_panics(raw in ".*", secret in ".*") {
            let _ = decrypt(&RawToken::new(raw), &secret);
        }

        #[test]
        fn prop_tokens_without_separator_are_none(raw in "[^:]*", secret in ".*") {
            prop_assert_eq!(decrypt(&RawToken::new(raw), &secret), None);
        }

        #[test]
        fn prop_non_base64_iv_is_none(
            iv in "[A-Za-z0-9+/=]*[^A-Za-z0-9+/=:][^:]*",
            rest in ".*",
            secret in ".*",
        ) {
            let raw = format!("{iv}:{rest}");
            prop_assert_eq!(decrypt(&RawToken::new(raw), &secret), None);
        }

        #[test]
        fn prop_non_base64_ciphertext_is_none(
            iv in any::<[u8; IV_LEN]>(),
            ct in "[A-Za-z0-9+/=]*[^A-Za-z0-9+/=:][^:]*",
            secret in ".*",
        ) {
            let raw = format!("{}:{ct}", STANDARD.encode(iv));
            prop_assert_eq!(decrypt(&RawToken::new(raw), &secret), None);
        }
    }
}
