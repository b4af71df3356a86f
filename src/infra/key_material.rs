//! RSA key material used to sign and verify access tokens.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, encode};
use thiserror::Error;
use time::{Duration, OffsetDateTime};

use crate::application::jwt::{self, Claims};

#[derive(Error, Debug)]
pub enum KeyLoadError {
    #[error("Cannot read key file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Private key is not a valid RSA PEM key")]
    InvalidPrivateKey(#[source] jsonwebtoken::errors::Error),

    #[error("Public key is not a valid RSA PEM key")]
    InvalidPublicKey(#[source] jsonwebtoken::errors::Error),

    #[error("Public key does not verify signatures made by the private key")]
    Mismatch,
}

/// An RS256 signing key and the public key that verifies it.
///
/// Loaded once during startup and shared read-only behind an `Arc`.
pub struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl KeyPair {
    /// Read both PEM files and build a checked key pair.
    pub fn load(private_path: &Path, public_path: &Path) -> Result<Self, KeyLoadError> {
        let private_pem = read_pem(private_path)?;
        let public_pem = read_pem(public_path)?;
        let keys = Self::from_pem(&private_pem, &public_pem)?;
        tracing::info!(
            private_key = %private_path.display(),
            public_key = %public_path.display(),
            "Loaded signing key pair"
        );
        Ok(keys)
    }

    /// Build a key pair from PEM text. Fails unless the public key verifies a
    /// probe token signed with the private key.
    pub fn from_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, KeyLoadError> {
        let encoding =
            EncodingKey::from_rsa_pem(private_pem).map_err(KeyLoadError::InvalidPrivateKey)?;
        let decoding =
            DecodingKey::from_rsa_pem(public_pem).map_err(KeyLoadError::InvalidPublicKey)?;
        let keys = Self { encoding, decoding };
        keys.check_paired()?;
        Ok(keys)
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding
    }

    fn check_paired(&self) -> Result<(), KeyLoadError> {
        let now = OffsetDateTime::now_utc();
        let probe = Claims {
            sub: 0,
            iat: now.unix_timestamp(),
            exp: (now + Duration::minutes(1)).unix_timestamp(),
        };
        // A public key in the private slot parses fine and only fails to sign.
        let token = encode(&Header::new(Algorithm::RS256), &probe, &self.encoding)
            .map_err(KeyLoadError::InvalidPrivateKey)?;
        jwt::verify(Some(&token), self, now).map_err(|_| KeyLoadError::Mismatch)?;
        Ok(())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair").finish_non_exhaustive()
    }
}

fn read_pem(path: &Path) -> Result<Vec<u8>, KeyLoadError> {
    std::fs::read(path).map_err(|source| KeyLoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}
